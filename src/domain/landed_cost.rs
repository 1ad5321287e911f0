//! Landed cost estimation: product + shipping + insurance + duty + tax + fees.

use serde::{Deserialize, Serialize};

use super::classification::{classify, Classification};

pub const DEFAULT_INSURANCE_RATE: f64 = 0.005;
/// Shipments valued above this pay a customs brokerage fee.
pub const DE_MINIMIS_USD: f64 = 800.0;
pub const BROKERAGE_FEE_USD: f64 = 45.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandedCostInput {
    pub product_value: f64,
    pub shipping_cost: f64,
    pub duty_rate: f64,
    pub tax_rate: f64,
    #[serde(default)]
    pub insurance_rate: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandedCostBreakdown {
    pub product_value: f64,
    pub shipping: f64,
    pub insurance: f64,
    pub duty: f64,
    pub tax: f64,
    pub brokerage_fee: f64,
    pub total: f64,
    /// Share of the product value added on top by import costs.
    pub effective_rate: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductLandedCost {
    pub classification: Classification,
    pub destination_tax_rate: f64,
    pub breakdown: LandedCostBreakdown,
}

/// Duty is assessed on the CIF value; tax on CIF plus duty.
pub fn estimate(input: &LandedCostInput) -> LandedCostBreakdown {
    let value = input.product_value.max(0.0);
    let shipping = input.shipping_cost.max(0.0);
    let insurance = value * input.insurance_rate.unwrap_or(DEFAULT_INSURANCE_RATE);
    let customs_value = value + shipping + insurance;
    let duty = customs_value * input.duty_rate;
    let tax = (customs_value + duty) * input.tax_rate;
    let brokerage_fee = if value > DE_MINIMIS_USD {
        BROKERAGE_FEE_USD
    } else {
        0.0
    };
    let total = customs_value + duty + tax + brokerage_fee;
    let effective_rate = if value > 0.0 {
        (total - value) / value
    } else {
        0.0
    };

    LandedCostBreakdown {
        product_value: value,
        shipping,
        insurance,
        duty,
        tax,
        brokerage_fee,
        total,
        effective_rate,
    }
}

/// Import tax (GST/VAT/sales) by destination market.
pub fn destination_tax_rate(destination: &str) -> f64 {
    let destination = destination.to_lowercase();
    let has_word = |word: &str| {
        destination
            .split(|c: char| !c.is_alphanumeric())
            .any(|part| part == word)
    };
    if destination.contains("canada") {
        0.13
    } else if destination.contains("united states") || has_word("usa") || has_word("us") {
        0.0
    } else if destination.contains("european union") || has_word("eu") {
        0.20
    } else {
        0.10
    }
}

pub fn estimate_for_product(
    description: &str,
    product_value: f64,
    shipping_cost: f64,
    destination: &str,
) -> ProductLandedCost {
    let classification = classify(description);
    let tax_rate = destination_tax_rate(destination);
    let breakdown = estimate(&LandedCostInput {
        product_value,
        shipping_cost,
        duty_rate: classification.duty_rate,
        tax_rate,
        insurance_rate: None,
    });
    ProductLandedCost {
        classification,
        destination_tax_rate: tax_rate,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn breakdown_adds_up() {
        let result = estimate(&LandedCostInput {
            product_value: 1000.0,
            shipping_cost: 200.0,
            duty_rate: 0.1,
            tax_rate: 0.13,
            insurance_rate: Some(0.01),
        });
        assert!(approx(result.insurance, 10.0));
        assert!(approx(result.duty, 121.0));
        assert!(approx(result.tax, (1210.0 + 121.0) * 0.13));
        assert_eq!(result.brokerage_fee, BROKERAGE_FEE_USD);
        let expected = 1210.0 + 121.0 + result.tax + BROKERAGE_FEE_USD;
        assert!(approx(result.total, expected));
        assert!(approx(result.effective_rate, (expected - 1000.0) / 1000.0));
    }

    #[test]
    fn low_value_shipments_skip_brokerage() {
        let result = estimate(&LandedCostInput {
            product_value: 120.0,
            shipping_cost: 15.0,
            duty_rate: 0.0,
            tax_rate: 0.0,
            insurance_rate: None,
        });
        assert_eq!(result.brokerage_fee, 0.0);
        assert!(approx(result.total, 120.0 + 15.0 + 120.0 * DEFAULT_INSURANCE_RATE));
    }

    #[test]
    fn zero_value_has_zero_effective_rate() {
        let result = estimate(&LandedCostInput {
            product_value: 0.0,
            shipping_cost: 50.0,
            duty_rate: 0.2,
            tax_rate: 0.2,
            insurance_rate: None,
        });
        assert_eq!(result.effective_rate, 0.0);
    }

    #[test]
    fn product_estimate_uses_classified_duty() {
        let result = estimate_for_product("cotton t-shirt", 500.0, 40.0, "Toronto, Canada");
        assert_eq!(result.classification.hs_code, "6109.10");
        assert_eq!(result.destination_tax_rate, 0.13);
        assert!(result.breakdown.duty > 0.0);
    }

    #[test]
    fn destination_tax_table() {
        assert_eq!(destination_tax_rate("Canada"), 0.13);
        assert_eq!(destination_tax_rate("United States"), 0.0);
        assert_eq!(destination_tax_rate("European Union"), 0.20);
        assert_eq!(destination_tax_rate("Brazil"), 0.10);
    }
}
