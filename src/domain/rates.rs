//! Carrier rate comparison.
//!
//! Quotes are built from a per-mode base rate, the origin's distance factor,
//! a per-carrier multiplier and a small random variance. The variance source
//! is passed in so callers (and tests) control reproducibility.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::region::distance_factor;

/// Minimum chargeable weight.
pub const MIN_WEIGHT_KG: f64 = 1.0;
const PRICE_VARIANCE: (f64, f64) = (0.95, 1.05);
const MAX_TRANSIT_JITTER_DAYS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    Ocean,
    Air,
    Rail,
    Truck,
    Express,
}

impl TransportMode {
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Ocean,
        TransportMode::Air,
        TransportMode::Rail,
        TransportMode::Truck,
        TransportMode::Express,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Ocean => "Ocean",
            TransportMode::Air => "Air",
            TransportMode::Rail => "Rail",
            TransportMode::Truck => "Truck",
            TransportMode::Express => "Express",
        }
    }

    /// USD per kg before distance and carrier adjustments.
    pub fn base_rate_per_kg(&self) -> f64 {
        match self {
            TransportMode::Ocean => 0.35,
            TransportMode::Air => 4.2,
            TransportMode::Rail => 0.9,
            TransportMode::Truck => 1.6,
            TransportMode::Express => 8.5,
        }
    }

    pub fn base_transit_days(&self) -> f64 {
        match self {
            TransportMode::Ocean => 24.0,
            TransportMode::Air => 4.0,
            TransportMode::Rail => 14.0,
            TransportMode::Truck => 6.0,
            TransportMode::Express => 2.0,
        }
    }

    /// On-time percentage.
    pub fn base_reliability(&self) -> f64 {
        match self {
            TransportMode::Ocean => 82.0,
            TransportMode::Air => 93.0,
            TransportMode::Rail => 86.0,
            TransportMode::Truck => 89.0,
            TransportMode::Express => 97.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Carrier {
    pub name: &'static str,
    pub mode: TransportMode,
    pub price_multiplier: f64,
    pub reliability_delta: f64,
}

pub const CARRIERS: &[Carrier] = &[
    Carrier {
        name: "Maersk Line",
        mode: TransportMode::Ocean,
        price_multiplier: 1.0,
        reliability_delta: 2.0,
    },
    Carrier {
        name: "MSC",
        mode: TransportMode::Ocean,
        price_multiplier: 0.94,
        reliability_delta: -3.0,
    },
    Carrier {
        name: "Lufthansa Cargo",
        mode: TransportMode::Air,
        price_multiplier: 1.05,
        reliability_delta: 3.0,
    },
    Carrier {
        name: "Cathay Cargo",
        mode: TransportMode::Air,
        price_multiplier: 0.97,
        reliability_delta: 0.0,
    },
    Carrier {
        name: "CN Rail Intermodal",
        mode: TransportMode::Rail,
        price_multiplier: 1.0,
        reliability_delta: 0.0,
    },
    Carrier {
        name: "TransForce Freight",
        mode: TransportMode::Truck,
        price_multiplier: 1.0,
        reliability_delta: -1.0,
    },
    Carrier {
        name: "DHL Express",
        mode: TransportMode::Express,
        price_multiplier: 1.08,
        reliability_delta: 2.0,
    },
    Carrier {
        name: "FedEx International Priority",
        mode: TransportMode::Express,
        price_multiplier: 1.0,
        reliability_delta: 1.0,
    },
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
    pub origin: String,
    pub destination: String,
    pub weight_kg: f64,
    /// Restricts quotes to these modes; empty means all modes.
    #[serde(default)]
    pub modes: Vec<TransportMode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub carrier: String,
    pub mode: TransportMode,
    pub price_usd: f64,
    pub transit_days: u32,
    pub reliability: f64,
}

impl RateQuote {
    /// Lower is better: cost-days per reliability point.
    pub fn value_score(&self) -> f64 {
        self.price_usd * self.transit_days as f64 / self.reliability.max(1.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    /// Cheapest first.
    pub quotes: Vec<RateQuote>,
    pub cheapest: Option<RateQuote>,
    pub fastest: Option<RateQuote>,
    pub best_value: Option<RateQuote>,
    pub distance_factor: f64,
    pub recommendations: Vec<String>,
}

pub fn compare_rates<R: Rng + ?Sized>(request: &RateRequest, rng: &mut R) -> RateComparison {
    let weight = if request.weight_kg.is_finite() {
        request.weight_kg.max(MIN_WEIGHT_KG)
    } else {
        MIN_WEIGHT_KG
    };
    let factor = distance_factor(&request.origin);

    let mut quotes: Vec<RateQuote> = CARRIERS
        .iter()
        .filter(|carrier| request.modes.is_empty() || request.modes.contains(&carrier.mode))
        .map(|carrier| {
            let variance = rng.gen_range(PRICE_VARIANCE.0..=PRICE_VARIANCE.1);
            let jitter = rng.gen_range(0..=MAX_TRANSIT_JITTER_DAYS);
            let mode = carrier.mode;
            RateQuote {
                carrier: carrier.name.to_string(),
                mode,
                price_usd: mode.base_rate_per_kg()
                    * weight
                    * factor
                    * carrier.price_multiplier
                    * variance,
                transit_days: (mode.base_transit_days() * factor).ceil() as u32 + jitter,
                reliability: (mode.base_reliability() + carrier.reliability_delta)
                    .clamp(0.0, 100.0),
            }
        })
        .collect();

    quotes.sort_by(|a, b| a.price_usd.total_cmp(&b.price_usd));

    let cheapest = quotes.first().cloned();
    let fastest = quotes
        .iter()
        .min_by(|a, b| {
            a.transit_days
                .cmp(&b.transit_days)
                .then(a.price_usd.total_cmp(&b.price_usd))
        })
        .cloned();
    let best_value = quotes
        .iter()
        .min_by(|a, b| a.value_score().total_cmp(&b.value_score()))
        .cloned();

    let recommendations = build_recommendations(
        request,
        weight,
        cheapest.as_ref(),
        fastest.as_ref(),
        best_value.as_ref(),
    );

    RateComparison {
        quotes,
        cheapest,
        fastest,
        best_value,
        distance_factor: factor,
        recommendations,
    }
}

fn build_recommendations(
    request: &RateRequest,
    weight: f64,
    cheapest: Option<&RateQuote>,
    fastest: Option<&RateQuote>,
    best_value: Option<&RateQuote>,
) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(quote) = cheapest {
        notes.push(format!(
            "Lowest cost: {} ({}) at ${:.2}.",
            quote.carrier,
            quote.mode.label(),
            quote.price_usd
        ));
    }
    if let Some(quote) = fastest {
        notes.push(format!("Fastest: {} in {} days.", quote.carrier, quote.transit_days));
    }
    if let Some(quote) = best_value {
        notes.push(format!("Best overall value: {}.", quote.carrier));
    }
    if weight >= 500.0 {
        notes.push("Shipments over 500 kg usually consolidate well into LCL ocean freight.".into());
    } else if weight <= 30.0 {
        notes.push("Parcel-sized shipments are often cheapest with express integrators.".into());
    }
    if request.destination.trim().is_empty() {
        notes.push("Add a destination to refine duty and tax estimates.".into());
    }
    notes
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn request(origin: &str, weight_kg: f64) -> RateRequest {
        RateRequest {
            origin: origin.to_string(),
            destination: "Toronto".to_string(),
            weight_kg,
            modes: Vec::new(),
        }
    }

    #[test]
    fn same_seed_same_quotes() {
        let req = request("Shanghai", 120.0);
        let a = compare_rates(&req, &mut StdRng::seed_from_u64(7));
        let b = compare_rates(&req, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn quotes_are_sorted_and_within_variance() {
        let req = request("Shenzhen, China", 100.0);
        let result = compare_rates(&req, &mut StdRng::seed_from_u64(42));

        assert_eq!(result.quotes.len(), CARRIERS.len());
        assert_eq!(result.distance_factor, 1.8);
        for pair in result.quotes.windows(2) {
            assert!(pair[0].price_usd <= pair[1].price_usd);
        }
        for quote in &result.quotes {
            let carrier = CARRIERS
                .iter()
                .find(|c| c.name == quote.carrier)
                .expect("known carrier");
            let base = quote.mode.base_rate_per_kg() * 100.0 * 1.8 * carrier.price_multiplier;
            assert!(quote.price_usd >= base * 0.95 - 1e-9);
            assert!(quote.price_usd <= base * 1.05 + 1e-9);
            assert!((0.0..=100.0).contains(&quote.reliability));
        }
        assert_eq!(result.cheapest.as_ref(), result.quotes.first());
    }

    #[test]
    fn fastest_has_minimum_transit_time() {
        let result = compare_rates(&request("Chicago", 10.0), &mut StdRng::seed_from_u64(1));
        let fastest = result.fastest.clone().expect("quotes available");
        let min_days = result.quotes.iter().map(|q| q.transit_days).min();
        assert_eq!(Some(fastest.transit_days), min_days);
        assert_ne!(fastest.mode, TransportMode::Ocean);
        assert!(result.recommendations.iter().any(|r| r.starts_with("Fastest")));
    }

    #[test]
    fn non_positive_weight_is_charged_as_minimum() {
        let zero = compare_rates(&request("Chicago", 0.0), &mut StdRng::seed_from_u64(3));
        let one = compare_rates(&request("Chicago", 1.0), &mut StdRng::seed_from_u64(3));
        assert_eq!(zero.quotes, one.quotes);
    }

    #[test]
    fn mode_filter_limits_carriers() {
        let mut req = request("Rotterdam", 50.0);
        req.modes = vec![TransportMode::Ocean];
        let result = compare_rates(&req, &mut StdRng::seed_from_u64(9));
        assert_eq!(result.quotes.len(), 2);
        assert!(result.quotes.iter().all(|q| q.mode == TransportMode::Ocean));
    }
}
