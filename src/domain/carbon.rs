use serde::{Deserialize, Serialize};

use super::{rates::TransportMode, region::estimate_distance_km};

/// kg CO2 absorbed by one mature tree per year.
const TREE_ABSORPTION_KG: f64 = 21.0;
/// USD per tonne of CO2 for verified offsets.
const OFFSET_PRICE_PER_TONNE: f64 = 15.0;

/// kg CO2e per tonne-km.
pub fn emission_factor(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Air => 0.602,
        TransportMode::Truck => 0.105,
        TransportMode::Rail => 0.028,
        TransportMode::Ocean => 0.016,
        TransportMode::Express => 0.75,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionRating {
    A,
    B,
    C,
    D,
    E,
}

impl EmissionRating {
    pub fn from_co2_kg(co2_kg: f64) -> Self {
        match co2_kg {
            v if v < 50.0 => EmissionRating::A,
            v if v < 250.0 => EmissionRating::B,
            v if v < 1_000.0 => EmissionRating::C,
            v if v < 5_000.0 => EmissionRating::D,
            _ => EmissionRating::E,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmissionRating::A => "A",
            EmissionRating::B => "B",
            EmissionRating::C => "C",
            EmissionRating::D => "D",
            EmissionRating::E => "E",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarbonInput {
    pub origin: String,
    pub destination: String,
    pub weight_kg: f64,
    pub mode: TransportMode,
    /// Overrides the region-based distance estimate.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeAlternative {
    pub mode: TransportMode,
    pub co2_kg: f64,
    /// Positive when the alternative emits less than the chosen mode.
    pub savings_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarbonReport {
    pub mode: TransportMode,
    pub distance_km: f64,
    pub co2_kg: f64,
    pub trees_to_offset: f64,
    pub offset_cost_usd: f64,
    pub rating: EmissionRating,
    /// Sorted by emissions, lowest first.
    pub alternatives: Vec<ModeAlternative>,
}

fn co2_for(weight_kg: f64, distance_km: f64, mode: TransportMode) -> f64 {
    weight_kg / 1000.0 * distance_km * emission_factor(mode)
}

pub fn calculate(input: &CarbonInput) -> CarbonReport {
    let weight = input.weight_kg.max(0.0);
    let distance_km = input
        .distance_km
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or_else(|| estimate_distance_km(&input.origin, &input.destination));
    let co2_kg = co2_for(weight, distance_km, input.mode);

    let mut alternatives: Vec<ModeAlternative> = TransportMode::ALL
        .into_iter()
        .filter(|mode| *mode != input.mode)
        .map(|mode| {
            let alt = co2_for(weight, distance_km, mode);
            let savings_pct = if co2_kg > 0.0 {
                (co2_kg - alt) / co2_kg * 100.0
            } else {
                0.0
            };
            ModeAlternative {
                mode,
                co2_kg: alt,
                savings_pct,
            }
        })
        .collect();
    alternatives.sort_by(|a, b| a.co2_kg.total_cmp(&b.co2_kg));

    CarbonReport {
        mode: input.mode,
        distance_km,
        co2_kg,
        trees_to_offset: co2_kg / TREE_ABSORPTION_KG,
        offset_cost_usd: co2_kg / 1000.0 * OFFSET_PRICE_PER_TONNE,
        rating: EmissionRating::from_co2_kg(co2_kg),
        alternatives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(mode: TransportMode) -> CarbonInput {
        CarbonInput {
            origin: "Shanghai".into(),
            destination: "Toronto".into(),
            weight_kg: 1000.0,
            mode,
            distance_km: None,
        }
    }

    #[test]
    fn air_freight_emissions() {
        let report = calculate(&input(TransportMode::Air));
        assert_eq!(report.distance_km, 11_000.0);
        assert!((report.co2_kg - 6_622.0).abs() < 1e-6);
        assert_eq!(report.rating, EmissionRating::E);
        assert!((report.trees_to_offset - 6_622.0 / 21.0).abs() < 1e-9);
        assert!((report.offset_cost_usd - 6.622 * 15.0).abs() < 1e-9);
    }

    #[test]
    fn alternatives_exclude_chosen_mode_and_report_savings() {
        let report = calculate(&input(TransportMode::Air));
        assert_eq!(report.alternatives.len(), TransportMode::ALL.len() - 1);
        assert!(report.alternatives.iter().all(|alt| alt.mode != TransportMode::Air));
        let ocean = &report.alternatives[0];
        assert_eq!(ocean.mode, TransportMode::Ocean);
        assert!(ocean.savings_pct > 95.0);
    }

    #[test]
    fn explicit_distance_overrides_estimate() {
        let mut req = input(TransportMode::Ocean);
        req.distance_km = Some(100.0);
        let report = calculate(&req);
        assert_eq!(report.distance_km, 100.0);
        assert_eq!(report.rating, EmissionRating::A);
    }

    #[test]
    fn zero_weight_has_no_savings() {
        let mut req = input(TransportMode::Truck);
        req.weight_kg = 0.0;
        let report = calculate(&req);
        assert_eq!(report.co2_kg, 0.0);
        assert!(report.alternatives.iter().all(|alt| alt.savings_pct == 0.0));
    }
}
