//! Coarse region detection from free-text place names.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Asia,
    Europe,
    NorthAmerica,
    Other,
}

const ASIA_HINTS: &[&str] = &[
    "china", "shanghai", "shenzhen", "hong kong", "busan", "japan", "korea", "vietnam", "india",
    "asia",
];
const EUROPE_HINTS: &[&str] = &[
    "germany", "france", "uk", "london", "rotterdam", "italy", "spain", "europe",
];
const NORTH_AMERICA_HINTS: &[&str] = &[
    "usa", "united states", "canada", "mexico", "toronto", "chicago",
];

impl Region {
    /// Substring match on the lowercased place name. Hints of three letters or
    /// fewer must match a whole word. Asia wins over Europe, Europe over North
    /// America.
    pub fn detect(place: &str) -> Self {
        let place = place.to_lowercase();
        let has_word = |word: &str| {
            place
                .split(|c: char| !c.is_alphanumeric())
                .any(|part| part == word)
        };
        let hit = |hints: &[&str]| {
            hints.iter().any(|hint| {
                if hint.len() <= 3 {
                    has_word(hint)
                } else {
                    place.contains(hint)
                }
            })
        };
        if hit(ASIA_HINTS) {
            Region::Asia
        } else if hit(EUROPE_HINTS) {
            Region::Europe
        } else if hit(NORTH_AMERICA_HINTS) {
            Region::NorthAmerica
        } else {
            Region::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::Other => "Other",
        }
    }
}

/// Price/time multiplier derived from the shipment origin.
pub fn distance_factor(origin: &str) -> f64 {
    match Region::detect(origin) {
        Region::Asia => 1.8,
        Region::Europe => 1.4,
        Region::NorthAmerica => 1.0,
        Region::Other => 1.2,
    }
}

/// Rough lane distance in kilometres between two places.
pub fn estimate_distance_km(origin: &str, destination: &str) -> f64 {
    use Region::*;

    match (Region::detect(origin), Region::detect(destination)) {
        (Asia, NorthAmerica) | (NorthAmerica, Asia) => 11_000.0,
        (Asia, Europe) | (Europe, Asia) => 9_500.0,
        (Europe, NorthAmerica) | (NorthAmerica, Europe) => 6_500.0,
        (Asia, Asia) => 2_500.0,
        (Europe, Europe) => 1_200.0,
        (NorthAmerica, NorthAmerica) => 1_800.0,
        _ => 2_000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_regions_by_substring() {
        assert_eq!(Region::detect("Shanghai, China"), Region::Asia);
        assert_eq!(Region::detect("Port of Rotterdam"), Region::Europe);
        assert_eq!(Region::detect("Toronto, ON"), Region::NorthAmerica);
        assert_eq!(Region::detect("Santos, Brazil"), Region::Other);
    }

    #[test]
    fn short_hints_need_a_whole_word() {
        assert_eq!(Region::detect("Milwaukee, USA"), Region::NorthAmerica);
        assert_eq!(Region::detect("Fukuoka, Japan"), Region::Asia);
        assert_eq!(Region::detect("Jerusalem"), Region::Other);
        assert_eq!(Region::detect("London, UK"), Region::Europe);
        assert_eq!(Region::detect("Leeds (UK)"), Region::Europe);
        assert_eq!(Region::detect("Austin, USA"), Region::NorthAmerica);
        assert_eq!(distance_factor("Milwaukee, USA"), 1.0);
    }

    #[test]
    fn distance_factor_follows_region() {
        assert_eq!(distance_factor("Shenzhen"), 1.8);
        assert_eq!(distance_factor("Hamburg, Germany"), 1.4);
        assert_eq!(distance_factor("Chicago"), 1.0);
        assert_eq!(distance_factor(""), 1.2);
    }

    #[test]
    fn distances_are_symmetric() {
        assert_eq!(
            estimate_distance_km("Shanghai", "Toronto"),
            estimate_distance_km("Toronto", "Shanghai")
        );
        assert_eq!(estimate_distance_km("Lagos", "Lima"), 2_000.0);
    }
}
