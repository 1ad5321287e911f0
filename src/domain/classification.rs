//! HS code lookup over a small built-in product dictionary.
//!
//! Lookup order:
//! 1. exact key match on the normalised description,
//! 2. keyword overlap against every key, first key reaching the threshold wins
//!    (confidence is discounted),
//! 3. a fixed "needs manual review" record.

use serde::{Deserialize, Serialize};

/// Confidence multiplier applied to keyword (non-exact) matches.
pub const FUZZY_CONFIDENCE_PENALTY: f64 = 0.8;
/// Confidence reported when nothing in the dictionary matched.
pub const FALLBACK_CONFIDENCE: f64 = 0.45;
pub const FALLBACK_HS_CODE: &str = "0000.00";

/// Tokens shorter than this are ignored during keyword matching.
const MIN_TOKEN_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    Laptop,
    Smartphone,
    CottonTShirt,
    LeatherShoes,
    CoffeeBeans,
    Wine,
    LithiumBattery,
    SolarPanel,
    SteelPipe,
    WoodenFurniture,
    PlushToy,
    NitrileGloves,
    AutoParts,
    Bicycle,
}

/// Static dictionary entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HsRecord {
    pub hs_code: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// Ad valorem duty rate (0.05 = 5 %).
    pub duty_rate: f64,
    pub confidence: f64,
    pub notes: &'static str,
}

impl ProductKind {
    /// Declaration order doubles as keyword-match priority.
    pub const ALL: [ProductKind; 14] = [
        ProductKind::Laptop,
        ProductKind::Smartphone,
        ProductKind::CottonTShirt,
        ProductKind::LeatherShoes,
        ProductKind::CoffeeBeans,
        ProductKind::Wine,
        ProductKind::LithiumBattery,
        ProductKind::SolarPanel,
        ProductKind::SteelPipe,
        ProductKind::WoodenFurniture,
        ProductKind::PlushToy,
        ProductKind::NitrileGloves,
        ProductKind::AutoParts,
        ProductKind::Bicycle,
    ];

    /// Lookup keys, primary key first.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            ProductKind::Laptop => &["laptop", "notebook computer", "laptop computer"],
            ProductKind::Smartphone => &["smartphone", "mobile phone", "cell phone"],
            ProductKind::CottonTShirt => &["cotton t-shirt", "t-shirt", "tshirt"],
            ProductKind::LeatherShoes => &["leather shoes", "leather boots"],
            ProductKind::CoffeeBeans => &["coffee beans", "roasted coffee", "coffee"],
            ProductKind::Wine => &["wine", "red wine", "white wine"],
            ProductKind::LithiumBattery => {
                &["lithium-ion battery", "lithium battery", "battery pack"]
            }
            ProductKind::SolarPanel => &["solar panel", "photovoltaic module", "solar module"],
            ProductKind::SteelPipe => &["steel pipe", "steel tube"],
            ProductKind::WoodenFurniture => &["wooden furniture", "wood chair", "wooden table"],
            ProductKind::PlushToy => &["plush toy", "stuffed animal", "toy"],
            ProductKind::NitrileGloves => {
                &["nitrile gloves", "medical gloves", "examination gloves"]
            }
            ProductKind::AutoParts => &["auto parts", "car parts", "brake pads"],
            ProductKind::Bicycle => &["bicycle", "bike"],
        }
    }

    pub fn record(&self) -> HsRecord {
        match self {
            ProductKind::Laptop => HsRecord {
                hs_code: "8471.30",
                description: "Portable automatic data processing machines, not more than 10 kg",
                category: "Electronics",
                duty_rate: 0.0,
                confidence: 0.96,
                notes: "ITA product; duty free in most markets.",
            },
            ProductKind::Smartphone => HsRecord {
                hs_code: "8517.13",
                description: "Smartphones for cellular networks",
                category: "Electronics",
                duty_rate: 0.0,
                confidence: 0.95,
                notes: "Radio equipment certification may be required.",
            },
            ProductKind::CottonTShirt => HsRecord {
                hs_code: "6109.10",
                description: "T-shirts, singlets and other vests, knitted, of cotton",
                category: "Apparel",
                duty_rate: 0.165,
                confidence: 0.93,
                notes: "Textile labelling and fibre content disclosure required.",
            },
            ProductKind::LeatherShoes => HsRecord {
                hs_code: "6403.99",
                description: "Footwear with uppers of leather",
                category: "Footwear",
                duty_rate: 0.085,
                confidence: 0.9,
                notes: "Duty varies by sole material and gender classification.",
            },
            ProductKind::CoffeeBeans => HsRecord {
                hs_code: "0901.21",
                description: "Coffee, roasted, not decaffeinated",
                category: "Food & Beverage",
                duty_rate: 0.0,
                confidence: 0.94,
                notes: "Food facility registration and prior notice required for the US.",
            },
            ProductKind::Wine => HsRecord {
                hs_code: "2204.21",
                description: "Wine of fresh grapes, in containers of 2 L or less",
                category: "Food & Beverage",
                duty_rate: 0.05,
                confidence: 0.92,
                notes: "Excise duties and alcohol import permits apply.",
            },
            ProductKind::LithiumBattery => HsRecord {
                hs_code: "8507.60",
                description: "Lithium-ion accumulators",
                category: "Electronics",
                duty_rate: 0.034,
                confidence: 0.92,
                notes: "Dangerous goods (UN3480); UN38.3 test summary required.",
            },
            ProductKind::SolarPanel => HsRecord {
                hs_code: "8541.43",
                description: "Photovoltaic cells assembled in modules or made up into panels",
                category: "Energy",
                duty_rate: 0.0,
                confidence: 0.91,
                notes: "Check safeguard and anti-dumping measures by origin.",
            },
            ProductKind::SteelPipe => HsRecord {
                hs_code: "7306.30",
                description: "Welded tubes and pipes of circular cross-section, of iron or non-alloy steel",
                category: "Metals",
                duty_rate: 0.025,
                confidence: 0.88,
                notes: "Frequently subject to anti-dumping and countervailing duties.",
            },
            ProductKind::WoodenFurniture => HsRecord {
                hs_code: "9403.60",
                description: "Other wooden furniture",
                category: "Home",
                duty_rate: 0.0,
                confidence: 0.89,
                notes: "Solid wood packaging must meet ISPM 15.",
            },
            ProductKind::PlushToy => HsRecord {
                hs_code: "9503.00",
                description: "Toys, including stuffed toys representing animals",
                category: "Toys",
                duty_rate: 0.0,
                confidence: 0.9,
                notes: "Children's product safety certificate required.",
            },
            ProductKind::NitrileGloves => HsRecord {
                hs_code: "4015.19",
                description: "Gloves of vulcanised rubber other than surgical",
                category: "Medical",
                duty_rate: 0.03,
                confidence: 0.9,
                notes: "Medical device listing may apply for examination gloves.",
            },
            ProductKind::AutoParts => HsRecord {
                hs_code: "8708.99",
                description: "Other parts and accessories of motor vehicles",
                category: "Automotive",
                duty_rate: 0.025,
                confidence: 0.85,
                notes: "Classification depends on the specific part; verify with a broker.",
            },
            ProductKind::Bicycle => HsRecord {
                hs_code: "8712.00",
                description: "Bicycles and other cycles, not motorised",
                category: "Sporting Goods",
                duty_rate: 0.11,
                confidence: 0.92,
                notes: "Electric bicycles fall under 8711.60 instead.",
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    Exact,
    Fuzzy,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: Option<ProductKind>,
    pub hs_code: String,
    pub description: String,
    pub category: String,
    pub duty_rate: f64,
    pub confidence: f64,
    pub match_kind: MatchKind,
    pub matched_key: Option<String>,
    pub notes: String,
}

impl Classification {
    fn from_record(
        kind: ProductKind,
        key: &str,
        match_kind: MatchKind,
        confidence_factor: f64,
    ) -> Self {
        let record = kind.record();
        Self {
            kind: Some(kind),
            hs_code: record.hs_code.to_string(),
            description: record.description.to_string(),
            category: record.category.to_string(),
            duty_rate: record.duty_rate,
            confidence: record.confidence * confidence_factor,
            match_kind,
            matched_key: Some(key.to_string()),
            notes: record.notes.to_string(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            kind: None,
            hs_code: FALLBACK_HS_CODE.to_string(),
            description: "Unknown product – needs manual review".to_string(),
            category: "Unclassified".to_string(),
            duty_rate: 0.0,
            confidence: FALLBACK_CONFIDENCE,
            match_kind: MatchKind::Unknown,
            matched_key: None,
            notes: "No dictionary entry matched. Provide material, function and use, or consult a licensed customs broker.".to_string(),
        }
    }

    pub fn needs_review(&self) -> bool {
        self.match_kind == MatchKind::Unknown
    }
}

/// Classifies a free-text product description. Pure and deterministic.
pub fn classify(description: &str) -> Classification {
    let normalized = description.trim().to_lowercase();
    if normalized.is_empty() {
        return Classification::fallback();
    }

    for kind in ProductKind::ALL {
        if let Some(key) = kind.keys().iter().find(|key| **key == normalized) {
            return Classification::from_record(kind, key, MatchKind::Exact, 1.0);
        }
    }

    let tokens = tokenize(&normalized);
    if tokens.is_empty() {
        return Classification::fallback();
    }
    let threshold = tokens.len().min(2);

    for kind in ProductKind::ALL {
        for key in kind.keys() {
            if overlap_score(&tokens, key) >= threshold {
                return Classification::from_record(
                    kind,
                    key,
                    MatchKind::Fuzzy,
                    FUZZY_CONFIDENCE_PENALTY,
                );
            }
        }
    }

    Classification::fallback()
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .map(|token| token.trim_matches('-'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .collect()
}

/// Number of text tokens that share a substring relation with any key word.
fn overlap_score(tokens: &[&str], key: &str) -> usize {
    let key_words: Vec<&str> = key.split_whitespace().collect();
    tokens
        .iter()
        .filter(|token| {
            key_words
                .iter()
                .any(|word| token.contains(word) || word.contains(**token))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laptop_is_an_exact_and_stable_match() {
        let first = classify("laptop");
        let second = classify("  LAPTOP ");
        assert_eq!(first, second);
        assert_eq!(first.kind, Some(ProductKind::Laptop));
        assert_eq!(first.hs_code, "8471.30");
        assert_eq!(first.match_kind, MatchKind::Exact);
        assert_eq!(first.confidence, ProductKind::Laptop.record().confidence);
    }

    #[test]
    fn nonexistent_product_falls_back() {
        for _ in 0..3 {
            let result = classify("zzzz-nonexistent-product");
            assert_eq!(result.match_kind, MatchKind::Unknown);
            assert_eq!(result.hs_code, FALLBACK_HS_CODE);
            assert_eq!(result.confidence, 0.45);
            assert!(result.needs_review());
        }
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(classify("   ").match_kind, MatchKind::Unknown);
        assert_eq!(classify("a b").match_kind, MatchKind::Unknown);
    }

    #[test]
    fn keyword_overlap_discounts_confidence() {
        let result = classify("Organic cotton t-shirts, size M");
        assert_eq!(result.kind, Some(ProductKind::CottonTShirt));
        assert_eq!(result.match_kind, MatchKind::Fuzzy);
        let expected = ProductKind::CottonTShirt.record().confidence * FUZZY_CONFIDENCE_PENALTY;
        assert!((result.confidence - expected).abs() < 1e-12);
    }

    #[test]
    fn multi_word_keys_need_two_hits() {
        let result = classify("gaming laptop computer");
        assert_eq!(result.kind, Some(ProductKind::Laptop));
        assert_eq!(result.matched_key.as_deref(), Some("laptop computer"));

        // a single overlapping word is not enough when the text has two tokens
        assert_eq!(classify("gaming laptop").match_kind, MatchKind::Unknown);
    }

    #[test]
    fn single_token_needs_one_hit() {
        let result = classify("bicycles");
        assert_eq!(result.kind, Some(ProductKind::Bicycle));
        assert_eq!(result.match_kind, MatchKind::Fuzzy);
    }

    #[test]
    fn hyphenated_key_words_match_split_text() {
        let result = classify("lithium ion battery cells");
        assert_eq!(result.kind, Some(ProductKind::LithiumBattery));
    }

    #[test]
    fn every_kind_resolves_its_own_keys_exactly() {
        for kind in ProductKind::ALL {
            for key in kind.keys() {
                let result = classify(key);
                assert_eq!(result.kind, Some(kind), "key {key}");
                assert_eq!(result.match_kind, MatchKind::Exact);
            }
        }
    }
}
