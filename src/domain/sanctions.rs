//! Denied-party screening against a small built-in watch list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MATCH_THRESHOLD: f64 = 0.85;
pub const POTENTIAL_MATCH_THRESHOLD: f64 = 0.5;

/// Corporate suffixes dropped before comparing names.
const LEGAL_SUFFIXES: &[&str] = &[
    "ltd", "limited", "llc", "inc", "corp", "corporation", "co", "company", "gmbh", "sa", "plc",
];

const EMBARGOED_COUNTRIES: &[&str] = &["north korea", "iran", "syria", "cuba", "crimea"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanctionsError {
    #[error("party name is empty")]
    EmptyName,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScreeningStatus {
    Clear,
    PotentialMatch,
    Match,
}

impl ScreeningStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ScreeningStatus::Clear => "Clear",
            ScreeningStatus::PotentialMatch => "Potential match",
            ScreeningStatus::Match => "Match",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeniedParty {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub country: &'static str,
    pub program: &'static str,
    pub list: &'static str,
}

pub const DENIED_PARTIES: &[DeniedParty] = &[
    DeniedParty {
        name: "Crimson Harbor Shipping Ltd",
        aliases: &["Crimson Harbour Shipping", "CHS Maritime"],
        country: "Panama",
        program: "Maritime sanctions evasion",
        list: "SDN",
    },
    DeniedParty {
        name: "Volkov Precision Instruments",
        aliases: &["VPI Trading", "Volkov Instruments GmbH"],
        country: "Russia",
        program: "Export controls (Entity List)",
        list: "Entity List",
    },
    DeniedParty {
        name: "Golden Lotus Trading Company",
        aliases: &["Golden Lotus Import Export"],
        country: "Hong Kong",
        program: "Transshipment diversion",
        list: "Entity List",
    },
    DeniedParty {
        name: "Northern Star Petrochemical",
        aliases: &["NSP Energy", "Northern Star Energy Corp"],
        country: "Iran",
        program: "Energy sector sanctions",
        list: "SDN",
    },
    DeniedParty {
        name: "Atlas Dual-Use Components",
        aliases: &["Atlas Components FZE"],
        country: "United Arab Emirates",
        program: "Dual-use procurement network",
        list: "Unverified List",
    },
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRequest {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreeningHit {
    pub entry_name: String,
    pub matched_on: String,
    pub list: String,
    pub program: String,
    pub country: String,
    pub score: f64,
    pub status: ScreeningStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub screened_name: String,
    pub status: ScreeningStatus,
    /// Highest score first.
    pub hits: Vec<ScreeningHit>,
}

pub fn screen(request: &ScreeningRequest) -> Result<ScreeningResult, SanctionsError> {
    let query = name_tokens(&request.name);
    if query.is_empty() {
        return Err(SanctionsError::EmptyName);
    }

    let mut hits: Vec<ScreeningHit> = DENIED_PARTIES
        .iter()
        .filter_map(|party| {
            let (matched_on, score) = std::iter::once(party.name)
                .chain(party.aliases.iter().copied())
                .map(|candidate| (candidate, jaccard(&query, &name_tokens(candidate))))
                .max_by(|a, b| a.1.total_cmp(&b.1))?;
            let status = status_for(score)?;
            Some(ScreeningHit {
                entry_name: party.name.to_string(),
                matched_on: matched_on.to_string(),
                list: party.list.to_string(),
                program: party.program.to_string(),
                country: party.country.to_string(),
                score,
                status,
            })
        })
        .collect();

    if let Some(country) = request.country.as_deref() {
        let lowered = country.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        if let Some(embargoed) = EMBARGOED_COUNTRIES
            .iter()
            .find(|name| contains_words(&words, name))
        {
            hits.push(ScreeningHit {
                entry_name: country.trim().to_string(),
                matched_on: embargoed.to_string(),
                list: "Comprehensive embargo".to_string(),
                program: "Country-wide sanctions".to_string(),
                country: country.trim().to_string(),
                score: 1.0,
                status: ScreeningStatus::PotentialMatch,
            });
        }
    }

    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    let status = hits
        .iter()
        .map(|hit| hit.status)
        .max()
        .unwrap_or(ScreeningStatus::Clear);

    Ok(ScreeningResult {
        screened_name: request.name.trim().to_string(),
        status,
        hits,
    })
}

fn status_for(score: f64) -> Option<ScreeningStatus> {
    if score >= MATCH_THRESHOLD {
        Some(ScreeningStatus::Match)
    } else if score >= POTENTIAL_MATCH_THRESHOLD {
        Some(ScreeningStatus::PotentialMatch)
    } else {
        None
    }
}

fn name_tokens(name: &str) -> HashSet<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && !LEGAL_SUFFIXES.contains(word))
        .map(str::to_string)
        .collect()
}

/// True when the space-separated words of `phrase` appear consecutively in `words`.
fn contains_words(words: &[&str], phrase: &str) -> bool {
    let target: Vec<&str> = phrase.split(' ').collect();
    words.windows(target.len()).any(|window| window == target.as_slice())
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    shared / union
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, country: Option<&str>) -> ScreeningRequest {
        ScreeningRequest {
            name: name.to_string(),
            country: country.map(str::to_string),
        }
    }

    #[test]
    fn exact_name_with_different_suffix_is_a_match() {
        let result = screen(&request("Crimson Harbor Shipping Limited", None)).unwrap();
        assert_eq!(result.status, ScreeningStatus::Match);
        assert_eq!(result.hits[0].entry_name, "Crimson Harbor Shipping Ltd");
        assert_eq!(result.hits[0].score, 1.0);
    }

    #[test]
    fn partial_overlap_is_a_potential_match() {
        let result = screen(&request("Crimson Shipping", None)).unwrap();
        assert_eq!(result.status, ScreeningStatus::PotentialMatch);
        assert!((result.hits[0].score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn aliases_are_screened() {
        let result = screen(&request("vpi trading", None)).unwrap();
        assert_eq!(result.status, ScreeningStatus::Match);
        assert_eq!(result.hits[0].matched_on, "VPI Trading");
    }

    #[test]
    fn unrelated_party_is_clear() {
        let result = screen(&request("Maple Leaf Outfitters Inc.", Some("Canada"))).unwrap();
        assert_eq!(result.status, ScreeningStatus::Clear);
        assert!(result.hits.is_empty());
    }

    #[test]
    fn embargoed_destination_flags_review() {
        let result = screen(&request("Maple Leaf Outfitters", Some("Iran"))).unwrap();
        assert_eq!(result.status, ScreeningStatus::PotentialMatch);
        assert_eq!(result.hits[0].list, "Comprehensive embargo");
    }

    #[test]
    fn embargo_matches_whole_country_words() {
        let clear = screen(&request("Maple Leaf Outfitters", Some("Tirana, Albania"))).unwrap();
        assert_eq!(clear.status, ScreeningStatus::Clear);
        assert!(clear.hits.is_empty());

        let flagged = screen(&request("Maple Leaf Outfitters", Some("Tehran, Iran"))).unwrap();
        assert_eq!(flagged.status, ScreeningStatus::PotentialMatch);
        assert_eq!(flagged.hits[0].matched_on, "iran");

        let korea = screen(&request("Maple Leaf Outfitters", Some("Pyongyang, North Korea")));
        let korea = korea.unwrap();
        assert_eq!(korea.hits[0].matched_on, "north korea");

        let south = screen(&request("Maple Leaf Outfitters", Some("Seoul, South Korea"))).unwrap();
        assert_eq!(south.status, ScreeningStatus::Clear);
    }

    #[test]
    fn screening_is_deterministic() {
        let req = request("Golden Lotus Trading", Some("Hong Kong"));
        assert_eq!(screen(&req), screen(&req));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(screen(&request("  Ltd ", None)), Err(SanctionsError::EmptyName));
    }
}
