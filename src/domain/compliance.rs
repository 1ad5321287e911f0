//! Keyword-driven trade compliance Q&A.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const NO_MATCH_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComplianceError {
    #[error("question is empty")]
    EmptyQuestion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Incoterms,
    CertificateOfOrigin,
    Usmca,
    DeMinimis,
    ExportControls,
    AntiDumping,
    CustomsBond,
    IsfFiling,
}

struct TopicEntry {
    keywords: &'static [&'static str],
    answer: &'static str,
    sources: &'static [&'static str],
    related: &'static [Topic],
}

impl Topic {
    pub const ALL: [Topic; 8] = [
        Topic::Incoterms,
        Topic::CertificateOfOrigin,
        Topic::Usmca,
        Topic::DeMinimis,
        Topic::ExportControls,
        Topic::AntiDumping,
        Topic::CustomsBond,
        Topic::IsfFiling,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Topic::Incoterms => "Incoterms",
            Topic::CertificateOfOrigin => "Certificate of origin",
            Topic::Usmca => "USMCA / CUSMA",
            Topic::DeMinimis => "De minimis thresholds",
            Topic::ExportControls => "Export controls",
            Topic::AntiDumping => "Anti-dumping duties",
            Topic::CustomsBond => "Customs bonds",
            Topic::IsfFiling => "ISF (10+2) filing",
        }
    }

    fn entry(&self) -> TopicEntry {
        match self {
            Topic::Incoterms => TopicEntry {
                keywords: &["incoterm", "fob", "cif", "exw", "ddp", "dap", "delivery terms"],
                answer: "Incoterms 2020 define where risk and cost transfer from seller to buyer. FOB transfers risk once goods are on board; CIF adds seller-paid freight and insurance; DDP puts every cost including import duties on the seller.",
                sources: &["ICC Incoterms 2020"],
                related: &[Topic::CustomsBond, Topic::DeMinimis],
            },
            Topic::CertificateOfOrigin => TopicEntry {
                keywords: &["certificate of origin", "origin", "rules of origin", "preferential"],
                answer: "A certificate of origin proves where goods were produced. Preferential certificates unlock reduced duty under trade agreements; keep supporting production records for at least five years.",
                sources: &["WCO Rules of Origin Handbook"],
                related: &[Topic::Usmca],
            },
            Topic::Usmca => TopicEntry {
                keywords: &["usmca", "cusma", "nafta", "t-mec"],
                answer: "USMCA/CUSMA grants duty-free treatment to qualifying goods traded between Canada, the United States and Mexico. Goods must meet product-specific rules of origin, and the importer needs a certification of origin with the nine minimum data elements.",
                sources: &["USMCA Chapter 5", "CBSA Memorandum D11-4-2"],
                related: &[Topic::CertificateOfOrigin],
            },
            Topic::DeMinimis => TopicEntry {
                keywords: &["de minimis", "minimis", "low value", "threshold", "small shipment"],
                answer: "De minimis thresholds let low-value shipments enter without duty. The United States uses USD 800 (Section 321); Canada uses CAD 150 for duty and CAD 40 for tax on courier shipments.",
                sources: &["19 U.S.C. 1321", "CBSA Courier Low Value Shipment Program"],
                related: &[Topic::Incoterms],
            },
            Topic::ExportControls => TopicEntry {
                keywords: &["export control", "dual-use", "dual use", "eccn", "ear", "itar", "licence", "license"],
                answer: "Dual-use items may need an export licence depending on their ECCN, destination and end user. Classify against the Commerce Control List before shipping and screen every party against denied-party lists.",
                sources: &["EAR Part 774", "Wassenaar Arrangement"],
                related: &[Topic::AntiDumping],
            },
            Topic::AntiDumping => TopicEntry {
                keywords: &["anti-dumping", "antidumping", "dumping", "countervailing", "cvd", "section 232"],
                answer: "Anti-dumping and countervailing duties apply on top of normal duty for specific products from specific countries. Check active orders for your HS code and origin; cash deposits can exceed 100 % of value.",
                sources: &["US ITC AD/CVD orders", "CBSA SIMA measures in force"],
                related: &[Topic::ExportControls],
            },
            Topic::CustomsBond => TopicEntry {
                keywords: &["customs bond", "bond", "surety", "continuous bond", "single entry"],
                answer: "A customs bond guarantees payment of duties and penalties. Single-entry bonds cover one shipment; continuous bonds cover a year of imports and are sized at 10 % of annual duties paid, minimum USD 50,000.",
                sources: &["19 CFR Part 113"],
                related: &[Topic::IsfFiling],
            },
            Topic::IsfFiling => TopicEntry {
                keywords: &["isf", "10+2", "importer security filing", "security filing"],
                answer: "Importer Security Filing (10+2) must be submitted at least 24 hours before cargo is loaded on a US-bound vessel. Late or inaccurate filings risk penalties of USD 5,000 per violation.",
                sources: &["19 CFR Part 149"],
                related: &[Topic::CustomsBond],
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplianceAnswer {
    pub topic: Option<Topic>,
    pub answer: String,
    pub sources: Vec<String>,
    pub confidence: f64,
    pub related: Vec<Topic>,
}

/// Picks the topic with the most keyword hits; ties go to the earlier topic.
pub fn answer(question: &str) -> Result<ComplianceAnswer, ComplianceError> {
    let normalized = question.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ComplianceError::EmptyQuestion);
    }

    let mut best: Option<(Topic, usize)> = None;
    for topic in Topic::ALL {
        let hits = topic
            .entry()
            .keywords
            .iter()
            .filter(|keyword| contains_term(&normalized, keyword))
            .count();
        if hits > best.map_or(0, |(_, top)| top) {
            best = Some((topic, hits));
        }
    }

    let Some((topic, hits)) = best else {
        return Ok(ComplianceAnswer {
            topic: None,
            answer: "No guidance matched your question. Consult a licensed customs broker or the destination customs authority for a binding ruling.".to_string(),
            sources: Vec::new(),
            confidence: NO_MATCH_CONFIDENCE,
            related: Topic::ALL.iter().copied().take(3).collect(),
        });
    };

    let entry = topic.entry();
    Ok(ComplianceAnswer {
        topic: Some(topic),
        answer: entry.answer.to_string(),
        sources: entry.sources.iter().map(|s| s.to_string()).collect(),
        confidence: (0.6 + 0.1 * hits as f64).min(0.95),
        related: entry.related.to_vec(),
    })
}

/// Single words must match on word boundaries; phrases match as substrings.
fn contains_term(text: &str, term: &str) -> bool {
    if term.contains(' ') {
        return text.contains(term);
    }
    text.split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '+'))
        .any(|word| word == term || (term.len() > 4 && word.starts_with(term)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_topic_with_most_hits() {
        let result = answer("Does FOB or CIF shift freight risk? Which incoterm is best?").unwrap();
        assert_eq!(result.topic, Some(Topic::Incoterms));
        assert!((result.confidence - 0.9).abs() < 1e-9);
        assert!(!result.sources.is_empty());
    }

    #[test]
    fn confidence_is_capped() {
        let result = answer("export control eccn ear itar license dual-use licence").unwrap();
        assert_eq!(result.topic, Some(Topic::ExportControls));
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn short_keywords_need_word_boundaries() {
        // "ear" must not match inside "year"
        let result = answer("What changed this year for CUSMA?").unwrap();
        assert_eq!(result.topic, Some(Topic::Usmca));
    }

    #[test]
    fn unknown_questions_get_broker_referral() {
        let result = answer("What is the weather like in Lisbon?").unwrap();
        assert_eq!(result.topic, None);
        assert_eq!(result.confidence, 0.3);
    }

    #[test]
    fn empty_question_is_rejected() {
        assert_eq!(answer("   "), Err(ComplianceError::EmptyQuestion));
    }
}
