//! Hazard aggregation: folds the per-ingredient outcomes into one
//! product-level verdict. Pure function of its input: no I/O, never
//! fails, and an empty or all-failed batch yields the neutral default.

use serde::{Deserialize, Serialize};

use crate::reference;

use super::types::IngredientOutcome;

/// Product-level verdict derived from all ingredient outcomes.
/// Recomputed fresh per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardVerdict {
    /// Worst IARC group label found, if any ingredient was classified.
    pub highest_group: Option<String>,
    /// Max confidence (percent) among outcomes in the winning severity
    /// band; multiple ingredients in the same band reinforce it.
    pub confidence_percent: f64,
    pub hazard_tier: String,
    pub iarc_definition: Option<String>,
    /// Practical advice per predicted exposure route, deduplicated by
    /// advice text, in first-appearance order.
    pub route_advice: Vec<String>,
}

impl HazardVerdict {
    /// The verdict for a batch with no usable classification.
    pub fn neutral() -> Self {
        Self {
            highest_group: None,
            confidence_percent: 0.0,
            hazard_tier: "Very Low".to_string(),
            iarc_definition: None,
            route_advice: Vec::new(),
        }
    }
}

/// Severity priority of a group label, higher is worse. Matches by digit
/// presence so sub-labels ("Group 2A", "Group 2B") share their band.
fn group_priority(label: &str) -> u8 {
    if label.contains('1') {
        3
    } else if label.contains('2') {
        2
    } else if label.contains('3') {
        1
    } else {
        0
    }
}

/// Leading severity digit of a label, by the same precedence as
/// [`group_priority`].
fn leading_digit(label: &str) -> Option<char> {
    ['1', '2', '3'].into_iter().find(|d| label.contains(*d))
}

/// Hazard tier from the (severity digit, confidence percent) matrix.
fn hazard_tier(group: Option<&str>, confidence: f64) -> &'static str {
    let digit = group.and_then(leading_digit);
    match digit {
        Some('1') => {
            if confidence >= 70.0 {
                "High"
            } else if confidence >= 40.0 {
                "Moderate"
            } else {
                "Low"
            }
        }
        Some('2') => {
            if confidence >= 70.0 {
                "Moderate"
            } else if confidence >= 40.0 {
                "Low"
            } else {
                "Very Low"
            }
        }
        Some('3') => {
            if confidence >= 70.0 {
                "Low"
            } else {
                "Very Low"
            }
        }
        _ => "Very Low",
    }
}

/// IARC definition for the winning group: exact label first, then any
/// table entry sharing the leading digit.
fn iarc_definition(group: &str) -> Option<String> {
    if let Some(text) = reference::iarc_evidence(group) {
        return Some(text.to_string());
    }
    leading_digit(group)
        .and_then(reference::iarc_evidence_for_digit)
        .map(|text| text.to_string())
}

/// Aggregate all ingredient outcomes into one verdict.
pub fn aggregate(outcomes: &[IngredientOutcome]) -> HazardVerdict {
    // (group, confidence percent) per classified outcome, input order
    let classified: Vec<(&str, f64)> = outcomes
        .iter()
        .filter_map(|outcome| {
            outcome
                .carcinogenicity
                .as_ref()
                .map(|carc| (carc.group.as_str(), carc.predicted_probability() * 100.0))
        })
        .collect();

    // Route labels in first-appearance order across the batch
    let mut routes: Vec<&str> = Vec::new();
    for outcome in outcomes {
        if let Some(route) = &outcome.route {
            for label in &route.routes {
                if !routes.iter().any(|seen| seen == label) {
                    routes.push(label);
                }
            }
        }
    }

    // Worst group wins; a priority tie prefers the higher confidence.
    // Exact priority + confidence ties keep the first-seen entry, so
    // the verdict is deterministic in input order.
    let mut winner: Option<(&str, f64, u8)> = None;
    for (group, confidence) in &classified {
        let priority = group_priority(group);
        match winner {
            None if priority > 0 => winner = Some((group, *confidence, priority)),
            Some((_, best_confidence, best_priority)) => {
                if priority > best_priority
                    || (priority == best_priority && priority != 0 && *confidence > best_confidence)
                {
                    winner = Some((group, *confidence, priority));
                }
            }
            None => {}
        }
    }

    let Some((highest_group, _, winning_priority)) = winner else {
        return HazardVerdict::neutral();
    };

    // Verdict confidence: max across every outcome in the same band,
    // not just the winning outcome.
    let winning_digit = leading_digit(highest_group);
    let band_confidence = classified
        .iter()
        .filter(|(group, _)| {
            group_priority(group) == winning_priority && leading_digit(group) == winning_digit
        })
        .map(|(_, confidence)| *confidence)
        .fold(0.0_f64, f64::max);
    let confidence_percent = (band_confidence * 100.0).round() / 100.0;

    let route_advice = {
        let mut advice: Vec<String> = Vec::new();
        for route in &routes {
            if let Some(text) = reference::route_advice(route) {
                // Dedup by advice text, not route: distinct routes may
                // share identical guidance.
                if !advice.iter().any(|seen| seen == text) {
                    advice.push(text.to_string());
                }
            }
        }
        advice
    };

    HazardVerdict {
        highest_group: Some(highest_group.to_string()),
        confidence_percent,
        hazard_tier: hazard_tier(Some(highest_group), band_confidence).to_string(),
        iarc_definition: iarc_definition(highest_group),
        route_advice,
    }
}
