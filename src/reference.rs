//! Fixed reference tables: IARC evidence definitions and practical
//! route-of-exposure advice. Lookup order matters for the digit
//! fallbacks, so both tables are ordered slices rather than maps.

/// IARC carcinogenicity group definitions.
pub const IARC_EVIDENCE: &[(&str, &str)] = &[
    ("Group 1", "Carcinogenic to humans."),
    ("Group 2A", "Probably carcinogenic to humans."),
    ("Group 2B", "Possibly carcinogenic to humans."),
    (
        "Group 3",
        "Not classifiable as to its carcinogenicity to humans.",
    ),
    ("Not Found", "Insufficient data to classify carcinogenicity"),
];

/// Practical advice per predicted route of exposure.
pub const ROUTE_ADVICE: &[(&str, &str)] = &[
    ("oral", "Avoid ingestion. Wash hands thoroughly after handling."),
    (
        "dermal",
        "Wear protective gloves and clothing to prevent skin contact.",
    ),
    (
        "inhalation",
        "Use in a well-ventilated area or wear a respiratory mask.",
    ),
    ("ocular", "Wear safety goggles or other eye protection."),
];

/// Evidence text for an exact group label.
pub fn iarc_evidence(group: &str) -> Option<&'static str> {
    IARC_EVIDENCE
        .iter()
        .find(|(label, _)| *label == group)
        .map(|(_, text)| *text)
}

/// Fallback: evidence text for the first table entry whose label contains
/// the given severity digit. Classifiers emit finer-grained sub-labels
/// ("Group 2A", "Group 2B") than the table distinguishes by digit.
pub fn iarc_evidence_for_digit(digit: char) -> Option<&'static str> {
    IARC_EVIDENCE
        .iter()
        .find(|(label, _)| label.contains(digit))
        .map(|(_, text)| *text)
}

/// Advice text for a route label, if the route is known.
pub fn route_advice(route: &str) -> Option<&'static str> {
    ROUTE_ADVICE
        .iter()
        .find(|(label, _)| *label == route)
        .map(|(_, text)| *text)
}
