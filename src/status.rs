//! Free-text release status classification.
//!
//! Release authors write whatever they like in the `Status` field
//! ("Released", "Beta (working prototype)", "WIP - needs testing"). Cards
//! only have five badge styles, so the text is folded into a
//! [`StatusCategory`] by case-insensitive substring search.
//!
//! Rules are evaluated in a fixed order and the first hit wins:
//!
//! | contains | category |
//! |---|---|
//! | `released` or `ready` | released |
//! | `working` | working |
//! | `wip` or `progress` | wip |
//! | `beta` | beta |
//! | `proof` | proof-of-concept |
//! | anything else | wip |
//!
//! The order matters: `"Released (WIP)"` is released, not wip.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Released,
    Working,
    Wip,
    Beta,
    ProofOfConcept,
}

const RULES: &[(&[&str], StatusCategory)] = &[
    (&["released", "ready"], StatusCategory::Released),
    (&["working"], StatusCategory::Working),
    (&["wip", "progress"], StatusCategory::Wip),
    (&["beta"], StatusCategory::Beta),
    (&["proof"], StatusCategory::ProofOfConcept),
];

impl StatusCategory {
    /// Every category, in filter-control order.
    pub const ALL: [StatusCategory; 5] = [
        StatusCategory::Released,
        StatusCategory::Working,
        StatusCategory::Wip,
        StatusCategory::Beta,
        StatusCategory::ProofOfConcept,
    ];

    /// Classify a free-text status. Unrecognised text falls back to `Wip`.
    pub fn classify(status: &str) -> Self {
        let normalized = normalize_status(status);
        RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| normalized.contains(n)))
            .map(|(_, category)| *category)
            .unwrap_or(StatusCategory::Wip)
    }

    /// CSS class used on status badges.
    pub fn css_class(self) -> &'static str {
        match self {
            StatusCategory::Released => "released",
            StatusCategory::Working => "working",
            StatusCategory::Wip => "wip",
            StatusCategory::Beta => "beta",
            StatusCategory::ProofOfConcept => "proof-of-concept",
        }
    }

    /// Human label for the status filter control.
    pub fn label(self) -> &'static str {
        match self {
            StatusCategory::Released => "Released",
            StatusCategory::Working => "Working",
            StatusCategory::Wip => "Work in Progress",
            StatusCategory::Beta => "Beta",
            StatusCategory::ProofOfConcept => "Proof of Concept",
        }
    }

    /// Substring the status filter control submits for this category.
    ///
    /// Filtering matches raw status text, so this is a search term rather
    /// than the category name (`"proof"` matches "Proof of concept").
    pub fn filter_term(self) -> &'static str {
        match self {
            StatusCategory::Released => "released",
            StatusCategory::Working => "working",
            StatusCategory::Wip => "wip",
            StatusCategory::Beta => "beta",
            StatusCategory::ProofOfConcept => "proof",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Lowercased status text, the form both filtering and classification use.
pub fn normalize_status(status: &str) -> String {
    status.to_lowercase()
}
