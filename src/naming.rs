//! Release directory name parsing for the `NN_Some_Title` convention.
//!
//! Every release lives in a directory whose name carries both its sequence
//! number and its title:
//!
//! - `05_chord_blimey` → number "05", title "Chord Blimey"
//! - `13_noisebox` → number "13", title "Noisebox"
//! - `03_Turing_Machine` → number "03", title "Turing Machine"
//!
//! The directory name itself is the release id and is never rewritten.

/// Result of parsing a release directory name like `05_chord_blimey`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReleaseName {
    /// Text before the first underscore, verbatim (`"05"`). For names
    /// without an underscore this is the whole input.
    pub number: String,
    /// Display title: remainder with underscores turned into spaces and each
    /// word capitalised. For names without an underscore, the whole input.
    pub title: String,
}

impl ParsedReleaseName {
    /// Numeric value of the prefix, if it is one.
    pub fn numeric(&self) -> Option<u64> {
        self.number.parse().ok()
    }
}

/// Parse a release directory name.
///
/// - `"05_chord_blimey"` → number="05", title="Chord Blimey"
/// - `"10_twists"` → number="10", title="Twists"
/// - `"sandbox"` → number="sandbox", title="sandbox"
/// - `"07_"` → number="07", title=""
pub fn parse_release_dir_name(name: &str) -> ParsedReleaseName {
    match name.split_once('_') {
        Some((number, rest)) => ParsedReleaseName {
            number: number.to_string(),
            title: title_case(&rest.replace('_', " ")),
        },
        None => ParsedReleaseName {
            number: name.to_string(),
            title: name.to_string(),
        },
    }
}

/// Capitalise the first letter of every word and lowercase the rest.
///
/// A word starts at any letter that does not follow another letter, so
/// `"mk2_board"` style inputs become `"Mk2_Board"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
