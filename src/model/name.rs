//! Canonical forms for category names.

use std::collections::BTreeSet;

/// Uppercases the first letter of every run of letters and lowercases the rest of the run. Any
/// character that is not a letter ends the run, so `"o'neil"` becomes `"O'Neil"` and `"food2go"`
/// becomes `"Food2Go"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Trims and title-cases a category name. Returns `None` for a blank name.
pub fn canonical_name(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(title_case(trimmed))
    }
}

/// Canonicalizes every name, drops blanks and duplicates, and sorts ascending.
pub fn normalize_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|s| canonical_name(s.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("food"), "Food");
        assert_eq!(title_case("FAST food"), "Fast Food");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("food2go"), "Food2Go");
        assert_eq!(title_case("e-bike"), "E-Bike");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("  transport "), Some("Transport".to_string()));
        assert_eq!(canonical_name("   "), None);
    }

    #[test]
    fn test_normalize_names() {
        let actual = normalize_names(["food", "FOOD", " Transport ", "", "  "]);
        assert_eq!(actual, vec!["Food".to_string(), "Transport".to_string()]);
    }

    #[test]
    fn test_normalize_names_is_idempotent() {
        let once = normalize_names(["bills", "health", "Other", "groceries"]);
        let twice = normalize_names(&once);
        assert_eq!(once, twice);
        assert_eq!(once, vec!["Bills", "Groceries", "Health", "Other"]);
    }
}
