//! Text normalization for key comparison.

/// Canonical comparison form of a raw field value.
///
/// - Converts to lowercase
/// - Drops everything that is not ASCII alphanumeric or whitespace
/// - Collapses whitespace runs to a single space
/// - Trims
///
/// Idempotent: applying it twice gives the same result. Empty input stays
/// empty; there is no failure path.
pub fn normalize(value: &str) -> String {
    let filtered: String = value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
        .collect();

    collapse_whitespace(&filtered).trim().to_string()
}

/// Collapse multiple whitespace characters into a single space.
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_ascii_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_fold_and_trim() {
        assert_eq!(normalize("  Acme Corp "), "acme corp");
        assert_eq!(normalize("ACME"), "acme");
    }

    #[test]
    fn punctuation_stripped() {
        assert_eq!(normalize("Acme, Corp."), "acme corp");
        assert_eq!(normalize("Acme-Corp"), "acmecorp");
        assert_eq!(normalize("O'Brien & Sons"), "obrien sons");
    }

    #[test]
    fn whitespace_collapsed() {
        assert_eq!(normalize("Acme   Corp"), "acme corp");
        assert_eq!(normalize("Acme\t\tCorp"), "acme corp");
    }

    #[test]
    fn non_ascii_dropped() {
        assert_eq!(normalize("Café"), "caf");
        assert_eq!(normalize("Müller GmbH"), "mller gmbh");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn idempotent() {
        for s in ["  Acme, CORP  ", "a  b\tc", "", "123-456", "Ünïcode Corp"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
