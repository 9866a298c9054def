#![forbid(unsafe_code)]

//! `#step-<n>` URL fragment encoding.
//!
//! Fragments are 1-based; step indices are 0-based.

const PREFIX: &str = "#step-";

/// Fragment that deep-links to the step at `index`.
#[must_use]
pub fn step_fragment(index: usize) -> String {
    format!("{PREFIX}{}", index.saturating_add(1))
}

/// Parse a location fragment into a step index in `[0, total)`.
///
/// Anything that is not exactly `#step-<digits>` maps to step 0.
/// Out-of-range numbers clamp to the nearest valid step, including digit
/// runs too long for an integer.
#[must_use]
pub fn parse_step_fragment(fragment: &str, total: usize) -> usize {
    let last = total.saturating_sub(1);
    let Some(digits) = fragment.strip_prefix(PREFIX) else {
        return 0;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    let number = digits.parse::<usize>().unwrap_or(usize::MAX);
    number.saturating_sub(1).min(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_one_based() {
        assert_eq!(step_fragment(0), "#step-1");
        assert_eq!(step_fragment(3), "#step-4");
    }

    #[test]
    fn parses_valid_fragments() {
        assert_eq!(parse_step_fragment("#step-1", 4), 0);
        assert_eq!(parse_step_fragment("#step-3", 4), 2);
        assert_eq!(parse_step_fragment("#step-4", 4), 3);
    }

    #[test]
    fn invalid_fragments_default_to_first_step() {
        for fragment in ["", "#", "#step-", "#step-x", "#step-2a", "step-2", "#Step-2", "#step--1"] {
            assert_eq!(parse_step_fragment(fragment, 4), 0, "{fragment:?}");
        }
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(parse_step_fragment("#step-0", 4), 0);
        assert_eq!(parse_step_fragment("#step-9", 4), 3);
        assert_eq!(parse_step_fragment("#step-99999999999999999999999", 4), 3);
    }

    #[test]
    fn round_trip() {
        for k in 0..4 {
            assert_eq!(parse_step_fragment(&step_fragment(k), 4), k);
        }
    }
}
