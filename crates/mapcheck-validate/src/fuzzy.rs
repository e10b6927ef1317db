//! Fuzzy field-name suggestions.
//!
//! Advisory only: a suggestion is computed after an exact case-insensitive
//! lookup has already failed, and only ever lands in the failure reason.

use rapidfuzz::distance::levenshtein;

/// Suggestions further than this edit distance are considered noise.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Return the candidate closest to `target` by edit distance, when that
/// distance is at most 3. Ties keep the earliest candidate.
pub fn suggest<'a>(target: &str, candidates: &'a [String]) -> Option<&'a str> {
    let target = target.to_lowercase();
    let mut best: Option<(usize, &str)> = None;
    for candidate in candidates {
        let distance = levenshtein::distance(target.chars(), candidate.to_lowercase().chars());
        match best {
            Some((min, _)) if distance >= min => {}
            _ => best = Some((distance, candidate)),
        }
    }
    best.filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .map(|(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn close_candidate_is_suggested() {
        let candidates = names(&["mail", "phone"]);
        assert_eq!(suggest("email", &candidates), Some("mail"));
    }

    #[test]
    fn distant_candidates_are_rejected() {
        let candidates = names(&["xyz"]);
        assert_eq!(suggest("email", &candidates), None);
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let candidates = names(&["USERNAME"]);
        assert_eq!(suggest("username", &candidates), Some("USERNAME"));
    }

    #[test]
    fn ties_keep_first_occurrence() {
        // "cat" -> "bat" and "cat" -> "hat" are both distance 1
        let candidates = names(&["bat", "hat"]);
        assert_eq!(suggest("cat", &candidates), Some("bat"));
    }

    #[test]
    fn empty_candidates_yield_none() {
        assert_eq!(suggest("email", &[]), None);
    }
}
