//! "Did you mean" suggestions for alias names that do not exist.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Returns the known name that best fuzzy-matches `name`, if any matches at all.
pub fn closest_name<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let matcher = SkimMatcherV2::default();

    candidates
        .into_iter()
        .filter(|candidate| *candidate != name)
        .filter_map(|candidate| {
            // Try both directions so that typos and abbreviations both match.
            let score = matcher
                .fuzzy_match(candidate, name)
                .into_iter()
                .chain(matcher.fuzzy_match(name, candidate))
                .max()?;
            Some((score, candidate))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, candidate)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_matches() {
        let names = ["gs", "gst", "ll", "docker-up"];
        assert_eq!(closest_name("dup", names), Some("docker-up".to_string()));
    }

    #[test]
    fn test_longer_query_matches_shorter_name() {
        let names = ["ll", "gs"];
        assert_eq!(closest_name("lll", names), Some("ll".to_string()));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(closest_name("ll", Vec::<&str>::new()), None);
    }

    #[test]
    fn test_unrelated_name_has_no_suggestion() {
        assert_eq!(closest_name("zzz", ["ll", "gs"]), None);
    }
}
