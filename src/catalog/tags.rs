//! Tag aggregation across resolved examples.

use crate::catalog::parser::ExampleRecord;
use std::collections::BTreeSet;

/// Distinct tags across all records, lexicographically sorted.
///
/// Records without tags contribute nothing.
pub fn collect_tags(examples: &[ExampleRecord]) -> Vec<String> {
    let mut tags = BTreeSet::new();
    for example in examples {
        if let Some(example_tags) = &example.tags {
            tags.extend(example_tags.iter().cloned());
        }
    }
    tags.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn example(tags: Option<&[&str]>) -> ExampleRecord {
        ExampleRecord {
            origin: "a.c".to_string(),
            title: "A".to_string(),
            tags: tags.map(|t| t.iter().map(|s| (*s).to_string()).collect()),
            source: String::new(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_collect_sorted_deduplicated() {
        let examples = vec![
            example(Some(&["x", "y"])),
            example(Some(&["y"])),
            example(None),
        ];
        assert_eq!(collect_tags(&examples), vec!["x", "y"]);
    }

    #[test]
    fn test_collect_empty_input() {
        assert!(collect_tags(&[]).is_empty());
    }

    #[test]
    fn test_collect_empty_tag_lists() {
        let examples = vec![example(Some(&[])), example(None)];
        assert!(collect_tags(&examples).is_empty());
    }

    #[test]
    fn test_collect_lexicographic_order() {
        let examples = vec![example(Some(&["zebra", "alpha", "math"]))];
        assert_eq!(collect_tags(&examples), vec!["alpha", "math", "zebra"]);
    }
}
