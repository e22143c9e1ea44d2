//! Grouping of retrieved passages by resolved source.
//!
//! Passages are grouped by exact string equality on their resolved primary
//! URL; no fuzzy URL normalization is attempted. Group order follows
//! retrieval rank (most relevant source first), so the same passage
//! sequence always yields byte-identical grouping.

use std::collections::HashMap;

use crate::sources::resolver::resolve;
use crate::types::Passage;

/// Passages sharing one resolved primary source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceGroup {
    /// The shared canonical citation URL.
    pub primary_url: String,
    /// Member passages, in retrieval-rank order.
    pub passages: Vec<Passage>,
    /// Secondary URLs observed across the members, deduplicated,
    /// first-seen order.
    pub secondary_urls: Vec<String>,
}

impl SourceGroup {
    fn new(primary_url: String) -> Self {
        Self {
            primary_url,
            passages: Vec::new(),
            secondary_urls: Vec::new(),
        }
    }
}

/// Ordered collection of source groups for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceGroups(Vec<SourceGroup>);

impl SourceGroups {
    /// Iterate groups in first-seen (retrieval rank) order.
    pub fn iter(&self) -> std::slice::Iter<'_, SourceGroup> {
        self.0.iter()
    }

    /// Number of distinct resolved sources.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no passages were retrieved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a group by its primary URL.
    pub fn get(&self, primary_url: &str) -> Option<&SourceGroup> {
        self.0.iter().find(|g| g.primary_url == primary_url)
    }
}

impl<'a> IntoIterator for &'a SourceGroups {
    type Item = &'a SourceGroup;
    type IntoIter = std::slice::Iter<'a, SourceGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Group passages by resolved primary source.
///
/// Iterates in retrieval-rank order, creating each group on first sight and
/// appending later passages of the same source to it. Secondary URLs are
/// accumulated per group, skipping duplicates.
pub fn aggregate(passages: &[Passage]) -> SourceGroups {
    let mut groups: Vec<SourceGroup> = Vec::new();
    let mut by_url: HashMap<String, usize> = HashMap::new();

    for passage in passages {
        let resolved = resolve(passage);
        let idx = *by_url.entry(resolved.primary_url.clone()).or_insert_with(|| {
            groups.push(SourceGroup::new(resolved.primary_url.clone()));
            groups.len() - 1
        });
        let group = &mut groups[idx];
        group.passages.push(passage.clone());
        if let Some(secondary) = resolved.secondary_url {
            if !group.secondary_urls.contains(&secondary) {
                group.secondary_urls.push(secondary);
            }
        }
    }

    SourceGroups(groups)
}

/// Extract the ordered primary and secondary URL sets from the groups.
///
/// Primary URLs keep group order; secondary URLs keep first-seen order
/// across groups, deduplicated.
pub fn extract_urls(groups: &SourceGroups) -> (Vec<String>, Vec<String>) {
    let primary: Vec<String> = groups.iter().map(|g| g.primary_url.clone()).collect();

    let mut secondary: Vec<String> = Vec::new();
    for group in groups {
        for url in &group.secondary_urls {
            if !secondary.contains(url) {
                secondary.push(url.clone());
            }
        }
    }

    (primary, secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn passage(content: &str, fields: &[(&str, &str)]) -> Passage {
        let metadata: HashMap<String, serde_json::Value> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::json!(v)))
            .collect();
        Passage {
            content: content.to_string(),
            metadata,
        }
    }

    #[test]
    fn test_groups_preserve_retrieval_rank_order() {
        let passages = vec![
            passage("a", &[("spUrl", "https://sp.fr/F2")]),
            passage("b", &[("spUrl", "https://sp.fr/F1")]),
            passage("c", &[("spUrl", "https://sp.fr/F2")]),
        ];
        let groups = aggregate(&passages);

        assert_eq!(groups.len(), 2);
        let urls: Vec<&str> = groups.iter().map(|g| g.primary_url.as_str()).collect();
        assert_eq!(urls, vec!["https://sp.fr/F2", "https://sp.fr/F1"]);

        let first = groups.get("https://sp.fr/F2").unwrap();
        let contents: Vec<&str> = first.passages.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "c"]);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let passages = vec![
            passage("a", &[("spUrl", "https://sp.fr/F2"), ("source", "https://lf.fr/1")]),
            passage("b", &[("ID", "F9")]),
            passage("c", &[]),
        ];
        assert_eq!(aggregate(&passages), aggregate(&passages));
    }

    #[test]
    fn test_secondary_urls_are_deduplicated_per_group() {
        let passages = vec![
            passage("a", &[("spUrl", "https://sp.fr/F1"), ("source", "https://lf.fr/1")]),
            passage("b", &[("spUrl", "https://sp.fr/F1"), ("source", "https://lf.fr/1")]),
            passage("c", &[("spUrl", "https://sp.fr/F1"), ("source", "https://lf.fr/2")]),
        ];
        let groups = aggregate(&passages);
        let group = groups.get("https://sp.fr/F1").unwrap();
        assert_eq!(group.secondary_urls, vec!["https://lf.fr/1", "https://lf.fr/2"]);
    }

    #[test]
    fn test_grouping_uses_exact_string_equality() {
        // Trailing slash is a different source on purpose
        let passages = vec![
            passage("a", &[("spUrl", "https://sp.fr/F1")]),
            passage("b", &[("spUrl", "https://sp.fr/F1/")]),
        ];
        assert_eq!(aggregate(&passages).len(), 2);
    }

    #[test]
    fn test_extract_urls_orders_and_dedups() {
        let passages = vec![
            passage("a", &[("spUrl", "https://sp.fr/F1"), ("source", "https://lf.fr/x")]),
            passage("b", &[("spUrl", "https://sp.fr/F2"), ("source", "https://lf.fr/x")]),
            passage("c", &[("spUrl", "https://sp.fr/F2"), ("source", "https://lf.fr/y")]),
        ];
        let groups = aggregate(&passages);
        let (primary, secondary) = extract_urls(&groups);
        assert_eq!(primary, vec!["https://sp.fr/F1", "https://sp.fr/F2"]);
        assert_eq!(secondary, vec!["https://lf.fr/x", "https://lf.fr/y"]);
    }

    #[test]
    fn test_empty_input_yields_empty_groups() {
        let groups = aggregate(&[]);
        assert!(groups.is_empty());
        let (primary, secondary) = extract_urls(&groups);
        assert!(primary.is_empty());
        assert!(secondary.is_empty());
    }
}
