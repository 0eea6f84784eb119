// jobmart-core/src/domain/silver/roles.rs

use std::collections::BTreeMap;
use tracing::info;

use crate::domain::configuration::RoleRule;
use crate::domain::posting::{EnrichedPosting, OTHER_ROLE};

/// Ordered keyword classifier over job titles. The first rule with a
/// keyword contained in the lower-cased title wins.
pub struct RoleClassifier<'a> {
    rules: &'a [RoleRule],
}

impl<'a> RoleClassifier<'a> {
    pub fn new(rules: &'a [RoleRule]) -> Self {
        Self { rules }
    }

    pub fn classify(&self, title: Option<&str>) -> &'a str {
        let Some(title) = title else {
            return OTHER_ROLE;
        };
        let title = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|k| !k.is_empty() && title.contains(k.to_lowercase().as_str()))
            })
            .map(|rule| rule.family.as_str())
            .unwrap_or(OTHER_ROLE)
    }
}

/// Classifies every posting. Returns the number of families in use.
pub fn apply(rows: &mut [EnrichedPosting], rules: &[RoleRule]) -> usize {
    let classifier = RoleClassifier::new(rules);
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for row in rows.iter_mut() {
        let family = classifier.classify(row.posting.title.as_deref());
        row.role_family = family.to_string();
        *counts.entry(family).or_insert(0) += 1;
    }

    let mut top: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (*k, *v)).collect();
    top.sort_by(|a, b| b.1.cmp(&a.1));
    let top: Vec<&str> = top.iter().take(5).map(|(family, _)| *family).collect();
    info!(families = counts.len(), top = %top.join(", "), "Role families classified");

    counts.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PipelineConfig;

    #[test]
    fn test_precedence_follows_rule_order() {
        let config = PipelineConfig::default();
        let classifier = RoleClassifier::new(&config.role_keywords);

        assert_eq!(classifier.classify(Some("Sales Manager")), "Sales");
        assert_eq!(classifier.classify(Some("Data Analyst")), "Analyst");
        assert_eq!(classifier.classify(Some("Software Engineer")), "Engineer");
        assert_eq!(classifier.classify(Some("Senior Software Developer")), "Developer");
        assert_eq!(classifier.classify(Some("STAFF NURSE")), "Healthcare");
    }

    #[test]
    fn test_unmatched_and_null_are_other() {
        let config = PipelineConfig::default();
        let classifier = RoleClassifier::new(&config.role_keywords);

        assert_eq!(classifier.classify(Some("Zookeeper")), "Other");
        assert_eq!(classifier.classify(None), "Other");
    }

    #[test]
    fn test_custom_order_changes_the_winner() {
        let rules = vec![
            RoleRule {
                family: "Manager".to_string(),
                keywords: vec!["manager".to_string()],
            },
            RoleRule {
                family: "Sales".to_string(),
                keywords: vec!["sales".to_string()],
            },
        ];
        let classifier = RoleClassifier::new(&rules);
        assert_eq!(classifier.classify(Some("Sales Manager")), "Manager");
    }
}
