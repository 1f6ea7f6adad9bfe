//! Badge definitions and unlock criteria.
//!
//! Criteria are plain data so catalogs can be loaded from configuration.
//! Evaluation is pure: a badge is unlocked exactly when its criterion holds
//! for the snapshot it is evaluated against.

use super::ProfileSnapshot;
use crate::errors::{collect_problems, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Counter a criterion can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    RisksManaged,
    MitigationsDone,
    TotalXp,
}

impl Metric {
    fn read(self, snapshot: &ProfileSnapshot) -> u64 {
        match self {
            Metric::RisksManaged => snapshot.counters.risks_managed,
            Metric::MitigationsDone => snapshot.counters.mitigations_done,
            Metric::TotalXp => snapshot.total_xp,
        }
    }
}

/// Unlock predicate over a profile snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BadgeCriterion {
    AtLeast { metric: Metric, at_least: u64 },
    All { all: Vec<BadgeCriterion> },
    Any { any: Vec<BadgeCriterion> },
}

impl BadgeCriterion {
    pub fn at_least(metric: Metric, at_least: u64) -> Self {
        BadgeCriterion::AtLeast { metric, at_least }
    }

    pub fn evaluate(&self, snapshot: &ProfileSnapshot) -> bool {
        match self {
            BadgeCriterion::AtLeast { metric, at_least } => metric.read(snapshot) >= *at_least,
            BadgeCriterion::All { all } => all.iter().all(|c| c.evaluate(snapshot)),
            BadgeCriterion::Any { any } => any.iter().any(|c| c.evaluate(snapshot)),
        }
    }

    fn problems(&self, badge_id: &str, problems: &mut Vec<String>) {
        match self {
            BadgeCriterion::AtLeast { .. } => {}
            BadgeCriterion::All { all: children } | BadgeCriterion::Any { any: children } => {
                if children.is_empty() {
                    problems.push(format!(
                        "badge '{}' has an empty all/any criterion",
                        badge_id
                    ));
                }
                for child in children {
                    child.problems(badge_id, problems);
                }
            }
        }
    }
}

/// Shared, read-only badge metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub criterion: BadgeCriterion,
}

/// A badge as it appears on a derived profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
}

impl BadgeDefinition {
    pub fn evaluate(&self, snapshot: &ProfileSnapshot) -> Badge {
        Badge {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            unlocked: self.criterion.evaluate(snapshot),
        }
    }
}

/// Ordered badge catalog with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeCatalog {
    badges: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    pub fn new(badges: Vec<BadgeDefinition>) -> Result<Self> {
        collect_problems(catalog_problems(&badges))?;
        Ok(Self { badges })
    }

    pub fn badges(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// Evaluate every badge, in catalog order.
    pub fn evaluate(&self, snapshot: &ProfileSnapshot) -> Vec<Badge> {
        self.badges.iter().map(|b| b.evaluate(snapshot)).collect()
    }
}

pub(crate) fn catalog_problems(badges: &[BadgeDefinition]) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();

    for badge in badges {
        if badge.id.trim().is_empty() {
            problems.push(format!("badge '{}' has an empty id", badge.name));
        } else if !seen.insert(badge.id.as_str()) {
            problems.push(format!("badge id '{}' is defined more than once", badge.id));
        }
        badge.criterion.problems(&badge.id, &mut problems);
    }

    problems
}

/// The stock badges shipped with the dashboard.
pub fn default_badges() -> Vec<BadgeDefinition> {
    vec![
        BadgeDefinition {
            id: "first_blood".to_string(),
            name: "Initiator".to_string(),
            description: "Create your first risk".to_string(),
            icon: "Flag".to_string(),
            criterion: BadgeCriterion::at_least(Metric::RisksManaged, 1),
        },
        BadgeDefinition {
            id: "guardian".to_string(),
            name: "Guardian".to_string(),
            description: "Complete 5 mitigations".to_string(),
            icon: "ShieldCheck".to_string(),
            criterion: BadgeCriterion::at_least(Metric::MitigationsDone, 5),
        },
        BadgeDefinition {
            id: "strategist".to_string(),
            name: "Strategist".to_string(),
            description: "Manage more than 10 risks".to_string(),
            icon: "Brain".to_string(),
            criterion: BadgeCriterion::at_least(Metric::RisksManaged, 10),
        },
        BadgeDefinition {
            id: "legend".to_string(),
            name: "Legend".to_string(),
            description: "Reach 1000 XP".to_string(),
            icon: "Crown".to_string(),
            criterion: BadgeCriterion::at_least(Metric::TotalXp, 1000),
        },
    ]
}

static DEFAULT_CATALOG: Lazy<Arc<BadgeCatalog>> = Lazy::new(|| {
    Arc::new(BadgeCatalog {
        badges: default_badges(),
    })
});

/// Process-wide default catalog.
pub fn default_catalog() -> Arc<BadgeCatalog> {
    Arc::clone(&DEFAULT_CATALOG)
}
