//! Achievement badges.
//!
//! Each badge has a trigger that compares the progress before and after a
//! single attempt. Triggers are evaluated in catalog order and a badge id is
//! never awarded twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tracker::UserProgress;

pub const FIRST_PROBLEM: &str = "first-problem";
pub const STREAK_5: &str = "streak-5";
pub const STREAK_10: &str = "streak-10";
pub const MILESTONE_50: &str = "milestone-50";
pub const MILESTONE_100: &str = "milestone-100";
pub const PERFECT_20: &str = "perfect-20";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        })
    }
}

/// A badge held by a learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub date_earned: DateTime<Utc>,
    pub rarity: Rarity,
}

/// Trigger: `(before, after)` for one attempt.
pub type Trigger = fn(&UserProgress, &UserProgress) -> bool;

/// A badge that can be earned, and the rule that awards it.
#[derive(Clone, Copy)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
    trigger: Trigger,
}

impl fmt::Debug for BadgeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadgeDefinition")
            .field("id", &self.id)
            .field("rarity", &self.rarity)
            .finish()
    }
}

impl BadgeDefinition {
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        icon: &'static str,
        rarity: Rarity,
        trigger: Trigger,
    ) -> Self {
        Self {
            id,
            name,
            description,
            icon,
            rarity,
            trigger,
        }
    }

    /// Whether this attempt moved the learner across the badge's threshold.
    pub fn is_triggered(&self, before: &UserProgress, after: &UserProgress) -> bool {
        (self.trigger)(before, after)
    }

    /// Award this badge at `at`.
    pub fn award(&self, at: DateTime<Utc>) -> Badge {
        Badge {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            date_earned: at,
            rarity: self.rarity,
        }
    }
}

fn first_problem(before: &UserProgress, after: &UserProgress) -> bool {
    before.total_problems_attempted == 0 && after.total_problems_attempted == 1
}

fn streak_5(before: &UserProgress, after: &UserProgress) -> bool {
    before.current_streak < 5 && after.current_streak == 5
}

fn streak_10(before: &UserProgress, after: &UserProgress) -> bool {
    before.current_streak < 10 && after.current_streak == 10
}

fn milestone_50(before: &UserProgress, after: &UserProgress) -> bool {
    before.total_problems_attempted < 50 && after.total_problems_attempted >= 50
}

fn milestone_100(before: &UserProgress, after: &UserProgress) -> bool {
    before.total_problems_attempted < 100 && after.total_problems_attempted >= 100
}

fn perfect_20(_before: &UserProgress, after: &UserProgress) -> bool {
    after.total_correct >= 20 && after.total_correct == after.total_problems_attempted
}

/// Every badge, in award order.
pub const CATALOG: [BadgeDefinition; 6] = [
    BadgeDefinition::new(
        FIRST_PROBLEM,
        "Getting Started",
        "Completed your first problem!",
        "🎯",
        Rarity::Common,
        first_problem,
    ),
    BadgeDefinition::new(
        STREAK_5,
        "On Fire!",
        "Got 5 problems correct in a row!",
        "🔥",
        Rarity::Rare,
        streak_5,
    ),
    BadgeDefinition::new(
        STREAK_10,
        "Unstoppable!",
        "Got 10 problems correct in a row!",
        "⚡",
        Rarity::Epic,
        streak_10,
    ),
    BadgeDefinition::new(
        MILESTONE_50,
        "Dedicated Learner",
        "Completed 50 problems!",
        "📚",
        Rarity::Rare,
        milestone_50,
    ),
    BadgeDefinition::new(
        MILESTONE_100,
        "Math Champion",
        "Completed 100 problems!",
        "🏆",
        Rarity::Epic,
        milestone_100,
    ),
    BadgeDefinition::new(
        PERFECT_20,
        "Perfectionist",
        "Got 20 problems correct with no mistakes!",
        "💎",
        Rarity::Legendary,
        perfect_20,
    ),
];

/// Look up a badge definition by id.
pub fn definition(id: &str) -> Option<&'static BadgeDefinition> {
    CATALOG.iter().find(|d| d.id == id)
}

/// Badges earned by the step from `before` to `after`, in catalog order.
/// Ids already held in `after` are skipped.
pub fn newly_earned(before: &UserProgress, after: &UserProgress, at: DateTime<Utc>) -> Vec<Badge> {
    CATALOG
        .iter()
        .filter(|def| !after.has_badge(def.id))
        .filter(|def| def.is_triggered(before, after))
        .map(|def| def.award(at))
        .collect()
}
