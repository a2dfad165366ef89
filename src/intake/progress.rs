//! Interview milestones and the progress map merged from reply metadata.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// One of the seven interview-progress flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Milestone {
    /// Full name collected.
    Name,
    /// Email and phone collected.
    Contact,
    /// Current location collected.
    Location,
    /// Years of experience collected.
    Experience,
    /// Desired position(s) collected.
    Position,
    /// Tech stack declared.
    TechStack,
    /// Technical questions asked.
    Questions,
}

impl Milestone {
    /// Every milestone in interview order.
    pub const ALL: [Milestone; 7] = [
        Milestone::Name,
        Milestone::Contact,
        Milestone::Location,
        Milestone::Experience,
        Milestone::Position,
        Milestone::TechStack,
        Milestone::Questions,
    ];

    /// Metadata key for this milestone.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Contact => "contact",
            Self::Location => "location",
            Self::Experience => "experience",
            Self::Position => "position",
            Self::TechStack => "tech_stack",
            Self::Questions => "questions",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Milestone completion flags. Every milestone is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressMap {
    flags: BTreeMap<Milestone, bool>,
}

impl ProgressMap {
    /// All milestones pending.
    pub fn new() -> Self {
        Self {
            flags: Milestone::ALL.into_iter().map(|m| (m, false)).collect(),
        }
    }

    /// Whether `milestone` is done.
    pub fn is_done(&self, milestone: Milestone) -> bool {
        self.flags.get(&milestone).copied().unwrap_or(false)
    }

    /// Set `milestone` explicitly.
    pub fn set(&mut self, milestone: Milestone, done: bool) {
        self.flags.insert(milestone, done);
    }

    /// Milestones and their flags in interview order.
    pub fn iter(&self) -> impl Iterator<Item = (Milestone, bool)> + '_ {
        self.flags.iter().map(|(m, done)| (*m, *done))
    }

    /// Number of milestones marked done.
    pub fn completed(&self) -> usize {
        self.flags.values().filter(|done| **done).count()
    }

    /// Overwrite tracked milestones from reply metadata.
    ///
    /// Only known keys mapped to booleans are applied; everything else is
    /// ignored. A `false` does move a finished milestone back to pending, so
    /// the map mirrors what the model last reported.
    ///
    /// Returns the milestones whose value changed.
    pub fn merge(&mut self, metadata: &serde_json::Map<String, Value>) -> Vec<Milestone> {
        let mut changed = Vec::new();
        for (milestone, current) in self.flags.iter_mut() {
            if let Some(Value::Bool(reported)) = metadata.get(milestone.as_str()) {
                if *current != *reported {
                    changed.push(*milestone);
                }
                *current = *reported;
            }
        }
        changed
    }
}

impl Default for ProgressMap {
    fn default() -> Self {
        Self::new()
    }
}
