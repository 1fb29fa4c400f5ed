//! Activity records and the roster operations on them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// All activities, keyed by their (case-sensitive) name.
///
/// Keeps the order of the data file, so writes never reshuffle it.
pub type Activities = IndexMap<String, Activity>;

/// An extracurricular activity and its roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    /// Advisory only; signups are never checked against it.
    pub max_participants: i64,
    /// Participant emails in signup order.
    pub participants: Vec<String>,
    /// Fields added by hand to the data file, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activity {
    pub fn new(description: &str, schedule: &str, max_participants: i64) -> Self {
        Activity {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Builder-style helper for seeding rosters.
    pub fn with_participants(mut self, emails: &[&str]) -> Self {
        self.participants = emails.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Exact string match, no normalization.
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Append `email` unless it is already present. Returns whether it was added.
    pub fn add_participant(&mut self, email: &str) -> bool {
        if self.has_participant(email) {
            return false;
        }
        self.participants.push(email.to_string());
        true
    }

    /// Remove the first entry equal to `email`, returning its former index.
    pub fn remove_participant(&mut self, email: &str) -> Option<usize> {
        let index = self.participants.iter().position(|p| p == email)?;
        self.participants.remove(index);
        Some(index)
    }
}
