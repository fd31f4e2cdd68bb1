//! Domain entities: people and parent-child links

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person as shown in the family tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    /// Year of birth, if known
    #[serde(default)]
    pub born: Option<i32>,
    /// Year of death, if known
    #[serde(default)]
    pub died: Option<i32>,
}

impl Person {
    pub fn new(id: u64, given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            id: PersonId(id),
            given_name: given_name.into(),
            family_name: family_name.into(),
            born: None,
            died: None,
        }
    }

    pub fn full_name(&self) -> String {
        if self.family_name.is_empty() {
            self.given_name.clone()
        } else {
            format!("{} {}", self.given_name, self.family_name)
        }
    }

    /// `"1901-1980"`, `"1901-"`, `"-1980"` or `None` when both years are unknown.
    pub fn lifespan(&self) -> Option<String> {
        match (self.born, self.died) {
            (None, None) => None,
            (born, died) => Some(format!(
                "{}-{}",
                born.map(|y| y.to_string()).unwrap_or_default(),
                died.map(|y| y.to_string()).unwrap_or_default()
            )),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lifespan() {
            Some(span) => write!(f, "{} ({})", self.full_name(), span),
            None => write!(f, "{}", self.full_name()),
        }
    }
}

/// Directed parent → child relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub parent: PersonId,
    pub child: PersonId,
}
