use serde::{Deserialize, Serialize};

use crate::model::ids::{SubjectId, TopicId};

/// Wire shape for catalog entries.
///
/// Older backends send bare strings, newer ones send `{ id, name }` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Named { id: String, name: String },
    Bare(String),
}

impl CatalogEntry {
    fn into_parts(self) -> (String, String) {
        match self {
            CatalogEntry::Named { id, name } => (id, name),
            CatalogEntry::Bare(value) => (value.clone(), value),
        }
    }
}

/// A subject the backend offers for a given user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CatalogEntry")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}

impl Subject {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: SubjectId::new(id),
            name: name.into(),
        }
    }
}

impl From<CatalogEntry> for Subject {
    fn from(entry: CatalogEntry) -> Self {
        let (id, name) = entry.into_parts();
        Self::new(id, name)
    }
}

/// A topic the backend offers for a given user and subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CatalogEntry")]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
}

impl Topic {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TopicId::new(id),
            name: name.into(),
        }
    }
}

impl From<CatalogEntry> for Topic {
    fn from(entry: CatalogEntry) -> Self {
        let (id, name) = entry.into_parts();
        Self::new(id, name)
    }
}
