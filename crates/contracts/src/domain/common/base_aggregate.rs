use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Base record shared by all aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Unique record identifier
    pub id: Id,
    /// Business code of the record (e.g. "CAT-2025-001")
    pub code: String,
    /// Display name of the record
    pub description: String,
    /// Free-form comment
    pub comment: Option<String>,
    /// Lifecycle metadata
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Create a record with existing metadata (when loading from storage)
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
        }
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
