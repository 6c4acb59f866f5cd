use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub Uuid);

impl TableId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for TableId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TableId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A user-owned table grouping transactions.
///
/// `base.description` carries the table title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    #[serde(flatten)]
    pub base: BaseAggregate<TableId>,

    /// Owning user id
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Accent color in HEX form (#RRGGBB)
    #[serde(rename = "color", default = "Table::default_color")]
    pub color: String,
}

impl Table {
    pub fn new(id: TableId, code: String, title: String, user_id: String) -> Self {
        Self {
            base: BaseAggregate::new(id, code, title),
            user_id,
            color: Self::default_color(),
        }
    }

    fn default_color() -> String {
        "#3B82F6".to_string()
    }
}

impl AggregateRoot for Table {
    type Id = TableId;

    fn id(&self) -> TableId {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "tables"
    }

    fn element_name() -> &'static str {
        "Таблиця"
    }

    fn list_name() -> &'static str {
        "Таблиці"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        let id = TableId::new_v4();
        let parsed = TableId::from_string(&id.as_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_garbage() {
        assert!(TableId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn new_table_gets_default_color() {
        let t = Table::new(
            TableId::new_v4(),
            "TBL-001".to_string(),
            "Бюджет".to_string(),
            "user@example.com".to_string(),
        );
        assert_eq!(t.color, "#3B82F6");
        assert_eq!(t.description(), "Бюджет");
    }
}
