use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::Currency;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
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

impl AggregateId for TransactionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TransactionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A single money movement inside one table.
///
/// `base.description` carries the free-form transaction description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub base: BaseAggregate<TransactionId>,

    #[serde(rename = "amount")]
    pub amount: f64,

    #[serde(rename = "currency")]
    pub currency: Currency,

    /// Transaction date (not the record creation date)
    #[serde(rename = "date")]
    pub date: NaiveDate,

    /// Owning table id
    #[serde(rename = "tableId")]
    pub table_id: String,

    /// Assigned category id, if any
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

impl AggregateRoot for Transaction {
    type Id = TransactionId;

    fn id(&self) -> TransactionId {
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
        "a003"
    }

    fn collection_name() -> &'static str {
        "transactions"
    }

    fn element_name() -> &'static str {
        "Транзакція"
    }

    fn list_name() -> &'static str {
        "Транзакції"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let tx = Transaction {
            base: BaseAggregate::new(
                TransactionId::new_v4(),
                "TRX-001".to_string(),
                "Обід".to_string(),
            ),
            amount: 250.50,
            currency: Currency::UAH,
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            table_id: "t1".to_string(),
            category_id: Some("c1".to_string()),
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["currency"], "UAH");
        assert_eq!(json["tableId"], "t1");
        assert_eq!(json["categoryId"], "c1");
        assert_eq!(json["date"], "2025-03-15");
    }
}
