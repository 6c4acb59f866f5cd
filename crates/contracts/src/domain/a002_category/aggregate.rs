use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
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

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A spending category.
///
/// Categories form a two-level hierarchy: root categories have no parent,
/// subcategories reference their parent category's id. `base.description`
/// carries the category name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub base: BaseAggregate<CategoryId>,

    /// Parent category id; `None` for root categories
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, code: String, name: String, parent_id: Option<String>) -> Self {
        Self {
            base: BaseAggregate::new(id, code, name),
            parent_id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Display path "Батьківська → Дочірня" resolved against a
    /// id -> name lookup of all known categories.
    pub fn full_path(&self, names: &HashMap<String, String>) -> String {
        match self
            .parent_id
            .as_ref()
            .and_then(|pid| names.get(pid.as_str()))
        {
            Some(parent_name) => format!("{} → {}", parent_name, self.base.description),
            None => self.base.description.clone(),
        }
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
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
        "a002"
    }

    fn collection_name() -> &'static str {
        "categories"
    }

    fn element_name() -> &'static str {
        "Категорія"
    }

    fn list_name() -> &'static str {
        "Категорії"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, parent_id: Option<&str>) -> Category {
        Category::new(
            CategoryId::new_v4(),
            format!("CAT-{}", name),
            name.to_string(),
            parent_id.map(str::to_string),
        )
    }

    #[test]
    fn root_detection() {
        assert!(category("Їжа", None).is_root());
        assert!(!category("Кафе", Some("some-id")).is_root());
    }

    #[test]
    fn full_path_resolves_parent_name() {
        let food = category("Їжа", None);
        let food_id = food.id().as_string();
        let cafe = category("Кафе", Some(food_id.as_str()));

        let names: HashMap<String, String> =
            HashMap::from([(food_id, "Їжа".to_string())]);

        assert_eq!(cafe.full_path(&names), "Їжа → Кафе");
        assert_eq!(food.full_path(&names), "Їжа");
    }

    #[test]
    fn full_path_with_unknown_parent_falls_back_to_own_name() {
        let cafe = category("Кафе", Some("missing"));
        assert_eq!(cafe.full_path(&HashMap::new()), "Кафе");
    }
}
