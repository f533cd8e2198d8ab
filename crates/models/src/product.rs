use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product. Missing JSON fields decode to their zero value so partial
/// bodies are accepted the same way on create and update.
#[derive(Clone, Debug, PartialEq, Default, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: f64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Active model carrying every mutable column; the id is left to the store.
    pub fn to_active_fields(&self) -> ActiveModel {
        ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: sea_orm::ActiveValue::Set(self.name.clone()),
            price: sea_orm::ActiveValue::Set(self.price),
            description: sea_orm::ActiveValue::Set(self.description.clone()),
            category: sea_orm::ActiveValue::Set(self.category.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_body_fills_defaults() {
        let p: Model = serde_json::from_str(r#"{"name":"Error Product","price":19.99}"#).unwrap();
        assert_eq!(p.id, 0);
        assert_eq!(p.name, "Error Product");
        assert_eq!(p.description, "");
        assert_eq!(p.category, "");
    }

    #[test]
    fn serializes_public_field_names() {
        let p = Model { id: 3, name: "Widget".into(), price: 9.99, description: "d".into(), category: "c".into() };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v, serde_json::json!({"id":3,"name":"Widget","price":9.99,"description":"d","category":"c"}));
    }

    #[test]
    fn active_fields_leave_id_unset() {
        let p = Model { id: 42, name: "n".into(), price: 1.0, description: String::new(), category: String::new() };
        let am = p.to_active_fields();
        assert!(am.id.is_not_set());
        assert_eq!(am.name, sea_orm::ActiveValue::Set("n".to_string()));
    }
}
