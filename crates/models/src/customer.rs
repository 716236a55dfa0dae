use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored customer record. `PartialEq` is whole-record structural equality,
/// which the update validation leans on; `Clone` yields the independent
/// baseline/draft copies it compares.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Registration input. Carries no id: the store assigns one on insert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Partial edit input; absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Edit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_record_equality() {
        let a = Model { id: 1, name: "Alex".into(), email: "alex@x.com".into(), age: 22 };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.age = 23;
        assert_ne!(a, b);
        // the clone is independent of the original
        assert_eq!(a.age, 22);
    }

    #[test]
    fn edit_deserializes_with_missing_fields() {
        let edit: Edit = serde_json::from_str(r#"{"name":"Alex"}"#).unwrap();
        assert_eq!(edit.name.as_deref(), Some("Alex"));
        assert!(edit.email.is_none());
        assert!(edit.age.is_none());
    }
}
