use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Local mirror of an identity issued by the identity provider.
/// `id` is the provider's uid; the password never reaches this table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Active model with every column set, including the externally issued id.
    pub fn to_insertable(&self) -> ActiveModel {
        ActiveModel {
            id: sea_orm::ActiveValue::Set(self.id.clone()),
            name: sea_orm::ActiveValue::Set(self.name.clone()),
            email: sea_orm::ActiveValue::Set(self.email.clone()),
            role: sea_orm::ActiveValue::Set(self.role.clone()),
        }
    }
}
