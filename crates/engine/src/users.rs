//! Users table.
//!
//! Users are front-desk staff; `is_admin` marks privileged actors. The API
//! token is issued offline and resolved by the server's auth layer.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub token: String,
    pub is_admin: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            is_admin: model.is_admin,
            created_at: model.created_at,
        }
    }
}

pub(crate) fn new_active(user: &User, token: &str) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::Set(user.id.clone()),
        username: ActiveValue::Set(user.username.clone()),
        token: ActiveValue::Set(token.to_string()),
        is_admin: ActiveValue::Set(user.is_admin),
        created_at: ActiveValue::Set(user.created_at),
    }
}
