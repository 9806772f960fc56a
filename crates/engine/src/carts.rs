//! The `Cart` is a user's editable running order.
//!
//! For a given owner at most one cart is *active* (`completed == false` and
//! `deleted == false`). An active cart is never empty: removing its last line
//! deletes the cart.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, LineItem, ResultEngine, line_items,
    util::parse_uuid,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub owner_id: String,
    pub items: Vec<LineItem>,
    pub completed: bool,
    pub deleted: bool,
    /// Compare-and-swap counter, bumped on every persisted change.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of removing a line from a cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRemoval {
    /// Other lines remain; the cart stays active.
    Remaining,
    /// The removed line was the last one; the cart is now deleted.
    Emptied,
}

impl Cart {
    /// Opens a new active cart holding a single line.
    pub fn new(owner_id: &str, first: LineItem, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            items: vec![first],
            completed: false,
            deleted: false,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.completed && !self.deleted
    }

    pub fn push(&mut self, line: LineItem, now: DateTime<Utc>) {
        self.items.push(line);
        self.updated_at = now;
    }

    /// Removes the line with `line_id`.
    ///
    /// An absent line is an error, whether or not other lines exist.
    pub fn remove_line(&mut self, line_id: Uuid, now: DateTime<Utc>) -> ResultEngine<LineRemoval> {
        let before = self.items.len();
        self.items.retain(|line| line.id != line_id);
        if self.items.len() == before {
            return Err(EngineError::KeyNotFound("line item not exists".to_string()));
        }
        self.updated_at = now;

        if self.items.is_empty() {
            self.deleted = true;
            return Ok(LineRemoval::Emptied);
        }
        Ok(LineRemoval::Remaining)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,
    pub items: Json,
    pub completed: bool,
    pub deleted: bool,
    pub version: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Cart> for ActiveModel {
    type Error = EngineError;

    fn try_from(cart: &Cart) -> ResultEngine<Self> {
        Ok(Self {
            id: ActiveValue::Set(cart.id.to_string()),
            owner_id: ActiveValue::Set(cart.owner_id.clone()),
            items: ActiveValue::Set(line_items::to_json(&cart.items)?),
            completed: ActiveValue::Set(cart.completed),
            deleted: ActiveValue::Set(cart.deleted),
            version: ActiveValue::Set(cart.version),
            created_at: ActiveValue::Set(cart.created_at),
            updated_at: ActiveValue::Set(cart.updated_at),
        })
    }
}

impl TryFrom<Model> for Cart {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "cart")?,
            owner_id: model.owner_id,
            items: line_items::from_json(model.items)?,
            completed: model.completed,
            deleted: model.deleted,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
