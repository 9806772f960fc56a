//! Bills: immutable invoices frozen from a cart.
//!
//! A bill copies the cart's lines by value and fixes `total_amount` at
//! creation. The only field that changes afterwards is `reserve`, the
//! deposit layered on top of the bill.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Cart, EngineError, LineItem, Money, ResultEngine, line_items, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub title: String,
    pub hall: String,
    pub etc: Option<String>,
    pub total_amount: Money,
    pub items: Vec<LineItem>,
    /// Deposit; zero means "no deposit".
    pub reserve: Money,
    pub cart_id: Uuid,
    pub owner_id: String,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Snapshots `cart` into a new bill.
    pub fn freeze(
        cart: &Cart,
        title: String,
        hall: String,
        etc: Option<String>,
        owner_name: String,
        now: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !cart.is_active() {
            return Err(EngineError::KeyNotFound("cart not exists".to_string()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            hall,
            etc,
            total_amount: line_items::total_amount(&cart.items)?,
            items: cart.items.clone(),
            reserve: Money::ZERO,
            cart_id: cart.id,
            owner_id: cart.owner_id.clone(),
            owner_name,
            created_at: now,
        })
    }

    pub fn has_reserve(&self) -> bool {
        !self.reserve.is_zero()
    }

    /// Amount still due once the deposit is taken into account.
    pub fn balance_due(&self) -> Money {
        self.total_amount - self.reserve
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub hall: String,
    pub etc: Option<String>,
    pub total_amount: i64,
    pub items: Json,
    pub reserve: Option<i64>,
    pub cart_id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::carts::Entity",
        from = "Column::CartId",
        to = "super::carts::Column::Id"
    )]
    Cart,
}

impl Related<super::carts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Bill> for ActiveModel {
    type Error = EngineError;

    fn try_from(bill: &Bill) -> ResultEngine<Self> {
        Ok(Self {
            id: ActiveValue::Set(bill.id.to_string()),
            title: ActiveValue::Set(bill.title.clone()),
            hall: ActiveValue::Set(bill.hall.clone()),
            etc: ActiveValue::Set(bill.etc.clone()),
            total_amount: ActiveValue::Set(bill.total_amount.units()),
            items: ActiveValue::Set(line_items::to_json(&bill.items)?),
            reserve: ActiveValue::Set(Some(bill.reserve.units())),
            cart_id: ActiveValue::Set(bill.cart_id.to_string()),
            owner_id: ActiveValue::Set(bill.owner_id.clone()),
            owner_name: ActiveValue::Set(bill.owner_name.clone()),
            created_at: ActiveValue::Set(bill.created_at),
        })
    }
}

impl TryFrom<Model> for Bill {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "bill")?,
            title: model.title,
            hall: model.hall,
            etc: model.etc,
            total_amount: Money::new(model.total_amount),
            items: line_items::from_json(model.items)?,
            // Rows written before reserves existed carry NULL.
            reserve: Money::new(model.reserve.unwrap_or_default()),
            cart_id: parse_uuid(&model.cart_id, "cart")?,
            owner_id: model.owner_id,
            owner_name: model.owner_name,
            created_at: model.created_at,
        })
    }
}
