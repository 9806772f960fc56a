//! Menu catalog. Carts resolve their line items against this table.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    /// Business sequence number, unique across the catalog.
    pub no: i64,
    pub name: String,
    pub category: String,
    pub tier: String,
    pub unit: String,
    pub price: Money,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub no: i64,
    pub name: String,
    pub category: String,
    pub tier: String,
    pub unit: String,
    pub price: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CatalogItem> for ActiveModel {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: ActiveValue::Set(item.id.to_string()),
            no: ActiveValue::Set(item.no),
            name: ActiveValue::Set(item.name.clone()),
            category: ActiveValue::Set(item.category.clone()),
            tier: ActiveValue::Set(item.tier.clone()),
            unit: ActiveValue::Set(item.unit.clone()),
            price: ActiveValue::Set(item.price.units()),
            created_at: ActiveValue::Set(item.created_at),
        }
    }
}

impl TryFrom<Model> for CatalogItem {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "item")?,
            no: model.no,
            name: model.name,
            category: model.category,
            tier: model.tier,
            unit: model.unit,
            price: Money::new(model.price),
            created_at: model.created_at,
        })
    }
}
