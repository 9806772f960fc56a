//! Line items embedded in carts and bills.
//!
//! A `LineItem` is a value: it is copied into a bill when the cart is frozen
//! and never re-read from the catalog afterwards.

use sea_orm::prelude::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, items::CatalogItem};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub item_id: Uuid,
    pub name: String,
    pub category: String,
    pub tier: String,
    pub unit: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub amount: Money,
}

impl LineItem {
    /// Builds a line from a resolved catalog entry.
    ///
    /// `amount` is fixed here as `unit_price * quantity` and never recomputed.
    pub fn new(item: &CatalogItem, quantity: i64, unit_price: Money) -> ResultEngine<Self> {
        if quantity <= 0 {
            return Err(EngineError::InvalidAmount(
                "quantity must be > 0".to_string(),
            ));
        }
        if unit_price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "unit price must be >= 0".to_string(),
            ));
        }
        let amount = unit_price
            .checked_mul(quantity)
            .ok_or_else(|| EngineError::InvalidAmount("line amount too large".to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            item_id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            tier: item.tier.clone(),
            unit: item.unit.clone(),
            unit_price,
            quantity,
            amount,
        })
    }
}

/// Sum of the stored line amounts.
pub fn total_amount(items: &[LineItem]) -> ResultEngine<Money> {
    items.iter().try_fold(Money::ZERO, |acc, line| {
        acc.checked_add(line.amount)
            .ok_or_else(|| EngineError::InvalidAmount("total amount too large".to_string()))
    })
}

pub(crate) fn to_json(items: &[LineItem]) -> ResultEngine<Json> {
    serde_json::to_value(items)
        .map_err(|err| EngineError::InvalidInput(format!("unserializable line items: {err}")))
}

pub(crate) fn from_json(value: Json) -> ResultEngine<Vec<LineItem>> {
    serde_json::from_value(value)
        .map_err(|err| EngineError::InvalidInput(format!("corrupt line items: {err}")))
}
