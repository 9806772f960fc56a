//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Money, Party, ReserveMethod, SideCosts, SplitMethod};

/// The authenticated caller of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub privileged: bool,
}

impl Actor {
    #[must_use]
    pub fn staff(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            privileged: false,
        }
    }

    #[must_use]
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            privileged: true,
        }
    }
}

/// Append a catalog item to the caller's active cart.
#[derive(Clone, Debug)]
pub struct AddCartItemCmd {
    pub owner_id: String,
    pub item_id: Uuid,
    pub quantity: i64,
    pub unit_price: Money,
}

/// Freeze the caller's active cart into a bill.
#[derive(Clone, Debug)]
pub struct FreezeCartCmd {
    pub owner_id: String,
    pub title: String,
    pub hall: String,
    pub etc: Option<String>,
}

/// Create a catalog item.
#[derive(Clone, Debug)]
pub struct NewItemCmd {
    pub no: i64,
    pub name: String,
    pub category: String,
    pub tier: String,
    pub unit: String,
    pub price: Money,
}

/// Filters for listing bills.
#[derive(Clone, Debug, Default)]
pub struct BillListFilter {
    /// Substring match on the title.
    pub title: Option<String>,
    /// Exact match on the hall.
    pub hall: Option<String>,
    pub owner_id: Option<String>,
}

/// Create a wedding record. Names are given in clear and masked on write.
#[derive(Clone, Debug)]
pub struct NewWeddingCmd {
    pub wedding_at: DateTime<Utc>,
    pub event_at: DateTime<Utc>,
    pub meal_method: SplitMethod,
    pub present_method: SplitMethod,
    pub reserve_method: ReserveMethod,
    pub meal_price: Money,
    pub present_price: Money,
    pub reserve_price: Money,
    pub husband: Party,
    pub bride: Party,
}

/// Partial update of one side of a wedding.
#[derive(Clone, Debug, Default)]
pub struct PartyPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub costs: Option<SideCosts>,
    pub meal_count: Option<i64>,
    pub present_count: Option<i64>,
    pub pre_deposit: Option<Money>,
}

impl PartyPatch {
    pub(crate) fn apply(self, party: &mut Party) {
        if let Some(name) = self.name {
            party.name = name;
        }
        if let Some(image) = self.image {
            party.image = Some(image);
        }
        if let Some(costs) = self.costs {
            party.costs = costs;
        }
        if let Some(count) = self.meal_count {
            party.meal_count = count;
        }
        if let Some(count) = self.present_count {
            party.present_count = count;
        }
        if let Some(deposit) = self.pre_deposit {
            party.pre_deposit = deposit;
        }
    }
}

/// Partial update of a wedding. Names are stored as given, never masked.
#[derive(Clone, Debug, Default)]
pub struct UpdateWeddingCmd {
    pub wedding_at: Option<DateTime<Utc>>,
    pub event_at: Option<DateTime<Utc>>,
    pub meal_method: Option<SplitMethod>,
    pub present_method: Option<SplitMethod>,
    pub reserve_method: Option<ReserveMethod>,
    pub meal_price: Option<Money>,
    pub present_price: Option<Money>,
    pub reserve_price: Option<Money>,
    pub husband: PartyPatch,
    pub bride: PartyPatch,
}
