use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query string shared by every "load more" list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// Id of the last record of the previous page.
    pub cursor: Option<String>,
    pub limit: Option<u64>,
}

pub mod cart {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CartItemNew {
        pub item_id: Uuid,
        pub count: i64,
        /// Unit price in whole currency units.
        pub price: i64,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LineItemView {
        pub id: Uuid,
        pub item_id: Uuid,
        pub name: String,
        pub category: String,
        pub tier: String,
        pub unit: String,
        pub unit_price: i64,
        pub quantity: i64,
        pub amount: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CartView {
        pub id: Uuid,
        pub items: Vec<LineItemView>,
        /// Sum of the line amounts.
        pub total_amount: i64,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod bill {
    use super::*;
    use crate::cart::LineItemView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BillNew {
        pub title: String,
        pub hall: String,
        pub etc: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BillList {
        /// Substring of the title.
        pub title: Option<String>,
        pub hall: Option<String>,
        pub user_id: Option<String>,
        pub cursor: Option<String>,
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BillView {
        pub id: Uuid,
        pub title: String,
        pub hall: String,
        pub etc: Option<String>,
        pub total_amount: i64,
        pub items: Vec<LineItemView>,
        /// Deposit, `0` when none.
        pub reserve: i64,
        pub balance_due: i64,
        pub cart_id: Uuid,
        pub owner_id: String,
        pub owner_name: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BillListResponse {
        pub bills: Vec<BillView>,
        pub next_cursor: Option<String>,
    }
}

pub mod reserve {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReserveNew {
        pub bill_id: Uuid,
        pub reserve: i64,
    }
}

pub mod item {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemNew {
        pub no: i64,
        pub name: String,
        pub category: String,
        pub tier: String,
        pub unit: String,
        pub price: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemView {
        pub id: Uuid,
        pub no: i64,
        pub name: String,
        pub category: String,
        pub tier: String,
        pub unit: String,
        pub price: i64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemListResponse {
        pub items: Vec<ItemView>,
        pub next_cursor: Option<String>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub username: String,
        pub is_admin: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserListResponse {
        pub users: Vec<UserView>,
        pub next_cursor: Option<String>,
    }
}

pub mod wedding {
    use super::*;

    /// How meals and return presents are divided between the two sides.
    ///
    /// Unknown strings are rejected at deserialization.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitMethod {
        #[default]
        Half,
        Husband,
        Bride,
        Privacy,
    }

    /// How the venue reserve is divided. There is no `privacy` variant.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ReserveMethod {
        #[default]
        Half,
        Husband,
        Bride,
    }

    /// Per-side cost categories, whole currency units.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct SideCostsBody {
        pub hall_rental: i64,
        pub sword_rental: i64,
        pub bouquet: i64,
        pub operator_fee: i64,
        pub grooming_female: i64,
        pub grooming_male: i64,
        pub frame: i64,
        pub raw_file: i64,
        pub video: i64,
        pub misc: i64,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PartyBody {
        pub name: String,
        #[serde(default)]
        pub image: Option<String>,
        #[serde(default)]
        pub costs: SideCostsBody,
        #[serde(default)]
        pub meal_count: i64,
        #[serde(default)]
        pub present_count: i64,
        #[serde(default)]
        pub pre_deposit: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeddingNew {
        pub wedding_at: DateTime<Utc>,
        pub event_at: DateTime<Utc>,
        #[serde(default)]
        pub meal_method: SplitMethod,
        #[serde(default)]
        pub present_method: SplitMethod,
        #[serde(default)]
        pub reserve_method: ReserveMethod,
        #[serde(default)]
        pub meal_price: i64,
        #[serde(default)]
        pub present_price: i64,
        #[serde(default)]
        pub reserve_price: i64,
        pub husband: PartyBody,
        pub bride: PartyBody,
    }

    /// Partial update of one side; absent fields are kept.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PartyUpdate {
        pub name: Option<String>,
        pub image: Option<String>,
        pub costs: Option<SideCostsBody>,
        pub meal_count: Option<i64>,
        pub present_count: Option<i64>,
        pub pre_deposit: Option<i64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WeddingUpdate {
        pub wedding_at: Option<DateTime<Utc>>,
        pub event_at: Option<DateTime<Utc>>,
        pub meal_method: Option<SplitMethod>,
        pub present_method: Option<SplitMethod>,
        pub reserve_method: Option<ReserveMethod>,
        pub meal_price: Option<i64>,
        pub present_price: Option<i64>,
        pub reserve_price: Option<i64>,
        #[serde(default)]
        pub husband: PartyUpdate,
        #[serde(default)]
        pub bride: PartyUpdate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeddingView {
        pub id: Uuid,
        pub wedding_at: DateTime<Utc>,
        pub event_at: DateTime<Utc>,
        pub meal_method: SplitMethod,
        pub present_method: SplitMethod,
        pub reserve_method: ReserveMethod,
        pub meal_price: i64,
        pub present_price: i64,
        pub reserve_price: i64,
        pub husband: PartyBody,
        pub bride: PartyBody,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SharesView {
        pub husband: i64,
        pub bride: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub fixed: SharesView,
        pub all_meal_cost: i64,
        pub meal: SharesView,
        pub all_present_cost: i64,
        pub present: SharesView,
        pub reserve: SharesView,
        pub all_cost: i64,
        pub all_payment: i64,
        pub husband_payment: i64,
        pub bride_payment: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeddingDetailResponse {
        pub wedding: WeddingView,
        pub settlement: SettlementView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeddingListResponse {
        pub weddings: Vec<WeddingView>,
        pub next_cursor: Option<String>,
    }
}
