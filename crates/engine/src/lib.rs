//! Banquet billing engine.
//!
//! The engine owns the order lifecycle of an event venue (cart → bill →
//! reserve → restore), the menu catalog, staff users, and the wedding expense
//! records with their cost-splitting settlement. All persistence goes through
//! `sea-orm`; every multi-write use case runs in one DB transaction.

pub use bills::Bill;
pub use carts::{Cart, LineRemoval};
pub use commands::{
    Actor, AddCartItemCmd, BillListFilter, FreezeCartCmd, NewItemCmd, NewWeddingCmd, PartyPatch,
    UpdateWeddingCmd,
};
pub use error::EngineError;
pub use items::CatalogItem;
pub use line_items::{LineItem, total_amount};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use paging::{BILLS_PAGE_SIZE, ITEMS_PAGE_SIZE, Page, USERS_PAGE_SIZE, WEDDINGS_PAGE_SIZE};
pub use split::{ReserveMethod, Settlement, Shares, SplitMethod, split_headcount, split_reserve};
pub use users::User;
pub use weddings::{Party, SideCosts, Wedding, mask_name};

mod bills;
mod carts;
mod commands;
mod error;
mod items;
mod line_items;
mod money;
mod ops;
mod paging;
mod split;
mod users;
mod util;
mod weddings;

type ResultEngine<T> = Result<T, EngineError>;
