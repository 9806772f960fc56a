use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use uuid::Uuid;

use serde::Serialize;
pub use notify::{BillEvent, Notifier};
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod bills;
mod cart;
mod items;
mod notify;
mod reserve;
mod server;
mod users;
mod weddings;

pub mod types {
    pub mod cart {
        pub use api_types::cart::{CartItemNew, CartView, LineItemView};
    }

    pub mod bill {
        pub use api_types::bill::{BillList, BillListResponse, BillNew, BillView};
        pub use api_types::reserve::ReserveNew;
    }

    pub mod item {
        pub use api_types::item::{ItemListResponse, ItemNew, ItemView};
    }

    pub mod user {
        pub use api_types::user::{UserListResponse, UserView};
    }

    pub mod wedding {
        pub use api_types::wedding::{
            PartyBody, PartyUpdate, ReserveMethod, SettlementView, SharesView, SideCostsBody,
            SplitMethod, WeddingDetailResponse, WeddingListResponse, WeddingNew, WeddingUpdate,
            WeddingView,
        };
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) | EngineError::NothingToRemove(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) | EngineError::StaleWrite(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_) | EngineError::InvalidInput(_) | EngineError::InvalidId(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Parses a "load more" cursor. A malformed cursor can never match a record.
pub(crate) fn parse_cursor(cursor: Option<&str>) -> Result<Option<Uuid>, ServerError> {
    cursor
        .filter(|c| !c.is_empty())
        .map(|c| Uuid::parse_str(c).map_err(|_| ServerError::Generic("invalid cursor".to_string())))
        .transpose()
}
