//! Reserve (deposit) endpoints. Writes are for privileged users only.

use api_types::{bill::BillView, reserve::ReserveNew};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::{Actor, Money};
use uuid::Uuid;

use crate::{ServerError, bills::bill_view, server::ServerState};

pub async fn add(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<ReserveNew>,
) -> Result<Json<BillView>, ServerError> {
    let bill = state
        .engine
        .add_reserve(payload.bill_id, Money::new(payload.reserve), &actor)
        .await?;
    Ok(Json(bill_view(bill)))
}

pub async fn remove(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(bill_id): Path<Uuid>,
) -> Result<Json<BillView>, ServerError> {
    let bill = state.engine.remove_reserve(bill_id, &actor).await?;
    Ok(Json(bill_view(bill)))
}

pub async fn get(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(bill_id): Path<Uuid>,
) -> Result<Json<BillView>, ServerError> {
    let bill = state.engine.reserve(bill_id, &actor).await?;
    Ok(Json(bill_view(bill)))
}
