//! Bills API endpoints: freeze, list, read, delete and restore.

use api_types::bill::{BillList, BillListResponse, BillNew, BillView};
use api_types::cart::CartView;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Actor, Bill, BillListFilter, FreezeCartCmd};
use uuid::Uuid;

use crate::{
    BillEvent, ServerError,
    cart::{cart_view, line_item_view},
    parse_cursor,
    server::ServerState,
};

pub(crate) fn bill_view(bill: Bill) -> BillView {
    BillView {
        id: bill.id,
        balance_due: bill.balance_due().units(),
        title: bill.title,
        hall: bill.hall,
        etc: bill.etc,
        total_amount: bill.total_amount.units(),
        items: bill.items.into_iter().map(line_item_view).collect(),
        reserve: bill.reserve.units(),
        cart_id: bill.cart_id,
        owner_id: bill.owner_id,
        owner_name: bill.owner_name,
        created_at: bill.created_at,
    }
}

pub async fn freeze(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<BillNew>,
) -> Result<(StatusCode, Json<BillView>), ServerError> {
    let bill = state
        .engine
        .freeze_cart(FreezeCartCmd {
            owner_id: actor.user_id,
            title: payload.title,
            hall: payload.hall,
            etc: payload.etc,
        })
        .await?;

    state.notifier.publish(BillEvent::Created {
        bill_id: bill.id,
        owner_id: bill.owner_id.clone(),
        owner_name: bill.owner_name.clone(),
        title: bill.title.clone(),
        total_amount: bill.total_amount.units(),
    });

    Ok((StatusCode::CREATED, Json(bill_view(bill))))
}

pub async fn list(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Query(query): Query<BillList>,
) -> Result<Json<BillListResponse>, ServerError> {
    let cursor = parse_cursor(query.cursor.as_deref())?;
    let filter = BillListFilter {
        title: query.title,
        hall: query.hall,
        owner_id: query.user_id.filter(|id| !id.is_empty()),
    };

    let page = state
        .engine
        .list_bills_page(&actor, &filter, cursor, query.limit)
        .await?;
    Ok(Json(BillListResponse {
        bills: page.items.into_iter().map(bill_view).collect(),
        next_cursor: page.next_cursor,
    }))
}

pub async fn get(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(bill_id): Path<Uuid>,
) -> Result<Json<BillView>, ServerError> {
    let bill = state.engine.bill(bill_id, &actor).await?;
    Ok(Json(bill_view(bill)))
}

pub async fn delete(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(bill_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_bill(bill_id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Turns the bill back into the owner's active cart.
pub async fn restore(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(bill_id): Path<Uuid>,
) -> Result<Json<CartView>, ServerError> {
    let cart = state.engine.restore_bill(bill_id, &actor).await?;
    Ok(Json(cart_view(cart)?))
}
