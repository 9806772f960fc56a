//! Cart API endpoints.

use api_types::cart::{CartItemNew, CartView, LineItemView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine::{Actor, AddCartItemCmd, Cart, LineItem, Money};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn line_item_view(line: LineItem) -> LineItemView {
    LineItemView {
        id: line.id,
        item_id: line.item_id,
        name: line.name,
        category: line.category,
        tier: line.tier,
        unit: line.unit,
        unit_price: line.unit_price.units(),
        quantity: line.quantity,
        amount: line.amount.units(),
    }
}

pub(crate) fn cart_view(cart: Cart) -> Result<CartView, ServerError> {
    let total_amount = engine::total_amount(&cart.items)?;
    Ok(CartView {
        id: cart.id,
        items: cart.items.into_iter().map(line_item_view).collect(),
        total_amount: total_amount.units(),
        created_at: cart.created_at,
        updated_at: cart.updated_at,
    })
}

pub async fn add_item(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<CartItemNew>,
) -> Result<Json<CartView>, ServerError> {
    let cart = state
        .engine
        .add_cart_item(AddCartItemCmd {
            owner_id: actor.user_id,
            item_id: payload.item_id,
            quantity: payload.count,
            unit_price: Money::new(payload.price),
        })
        .await?;
    Ok(Json(cart_view(cart)?))
}

pub async fn get(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<CartView>, ServerError> {
    let cart = state.engine.active_cart(&actor.user_id).await?;
    Ok(Json(cart_view(cart)?))
}

pub async fn clear(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.engine.clear_cart(&actor.user_id).await?;
    Ok(StatusCode::OK)
}

/// Removes one line. Answers `204` when that emptied and deleted the cart.
pub async fn remove_item(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(line_item_id): Path<Uuid>,
) -> Result<Response, ServerError> {
    match state
        .engine
        .remove_cart_item(&actor.user_id, line_item_id)
        .await?
    {
        Some(cart) => Ok(Json(cart_view(cart)?).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
