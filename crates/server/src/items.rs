//! Menu catalog endpoints.

use api_types::{
    PageQuery,
    item::{ItemListResponse, ItemNew, ItemView},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Actor, CatalogItem, Money, NewItemCmd};
use uuid::Uuid;

use crate::{ServerError, parse_cursor, server::ServerState};

fn item_view(item: CatalogItem) -> ItemView {
    ItemView {
        id: item.id,
        no: item.no,
        name: item.name,
        category: item.category,
        tier: item.tier,
        unit: item.unit,
        price: item.price.units(),
        created_at: item.created_at,
    }
}

pub async fn item_new(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<ItemNew>,
) -> Result<(StatusCode, Json<ItemView>), ServerError> {
    let item = state
        .engine
        .new_item(
            NewItemCmd {
                no: payload.no,
                name: payload.name,
                category: payload.category,
                tier: payload.tier,
                unit: payload.unit,
                price: Money::new(payload.price),
            },
            &actor,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item_view(item))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ItemView>, ServerError> {
    let item = state.engine.item(item_id).await?;
    Ok(Json(item_view(item)))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ItemListResponse>, ServerError> {
    let cursor = parse_cursor(query.cursor.as_deref())?;
    let page = state.engine.list_items_page(cursor, query.limit).await?;
    Ok(Json(ItemListResponse {
        items: page.items.into_iter().map(item_view).collect(),
        next_cursor: page.next_cursor,
    }))
}
