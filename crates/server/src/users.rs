//! User listing. Accounts and tokens are created offline by the admin CLI.

use api_types::{
    PageQuery,
    user::{UserListResponse, UserView},
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use engine::{Actor, User};

use crate::{ServerError, server::ServerState};

fn user_view(user: User) -> UserView {
    UserView {
        id: user.id,
        username: user.username,
        is_admin: user.is_admin,
        created_at: user.created_at,
    }
}

pub async fn list(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<UserListResponse>, ServerError> {
    let cursor = query.cursor.as_deref().filter(|c| !c.is_empty());
    let page = state
        .engine
        .list_users_page(&actor, cursor, query.limit)
        .await?;
    Ok(Json(UserListResponse {
        users: page.items.into_iter().map(user_view).collect(),
        next_cursor: page.next_cursor,
    }))
}
