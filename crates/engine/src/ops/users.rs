use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Actor, EngineError, Page, ResultEngine, USERS_PAGE_SIZE, User,
    paging::{before, into_page, page_limit},
    users,
    util::{map_unique_violation, normalize_required_text},
};

use super::{Engine, access::require_privileged, with_tx};

/// Two v4 uuids (244 random bits), URL-safe base64.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
    URL_SAFE_NO_PAD.encode(bytes)
}

impl Engine {
    /// Registers a user and issues its API token.
    ///
    /// The token is returned only here; it is not readable afterwards.
    pub async fn new_user(&self, username: &str, is_admin: bool) -> ResultEngine<(User, String)> {
        let username = normalize_required_text(username, "username")?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            is_admin,
            created_at: Utc::now(),
        };
        let token = generate_token();

        with_tx!(self, |db_tx| {
            users::new_active(&user, &token)
                .insert(&db_tx)
                .await
                .map_err(|err| map_unique_violation(err, user.username.clone()))?;
            tracing::info!(user_id = %user.id, username = %user.username, is_admin, "user created");
            Ok((user, token))
        })
    }

    /// Resolves a bearer token to its user, if any.
    pub async fn user_by_token(&self, token: &str) -> ResultEngine<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Token.eq(token))
            .one(&self.database)
            .await?;
        Ok(user.map(User::from))
    }

    /// Lists users newest first, `(created_at DESC, id DESC)`.
    pub async fn list_users_page(
        &self,
        actor: &Actor,
        cursor: Option<&str>,
        limit: Option<u64>,
    ) -> ResultEngine<Page<User>> {
        require_privileged(actor, "listing users")?;
        let limit = page_limit(limit, USERS_PAGE_SIZE);

        with_tx!(self, |db_tx| {
            let mut query = users::Entity::find()
                .order_by_desc(users::Column::CreatedAt)
                .order_by_desc(users::Column::Id)
                .limit(limit.saturating_add(1));

            if let Some(cursor) = cursor {
                let cursor = users::Entity::find_by_id(cursor.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("cursor not exists".to_string()))?;
                query = query.filter(before(
                    users::Column::CreatedAt,
                    users::Column::Id,
                    cursor.created_at,
                    &cursor.id,
                ));
            }

            let users = query
                .all(&db_tx)
                .await?
                .into_iter()
                .map(User::from)
                .collect::<Vec<_>>();
            Ok(into_page(users, limit, |user| user.id.clone()))
        })
    }
}
