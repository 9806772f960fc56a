use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Actor, EngineError, NewWeddingCmd, Page, ResultEngine, UpdateWeddingCmd, WEDDINGS_PAGE_SIZE,
    Wedding, mask_name,
    paging::{before, into_page, page_limit},
    weddings,
};

use super::{Engine, access::require_privileged, with_tx};

impl Engine {
    /// Records a wedding. Both names are masked before they are stored.
    pub async fn new_wedding(&self, cmd: NewWeddingCmd, actor: &Actor) -> ResultEngine<Wedding> {
        require_privileged(actor, "creating a wedding")?;

        let mut husband = cmd.husband;
        let mut bride = cmd.bride;
        husband.name = mask_name(&husband.name)?;
        bride.name = mask_name(&bride.name)?;

        let wedding = Wedding {
            id: Uuid::new_v4(),
            wedding_at: cmd.wedding_at,
            event_at: cmd.event_at,
            meal_method: cmd.meal_method,
            present_method: cmd.present_method,
            reserve_method: cmd.reserve_method,
            meal_price: cmd.meal_price,
            present_price: cmd.present_price,
            reserve_price: cmd.reserve_price,
            husband,
            bride,
            created_at: Utc::now(),
        };
        wedding.validate()?;

        with_tx!(self, |db_tx| {
            weddings::ActiveModel::from(&wedding).insert(&db_tx).await?;
            tracing::info!(wedding_id = %wedding.id, "wedding created");
            Ok(wedding)
        })
    }

    pub async fn wedding(&self, wedding_id: Uuid, actor: &Actor) -> ResultEngine<Wedding> {
        require_privileged(actor, "reading a wedding")?;
        with_tx!(self, |db_tx| self.require_wedding(&db_tx, wedding_id).await)
    }

    /// Applies a partial update. Names are stored as given.
    pub async fn update_wedding(
        &self,
        wedding_id: Uuid,
        cmd: UpdateWeddingCmd,
        actor: &Actor,
    ) -> ResultEngine<Wedding> {
        require_privileged(actor, "updating a wedding")?;

        with_tx!(self, |db_tx| {
            let mut wedding = self.require_wedding(&db_tx, wedding_id).await?;
            if let Some(at) = cmd.wedding_at {
                wedding.wedding_at = at;
            }
            if let Some(at) = cmd.event_at {
                wedding.event_at = at;
            }
            if let Some(method) = cmd.meal_method {
                wedding.meal_method = method;
            }
            if let Some(method) = cmd.present_method {
                wedding.present_method = method;
            }
            if let Some(method) = cmd.reserve_method {
                wedding.reserve_method = method;
            }
            if let Some(price) = cmd.meal_price {
                wedding.meal_price = price;
            }
            if let Some(price) = cmd.present_price {
                wedding.present_price = price;
            }
            if let Some(price) = cmd.reserve_price {
                wedding.reserve_price = price;
            }
            cmd.husband.apply(&mut wedding.husband);
            cmd.bride.apply(&mut wedding.bride);
            wedding.validate()?;

            weddings::ActiveModel::from(&wedding).update(&db_tx).await?;
            tracing::info!(%wedding_id, "wedding updated");
            Ok(wedding)
        })
    }

    pub async fn delete_wedding(&self, wedding_id: Uuid, actor: &Actor) -> ResultEngine<()> {
        require_privileged(actor, "deleting a wedding")?;
        with_tx!(self, |db_tx| {
            let result = weddings::Entity::delete_by_id(wedding_id.to_string())
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("wedding not exists".to_string()));
            }
            tracing::info!(%wedding_id, "wedding deleted");
            Ok(())
        })
    }

    /// Lists weddings newest first, `(created_at DESC, id DESC)`.
    pub async fn list_weddings_page(
        &self,
        actor: &Actor,
        cursor: Option<Uuid>,
        limit: Option<u64>,
    ) -> ResultEngine<Page<Wedding>> {
        require_privileged(actor, "listing weddings")?;
        let limit = page_limit(limit, WEDDINGS_PAGE_SIZE);

        with_tx!(self, |db_tx| {
            let mut query = weddings::Entity::find()
                .order_by_desc(weddings::Column::CreatedAt)
                .order_by_desc(weddings::Column::Id)
                .limit(limit.saturating_add(1));

            if let Some(cursor) = cursor {
                let cursor = weddings::Entity::find_by_id(cursor.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("cursor not exists".to_string()))?;
                query = query.filter(before(
                    weddings::Column::CreatedAt,
                    weddings::Column::Id,
                    cursor.created_at,
                    &cursor.id,
                ));
            }

            let weddings = query
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Wedding::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            Ok(into_page(weddings, limit, |wedding| wedding.id.to_string()))
        })
    }
}
