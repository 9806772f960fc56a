use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Actor, CatalogItem, EngineError, ITEMS_PAGE_SIZE, NewItemCmd, Page, ResultEngine, items,
    paging::{before, into_page, page_limit},
    util::{map_unique_violation, normalize_required_text},
};

use super::{Engine, access::require_privileged, with_tx};

impl Engine {
    /// Adds an item to the menu catalog. `no` must be unique.
    pub async fn new_item(&self, cmd: NewItemCmd, actor: &Actor) -> ResultEngine<CatalogItem> {
        require_privileged(actor, "creating an item")?;
        if cmd.price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "price must not be negative".to_string(),
            ));
        }

        let item = CatalogItem {
            id: Uuid::new_v4(),
            no: cmd.no,
            name: normalize_required_text(&cmd.name, "name")?,
            category: normalize_required_text(&cmd.category, "category")?,
            tier: normalize_required_text(&cmd.tier, "tier")?,
            unit: normalize_required_text(&cmd.unit, "unit")?,
            price: cmd.price,
            created_at: Utc::now(),
        };

        with_tx!(self, |db_tx| {
            items::ActiveModel::from(&item)
                .insert(&db_tx)
                .await
                .map_err(|err| map_unique_violation(err, format!("item no {}", item.no)))?;
            tracing::info!(item_id = %item.id, no = item.no, "catalog item created");
            Ok(item)
        })
    }

    /// Resolves a catalog item.
    pub async fn item(&self, item_id: Uuid) -> ResultEngine<CatalogItem> {
        with_tx!(self, |db_tx| self.require_item(&db_tx, item_id).await)
    }

    /// Lists the catalog by business number, `(no DESC, id DESC)`.
    pub async fn list_items_page(
        &self,
        cursor: Option<Uuid>,
        limit: Option<u64>,
    ) -> ResultEngine<Page<CatalogItem>> {
        let limit = page_limit(limit, ITEMS_PAGE_SIZE);

        with_tx!(self, |db_tx| {
            let mut query = items::Entity::find()
                .order_by_desc(items::Column::No)
                .order_by_desc(items::Column::Id)
                .limit(limit.saturating_add(1));

            if let Some(cursor) = cursor {
                let cursor = items::Entity::find_by_id(cursor.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("cursor not exists".to_string()))?;
                query = query.filter(before(
                    items::Column::No,
                    items::Column::Id,
                    cursor.no,
                    &cursor.id,
                ));
            }

            let items = query
                .all(&db_tx)
                .await?
                .into_iter()
                .map(CatalogItem::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            Ok(into_page(items, limit, |item| item.id.to_string()))
        })
    }
}
