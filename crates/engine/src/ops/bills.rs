use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Actor, Bill, BillListFilter, Cart, EngineError, FreezeCartCmd, Page, ResultEngine,
    BILLS_PAGE_SIZE, bills, carts,
    paging::{before, into_page, page_limit},
    util::{normalize_optional_text, normalize_required_text},
};

use super::{
    Engine,
    access::require_owner_or_privileged,
    with_tx,
};

impl Engine {
    /// Freezes the owner's active cart into a bill.
    ///
    /// The bill copies the cart lines and their total; the cart is marked
    /// completed. Both writes commit together or not at all.
    pub async fn freeze_cart(&self, cmd: FreezeCartCmd) -> ResultEngine<Bill> {
        let title = normalize_required_text(&cmd.title, "title")?;
        let hall = normalize_required_text(&cmd.hall, "hall")?;
        let etc = normalize_optional_text(cmd.etc.as_deref());

        with_tx!(self, |db_tx| {
            let owner = self.require_user(&db_tx, &cmd.owner_id).await?;
            let mut cart = self
                .find_active_cart(&db_tx, &cmd.owner_id)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("empty cart".to_string()))?;

            let now = Utc::now();
            let bill = Bill::freeze(&cart, title, hall, etc, owner.username, now)?;
            bills::ActiveModel::try_from(&bill)?.insert(&db_tx).await?;

            cart.completed = true;
            cart.updated_at = now;
            self.save_cart(&db_tx, cart).await?;

            tracing::info!(
                bill_id = %bill.id,
                cart_id = %bill.cart_id,
                owner_id = %bill.owner_id,
                total = %bill.total_amount,
                "cart frozen into bill"
            );
            Ok(bill)
        })
    }

    /// Returns a bill to its owner or a privileged user.
    pub async fn bill(&self, bill_id: Uuid, actor: &Actor) -> ResultEngine<Bill> {
        with_tx!(self, |db_tx| {
            let bill = self.require_bill(&db_tx, bill_id).await?;
            require_owner_or_privileged(actor, &bill.owner_id)?;
            Ok(bill)
        })
    }

    /// Deletes a bill permanently. The frozen cart is left completed.
    pub async fn delete_bill(&self, bill_id: Uuid, actor: &Actor) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let bill = self.require_bill(&db_tx, bill_id).await?;
            require_owner_or_privileged(actor, &bill.owner_id)?;
            bills::Entity::delete_by_id(bill.id.to_string())
                .exec(&db_tx)
                .await?;
            tracing::info!(%bill_id, by = %actor.user_id, "bill deleted");
            Ok(())
        })
    }

    /// Reverses a freeze: deletes the bill and reactivates its cart.
    ///
    /// Only the owner may restore. Any reserve on the bill is discarded.
    pub async fn restore_bill(&self, bill_id: Uuid, actor: &Actor) -> ResultEngine<Cart> {
        with_tx!(self, |db_tx| {
            let bill = self.require_bill(&db_tx, bill_id).await?;
            if actor.user_id != bill.owner_id {
                return Err(EngineError::Forbidden(
                    "only the owner can restore a bill".to_string(),
                ));
            }

            let mut cart = carts::Entity::find_by_id(bill.cart_id.to_string())
                .one(&db_tx)
                .await?
                .map(Cart::try_from)
                .transpose()?
                .filter(|cart| !cart.deleted)
                .ok_or_else(|| EngineError::KeyNotFound("cart not exists".to_string()))?;

            if self.find_active_cart(&db_tx, &bill.owner_id).await?.is_some() {
                return Err(EngineError::ExistingKey("active cart".to_string()));
            }

            cart.completed = false;
            cart.updated_at = Utc::now();
            let cart = self.save_cart(&db_tx, cart).await?;
            bills::Entity::delete_by_id(bill.id.to_string())
                .exec(&db_tx)
                .await?;

            tracing::info!(%bill_id, cart_id = %cart.id, "bill restored to cart");
            Ok(cart)
        })
    }

    /// Lists bills newest first, `(created_at DESC, id DESC)`.
    ///
    /// Non-privileged users only see their own bills.
    pub async fn list_bills_page(
        &self,
        actor: &Actor,
        filter: &BillListFilter,
        cursor: Option<Uuid>,
        limit: Option<u64>,
    ) -> ResultEngine<Page<Bill>> {
        let owner_id = match (&filter.owner_id, actor.privileged) {
            (Some(owner_id), false) if *owner_id != actor.user_id => {
                return Err(EngineError::Forbidden(
                    "cannot list other users' bills".to_string(),
                ));
            }
            (owner_id, true) => owner_id.clone(),
            (_, false) => Some(actor.user_id.clone()),
        };
        let limit = page_limit(limit, BILLS_PAGE_SIZE);

        with_tx!(self, |db_tx| {
            let mut query = bills::Entity::find()
                .order_by_desc(bills::Column::CreatedAt)
                .order_by_desc(bills::Column::Id)
                .limit(limit.saturating_add(1));

            if let Some(cursor) = cursor {
                let cursor = bills::Entity::find_by_id(cursor.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("cursor not exists".to_string()))?;
                query = query.filter(before(
                    bills::Column::CreatedAt,
                    bills::Column::Id,
                    cursor.created_at,
                    &cursor.id,
                ));
            }
            if let Some(owner_id) = &owner_id {
                query = query.filter(bills::Column::OwnerId.eq(owner_id.clone()));
            }
            if let Some(title) = filter.title.as_deref().filter(|t| !t.is_empty()) {
                query = query.filter(bills::Column::Title.contains(title));
            }
            if let Some(hall) = filter.hall.as_deref().filter(|h| !h.is_empty()) {
                query = query.filter(bills::Column::Hall.eq(hall));
            }

            let rows = query.all(&db_tx).await?;
            let bills = rows
                .into_iter()
                .map(Bill::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            Ok(into_page(bills, limit, |bill| bill.id.to_string()))
        })
    }
}
