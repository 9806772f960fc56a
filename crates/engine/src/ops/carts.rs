use chrono::Utc;
use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    AddCartItemCmd, Cart, LineItem, LineRemoval, ResultEngine, carts, util::map_unique_violation,
};

use super::{Engine, with_tx};

impl Engine {
    /// Appends a catalog item to the owner's active cart, opening one if
    /// none exists.
    pub async fn add_cart_item(&self, cmd: AddCartItemCmd) -> ResultEngine<Cart> {
        tracing::debug!(owner_id = %cmd.owner_id, item_id = %cmd.item_id, "add cart item");
        with_tx!(self, |db_tx| {
            let item = self.require_item(&db_tx, cmd.item_id).await?;
            let line = LineItem::new(&item, cmd.quantity, cmd.unit_price)?;
            let now = Utc::now();

            match self.find_active_cart(&db_tx, &cmd.owner_id).await? {
                Some(mut cart) => {
                    cart.push(line, now);
                    self.save_cart(&db_tx, cart).await
                }
                None => {
                    let cart = Cart::new(&cmd.owner_id, line, now);
                    carts::ActiveModel::try_from(&cart)?
                        .insert(&db_tx)
                        .await
                        .map_err(|err| map_unique_violation(err, "active cart"))?;
                    Ok(cart)
                }
            }
        })
    }

    /// Returns the owner's active cart.
    pub async fn active_cart(&self, owner_id: &str) -> ResultEngine<Cart> {
        with_tx!(self, |db_tx| self.require_active_cart(&db_tx, owner_id).await)
    }

    /// Removes one line from the owner's active cart.
    ///
    /// Returns `None` when that was the last line: the cart is then deleted.
    pub async fn remove_cart_item(
        &self,
        owner_id: &str,
        line_item_id: Uuid,
    ) -> ResultEngine<Option<Cart>> {
        tracing::debug!(%owner_id, %line_item_id, "remove cart item");
        with_tx!(self, |db_tx| {
            let mut cart = self.require_active_cart(&db_tx, owner_id).await?;
            match cart.remove_line(line_item_id, Utc::now())? {
                LineRemoval::Remaining => self.save_cart(&db_tx, cart).await.map(Some),
                LineRemoval::Emptied => {
                    let cart_id = cart.id;
                    self.save_cart(&db_tx, cart).await?;
                    tracing::info!(%owner_id, %cart_id, "last line removed, cart deleted");
                    Ok(None)
                }
            }
        })
    }

    /// Deletes the owner's active cart.
    pub async fn clear_cart(&self, owner_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let mut cart = self.require_active_cart(&db_tx, owner_id).await?;
            cart.deleted = true;
            cart.updated_at = Utc::now();
            let cart = self.save_cart(&db_tx, cart).await?;
            tracing::info!(%owner_id, cart_id = %cart.id, "cart cleared");
            Ok(())
        })
    }
}
