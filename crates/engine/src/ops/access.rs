use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*, sea_query::Expr};
use uuid::Uuid;

use crate::{
    Actor, Bill, Cart, CatalogItem, EngineError, ResultEngine, Wedding, bills, carts, items,
    line_items, users, weddings,
};

use super::Engine;

/// Generates a `require_*` loader that maps a missing row to `KeyNotFound`.
macro_rules! impl_require_by_id {
    ($fn_name:ident, $entity:path, $out:ty, $err_msg:literal) => {
        pub(super) async fn $fn_name(
            &self,
            db: &DatabaseTransaction,
            id: Uuid,
        ) -> ResultEngine<$out> {
            let model = <$entity>::find_by_id(id.to_string())
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))?;
            <$out>::try_from(model)
        }
    };
}

pub(super) fn require_privileged(actor: &Actor, action: &str) -> ResultEngine<()> {
    if !actor.privileged {
        return Err(EngineError::Forbidden(format!(
            "{action} requires a privileged user"
        )));
    }
    Ok(())
}

pub(super) fn require_owner_or_privileged(actor: &Actor, owner_id: &str) -> ResultEngine<()> {
    if actor.privileged || actor.user_id == owner_id {
        return Ok(());
    }
    Err(EngineError::Forbidden("not the owner".to_string()))
}

impl Engine {
    impl_require_by_id!(require_item, items::Entity, CatalogItem, "item not exists");
    impl_require_by_id!(require_bill, bills::Entity, Bill, "bill not exists");
    impl_require_by_id!(require_wedding, weddings::Entity, Wedding, "wedding not exists");

    pub(super) async fn require_user(
        &self,
        db: &DatabaseTransaction,
        user_id: &str,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    pub(super) async fn find_active_cart(
        &self,
        db: &DatabaseTransaction,
        owner_id: &str,
    ) -> ResultEngine<Option<Cart>> {
        carts::Entity::find()
            .filter(carts::Column::OwnerId.eq(owner_id.to_string()))
            .filter(carts::Column::Completed.eq(false))
            .filter(carts::Column::Deleted.eq(false))
            .one(db)
            .await?
            .map(Cart::try_from)
            .transpose()
    }

    pub(super) async fn require_active_cart(
        &self,
        db: &DatabaseTransaction,
        owner_id: &str,
    ) -> ResultEngine<Cart> {
        self.find_active_cart(db, owner_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("cart not exists".to_string()))
    }

    /// Persists `cart` if nobody wrote it since it was loaded.
    ///
    /// The row is matched on `(id, version)` and the version is bumped; a
    /// concurrent writer makes the match fail with `StaleWrite`.
    pub(super) async fn save_cart(
        &self,
        db: &DatabaseTransaction,
        mut cart: Cart,
    ) -> ResultEngine<Cart> {
        let result = carts::Entity::update_many()
            .col_expr(
                carts::Column::Items,
                Expr::value(line_items::to_json(&cart.items)?),
            )
            .col_expr(carts::Column::Completed, Expr::value(cart.completed))
            .col_expr(carts::Column::Deleted, Expr::value(cart.deleted))
            .col_expr(carts::Column::Version, Expr::value(cart.version + 1))
            .col_expr(carts::Column::UpdatedAt, Expr::value(cart.updated_at))
            .filter(carts::Column::Id.eq(cart.id.to_string()))
            .filter(carts::Column::Version.eq(cart.version))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::StaleWrite(
                "cart was modified concurrently".to_string(),
            ));
        }
        cart.version += 1;
        Ok(cart)
    }
}
