use sea_orm::{ActiveValue, DatabaseTransaction, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Actor, Bill, EngineError, Money, ResultEngine, bills};

use super::{
    Engine,
    access::{require_owner_or_privileged, require_privileged},
    with_tx,
};

impl Engine {
    /// Sets the deposit on a bill, replacing any previous one.
    pub async fn add_reserve(
        &self,
        bill_id: Uuid,
        amount: Money,
        actor: &Actor,
    ) -> ResultEngine<Bill> {
        require_privileged(actor, "adding a reserve")?;
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "reserve must not be negative".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let mut bill = self.require_bill(&db_tx, bill_id).await?;
            bill.reserve = amount;
            self.write_reserve(&db_tx, &bill).await?;
            tracing::info!(%bill_id, reserve = %amount, by = %actor.user_id, "reserve set");
            Ok(bill)
        })
    }

    /// Clears the deposit on a bill.
    pub async fn remove_reserve(&self, bill_id: Uuid, actor: &Actor) -> ResultEngine<Bill> {
        require_privileged(actor, "removing a reserve")?;

        with_tx!(self, |db_tx| {
            let mut bill = self.require_bill(&db_tx, bill_id).await?;
            if !bill.has_reserve() {
                return Err(EngineError::NothingToRemove(
                    "bill has no reserve".to_string(),
                ));
            }
            bill.reserve = Money::ZERO;
            self.write_reserve(&db_tx, &bill).await?;
            tracing::info!(%bill_id, by = %actor.user_id, "reserve removed");
            Ok(bill)
        })
    }

    /// Returns the bill with its deposit to its owner or a privileged user.
    pub async fn reserve(&self, bill_id: Uuid, actor: &Actor) -> ResultEngine<Bill> {
        with_tx!(self, |db_tx| {
            let bill = self.require_bill(&db_tx, bill_id).await?;
            require_owner_or_privileged(actor, &bill.owner_id)?;
            Ok(bill)
        })
    }

    async fn write_reserve(&self, db: &DatabaseTransaction, bill: &Bill) -> ResultEngine<()> {
        bills::ActiveModel {
            id: ActiveValue::Unchanged(bill.id.to_string()),
            reserve: ActiveValue::Set(Some(bill.reserve.units())),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(())
    }
}
