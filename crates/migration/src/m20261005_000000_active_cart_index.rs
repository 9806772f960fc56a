//! One active cart per owner.
//!
//! A partial unique index: only carts that are neither completed nor deleted
//! take part, so an owner keeps any number of frozen or cleared carts.
//! `sea-query` has no partial index builder, so the statement is raw SQL.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEX_NAME: &str = "idx-carts-owner_id-active-unique";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS "{INDEX_NAME}" ON "carts" ("owner_id") WHERE "completed" = 0 AND "deleted" = 0"#
            ))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!(r#"DROP INDEX IF EXISTS "{INDEX_NAME}""#))
            .await?;
        Ok(())
    }
}
