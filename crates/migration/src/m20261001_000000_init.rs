//! Initial schema.
//!
//! - `users`: staff accounts and their API tokens
//! - `items`: menu catalog, unique business number
//! - `carts`: in-progress orders, line items as JSON, CAS `version`
//! - `bills`: invoices frozen from carts
//! - `weddings`: per-side wedding expenses

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Token,
    IsAdmin,
    CreatedAt,
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
    No,
    Name,
    Category,
    Tier,
    Unit,
    Price,
    CreatedAt,
}

#[derive(Iden)]
enum Carts {
    Table,
    Id,
    OwnerId,
    Items,
    Completed,
    Deleted,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Bills {
    Table,
    Id,
    Title,
    Hall,
    Etc,
    TotalAmount,
    Items,
    Reserve,
    CartId,
    OwnerId,
    OwnerName,
    CreatedAt,
}

#[derive(Iden)]
enum Weddings {
    Table,
    Id,
    WeddingAt,
    EventAt,
    MealMethod,
    PresentMethod,
    ReserveMethod,
    MealPrice,
    PresentPrice,
    ReservePrice,
    HusbandName,
    HusbandImage,
    HusbandHallRental,
    HusbandSwordRental,
    HusbandBouquet,
    HusbandOperatorFee,
    HusbandGroomingFemale,
    HusbandGroomingMale,
    HusbandFrame,
    HusbandRawFile,
    HusbandVideo,
    HusbandMisc,
    HusbandMealCount,
    HusbandPresentCount,
    HusbandPreDeposit,
    BrideName,
    BrideImage,
    BrideHallRental,
    BrideSwordRental,
    BrideBouquet,
    BrideOperatorFee,
    BrideGroomingFemale,
    BrideGroomingMale,
    BrideFrame,
    BrideRawFile,
    BrideVideo,
    BrideMisc,
    BrideMealCount,
    BridePresentCount,
    BridePreDeposit,
    CreatedAt,
}

/// Non-null integer column defaulting to zero.
fn amount<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .default(0)
        .to_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Token).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Items
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Items::No)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::Category).string().not_null())
                    .col(ColumnDef::new(Items::Tier).string().not_null())
                    .col(ColumnDef::new(Items::Unit).string().not_null())
                    .col(ColumnDef::new(Items::Price).big_integer().not_null())
                    .col(ColumnDef::new(Items::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Carts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Carts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Carts::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Carts::OwnerId).string().not_null())
                    .col(ColumnDef::new(Carts::Items).json().not_null())
                    .col(
                        ColumnDef::new(Carts::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Carts::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Carts::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Carts::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Carts::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-carts-owner_id")
                            .from(Carts::Table, Carts::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-carts-owner_id")
                    .table(Carts::Table)
                    .col(Carts::OwnerId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Bills
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bills::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Bills::Title).string().not_null())
                    .col(ColumnDef::new(Bills::Hall).string().not_null())
                    .col(ColumnDef::new(Bills::Etc).string())
                    .col(ColumnDef::new(Bills::TotalAmount).big_integer().not_null())
                    .col(ColumnDef::new(Bills::Items).json().not_null())
                    .col(ColumnDef::new(Bills::Reserve).big_integer().default(0))
                    .col(ColumnDef::new(Bills::CartId).string().not_null())
                    .col(ColumnDef::new(Bills::OwnerId).string().not_null())
                    .col(ColumnDef::new(Bills::OwnerName).string().not_null())
                    .col(ColumnDef::new(Bills::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-bills-cart_id")
                            .from(Bills::Table, Bills::CartId)
                            .to(Carts::Table, Carts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-bills-owner_id")
                            .from(Bills::Table, Bills::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bills-created_at-id")
                    .table(Bills::Table)
                    .col(Bills::CreatedAt)
                    .col(Bills::Id)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Weddings
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Weddings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Weddings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Weddings::WeddingAt).timestamp().not_null())
                    .col(ColumnDef::new(Weddings::EventAt).timestamp().not_null())
                    .col(
                        ColumnDef::new(Weddings::MealMethod)
                            .string()
                            .not_null()
                            .default("half"),
                    )
                    .col(
                        ColumnDef::new(Weddings::PresentMethod)
                            .string()
                            .not_null()
                            .default("half"),
                    )
                    .col(
                        ColumnDef::new(Weddings::ReserveMethod)
                            .string()
                            .not_null()
                            .default("half"),
                    )
                    .col(amount(Weddings::MealPrice))
                    .col(amount(Weddings::PresentPrice))
                    .col(amount(Weddings::ReservePrice))
                    .col(ColumnDef::new(Weddings::HusbandName).string().not_null())
                    .col(ColumnDef::new(Weddings::HusbandImage).string())
                    .col(amount(Weddings::HusbandHallRental))
                    .col(amount(Weddings::HusbandSwordRental))
                    .col(amount(Weddings::HusbandBouquet))
                    .col(amount(Weddings::HusbandOperatorFee))
                    .col(amount(Weddings::HusbandGroomingFemale))
                    .col(amount(Weddings::HusbandGroomingMale))
                    .col(amount(Weddings::HusbandFrame))
                    .col(amount(Weddings::HusbandRawFile))
                    .col(amount(Weddings::HusbandVideo))
                    .col(amount(Weddings::HusbandMisc))
                    .col(amount(Weddings::HusbandMealCount))
                    .col(amount(Weddings::HusbandPresentCount))
                    .col(amount(Weddings::HusbandPreDeposit))
                    .col(ColumnDef::new(Weddings::BrideName).string().not_null())
                    .col(ColumnDef::new(Weddings::BrideImage).string())
                    .col(amount(Weddings::BrideHallRental))
                    .col(amount(Weddings::BrideSwordRental))
                    .col(amount(Weddings::BrideBouquet))
                    .col(amount(Weddings::BrideOperatorFee))
                    .col(amount(Weddings::BrideGroomingFemale))
                    .col(amount(Weddings::BrideGroomingMale))
                    .col(amount(Weddings::BrideFrame))
                    .col(amount(Weddings::BrideRawFile))
                    .col(amount(Weddings::BrideVideo))
                    .col(amount(Weddings::BrideMisc))
                    .col(amount(Weddings::BrideMealCount))
                    .col(amount(Weddings::BridePresentCount))
                    .col(amount(Weddings::BridePreDeposit))
                    .col(ColumnDef::new(Weddings::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Weddings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Carts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
