#![allow(dead_code)]

use sea_orm::{Database, DatabaseConnection};

use engine::{Actor, AddCartItemCmd, CatalogItem, Engine, FreezeCartCmd, Money, NewItemCmd};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn staff(engine: &Engine, username: &str) -> Actor {
    let (user, _token) = engine.new_user(username, false).await.unwrap();
    Actor::staff(user.id)
}

pub async fn admin(engine: &Engine, username: &str) -> Actor {
    let (user, _token) = engine.new_user(username, true).await.unwrap();
    Actor::admin(user.id)
}

pub async fn catalog_item(engine: &Engine, admin: &Actor, no: i64, price: i64) -> CatalogItem {
    engine
        .new_item(
            NewItemCmd {
                no,
                name: format!("Course {no}"),
                category: "meal".to_string(),
                tier: "standard".to_string(),
                unit: "plate".to_string(),
                price: Money::new(price),
            },
            admin,
        )
        .await
        .unwrap()
}

pub fn add_cmd(owner: &Actor, item: &CatalogItem, quantity: i64) -> AddCartItemCmd {
    AddCartItemCmd {
        owner_id: owner.user_id.clone(),
        item_id: item.id,
        quantity,
        unit_price: item.price,
    }
}

pub fn freeze_cmd(owner: &Actor, title: &str) -> FreezeCartCmd {
    FreezeCartCmd {
        owner_id: owner.user_id.clone(),
        title: title.to_string(),
        hall: "Rose hall".to_string(),
        etc: None,
    }
}
