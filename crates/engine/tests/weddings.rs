mod common;

use chrono::{TimeZone, Utc};

use common::{admin, engine_with_db, staff};
use engine::{
    EngineError, Money, NewWeddingCmd, Party, PartyPatch, ReserveMethod, SideCosts, SplitMethod,
    UpdateWeddingCmd,
};
use uuid::Uuid;

fn new_wedding_cmd() -> NewWeddingCmd {
    let at = Utc.with_ymd_and_hms(2026, 5, 23, 11, 0, 0).unwrap();
    NewWeddingCmd {
        wedding_at: at,
        event_at: at,
        meal_method: SplitMethod::Half,
        present_method: SplitMethod::Privacy,
        reserve_method: ReserveMethod::Husband,
        meal_price: Money::new(10_000),
        present_price: Money::new(5_000),
        reserve_price: Money::new(50_000),
        husband: Party {
            name: "홍길동".to_string(),
            costs: SideCosts {
                hall_rental: Money::new(1_000_000),
                grooming_male: Money::new(150_000),
                ..SideCosts::default()
            },
            meal_count: 3,
            present_count: 4,
            pre_deposit: Money::new(200_000),
            ..Party::default()
        },
        bride: Party {
            name: "김영희".to_string(),
            costs: SideCosts {
                hall_rental: Money::new(1_000_000),
                bouquet: Money::new(120_000),
                ..SideCosts::default()
            },
            meal_count: 1,
            present_count: 2,
            ..Party::default()
        },
    }
}

#[tokio::test]
async fn create_masks_names_and_settles() {
    let (engine, _db) = engine_with_db().await;
    let root = admin(&engine, "root").await;

    let wedding = engine.new_wedding(new_wedding_cmd(), &root).await.unwrap();
    assert_eq!(wedding.husband.name, "홍*동");
    assert_eq!(wedding.bride.name, "김*희");

    let stored = engine.wedding(wedding.id, &root).await.unwrap();
    assert_eq!(stored.husband, wedding.husband);
    assert_eq!(stored.meal_method, SplitMethod::Half);
    assert_eq!(stored.present_method, SplitMethod::Privacy);
    assert_eq!(stored.reserve_method, ReserveMethod::Husband);

    let s = stored.settlement().unwrap();
    assert_eq!(s.all_meal_cost, Money::new(40_000));
    assert_eq!(s.meal.husband, Money::new(20_000));
    assert_eq!(s.meal.bride, Money::new(20_000));
    assert_eq!(s.present.husband, Money::new(20_000));
    assert_eq!(s.present.bride, Money::new(10_000));
    assert_eq!(s.reserve.husband, Money::new(50_000));
    assert_eq!(s.reserve.bride, Money::ZERO);
    assert_eq!(s.husband_payment + s.bride_payment, s.all_payment);
}

#[tokio::test]
async fn update_does_not_mask_again() {
    let (engine, _db) = engine_with_db().await;
    let root = admin(&engine, "root").await;
    let wedding = engine.new_wedding(new_wedding_cmd(), &root).await.unwrap();

    let updated = engine
        .update_wedding(
            wedding.id,
            UpdateWeddingCmd {
                meal_method: Some(SplitMethod::Bride),
                husband: PartyPatch {
                    meal_count: Some(10),
                    ..PartyPatch::default()
                },
                ..UpdateWeddingCmd::default()
            },
            &root,
        )
        .await
        .unwrap();
    assert_eq!(updated.husband.name, "홍*동");
    assert_eq!(updated.husband.meal_count, 10);

    let stored = engine.wedding(wedding.id, &root).await.unwrap();
    assert_eq!(stored.husband.name, "홍*동");
    assert_eq!(stored.meal_method, SplitMethod::Bride);
    let s = stored.settlement().unwrap();
    assert_eq!(s.meal.husband, Money::ZERO);
    assert_eq!(s.meal.bride, Money::new(110_000));

    let renamed = engine
        .update_wedding(
            wedding.id,
            UpdateWeddingCmd {
                bride: PartyPatch {
                    name: Some("김영희".to_string()),
                    ..PartyPatch::default()
                },
                ..UpdateWeddingCmd::default()
            },
            &root,
        )
        .await
        .unwrap();
    assert_eq!(renamed.bride.name, "김영희");
}

#[tokio::test]
async fn weddings_are_privileged_only() {
    let (engine, _db) = engine_with_db().await;
    let root = admin(&engine, "root").await;
    let alice = staff(&engine, "alice").await;

    assert!(matches!(
        engine.new_wedding(new_wedding_cmd(), &alice).await.unwrap_err(),
        EngineError::Forbidden(_)
    ));
    let wedding = engine.new_wedding(new_wedding_cmd(), &root).await.unwrap();
    assert!(matches!(
        engine.wedding(wedding.id, &alice).await.unwrap_err(),
        EngineError::Forbidden(_)
    ));
    assert!(matches!(
        engine.delete_wedding(wedding.id, &alice).await.unwrap_err(),
        EngineError::Forbidden(_)
    ));
    assert!(matches!(
        engine.list_weddings_page(&alice, None, None).await.unwrap_err(),
        EngineError::Forbidden(_)
    ));
}

#[tokio::test]
async fn delete_wedding_then_not_found() {
    let (engine, _db) = engine_with_db().await;
    let root = admin(&engine, "root").await;
    let wedding = engine.new_wedding(new_wedding_cmd(), &root).await.unwrap();

    engine.delete_wedding(wedding.id, &root).await.unwrap();
    assert_eq!(
        engine.wedding(wedding.id, &root).await.unwrap_err(),
        EngineError::KeyNotFound("wedding not exists".to_string())
    );
    assert_eq!(
        engine.delete_wedding(Uuid::new_v4(), &root).await.unwrap_err(),
        EngineError::KeyNotFound("wedding not exists".to_string())
    );
}

#[tokio::test]
async fn negative_headcount_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let root = admin(&engine, "root").await;
    let mut cmd = new_wedding_cmd();
    cmd.bride.meal_count = -1;

    assert!(matches!(
        engine.new_wedding(cmd, &root).await.unwrap_err(),
        EngineError::InvalidInput(_)
    ));
}

#[tokio::test]
async fn unsettleable_wedding_is_not_stored() {
    let (engine, _db) = engine_with_db().await;
    let root = admin(&engine, "root").await;

    let mut cmd = new_wedding_cmd();
    cmd.meal_price = Money::new(i64::MAX / 2);
    cmd.husband.meal_count = 2;
    cmd.bride.meal_count = 1;
    assert!(matches!(
        engine.new_wedding(cmd, &root).await.unwrap_err(),
        EngineError::InvalidAmount(_)
    ));

    let mut cmd = new_wedding_cmd();
    cmd.husband.costs.hall_rental = Money::new(i64::MAX);
    cmd.husband.costs.sword_rental = Money::new(1);
    assert!(matches!(
        engine.new_wedding(cmd, &root).await.unwrap_err(),
        EngineError::InvalidAmount(_)
    ));

    let page = engine.list_weddings_page(&root, None, None).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn unsettleable_update_keeps_previous_record() {
    let (engine, _db) = engine_with_db().await;
    let root = admin(&engine, "root").await;
    let wedding = engine.new_wedding(new_wedding_cmd(), &root).await.unwrap();

    let err = engine
        .update_wedding(
            wedding.id,
            UpdateWeddingCmd {
                meal_price: Some(Money::new(i64::MAX / 2)),
                ..UpdateWeddingCmd::default()
            },
            &root,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let stored = engine.wedding(wedding.id, &root).await.unwrap();
    assert_eq!(stored.meal_price, Money::new(10_000));
    assert!(stored.settlement().is_ok());
}
