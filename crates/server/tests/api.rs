use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Actor, Engine, Money, NewItemCmd};
use server::{BillEvent, Notifier};

struct TestApp {
    router: Router,
    notifier: Notifier,
    admin_token: String,
    staff_token: String,
    other_token: String,
    item_id: String,
}

async fn test_app() -> TestApp {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();

    let (admin, admin_token) = engine.new_user("root", true).await.unwrap();
    let (_, staff_token) = engine.new_user("alice", false).await.unwrap();
    let (_, other_token) = engine.new_user("bob", false).await.unwrap();
    let item = engine
        .new_item(
            NewItemCmd {
                no: 1,
                name: "Galbi".to_string(),
                category: "meal".to_string(),
                tier: "premium".to_string(),
                unit: "plate".to_string(),
                price: Money::new(12_000),
            },
            &Actor::admin(admin.id),
        )
        .await
        .unwrap();

    let notifier = Notifier::default();
    TestApp {
        router: server::app(engine, notifier.clone()),
        notifier,
        admin_token,
        staff_token,
        other_token,
        item_id: item.id.to_string(),
    }
}

async fn call(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn missing_or_unknown_token_is_unauthorized() {
    let app = test_app().await;
    let (status, _) = call(&app, "GET", "/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(&app, "GET", "/cart", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cart_to_bill_to_restore() {
    let app = test_app().await;
    let staff = Some(app.staff_token.as_str());
    let mut events = app.notifier.subscribe();

    let (status, _) = call(&app, "GET", "/cart", staff, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, cart) = call(
        &app,
        "POST",
        "/cart",
        staff,
        Some(json!({ "item_id": app.item_id, "count": 5, "price": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["total_amount"], 60_000);
    assert_eq!(cart["items"][0]["amount"], 60_000);

    let (status, bill) = call(
        &app,
        "POST",
        "/bills",
        staff,
        Some(json!({ "title": "Kim wedding", "hall": "Rose hall", "etc": null })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bill["total_amount"], 60_000);
    assert_eq!(bill["owner_name"], "alice");
    let bill_id = bill["id"].as_str().unwrap().to_string();

    match events.try_recv().unwrap() {
        BillEvent::Created {
            bill_id: id,
            total_amount,
            ..
        } => {
            assert_eq!(id.to_string(), bill_id);
            assert_eq!(total_amount, 60_000);
        }
    }

    let (status, _) = call(&app, "GET", "/cart", staff, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, restored) =
        call(&app, "PATCH", &format!("/bills/{bill_id}"), staff, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["items"], cart["items"]);

    let (status, _) = call(&app, "GET", &format!("/bills/{bill_id}"), staff, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_last_line_answers_no_content() {
    let app = test_app().await;
    let staff = Some(app.staff_token.as_str());

    let (_, cart) = call(
        &app,
        "POST",
        "/cart",
        staff,
        Some(json!({ "item_id": app.item_id, "count": 1, "price": 12000 })),
    )
    .await;
    let line_id = cart["items"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = call(&app, "DELETE", &format!("/cart/{line_id}"), staff, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, "GET", "/cart", staff, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn freeze_without_cart_is_not_found() {
    let app = test_app().await;
    let (status, body) = call(
        &app,
        "POST",
        "/bills",
        Some(app.staff_token.as_str()),
        Some(json!({ "title": "t", "hall": "h" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("empty cart"));
}

#[tokio::test]
async fn reserve_rules_over_http() {
    let app = test_app().await;
    let staff = Some(app.staff_token.as_str());
    let admin = Some(app.admin_token.as_str());
    let other = Some(app.other_token.as_str());

    call(
        &app,
        "POST",
        "/cart",
        staff,
        Some(json!({ "item_id": app.item_id, "count": 10, "price": 12000 })),
    )
    .await;
    let (_, bill) = call(
        &app,
        "POST",
        "/bills",
        staff,
        Some(json!({ "title": "t", "hall": "h" })),
    )
    .await;
    let bill_id = bill["id"].as_str().unwrap().to_string();
    let reserve_uri = format!("/reserve/{bill_id}");

    let (status, _) = call(&app, "DELETE", &reserve_uri, admin, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({ "bill_id": bill_id, "reserve": 20000 });
    let (status, _) = call(&app, "POST", "/reserve", staff, Some(body.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, with_reserve) = call(&app, "POST", "/reserve", admin, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(with_reserve["reserve"], 20_000);
    assert_eq!(with_reserve["balance_due"], 100_000);

    let (status, read) = call(&app, "GET", &reserve_uri, staff, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["reserve"], 20_000);
    let (status, _) = call(&app, "GET", &reserve_uri, other, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, cleared) = call(&app, "DELETE", &reserve_uri, admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["reserve"], 0);
}

#[tokio::test]
async fn bills_list_and_delete_permissions() {
    let app = test_app().await;
    let staff = Some(app.staff_token.as_str());
    let other = Some(app.other_token.as_str());

    call(
        &app,
        "POST",
        "/cart",
        staff,
        Some(json!({ "item_id": app.item_id, "count": 1, "price": 12000 })),
    )
    .await;
    let (_, bill) = call(
        &app,
        "POST",
        "/bills",
        staff,
        Some(json!({ "title": "Lee wedding", "hall": "Rose hall" })),
    )
    .await;
    let bill_id = bill["id"].as_str().unwrap().to_string();

    let (status, page) = call(&app, "GET", "/bills?title=wedding", staff, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["bills"].as_array().unwrap().len(), 1);
    assert!(page["next_cursor"].is_null());

    let (_, page) = call(&app, "GET", "/bills", other, None).await;
    assert!(page["bills"].as_array().unwrap().is_empty());

    let (status, _) = call(&app, "DELETE", &format!("/bills/{bill_id}"), other, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(&app, "PATCH", &format!("/bills/{bill_id}"), other, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(&app, "DELETE", &format!("/bills/{bill_id}"), staff, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn wedding_detail_carries_settlement() {
    let app = test_app().await;
    let admin = Some(app.admin_token.as_str());

    let body = json!({
        "wedding_at": "2026-05-23T02:00:00Z",
        "event_at": "2026-05-23T02:00:00Z",
        "meal_method": "half",
        "present_method": "privacy",
        "reserve_method": "husband",
        "meal_price": 10000,
        "present_price": 5000,
        "reserve_price": 50000,
        "husband": { "name": "홍길동", "meal_count": 3, "present_count": 4 },
        "bride": { "name": "김영희", "meal_count": 1, "present_count": 2 }
    });

    let (status, _) = call(
        &app,
        "POST",
        "/weddings",
        Some(app.staff_token.as_str()),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = call(&app, "POST", "/weddings", admin, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["wedding"]["husband"]["name"], "홍*동");
    let id = created["wedding"]["id"].as_str().unwrap().to_string();

    let (status, detail) = call(&app, "GET", &format!("/weddings/{id}"), admin, None).await;
    assert_eq!(status, StatusCode::OK);
    let settlement = &detail["settlement"];
    assert_eq!(settlement["meal"]["husband"], 20_000);
    assert_eq!(settlement["meal"]["bride"], 20_000);
    assert_eq!(settlement["present"]["husband"], 20_000);
    assert_eq!(settlement["present"]["bride"], 10_000);
    assert_eq!(settlement["reserve"]["husband"], 50_000);
    assert_eq!(settlement["reserve"]["bride"], 0);

    let (status, updated) = call(
        &app,
        "PATCH",
        &format!("/weddings/{id}"),
        admin,
        Some(json!({ "meal_method": "bride" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["wedding"]["husband"]["name"], "홍*동");
    assert_eq!(updated["settlement"]["meal"]["bride"], 40_000);

    let (status, list) = call(&app, "GET", "/weddings", admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["weddings"].as_array().unwrap().len(), 1);

    let (status, _) = call(&app, "DELETE", &format!("/weddings/{id}"), admin, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_split_method_is_rejected() {
    let app = test_app().await;
    let body = json!({
        "wedding_at": "2026-05-23T02:00:00Z",
        "event_at": "2026-05-23T02:00:00Z",
        "meal_method": "everyone",
        "husband": { "name": "홍길동" },
        "bride": { "name": "김영희" }
    });
    let (status, _) = call(&app, "POST", "/weddings", Some(app.admin_token.as_str()), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_item_number_is_conflict() {
    let app = test_app().await;
    let (status, _) = call(
        &app,
        "POST",
        "/items",
        Some(app.admin_token.as_str()),
        Some(json!({
            "no": 1, "name": "Dup", "category": "meal", "tier": "x", "unit": "plate", "price": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, page) = call(&app, "GET", "/items", Some(app.staff_token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}
