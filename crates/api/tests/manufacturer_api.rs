//! HTTP-level integration tests for the `/manufacturers` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth};
use sqlx::PgPool;
use taxi_db::models::manufacturer::CreateManufacturer;
use taxi_db::repositories::ManufacturerRepo;

const MANUFACTURERS_URL: &str = "/api/v1/manufacturers";

async fn seed(pool: &PgPool, name: &str, country: &str) -> i64 {
    let input = CreateManufacturer {
        name: name.to_string(),
        country: country.to_string(),
    };
    ManufacturerRepo::create(pool, &input)
        .await
        .expect("manufacturer creation should succeed")
        .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_required(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, MANUFACTURERS_URL).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_returns_all_manufacturers(pool: PgPool) {
    seed(&pool, "Toyota", "Japan").await;
    seed(&pool, "BMW", "Germany").await;
    let app = common::build_test_app(pool.clone());
    let (_driver, token) = common::logged_in(&pool, app.clone()).await;

    let response = get_auth(app, MANUFACTURERS_URL, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["template"], "taxi/manufacturer_list.html");
    let names: Vec<_> = json["manufacturer_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["BMW", "Toyota"]);
    assert_eq!(json["search_form"]["name"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_filters_by_name(pool: PgPool) {
    seed(&pool, "Toyota", "Japan").await;
    seed(&pool, "BMW", "Germany").await;
    let app = common::build_test_app(pool.clone());
    let (_driver, token) = common::logged_in(&pool, app.clone()).await;

    let response = get_auth(app, "/api/v1/manufacturers?name=toy", &token).await;
    let json = body_json(response).await;

    let list = json["manufacturer_list"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Toyota");
    assert_eq!(json["search_form"]["name"], "toy");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_manufacturer(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_driver, token) = common::logged_in(&pool, app.clone()).await;

    let body = serde_json::json!({ "name": " Skoda ", "country": "Czechia" });
    let response = post_json_auth(app, MANUFACTURERS_URL, body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Skoda");
    assert_eq!(json["country"], "Czechia");
    assert_eq!(ManufacturerRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_driver, token) = common::logged_in(&pool, app.clone()).await;

    let body = serde_json::json!({ "name": "" });
    let response = post_json_auth(app, MANUFACTURERS_URL, body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "This field is required.");
    assert_eq!(json["fields"]["country"][0], "This field is required.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_conflicts(pool: PgPool) {
    seed(&pool, "Toyota", "Japan").await;
    let app = common::build_test_app(pool.clone());
    let (_driver, token) = common::logged_in(&pool, app.clone()).await;

    let body = serde_json::json!({ "name": "Toyota", "country": "Japan" });
    let response = post_json_auth(app, MANUFACTURERS_URL, body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_manufacturer(pool: PgPool) {
    let id = seed(&pool, "Toyta", "Japan").await;
    let app = common::build_test_app(pool.clone());
    let (_driver, token) = common::logged_in(&pool, app.clone()).await;

    let body = serde_json::json!({ "name": "Toyota", "country": "Japan" });
    let uri = format!("{MANUFACTURERS_URL}/{id}/update");
    let response = post_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Toyota");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_manufacturer(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_driver, token) = common::logged_in(&pool, app.clone()).await;

    let body = serde_json::json!({ "name": "Toyota", "country": "Japan" });
    let uri = format!("{MANUFACTURERS_URL}/999999/update");
    let response = post_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_manufacturer(pool: PgPool) {
    let id = seed(&pool, "Lada", "Russia").await;
    let app = common::build_test_app(pool.clone());
    let (_driver, token) = common::logged_in(&pool, app.clone()).await;

    let uri = format!("{MANUFACTURERS_URL}/{id}");
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
