//! End-to-end character lifecycle over HTTP: house attachment,
//! enrollment replacement, omission-vs-null semantics, and cascade
//! delete.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

async fn seed_house(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_json(app, "/api/v1/houses", serde_json::json!({"name": name})).await)
        .await;
    json["id"].as_i64().unwrap()
}

async fn seed_subject(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(app, "/api/v1/subjects", serde_json::json!({"name": name})).await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_character_lifecycle(pool: PgPool) {
    let house_id = seed_house(&pool, "Sonserina").await;
    let potions = seed_subject(&pool, "Poções").await;
    let charms = seed_subject(&pool, "Feitiços").await;

    // Create with house attachment.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({
            "firstName": "Draco",
            "lastName": "Malfoy",
            "role": "student",
            "houseId": house_id
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["house"]["id"].as_i64(), Some(house_id));
    assert_eq!(created["house"]["name"], "Sonserina");

    // Enroll in two subjects.
    let app = common::build_test_app(pool.clone());
    let two = body_json(
        put_json(
            app,
            &format!("/api/v1/characters/{id}"),
            serde_json::json!({"subjectIds": [potions, charms]}),
        )
        .await,
    )
    .await;
    assert_eq!(two["subjects"].as_array().unwrap().len(), 2);

    // Replace with a single subject.
    let app = common::build_test_app(pool.clone());
    let one = body_json(
        put_json(
            app,
            &format!("/api/v1/characters/{id}"),
            serde_json::json!({"subjectIds": [charms]}),
        )
        .await,
    )
    .await;
    let subjects = one["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0]["id"].as_i64(), Some(charms));

    // Delete, then GET must 404.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_house_omission_vs_explicit_null(pool: PgPool) {
    let house_id = seed_house(&pool, "Corvinal").await;

    // Create without a house: embedded house is null.
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/characters",
            serde_json::json!({"firstName": "Luna", "lastName": "Lovegood"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert!(created["house"].is_null());

    // Attach.
    let app = common::build_test_app(pool.clone());
    let attached = body_json(
        put_json(
            app,
            &format!("/api/v1/characters/{id}"),
            serde_json::json!({"houseId": house_id}),
        )
        .await,
    )
    .await;
    assert_eq!(attached["house"]["id"].as_i64(), Some(house_id));

    // Omitting houseId leaves the attachment unchanged.
    let app = common::build_test_app(pool.clone());
    let untouched = body_json(
        put_json(
            app,
            &format!("/api/v1/characters/{id}"),
            serde_json::json!({"bloodStatus": "pure-blood"}),
        )
        .await,
    )
    .await;
    assert_eq!(untouched["house"]["id"].as_i64(), Some(house_id));
    assert_eq!(untouched["bloodStatus"], "pure-blood");

    // Explicit null detaches, and stays detached.
    let app = common::build_test_app(pool.clone());
    let detached = body_json(
        put_json(
            app,
            &format!("/api/v1/characters/{id}"),
            serde_json::json!({"houseId": null}),
        )
        .await,
    )
    .await;
    assert!(detached["house"].is_null());

    let app = common::build_test_app(pool);
    let still = body_json(
        put_json(
            app,
            &format!("/api/v1/characters/{id}"),
            serde_json::json!({"firstName": "Luna"}),
        )
        .await,
    )
    .await;
    assert!(still["house"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_enrollment_sync_idempotent_over_http(pool: PgPool) {
    let potions = seed_subject(&pool, "Poções").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/characters",
            serde_json::json!({
                "firstName": "Hermione",
                "lastName": "Granger",
                "subjectIds": [potions]
            }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["subjects"].as_array().unwrap().len(), 1);

    // Syncing the same set again yields exactly the same rows.
    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/characters/{id}"),
        serde_json::json!({"subjectIds": [potions]}),
    )
    .await;

    let app = common::build_test_app(pool);
    let fetched = body_json(get(app, &format!("/api/v1/characters/{id}")).await).await;
    assert_eq!(fetched["subjects"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_with_unknown_subject_returns_404_and_keeps_set(pool: PgPool) {
    let potions = seed_subject(&pool, "Poções").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/characters",
            serde_json::json!({
                "firstName": "Hermione",
                "lastName": "Granger",
                "subjectIds": [potions]
            }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/characters/{id}"),
        serde_json::json!({"subjectIds": [potions, 999999]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The previous enrollment set is intact.
    let app = common::build_test_app(pool);
    let fetched = body_json(get(app, &format!("/api/v1/characters/{id}")).await).await;
    let subjects = fetched["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0]["id"].as_i64(), Some(potions));
}
