mod helpers;

use crate::helpers::{create_fake_user, create_fake_user_type};
use axum::http::StatusCode;
use movie_rating_server::entities::user_entity::User;
use serde_json::json;

test_with_server!(user_crud, |server, ctx_state, config| {
    let response = server.get("/api/v1/user").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<User>>().len(), 0);

    let user_type = create_fake_user_type(&server).await;
    let response = server
        .post("/api/v1/user")
        .json(&json!({
            "email": "Reviewer.One@Example.com",
            "full_name": "Reviewer One",
            "user_type": user_type.id.as_ref().unwrap().to_raw(),
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<User>();
    // the store lowercases the natural key
    assert_eq!(created.email, "reviewer.one@example.com");
    let id = created.id.as_ref().unwrap().to_raw();

    let response = server.get(format!("/api/v1/user/{id}").as_str()).await;
    response.assert_status_ok();
    assert_eq!(response.json::<User>().full_name, "Reviewer One");

    let response = server
        .put(format!("/api/v1/user/{id}").as_str())
        .json(&json!({
            "email": "reviewer.one@example.com",
            "full_name": "Reviewer Renamed",
            "user_type": user_type.id.as_ref().unwrap().to_raw(),
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<User>().full_name, "Reviewer Renamed");

    let response = server.delete(format!("/api/v1/user/{id}").as_str()).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(format!("/api/v1/user/{id}").as_str()).await;
    response.assert_status_not_found();
});

test_with_server!(duplicate_user_email_conflicts, |server, ctx_state, config| {
    let user_type = create_fake_user_type(&server).await;
    let body = json!({
        "email": "same@example.com",
        "full_name": "First",
        "user_type": user_type.id.as_ref().unwrap().to_raw(),
    });

    let response = server.post("/api/v1/user").json(&body).await;
    response.assert_status(StatusCode::CREATED);

    let response = server.post("/api/v1/user").json(&body).await;
    response.assert_status(StatusCode::CONFLICT);
});

test_with_server!(user_with_unknown_type_fails, |server, ctx_state, config| {
    let response = server
        .post("/api/v1/user")
        .json(&json!({
            "email": "someone@example.com",
            "full_name": "Someone",
            "user_type": "user_type:does_not_exist",
        }))
        .await;
    response.assert_status_not_found();
});

test_with_server!(invalid_user_email_is_rejected, |server, ctx_state, config| {
    let user_type = create_fake_user_type(&server).await;
    let response = server
        .post("/api/v1/user")
        .json(&json!({
            "email": "not-an-email",
            "full_name": "Someone",
            "user_type": user_type.id.as_ref().unwrap().to_raw(),
        }))
        .await;
    response.assert_status_bad_request();
});

test_with_server!(user_list_returns_created_users, |server, ctx_state, config| {
    create_fake_user(&server).await;
    create_fake_user(&server).await;

    let response = server.get("/api/v1/user").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<User>>().len(), 2);
});
