mod helpers;

use axum::http::StatusCode;
use movie_rating_server::entities::user_type_entity::UserType;
use serde_json::json;

test_with_server!(user_type_crud, |server, ctx_state, config| {
    // nothing yet: an empty list, not a failure
    let response = server.get("/api/v1/user_type").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<UserType>>().len(), 0);

    let response = server
        .post("/api/v1/user_type")
        .json(&json!({ "name": "Admin" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<UserType>();
    assert_eq!(created.name, "Admin");
    let id = created.id.as_ref().unwrap().to_raw();

    let response = server.get(format!("/api/v1/user_type/{id}").as_str()).await;
    response.assert_status_ok();
    assert_eq!(response.json::<UserType>().name, "Admin");

    let response = server
        .put(format!("/api/v1/user_type/{id}").as_str())
        .json(&json!({ "name": "Reviewer" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<UserType>().name, "Reviewer");

    let response = server
        .delete(format!("/api/v1/user_type/{id}").as_str())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(format!("/api/v1/user_type/{id}").as_str()).await;
    response.assert_status_not_found();
});

test_with_server!(duplicate_user_type_name_conflicts, |server,
                                                       ctx_state,
                                                       config| {
    let response = server
        .post("/api/v1/user_type")
        .json(&json!({ "name": "Admin" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/user_type")
        .json(&json!({ "name": "Admin" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
});

test_with_server!(empty_user_type_name_is_rejected, |server, ctx_state, config| {
    let response = server
        .post("/api/v1/user_type")
        .json(&json!({ "name": "" }))
        .await;
    response.assert_status_bad_request();
});

test_with_server!(unknown_user_type_returns_not_found, |server,
                                                        ctx_state,
                                                        config| {
    let response = server.get("/api/v1/user_type/user_type:missing").await;
    response.assert_status_not_found();

    let response = server.delete("/api/v1/user_type/user_type:missing").await;
    response.assert_status_not_found();
});
