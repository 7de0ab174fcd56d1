mod helpers;

use axum::http::StatusCode;
use movie_rating_server::entities::movie_type_entity::MovieType;
use serde_json::json;

test_with_server!(movie_type_crud, |server, ctx_state, config| {
    let response = server.get("/api/v1/movie_type").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<MovieType>>().len(), 0);

    let response = server
        .post("/api/v1/movie_type")
        .json(&json!({ "name": "Drama" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<MovieType>();
    let id = created.id.as_ref().unwrap().to_raw();

    let response = server
        .get(format!("/api/v1/movie_type/{id}").as_str())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<MovieType>().name, "Drama");

    let response = server
        .put(format!("/api/v1/movie_type/{id}").as_str())
        .json(&json!({ "name": "Thriller" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<MovieType>().name, "Thriller");

    let response = server
        .delete(format!("/api/v1/movie_type/{id}").as_str())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server
        .get(format!("/api/v1/movie_type/{id}").as_str())
        .await;
    response.assert_status_not_found();
});

test_with_server!(movie_type_lookup_by_name, |server, ctx_state, config| {
    let response = server
        .post("/api/v1/movie_type")
        .json(&json!({ "name": "Drama" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = server.get("/api/v1/movie_type/name/Drama").await;
    response.assert_status_ok();
    assert_eq!(response.json::<MovieType>().name, "Drama");

    let response = server.get("/api/v1/movie_type/name/Comedy").await;
    response.assert_status_not_found();
});

test_with_server!(duplicate_movie_type_name_conflicts, |server,
                                                        ctx_state,
                                                        config| {
    let response = server
        .post("/api/v1/movie_type")
        .json(&json!({ "name": "Drama" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/movie_type")
        .json(&json!({ "name": "Drama" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
});
