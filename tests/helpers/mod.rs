pub mod test_with_server;

use axum_test::{TestResponse, TestServer};
use fake::{faker, Fake};
use movie_rating_server::entities::movie_entity::Movie;
use movie_rating_server::entities::movie_type_entity::MovieType;
use movie_rating_server::entities::review_entity::Review;
use movie_rating_server::entities::user_entity::User;
use movie_rating_server::entities::user_type_entity::UserType;
use serde_json::json;
use uuid::Uuid;

// allowing this because we are importing these in test files and cargo compiler
// doesnt compile those files while building so skips the import

#[allow(dead_code)]
pub async fn create_fake_user_type(server: &TestServer) -> UserType {
    let name = format!(
        "{}-{}",
        faker::lorem::en::Word().fake::<String>(),
        Uuid::new_v4()
    );
    let response = server
        .post("/api/v1/user_type")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status_success();
    response.json::<UserType>()
}

#[allow(dead_code)]
pub async fn create_fake_movie_type(server: &TestServer) -> MovieType {
    let name = format!(
        "{}-{}",
        faker::lorem::en::Word().fake::<String>(),
        Uuid::new_v4()
    );
    let response = server
        .post("/api/v1/movie_type")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status_success();
    response.json::<MovieType>()
}

#[allow(dead_code)]
pub async fn create_fake_user(server: &TestServer) -> User {
    let user_type = create_fake_user_type(server).await;
    let full_name = faker::name::en::Name().fake::<String>();
    let email = format!("{}@example.com", Uuid::new_v4());
    let response = server
        .post("/api/v1/user")
        .json(&json!({
            "email": email,
            "full_name": full_name,
            "user_type": user_type.id.as_ref().unwrap().to_raw(),
        }))
        .await;
    response.assert_status_success();
    response.json::<User>()
}

#[allow(dead_code)]
pub async fn create_fake_movie(server: &TestServer) -> Movie {
    let movie_type = create_fake_movie_type(server).await;
    let title = faker::name::en::Name().fake::<String>();
    let response = server
        .post("/api/v1/movie")
        .json(&json!({
            "title": title,
            "description": faker::lorem::en::Sentence(7..20).fake::<String>(),
            "movie_type": movie_type.id.as_ref().unwrap().to_raw(),
        }))
        .await;
    response.assert_status_success();
    response.json::<Movie>()
}

#[allow(dead_code)]
pub async fn create_fake_review(server: &TestServer, user: &User, movie: &Movie) -> Review {
    let response = server
        .post("/api/v1/review")
        .json(&json!({
            "created_by": user.id.as_ref().unwrap().to_raw(),
            "movie": movie.id.as_ref().unwrap().to_raw(),
            "content": faker::lorem::en::Sentence(7..20).fake::<String>(),
            "rating": 7,
        }))
        .await;
    response.assert_status_success();
    response.json::<Review>()
}

#[allow(dead_code)]
pub async fn toggle_review_like(
    server: &TestServer,
    review_id: &str,
    user_id: &str,
) -> TestResponse {
    server
        .put(format!("/api/v1/like/review/{review_id}/reviewer/{user_id}").as_str())
        .await
}

#[allow(dead_code)]
pub async fn toggle_movie_like(server: &TestServer, movie_id: &str, user_id: &str) -> TestResponse {
    server
        .put(format!("/api/v1/like/movie/{movie_id}/user/{user_id}").as_str())
        .await
}
