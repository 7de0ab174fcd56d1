pub mod likes;
pub mod movie_types;
pub mod movies;
pub mod reviews;
pub mod user_types;
pub mod users;
