pub mod like_entity;
pub mod movie_entity;
pub mod movie_type_entity;
pub mod review_entity;
pub mod user_entity;
pub mod user_type_entity;
