pub mod like;
pub mod movie_like;
