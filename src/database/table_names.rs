pub const LIKE_TABLE_NAME: &'static str = "like";
pub const MOVIE_LIKE_TABLE_NAME: &'static str = "movie_like";
