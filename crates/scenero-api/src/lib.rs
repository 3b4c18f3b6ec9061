pub mod omdb;
pub mod tmdb;
pub mod traits;
