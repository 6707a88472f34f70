pub mod catalog_repository;
pub mod user_games_repository;
