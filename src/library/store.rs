use async_trait::async_trait;

use super::{CatalogEntry, LibraryError, UserGame};
use crate::database::dto::NewUserGame;

/// 表存储服务：catalog 只读，user_games 可读可插入
#[async_trait]
pub trait GameStore: Send + Sync {
    /// 目录条目，按创建时间倒序
    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, LibraryError>;

    /// 用户游戏，按创建时间倒序
    async fn list_user_games(&self) -> Result<Vec<UserGame>, LibraryError>;

    async fn insert_user_game(
        &self,
        owner_id: &str,
        game: NewUserGame,
    ) -> Result<UserGame, LibraryError>;
}
