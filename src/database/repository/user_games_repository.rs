//! 用户游戏仓库
//!
//! 只提供插入与查询；游戏库中的游戏不会被更新或删除。

use crate::database::dto::NewUserGame;
use crate::entity::prelude::*;
use crate::entity::user_games;
use sea_orm::*;

/// 用户游戏仓库
pub struct UserGamesRepository;

impl UserGamesRepository {
    /// 插入用户游戏，返回插入后的完整记录
    ///
    /// id 使用 UUID v4，created_at 为当前毫秒时间戳
    pub async fn insert(
        db: &DatabaseConnection,
        user_id: &str,
        game: NewUserGame,
    ) -> Result<user_games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp_millis();

        let game_active = user_games::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            game_name: Set(game.game_name),
            game_type: Set(game.game_type),
            file_path: Set(game.file_path),
            install_path: Set(game.install_path),
            thumbnail_url: Set(game.thumbnail_url),
            is_installed: Set(game.is_installed),
            created_at: Set(now),
        };

        game_active.insert(db).await
    }

    /// 获取所有用户游戏，按创建时间倒序
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<user_games::Model>, DbErr> {
        UserGames::find()
            .order_by_desc(user_games::Column::CreatedAt)
            .all(db)
            .await
    }

    /// 按游戏类型筛选
    pub async fn find_by_kind(
        db: &DatabaseConnection,
        kind: GameKind,
    ) -> Result<Vec<user_games::Model>, DbErr> {
        UserGames::find()
            .filter(user_games::Column::GameType.eq(kind))
            .order_by_desc(user_games::Column::CreatedAt)
            .all(db)
            .await
    }

    /// 获取用户游戏总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        UserGames::find().count(db).await
    }
}
