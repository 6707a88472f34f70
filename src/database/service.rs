use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::database::dto::NewUserGame;
use crate::database::repository::{
    catalog_repository::CatalogRepository, user_games_repository::UserGamesRepository,
};
use crate::library::{CatalogEntry, GameStore, LibraryError, UserGame};

/// 基于 SeaORM 的表存储服务
#[derive(Clone)]
pub struct DbGameStore {
    db: DatabaseConnection,
}

impl DbGameStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl GameStore for DbGameStore {
    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, LibraryError> {
        CatalogRepository::find_all(&self.db)
            .await
            .map_err(LibraryError::from)
    }

    async fn list_user_games(&self) -> Result<Vec<UserGame>, LibraryError> {
        UserGamesRepository::find_all(&self.db)
            .await
            .map_err(LibraryError::from)
    }

    async fn insert_user_game(
        &self,
        owner_id: &str,
        game: NewUserGame,
    ) -> Result<UserGame, LibraryError> {
        let created = UserGamesRepository::insert(&self.db, owner_id, game).await?;
        log::info!(
            "已添加游戏: {} ({:?}, id = {})",
            created.game_name,
            created.game_type,
            created.id
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, SessionIdentity};
    use crate::database::db;
    use crate::entity::catalog;
    use crate::library::{GameKind, GameLibrary};
    use crate::notification::NotificationCenter;
    use sea_orm::{ActiveModelTrait, Set};
    use std::sync::Arc;

    async fn store() -> DbGameStore {
        let conn = db::connect_in_memory().await.unwrap();
        db::run_migrations(&conn).await.unwrap();
        DbGameStore::new(conn)
    }

    async fn seed_catalog(store: &DbGameStore, id: &str, created_at: i64) {
        catalog::ActiveModel {
            id: Set(id.to_string()),
            name: Set(format!("Game {}", id)),
            description: Set(None),
            download_url: Set(format!("https://cdn.example/{}.mpk", id)),
            file_size: Set(Some(2048)),
            version: Set(Some("1.0".to_string())),
            thumbnail_url: Set(None),
            created_at: Set(created_at),
        }
        .insert(store.connection())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn catalog_is_listed_newest_first() {
        let store = store().await;
        seed_catalog(&store, "old", 1_000).await;
        seed_catalog(&store, "new", 3_000).await;
        seed_catalog(&store, "mid", 2_000).await;

        let ids: Vec<String> = store
            .list_catalog()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn inserted_game_keeps_owner_and_kind() {
        let store = store().await;
        let created = store
            .insert_user_game("user-9", NewUserGame::packaged("Race", "/d/race.mpk", "/h/race"))
            .await
            .unwrap();

        assert_eq!(created.user_id, "user-9");
        assert_eq!(created.game_type, GameKind::Packaged);

        let listed = store.list_user_games().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn repositories_filter_and_count() {
        let store = store().await;
        seed_catalog(&store, "c1", 1_000).await;
        let db = store.connection();

        assert_eq!(CatalogRepository::count(db).await.unwrap(), 1);
        assert!(CatalogRepository::find_by_id(db, "c1").await.unwrap().is_some());
        assert!(CatalogRepository::find_by_id(db, "c2").await.unwrap().is_none());

        UserGamesRepository::insert(db, "u", NewUserGame::external("A", "/a.exe"))
            .await
            .unwrap();
        UserGamesRepository::insert(db, "u", NewUserGame::packaged("B", "/b.mpk", "/h/B"))
            .await
            .unwrap();

        let packaged = UserGamesRepository::find_by_kind(db, GameKind::Packaged)
            .await
            .unwrap();
        assert_eq!(packaged.len(), 1);
        assert_eq!(packaged[0].game_name, "B");
        assert_eq!(UserGamesRepository::count(db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn library_round_trip_through_database() {
        let store = Arc::new(store().await);
        let identity = Arc::new(SessionIdentity::signed_in(Identity {
            id: "user-1".to_string(),
            email: Some("player@example.com".to_string()),
        }));
        let toasts = NotificationCenter::new();
        let mut library = GameLibrary::new(store, identity, toasts.clone());
        library.load().await;
        assert!(library.user_games().is_empty());

        let created = library
            .add_user_game(NewUserGame::external("Doom", "/games/doom.exe"))
            .await
            .unwrap();

        assert_eq!(library.user_games().len(), 1);
        assert_eq!(library.user_games()[0].id, created.id);
        assert_eq!(library.external_games().len(), 1);
        assert!(library.packaged_games().is_empty());
        assert!(toasts.drain().iter().all(|n| !n.is_destructive()));
    }
}
