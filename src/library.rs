//! 游戏库
//!
//! 在界面与表存储服务之间做中转，维护两份列表：
//! - 目录（catalog）：可下载的 MPK 游戏，只读
//! - 用户游戏（user_games）：用户添加的游戏，可插入
//!
//! 所有失败都在这里转换为通知，内存中的列表保持不变。

mod error;
pub mod import;
mod store;

use std::path::Path;
use std::sync::Arc;

pub use error::LibraryError;
pub use import::PickedFile;
pub use store::GameStore;

use crate::auth::IdentityProvider;
use crate::database::dto::NewUserGame;
use crate::entity::{catalog, user_games};
use crate::notification::NotificationCenter;

pub use crate::entity::user_games::GameKind;

pub type CatalogEntry = catalog::Model;
pub type UserGame = user_games::Model;

/// 按类型拆分用户游戏，每个游戏恰好落在其中一边
pub fn partition_by_kind(games: &[UserGame]) -> (Vec<&UserGame>, Vec<&UserGame>) {
    games
        .iter()
        .partition(|game| game.game_type == GameKind::Packaged)
}

pub struct GameLibrary {
    store: Arc<dyn GameStore>,
    identity: Arc<dyn IdentityProvider>,
    toasts: NotificationCenter,
    catalog: Vec<CatalogEntry>,
    user_games: Vec<UserGame>,
    loading: bool,
}

impl GameLibrary {
    /// 创建后处于加载中状态，直到第一次 [`GameLibrary::load`] 完成
    pub fn new(
        store: Arc<dyn GameStore>,
        identity: Arc<dyn IdentityProvider>,
        toasts: NotificationCenter,
    ) -> Self {
        Self {
            store,
            identity,
            toasts,
            catalog: Vec::new(),
            user_games: Vec::new(),
            loading: true,
        }
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn user_games(&self) -> &[UserGame] {
        &self.user_games
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// MPK 游戏页面显示的用户游戏
    pub fn packaged_games(&self) -> Vec<&UserGame> {
        partition_by_kind(&self.user_games).0
    }

    /// 外部游戏页面显示的用户游戏
    pub fn external_games(&self) -> Vec<&UserGame> {
        partition_by_kind(&self.user_games).1
    }

    /// 并发拉取两份列表，两者都结束后才退出加载状态（不论成功与否）
    pub async fn load(&mut self) {
        self.loading = true;
        let (catalog, user_games) = tokio::join!(
            self.store.list_catalog(),
            self.store.list_user_games()
        );
        self.apply_catalog(catalog);
        self.apply_user_games(user_games);
        self.loading = false;
        log::debug!(
            "游戏库加载完成: 目录 {} 条, 用户游戏 {} 条",
            self.catalog.len(),
            self.user_games.len()
        );
    }

    /// 重新拉取目录，成功返回 true
    pub async fn refresh_catalog(&mut self) -> bool {
        let result = self.store.list_catalog().await;
        self.apply_catalog(result)
    }

    /// 重新拉取用户游戏，成功返回 true
    pub async fn refresh_user_games(&mut self) -> bool {
        let result = self.store.list_user_games().await;
        self.apply_user_games(result)
    }

    fn apply_catalog(&mut self, result: Result<Vec<CatalogEntry>, LibraryError>) -> bool {
        match result {
            Ok(entries) => {
                self.catalog = entries;
                true
            }
            Err(e) => {
                log::error!("获取 MPK 游戏目录失败: {}", e);
                self.toasts.error("Error", "Failed to fetch MPK games");
                false
            }
        }
    }

    fn apply_user_games(&mut self, result: Result<Vec<UserGame>, LibraryError>) -> bool {
        match result {
            Ok(games) => {
                self.user_games = games;
                true
            }
            Err(e) => {
                log::error!("获取用户游戏失败: {}", e);
                self.toasts.error("Error", "Failed to fetch user games");
                false
            }
        }
    }

    /// 添加游戏到游戏库
    ///
    /// 需要已登录身份；成功后重新拉取用户游戏列表（替换而非追加）。
    pub async fn add_user_game(&mut self, game: NewUserGame) -> Result<UserGame, LibraryError> {
        match self.insert_as_current_user(game).await {
            Ok(created) => {
                self.refresh_user_games().await;
                self.toasts.info("Success", "Game added to library");
                Ok(created)
            }
            Err(e) => {
                log::error!("添加游戏失败: {}", e);
                self.toasts.error("Error", "Failed to add game to library");
                Err(e)
            }
        }
    }

    async fn insert_as_current_user(&self, game: NewUserGame) -> Result<UserGame, LibraryError> {
        let user = self
            .identity
            .current_user()
            .await?
            .ok_or(LibraryError::Unauthenticated)?;
        self.store.insert_user_game(&user.id, game).await
    }

    /// 导入 .mpk 文件，安装目录位于 `games_root` 下
    pub async fn import_packaged(
        &mut self,
        file: &PickedFile,
        games_root: &Path,
    ) -> Result<UserGame, LibraryError> {
        let game = match import::packaged_entry(file, games_root) {
            Ok(game) => game,
            Err(e) => {
                self.toasts.error(
                    "Invalid File",
                    import::expected_hint(import::PACKAGED_EXTENSIONS),
                );
                return Err(e);
            }
        };

        self.toasts
            .info("Loading MPK Game", format!("Processing {}...", file.name));
        log::info!(
            "选择了 MPK 文件: {} ({} 字节), 目标目录: {}",
            file.name,
            file.size.unwrap_or(0),
            game.install_path.as_deref().unwrap_or_default()
        );
        self.add_user_game(game).await
    }

    /// 导入外部游戏（.exe / .msi / .zip）
    pub async fn import_external(&mut self, file: &PickedFile) -> Result<UserGame, LibraryError> {
        let game = match import::external_entry(file) {
            Ok(game) => game,
            Err(e) => {
                self.toasts.error(
                    "Invalid File",
                    import::expected_hint(import::EXTERNAL_EXTENSIONS),
                );
                return Err(e);
            }
        };
        self.add_user_game(game).await
    }
}
