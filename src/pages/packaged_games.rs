//! MPK 游戏页：已添加的 MPK 游戏和可下载的目录

use std::sync::Arc;

use crate::library::{CatalogEntry, GameLibrary, UserGame};
use crate::notification::NotificationCenter;
use crate::pages::ListState;
use crate::routes::{Route, Router};
use crate::utils::launch::{GameLauncher, LaunchResult};

pub struct PackagedGamesPage {
    launcher: Arc<dyn GameLauncher>,
    toasts: NotificationCenter,
}

impl PackagedGamesPage {
    pub fn new(launcher: Arc<dyn GameLauncher>, toasts: NotificationCenter) -> Self {
        Self { launcher, toasts }
    }

    pub fn installed<'a>(&self, library: &'a GameLibrary) -> Vec<&'a UserGame> {
        library.packaged_games()
    }

    pub fn installed_state(&self, library: &GameLibrary) -> ListState {
        ListState::of(library.is_loading(), library.packaged_games().len())
    }

    pub fn catalog_state(&self, library: &GameLibrary) -> ListState {
        ListState::of(library.is_loading(), library.catalog().len())
    }

    pub fn back(&self, router: &mut Router) {
        router.navigate(Route::Game);
    }

    pub async fn play(&self, game: &UserGame) -> Result<LaunchResult, String> {
        log::info!(
            "Launching MPK game: {} from {}",
            game.game_name,
            game.install_path.as_deref().unwrap_or_default()
        );
        self.toasts
            .info("Launching Game", format!("Starting {}...", game.game_name));

        self.launcher.launch(game).await.inspect_err(|e| {
            log::error!("启动 {} 失败: {}", game.game_name, e);
            self.toasts.error("Launch Failed", e.clone());
        })
    }

    /// 只记录日志并提示，不实际下载
    pub fn download(&self, entry: &CatalogEntry) {
        log::info!(
            "Downloading MPK game: {} from {}",
            entry.name,
            entry.download_url
        );
        self.toasts
            .info("Download Started", format!("Downloading {}...", entry.name));
    }
}
