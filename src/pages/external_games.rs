//! 外部游戏页：电脑上已有的游戏，可扫描目录或手动选择文件添加

use std::path::Path;
use std::sync::Arc;

use crate::database::dto::NewUserGame;
use crate::library::{GameLibrary, PickedFile, UserGame};
use crate::notification::NotificationCenter;
use crate::pages::ListState;
use crate::routes::{Route, Router};
use crate::utils::launch::{GameLauncher, LaunchResult};
use crate::utils::scan::{GameScanner, ScannedGame};

pub struct ExternalGamesPage {
    launcher: Arc<dyn GameLauncher>,
    scanner: Arc<dyn GameScanner>,
    toasts: NotificationCenter,
    candidates: Vec<ScannedGame>,
}

impl ExternalGamesPage {
    pub fn new(
        launcher: Arc<dyn GameLauncher>,
        scanner: Arc<dyn GameScanner>,
        toasts: NotificationCenter,
    ) -> Self {
        Self {
            launcher,
            scanner,
            toasts,
            candidates: Vec::new(),
        }
    }

    pub fn games<'a>(&self, library: &'a GameLibrary) -> Vec<&'a UserGame> {
        library.external_games()
    }

    pub fn games_state(&self, library: &GameLibrary) -> ListState {
        ListState::of(library.is_loading(), library.external_games().len())
    }

    /// 最近一次扫描得到、尚未添加的候选游戏
    pub fn candidates(&self) -> &[ScannedGame] {
        &self.candidates
    }

    pub fn back(&self, router: &mut Router) {
        router.navigate(Route::Game);
    }

    /// 在后台线程扫描目录，结果替换当前候选列表
    pub async fn scan(&mut self, root: &Path) -> usize {
        log::info!("Scanning PC for games: {}", root.display());
        let scanner = self.scanner.clone();
        let owned_root = root.to_path_buf();
        let result = tokio::task::spawn_blocking(move || scanner.scan(&owned_root))
            .await
            .map_err(|e| format!("扫描任务失败: {}", e))
            .and_then(|r| r);

        match result {
            Ok(found) => {
                self.candidates = found;
                self.toasts.info(
                    "Scan Complete",
                    format!("Found {} games", self.candidates.len()),
                );
                self.candidates.len()
            }
            Err(e) => {
                log::error!("扫描游戏失败: {}", e);
                self.toasts.error("Scan Failed", e);
                0
            }
        }
    }

    /// 添加第 `index` 个候选游戏，成功后从候选列表移除
    pub async fn add_candidate(
        &mut self,
        library: &mut GameLibrary,
        index: usize,
    ) -> Option<UserGame> {
        let candidate = self.candidates.get(index)?.clone();
        let Some(executable) = &candidate.executable else {
            self.toasts.error(
                "Invalid File",
                format!("No executable found in {}", candidate.path.display()),
            );
            return None;
        };

        let game = NewUserGame::external(candidate.name.clone(), executable.to_string_lossy());
        let added = library.add_user_game(game).await.ok()?;
        self.candidates.remove(index);
        Some(added)
    }

    /// 手动选择的 .exe / .msi / .zip 文件
    pub async fn add_file(&self, library: &mut GameLibrary, file: &PickedFile) -> Option<UserGame> {
        library.import_external(file).await.ok()
    }

    pub async fn play(&self, game: &UserGame) -> Result<LaunchResult, String> {
        log::info!(
            "Launching game: {} from {}",
            game.game_name,
            game.file_path.as_deref().unwrap_or_default()
        );
        self.toasts
            .info("Launching Game", format!("Starting {}...", game.game_name));

        self.launcher.launch(game).await.inspect_err(|e| {
            log::error!("启动 {} 失败: {}", game.game_name, e);
            self.toasts.error("Launch Failed", e.clone());
        })
    }
}
