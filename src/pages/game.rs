//! 游戏主页：服务器状态、功能入口、MPK 导入和聊天弹窗

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use url::Url;

use crate::chat::{ChatPopup, ChatTransport};
use crate::config::AppConfig;
use crate::library::{GameLibrary, PickedFile, UserGame};
use crate::notification::NotificationCenter;
use crate::routes::{Route, Router};
use crate::utils::open::UrlOpener;
use crate::utils::status::ServerStatus;

/// 状态卡片显示的游戏状态
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Connecting,
    Ready,
    Unavailable,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Connecting => "Connecting...",
            GameStatus::Ready => "Ready to Play",
            GameStatus::Unavailable => "Server Unavailable",
        }
    }
}

pub struct GamePage<T: ChatTransport> {
    config: AppConfig,
    opener: Arc<dyn UrlOpener>,
    toasts: NotificationCenter,
    status: watch::Receiver<ServerStatus>,
    last_answer: Option<ServerStatus>,
    games_root: PathBuf,
    pub chat: ChatPopup<T>,
}

impl<T: ChatTransport> GamePage<T> {
    pub fn new(
        config: AppConfig,
        opener: Arc<dyn UrlOpener>,
        toasts: NotificationCenter,
        status: watch::Receiver<ServerStatus>,
        games_root: PathBuf,
        chat: ChatPopup<T>,
    ) -> Self {
        Self {
            config,
            opener,
            toasts,
            status,
            last_answer: None,
            games_root,
            chat,
        }
    }

    /// 服务器状态卡片：直接显示最新探测状态
    pub fn server_status(&self) -> ServerStatus {
        *self.status.borrow()
    }

    /// 第一次探测有结果之前为 Connecting，之后保持最近一次结果
    pub fn game_status(&mut self) -> GameStatus {
        let current = *self.status.borrow();
        if current != ServerStatus::Checking {
            self.last_answer = Some(current);
        }
        match self.last_answer {
            None => GameStatus::Connecting,
            Some(ServerStatus::Online) => GameStatus::Ready,
            Some(_) => GameStatus::Unavailable,
        }
    }

    pub fn back(&self, router: &mut Router) {
        router.navigate(Route::Landing);
    }

    pub async fn open_chat(&mut self) {
        self.chat.open().await;
    }

    pub fn browse_store(&self) {
        self.open_configured(self.config.store_url(), "store");
    }

    pub fn my_library(&self) {
        self.open_configured(self.config.library_url(), "library");
    }

    pub fn launch_minecraft(&self) {
        self.open_configured(self.config.launch_url(), "game");
    }

    pub fn add_external_games(&self, router: &mut Router) {
        router.navigate(Route::ExternalGames);
    }

    /// 选择 .mpk 文件后导入到游戏库
    pub async fn load_mpk(&self, library: &mut GameLibrary, file: &PickedFile) -> Option<UserGame> {
        match library.import_packaged(file, &self.games_root).await {
            Ok(game) => {
                self.toasts.info(
                    "MPK Game Loaded",
                    format!("{} added to .MPK_games folder", file.name),
                );
                Some(game)
            }
            Err(e) => {
                log::warn!("导入 MPK 文件 {} 失败: {}", file.name, e);
                None
            }
        }
    }

    fn open_configured(&self, url: Result<Url, String>, what: &str) {
        let result = url.and_then(|url| self.opener.open(&url));
        if let Err(e) = result {
            log::error!("打开 {} 失败: {}", what, e);
            self.toasts.error("Error", format!("Failed to open {}", what));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::LocalTransport;
    use crate::library::tests::{signed_in, FakeStore};
    use crate::library::GameKind;
    use crate::utils::open::tests::RecordingOpener;

    fn page(
        config: AppConfig,
    ) -> (
        GamePage<LocalTransport>,
        watch::Sender<ServerStatus>,
        Arc<RecordingOpener>,
        NotificationCenter,
    ) {
        let (tx, rx) = watch::channel(ServerStatus::Checking);
        let opener = Arc::new(RecordingOpener::default());
        let toasts = NotificationCenter::new();
        let chat = ChatPopup::new(LocalTransport::with_demo_friends(), toasts.clone());
        let page = GamePage::new(
            config,
            opener.clone(),
            toasts.clone(),
            rx,
            PathBuf::from("/home/u/.MPK_games"),
            chat,
        );
        (page, tx, opener, toasts)
    }

    #[test]
    fn status_follows_first_answer() {
        let (mut page, tx, _, _) = page(AppConfig::default());
        assert_eq!(page.game_status(), GameStatus::Connecting);

        tx.send(ServerStatus::Online).unwrap();
        assert_eq!(page.game_status(), GameStatus::Ready);

        // 下一轮探测进行中，保持上一次结果
        tx.send(ServerStatus::Checking).unwrap();
        assert_eq!(page.game_status(), GameStatus::Ready);
        assert_eq!(page.server_status().label(), "CHECKING...");

        tx.send(ServerStatus::Offline).unwrap();
        assert_eq!(page.game_status(), GameStatus::Unavailable);
    }

    #[test]
    fn actions_open_configured_urls_and_navigate() {
        let (page, _tx, opener, toasts) = page(AppConfig::default());
        page.browse_store();
        page.my_library();

        let mut router = Router::new();
        router.navigate(Route::Game);
        page.add_external_games(&mut router);
        assert_eq!(router.current(), Route::ExternalGames);
        page.back(&mut router);
        assert_eq!(router.current(), Route::Landing);

        assert_eq!(
            *opener.opened.lock(),
            vec![
                "https://store.steampowered.com/".to_string(),
                "https://steamcommunity.com/my/games/".to_string(),
            ]
        );
        assert!(toasts.is_empty());
    }

    #[test]
    fn broken_launch_url_is_reported() {
        let config = AppConfig {
            launch_url: "not a url".to_string(),
            ..Default::default()
        };
        let (page, _tx, opener, toasts) = page(config);
        page.launch_minecraft();

        assert!(opener.opened.lock().is_empty());
        let toast = toasts.latest().unwrap();
        assert!(toast.is_destructive());
        assert_eq!(toast.description, "Failed to open game");
    }

    #[tokio::test]
    async fn load_mpk_adds_packaged_game() {
        let (page, _tx, _, toasts) = page(AppConfig::default());
        let store = Arc::new(FakeStore::default());
        let mut library = GameLibrary::new(store.clone(), signed_in(), toasts.clone());

        let added = page
            .load_mpk(&mut library, &PickedFile::new("/dl/Sky.mpk"))
            .await
            .unwrap();
        assert_eq!(added.game_type, GameKind::Packaged);
        assert_eq!(library.packaged_games().len(), 1);
        assert_eq!(toasts.latest().unwrap().title, "MPK Game Loaded");

        assert!(page
            .load_mpk(&mut library, &PickedFile::new("/dl/Sky.zip"))
            .await
            .is_none());
        assert_eq!(toasts.latest().unwrap().title, "Invalid File");
    }
}
