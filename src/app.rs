//! 应用组装：启动时建立所有共享对象，退出时按顺序释放

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::SessionIdentity;
use crate::chat::{ChatPopup, LocalTransport};
use crate::config::AppConfig;
use crate::database::{db, DbGameStore};
use crate::library::GameLibrary;
use crate::notification::NotificationCenter;
use crate::pages::{ExternalGamesPage, GamePage, LandingPage, PackagedGamesPage};
use crate::routes::Router;
use crate::settings::{LocalStorage, SettingsManager, SettingsPanel};
use crate::utils::launch::ProcessLauncher;
use crate::utils::open::SystemOpener;
use crate::utils::scan::DirectoryScanner;
use crate::utils::status::{StatusMonitor, TcpStatusProbe};

pub struct App {
    pub config: AppConfig,
    pub toasts: NotificationCenter,
    pub identity: Arc<SessionIdentity>,
    pub library: GameLibrary,
    pub settings: SettingsPanel,
    pub router: Router,
    pub landing: LandingPage,
    pub game: GamePage<LocalTransport>,
    pub packaged_games: PackagedGamesPage,
    pub external_games: ExternalGamesPage,
    status: StatusMonitor,
    db: DatabaseConnection,
}

impl App {
    /// 使用数据目录 `base_dir` 启动，MPK 游戏安装在 `games_root`
    ///
    /// 必须在 tokio 运行时中调用
    pub async fn bootstrap(base_dir: &Path, games_root: PathBuf) -> Result<Self, String> {
        let config = AppConfig::load(&magtinum_path::config_path_in(base_dir))?;

        let db = db::open(&magtinum_path::db_path_in(base_dir))
            .await
            .map_err(|e| format!("数据库初始化失败: {}", e))?;
        log::info!("数据库连接建立成功");

        let storage = Arc::new(LocalStorage::open(magtinum_path::storage_path_in(base_dir))?);
        let toasts = NotificationCenter::new();
        let settings = SettingsPanel::new(SettingsManager::load(storage), toasts.clone());

        let identity = Arc::new(SessionIdentity::new());
        let store = Arc::new(DbGameStore::new(db.clone()));
        let mut library = GameLibrary::new(store, identity.clone(), toasts.clone());
        library.load().await;

        let probe = Arc::new(TcpStatusProbe::new(
            config.status_addr.clone(),
            config.probe_timeout(),
        ));
        let status = StatusMonitor::spawn(probe, config.status_interval());

        let opener = Arc::new(SystemOpener);
        let launcher = Arc::new(ProcessLauncher::new());
        let scanner = Arc::new(DirectoryScanner::new(config.scan_max_depth));

        let chat = ChatPopup::new(LocalTransport::with_demo_friends(), toasts.clone());
        let game = GamePage::new(
            config.clone(),
            opener.clone(),
            toasts.clone(),
            status.subscribe(),
            games_root,
            chat,
        );

        Ok(Self {
            landing: LandingPage::new(opener),
            packaged_games: PackagedGamesPage::new(launcher.clone(), toasts.clone()),
            external_games: ExternalGamesPage::new(launcher, scanner, toasts.clone()),
            router: Router::new(),
            config,
            toasts,
            identity,
            library,
            settings,
            game,
            status,
            db,
        })
    }

    pub fn status_monitor(&self) -> &StatusMonitor {
        &self.status
    }

    /// 退出：按设置清除浏览数据，然后关闭数据库连接
    pub async fn shutdown(self) {
        self.settings.manager().on_exit();
        drop(self.status);
        match db::close_connection(self.db).await {
            Ok(_) => log::info!("数据库连接已成功关闭"),
            Err(e) => log::error!("关闭数据库连接时出错: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Identity;
    use crate::library::PickedFile;
    use crate::settings::{SettingChange, SETTINGS_KEY};

    fn offline_config(base: &Path) {
        let config = AppConfig {
            status_addr: "127.0.0.1:1".to_string(),
            probe_timeout_ms: 200,
            ..Default::default()
        };
        config.save(&magtinum_path::config_path_in(base)).unwrap();
    }

    #[tokio::test]
    async fn bootstrap_import_and_restart() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("data");
        let games_root = dir.path().join(".MPK_games");
        offline_config(&base);

        let mut app = App::bootstrap(&base, games_root.clone()).await.unwrap();
        assert!(!app.library.is_loading());
        assert_eq!(app.config.status_addr, "127.0.0.1:1");

        app.identity.sign_in(Identity {
            id: "user-1".to_string(),
            email: None,
        });
        let added = app
            .game
            .load_mpk(&mut app.library, &PickedFile::new("/dl/Orbit.mpk"))
            .await
            .unwrap();
        assert_eq!(
            added.install_path.as_deref(),
            Some(games_root.join("Orbit").to_string_lossy().as_ref())
        );
        app.settings.change(SettingChange::DarkMode(true));
        app.shutdown().await;

        let app = App::bootstrap(&base, games_root).await.unwrap();
        assert_eq!(app.library.packaged_games().len(), 1);
        assert!(app.settings.settings().dark_mode);
        app.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_clears_data_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_path_buf();
        offline_config(&base);

        let mut app = App::bootstrap(&base, dir.path().join("games")).await.unwrap();
        app.settings.change(SettingChange::ClearDataOnExit(true));
        let storage = app.settings.manager().storage().clone();
        storage.set_item("history", "[]").unwrap();
        app.shutdown().await;

        assert_eq!(storage.keys(), vec![SETTINGS_KEY.to_string()]);
    }
}
