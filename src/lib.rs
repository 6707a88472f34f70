pub mod app;
pub mod auth;
pub mod chat;
pub mod config;
pub mod database;
pub mod entity;
pub mod library;
pub mod notification;
pub mod pages;
pub mod routes;
pub mod settings;
pub mod utils;

use app::App;
use auth::Identity;
use utils::logs::init_logger;

/// 设置后以该用户身份启动
pub const USER_ENV: &str = "MAGTINUM_USER_ID";

/// 启动应用，直到收到 Ctrl+C
pub async fn run() -> Result<(), String> {
    init_logger();

    let base_dir = magtinum_path::get_base_data_dir()?;
    let games_root = magtinum_path::get_packaged_games_dir()?;
    log::info!(
        "数据目录: {} (便携模式: {})",
        base_dir.display(),
        magtinum_path::is_portable_mode()
    );

    let app = App::bootstrap(&base_dir, games_root).await?;

    if let Ok(user_id) = std::env::var(USER_ENV) {
        app.identity.sign_in(Identity {
            id: user_id,
            email: None,
        });
    }

    log::info!(
        "游戏库已加载: MPK 游戏目录 {} 条, 用户游戏 {} 条 (MPK {}, 外部 {})",
        app.library.catalog().len(),
        app.library.user_games().len(),
        app.library.packaged_games().len(),
        app.library.external_games().len()
    );
    log::info!("当前页面: {}", app.router.current().path());

    let mut status = app.status_monitor().subscribe();
    let mut shutdown = std::pin::pin!(tokio::signal::ctrl_c());
    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    log::error!("监听退出信号失败: {}", e);
                }
                break;
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = *status.borrow_and_update();
                log::debug!("服务器状态: {}", current.label());
            }
        }
    }

    log::info!("正在退出...");
    app.shutdown().await;
    Ok(())
}
