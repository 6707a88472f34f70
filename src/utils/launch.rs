use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::library::{GameKind, UserGame};
use crate::utils::scan::find_executable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchResult {
    pub success: bool,
    pub message: String,
    pub process_id: Option<u32>,
}

/// 启动游戏的协作者
#[async_trait]
pub trait GameLauncher: Send + Sync {
    async fn launch(&self, game: &UserGame) -> Result<LaunchResult, String>;
}

/// 直接创建子进程启动游戏
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GameLauncher for ProcessLauncher {
    async fn launch(&self, game: &UserGame) -> Result<LaunchResult, String> {
        let target = launch_target(game)?;
        log::info!("启动游戏 {}: {}", game.game_name, target.display());
        spawn_game(&target, &[])
    }
}

/// 外部游戏启动选中的文件；MPK 游戏启动安装目录中的可执行文件
pub fn launch_target(game: &UserGame) -> Result<PathBuf, String> {
    match game.game_type {
        GameKind::External => game
            .file_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| format!("游戏 {} 没有可执行文件路径", game.game_name)),
        GameKind::Packaged => {
            let install_dir = game
                .install_path
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| format!("游戏 {} 没有安装目录", game.game_name))?;

            if install_dir.is_file() {
                return Ok(install_dir);
            }
            if !install_dir.is_dir() {
                return Err(format!(
                    "游戏 {} 尚未安装: {}",
                    game.game_name,
                    install_dir.display()
                ));
            }
            find_executable(&install_dir).ok_or_else(|| {
                format!("安装目录中没有找到可执行文件: {}", install_dir.display())
            })
        }
    }
}

/// 启动可执行文件，工作目录为其所在目录
pub fn spawn_game(game_path: &Path, args: &[String]) -> Result<LaunchResult, String> {
    let game_dir = game_path
        .parent()
        .ok_or_else(|| "无法获取游戏目录路径".to_string())?;
    let exe_name = game_path
        .file_name()
        .ok_or_else(|| "无法获取游戏可执行文件名".to_string())?
        .to_string_lossy()
        .into_owned();

    let mut command = build_command(game_path, &exe_name);
    command.current_dir(game_dir);
    command.args(args);

    match command.spawn() {
        Ok(child) => {
            let process_id = child.id();
            log::info!("游戏进程已启动: {} (pid {})", exe_name, process_id);
            Ok(LaunchResult {
                success: true,
                message: format!("成功启动游戏: {}，工作目录: {:?}", exe_name, game_dir),
                process_id: Some(process_id),
            })
        }
        Err(e) => {
            log::error!("启动游戏失败: {} ({})", game_path.display(), e);
            Err(format!("启动游戏失败: {}", e))
        }
    }
}

#[cfg(target_os = "linux")]
fn build_command(game_path: &Path, exe_name: &str) -> Command {
    if exe_name.to_lowercase().ends_with(".exe") {
        // Windows 可执行文件需要使用 wine 启动
        let mut command = Command::new("wine");
        if std::env::var("WAYLAND_DISPLAY").is_ok() {
            command.env("DISPLAY", "");
        }
        command.stdout(std::process::Stdio::null());
        command.stderr(std::process::Stdio::null());
        command.arg(game_path);
        command
    } else {
        Command::new(game_path)
    }
}

#[cfg(not(target_os = "linux"))]
fn build_command(game_path: &Path, _exe_name: &str) -> Command {
    Command::new(game_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::tests::user_game;

    #[test]
    fn external_game_launches_its_file() {
        let mut game = user_game("g1", GameKind::External);
        game.file_path = Some("/games/doom/doom.exe".to_string());
        assert_eq!(
            launch_target(&game).unwrap(),
            PathBuf::from("/games/doom/doom.exe")
        );

        game.file_path = None;
        assert!(launch_target(&game).is_err());
    }

    #[test]
    fn packaged_game_needs_an_install_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = user_game("g2", GameKind::Packaged);
        game.install_path = Some(dir.path().join("missing").to_string_lossy().into_owned());
        assert!(launch_target(&game).unwrap_err().contains("尚未安装"));

        let install = dir.path().join("race");
        std::fs::create_dir_all(&install).unwrap();
        std::fs::write(install.join("race.exe"), b"").unwrap();
        game.install_path = Some(install.to_string_lossy().into_owned());
        assert_eq!(launch_target(&game).unwrap(), install.join("race.exe"));
    }

    #[test]
    fn spawn_reports_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing-here");
        assert!(spawn_game(&missing, &[]).is_err());
    }
}
