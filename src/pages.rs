//! 页面视图模型
//!
//! 每个页面只保存自己的交互状态，游戏库、路由等共享对象由调用方传入。

pub mod external_games;
pub mod game;
pub mod landing;
pub mod packaged_games;

pub use external_games::ExternalGamesPage;
pub use game::{GamePage, GameStatus};
pub use landing::LandingPage;
pub use packaged_games::PackagedGamesPage;

use serde::{Deserialize, Serialize};

/// 列表区域的显示状态
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListState {
    Loading,
    Empty,
    Populated(usize),
}

impl ListState {
    pub fn of(loading: bool, len: usize) -> Self {
        match (loading, len) {
            (true, _) => ListState::Loading,
            (false, 0) => ListState::Empty,
            (false, n) => ListState::Populated(n),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::library::UserGame;
    use crate::utils::launch::{GameLauncher, LaunchResult};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// 记录启动请求，可设置为失败
    #[derive(Default)]
    pub(crate) struct RecordingLauncher {
        pub launched: Mutex<Vec<String>>,
        pub fail: bool,
    }

    #[async_trait]
    impl GameLauncher for RecordingLauncher {
        async fn launch(&self, game: &UserGame) -> Result<LaunchResult, String> {
            if self.fail {
                return Err("no such file".to_string());
            }
            self.launched.lock().push(game.id.clone());
            Ok(LaunchResult {
                success: true,
                message: format!("started {}", game.game_name),
                process_id: Some(42),
            })
        }
    }

    #[test]
    fn list_state_prefers_loading() {
        assert_eq!(ListState::of(true, 3), ListState::Loading);
        assert_eq!(ListState::of(false, 0), ListState::Empty);
        assert_eq!(ListState::of(false, 2), ListState::Populated(2));
    }
}
