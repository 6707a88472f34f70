//! 数据传输对象 (DTO)
//!
//! 用于前后端数据交互的结构定义。

use crate::entity::user_games::GameKind;
use serde::{Deserialize, Serialize};

/// 用于插入用户游戏的数据结构
///
/// 不包含 id / user_id / created_at，这三个字段在插入时生成
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewUserGame {
    pub game_name: String,
    pub game_type: GameKind,
    pub file_path: Option<String>,
    pub install_path: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub is_installed: bool,
}

impl NewUserGame {
    /// 外部游戏：直接指向用户选择的可执行文件
    pub fn external(name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            game_name: name.into(),
            game_type: GameKind::External,
            file_path: Some(file_path.into()),
            install_path: None,
            thumbnail_url: None,
            is_installed: true,
        }
    }

    /// MPK 游戏：记录 .mpk 文件与目标安装目录，尚未解包
    pub fn packaged(
        name: impl Into<String>,
        file_path: impl Into<String>,
        install_path: impl Into<String>,
    ) -> Self {
        Self {
            game_name: name.into(),
            game_type: GameKind::Packaged,
            file_path: Some(file_path.into()),
            install_path: Some(install_path.into()),
            thumbnail_url: None,
            is_installed: false,
        }
    }
}
