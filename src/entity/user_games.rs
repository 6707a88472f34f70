//! 用户游戏实体
//!
//! user_games 表保存用户添加到游戏库中的游戏，按 game_type 分为外部游戏和 MPK 游戏两类。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 游戏类型，决定游戏出现在哪个游戏库页面
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum GameKind {
    /// 任意可执行文件
    #[sea_orm(string_value = "external")]
    #[serde(rename = "external")]
    External,
    /// Magtinum 自有的 .mpk 打包格式
    #[sea_orm(string_value = "mpk")]
    #[serde(rename = "mpk")]
    Packaged,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    /// 所属用户 ID，插入时由当前登录身份注入
    #[sea_orm(column_type = "Text")]
    pub user_id: String,
    #[sea_orm(column_type = "Text")]
    pub game_name: String,
    pub game_type: GameKind,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_path: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub install_path: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub thumbnail_url: Option<String>,
    pub is_installed: bool,
    /// 毫秒时间戳
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
