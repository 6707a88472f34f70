//! 预导入模块
//!
//! 提供常用类型的快捷导入。

pub use super::catalog::Entity as Catalog;
pub use super::user_games::Entity as UserGames;
pub use super::user_games::GameKind;
