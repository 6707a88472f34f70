//! 游戏目录仓库（只读）

use crate::entity::catalog;
use crate::entity::prelude::*;
use sea_orm::*;

/// 游戏目录仓库
pub struct CatalogRepository;

impl CatalogRepository {
    /// 获取所有目录条目，按创建时间倒序
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<catalog::Model>, DbErr> {
        Catalog::find()
            .order_by_desc(catalog::Column::CreatedAt)
            .all(db)
            .await
    }

    /// 根据 ID 查询目录条目
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: &str,
    ) -> Result<Option<catalog::Model>, DbErr> {
        Catalog::find_by_id(id.to_string()).one(db).await
    }

    /// 获取目录条目总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Catalog::find().count(db).await
    }
}
