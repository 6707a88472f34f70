//! 游戏库基础表结构
//!
//! 1. catalog 表：可下载的 MPK 游戏目录（本程序只读）
//! 2. user_games 表：用户自行添加的游戏（外部游戏 / MPK 游戏）

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. 目录表
        manager
            .create_table(
                Table::create()
                    .table(Catalog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Catalog::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Catalog::Name).text().not_null())
                    .col(ColumnDef::new(Catalog::Description).text().null())
                    .col(ColumnDef::new(Catalog::DownloadUrl).text().not_null())
                    .col(ColumnDef::new(Catalog::FileSize).big_integer().null())
                    .col(ColumnDef::new(Catalog::Version).text().null())
                    .col(ColumnDef::new(Catalog::ThumbnailUrl).text().null())
                    .col(ColumnDef::new(Catalog::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 2. 用户游戏表
        manager
            .create_table(
                Table::create()
                    .table(UserGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserGames::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserGames::UserId).text().not_null())
                    .col(ColumnDef::new(UserGames::GameName).text().not_null())
                    .col(ColumnDef::new(UserGames::GameType).text().not_null())
                    .col(ColumnDef::new(UserGames::FilePath).text().null())
                    .col(ColumnDef::new(UserGames::InstallPath).text().null())
                    .col(ColumnDef::new(UserGames::ThumbnailUrl).text().null())
                    .col(
                        ColumnDef::new(UserGames::IsInstalled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(UserGames::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 3. 按创建时间倒序列出是唯一的查询方式
        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_created_at")
                    .table(Catalog::Table)
                    .col(Catalog::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_games_created_at")
                    .table(UserGames::Table)
                    .col(UserGames::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserGames::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Catalog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Catalog {
    Table,
    Id,
    Name,
    Description,
    DownloadUrl,
    FileSize,
    Version,
    ThumbnailUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserGames {
    Table,
    Id,
    UserId,
    GameName,
    GameType,
    FilePath,
    InstallPath,
    ThumbnailUrl,
    IsInstalled,
    CreatedAt,
}
