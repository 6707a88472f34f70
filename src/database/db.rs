use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ==================== 数据库连接管理 ====================

/// Establish a SeaORM database connection.
pub async fn establish_connection(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    // 1. 如果数据库不存在，创建目录
    if !db_path.exists() {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DbErr::Conn(RuntimeErr::Internal(format!("无法创建数据库目录: {}", e)))
            })?;
        }
        log::info!("首次启动，创建数据库: {}", db_path.display());
    } else {
        log::info!("使用数据库: {}", db_path.display());
    }

    // 2. 使用 `url` crate 安全地构建连接字符串
    let db_url = Url::from_file_path(db_path).map_err(|_| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path: {}",
            db_path.display()
        )))
    })?;

    let connection_string = format!("sqlite:{}?mode=rwc", db_url.path());
    connect_with(connection_string).await
}

/// 建立内存数据库连接
///
/// 连接池只有一个连接，否则每个连接都会看到各自独立的内存数据库
pub async fn connect_in_memory() -> Result<DatabaseConnection, DbErr> {
    connect_with("sqlite::memory:".to_string()).await
}

async fn connect_with(connection_string: String) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(connection_string);
    options
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// 执行数据库迁移
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<(), DbErr> {
    log::info!("开始执行数据库迁移...");
    Migrator::up(conn, None).await?;
    log::info!("数据库迁移完成");
    Ok(())
}

/// 建立连接并执行迁移
pub async fn open(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    let conn = establish_connection(db_path).await?;
    run_migrations(&conn).await?;
    Ok(conn)
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repository::user_games_repository::UserGamesRepository;

    #[tokio::test]
    async fn file_database_is_created_and_migrated() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("magtinum.db");

        let conn = open(&db_path).await.unwrap();
        assert!(db_path.exists());
        assert_eq!(UserGamesRepository::count(&conn).await.unwrap(), 0);

        close_connection(conn).await.unwrap();
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let conn = connect_in_memory().await.unwrap();
        run_migrations(&conn).await.unwrap();
        run_migrations(&conn).await.unwrap();
    }
}
