use std::path::{Path, PathBuf};

/// 数据相关路径常量
pub const DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "magtinum.db";
pub const STORAGE_FILE_NAME: &str = "local_storage.json";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const RESOURCE_DIR: &str = "resources";
/// MPK 游戏的安装目录（位于用户主目录下）
pub const PACKAGED_GAMES_DIR: &str = ".MPK_games";

/// 覆盖数据目录的环境变量
pub const DATA_DIR_ENV: &str = "MAGTINUM_DATA_DIR";

/// 判断是否处于便携模式
///
/// 检测逻辑：检查可执行文件同级目录下是否存在 resources/data/magtinum.db
pub fn is_portable_mode() -> bool {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let portable_data_dir = exe_dir.join(RESOURCE_DIR).join(DATA_DIR);
            let portable_db_file = portable_data_dir.join(DB_FILE_NAME);
            return portable_data_dir.exists() && portable_db_file.exists();
        }
    }
    false
}

/// 获取基础数据目录
///
/// 优先级：环境变量 > 便携模式 > 系统应用数据目录
pub fn get_base_data_dir() -> Result<PathBuf, String> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    get_base_data_dir_for_mode(is_portable_mode())
}

/// 获取指定模式的基础数据目录
pub fn get_base_data_dir_for_mode(portable: bool) -> Result<PathBuf, String> {
    if portable {
        let exe_path =
            std::env::current_exe().map_err(|e| format!("无法获取可执行文件路径: {}", e))?;
        let exe_dir = exe_path
            .parent()
            .ok_or_else(|| "无法获取可执行文件父目录".to_string())?;
        Ok(exe_dir.join(RESOURCE_DIR))
    } else {
        get_system_data_dir()
    }
}

/// 获取系统数据目录（跨平台）
fn get_system_data_dir() -> Result<PathBuf, String> {
    use directories::BaseDirs;

    let base_dirs = BaseDirs::new().ok_or_else(|| "无法获取系统目录信息".to_string())?;

    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        Ok(base_dirs.data_dir().join("com.magtinum.app"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Ok(base_dirs.data_dir().join("magtinum"))
    }
}

/// 数据库文件路径
pub fn db_path_in(base: &Path) -> PathBuf {
    base.join(DATA_DIR).join(DB_FILE_NAME)
}

/// 本地存储文件路径
pub fn storage_path_in(base: &Path) -> PathBuf {
    base.join(DATA_DIR).join(STORAGE_FILE_NAME)
}

/// 配置文件路径
pub fn config_path_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE_NAME)
}

/// 获取 MPK 游戏根目录 (~/.MPK_games)
pub fn get_packaged_games_dir() -> Result<PathBuf, String> {
    use directories::BaseDirs;

    let base_dirs = BaseDirs::new().ok_or_else(|| "无法获取系统目录信息".to_string())?;
    Ok(base_dirs.home_dir().join(PACKAGED_GAMES_DIR))
}

/// 计算 MPK 游戏的安装目录：<root>/<文件名去掉 .mpk 后缀>
pub fn packaged_install_dir(root: &Path, file_name: &str) -> PathBuf {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    root.join(stem)
}
