//! 文件选择结果 -> 待插入的游戏记录
//!
//! 只检查扩展名并计算路径，文件内容从不读取。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::LibraryError;
use crate::database::dto::NewUserGame;

pub const PACKAGED_EXTENSIONS: &[&str] = &["mpk"];
pub const EXTERNAL_EXTENSIONS: &[&str] = &["exe", "msi", "zip"];

/// 用户通过文件选择器选中的文件
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: Option<u64>,
}

impl PickedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = std::fs::metadata(&path).ok().map(|m| m.len());
        Self { name, path, size }
    }

    /// 小写扩展名（不含点）
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// 去掉扩展名的文件名，用作游戏名
    pub fn stem(&self) -> String {
        Path::new(&self.name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn has_extension(&self, allowed: &[&str]) -> bool {
        self.extension()
            .map(|ext| allowed.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

fn expected_list(allowed: &[&str]) -> String {
    let dotted: Vec<String> = allowed.iter().map(|e| format!(".{}", e)).collect();
    match dotted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

/// "Please select a ..." 提示文字
pub fn expected_hint(allowed: &[&str]) -> String {
    format!("Please select a {} file", expected_list(allowed))
}

fn check_extension(file: &PickedFile, allowed: &[&str]) -> Result<(), LibraryError> {
    if file.has_extension(allowed) {
        Ok(())
    } else {
        Err(LibraryError::InvalidFile {
            file_name: file.name.clone(),
            expected: expected_list(allowed),
        })
    }
}

/// MPK 游戏：安装目录为 <games_root>/<文件名>，尚未解包
pub fn packaged_entry(file: &PickedFile, games_root: &Path) -> Result<NewUserGame, LibraryError> {
    check_extension(file, PACKAGED_EXTENSIONS)?;
    let install_dir = magtinum_path::packaged_install_dir(games_root, &file.name);
    Ok(NewUserGame::packaged(
        file.stem(),
        file.path.to_string_lossy(),
        install_dir.to_string_lossy(),
    ))
}

/// 外部游戏：直接指向选中的文件
pub fn external_entry(file: &PickedFile) -> Result<NewUserGame, LibraryError> {
    check_extension(file, EXTERNAL_EXTENSIONS)?;
    Ok(NewUserGame::external(
        file.stem(),
        file.path.to_string_lossy(),
    ))
}
