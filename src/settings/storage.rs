//! 本地键值存储
//!
//! 字符串键 -> 字符串值，整体保存为一个 JSON 文件；每次写入都会落盘。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

#[derive(Debug)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, String>>,
}

impl LocalStorage {
    /// 打开（或新建）存储文件
    ///
    /// 文件内容损坏时从空存储开始，不会覆盖原文件，直到下一次写入
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| format!("无法读取本地存储 {}: {}", path.display(), e))?;
            match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("本地存储已损坏，使用空存储: {} ({})", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// 不落盘的存储
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: impl Into<String>) -> Result<(), String> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.into());
        self.flush(&entries)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// 删除 `keep` 以外的所有键，返回删除的数量
    pub fn retain_only(&self, keep: &[&str]) -> Result<usize, String> {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| keep.contains(&key.as_str()));
        let removed = before - entries.len();
        if removed > 0 {
            self.flush(&entries)?;
        }
        Ok(removed)
    }

    /// 先写临时文件再重命名，避免写到一半时留下损坏的文件
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("无法创建存储目录: {}", e))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("序列化本地存储失败: {}", e))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| format!("写入本地存储失败: {}", e))?;
        fs::rename(&tmp, path).map_err(|e| format!("替换本地存储文件失败: {}", e))
    }
}
