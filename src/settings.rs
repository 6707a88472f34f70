//! 用户设置
//!
//! 启动时读取一次，之后每次修改都写回本地存储。设置对象通过参数显式传递，没有全局状态。

mod model;
pub mod panel;
mod storage;

use std::sync::Arc;

pub use model::{Homepage, SearchEngine, SettingChange, Settings, SettingsTab};
pub use panel::SettingsPanel;
pub use storage::LocalStorage;

/// 设置在本地存储中的键，"清除浏览数据"时唯一保留的键
pub const SETTINGS_KEY: &str = "magtinum-settings";

pub struct SettingsManager {
    storage: Arc<LocalStorage>,
    current: Settings,
}

impl SettingsManager {
    /// 读取设置；不存在或整体无法解析时使用默认值，单个无效字段只回退该字段
    pub fn load(storage: Arc<LocalStorage>) -> Self {
        let current = match storage.get_item(SETTINGS_KEY) {
            Some(raw) => match Settings::from_blob(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("设置数据无法解析，使用默认设置: {}", e);
                    Settings::default()
                }
            },
            None => {
                log::info!("未找到已保存的设置，使用默认设置");
                Settings::default()
            }
        };

        Self { storage, current }
    }

    pub fn settings(&self) -> &Settings {
        &self.current
    }

    pub fn storage(&self) -> &Arc<LocalStorage> {
        &self.storage
    }

    /// 整体替换并落盘
    pub fn replace(&mut self, settings: Settings) -> Result<(), String> {
        let json =
            serde_json::to_string(&settings).map_err(|e| format!("序列化设置失败: {}", e))?;
        self.storage.set_item(SETTINGS_KEY, json)?;
        self.current = settings;
        Ok(())
    }

    /// 修改单个字段（浅合并）并落盘
    pub fn apply(&mut self, change: &SettingChange) -> Result<(), String> {
        let next = self.current.merged(change);
        self.replace(next)
    }

    /// 删除设置以外的所有本地数据，返回删除的键数量
    pub fn clear_browsing_data(&self) -> Result<usize, String> {
        self.storage.retain_only(&[SETTINGS_KEY])
    }

    /// 退出时调用：开启了"退出时清除数据"则清除浏览数据
    pub fn on_exit(&self) {
        if !self.current.clear_data_on_exit {
            return;
        }
        match self.clear_browsing_data() {
            Ok(removed) => log::info!("退出时已清除 {} 项浏览数据", removed),
            Err(e) => log::error!("退出时清除浏览数据失败: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted(storage: &LocalStorage) -> Settings {
        let raw = storage.get_item(SETTINGS_KEY).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn every_change_round_trips_through_storage() {
        let storage = Arc::new(LocalStorage::in_memory());
        let mut manager = SettingsManager::load(storage.clone());

        let changes = [
            SettingChange::DarkMode(true),
            SettingChange::SearchEngine(SearchEngine::DuckDuckGo),
            SettingChange::Homepage(Homepage::Blank),
            SettingChange::DownloadLocation("D:/Games".to_string()),
            SettingChange::AdBlocker(false),
        ];
        for change in &changes {
            let expected = manager.settings().merged(change);
            manager.apply(change).unwrap();
            assert_eq!(persisted(&storage), expected);
            assert_eq!(manager.settings(), &expected);
        }
    }

    #[test]
    fn settings_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");

        let storage = Arc::new(LocalStorage::open(&path).unwrap());
        let mut manager = SettingsManager::load(storage);
        manager.apply(&SettingChange::CookieBlocking(true)).unwrap();
        drop(manager);

        let storage = Arc::new(LocalStorage::open(&path).unwrap());
        let manager = SettingsManager::load(storage);
        assert!(manager.settings().cookie_blocking);
    }

    #[test]
    fn unreadable_blob_falls_back_to_defaults() {
        let storage = Arc::new(LocalStorage::in_memory());
        storage.set_item(SETTINGS_KEY, "[1, 2, 3]").unwrap();

        let manager = SettingsManager::load(storage);
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn one_bad_value_does_not_reset_the_rest() {
        let storage = Arc::new(LocalStorage::in_memory());
        storage
            .set_item(
                SETTINGS_KEY,
                r#"{"darkMode":true,"cookieBlocking":true,"downloadLocation":"D:/Games","searchEngine":"ecosia"}"#,
            )
            .unwrap();

        let mut manager = SettingsManager::load(storage.clone());
        assert!(manager.settings().dark_mode);
        assert!(manager.settings().cookie_blocking);
        assert_eq!(manager.settings().download_location, "D:/Games");
        assert_eq!(manager.settings().search_engine, SearchEngine::Google);

        manager.apply(&SettingChange::AdBlocker(false)).unwrap();
        let saved = persisted(&storage);
        assert!(saved.dark_mode);
        assert!(saved.cookie_blocking);
        assert!(!saved.ad_blocker);
    }

    #[test]
    fn clear_keeps_settings_untouched() {
        let storage = Arc::new(LocalStorage::in_memory());
        let mut manager = SettingsManager::load(storage.clone());
        manager.apply(&SettingChange::DarkMode(true)).unwrap();
        storage.set_item("history", "[]").unwrap();
        storage.set_item("cookies", "a=b").unwrap();
        let before = storage.get_item(SETTINGS_KEY);

        assert_eq!(manager.clear_browsing_data().unwrap(), 2);
        assert_eq!(storage.keys(), vec![SETTINGS_KEY.to_string()]);
        assert_eq!(storage.get_item(SETTINGS_KEY), before);
    }

    #[test]
    fn exit_clears_only_when_enabled() {
        let storage = Arc::new(LocalStorage::in_memory());
        let mut manager = SettingsManager::load(storage.clone());
        storage.set_item("history", "[]").unwrap();

        manager.on_exit();
        assert_eq!(storage.len(), 1);

        manager.apply(&SettingChange::ClearDataOnExit(true)).unwrap();
        manager.on_exit();
        assert_eq!(storage.keys(), vec![SETTINGS_KEY.to_string()]);
    }
}
