//! 设置面板
//!
//! 受控表单：每次修改立即写回并弹出通知。

use super::{SettingChange, Settings, SettingsManager, SettingsTab};
use crate::notification::NotificationCenter;

pub struct SettingsPanel {
    manager: SettingsManager,
    toasts: NotificationCenter,
    active_tab: SettingsTab,
}

impl SettingsPanel {
    pub fn new(manager: SettingsManager, toasts: NotificationCenter) -> Self {
        Self {
            manager,
            toasts,
            active_tab: SettingsTab::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.manager.settings()
    }

    pub fn manager(&self) -> &SettingsManager {
        &self.manager
    }

    pub fn active_tab(&self) -> SettingsTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: SettingsTab) {
        self.active_tab = tab;
    }

    /// 修改单个设置
    pub fn change(&mut self, change: SettingChange) {
        match self.manager.apply(&change) {
            Ok(()) => self.toasts.info("Setting updated", change.describe()),
            Err(e) => {
                log::error!("保存设置 {} 失败: {}", change.key(), e);
                self.toasts.error("Error", "Failed to save settings");
            }
        }
    }

    /// 恢复默认设置
    pub fn reset_to_defaults(&mut self) {
        match self.manager.replace(Settings::default()) {
            Ok(()) => self.toasts.info(
                "Settings reset",
                "All settings have been reset to their default values.",
            ),
            Err(e) => {
                log::error!("恢复默认设置失败: {}", e);
                self.toasts.error("Error", "Failed to save settings");
            }
        }
    }

    /// 清除浏览数据（保留设置本身）
    pub fn clear_browsing_data(&mut self) {
        match self.manager.clear_browsing_data() {
            Ok(removed) => {
                log::info!("已清除 {} 项浏览数据", removed);
                self.toasts.info(
                    "Browsing data cleared",
                    "Cache, cookies, and browsing history have been cleared.",
                );
            }
            Err(e) => {
                log::error!("清除浏览数据失败: {}", e);
                self.toasts.error("Error", "Failed to clear browsing data");
            }
        }
    }

    /// "浏览"按钮：没有可用的文件浏览器
    pub fn browse_download_location(&self) {
        self.toasts.info(
            "Feature not available",
            "File browser is not available in web version",
        );
    }
}
