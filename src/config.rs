//! 应用配置
//!
//! 数据目录下的 `config.json`，缺失时使用默认值；缺失的字段同样取默认值。

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::utils::scan::DEFAULT_MAX_DEPTH;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 状态探测的 host:port
    pub status_addr: String,
    pub status_interval_secs: u64,
    pub probe_timeout_ms: u64,
    pub store_url: String,
    pub library_url: String,
    /// "Launch Minecraft" 使用的自定义协议
    pub launch_url: String,
    pub scan_max_depth: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            status_addr: "localhost:25565".to_string(),
            status_interval_secs: 30,
            probe_timeout_ms: 3000,
            store_url: "https://store.steampowered.com/".to_string(),
            library_url: "https://steamcommunity.com/my/games/".to_string(),
            launch_url: "minecraft://".to_string(),
            scan_max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AppConfig {
    /// 读取配置文件，不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::info!("配置文件不存在，使用默认配置: {}", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("读取配置文件失败 {}: {}", path.display(), e))?;
        serde_json::from_str(&raw).map_err(|e| format!("解析配置文件失败 {}: {}", path.display(), e))
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("无法创建配置目录: {}", e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("序列化配置失败: {}", e))?;
        fs::write(path, json).map_err(|e| format!("写入配置文件失败: {}", e))
    }

    /// 探测间隔，至少 1 秒
    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs.max(1))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(1))
    }

    pub fn store_url(&self) -> Result<Url, String> {
        parse_url("store_url", &self.store_url)
    }

    pub fn library_url(&self) -> Result<Url, String> {
        parse_url("library_url", &self.library_url)
    }

    pub fn launch_url(&self) -> Result<Url, String> {
        parse_url("launch_url", &self.launch_url)
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url, String> {
    Url::parse(raw).map_err(|e| format!("配置项 {} 不是有效的地址 '{}': {}", field, raw, e))
}
