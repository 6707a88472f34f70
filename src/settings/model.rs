//! 用户设置数据结构
//!
//! 序列化为一个 JSON 对象（camelCase 键），整体存放在本地存储的一个键下。
//!
//! | 键 | 默认值 |
//! |---|---|
//! | darkMode | false |
//! | notifications | true |
//! | autoUpdates | true |
//! | trackingProtection | true |
//! | searchEngine | "google" |
//! | homepage | "new-tab" |
//! | downloadLocation | "/Downloads" |
//! | clearDataOnExit | false |
//! | adBlocker | true |
//! | cookieBlocking | false |

use serde::{Deserialize, Serialize};
use url::Url;

/// 默认搜索引擎
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    #[default]
    Google,
    Bing,
    DuckDuckGo,
    Yahoo,
}

impl SearchEngine {
    pub const ALL: [SearchEngine; 4] = [
        SearchEngine::Google,
        SearchEngine::Bing,
        SearchEngine::DuckDuckGo,
        SearchEngine::Yahoo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SearchEngine::Google => "Google",
            SearchEngine::Bing => "Bing",
            SearchEngine::DuckDuckGo => "DuckDuckGo",
            SearchEngine::Yahoo => "Yahoo",
        }
    }

    fn endpoint(&self) -> (&'static str, &'static str) {
        match self {
            SearchEngine::Google => ("https://www.google.com/search", "q"),
            SearchEngine::Bing => ("https://www.bing.com/search", "q"),
            SearchEngine::DuckDuckGo => ("https://duckduckgo.com/", "q"),
            SearchEngine::Yahoo => ("https://search.yahoo.com/search", "p"),
        }
    }

    /// 生成搜索结果页地址，查询参数会被正确编码
    pub fn search_url(&self, query: &str) -> Result<Url, url::ParseError> {
        let (base, param) = self.endpoint();
        Url::parse_with_params(base, &[(param, query)])
    }
}

/// 主页
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Homepage {
    #[default]
    NewTab,
    Blank,
    Custom,
}

impl Homepage {
    pub fn label(&self) -> &'static str {
        match self {
            Homepage::NewTab => "New Tab Page",
            Homepage::Blank => "Blank Page",
            Homepage::Custom => "Custom URL",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications: bool,
    pub auto_updates: bool,
    pub tracking_protection: bool,
    pub search_engine: SearchEngine,
    pub homepage: Homepage,
    pub download_location: String,
    pub clear_data_on_exit: bool,
    pub ad_blocker: bool,
    pub cookie_blocking: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
            auto_updates: true,
            tracking_protection: true,
            search_engine: SearchEngine::Google,
            homepage: Homepage::NewTab,
            download_location: "/Downloads".to_string(),
            clear_data_on_exit: false,
            ad_blocker: true,
            cookie_blocking: false,
        }
    }
}

impl Settings {
    /// 逐个字段解析存储的设置对象
    ///
    /// 某个字段的值无效时只丢弃该字段，其余字段照常保留；顶层不是对象时返回错误。
    pub fn from_blob(raw: &str) -> Result<Settings, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let serde_json::Value::Object(fields) = value else {
            return Err(serde::de::Error::custom("设置数据不是 JSON 对象"));
        };

        let mut settings = Settings::default();
        for (key, value) in fields {
            let field = serde_json::json!({ "key": key, "value": value });
            match serde_json::from_value::<SettingChange>(field) {
                Ok(change) => settings = settings.merged(&change),
                Err(e) => log::warn!("设置项 {} 无效，使用默认值: {}", key, e),
            }
        }
        Ok(settings)
    }

    /// 浅合并：返回只修改了一个字段的副本
    pub fn merged(&self, change: &SettingChange) -> Settings {
        let mut next = self.clone();
        match change.clone() {
            SettingChange::DarkMode(v) => next.dark_mode = v,
            SettingChange::Notifications(v) => next.notifications = v,
            SettingChange::AutoUpdates(v) => next.auto_updates = v,
            SettingChange::TrackingProtection(v) => next.tracking_protection = v,
            SettingChange::SearchEngine(v) => next.search_engine = v,
            SettingChange::Homepage(v) => next.homepage = v,
            SettingChange::DownloadLocation(v) => next.download_location = v,
            SettingChange::ClearDataOnExit(v) => next.clear_data_on_exit = v,
            SettingChange::AdBlocker(v) => next.ad_blocker = v,
            SettingChange::CookieBlocking(v) => next.cookie_blocking = v,
        }
        next
    }
}

/// 设置面板的标签页
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsTab {
    #[default]
    General,
    Privacy,
    Appearance,
    Advanced,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 4] = [
        SettingsTab::General,
        SettingsTab::Privacy,
        SettingsTab::Appearance,
        SettingsTab::Advanced,
    ];

    /// 该标签页上显示的设置键
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            SettingsTab::General => &["searchEngine", "homepage", "autoUpdates"],
            SettingsTab::Privacy => &[
                "trackingProtection",
                "adBlocker",
                "cookieBlocking",
                "clearDataOnExit",
            ],
            SettingsTab::Appearance => &["darkMode", "notifications"],
            SettingsTab::Advanced => &["downloadLocation"],
        }
    }
}

/// 单个字段的修改
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum SettingChange {
    DarkMode(bool),
    Notifications(bool),
    AutoUpdates(bool),
    TrackingProtection(bool),
    SearchEngine(SearchEngine),
    Homepage(Homepage),
    DownloadLocation(String),
    ClearDataOnExit(bool),
    AdBlocker(bool),
    CookieBlocking(bool),
}

impl SettingChange {
    /// 存储中使用的键名
    pub fn key(&self) -> &'static str {
        match self {
            SettingChange::DarkMode(_) => "darkMode",
            SettingChange::Notifications(_) => "notifications",
            SettingChange::AutoUpdates(_) => "autoUpdates",
            SettingChange::TrackingProtection(_) => "trackingProtection",
            SettingChange::SearchEngine(_) => "searchEngine",
            SettingChange::Homepage(_) => "homepage",
            SettingChange::DownloadLocation(_) => "downloadLocation",
            SettingChange::ClearDataOnExit(_) => "clearDataOnExit",
            SettingChange::AdBlocker(_) => "adBlocker",
            SettingChange::CookieBlocking(_) => "cookieBlocking",
        }
    }

    pub fn tab(&self) -> SettingsTab {
        let key = self.key();
        SettingsTab::ALL
            .into_iter()
            .find(|tab| tab.keys().contains(&key))
            .unwrap_or_default()
    }

    fn toggled(&self) -> Option<bool> {
        match self {
            SettingChange::DarkMode(v)
            | SettingChange::Notifications(v)
            | SettingChange::AutoUpdates(v)
            | SettingChange::TrackingProtection(v)
            | SettingChange::ClearDataOnExit(v)
            | SettingChange::AdBlocker(v)
            | SettingChange::CookieBlocking(v) => Some(*v),
            SettingChange::SearchEngine(_)
            | SettingChange::Homepage(_)
            | SettingChange::DownloadLocation(_) => None,
        }
    }

    /// 通知文案，例如 "dark mode has been enabled"
    pub fn describe(&self) -> String {
        let verb = match self.toggled() {
            Some(true) => "enabled",
            Some(false) => "disabled",
            None => "changed",
        };
        format!("{} has been {}", key_to_words(self.key()), verb)
    }
}

/// camelCase -> 以空格分隔的小写单词
fn key_to_words(key: &str) -> String {
    let mut words = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            words.push(' ');
        }
        words.push(c.to_ascii_lowercase());
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_uses_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["darkMode"], false);
        assert_eq!(json["searchEngine"], "google");
        assert_eq!(json["homepage"], "new-tab");
        assert_eq!(json["downloadLocation"], "/Downloads");
        assert_eq!(json.as_object().unwrap().len(), 10);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"darkMode":true,"searchEngine":"duckduckgo"}"#).unwrap();
        assert!(settings.dark_mode);
        assert_eq!(settings.search_engine, SearchEngine::DuckDuckGo);
        assert!(settings.ad_blocker);
        assert_eq!(settings.download_location, "/Downloads");
    }

    #[test]
    fn invalid_field_keeps_the_others() {
        let settings = Settings::from_blob(
            r#"{"darkMode":true,"cookieBlocking":true,"downloadLocation":"D:/Games","searchEngine":"ecosia","adBlocker":"yes"}"#,
        )
        .unwrap();
        assert!(settings.dark_mode);
        assert!(settings.cookie_blocking);
        assert_eq!(settings.download_location, "D:/Games");
        assert_eq!(settings.search_engine, SearchEngine::Google);
        assert!(settings.ad_blocker);

        assert!(Settings::from_blob("[1, 2, 3]").is_err());
        assert!(Settings::from_blob("not json").is_err());
    }

    #[test]
    fn merge_touches_only_one_field() {
        let base = Settings::default();
        let next = base.merged(&SettingChange::CookieBlocking(true));
        assert!(next.cookie_blocking);
        assert_eq!(
            next.merged(&SettingChange::CookieBlocking(false)),
            base
        );
    }

    #[test]
    fn change_description_reads_like_a_sentence() {
        assert_eq!(
            SettingChange::DarkMode(true).describe(),
            "dark mode has been enabled"
        );
        assert_eq!(
            SettingChange::ClearDataOnExit(false).describe(),
            "clear data on exit has been disabled"
        );
        assert_eq!(
            SettingChange::DownloadLocation("/games".into()).describe(),
            "download location has been changed"
        );
    }

    #[test]
    fn every_key_belongs_to_exactly_one_tab() {
        let all: Vec<&str> = SettingsTab::ALL.iter().flat_map(|t| t.keys()).copied().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(SettingChange::AdBlocker(true).tab(), SettingsTab::Privacy);
        assert_eq!(
            SettingChange::DownloadLocation(String::new()).tab(),
            SettingsTab::Advanced
        );
    }

    #[test]
    fn change_serializes_as_key_value() {
        let json = serde_json::to_value(SettingChange::SearchEngine(SearchEngine::Bing)).unwrap();
        assert_eq!(json, serde_json::json!({"key": "searchEngine", "value": "bing"}));
    }

    #[test]
    fn search_url_encodes_query() {
        let url = SearchEngine::Google.search_url("rust & games").unwrap();
        assert_eq!(url.as_str(), "https://www.google.com/search?q=rust+%26+games");
        let url = SearchEngine::Yahoo.search_url("mpk").unwrap();
        assert_eq!(url.as_str(), "https://search.yahoo.com/search?p=mpk");
    }
}
