//! 起始页：搜索框、快速访问和最近访问

use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::settings::SearchEngine;
use crate::utils::open::UrlOpener;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuickLink {
    pub name: &'static str,
    pub url: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RecentVisit {
    pub title: &'static str,
    pub url: &'static str,
    pub time: &'static str,
}

pub const QUICK_ACCESS: &[QuickLink] = &[
    QuickLink { name: "Gmail", url: "https://gmail.com" },
    QuickLink { name: "YouTube", url: "https://youtube.com" },
    QuickLink { name: "GitHub", url: "https://github.com" },
    QuickLink { name: "Twitter", url: "https://twitter.com" },
    QuickLink { name: "Reddit", url: "https://reddit.com" },
    QuickLink { name: "LinkedIn", url: "https://linkedin.com" },
    QuickLink { name: "Stack Overflow", url: "https://stackoverflow.com" },
    QuickLink { name: "Medium", url: "https://medium.com" },
];

pub const RECENTLY_VISITED: &[RecentVisit] = &[
    RecentVisit {
        title: "React Documentation",
        url: "https://react.dev",
        time: "2 hours ago",
    },
    RecentVisit {
        title: "Tailwind CSS",
        url: "https://tailwindcss.com",
        time: "4 hours ago",
    },
    RecentVisit {
        title: "TypeScript Handbook",
        url: "https://typescriptlang.org",
        time: "1 day ago",
    },
];

/// 输入像网址时直接返回该网址
fn as_url(query: &str) -> Option<Url> {
    if query.chars().any(char::is_whitespace) {
        return None;
    }
    if let Ok(url) = Url::parse(query) {
        return matches!(url.scheme(), "http" | "https").then_some(url);
    }

    // host.tld 形式，顶级域名至少两个字母
    let host = query.split('/').next().unwrap_or_default();
    let tld = host.rsplit('.').next().unwrap_or_default();
    if host.contains('.') && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Url::parse(&format!("https://{}", query)).ok();
    }
    None
}

/// 搜索框输入 -> 要打开的地址；空白输入返回 Ok(None)
pub fn resolve_query(query: &str, engine: SearchEngine) -> Result<Option<Url>, String> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }
    if let Some(url) = as_url(query) {
        return Ok(Some(url));
    }
    engine
        .search_url(query)
        .map(Some)
        .map_err(|e| format!("无法生成搜索地址: {}", e))
}

pub struct LandingPage {
    opener: Arc<dyn UrlOpener>,
    pub query: String,
}

impl LandingPage {
    pub fn new(opener: Arc<dyn UrlOpener>) -> Self {
        Self {
            opener,
            query: String::new(),
        }
    }

    /// 提交搜索框，返回实际打开的地址
    pub fn search(&self, engine: SearchEngine) -> Result<Option<Url>, String> {
        let Some(url) = resolve_query(&self.query, engine)? else {
            return Ok(None);
        };
        log::info!("Searching for: {}", self.query.trim());
        self.opener.open(&url)?;
        Ok(Some(url))
    }

    pub fn open_quick_link(&self, link: &QuickLink) -> Result<(), String> {
        let url = Url::parse(link.url).map_err(|e| format!("无效的地址 {}: {}", link.url, e))?;
        self.opener.open(&url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::open::tests::RecordingOpener;

    #[test]
    fn blank_query_does_nothing() {
        let opener = Arc::new(RecordingOpener::default());
        let mut page = LandingPage::new(opener.clone());
        page.query = "   ".to_string();
        assert_eq!(page.search(SearchEngine::Google).unwrap(), None);
        assert!(opener.opened.lock().is_empty());
    }

    #[test]
    fn url_like_queries_open_directly() {
        assert_eq!(
            resolve_query("https://example.com/a", SearchEngine::Bing).unwrap().unwrap().as_str(),
            "https://example.com/a"
        );
        assert_eq!(
            resolve_query("rust-lang.org/learn", SearchEngine::Bing).unwrap().unwrap().as_str(),
            "https://rust-lang.org/learn"
        );
    }

    #[test]
    fn other_queries_use_the_selected_engine() {
        let url = resolve_query("best mpk games", SearchEngine::DuckDuckGo)
            .unwrap()
            .unwrap();
        assert_eq!(url.as_str(), "https://duckduckgo.com/?q=best+mpk+games");

        let url = resolve_query("v1.2", SearchEngine::Google).unwrap().unwrap();
        assert_eq!(url.host_str(), Some("www.google.com"));
    }

    #[test]
    fn search_opens_through_the_opener() {
        let opener = Arc::new(RecordingOpener::default());
        let mut page = LandingPage::new(opener.clone());
        page.query = "minecraft servers".to_string();
        page.search(SearchEngine::Yahoo).unwrap();
        page.open_quick_link(&QUICK_ACCESS[2]).unwrap();

        assert_eq!(
            *opener.opened.lock(),
            vec![
                "https://search.yahoo.com/search?p=minecraft+servers".to_string(),
                "https://github.com/".to_string(),
            ]
        );
        assert_eq!(RECENTLY_VISITED.len(), 3);
    }
}
