use std::process::Command;

use url::Url;

/// 交给系统打开网址或自定义协议（如 `minecraft://`），不等待结果
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &Url) -> Result<(), String>;
}

/// 使用系统默认程序打开
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &Url) -> Result<(), String> {
        log::info!("打开: {}", url);
        open_with_system(url.as_str())
    }
}

fn open_with_system(target: &str) -> Result<(), String> {
    open_command(target)
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("无法打开 '{}': {}", target, e))
}

/// 地址始终作为单独的最后一个参数传入，不经过 shell 解析
#[cfg(target_os = "windows")]
fn open_command(target: &str) -> Command {
    let mut command = Command::new("rundll32");
    command.args(["url.dll,FileProtocolHandler", target]);
    command
}

#[cfg(target_os = "macos")]
fn open_command(target: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn open_command(target: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::ffi::OsStr;

    /// 记录打开过的地址
    #[derive(Default)]
    pub(crate) struct RecordingOpener {
        pub opened: Mutex<Vec<String>>,
    }

    impl UrlOpener for RecordingOpener {
        fn open(&self, url: &Url) -> Result<(), String> {
            self.opened.lock().push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn query_string_reaches_the_opener_intact() {
        let url = Url::parse("https://store.example/search?q=race&page=2|more").unwrap();
        let command = open_command(url.as_str());

        assert_ne!(command.get_program(), OsStr::new("cmd"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args.last().copied(), Some(OsStr::new(url.as_str())));
        assert_eq!(
            args.iter().filter(|a| a.to_string_lossy().contains("page=2")).count(),
            1
        );
    }

    #[test]
    fn recording_opener_keeps_order() {
        let opener = RecordingOpener::default();
        opener.open(&Url::parse("https://a.example/").unwrap()).unwrap();
        opener.open(&Url::parse("steam://open/games").unwrap()).unwrap();
        assert_eq!(
            *opener.opened.lock(),
            vec!["https://a.example/".to_string(), "steam://open/games".to_string()]
        );
    }
}
