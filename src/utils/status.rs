//! 服务器状态检测
//!
//! 监控任务按固定间隔探测一次，先发布 `Checking`，再发布探测结果。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl ServerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServerStatus::Checking => "CHECKING...",
            ServerStatus::Online => "ONLINE",
            ServerStatus::Offline => "OFFLINE",
        }
    }
}

#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn probe(&self) -> ServerStatus;
}

/// 能在超时内建立 TCP 连接即视为在线
#[derive(Debug, Clone)]
pub struct TcpStatusProbe {
    addr: String,
    timeout: Duration,
}

impl TcpStatusProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }
}

#[async_trait]
impl StatusProbe for TcpStatusProbe {
    async fn probe(&self) -> ServerStatus {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
            Ok(Ok(_)) => ServerStatus::Online,
            Ok(Err(e)) => {
                log::debug!("状态探测 {} 连接失败: {}", self.addr, e);
                ServerStatus::Offline
            }
            Err(_) => {
                log::debug!("状态探测 {} 超时 ({:?})", self.addr, self.timeout);
                ServerStatus::Offline
            }
        }
    }
}

/// 后台状态监控，通过 watch 通道发布最新状态
pub struct StatusMonitor {
    rx: watch::Receiver<ServerStatus>,
    handle: JoinHandle<()>,
}

impl StatusMonitor {
    /// 必须在 tokio 运行时中调用
    pub fn spawn(probe: Arc<dyn StatusProbe>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(ServerStatus::Checking);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                tx.send_replace(ServerStatus::Checking);
                let status = probe.probe().await;
                if tx.send(status).is_err() {
                    break;
                }
            }
        });
        Self { rx, handle }
    }

    pub fn status(&self) -> ServerStatus {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ServerStatus> {
        self.rx.clone()
    }
}

impl Drop for StatusMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
