//! 好友聊天弹窗
//!
//! 好友列表、好友请求、群聊消息和通话都交给 [`ChatTransport`]；本模块只维护输入状态并弹出通知。

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::notification::NotificationCenter;

/// 好友码前缀
pub const CODE_PREFIX: &str = "ATG-";
const CODE_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FriendStatus {
    Online,
    InGame,
    Offline,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: u32,
    pub name: String,
    pub code: String,
    pub status: FriendStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Video,
    Audio,
}

impl CallKind {
    fn title(&self) -> &'static str {
        match self {
            CallKind::Video => "Video Call",
            CallKind::Audio => "Audio Call",
        }
    }

    fn word(&self) -> &'static str {
        match self {
            CallKind::Video => "video",
            CallKind::Audio => "audio",
        }
    }
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn friends(&self) -> Result<Vec<Friend>, String>;
    async fn send_friend_request(&self, code: &str) -> Result<(), String>;
    async fn send_group_message(&self, message: &str) -> Result<(), String>;
    async fn start_call(&self, friend: &Friend, kind: CallKind) -> Result<(), String>;
}

/// 全部保存在内存中的聊天传输，只记录日志
#[derive(Debug)]
pub struct LocalTransport {
    friends: Vec<Friend>,
    pending_requests: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
}

impl LocalTransport {
    pub fn new(friends: Vec<Friend>) -> Self {
        Self {
            friends,
            pending_requests: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// 带两个演示好友
    pub fn with_demo_friends() -> Self {
        Self::new(vec![
            Friend {
                id: 1,
                name: "GamerFriend1".to_string(),
                code: "ATG-ABC123".to_string(),
                status: FriendStatus::Online,
            },
            Friend {
                id: 2,
                name: "ProPlayer99".to_string(),
                code: "ATG-XYZ789".to_string(),
                status: FriendStatus::InGame,
            },
        ])
    }

    pub fn pending_requests(&self) -> Vec<String> {
        self.pending_requests.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl ChatTransport for LocalTransport {
    async fn friends(&self) -> Result<Vec<Friend>, String> {
        Ok(self.friends.clone())
    }

    async fn send_friend_request(&self, code: &str) -> Result<(), String> {
        log::info!("发送好友请求: {}", code);
        self.pending_requests.lock().push(code.to_string());
        Ok(())
    }

    async fn send_group_message(&self, message: &str) -> Result<(), String> {
        log::info!("发送群聊消息 ({} 字)", message.chars().count());
        self.messages.lock().push(message.to_string());
        Ok(())
    }

    async fn start_call(&self, friend: &Friend, kind: CallKind) -> Result<(), String> {
        log::info!("发起{}通话: {} ({})", kind.word(), friend.name, friend.code);
        Ok(())
    }
}

/// 生成 ATG-XXXXXX 形式的好友码
pub fn generate_user_code() -> String {
    let code: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(CODE_LEN)
        .collect();
    format!("{}{}", CODE_PREFIX, code.to_uppercase())
}

pub struct ChatPopup<T: ChatTransport> {
    transport: T,
    toasts: NotificationCenter,
    user_code: String,
    open: bool,
    friends: Vec<Friend>,
    /// 好友码输入框
    pub friend_code: String,
    /// 消息输入框
    pub message: String,
}

impl<T: ChatTransport> ChatPopup<T> {
    pub fn new(transport: T, toasts: NotificationCenter) -> Self {
        Self {
            transport,
            toasts,
            user_code: generate_user_code(),
            open: false,
            friends: Vec::new(),
            friend_code: String::new(),
            message: String::new(),
        }
    }

    pub fn user_code(&self) -> &str {
        &self.user_code
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 打开弹窗并刷新好友列表
    pub async fn open(&mut self) {
        self.open = true;
        match self.transport.friends().await {
            Ok(friends) => self.friends = friends,
            Err(e) => log::error!("获取好友列表失败: {}", e),
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub async fn add_friend(&mut self) {
        let code = self.friend_code.trim().to_string();
        if code.is_empty() {
            self.toasts.error("Invalid Code", "Please enter a friend code");
            return;
        }
        match self.transport.send_friend_request(&code).await {
            Ok(()) => {
                self.toasts.info(
                    "Friend Request Sent",
                    format!("Sent friend request to {}", code),
                );
                self.friend_code.clear();
            }
            Err(e) => {
                log::error!("发送好友请求失败: {}", e);
                self.toasts.error("Error", "Failed to send friend request");
            }
        }
    }

    /// 空消息不做任何事
    pub async fn send_message(&mut self) {
        if self.message.trim().is_empty() {
            return;
        }
        match self.transport.send_group_message(&self.message).await {
            Ok(()) => {
                self.toasts.info(
                    "Message Sent",
                    "Your message has been sent to the group chat",
                );
                self.message.clear();
            }
            Err(e) => {
                log::error!("发送消息失败: {}", e);
                self.toasts.error("Error", "Failed to send message");
            }
        }
    }

    pub async fn call(&self, friend: &Friend, kind: CallKind) {
        match self.transport.start_call(friend, kind).await {
            Ok(()) => self.toasts.info(
                kind.title(),
                format!("Starting {} call with {}", kind.word(), friend.name),
            ),
            Err(e) => {
                log::error!("发起通话失败: {}", e);
                self.toasts.error("Error", "Failed to start call");
            }
        }
    }
}
