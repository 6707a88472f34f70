//! 登录身份
//!
//! 认证本身交给外部身份服务；这里只负责向游戏库提供"当前是谁"。

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::library::LibraryError;

/// 当前登录用户
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 未登录时返回 Ok(None)
    async fn current_user(&self) -> Result<Option<Identity>, LibraryError>;
}

/// 保存在内存中的会话，由外部登录流程写入
#[derive(Debug, Default)]
pub struct SessionIdentity {
    session: RwLock<Option<Identity>>,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self {
            session: RwLock::new(Some(identity)),
        }
    }

    pub fn sign_in(&self, identity: Identity) {
        log::info!("用户已登录: {}", identity.id);
        *self.session.write() = Some(identity);
    }

    pub fn sign_out(&self) {
        if let Some(identity) = self.session.write().take() {
            log::info!("用户已登出: {}", identity.id);
        }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentity {
    async fn current_user(&self) -> Result<Option<Identity>, LibraryError> {
        Ok(self.session.read().clone())
    }
}
