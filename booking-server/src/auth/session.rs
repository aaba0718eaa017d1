//! Session state with an explicit subscribe/notify contract
//!
//! The in-process "current user" cache. State is replaced wholesale on each
//! sign-in/sign-out, never mutated in place; subscribers observe changes
//! through a watch channel instead of reaching for a global singleton.

use shared::models::UserInfo;
use tokio::sync::watch;

/// Observable session state
#[derive(Debug)]
pub struct SessionHub {
    tx: watch::Sender<Option<UserInfo>>,
}

impl SessionHub {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Publish a signed-in user. `send_replace` updates the state even when
    /// nobody is subscribed; plain `send` would drop the value.
    pub fn sign_in(&self, user: UserInfo) {
        self.tx.send_replace(Some(user));
    }

    /// Clear the session
    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }

    /// Snapshot of the current user
    pub fn current(&self) -> Option<UserInfo> {
        self.tx.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Subscribe to session changes. The receiver observes every
    /// replacement of the session state.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserInfo>> {
        self.tx.subscribe()
    }
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}
