use crate::AuthEvent;

use log::{debug, warn};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

const DEFAULT_CAPACITY: usize = 16;

/// Fans auth-state changes out to every live subscription.
#[derive(Clone)]
pub struct AuthEventBus {
    tx: broadcast::Sender<AuthEvent>,
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            receiver: self.tx.subscribe(),
        }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn emit(&self, event: AuthEvent) {
        debug!(
            "Auth state change: {} (user: {})",
            event.kind,
            event
                .user()
                .map(|user| user.id.to_string())
                .unwrap_or_else(|| String::from("none"))
        );
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for AuthEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by `on_auth_state_change`. Dropping it, or calling
/// [`AuthSubscription::unsubscribe`], stops delivery.
pub struct AuthSubscription {
    receiver: broadcast::Receiver<AuthEvent>,
}

impl AuthSubscription {
    /// Wait for the next event. Returns `None` once the backend is gone.
    ///
    /// A subscriber that falls behind skips the missed events and resumes
    /// with the oldest retained one; every event carries the full session,
    /// so later events supersede earlier ones.
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Auth subscription lagged, skipped {skipped} events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {
        debug!("Auth subscription released");
    }
}
