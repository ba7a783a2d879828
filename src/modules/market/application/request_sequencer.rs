use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Handle for one in-flight request
#[derive(Debug, Clone)]
pub struct RequestTicket {
    sequence: u64,
    token: CancellationToken,
}

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Cancelled as soon as a newer request begins
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// Orders competing requests so that only the latest one may commit.
///
/// Each `begin` issues a strictly larger sequence number and cancels the
/// token of the ticket it replaces. A response is accepted only while its
/// ticket is still current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
    current_token: Mutex<Option<CancellationToken>>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        let token = CancellationToken::new();
        let mut current = self
            .current_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Issued under the lock so sequence order and token order agree
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }

        RequestTicket { sequence, token }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.sequence
    }
}
