use movieflix_client::ClientError;
use movieflix_models::UserId;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Handle to a command sent without waiting for it.
///
/// The UI never awaits this. Callers that outlive the command only briefly
/// (a one-shot CLI invocation) can `settle` it so the request is not cut off
/// and its outcome reaches the log.
#[must_use = "drop the handle explicitly if the outcome is not needed"]
pub struct Dispatched {
    label: &'static str,
    handle: JoinHandle<bool>,
}

impl Dispatched {
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Waits for the command and reports whether the backend accepted it.
    pub async fn settle(self) -> bool {
        self.handle.await.unwrap_or(false)
    }
}

/// Spawns `command` on behalf of `user` for `movie_id`; failures are logged,
/// never surfaced.
pub fn dispatch<F>(label: &'static str, user: UserId, movie_id: u64, command: F) -> Dispatched
where
    F: Future<Output = Result<(), ClientError>> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        match command.await {
            Ok(()) => {
                debug!(command = label, user = %user, movie_id, "Command accepted");
                true
            }
            Err(e) => {
                warn!(
                    command = label,
                    user = %user,
                    movie_id,
                    error = %e,
                    "Command failed; local state kept as if it succeeded"
                );
                false
            }
        }
    });

    Dispatched { label, handle }
}
