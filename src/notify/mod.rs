//! Outbound email seam.
//!
//! Delivery is a capability the account service calls, never a
//! precondition of a request's outcome: sends are spawned off the
//! request path, bounded by a timeout, and failures are only logged.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info};

/// Upper bound on one delivery attempt so a stuck transport can never
/// hold a spawned task forever.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Stub transport that logs instead of delivering.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        info!(to_email = %to, subject = %subject, body = %body, "email send stub");
        Ok(())
    }
}

/// Dispatch a message without tying it to the caller's outcome.
///
/// The enclosing operation has already succeeded by the time this runs;
/// delivery failures and timeouts are logged and go nowhere else.
pub fn dispatch(notifier: Arc<dyn Notifier>, to: String, subject: String, body: String) {
    tokio::spawn(async move {
        match timeout(SEND_TIMEOUT, notifier.send(&to, &subject, &body)).await {
            Ok(Ok(())) => info!(to_email = %to, subject = %subject, "email sent"),
            Ok(Err(err)) => error!(to_email = %to, "error sending email: {err}"),
            Err(_) => error!(to_email = %to, "email send timed out"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use tokio::sync::Mutex;

    /// Test double that records every message it is asked to deliver.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
            self.sent
                .lock()
                .await
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<()> {
            bail!("smtp unreachable")
        }
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() -> Result<()> {
        LogNotifier
            .send("alice@example.edu", "Registration OTP", "code")
            .await
    }

    #[tokio::test]
    async fn dispatch_records_the_message() {
        let notifier = Arc::new(RecordingNotifier::default());
        dispatch(
            notifier.clone(),
            "alice@example.edu".to_string(),
            "Registration OTP".to_string(),
            "Your OTP for registration is: abc".to_string(),
        );

        // The spawned task has no completion handle; poll briefly.
        for _ in 0..50 {
            if !notifier.sent.lock().await.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let sent = notifier.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "alice@example.edu");
        assert_eq!(sent[0].1, "Registration OTP");
    }

    #[tokio::test]
    async fn dispatch_swallows_failures() {
        // Nothing to assert beyond "does not panic the runtime".
        dispatch(
            Arc::new(FailingNotifier),
            "alice@example.edu".to_string(),
            "Registration OTP".to_string(),
            "code".to_string(),
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
