//! Last-resort panic boundary around a front-end screen.

use std::any::Any;
use std::future::Future;

/// Generic screen shown in place of whatever panicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryScreen {
    pub title: &'static str,
    pub message: &'static str,
    pub action: &'static str,
}

impl Default for RecoveryScreen {
    fn default() -> Self {
        Self {
            title: "Something went wrong",
            message: "We're sorry, but something unexpected happened. \
                      The error has been logged and we'll look into it.",
            action: "Go Home",
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Run `screen` on its own task. A panic is logged and turned into a
/// [`RecoveryScreen`]; it never propagates to the caller.
pub async fn run_guarded<F, T>(screen: &str, fut: F) -> Result<T, RecoveryScreen>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(fut).await {
        Ok(value) => Ok(value),
        Err(join_err) => {
            if join_err.is_panic() {
                let payload = join_err.into_panic();
                tracing::error!(
                    screen,
                    panic = %panic_message(payload.as_ref()),
                    "Uncaught panic in screen"
                );
            } else {
                tracing::error!(screen, error = %join_err, "Screen task was cancelled");
            }
            Err(RecoveryScreen::default())
        }
    }
}
