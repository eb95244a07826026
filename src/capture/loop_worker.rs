use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use crate::error::CaptureError;
use crate::keystrokes::{EventClassifier, KeyEvent, LineSink};

use super::hook::HookMessage;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// Feeds hook events to the classifier, one at a time, until cancelled.
///
/// Flush errors are logged and capture continues; only a hook failure ends
/// the loop with an error.
pub async fn capture_loop<S: LineSink>(
    mut events: UnboundedReceiver<HookMessage>,
    mut classifier: EventClassifier<S>,
    cancel_token: CancellationToken,
) -> Result<EventClassifier<S>, CaptureError> {
    let mut hook_live = false;

    loop {
        tokio::select! {
            message = events.recv() => match message {
                Some(HookMessage::Key(event)) => {
                    if !hook_live {
                        hook_live = true;
                        log_info!("keyboard hook active, capturing keystrokes");
                    }
                    apply(&mut classifier, &event);
                }
                Some(HookMessage::Failed(reason)) => {
                    log_error!("keyboard hook failed: {reason}");
                    return Err(CaptureError::Hook(reason));
                }
                None => {
                    log_warn!("keyboard hook channel closed; capture stopping");
                    break;
                }
            },
            _ = cancel_token.cancelled() => {
                log_info!("capture loop shutting down");
                break;
            }
        }
    }

    if !classifier.line().is_empty() {
        log_warn!(
            "discarding uncommitted line of {} tokens",
            classifier.line().len()
        );
    }
    Ok(classifier)
}

fn apply<S: LineSink>(classifier: &mut EventClassifier<S>, event: &KeyEvent) {
    match classifier.handle(event) {
        Ok(_) => {}
        Err(err) if err.line_written() => {
            let err = anyhow::Error::new(err);
            log_error!("log file left writable: {err:#}");
        }
        Err(err) => {
            let err = anyhow::Error::new(err);
            log_error!("flush failed, line kept for the next enter: {err:#}");
        }
    }
}
