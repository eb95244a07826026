use anyhow::{bail, Result};
use log::info;
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::keystrokes::EventClassifier;
use crate::storage::DailyLogStore;

use super::hook::spawn_hook;
use super::loop_worker::capture_loop;

pub struct CaptureController {
    hook: Option<JoinHandle<()>>,
    cancel_token: CancellationToken,
}

impl CaptureController {
    pub fn new() -> Self {
        Self {
            hook: None,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Token that ends [`CaptureController::run`] when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Installs the keyboard hook and processes its events until the token
    /// is cancelled or the hook fails.
    pub async fn run(&mut self, store: DailyLogStore) -> Result<()> {
        if self.hook.is_some() {
            bail!("capture already active");
        }

        info!(
            "Installing keyboard hook, lines will go to {}",
            store.log_dir().display()
        );
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        self.hook = Some(spawn_hook(event_tx)?);

        capture_loop(event_rx, EventClassifier::new(store), self.cancel_token.clone()).await?;
        Ok(())
    }
}

impl Default for CaptureController {
    fn default() -> Self {
        Self::new()
    }
}
