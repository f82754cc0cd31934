use crate::{Error, Result};

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cloneable cancellation handle shared between the caller and a running pipeline
#[derive(Clone, Debug, Default)]
pub struct Feedback {
    cancelled: Arc<AtomicBool>,
}

impl Feedback {
    pub fn new() -> Feedback {
        Feedback::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Polled between stages, `stage` names the stage that just finished
    pub fn check(&self, stage: &str) -> Result<()> {
        if self.is_cancelled() {
            log::info!("Cancellation requested, aborting after {stage}");
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}
