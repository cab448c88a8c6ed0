//! Scripted order submitter for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::checkout::{Order, OrderReceipt, OrderSubmitter};
use crate::error::SubmissionError;

/// Test double that replays a fixed sequence of outcomes and counts calls.
///
/// Once the script is exhausted every further call succeeds.
#[derive(Debug, Default)]
pub struct ScriptedSubmitter {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicU32,
}

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum Scripted {
    Accept,
    Fail(SubmissionError),
    /// Never answer (exercises timeouts and aborts).
    Hang,
}

impl ScriptedSubmitter {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicU32::new(0),
        }
    }

    /// Number of times `submit` was called.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Scripted {
        self.script
            .lock()
            .map(|mut script| script.pop_front())
            .ok()
            .flatten()
            .unwrap_or(Scripted::Accept)
    }
}

#[async_trait]
impl OrderSubmitter for ScriptedSubmitter {
    async fn submit(&self, order: &Order) -> Result<OrderReceipt, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next() {
            Scripted::Accept => Ok(OrderReceipt::for_order(order)),
            Scripted::Fail(e) => Err(e),
            Scripted::Hang => futures::future::pending().await,
        }
    }
}
