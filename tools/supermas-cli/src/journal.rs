//! Order journal: placed orders appended to a JSON-lines file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use supermas_commerce::checkout::{Order, OrderReceipt, OrderSubmitter};
use supermas_commerce::error::SubmissionError;
use supermas_commerce::ids::OrderId;

/// Acknowledges an order once its JSON line is flushed to the journal.
#[derive(Debug, Clone)]
pub struct JournalSubmitter {
    path: PathBuf,
}

impl JournalSubmitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an order with this ID is already in the journal.
    ///
    /// Lines that do not parse (a write cut short) are ignored.
    async fn contains(&self, id: &OrderId) -> std::io::Result<bool> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        Ok(content
            .lines()
            .filter_map(|l| serde_json::from_str::<JournalEntry>(l).ok())
            .any(|entry| entry.id == *id))
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        // Start on a fresh line if an earlier write was cut short.
        let torn = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes.last().is_some_and(|b| *b != b'\n'),
            Err(_) => false,
        };
        let record = if torn {
            format!("\n{}\n", line)
        } else {
            format!("{}\n", line)
        };
        file.write_all(record.as_bytes()).await?;
        file.flush().await
    }
}

/// The part of a journal line needed to recognise a resubmission.
#[derive(Deserialize)]
struct JournalEntry {
    id: OrderId,
}

#[async_trait]
impl OrderSubmitter for JournalSubmitter {
    async fn submit(&self, order: &Order) -> Result<OrderReceipt, SubmissionError> {
        let line = order
            .to_json()
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
        let io_error =
            |e: std::io::Error| SubmissionError::Network(format!("writing {}: {}", self.path.display(), e));

        if self.contains(&order.id).await.map_err(io_error)? {
            tracing::debug!(order_id = %order.id, "order already journaled");
            return Ok(OrderReceipt::for_order(order));
        }

        self.append(&line).await.map_err(io_error)?;

        tracing::debug!(order_id = %order.id, path = %self.path.display(), "order journaled");
        Ok(OrderReceipt::for_order(order))
    }
}
