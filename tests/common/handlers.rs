//! Shared fixtures: message types, recording handlers and a recording bus.

use async_trait::async_trait;
use bus_activator::prelude::*;
use bus_activator::Message;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlaced {
    pub order_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCancelled {
    pub order_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentSent {
    pub tracking_number: String,
}

/// Ordered record of handle and dispose calls across handlers
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.starts_with(prefix))
            .collect()
    }
}

/// Handler that records every call in a journal
pub struct TrackedHandler {
    label: String,
    disposable: bool,
    fail_dispose: bool,
    handled: AtomicUsize,
    disposed: AtomicUsize,
    journal: Journal,
}

impl TrackedHandler {
    pub fn new(label: impl Into<String>, journal: &Journal) -> Self {
        Self {
            label: label.into(),
            disposable: false,
            fail_dispose: false,
            handled: AtomicUsize::new(0),
            disposed: AtomicUsize::new(0),
            journal: journal.clone(),
        }
    }

    pub fn disposable(mut self) -> Self {
        self.disposable = true;
        self
    }

    pub fn failing_dispose(mut self) -> Self {
        self.disposable = true;
        self.fail_dispose = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handled(&self) -> usize {
        self.handled.load(Ordering::SeqCst)
    }

    pub fn disposed(&self) -> usize {
        self.disposed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<M: Message> HandleMessages<M> for TrackedHandler {
    async fn handle(&self, _message: &M) -> HandlerResult<()> {
        self.handled.fetch_add(1, Ordering::SeqCst);
        self.journal.record(format!("handle:{}", self.label));
        Ok(())
    }

    fn handler_name(&self) -> &str {
        &self.label
    }

    fn as_disposable(&self) -> Option<&dyn Dispose> {
        if self.disposable {
            Some(self)
        } else {
            None
        }
    }
}

#[async_trait]
impl Dispose for TrackedHandler {
    async fn dispose(&self) -> HandlerResult<()> {
        self.disposed.fetch_add(1, Ordering::SeqCst);
        self.journal.record(format!("dispose:{}", self.label));
        if self.fail_dispose {
            return Err(format!("{} failed to release its resources", self.label).into());
        }
        Ok(())
    }
}

/// Bus facade that records what handlers send through it
pub struct RecordingBus {
    name: String,
    sent: Mutex<Vec<String>>,
    disposed: AtomicUsize,
}

impl RecordingBus {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            sent: Mutex::new(Vec::new()),
            disposed: AtomicUsize::new(0),
        })
    }

    pub fn send(&self, message: impl Into<String>) {
        self.sent.lock().push(message.into());
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn disposed(&self) -> usize {
        self.disposed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Bus for RecordingBus {
    fn bus_name(&self) -> &str {
        &self.name
    }

    async fn dispose(&self) -> HandlerResult<()> {
        self.disposed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Names of resolved handlers, in order
pub fn handler_names<M: Message>(handlers: &[SharedHandler<M>]) -> Vec<String> {
    handlers
        .iter()
        .map(|handler| handler.handler_name().to_string())
        .collect()
}

/// Run one delivery the way a pipeline would
///
/// Resolves, invokes every handler in order and completes the transaction,
/// aborting it when a handler fails. Returns the number of handlers invoked.
pub async fn deliver<A, M>(adapter: &A, message: &M) -> anyhow::Result<usize>
where
    A: ContainerAdapter,
    M: Message,
{
    let transaction = DeliveryTransaction::new();
    let handlers = adapter.get_handlers(message, &transaction).await?;

    for handler in &handlers {
        if let Err(e) = handler.handle(message).await {
            transaction.complete(TransactionOutcome::Aborted).await?;
            return Err(anyhow::anyhow!("handler {} failed: {e}", handler.handler_name()));
        }
    }

    transaction.complete(TransactionOutcome::Committed).await?;
    Ok(handlers.len())
}
