//! Background query runner
//!
//! Fetches run on worker threads and report back over a channel that the
//! UI drains on every tick. Each fetch is stamped with a generation so a
//! slow response to an older request can never overwrite a newer one.

use super::api::ApiError;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Instant;
use tracing::{debug, warn};

/// What a view needs to render a query
#[derive(Debug, Clone)]
pub struct QueryState<R> {
    pub data: Option<R>,
    pub is_loading: bool,
    pub error: Option<ApiError>,
}

impl<R> Default for QueryState<R> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

struct QueryMessage<R> {
    generation: u64,
    result: Result<R, ApiError>,
}

pub struct QueryRunner<R> {
    label: &'static str,
    sender: Sender<QueryMessage<R>>,
    receiver: Receiver<QueryMessage<R>>,
    generation: u64,
    started: Option<Instant>,
    state: QueryState<R>,
}

impl<R: Send + 'static> QueryRunner<R> {
    pub fn new(label: &'static str) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            label,
            sender,
            receiver,
            generation: 0,
            started: None,
            state: QueryState::default(),
        }
    }

    pub fn state(&self) -> &QueryState<R> {
        &self.state
    }

    /// Issue a new request, superseding any in flight
    pub fn fetch<F>(&mut self, fetch: F)
    where
        F: FnOnce() -> Result<R, ApiError> + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let sender = self.sender.clone();

        debug!(query = self.label, generation, "fetch issued");
        thread::spawn(move || {
            let result = fetch();
            // Receiver is gone once the page is dropped
            let _ = sender.send(QueryMessage { generation, result });
        });

        self.started = Some(Instant::now());
        self.state.is_loading = true;
        self.state.error = None;
    }

    /// Drop current data and ignore anything still in flight
    pub fn reset(&mut self) {
        self.generation += 1;
        self.started = None;
        self.state = QueryState::default();
    }

    /// Apply finished responses, returns true if the state changed
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(message) => changed |= self.accept(message),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    fn accept(&mut self, message: QueryMessage<R>) -> bool {
        if message.generation != self.generation {
            debug!(
                query = self.label,
                generation = message.generation,
                current = self.generation,
                "discarded stale response"
            );
            return false;
        }

        let elapsed_ms = self
            .started
            .take()
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or_default();

        self.state.is_loading = false;
        match message.result {
            Ok(data) => {
                debug!(query = self.label, generation = message.generation, elapsed_ms, "fetch completed");
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(err) => {
                warn!(query = self.label, generation = message.generation, error = %err, "fetch failed");
                self.state.error = Some(err);
            }
        }
        true
    }
}
