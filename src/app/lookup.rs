//! Background dictionary lookups
//!
//! One worker thread answers lookups in request order. Requests carry a
//! generation number; when several are queued the worker answers only the
//! newest, and the session ignores answers for any generation but its
//! current one.

use crate::game::dictionary::Dictionary;
use crate::game::validation;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A word to look up, stamped with the board generation it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub word: String,
}

/// The answer to a [`LookupRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub generation: u64,
    pub word: String,
    pub found: bool,
}

/// Handle to the lookup thread
pub struct LookupWorker {
    /// Channel to send requests to the worker
    tx: Sender<LookupRequest>,
    /// Channel to receive answers from the worker
    rx: Receiver<LookupResponse>,
    /// Whether the worker thread is still running
    alive: bool,
}

impl LookupWorker {
    /// Start a worker thread answering lookups against `dictionary`
    pub fn spawn(dictionary: Arc<dyn Dictionary>) -> Self {
        let (request_tx, request_rx) = channel::<LookupRequest>();
        let (response_tx, response_rx) = channel::<LookupResponse>();

        thread::spawn(move || {
            while let Ok(mut request) = request_rx.recv() {
                // Only the newest queued request matters
                while let Ok(newer) = request_rx.try_recv() {
                    log::debug!("lookup #{} superseded before it ran", request.generation);
                    request = newer;
                }

                let found = validation::is_in_dictionary(&request.word, dictionary.as_ref());
                let response = LookupResponse {
                    generation: request.generation,
                    word: request.word,
                    found,
                };
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        });

        LookupWorker {
            tx: request_tx,
            rx: response_rx,
            alive: true,
        }
    }

    /// Queue a lookup. Returns false if the worker is gone.
    pub fn submit(&mut self, generation: u64, word: String) -> bool {
        if self.tx.send(LookupRequest { generation, word }).is_err() {
            self.alive = false;
        }
        self.alive
    }

    /// Try to receive an answer (non-blocking)
    pub fn try_recv(&mut self) -> Option<LookupResponse> {
        match self.rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.alive = false;
                None
            }
        }
    }

    /// Wait up to `timeout` for an answer
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<LookupResponse> {
        match self.rx.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.alive = false;
                None
            }
        }
    }

    /// Check if the worker thread is still running
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}
