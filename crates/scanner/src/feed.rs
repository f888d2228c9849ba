use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Output of the barcode decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanEvent {
    /// A code was read from the camera stream.
    Decoded(String),
    /// The decoder reported a problem while running.
    Error(String),
}

/// Receiving end of a running scanner.
///
/// Events arrive in the order the decoder produced them. The feed is meant
/// for a single consumer (the UI event loop), which applies each event as an
/// atomic input; when several arrive together the last one wins.
#[derive(Debug)]
pub struct ScanFeed {
    receiver: Receiver<ScanEvent>,
}

impl ScanFeed {
    pub fn new(receiver: Receiver<ScanEvent>) -> Self {
        Self { receiver }
    }

    /// Block until the next event is available.
    pub fn recv(&self) -> Result<ScanEvent, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event without blocking.
    pub fn try_recv(&self) -> Result<ScanEvent, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<ScanEvent, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything queued right now, oldest first.
    pub fn drain(&self) -> Vec<ScanEvent> {
        self.receiver.try_iter().collect()
    }
}
