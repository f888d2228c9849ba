use std::sync::mpsc::{self, Sender};

use retaildesk_core::{DomainError, DomainResult};

use crate::feed::{ScanEvent, ScanFeed};

/// A barcode scanner the host can start and stop.
pub trait BarcodeCapability {
    /// Start capturing. Fails with `DomainError::Capability` when the device
    /// cannot be opened (e.g. camera permission denied).
    fn start(&mut self) -> DomainResult<ScanFeed>;

    /// Stop capturing. The feed returned by `start` disconnects.
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Channel-backed scanner driven by calls to [`ChannelScanner::emit_decoded`]
/// and [`ChannelScanner::emit_error`].
///
/// Used by hosts that decode elsewhere and forward results, and in tests.
#[derive(Debug, Default)]
pub struct ChannelScanner {
    sender: Option<Sender<ScanEvent>>,
    unavailable: Option<String>,
}

impl ChannelScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scanner whose device cannot be opened.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            sender: None,
            unavailable: Some(reason.into()),
        }
    }

    /// Forward a decoded code. Returns `false` if the scanner is stopped or
    /// nobody is listening.
    pub fn emit_decoded(&self, code: impl Into<String>) -> bool {
        self.emit(ScanEvent::Decoded(code.into()))
    }

    pub fn emit_error(&self, message: impl Into<String>) -> bool {
        self.emit(ScanEvent::Error(message.into()))
    }

    fn emit(&self, event: ScanEvent) -> bool {
        match &self.sender {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }
}

impl BarcodeCapability for ChannelScanner {
    fn start(&mut self) -> DomainResult<ScanFeed> {
        if let Some(reason) = &self.unavailable {
            tracing::warn!(reason = %reason, "barcode scanner failed to start");
            return Err(DomainError::capability(reason.clone()));
        }
        let (tx, rx) = mpsc::channel();
        // Restarting replaces the previous feed.
        self.sender = Some(tx);
        tracing::info!("barcode scanner started");
        Ok(ScanFeed::new(rx))
    }

    fn stop(&mut self) {
        if self.sender.take().is_some() {
            tracing::info!("barcode scanner stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.sender.is_some()
    }
}
