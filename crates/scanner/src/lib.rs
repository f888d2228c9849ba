//! Barcode capture seam.
//!
//! The camera and decoder live outside the core. A [`BarcodeCapability`]
//! is started and stopped by the host; while running it delivers decoded
//! codes and decoder errors one at a time through a [`ScanFeed`].

pub mod capability;
pub mod feed;

pub use capability::{BarcodeCapability, ChannelScanner};
pub use feed::{ScanEvent, ScanFeed};
