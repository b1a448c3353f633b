//! usblink is the host side of a USB bulk-endpoint file transfer.
//!
//! It pushes a single local file to a connected peer using a small framed
//! request/acknowledgment protocol: a 16-byte control frame announces the
//! filename and each byte range, the raw payload follows, and every send is
//! gated on a 16-byte acknowledgment frame from the peer.
//!
//! The `usblink` binary takes one positional argument, the path of the file
//! to send.

/// Handles configuration loading and management.
pub mod config;
/// Control-frame wire codec.
pub mod frame;
/// Logging utilities for the application.
pub mod log;
/// The transfer protocol state machine and acknowledgment gating.
pub mod transfer;
/// USB bulk-endpoint transport, real and fake.
pub mod transport;
