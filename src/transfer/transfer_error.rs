use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::frame::FrameError;
use crate::transport::TransportError;

/// Errors from the acknowledgment exchange: transport vs frame contents.
#[derive(Debug)]
pub enum ProtocolError {
    Transport(TransportError),
    Malformed(FrameError),
    UnexpectedKind(u32),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ProtocolError::*;
        match self {
            Transport(e) => write!(f, "transport error: {e}"),
            Malformed(e) => write!(f, "malformed acknowledgment: {e}"),
            UnexpectedKind(kind) => write!(f, "expected ack frame, got kind {kind}"),
        }
    }
}
impl std::error::Error for ProtocolError {}

impl From<TransportError> for ProtocolError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<FrameError> for ProtocolError {
    fn from(e: FrameError) -> Self {
        Self::Malformed(e)
    }
}

/// Session-level errors surfaced by the transfer engine.
#[derive(Debug)]
pub enum TransferError {
    /// The source path does not resolve to an existing file; checked before
    /// any frame is written.
    FileNotFound(PathBuf),
    /// The path has no usable final component (or it is not valid UTF-8).
    Filename(PathBuf),
    /// Wire offsets are u32; a session cannot carry more than 4 GiB.
    TooLarge(u64),
    Io(io::Error),
    Protocol(ProtocolError),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TransferError::*;
        match self {
            FileNotFound(path) => write!(f, "{} not exists", path.display()),
            Filename(path) => write!(f, "no usable filename in {}", path.display()),
            TooLarge(size) => write!(f, "file of {size} bytes exceeds the 4 GiB session limit"),
            Io(e) => write!(f, "file i/o error: {e}"),
            Protocol(e) => write!(f, "{e}"),
        }
    }
}
impl std::error::Error for TransferError {}

impl From<io::Error> for TransferError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ProtocolError> for TransferError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

impl From<TransportError> for TransferError {
    fn from(e: TransportError) -> Self {
        Self::Protocol(ProtocolError::Transport(e))
    }
}
