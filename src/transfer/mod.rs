pub mod ack;
pub mod engine;
pub mod transfer_error;

pub use ack::wait_ack;
pub use engine::TransferEngine;
pub use transfer_error::{ProtocolError, TransferError};
