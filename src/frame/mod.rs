pub mod frame;
pub mod frame_error;

pub use frame::{CHUNK_SIZE, FRAME_LEN, Frame, FrameKind, MAGIC};
pub use frame_error::FrameError;
