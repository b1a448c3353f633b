use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    BadLength(usize),
    BadMagic(u32),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FrameError::*;
        match self {
            BadLength(n) => write!(f, "expected a 16-byte frame, got {n} bytes"),
            BadMagic(m) => write!(f, "bad frame magic: 0x{m:08X}"),
        }
    }
}
impl std::error::Error for FrameError {}
