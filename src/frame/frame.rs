use byteorder::{LittleEndian, WriteBytesExt};

use crate::frame::frame_error::FrameError;

/// Protocol
/// ----------- Control frame (16 bytes) -----------
/// magic (u32 LE) - kind (u32 LE) - field_a (u32 LE) - field_b (u32 LE)
/// ------------------------------------------------
/// Payloads (filename bytes, file chunks) follow their announcing frame raw
/// and unframed; their length is established by the frame's fields.
///
/// Wire signature of every control frame ("TUTR").
pub const MAGIC: u32 = 0x5455_5452;

/// Size of an encoded control frame on the wire.
pub const FRAME_LEN: usize = 16;

/// Ceiling for a single data payload (16 MiB).
pub const CHUNK_SIZE: usize = 0x0100_0000;

// ---- Frame kind word ------------------------------------------------------

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FrameKind {
    /// `field_b` carries the byte length of the filename payload that follows.
    FilenameLength = 1,
    /// `field_a`/`field_b` carry the start/end (exclusive) offsets of the
    /// chunk about to be sent; an empty range signals end of file.
    Range = 2,
    /// No payload; pure synchronization from the peer.
    Ack = 3,
}

impl FrameKind {
    pub fn from_u32(v: u32) -> Option<FrameKind> {
        use FrameKind::*;
        match v {
            1 => Some(FilenameLength),
            2 => Some(Range),
            3 => Some(Ack),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

// ---- Frame ----------------------------------------------------------------

/// One decoded control frame. `kind` stays a raw word: the codec validates
/// only length and magic, expected-kind checks belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: u32,
    pub field_a: u32,
    pub field_b: u32,
}

impl Frame {
    pub fn filename_length(len: u32) -> Self {
        Self {
            kind: FrameKind::FilenameLength.as_u32(),
            field_a: 0,
            field_b: len,
        }
    }

    pub fn range(start: u32, end: u32) -> Self {
        Self {
            kind: FrameKind::Range.as_u32(),
            field_a: start,
            field_b: end,
        }
    }

    pub fn ack() -> Self {
        Self {
            kind: FrameKind::Ack.as_u32(),
            field_a: 0,
            field_b: 0,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut buf = Vec::with_capacity(FRAME_LEN);
        buf.write_u32::<LittleEndian>(MAGIC)?;
        buf.write_u32::<LittleEndian>(self.kind)?;
        buf.write_u32::<LittleEndian>(self.field_a)?;
        buf.write_u32::<LittleEndian>(self.field_b)?;
        Ok(buf)
    }

    pub fn decode(buf: &[u8]) -> Result<Frame, FrameError> {
        if buf.len() != FRAME_LEN {
            return Err(FrameError::BadLength(buf.len()));
        }
        let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if magic != MAGIC {
            return Err(FrameError::BadMagic(magic));
        }
        let kind = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let field_a = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
        let field_b = u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]);
        Ok(Frame {
            kind,
            field_a,
            field_b,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_kind() {
        for (kind, a, b) in [
            (FrameKind::FilenameLength, 0, 12),
            (FrameKind::Range, 0x1000, 0x2000),
            (FrameKind::Ack, 0, 0),
        ] {
            let frame = Frame {
                kind: kind.as_u32(),
                field_a: a,
                field_b: b,
            };
            let bytes = frame.encode().expect("encode failed");
            assert_eq!(bytes.len(), FRAME_LEN);
            let decoded = Frame::decode(&bytes).expect("decode failed");
            assert_eq!(decoded, frame);
        }
    }

    #[test]
    fn encodes_magic_little_endian_first() {
        let bytes = Frame::ack().encode().expect("encode failed");
        // 0x54555452 little-endian: "RTUT" on the wire.
        assert_eq!(&bytes[..4], &[0x52, 0x54, 0x55, 0x54]);
        assert_eq!(&bytes[4..8], &[3, 0, 0, 0]);
    }

    #[test]
    fn rejects_wrong_length() {
        for len in [0, 15, 17, 32] {
            let buf = vec![0u8; len];
            match Frame::decode(&buf) {
                Err(FrameError::BadLength(n)) => assert_eq!(n, len),
                other => panic!("expected BadLength, got: {:?}", other),
            }
        }
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut bytes = Frame::range(0, 8).encode().expect("encode failed");
        bytes[0] ^= 0xFF;
        match Frame::decode(&bytes) {
            Err(FrameError::BadMagic(m)) => assert_ne!(m, MAGIC),
            other => panic!("expected BadMagic, got: {:?}", other),
        }
    }

    #[test]
    fn decode_keeps_unknown_kind_raw() {
        let frame = Frame {
            kind: 9,
            field_a: 1,
            field_b: 2,
        };
        let bytes = frame.encode().expect("encode failed");
        let decoded = Frame::decode(&bytes).expect("decode failed");
        assert_eq!(decoded.kind, 9);
        assert_eq!(FrameKind::from_u32(decoded.kind), None);
    }

    #[test]
    fn constructors_fix_unused_fields() {
        assert_eq!(
            Frame::filename_length(7),
            Frame {
                kind: 1,
                field_a: 0,
                field_b: 7
            }
        );
        assert_eq!(
            Frame::ack(),
            Frame {
                kind: 3,
                field_a: 0,
                field_b: 0
            }
        );
    }
}
