use crate::frame::{FRAME_LEN, Frame, FrameKind};
use crate::transfer::transfer_error::ProtocolError;
use crate::transport::UsbTransport;

/// Block until the peer acknowledges the previous send.
///
/// One read of exactly one 16-byte frame from the IN endpoint, no timeout.
/// An ack carries no payload; only its arrival matters, so success returns
/// nothing. Any non-ack kind aborts the session.
pub fn wait_ack(transport: &mut dyn UsbTransport) -> Result<(), ProtocolError> {
    let buf = transport.read(FRAME_LEN)?;
    let frame = Frame::decode(&buf)?;
    match FrameKind::from_u32(frame.kind) {
        Some(FrameKind::Ack) => Ok(()),
        _ => Err(ProtocolError::UnexpectedKind(frame.kind)),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::frame::FrameError;
    use crate::transport::{FakeTransport, TransportError};

    #[test]
    fn accepts_ack_frame() {
        let mut fake = FakeTransport::new();
        fake.push_read(Frame::ack().encode().expect("encode failed"));
        wait_ack(&mut fake).expect("ack should be accepted");
    }

    #[test]
    fn rejects_wrong_kind() {
        let mut fake = FakeTransport::new();
        fake.push_read(Frame::range(0, 8).encode().expect("encode failed"));
        match wait_ack(&mut fake) {
            Err(ProtocolError::UnexpectedKind(2)) => {}
            other => panic!("expected UnexpectedKind(2), got: {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_magic() {
        let mut fake = FakeTransport::new();
        let mut bytes = Frame::ack().encode().expect("encode failed");
        bytes[2] ^= 0x40;
        fake.push_read(bytes);
        match wait_ack(&mut fake) {
            Err(ProtocolError::Malformed(FrameError::BadMagic(_))) => {}
            other => panic!("expected Malformed(BadMagic), got: {:?}", other),
        }
    }

    #[test]
    fn rejects_short_read() {
        let mut fake = FakeTransport::new();
        fake.push_read(vec![0u8; 7]);
        match wait_ack(&mut fake) {
            Err(ProtocolError::Malformed(FrameError::BadLength(7))) => {}
            other => panic!("expected Malformed(BadLength), got: {:?}", other),
        }
    }

    #[test]
    fn propagates_transport_failure() {
        let mut fake = FakeTransport::new();
        fake.push_read_error(TransportError::Closed);
        match wait_ack(&mut fake) {
            Err(ProtocolError::Transport(TransportError::Closed)) => {}
            other => panic!("expected Transport(Closed), got: {:?}", other),
        }
    }
}
