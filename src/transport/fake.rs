use std::collections::VecDeque;

use crate::transport::endpoints::UsbTransport;
use crate::transport::transport_error::TransportError;

/// Minimal fake endpoint pair used in tests to script reads and record writes.
///
/// Inbound reads are served from a queue of pre-loaded buffers; once the
/// script runs dry, `read` fails with `TransportError::Closed` so a test
/// observes exactly where the protocol engine blocked waiting for an ack.
#[derive(Default)]
pub struct FakeTransport {
    script: VecDeque<Result<Vec<u8>, TransportError>>,
    writes: Vec<Vec<u8>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one inbound buffer to be returned by a future `read`.
    pub fn push_read(&mut self, bytes: Vec<u8>) {
        self.script.push_back(Ok(bytes));
    }

    /// Queue an inbound transport failure.
    pub fn push_read_error(&mut self, err: TransportError) {
        self.script.push_back(Err(err));
    }

    /// Everything written to the OUT endpoint, one buffer per `write` call.
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }
}

impl UsbTransport for FakeTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.writes.push(bytes.to_vec());
        Ok(())
    }

    fn read(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError> {
        match self.script.pop_front() {
            Some(Ok(mut bytes)) => {
                bytes.truncate(max_len);
                Ok(bytes)
            }
            Some(Err(err)) => Err(err),
            None => Err(TransportError::Closed),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn scripts_reads_and_records_writes() {
        let mut fake = FakeTransport::new();
        fake.push_read(vec![1, 2, 3]);

        fake.write(b"out").expect("write failed");
        assert_eq!(fake.writes(), &[b"out".to_vec()]);

        let read = fake.read(16).expect("read failed");
        assert_eq!(read, vec![1, 2, 3]);

        // Script exhausted: the next read fails instead of blocking forever.
        match fake.read(16) {
            Err(TransportError::Closed) => {}
            other => panic!("expected Closed, got: {:?}", other),
        }
    }

    #[test]
    fn read_respects_max_len() {
        let mut fake = FakeTransport::new();
        fake.push_read(vec![9; 32]);
        let read = fake.read(16).expect("read failed");
        assert_eq!(read.len(), 16);
    }
}
