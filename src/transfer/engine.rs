use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::frame::{CHUNK_SIZE, Frame};
use crate::log::log_sink::LogSink;
use crate::transfer::ack::wait_ack;
use crate::transfer::transfer_error::TransferError;
use crate::transport::UsbTransport;
use crate::{sink_debug, sink_info};

/// Drives one complete transfer session over an owned endpoint pair.
///
/// The protocol is strictly half-duplex: every control frame and every raw
/// payload write is followed by a blocking acknowledgment wait before
/// anything else goes out. A session ends by announcing one empty range
/// `[tot, tot)`; no closing frame follows it.
pub struct TransferEngine<T: UsbTransport> {
    transport: T,
    chunk_size: usize,
    log_sink: Arc<dyn LogSink>,
}

impl<T: UsbTransport> TransferEngine<T> {
    pub fn new(transport: T, log_sink: Arc<dyn LogSink>) -> Self {
        Self::with_chunk_size(transport, CHUNK_SIZE, log_sink)
    }

    /// Same engine with a smaller chunk ceiling, so tests can drive
    /// multi-chunk sessions without multi-gigabyte fixtures.
    pub fn with_chunk_size(transport: T, chunk_size: usize, log_sink: Arc<dyn LogSink>) -> Self {
        Self {
            transport,
            chunk_size,
            log_sink,
        }
    }

    /// The underlying endpoint pair; tests inspect recorded fake writes.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one file, end to end: filename length, filename bytes, then the
    /// chunk loop, each send gated on an ack.
    pub fn send_file(&mut self, path: &Path) -> Result<(), TransferError> {
        if !path.is_file() {
            return Err(TransferError::FileNotFound(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TransferError::Filename(path.to_path_buf()))?;
        let name_bytes = name.as_bytes();

        // The file stays open for exactly this scope; any early return below
        // closes it before the error surfaces.
        let mut file = File::open(path)?;
        let tot = file.metadata()?.len();
        if tot > u64::from(u32::MAX) {
            return Err(TransferError::TooLarge(tot));
        }

        sink_info!(self.log_sink, "start {} ({} bytes)", name, tot);

        self.send_frame(Frame::filename_length(name_bytes.len() as u32))?;
        wait_ack(&mut self.transport)?;
        self.transport.write(name_bytes)?;
        wait_ack(&mut self.transport)?;

        let mut pos: u64 = 0;
        let mut chunk = vec![0u8; self.chunk_size];
        loop {
            let n = read_full(&mut file, &mut chunk)?;
            let end = pos + n as u64;

            self.send_frame(Frame::range(pos as u32, end as u32))?;
            println!("send range {pos}-{end}");
            wait_ack(&mut self.transport)?;

            // Pre-advance cursor check: the last non-empty chunk has already
            // gone out, so this iteration announced the empty range [tot, tot)
            // that tells the peer the file is complete.
            if pos == tot {
                break;
            }

            pos = end;
            self.transport.write(&chunk[..n])?;
            wait_ack(&mut self.transport)?;
        }

        sink_info!(self.log_sink, "sent {} ({} bytes)", name, tot);
        Ok(())
    }

    fn send_frame(&mut self, frame: Frame) -> Result<(), TransferError> {
        sink_debug!(
            self.log_sink,
            "frame out: kind={} a={} b={}",
            frame.kind,
            frame.field_a,
            frame.field_b
        );
        let bytes = frame.encode()?;
        self.transport.write(&bytes)?;
        Ok(())
    }
}

/// Fill `buf` from the file until full or EOF; a plain `read` may return
/// short mid-file, which would skew the announced ranges.
fn read_full(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
