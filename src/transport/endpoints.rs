use crate::transport::transport_error::TransportError;

/// Blocking access to an already-open pair of unidirectional bulk endpoints.
///
/// Implementations block with no timeout: a call returns only once the
/// transfer completed or the transport itself failed. The protocol layer
/// never polls and never cancels.
pub trait UsbTransport {
    /// Write the whole buffer to the OUT endpoint.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Read up to `max_len` bytes from the IN endpoint.
    fn read(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError>;
}
