use std::fmt;

#[derive(Debug)]
pub enum TransportError {
    /// No connected device matches the configured vendor/product pair.
    DeviceNotFound { vendor_id: u16, product_id: u16 },
    /// The device's first interface lacks a bulk endpoint in the named direction.
    NoBulkEndpoint(&'static str),
    Usb(rusb::Error),
    /// The endpoint stopped producing data (a scripted fake ran dry, or a
    /// zero-length bulk completion where bytes were required).
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TransportError::*;
        match self {
            DeviceNotFound {
                vendor_id,
                product_id,
            } => write!(f, "no usb device {vendor_id:04x}:{product_id:04x}"),
            NoBulkEndpoint(dir) => write!(f, "no bulk {dir} endpoint on first interface"),
            Usb(e) => write!(f, "usb transfer error: {e}"),
            Closed => write!(f, "endpoint closed"),
        }
    }
}
impl std::error::Error for TransportError {}
