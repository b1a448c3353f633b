pub mod endpoints;
pub mod fake;
pub mod transport_error;
pub mod usb;

pub use endpoints::UsbTransport;
pub use fake::FakeTransport;
pub use transport_error::TransportError;
pub use usb::UsbEndpoints;
