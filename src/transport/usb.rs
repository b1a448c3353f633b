use std::time::Duration;

use rusb::{Device, DeviceHandle, Direction, GlobalContext, TransferType};

use crate::transport::endpoints::UsbTransport;
use crate::transport::transport_error::TransportError;

/// libusb sentinel: a zero timeout blocks until the transfer completes.
const NO_TIMEOUT: Duration = Duration::ZERO;

/// The single bulk IN / bulk OUT endpoint pair of the peer device.
///
/// Setup walks the device exactly once: first configuration, first
/// interface, and the one bulk endpoint per direction it exposes. After
/// `open` returns, the protocol layer only ever calls `write` and `read`.
pub struct UsbEndpoints {
    handle: DeviceHandle<GlobalContext>,
    ep_in: u8,
    ep_out: u8,
}

impl UsbEndpoints {
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self, TransportError> {
        let device = find_device(vendor_id, product_id)?.ok_or(TransportError::DeviceNotFound {
            vendor_id,
            product_id,
        })?;

        let config = device.config_descriptor(0).map_err(TransportError::Usb)?;
        let interface = config
            .interfaces()
            .next()
            .ok_or(TransportError::NoBulkEndpoint("in"))?;
        let descriptor = interface
            .descriptors()
            .next()
            .ok_or(TransportError::NoBulkEndpoint("in"))?;

        let mut ep_in = None;
        let mut ep_out = None;
        for endpoint in descriptor.endpoint_descriptors() {
            if endpoint.transfer_type() != TransferType::Bulk {
                continue;
            }
            match endpoint.direction() {
                Direction::In => ep_in = Some(endpoint.address()),
                Direction::Out => ep_out = Some(endpoint.address()),
            }
        }
        let ep_in = ep_in.ok_or(TransportError::NoBulkEndpoint("in"))?;
        let ep_out = ep_out.ok_or(TransportError::NoBulkEndpoint("out"))?;

        let mut handle = device.open().map_err(TransportError::Usb)?;
        // Not supported on every platform; claiming still works without it.
        let _ = handle.set_auto_detach_kernel_driver(true);
        handle
            .set_active_configuration(config.number())
            .map_err(TransportError::Usb)?;
        handle
            .claim_interface(descriptor.interface_number())
            .map_err(TransportError::Usb)?;

        Ok(Self {
            handle,
            ep_in,
            ep_out,
        })
    }
}

impl UsbTransport for UsbEndpoints {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut sent = 0;
        while sent < bytes.len() {
            let n = self
                .handle
                .write_bulk(self.ep_out, &bytes[sent..], NO_TIMEOUT)
                .map_err(TransportError::Usb)?;
            if n == 0 {
                return Err(TransportError::Closed);
            }
            sent += n;
        }
        Ok(())
    }

    fn read(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; max_len];
        let n = self
            .handle
            .read_bulk(self.ep_in, &mut buf, NO_TIMEOUT)
            .map_err(TransportError::Usb)?;
        buf.truncate(n);
        Ok(buf)
    }
}

fn find_device(
    vendor_id: u16,
    product_id: u16,
) -> Result<Option<Device<GlobalContext>>, TransportError> {
    for device in rusb::devices().map_err(TransportError::Usb)?.iter() {
        let Ok(descriptor) = device.device_descriptor() else {
            continue;
        };
        if descriptor.vendor_id() == vendor_id && descriptor.product_id() == product_id {
            return Ok(Some(device));
        }
    }
    Ok(None)
}
