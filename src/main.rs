//! The `usblink` command-line binary: send one file to the USB peer.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use usblink::config::Config;
use usblink::log::log_sink::LogSink;
use usblink::log::logger::Logger;
use usblink::sink_error;
use usblink::transfer::engine::TransferEngine;
use usblink::transport::{TransportError, UsbEndpoints};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        println!("Usage: usblink PATH_TO_FILE");
        return ExitCode::SUCCESS;
    }

    let config = Config::load("usblink.conf").unwrap_or_else(|_| Config::empty());
    let logger = Logger::start(1024, &config);
    let log_sink = Arc::new(logger.handle());

    let endpoints = match UsbEndpoints::open(config.vendor_id(), config.product_id()) {
        Ok(endpoints) => endpoints,
        Err(TransportError::DeviceNotFound { .. }) => {
            println!("usb device not found");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            sink_error!(log_sink, "usb setup failed: {}", e);
            eprintln!("usb setup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let path = Path::new(&args[1]);
    if !path.exists() {
        println!("{} not exists", path.display());
        return ExitCode::SUCCESS;
    }

    let mut engine = TransferEngine::new(endpoints, log_sink.clone());
    match engine.send_file(path) {
        Ok(()) => {
            println!("done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            sink_error!(log_sink, "transfer failed: {}", e);
            eprintln!("transfer failed: {e}");
            ExitCode::FAILURE
        }
    }
}
