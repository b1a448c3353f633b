use std::collections::HashMap;
use std::fs;

/// Device identity of the usblink peer; overridable via `[usb]` config keys.
pub const DEFAULT_VENDOR_ID: u16 = 0x057E;
pub const DEFAULT_PRODUCT_ID: u16 = 0x3000;

/// INI-style configuration (`usblink.conf`).
///
/// Recognized keys:
/// - `[usb] vendor_id`, `product_id` — hex (`0x057E`) or decimal.
/// - `[logging] log_path`, `log_filename`.
///
/// The file is optional; every key has a default.
#[derive(Debug)]
pub struct Config {
    globals: HashMap<String, String>,
    sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Error reading file {path}: {e}"))?;

        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = Some(line[1..line.len() - 1].to_string());
                continue;
            }

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim().to_string();
                let value = line[pos + 1..].trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Ok(Config { globals, sections })
    }

    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
            .or_else(|| self.globals.get(key).map(|s| s.as_str()))
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    /// `[usb] vendor_id`, defaulting to the usblink peer's.
    #[must_use]
    pub fn vendor_id(&self) -> u16 {
        self.get_u16("usb", "vendor_id").unwrap_or(DEFAULT_VENDOR_ID)
    }

    /// `[usb] product_id`, defaulting to the usblink peer's.
    #[must_use]
    pub fn product_id(&self) -> u16 {
        self.get_u16("usb", "product_id")
            .unwrap_or(DEFAULT_PRODUCT_ID)
    }

    /// Parse a u16 key, accepting `0x`-prefixed hex or plain decimal.
    /// Unparseable values fall through to the caller's default.
    #[must_use]
    pub fn get_u16(&self, section: &str, key: &str) -> Option<u16> {
        let raw = self.get_non_empty(section, key)?;
        if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            u16::from_str_radix(hex, 16).ok()
        } else {
            raw.parse().ok()
        }
    }
}
