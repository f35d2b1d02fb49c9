use serde::{Deserialize, Serialize};

use filekeep_base::{FilekeepError, FilekeepResult};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Text encoding used for serialized payloads and the recent-files history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16le")]
    Utf16Le,
    #[serde(rename = "utf-16be")]
    Utf16Be,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
        }
    }

    /// Encode `text` without a byte order mark.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }

    /// Decode `bytes`, skipping a leading byte order mark that matches this encoding.
    pub fn decode(self, bytes: &[u8]) -> FilekeepResult<String> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                String::from_utf8(bytes.to_vec())
                    .map_err(|e| Box::new(FilekeepError::serialization(self.name(), e)))
            }
            TextEncoding::Utf16Le => {
                let bytes = bytes.strip_prefix(UTF16_LE_BOM).unwrap_or(bytes);
                self.decode_utf16(bytes, u16::from_le_bytes)
            }
            TextEncoding::Utf16Be => {
                let bytes = bytes.strip_prefix(UTF16_BE_BOM).unwrap_or(bytes);
                self.decode_utf16(bytes, u16::from_be_bytes)
            }
        }
    }

    fn decode_utf16(self, bytes: &[u8], unit: fn([u8; 2]) -> u16) -> FilekeepResult<String> {
        if bytes.len() % 2 != 0 {
            return Err(Box::new(FilekeepError::serialization(
                self.name(),
                format!("odd number of bytes ({})", bytes.len()),
            )));
        }
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| unit([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units)
            .map_err(|e| Box::new(FilekeepError::serialization(self.name(), e)))
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
