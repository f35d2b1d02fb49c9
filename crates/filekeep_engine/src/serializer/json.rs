use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use filekeep_base::{FilekeepError, FilekeepResult};

use super::traits::{Serializer, read_text, write_text};
use crate::encoding::TextEncoding;

const FORMAT: &str = "JSON";

/// Serializes values as JSON using serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output instead of a single line.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn format_name(&self) -> &'static str {
        FORMAT
    }

    fn serialize<T: Serialize + ?Sized>(
        &self,
        writer: &mut dyn Write,
        encoding: TextEncoding,
        value: &T,
    ) -> FilekeepResult<()> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| Box::new(FilekeepError::serialization(FORMAT, e)))?;
        write_text(writer, encoding, &text, FORMAT)
    }

    fn deserialize<T: DeserializeOwned>(
        &self,
        reader: &mut dyn Read,
        encoding: TextEncoding,
    ) -> FilekeepResult<T> {
        let text = read_text(reader, encoding, FORMAT)?;
        serde_json::from_str(&text).map_err(|e| Box::new(FilekeepError::serialization(FORMAT, e)))
    }
}
