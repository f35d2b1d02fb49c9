use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use filekeep_base::{FilekeepError, FilekeepResult};

use super::traits::{Serializer, read_text, write_text};
use crate::encoding::TextEncoding;

const FORMAT: &str = "TOML";

/// Serializes values as TOML documents.
///
/// TOML documents are tables, so only struct- and map-like values can be stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlSerializer;

impl TomlSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for TomlSerializer {
    fn format_name(&self) -> &'static str {
        FORMAT
    }

    fn serialize<T: Serialize + ?Sized>(
        &self,
        writer: &mut dyn Write,
        encoding: TextEncoding,
        value: &T,
    ) -> FilekeepResult<()> {
        let text = toml::to_string(value)
            .map_err(|e| Box::new(FilekeepError::serialization(FORMAT, e)))?;
        write_text(writer, encoding, &text, FORMAT)
    }

    fn deserialize<T: DeserializeOwned>(
        &self,
        reader: &mut dyn Read,
        encoding: TextEncoding,
    ) -> FilekeepResult<T> {
        let text = read_text(reader, encoding, FORMAT)?;
        toml::from_str(&text).map_err(|e| Box::new(FilekeepError::serialization(FORMAT, e)))
    }
}
