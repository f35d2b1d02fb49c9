use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use filekeep_base::{FilekeepError, FilekeepResult};

use crate::encoding::TextEncoding;

/// Encodes values to and decodes values from byte streams.
///
/// Implementations must not close the stream they are given; the caller owns it.
pub trait Serializer: std::fmt::Debug {
    /// Short name of the payload format, used in error messages.
    fn format_name(&self) -> &'static str;

    /// Write `value` completely to `writer`.
    fn serialize<T: Serialize + ?Sized>(
        &self,
        writer: &mut dyn Write,
        encoding: TextEncoding,
        value: &T,
    ) -> FilekeepResult<()>;

    /// Read one complete value from `reader`.
    fn deserialize<T: DeserializeOwned>(
        &self,
        reader: &mut dyn Read,
        encoding: TextEncoding,
    ) -> FilekeepResult<T>;
}

/// Encode `text` and write all of it. Stream failures are reported as failures of `format`.
pub(crate) fn write_text(
    writer: &mut dyn Write,
    encoding: TextEncoding,
    text: &str,
    format: &'static str,
) -> FilekeepResult<()> {
    writer
        .write_all(&encoding.encode(text))
        .map_err(|e| Box::new(FilekeepError::serialization(format, e)))
}

/// Read the whole stream and decode it as text.
pub(crate) fn read_text(
    reader: &mut dyn Read,
    encoding: TextEncoding,
    format: &'static str,
) -> FilekeepResult<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Box::new(FilekeepError::serialization(format, e)))?;
    encoding.decode(&bytes)
}
