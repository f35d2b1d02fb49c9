/* 📖 # Why is serialization a trait?

The file manager never knows the payload format. It hands the serializer an open
stream and the configured text encoding and classifies whatever goes wrong.
JsonSerializer and TomlSerializer are the formats shipped here; any type implementing
Serializer can be plugged in instead.
*/

pub mod json;
pub mod toml_format;
pub mod traits;

pub use json::JsonSerializer;
pub use toml_format::TomlSerializer;
pub use traits::Serializer;
