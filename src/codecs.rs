use base64::{engine::general_purpose, Engine as _};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::errors::*;


/// Binary to text encoding used for the `*64` exports.
pub trait TextCodec {
    fn encode(&self, input: &[u8]) -> String;
    fn decode(&self, input: &str) -> Result<Vec<u8>>;

    fn decode_string(&self, input: &str) -> Result<String> {
        Ok(String::from_utf8(self.decode(input)?)?)
    }
}

/// Standard alphabet base64 with padding.
#[derive(Debug, Default, Copy, Clone)]
pub struct Base64Codec;

impl TextCodec for Base64Codec {
    fn encode(&self, input: &[u8]) -> String {
        general_purpose::STANDARD.encode(input)
    }

    fn decode(&self, input: &str) -> Result<Vec<u8>> {
        Ok(general_purpose::STANDARD.decode(input)?)
    }
}


/// JSON (de)serialization used for the JSON exports and batch configuration.
pub trait JsonCodec {
    /// `pretty_spaces == 0` is compact output, otherwise each nesting level is indented by that
    /// many spaces.
    fn dump<T: Serialize + ?Sized>(&self, value: &T, pretty_spaces: usize) -> Result<String>;
    fn parse<T: DeserializeOwned>(&self, input: &str) -> Result<T>;
}

#[derive(Debug, Default, Copy, Clone)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn dump<T: Serialize + ?Sized>(&self, value: &T, pretty_spaces: usize) -> Result<String> {
        if pretty_spaces == 0 {
            return Ok(serde_json::to_string(value)?);
        }

        let indent = vec![b' '; pretty_spaces];
        let mut buffer = Vec::with_capacity(256);
        {
            let mut serializer = Serializer::with_formatter(&mut buffer,
                                                            PrettyFormatter::with_indent(&indent));
            value.serialize(&mut serializer)?;
        }
        Ok(String::from_utf8(buffer)?)
    }

    fn parse<T: DeserializeOwned>(&self, input: &str) -> Result<T> {
        Ok(serde_json::from_str(input)?)
    }
}
