//! Time-salted XOR obfuscation for public API responses
//!
//! The public read endpoints do not return plain JSON. Instead the compact
//! JSON payload is XORed byte-by-byte with `key_base + timestamp` (the key is
//! repeated cyclically) and the result is base64 encoded. The timestamp is
//! sent alongside the body in the `t` response header so the client can
//! rebuild the key and reverse the transform.
//!
//! This is **not** encryption. Anyone who knows the key base can read every
//! response, and there is no integrity protection. It exists only to stay
//! wire-compatible with existing clients.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Key base shared with the deployed client apps
pub const DEFAULT_KEY_BASE: &str = "c!xZj+N9&G@Ev@vw";

/// Name of the response header carrying the key salt
pub const TIMESTAMP_HEADER: &str = "t";

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// XOR `data` with `key`, repeating the key across the whole input.
///
/// The transform is its own inverse. An empty key leaves the data untouched.
pub fn xor_with_key(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }

    data.iter()
        .zip(key.iter().cycle())
        .map(|(byte, key_byte)| byte ^ key_byte)
        .collect()
}

/// Current Unix time in whole seconds, as the decimal string used for salting
pub fn current_timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// Encoder/decoder bound to one key base
#[derive(Debug, Clone)]
pub struct Obfuscator {
    key_base: String,
}

impl Default for Obfuscator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_BASE)
    }
}

impl Obfuscator {
    pub fn new(key_base: impl Into<String>) -> Self {
        Self {
            key_base: key_base.into(),
        }
    }

    /// Full key for a given salt
    pub fn key_for(&self, timestamp: &str) -> String {
        format!("{}{}", self.key_base, timestamp)
    }

    /// Serialize `payload` to compact JSON and obfuscate it with the key for `timestamp`
    pub fn encode<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        timestamp: &str,
    ) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(payload)?;
        Ok(self.encode_bytes(&json, timestamp))
    }

    /// Obfuscate raw bytes (already UTF-8 JSON) with the key for `timestamp`
    pub fn encode_bytes(&self, data: &[u8], timestamp: &str) -> String {
        let key = self.key_for(timestamp);
        STANDARD.encode(xor_with_key(data, key.as_bytes()))
    }

    /// Reverse [`Obfuscator::encode`], returning the original JSON bytes
    pub fn decode(&self, text: &str, timestamp: &str) -> Result<Vec<u8>, DecodeError> {
        let cipher = STANDARD.decode(text.trim())?;
        let key = self.key_for(timestamp);
        Ok(xor_with_key(&cipher, key.as_bytes()))
    }

    /// Reverse [`Obfuscator::encode`] and parse the JSON payload
    pub fn decode_json<T: DeserializeOwned>(
        &self,
        text: &str,
        timestamp: &str,
    ) -> Result<T, DecodeError> {
        let bytes = self.decode(text, timestamp)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
