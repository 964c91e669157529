use crate::{Error, Result};

pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_KEY_QUERY_PARAM: &str = "apiKey";

/// Decides whether a request carrying these credentials may proceed.
///
/// Keys are raw bytes: header values need not be UTF-8, and such a value is
/// simply a key that does not match. The header wins over the query parameter
/// when both are present. Empty values count as absent.
pub fn authorize(
    header_key: Option<&[u8]>,
    query_key: Option<&[u8]>,
    secret: &str,
) -> Result<()> {
    let presented = header_key
        .filter(|k| !k.is_empty())
        .or_else(|| query_key.filter(|k| !k.is_empty()));

    match presented {
        None => Err(Error::Unauthenticated),
        Some(key) if key != secret.as_bytes() => Err(Error::Forbidden),
        Some(_) => Ok(()),
    }
}
