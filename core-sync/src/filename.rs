//! Remote filename convention for script files.
//!
//! Script files are stored remotely as `usc-<percent-encoded-uri>` so the
//! local identifier can be recovered from a listing alone. The metadata
//! document lives under a fixed reserved name that never matches the script
//! prefix.

/// Prefix marking remote files that hold script content.
pub const SCRIPT_PREFIX: &str = "usc-";

/// Reserved name of the remote metadata document.
pub const META_FILENAME: &str = "usc.meta.json";

/// Remote filename for a script with the given local URI.
pub fn script_filename(uri: &str) -> String {
    format!("{}{}", SCRIPT_PREFIX, urlencoding::encode(uri))
}

/// Whether a remote filename follows the script naming convention.
pub fn is_script_filename(name: &str) -> bool {
    name.starts_with(SCRIPT_PREFIX)
}

/// Recover the local URI from a remote script filename.
///
/// Returns `None` when the name does not follow the convention. A payload
/// that fails percent-decoding is kept as-is rather than dropped; the
/// listing is the only place the identifier survives.
pub fn uri_from_filename(name: &str) -> Option<String> {
    let encoded = name.strip_prefix(SCRIPT_PREFIX)?;
    Some(match urlencoding::decode(encoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => encoded.to_string(),
    })
}
