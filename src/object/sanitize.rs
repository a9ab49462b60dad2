//! Key Sanitization
//!
//! Rewrites arbitrary text keys into identifier-safe names and guards
//! the reserved surface: the adapter's operation vocabulary and the
//! internal rewrite-bookkeeping prefix.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ObjectError, ObjectResult};

/// Operation names a field may not shadow.
///
/// This list is a compatibility surface: hosts feeding data into the
/// adapter rely on it staying stable across releases.
pub const RESERVED_WORDS: &[&str] = &[
    "contains",
    "copy",
    "dict",
    "export",
    "from_map",
    "from_value",
    "get",
    "is_empty",
    "iter",
    "keys",
    "len",
    "original_key",
    "set",
];

/// Sentinel prefix reserved for rewrite bookkeeping in the legacy wire
/// format this adapter interoperates with. Never legitimate user data,
/// so keys carrying it are rejected outright.
pub(crate) const INTERNAL_PREFIX: &str = "\u{000C}$\u{000C}";

lazy_static! {
    static ref NON_IDENT: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
}

/// Rewrite `key` so every character outside `[A-Za-z0-9_]` becomes `_`.
pub fn sanitize_key(key: &str) -> String {
    NON_IDENT.replace_all(key, "_").into_owned()
}

/// Check a name against the reserved operation vocabulary.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Validate a raw construction key and return its sanitized form.
///
/// Rejects keys carrying the internal prefix and keys whose sanitized
/// form would shadow an adapter operation.
pub(crate) fn admit_key(key: &str) -> ObjectResult<String> {
    if key.starts_with(INTERNAL_PREFIX) {
        return Err(ObjectError::ReservedPrefix(key.to_string()));
    }

    let sanitized = sanitize_key(key);
    if is_reserved(&sanitized) {
        return Err(ObjectError::ReservedWord(sanitized));
    }

    Ok(sanitized)
}
