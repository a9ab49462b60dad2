// ============================================================================
// mapobj Library
// ============================================================================

pub mod object;

// Re-export main types for convenience
pub use object::{
    is_reserved, sanitize_key, Field, MapObject, ObjectConfig, ObjectError,
    ObjectResult, RESERVED_WORDS,
};
