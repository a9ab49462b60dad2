//! Map Object Adapter
//!
//! Main facade of the crate: a recursive node that presents one level
//! of a nested string-keyed mapping as an object with identifier-safe
//! field names, while remembering every rewritten key so the original
//! mapping can be reconstructed on demand.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use super::error::{ObjectError, ObjectResult};
use super::field::{json_type_name, Field};
use super::sanitize::admit_key;

/// Configuration for MapObject construction
#[derive(Debug, Clone)]
pub struct ObjectConfig {
    /// Maximum nesting depth accepted before construction fails
    pub max_depth: usize,
}

impl ObjectConfig {
    /// Set the maximum accepted nesting depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Recursive adapter node for one mapping level.
///
/// Entries are keyed by their sanitized name; keys that were rewritten
/// during construction keep a side record of their original spelling,
/// so [`MapObject::dict`] can emit the mapping exactly as it came in
/// while [`MapObject::export`] shows the current identifier-safe shape.
///
/// # Example
///
/// ```
/// use mapobj::MapObject;
/// use serde_json::json;
///
/// let obj = MapObject::from_value(json!({
///     "a": {"b": 1, "ugly var!": 2},
///     "c": 3,
/// }))?;
///
/// let a = obj.object("a").unwrap();
/// assert_eq!(a.scalar("b"), Some(&json!(1)));
/// assert_eq!(a.scalar("ugly_var_"), Some(&json!(2)));
///
/// // the original spelling survives for reconstruction
/// assert_eq!(a.original_key("ugly_var_"), Some("ugly var!"));
/// # Ok::<(), mapobj::ObjectError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapObject {
    entries: BTreeMap<String, Field>,
    /// sanitized name -> original name, recorded only where they differ
    renames: BTreeMap<String, String>,
}

impl MapObject {
    /// Build an adapter tree from a raw mapping with the default
    /// configuration.
    ///
    /// Every key is rewritten to its identifier-safe form and every
    /// mapping-valued entry is wrapped in a child node. Construction
    /// fails on reserved keys and on keys whose rewritten forms
    /// collide; no partially built node is ever returned.
    pub fn from_map(map: Map<String, JsonValue>) -> ObjectResult<Self> {
        Self::from_map_with_config(map, &ObjectConfig::default())
    }

    /// Build an adapter tree from a raw mapping with a custom
    /// configuration.
    pub fn from_map_with_config(
        map: Map<String, JsonValue>,
        config: &ObjectConfig,
    ) -> ObjectResult<Self> {
        let node = Self::build(map, config, 0)?;
        debug!(
            "constructed map object with {} top-level fields ({} rewritten)",
            node.entries.len(),
            node.renames.len()
        );
        Ok(node)
    }

    /// Build an adapter tree from a JSON value that must be an object.
    pub fn from_value(value: JsonValue) -> ObjectResult<Self> {
        Self::from_value_with_config(value, &ObjectConfig::default())
    }

    /// Build an adapter tree from a JSON value with a custom
    /// configuration.
    pub fn from_value_with_config(
        value: JsonValue,
        config: &ObjectConfig,
    ) -> ObjectResult<Self> {
        match value {
            JsonValue::Object(map) => Self::from_map_with_config(map, config),
            other => Err(ObjectError::NotAnObject(json_type_name(&other))),
        }
    }

    fn build(
        map: Map<String, JsonValue>,
        config: &ObjectConfig,
        depth: usize,
    ) -> ObjectResult<Self> {
        if depth >= config.max_depth {
            return Err(ObjectError::DepthExceeded {
                depth,
                limit: config.max_depth,
            });
        }

        let mut node = Self::default();
        for (key, value) in map {
            let sanitized = admit_key(&key)?;

            if node.entries.contains_key(&sanitized) {
                let first = node
                    .renames
                    .get(&sanitized)
                    .cloned()
                    .unwrap_or_else(|| sanitized.clone());
                return Err(ObjectError::AmbiguousKey {
                    sanitized,
                    first,
                    second: key,
                });
            }

            let field = match value {
                JsonValue::Object(inner) => {
                    Field::Object(Self::build(inner, config, depth + 1)?)
                }
                scalar => Field::Scalar(scalar),
            };

            if sanitized != key {
                trace!("rewrote key {:?} as '{}'", key, sanitized);
                node.renames.insert(sanitized.clone(), key);
            }
            node.entries.insert(sanitized, field);
        }

        Ok(node)
    }

    /// Get a field by its sanitized name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.entries.get(name)
    }

    /// Get a field by its sanitized name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.entries.get_mut(name)
    }

    /// Get a scalar field; `None` if absent or a nested node.
    pub fn scalar(&self, name: &str) -> Option<&JsonValue> {
        self.get(name)?.as_scalar()
    }

    /// Get a nested node; `None` if absent or a scalar.
    pub fn object(&self, name: &str) -> Option<&MapObject> {
        self.get(name)?.as_object()
    }

    /// Get a nested node mutably; `None` if absent or a scalar.
    pub fn object_mut(&mut self, name: &str) -> Option<&mut MapObject> {
        self.get_mut(name)?.as_object_mut()
    }

    /// Replace or insert a field value.
    ///
    /// Programmatic writes are stored verbatim: the name is not
    /// sanitized again and the rewrite record is left untouched, so a
    /// field that was rewritten at construction keeps reporting its
    /// original spelling through [`MapObject::dict`].
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Field>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Membership test over sanitized names.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate the sanitized field names, in stable (sorted) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate `(sanitized name, field)` pairs, in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Number of fields in this node.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Original spelling of a rewritten key, if the construction
    /// rewrite actually changed it.
    pub fn original_key(&self, name: &str) -> Option<&str> {
        self.renames.get(name).map(String::as_str)
    }

    /// Reconstruct the original mapping form, rewritten keys restored.
    ///
    /// Entries whose key was rewritten at construction are emitted
    /// under their original spelling; everything else is emitted under
    /// its sanitized name. Nested nodes recurse. Values replaced after
    /// construction appear with their current contents.
    ///
    /// Alternate to [`MapObject::export`].
    pub fn dict(&self) -> Map<String, JsonValue> {
        let mut exported = Map::new();
        for (name, field) in &self.entries {
            let key = self
                .renames
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.clone());
            exported.insert(key, field.to_raw());
        }
        exported
    }

    /// Export using rewritten keys, not original keys.
    ///
    /// This is the adapter's current public shape, the form used for
    /// display and debugging.
    ///
    /// Alternate to [`MapObject::dict`].
    pub fn export(&self) -> Map<String, JsonValue> {
        let mut exported = Map::new();
        for (name, field) in &self.entries {
            exported.insert(name.clone(), field.to_sanitized());
        }
        exported
    }
}

impl fmt::Display for MapObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", JsonValue::Object(self.export()))
    }
}

impl Serialize for MapObject {
    /// Serializes the raw view, so deserialize-then-serialize
    /// reproduces the original document.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.dict().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MapObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, JsonValue>::deserialize(deserializer)?;
        Self::from_map(map).map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MapObject {
        MapObject::from_value(json!({
            "a": {"b": 1, "ugly var!": 2},
            "c": 3,
        }))
        .unwrap()
    }

    #[test]
    fn test_nested_access() {
        let obj = sample();

        assert!(obj.get("a").unwrap().is_object());
        let a = obj.object("a").unwrap();
        assert_eq!(a.scalar("b"), Some(&json!(1)));
        assert_eq!(a.scalar("ugly_var_"), Some(&json!(2)));
        assert_eq!(obj.scalar("c"), Some(&json!(3)));
    }

    #[test]
    fn test_membership_and_iteration() {
        let obj = sample();

        assert!(obj.contains("a"));
        assert!(obj.contains("c"));
        assert!(!obj.contains("ugly_var_"));

        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);

        // rewrite bookkeeping never leaks into iteration
        let nested: Vec<&str> = obj.object("a").unwrap().keys().collect();
        assert_eq!(nested, vec!["b", "ugly_var_"]);
    }

    #[test]
    fn test_export_uses_sanitized_keys() {
        let obj = sample();
        let exported = JsonValue::Object(obj.export());
        assert_eq!(
            exported,
            json!({"a": {"b": 1, "ugly_var_": 2}, "c": 3})
        );
    }

    #[test]
    fn test_dict_restores_original_keys() {
        let obj = sample();
        let raw = JsonValue::Object(obj.dict());
        assert_eq!(
            raw,
            json!({"a": {"b": 1, "ugly var!": 2}, "c": 3})
        );
    }

    #[test]
    fn test_roundtrip() {
        let input = json!({
            "plain": 1,
            "needs rewrite?": {"inner key!": [1, 2, 3], "ok": null},
            "deep": {"er": {"est": true}},
        });
        let obj = MapObject::from_value(input.clone()).unwrap();
        assert_eq!(JsonValue::Object(obj.dict()), input);
    }

    #[test]
    fn test_rewrite_record_is_minimal() {
        let obj = sample();
        assert_eq!(obj.original_key("a"), None);
        assert_eq!(obj.original_key("c"), None);

        let a = obj.object("a").unwrap();
        assert_eq!(a.original_key("b"), None);
        assert_eq!(a.original_key("ugly_var_"), Some("ugly var!"));
    }

    #[test]
    fn test_ambiguous_rewrite_rejected() {
        let err = MapObject::from_value(json!({"a!": 1, "a?": 2})).unwrap_err();
        match err {
            ObjectError::AmbiguousKey {
                sanitized,
                first,
                second,
            } => {
                assert_eq!(sanitized, "a_");
                assert_ne!(first, second);
            }
            other => panic!("expected AmbiguousKey, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_word_rejected() {
        let err = MapObject::from_value(json!({"copy": 1})).unwrap_err();
        assert!(matches!(err, ObjectError::ReservedWord(ref w) if w == "copy"));
    }

    #[test]
    fn test_reserved_prefix_rejected() {
        let err =
            MapObject::from_value(json!({"\u{000C}$\u{000C}bogus": 1})).unwrap_err();
        assert!(matches!(err, ObjectError::ReservedPrefix(_)));
    }

    #[test]
    fn test_non_object_input_rejected() {
        let err = MapObject::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ObjectError::NotAnObject("array")));
    }

    #[test]
    fn test_depth_limit() {
        let nested = json!({"l1": {"l2": {"l3": {"l4": 1}}}});
        let tight = ObjectConfig::default().max_depth(3);
        let err =
            MapObject::from_value_with_config(nested.clone(), &tight).unwrap_err();
        assert!(matches!(err, ObjectError::DepthExceeded { limit: 3, .. }));

        let roomy = ObjectConfig::default().max_depth(4);
        assert!(MapObject::from_value_with_config(nested, &roomy).is_ok());
    }

    #[test]
    fn test_mutation_visible_under_sanitized_key() {
        let mut obj = sample();
        obj.set("c", 4_i64);

        assert_eq!(obj.scalar("c"), Some(&json!(4)));
        // `c` was never rewritten, so the raw view reports it as-is
        assert_eq!(
            JsonValue::Object(obj.dict()),
            json!({"a": {"b": 1, "ugly var!": 2}, "c": 4})
        );
    }

    #[test]
    fn test_mutation_keeps_original_key_on_record() {
        let mut obj = sample();
        obj.object_mut("a").unwrap().set("ugly_var_", 10_i64);

        // current value, original spelling
        assert_eq!(
            JsonValue::Object(obj.dict()),
            json!({"a": {"b": 1, "ugly var!": 10}, "c": 3})
        );
        assert_eq!(
            JsonValue::Object(obj.export()),
            json!({"a": {"b": 1, "ugly_var_": 10}, "c": 3})
        );
    }

    #[test]
    fn test_copy_independence() {
        let mut obj = sample();
        let snapshot = obj.clone();

        obj.set("c", 4_i64);
        obj.object_mut("a").unwrap().set("b", 99_i64);

        assert_eq!(snapshot.scalar("c"), Some(&json!(3)));
        assert_eq!(snapshot.object("a").unwrap().scalar("b"), Some(&json!(1)));
        assert_eq!(
            JsonValue::Object(snapshot.dict()),
            json!({"a": {"b": 1, "ugly var!": 2}, "c": 3})
        );

        // and the other direction
        let mut copy = snapshot.clone();
        copy.set("c", 7_i64);
        assert_eq!(snapshot.scalar("c"), Some(&json!(3)));
    }

    #[test]
    fn test_display_shows_sanitized_view() {
        let obj = sample();
        assert_eq!(
            obj.to_string(),
            r#"{"a":{"b":1,"ugly_var_":2},"c":3}"#
        );
    }
}
