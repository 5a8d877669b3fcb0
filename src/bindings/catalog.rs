//! Mapping from header type spellings to raw FFI type spellings.
//!
//! The catalog is closed: a spelling without an entry is an error, never a
//! guess. Scanning with a partial catalog is how the failure path is tested.

use std::collections::HashMap;

use super::errors::BindgenError;

/// Raw type of the builder's opaque self-pointer (the receiver).
pub const SELF_TYPE: &str = "*mut Builder";

/// Raw type every interface method returns.
pub const NODE_ID: &str = "NodeId";

/// The stock entries, in header spelling -> raw spelling form.
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("foreign_ptr", NODE_ID),
    ("const token*", "*const TokenPtr"),
    ("const node_list*", "*mut NodeListPtr"),
    ("bool", "bool"),
    ("size_t", "size_t"),
    ("self_ptr", SELF_TYPE),
];

/// Lookup table from C spellings to raw FFI spellings.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    entries: HashMap<String, String>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::from_entries(DEFAULT_ENTRIES.iter().copied())
    }
}

impl TypeCatalog {
    /// Create the stock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from explicit entries.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        TypeCatalog {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Resolve a header spelling to its raw FFI spelling.
    pub fn lookup(&self, spelling: &str) -> Result<&str, BindgenError> {
        self.entries
            .get(spelling)
            .map(String::as_str)
            .ok_or_else(|| BindgenError::UnknownType {
                spelling: spelling.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lookup() {
        let catalog = TypeCatalog::new();
        assert_eq!(catalog.lookup("foreign_ptr").unwrap(), "NodeId");
        assert_eq!(catalog.lookup("const token*").unwrap(), "*const TokenPtr");
        assert_eq!(catalog.lookup("const node_list*").unwrap(), "*mut NodeListPtr");
        assert_eq!(catalog.lookup("self_ptr").unwrap(), SELF_TYPE);
        assert_eq!(catalog.lookup("size_t").unwrap(), "size_t");
        assert_eq!(catalog.lookup("bool").unwrap(), "bool");
    }

    #[test]
    fn test_unknown_type() {
        let catalog = TypeCatalog::new();
        let err = catalog.lookup("char").unwrap_err();
        assert!(matches!(err, BindgenError::UnknownType { ref spelling } if spelling == "char"));
        assert_eq!(err.to_string(), "unknown C type: `char`");
    }

    #[test]
    fn test_partial_catalog() {
        let catalog = TypeCatalog::from_entries([("self_ptr", SELF_TYPE)]);
        assert!(catalog.lookup("self_ptr").is_ok());
        assert!(catalog.lookup("foreign_ptr").is_err());
        let empty = TypeCatalog::from_entries(Vec::<(String, String)>::new());
        assert!(empty.lookup("self_ptr").is_err());
    }
}
