//! Scanner for the builder interface header.
//!
//! This is not a C parser. It finds the `struct builder { ... }` body with a
//! regex and expects every non-empty line inside it to be one
//! function-pointer member of the form
//!
//! ```text
//! foreign_ptr(*name)(self_ptr builder, const token* tok, ...);
//! ```
//!
//! The header is hand-maintained alongside this scanner, so anything outside
//! that shape (comments, macros, data members) is rejected rather than
//! guessed at.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::catalog::{TypeCatalog, SELF_TYPE};
use super::errors::BindgenError;
use super::types::{Method, Parameter};

/// Marker that opens the interface struct.
pub const STRUCT_MARKER: &str = "struct builder";

fn body_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)struct\s+builder\s*\{(.*?)\}").expect("valid regex"))
}

fn member_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^foreign_ptr\s*\(\s*\*\s*(\w+)\s*\)\s*\((.*?)\)\s*;$").expect("valid regex")
    })
}

/// Scanner that turns header text into interface methods.
#[derive(Debug, Clone, Default)]
pub struct HeaderScanner {
    catalog: TypeCatalog,
}

impl HeaderScanner {
    /// Create a scanner using the stock type catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner using a specific type catalog.
    pub fn with_catalog(catalog: TypeCatalog) -> Self {
        HeaderScanner { catalog }
    }

    /// Scan a header file.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<Method>, BindgenError> {
        let content = std::fs::read_to_string(path).map_err(|source| BindgenError::HeaderRead {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("scanning {}", path.display());
        self.scan(&content)
    }

    /// Scan header text, returning methods in declaration order.
    pub fn scan(&self, content: &str) -> Result<Vec<Method>, BindgenError> {
        let body = body_regex()
            .captures(content)
            .and_then(|cap| cap.get(1))
            .ok_or_else(|| BindgenError::StructNotFound {
                marker: STRUCT_MARKER.to_string(),
            })?
            .as_str();

        let methods = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.parse_member(line))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("found {} builder methods", methods.len());
        Ok(methods)
    }

    /// Parse one member declaration line.
    fn parse_member(&self, line: &str) -> Result<Method, BindgenError> {
        let cap = member_regex()
            .captures(line)
            .ok_or_else(|| BindgenError::malformed(line, "expected a foreign_ptr function pointer"))?;

        let name = &cap[1];
        let arg_list = cap[2].trim();

        let mut params = Vec::new();
        if !arg_list.is_empty() {
            for arg in arg_list.split(',') {
                let (ctype, argname) = split_param(arg)
                    .ok_or_else(|| BindgenError::malformed(line, format!("cannot split parameter '{}'", arg.trim())))?;
                let raw_type = self.catalog.lookup(&ctype)?;
                params.push((raw_type.to_string(), argname));
            }
        }

        let mut params = params.into_iter();
        let receiver = match params.next() {
            Some((raw_type, argname)) if raw_type == SELF_TYPE => Parameter::receiver(argname),
            Some(_) => {
                return Err(BindgenError::malformed(line, "first parameter must be the self_ptr receiver"));
            }
            None => return Err(BindgenError::malformed(line, "missing self_ptr receiver")),
        };

        let args = params
            .map(|(raw_type, argname)| {
                if raw_type == SELF_TYPE {
                    Err(BindgenError::malformed(line, format!("self_ptr '{}' is only valid as the first parameter", argname)))
                } else {
                    Ok(Parameter::argument(raw_type, argname))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Method::new(name, receiver, args))
    }
}

/// Split a parameter into its type spelling and name.
///
/// The last whitespace-separated token is the name; the rest, joined by
/// single spaces, is the type. Stars written against the name
/// (`const token *tok`) move to the type.
fn split_param(param: &str) -> Option<(String, String)> {
    let mut parts: Vec<&str> = param.split_whitespace().collect();
    let last = parts.pop()?;

    let name = last.trim_start_matches('*');
    let stars = &last[..last.len() - name.len()];

    if parts.is_empty() || name.is_empty() {
        return None;
    }
    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let mut ctype = parts.join(" ");
    ctype.push_str(stars);
    Some((ctype, name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::ParamRole;
    use crate::test_support::fixtures;

    #[test]
    fn test_scan_single_method() {
        let methods = HeaderScanner::new()
            .scan("struct builder {\n  foreign_ptr(*self)(self_ptr self);\n};")
            .unwrap();

        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "self");
        assert_eq!(methods[0].receiver.name, "self");
        assert_eq!(methods[0].receiver.role, ParamRole::Receiver);
        assert!(methods[0].args.is_empty());
    }

    #[test]
    fn test_scan_resolves_types() {
        let methods = HeaderScanner::new()
            .scan(fixtures::SMALL_HEADER)
            .unwrap();

        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["accessible", "alias", "args", "nil"]);

        let args = &methods[2];
        let raw: Vec<&str> = args.args.iter().map(|p| p.raw_type.as_str()).collect();
        assert_eq!(raw, ["*const TokenPtr", "*mut NodeListPtr", "*const TokenPtr", "bool"]);
        assert!(args.args.iter().all(|p| p.role == ParamRole::Argument));
    }

    #[test]
    fn test_scan_preserves_declaration_order() {
        let header = "struct builder {\n\
                      foreign_ptr(*zeta)(self_ptr builder);\n\
                      foreign_ptr(*alpha)(self_ptr builder);\n\
                      };";
        let methods = HeaderScanner::new().scan(header).unwrap();
        assert_eq!(methods[0].name, "zeta");
        assert_eq!(methods[1].name, "alpha");
    }

    #[test]
    fn test_scan_tolerates_whitespace() {
        let header = "struct  builder\n{\n\t  foreign_ptr( *nil )(self_ptr   builder,\tsize_t  line) ;  \n\n}";
        let methods = HeaderScanner::new().scan(header).unwrap();
        assert_eq!(methods[0].name, "nil");
        assert_eq!(methods[0].args[0].raw_type, "size_t");
        assert_eq!(methods[0].args[0].name, "line");
    }

    #[test]
    fn test_star_against_name() {
        let header = "struct builder {\nforeign_ptr(*arg)(self_ptr builder, const token *name);\n}";
        let methods = HeaderScanner::new().scan(header).unwrap();
        assert_eq!(methods[0].args[0].raw_type, "*const TokenPtr");
        assert_eq!(methods[0].args[0].name, "name");
    }

    #[test]
    fn test_unknown_type() {
        let header = "struct builder {\nforeign_ptr(*bad)(self_ptr self, char x);\n}";
        let err = HeaderScanner::new().scan(header).unwrap_err();
        assert!(matches!(err, BindgenError::UnknownType { ref spelling } if spelling == "char"));
    }

    #[test]
    fn test_partial_catalog_fails() {
        let catalog = TypeCatalog::from_entries([("self_ptr", SELF_TYPE)]);
        let err = HeaderScanner::with_catalog(catalog)
            .scan(fixtures::SMALL_HEADER)
            .unwrap_err();
        assert!(matches!(err, BindgenError::UnknownType { ref spelling } if spelling == "foreign_ptr"));
    }

    #[test]
    fn test_struct_not_found() {
        let err = HeaderScanner::new()
            .scan("struct other {\nforeign_ptr(*nil)(self_ptr builder);\n};")
            .unwrap_err();
        assert!(matches!(err, BindgenError::StructNotFound { .. }));

        // A forward declaration is not a body.
        let err = HeaderScanner::new().scan("struct builder;").unwrap_err();
        assert!(matches!(err, BindgenError::StructNotFound { .. }));
    }

    #[test]
    fn test_malformed_declarations() {
        for line in [
            "int cookie;",
            "foreign_ptr(*nil)(self_ptr builder); // trailing comment",
            "foreign_ptr(*nil)();",
            "foreign_ptr(*nil)(foreign_ptr node);",
            "foreign_ptr(*nil)(self_ptr builder, self_ptr other);",
            "foreign_ptr(*nil)(self_ptr builder, bool);",
            "foreign_ptr(*nil)(self_ptr builder,, bool x);",
        ] {
            let header = format!("struct builder {{\n{}\n}}", line);
            let err = HeaderScanner::new().scan(&header).unwrap_err();
            match err {
                BindgenError::MalformedDeclaration { line: ref bad, .. } => assert_eq!(bad, line),
                other => panic!("expected malformed declaration for {:?}, got {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_split_param() {
        assert_eq!(
            split_param(" const token* begin "),
            Some(("const token*".to_string(), "begin".to_string()))
        );
        assert_eq!(
            split_param("const  node_list  **list"),
            Some(("const node_list**".to_string(), "list".to_string()))
        );
        assert_eq!(split_param("bool"), None);
        assert_eq!(split_param(""), None);
    }
}
