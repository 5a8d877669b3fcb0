//! Model types for the scanned builder interface.
//!
//! A [`Method`] is one function-pointer member of `struct builder`; its
//! [`Parameter`]s carry raw FFI spellings already resolved through the
//! [`TypeCatalog`](super::TypeCatalog). Every Rust rendering of the
//! interface (struct field, trampoline, safe signature) is derived from
//! these types so the three stay consistent.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::catalog::{NODE_ID, SELF_TYPE};

/// Rust type the safe implementation returns from every method.
pub const SAFE_RETURN: &str = "Rc<Node>";

/// Whether trampolines assert the receiver's identity before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityCheck {
    /// Emit no check (default).
    #[default]
    Off,
    /// Emit `assert_eq!((*builder).cookie, COOKIE)` in every trampoline.
    On,
}

impl IntegrityCheck {
    pub fn is_enabled(self) -> bool {
        self == IntegrityCheck::On
    }
}

impl std::str::FromStr for IntegrityCheck {
    type Err = String;

    /// Accepts exactly the spellings the config file accepts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(IntegrityCheck::Off),
            "on" => Ok(IntegrityCheck::On),
            _ => Err(format!(
                "invalid integrity check '{}'; expected 'off' or 'on'",
                s
            )),
        }
    }
}

impl fmt::Display for IntegrityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityCheck::Off => write!(f, "off"),
            IntegrityCheck::On => write!(f, "on"),
        }
    }
}

/// Position of a parameter in the calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamRole {
    /// The builder handle; always the first parameter.
    Receiver,
    /// Any other parameter.
    Argument,
}

/// One parameter of an interface method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name as written in the header
    pub name: String,

    /// Raw FFI type spelling
    pub raw_type: String,

    /// Receiver or ordinary argument
    pub role: ParamRole,
}

impl Parameter {
    /// Create the receiver parameter.
    pub fn receiver(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            raw_type: SELF_TYPE.to_string(),
            role: ParamRole::Receiver,
        }
    }

    /// Create an ordinary argument.
    pub fn argument(raw_type: impl Into<String>, name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            raw_type: raw_type.into(),
            role: ParamRole::Argument,
        }
    }

    pub fn is_receiver(&self) -> bool {
        self.role == ParamRole::Receiver
    }

    /// `name: RawType`, as used in the `extern "C"` signatures.
    pub fn as_raw_arg(&self) -> String {
        format!("{}: {}", self.name, self.raw_type)
    }

    /// Safe Rust type for this parameter's raw type.
    ///
    /// Raw types with no entry pass through unchanged; that fallback is
    /// logged since it usually means the safe table is missing a row.
    pub fn safe_type(&self) -> &str {
        match safe_type_for(&self.raw_type) {
            Some(safe) => safe,
            None => {
                tracing::warn!(
                    "no safe mapping for raw type `{}` (parameter `{}`), passing it through",
                    self.raw_type,
                    self.name
                );
                self.raw_type.as_str()
            }
        }
    }

    /// `name: SafeType`, or `&mut self` for the receiver.
    pub fn as_safe_arg(&self) -> String {
        if self.is_receiver() {
            return "&mut self".to_string();
        }
        format!("{}: {}", self.name, self.safe_type())
    }

    /// Rebinding that turns the raw value into its safe counterpart.
    ///
    /// `receiver` is the name of the method's receiver parameter, which the
    /// node conversions resolve against. Returns `None` when the raw and
    /// safe forms coincide.
    pub fn conversion(&self, receiver: &str) -> Option<String> {
        let name = &self.name;
        let rhs = match self.raw_type.as_str() {
            SELF_TYPE => format!("&mut *{}", name),
            NODE_ID => format!("node_from_c({}, {})", receiver, name),
            "*mut NodeListPtr" => format!("node_list_from_c({}, {})", receiver, name),
            "*const TokenPtr" => format!("token_from_c({})", name),
            "size_t" => format!("{} as usize", name),
            _ => return None,
        };
        Some(format!("let {} = {}", name, rhs))
    }
}

fn safe_type_for(raw_type: &str) -> Option<&'static str> {
    match raw_type {
        NODE_ID => Some("Option<Rc<Node>>"),
        "*mut NodeListPtr" => Some("Vec<Rc<Node>>"),
        "*const TokenPtr" => Some("Option<Token>"),
        "size_t" => Some("usize"),
        "bool" => Some("bool"),
        _ => None,
    }
}

/// One function-pointer member of the builder interface.
///
/// Serializes as `{"name", "parameters"}` with the receiver first, the
/// same flat order the header declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Member name; also the trampoline and safe method name
    pub name: String,

    /// The builder handle
    pub receiver: Parameter,

    /// Remaining parameters in declaration order
    pub args: Vec<Parameter>,
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Method", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("parameters", &self.params().collect::<Vec<_>>())?;
        state.end()
    }
}

impl Method {
    /// Create a method from its receiver and remaining arguments.
    pub fn new(name: impl Into<String>, receiver: Parameter, args: Vec<Parameter>) -> Self {
        Method {
            name: name.into(),
            receiver,
            args,
        }
    }

    /// All parameters, receiver first.
    pub fn params(&self) -> impl Iterator<Item = &Parameter> {
        std::iter::once(&self.receiver).chain(self.args.iter())
    }

    fn arg_block(&self) -> String {
        self.params()
            .map(Parameter::as_raw_arg)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Field of the `#[repr(C)]` interface struct.
    pub fn struct_field_signature(&self) -> String {
        format!(
            "pub {}: unsafe extern \"C\" fn({}) -> {}",
            self.name,
            self.arg_block(),
            NODE_ID
        )
    }

    /// Signature the hand-written safe implementation provides.
    pub fn safe_signature(&self) -> String {
        let args = self
            .params()
            .map(Parameter::as_safe_arg)
            .collect::<Vec<_>>()
            .join(", ");
        format!("fn {}({}) -> {}", self.name, args, SAFE_RETURN)
    }

    /// Head of the trampoline function, without the body.
    pub fn definition(&self) -> String {
        format!(
            "unsafe extern \"C\" fn {}({}) -> {}",
            self.name,
            self.arg_block(),
            NODE_ID
        )
    }

    /// Call into the safe implementation through the converted receiver.
    pub fn callsite_expression(&self) -> String {
        let args = self
            .args
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("(*{}).{}({})", self.receiver.name, self.name, args)
    }

    /// Receiver identity assertion.
    pub fn integrity_check(&self, cookie: u64) -> String {
        format!("assert_eq!((*{}).cookie, {})", self.receiver.name, cookie)
    }

    /// Complete trampoline: conversions, optional check, dispatch.
    pub fn trampoline_definition(&self, check: IntegrityCheck, cookie: u64) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} {{\n", self.definition()));

        for param in self.params() {
            if let Some(cv) = param.conversion(&self.receiver.name) {
                out.push_str(&format!("\t{};\n", cv));
            }
        }

        if check.is_enabled() {
            out.push_str(&format!("\t{};\n", self.integrity_check(cookie)));
        }

        out.push_str(&format!(
            "\t{}.to_raw({})\n",
            self.callsite_expression(),
            self.receiver.name
        ));
        out.push_str("}\n");
        out
    }
}
