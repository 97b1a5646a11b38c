// quill_codegen_java/names - Java qualified names and the naming environment
use std::fmt;

use serde::{Deserialize, Serialize};

use quill_types::{FunctionSignature, TypeDefinition, WellKnown};

use crate::sam::{suggest_sam_name, Sam};
use crate::types::{JavaType, JavaTypeArg};

/// Package that synthesized functional interfaces are declared in, below the
/// host's output package.
pub const SAM_PACKAGE_NAME: &str = "function";

/// If `false`, types with no faithful Java image may loosen to `Object`
/// instead of the invalid sentinel.
pub const STRICT_TYPES: bool = false;

/// An immutable dotted Java name, e.g. `java.util.Map.Entry`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    pub fn known(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|segment| segment.to_string()).collect(),
        }
    }

    /// A single-segment name, used for type variables and unqualified types.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// A new name with one more trailing segment.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment, e.g. `Entry` for `java.util.Map.Entry`.
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index != 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

// package names
pub(crate) fn java_lang() -> QualifiedName {
    QualifiedName::known(&["java", "lang"])
}
pub(crate) fn java_util() -> QualifiedName {
    QualifiedName::known(&["java", "util"])
}
pub(crate) fn java_util_function() -> QualifiedName {
    java_util().join("function")
}
pub(crate) fn quill_core() -> QualifiedName {
    QualifiedName::known(&["quill", "core"])
}

// standard Java names
pub fn java_lang_boolean() -> QualifiedName {
    java_lang().join("Boolean")
}
pub fn java_lang_byte() -> QualifiedName {
    java_lang().join("Byte")
}
pub fn java_lang_character() -> QualifiedName {
    java_lang().join("Character")
}
pub fn java_lang_double() -> QualifiedName {
    java_lang().join("Double")
}
pub fn java_lang_float() -> QualifiedName {
    java_lang().join("Float")
}
pub fn java_lang_integer() -> QualifiedName {
    java_lang().join("Integer")
}
pub fn java_lang_long() -> QualifiedName {
    java_lang().join("Long")
}
pub fn java_lang_object() -> QualifiedName {
    java_lang().join("Object")
}
pub fn java_lang_runnable() -> QualifiedName {
    java_lang().join("Runnable")
}
pub fn java_lang_short() -> QualifiedName {
    java_lang().join("Short")
}
pub fn java_lang_string() -> QualifiedName {
    java_lang().join("String")
}
pub fn java_lang_void() -> QualifiedName {
    java_lang().join("Void")
}

// java util classes
pub fn java_util_bit_set() -> QualifiedName {
    java_util().join("BitSet")
}
pub fn java_util_deque() -> QualifiedName {
    java_util().join("Deque")
}
pub fn java_util_list() -> QualifiedName {
    java_util().join("List")
}
pub fn java_util_map() -> QualifiedName {
    java_util().join("Map")
}
pub fn java_util_map_entry() -> QualifiedName {
    java_util_map().join("Entry")
}
pub fn java_util_optional() -> QualifiedName {
    java_util().join("Optional")
}

// quill runtime names
/// Nullability annotation attached to nullable reference types at render time.
pub fn quill_core_nullable() -> QualifiedName {
    quill_core().join("Nullable")
}
/// Sentinel type that untranslatable types erase to.
pub fn quill_core_invalid() -> QualifiedName {
    quill_core().join("Invalid")
}

/// Read-only naming environment the lowering engine runs against.
pub trait JavaNames {
    /// Fully qualified Java class name for a type definition.
    fn class_name(&self, definition: &TypeDefinition) -> QualifiedName;

    /// Identifier used when a type formal becomes a Java type variable.
    fn type_formal_name(&self, definition: &TypeDefinition) -> String {
        definition.name.clone()
    }

    /// Target package for synthesized functional interfaces.
    fn sam_package(&self) -> QualifiedName;

    /// Java type for a definition declared connected to an existing native
    /// type, given its already-lowered type arguments. `None` means the
    /// definition has no override and lowers structurally.
    fn connected_java_type(&self, key: &str, args: &[JavaTypeArg]) -> Option<JavaType>;

    /// The functional interface representing a function type. Standard
    /// interfaces are preferred; anything else gets a synthesized one.
    fn sam_type(&self, func: &FunctionSignature) -> Sam {
        match Sam::standard(func) {
            Some(sam) => sam,
            None => Sam::synthetic(suggest_sam_name(func), func, self.sam_package()),
        }
    }
}

/// Naming environment backed by the builtin definition table and a single
/// output package for user-declared types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultJavaNames {
    package_prefix: QualifiedName,
    sam_package: QualifiedName,
}

impl DefaultJavaNames {
    pub fn new(package_prefix: QualifiedName) -> Self {
        let sam_package = package_prefix.join(SAM_PACKAGE_NAME);
        Self {
            package_prefix,
            sam_package,
        }
    }
}

impl Default for DefaultJavaNames {
    fn default() -> Self {
        Self::new(QualifiedName::known(&["quill", "gen"]))
    }
}

impl JavaNames for DefaultJavaNames {
    fn class_name(&self, definition: &TypeDefinition) -> QualifiedName {
        if definition.is_formal() {
            return QualifiedName::simple(&definition.name);
        }
        well_known_java_name(definition)
            .unwrap_or_else(|| self.package_prefix.join(&definition.name))
    }

    fn sam_package(&self) -> QualifiedName {
        self.sam_package.clone()
    }

    fn connected_java_type(&self, _key: &str, _args: &[JavaTypeArg]) -> Option<JavaType> {
        None
    }
}

/// Builtin definitions with an established Java equivalent.
fn well_known_java_name(definition: &TypeDefinition) -> Option<QualifiedName> {
    if let Some(wk) = definition.well_known {
        let name = match wk {
            WellKnown::Boolean => java_lang_boolean(),
            WellKnown::Int => java_lang_integer(),
            WellKnown::Int64 => java_lang_long(),
            WellKnown::Float64 => java_lang_double(),
            WellKnown::String => java_lang_string(),
            WellKnown::AnyValue => java_lang_object(),
            WellKnown::Void => java_lang_void(),
            WellKnown::Problem | WellKnown::Null => quill_core_invalid(),
            _ => return None,
        };
        return Some(name);
    }
    match definition.name.as_str() {
        "List" | "ListBuilder" | "Listed" => Some(java_util_list()),
        "Map" | "MapBuilder" | "Mapped" => Some(java_util_map()),
        "Pair" => Some(java_util_map_entry()),
        "Deque" => Some(java_util_deque()),
        "DenseBitVector" => Some(java_util_bit_set()),
        // equals and hashCode are defined on Object, so when these are used
        // as upper bounds we can just connect them to Object.
        "Equatable" | "MapKey" => Some(java_lang_object()),
        _ => None,
    }
}
