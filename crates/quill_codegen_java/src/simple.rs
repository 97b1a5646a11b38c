// quill_codegen_java/simple - Classification into Java's primitive specializations
use serde::{Deserialize, Serialize};

use quill_types::{simplify, FunctionSignature, StaticType, WellKnown};

/// "Simple" types bifurcate the Java type system into "some kind of
/// primitive" and "everything else", following the specialization
/// conventions of `java.util.function`.
///
/// Caveat: `float` is usually not specialized there, so it gets no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimpleKind {
    Void,
    Object,
    Bool,
    Double,
    Int,
    Long,
}

impl SimpleKind {
    /// The standard name for the abstract method of a `java.util.function`
    /// interface returning this kind. The `Supplier` variants prefer `get`
    /// and override this in the catalog.
    pub fn sam_method_name(self) -> &'static str {
        match self {
            SimpleKind::Void => "accept",
            SimpleKind::Object => "apply",
            SimpleKind::Bool => "test",
            SimpleKind::Double => "applyAsDouble",
            SimpleKind::Int => "applyAsInt",
            SimpleKind::Long => "applyAsLong",
        }
    }

    /// A short camel-case name distinguishing the kind in generated code.
    pub fn short_name(self) -> &'static str {
        match self {
            SimpleKind::Void => "Void",
            SimpleKind::Object => "Obj",
            SimpleKind::Bool => "Bool",
            SimpleKind::Double => "Double",
            SimpleKind::Int => "Int",
            SimpleKind::Long => "Long",
        }
    }

    /// The strongest (computationally) kind that encompasses this and
    /// another kind. Identical kinds are preserved, `int` widens to `long`,
    /// and anything else collapses to `Object`.
    pub fn strongest(self, other: SimpleKind) -> SimpleKind {
        match (self, other) {
            (a, b) if a == b => a,
            (SimpleKind::Int, SimpleKind::Long) | (SimpleKind::Long, SimpleKind::Int) => {
                SimpleKind::Long
            }
            _ => SimpleKind::Object,
        }
    }

    fn from_abbrev(abbrev: u8) -> SimpleKind {
        match abbrev {
            b'v' => SimpleKind::Void,
            b'o' => SimpleKind::Object,
            b'b' => SimpleKind::Bool,
            b'd' => SimpleKind::Double,
            b'i' => SimpleKind::Int,
            b'l' => SimpleKind::Long,
            _ => SimpleKind::Object,
        }
    }
}

/// A function signature with minimal information to describe lambdas. Used
/// only as the lookup key into the functional-interface catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleSignature {
    pub return_type: SimpleKind,
    pub formals: Vec<SimpleKind>,
    pub var_arg: Option<SimpleKind>,
    pub required_count: usize,
}

impl SimpleSignature {
    /// Packed declarations spell formals then return: `"oob"` is
    /// `(Object, Object) -> Bool`.
    pub(crate) fn unpack(packed: &str) -> Self {
        let bytes = packed.as_bytes();
        let (return_abbrev, formal_abbrevs) = match bytes.split_last() {
            Some(split) => split,
            None => (&b'v', &[] as &[u8]),
        };
        let formals: Vec<SimpleKind> = formal_abbrevs
            .iter()
            .map(|abbrev| SimpleKind::from_abbrev(*abbrev))
            .collect();
        Self {
            return_type: SimpleKind::from_abbrev(*return_abbrev),
            required_count: formals.len(),
            formals,
            var_arg: None,
        }
    }
}

/// Classify a type by its principal definition. Nullable types box to
/// `Object` since a primitive cannot hold null.
pub fn classify(ty: &StaticType) -> SimpleKind {
    let simple = simplify(ty);
    if simple.has_null_annotation() {
        return SimpleKind::Object;
    }
    match simple.principal.well_known() {
        Some(WellKnown::Void) => SimpleKind::Void,
        Some(WellKnown::Boolean) => SimpleKind::Bool,
        Some(
            WellKnown::Int
            | WellKnown::StringIndex
            | WellKnown::NoStringIndex
            | WellKnown::StringIndexOption,
        ) => SimpleKind::Int,
        Some(WellKnown::Float64) => SimpleKind::Double,
        _ => SimpleKind::Object,
    }
}

/// The catalog key for a function type. Boolean-like formals widen to
/// `Object` so a value that may arrive boxed never claims a primitive
/// `boolean` parameter slot; returns classify strictly.
pub fn signature(func: &FunctionSignature) -> SimpleSignature {
    let widened = |ty: &StaticType| {
        if ty.is_boolean_like() {
            SimpleKind::Object
        } else {
            classify(ty)
        }
    };
    SimpleSignature {
        return_type: classify(&func.return_type),
        formals: func
            .value_formals()
            .iter()
            .map(|formal| widened(&formal.ty))
            .collect(),
        var_arg: func.rest.as_ref().map(widened),
        required_count: func.required_count(),
    }
}
