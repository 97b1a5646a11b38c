// quill_codegen_java/sam - Functional-interface catalog and synthesis
use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use quill_types::{FunctionSignature, StaticType, WellKnown};

use crate::names::{java_lang_runnable, java_util_function, QualifiedName};
use crate::simple::{signature, SimpleSignature};

pub const SIMPLE_NAME_FUNCTION: &str = "Function";
pub const SIMPLE_NAME_ANY: &str = "Any";
pub const SIMPLE_NAME_VOID_RETURN: &str = "Procedure";
pub const SIMPLE_NAME_BOOLEAN_RETURN: &str = "Predicate";
pub const SIMPLE_NAME_NO_PARAMS: &str = "Nullary";

/// A single-abstract-method interface standing in for a function type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sam {
    pub class_name: QualifiedName,
    sig: SimpleSignature,
    pub method: String,
    pub num_type_args: usize,
    pub synthetic: bool,
}

impl Sam {
    /// The exact-match catalog lookup. `None` is the expected signal to
    /// synthesize; substituting a "close" interface would break descriptor
    /// compatibility, so there is no structural fallback.
    pub fn standard(func: &FunctionSignature) -> Option<Sam> {
        catalog().get(&signature(func)).cloned()
    }

    /// A freshly named interface for a shape the standard library does not
    /// cover. The emitter declares it later; here we only decide the name.
    pub fn synthetic(name: impl Into<String>, func: &FunctionSignature, pkg: QualifiedName) -> Sam {
        let sig = signature(func);
        let class_name = pkg.join(name);
        debug!(class = %class_name, "minting synthetic functional interface");
        Sam {
            method: sig.return_type.sam_method_name().to_string(),
            class_name,
            sig,
            num_type_args: 0,
            synthetic: true,
        }
    }

    pub fn signature(&self) -> &SimpleSignature {
        &self.sig
    }

    fn entry(name: &str, packed: &str, method: Option<&str>, pkg: QualifiedName) -> Sam {
        let sig = SimpleSignature::unpack(packed);
        let method = method
            .map(str::to_string)
            .unwrap_or_else(|| sig.return_type.sam_method_name().to_string());
        Sam {
            class_name: pkg.join(name),
            num_type_args: packed.bytes().filter(|abbrev| *abbrev == b'o').count(),
            method,
            sig,
            synthetic: false,
        }
    }
}

/// The `java.util.function` interfaces, declared by packed signature.
/// Methods are listed only where the return kind's default name is wrong.
const STANDARD_ENTRIES: &[(&str, &str, Option<&str>)] = &[
    ("BiConsumer", "oov", Some("accept")),
    ("BiFunction", "ooo", None),
    ("BiPredicate", "oob", None),
    ("BooleanSupplier", "b", Some("getAsBoolean")),
    ("Consumer", "ov", Some("accept")),
    ("DoubleBinaryOperator", "ddd", None),
    ("DoubleConsumer", "dv", Some("accept")),
    ("DoubleFunction", "do", None),
    ("DoublePredicate", "db", None),
    ("DoubleSupplier", "d", Some("getAsDouble")),
    ("DoubleToIntFunction", "di", None),
    ("DoubleToLongFunction", "dl", None),
    ("DoubleUnaryOperator", "dd", None),
    ("Function", "oo", None),
    ("IntBinaryOperator", "iii", None),
    ("IntConsumer", "iv", Some("accept")),
    ("IntFunction", "io", None),
    ("IntPredicate", "ib", None),
    ("IntSupplier", "i", Some("getAsInt")),
    ("IntToDoubleFunction", "id", None),
    ("IntToLongFunction", "il", None),
    ("IntUnaryOperator", "ii", None),
    ("LongBinaryOperator", "lll", None),
    ("LongConsumer", "lv", Some("accept")),
    ("LongFunction", "lo", None),
    ("LongPredicate", "lb", None),
    ("LongSupplier", "l", Some("getAsLong")),
    ("LongToDoubleFunction", "ld", None),
    ("LongToIntFunction", "li", None),
    ("LongUnaryOperator", "ll", None),
    ("ObjDoubleConsumer", "odv", Some("accept")),
    ("ObjIntConsumer", "oiv", Some("accept")),
    ("ObjLongConsumer", "olv", Some("accept")),
    ("Predicate", "ob", None),
    ("Supplier", "o", Some("get")),
    ("ToDoubleBiFunction", "ood", None),
    ("ToDoubleFunction", "od", None),
    ("ToIntBiFunction", "ooi", None),
    ("ToIntFunction", "oi", None),
    ("ToLongBiFunction", "ool", None),
    ("ToLongFunction", "ol", None),
];

static CATALOG: OnceLock<HashMap<SimpleSignature, Sam>> = OnceLock::new();

pub(crate) fn catalog() -> &'static HashMap<SimpleSignature, Sam> {
    CATALOG.get_or_init(|| {
        let mut map = HashMap::new();
        for (name, packed, method) in STANDARD_ENTRIES {
            let sam = Sam::entry(name, packed, *method, java_util_function());
            map.insert(sam.sig.clone(), sam);
        }
        let runnable = Sam {
            class_name: java_lang_runnable(),
            sig: SimpleSignature::unpack("v"),
            method: "run".to_string(),
            num_type_args: 0,
            synthetic: false,
        };
        map.insert(runnable.sig.clone(), runnable);
        map
    })
}

/// Applies some simple rules to deduce a name for a synthesized interface
/// from its function type.
pub fn suggest_sam_name(func: &FunctionSignature) -> String {
    let mut name = String::new();
    for formal in func.value_formals() {
        name.push_str(&simple_type_name(&formal.ty));
    }
    if let Some(rest) = &func.rest {
        name.push_str(&simple_type_name(rest));
    }
    if name.is_empty() {
        name.push_str(SIMPLE_NAME_NO_PARAMS);
    }
    let return_type = &func.return_type;
    let return_hint = match return_type.well_known() {
        Some(WellKnown::Void) if !return_type.is_nullable_here() => {
            SIMPLE_NAME_VOID_RETURN.to_string()
        }
        Some(WellKnown::Boolean) if !return_type.is_nullable_here() => {
            SIMPLE_NAME_BOOLEAN_RETURN.to_string()
        }
        _ => simple_type_name(return_type),
    };
    name.push_str(&return_hint);
    name
}

fn simple_type_name(ty: &StaticType) -> String {
    match ty {
        StaticType::Function { .. } => SIMPLE_NAME_FUNCTION.to_string(),
        StaticType::Named { definition, .. } => {
            if definition.well_known == Some(WellKnown::AnyValue) {
                SIMPLE_NAME_ANY.to_string()
            } else {
                definition.name.clone()
            }
        }
    }
}
