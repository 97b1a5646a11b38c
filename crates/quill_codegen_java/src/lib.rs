// quill_codegen_java - Java type lowering for the quill compiler back end
mod lower;
mod names;
mod sam;
mod simple;
mod types;

pub use lower::TypeLowering;
pub use names::{
    java_lang_boolean, java_lang_byte, java_lang_character, java_lang_double, java_lang_float,
    java_lang_integer, java_lang_long, java_lang_object, java_lang_runnable, java_lang_short,
    java_lang_string, java_lang_void, java_util_bit_set, java_util_deque, java_util_list,
    java_util_map, java_util_map_entry, java_util_optional, quill_core_invalid,
    quill_core_nullable, DefaultJavaNames, JavaNames, QualifiedName, SAM_PACKAGE_NAME,
    STRICT_TYPES,
};
pub use sam::{
    suggest_sam_name, Sam, SIMPLE_NAME_ANY, SIMPLE_NAME_BOOLEAN_RETURN, SIMPLE_NAME_FUNCTION,
    SIMPLE_NAME_NO_PARAMS, SIMPLE_NAME_VOID_RETURN,
};
pub use simple::{classify, signature, SimpleKind, SimpleSignature};
pub use types::{JavaType, JavaTypeArg, JavaTypeFormal, Primitive, ReferenceType, WildcardDir};

#[cfg(test)]
mod tests;
