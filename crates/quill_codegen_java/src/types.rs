// quill_codegen_java/types - The Java-side type value hierarchy
use serde::{Deserialize, Serialize};

use quill_types::Span;

use crate::names::{
    java_lang_boolean, java_lang_byte, java_lang_character, java_lang_double, java_lang_float,
    java_lang_integer, java_lang_long, java_lang_short, java_lang_void, quill_core_invalid,
    quill_core_nullable, QualifiedName,
};

/// The JVM primitive types, excluding void. Primitives themselves are never
/// nullable; only their boxed wrappers are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Boolean,
    Char,
    Short,
    Byte,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Byte => "byte",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// The boxed wrapper class for this primitive.
    pub fn boxed(self) -> ReferenceType {
        let name = match self {
            Primitive::Boolean => java_lang_boolean(),
            Primitive::Char => java_lang_character(),
            Primitive::Short => java_lang_short(),
            Primitive::Byte => java_lang_byte(),
            Primitive::Int => java_lang_integer(),
            Primitive::Long => java_lang_long(),
            Primitive::Float => java_lang_float(),
            Primitive::Double => java_lang_double(),
        };
        ReferenceType::new(name)
    }
}

/// A class or interface type use: qualified name, nullability, type
/// arguments, and an optional remembered source position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceType {
    pub name: QualifiedName,
    pub is_nullable: bool,
    pub args: Vec<JavaTypeArg>,
    pub pos: Option<Span>,
}

impl ReferenceType {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            is_nullable: false,
            args: Vec::new(),
            pos: None,
        }
    }

    pub fn with_args(name: QualifiedName, args: Vec<JavaTypeArg>) -> Self {
        Self {
            name,
            is_nullable: false,
            args,
            pos: None,
        }
    }

    /// Type-use text. Nullable references carry the nullability annotation
    /// in its JLS position, directly before the simple name.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.is_nullable {
            if let Some((simple, pkg)) = self.name.segments().split_last() {
                for segment in pkg {
                    out.push_str(segment);
                    out.push('.');
                }
                out.push('@');
                out.push_str(&quill_core_nullable().to_string());
                out.push(' ');
                out.push_str(simple);
            }
        } else {
            out.push_str(&self.name.to_string());
        }
        if !self.args.is_empty() {
            out.push('<');
            for (index, arg) in self.args.iter().enumerate() {
                if index != 0 {
                    out.push_str(", ");
                }
                out.push_str(&arg.render());
            }
            out.push('>');
        }
        out
    }

    pub fn to_raw_type(&self) -> ReferenceType {
        if self.args.is_empty() {
            self.clone()
        } else {
            ReferenceType {
                args: Vec::new(),
                ..self.clone()
            }
        }
    }

    pub fn make_nullable(&self) -> ReferenceType {
        if self.is_nullable {
            self.clone()
        } else {
            ReferenceType {
                is_nullable: true,
                ..self.clone()
            }
        }
    }

    /// Stamp a source position; the first position sticks.
    pub fn with_pos(&self, pos: Span) -> ReferenceType {
        if self.pos.is_some() {
            self.clone()
        } else {
            ReferenceType {
                pos: Some(pos),
                ..self.clone()
            }
        }
    }
}

/// The image of a source type in Java: a primitive, a reference type, the
/// void type, or the marker for types with no faithful translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JavaType {
    Primitive(Primitive),
    Reference(ReferenceType),
    Void,
    Invalid,
}

impl JavaType {
    /// Type-use text, e.g. for a field or parameter declaration.
    pub fn render(&self) -> String {
        match self {
            JavaType::Primitive(primitive) => primitive.keyword().to_string(),
            JavaType::Reference(reference) => reference.render(),
            JavaType::Void => java_lang_void().to_string(),
            JavaType::Invalid => quill_core_invalid().to_string(),
        }
    }

    /// Method-result text: the `void` keyword instead of `java.lang.Void`.
    pub fn render_result(&self) -> String {
        match self {
            JavaType::Void => "void".to_string(),
            other => other.render(),
        }
    }

    /// The type with type arguments erased; primitives box to their wrapper.
    pub fn to_raw_type(&self) -> JavaType {
        match self {
            JavaType::Primitive(primitive) => JavaType::Reference(primitive.boxed()),
            JavaType::Reference(reference) => JavaType::Reference(reference.to_raw_type()),
            JavaType::Void => JavaType::Reference(ReferenceType::new(java_lang_void())),
            JavaType::Invalid => JavaType::Reference(ReferenceType::new(quill_core_invalid())),
        }
    }

    /// A class-literal expression for the erased type. Annotations are not
    /// legal there, so nullability is dropped along with the arguments.
    pub fn class_literal(&self) -> String {
        let rendered = match self.to_raw_type() {
            JavaType::Reference(reference) => ReferenceType {
                is_nullable: false,
                ..reference
            }
            .render(),
            other => other.render(),
        };
        format!("{rendered}.class")
    }

    /// For use as a type argument, or where a reference type is otherwise
    /// required.
    pub fn as_reference_type(&self) -> ReferenceType {
        match self {
            JavaType::Primitive(primitive) => primitive.boxed(),
            JavaType::Reference(reference) => reference.clone(),
            JavaType::Void => ReferenceType::new(java_lang_void()),
            JavaType::Invalid => ReferenceType::new(quill_core_invalid()),
        }
    }

    /// The nullable form of this type; idempotent. Primitives box first.
    pub fn make_nullable(&self) -> JavaType {
        match self {
            JavaType::Primitive(primitive) => JavaType::Reference(primitive.boxed().make_nullable()),
            JavaType::Reference(reference) => JavaType::Reference(reference.make_nullable()),
            JavaType::Void => {
                JavaType::Reference(ReferenceType::new(java_lang_void()).make_nullable())
            }
            JavaType::Invalid => {
                JavaType::Reference(ReferenceType::new(quill_core_invalid()).make_nullable())
            }
        }
    }

    pub fn with_pos(&self, pos: Span) -> JavaType {
        match self {
            JavaType::Reference(reference) => JavaType::Reference(reference.with_pos(pos)),
            other => other.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardDir {
    Extends,
    Super,
}

/// A use-site type argument: a concrete reference, a type variable, or a
/// wildcard. Wildcards are built by callers that already know the position's
/// variance; nothing here infers it from usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JavaTypeArg {
    Reference(ReferenceType),
    Formal(JavaTypeFormal),
    Wildcard,
    Bounded {
        dir: WildcardDir,
        bound: Box<JavaType>,
    },
}

impl JavaTypeArg {
    pub fn render(&self) -> String {
        match self {
            JavaTypeArg::Reference(reference) => reference.render(),
            JavaTypeArg::Formal(formal) => formal.name.clone(),
            JavaTypeArg::Wildcard => "?".to_string(),
            JavaTypeArg::Bounded { dir, bound } => {
                let keyword = match dir {
                    WildcardDir::Extends => "extends",
                    WildcardDir::Super => "super",
                };
                format!("? {keyword} {}", bound.as_reference_type().render())
            }
        }
    }
}

/// A declaration-site type parameter, e.g. `T extends Number`. Java allows
/// at most one class among the bounds and requires it first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaTypeFormal {
    pub name: String,
    pub upper_bounds: Vec<ReferenceType>,
}

impl JavaTypeFormal {
    pub fn render_declaration(&self) -> String {
        if self.upper_bounds.is_empty() {
            self.name.clone()
        } else {
            let bounds: Vec<String> = self
                .upper_bounds
                .iter()
                .map(ReferenceType::render)
                .collect();
            format!("{} extends {}", self.name, bounds.join(" & "))
        }
    }
}
