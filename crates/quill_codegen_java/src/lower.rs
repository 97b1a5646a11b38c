// quill_codegen_java/lower - Recursive lowering of source types to Java types
use std::sync::Arc;

use tracing::trace;

use quill_types::{
    simplify, FunctionSignature, StaticType, TmplType, TypeDefinition, ValueFormal,
    ValueFormalKind, WellKnown,
};

use crate::names::{java_lang_object, java_util_optional, JavaNames, STRICT_TYPES};
use crate::simple::SimpleKind;
use crate::types::{JavaType, JavaTypeArg, JavaTypeFormal, Primitive, ReferenceType, WildcardDir};

/// The universal top type loses all structure when lowered.
fn top_type() -> JavaType {
    if STRICT_TYPES {
        JavaType::Invalid
    } else {
        JavaType::Reference(ReferenceType::new(java_lang_object()))
    }
}

/// The empty type has no values, which Java can only approximate:
/// `Optional<? super Object>` is satisfiable solely by an absent value.
fn empty_type() -> JavaType {
    JavaType::Reference(ReferenceType::with_args(
        java_util_optional(),
        vec![JavaTypeArg::Bounded {
            dir: WildcardDir::Super,
            bound: Box::new(JavaType::Reference(ReferenceType::new(java_lang_object()))),
        }],
    ))
}

/// The translation from source types to Java types, run against an injected
/// naming environment. Every entry point is total: shapes Java cannot
/// express degrade to `Invalid` or `Void` so later passes still have
/// something syntactically valid to attach diagnostics to.
pub struct TypeLowering<'a> {
    names: &'a dyn JavaNames,
}

impl<'a> TypeLowering<'a> {
    pub fn new(names: &'a dyn JavaNames) -> Self {
        Self { names }
    }

    /// Lower a frontend type. Nullability is peeled off first and re-applied
    /// to whatever the principal type lowers to.
    pub fn from_frontend(&self, ty: &StaticType) -> JavaType {
        let simplified = simplify(ty);
        let mut result = self.lower_principal(&simplified.principal);
        if simplified.has_null_annotation() {
            result = result.make_nullable();
        }
        result
    }

    fn lower_principal(&self, principal: &StaticType) -> JavaType {
        let (definition, args) = match principal {
            StaticType::Function { signature, .. } => return self.from_signature(signature),
            StaticType::Named {
                definition, args, ..
            } => (definition, args),
        };
        match definition.well_known {
            Some(WellKnown::Boolean) => JavaType::Primitive(Primitive::Boolean),
            Some(WellKnown::Empty) => empty_type(),
            Some(WellKnown::Float64) => JavaType::Primitive(Primitive::Double),
            Some(
                WellKnown::Int
                | WellKnown::StringIndex
                | WellKnown::NoStringIndex
                | WellKnown::StringIndexOption,
            ) => JavaType::Primitive(Primitive::Int),
            Some(WellKnown::Int64) => JavaType::Primitive(Primitive::Long),
            Some(WellKnown::AnyValue) => top_type(),
            Some(WellKnown::Problem) => JavaType::Invalid,
            Some(WellKnown::Void) => JavaType::Void,
            _ => {
                let lowered: Vec<JavaTypeArg> = args.iter().map(|arg| self.type_arg(arg)).collect();
                if let Some(key) = definition.connected_to.as_deref() {
                    if let Some(connected) = self.names.connected_java_type(key, &lowered) {
                        trace!(key, definition = %definition.name, "connected native type override");
                        return connected;
                    }
                }
                JavaType::Reference(ReferenceType::with_args(
                    self.names.class_name(definition),
                    lowered,
                ))
            }
        }
    }

    /// Lower a function type to a reference to its functional interface,
    /// with one type argument per `Object`-kind position: formals first,
    /// then the variadic tail, then the return.
    pub fn from_signature(&self, func: &FunctionSignature) -> JavaType {
        debug_assert!(func.validate().is_ok());
        let sam = self.names.sam_type(func);
        let mut args = Vec::new();
        if sam.num_type_args > 0 {
            let sig = sam.signature();
            for (formal, kind) in func.value_formals().iter().zip(&sig.formals) {
                if *kind == SimpleKind::Object {
                    args.push(self.type_arg(&formal.ty));
                }
            }
            if sig.var_arg == Some(SimpleKind::Object) {
                if let Some(rest) = &func.rest {
                    args.push(self.type_arg(rest));
                }
            }
            if sig.return_type == SimpleKind::Object {
                args.push(self.type_arg(&func.return_type));
            }
        }
        JavaType::Reference(ReferenceType::with_args(sam.class_name.clone(), args))
    }

    /// Lower an intermediate type by normalizing it to the frontend
    /// representation and reusing the frontend rules.
    pub fn from_tmpl(&self, ty: &TmplType) -> JavaType {
        self.from_frontend(&to_frontend(ty))
    }

    /// A use-site type argument: the lowered type, reference-coerced.
    pub fn type_arg(&self, ty: &StaticType) -> JavaTypeArg {
        JavaTypeArg::Reference(self.from_frontend(ty).as_reference_type())
    }

    /// A declaration-site type parameter. The class-like bound, if any, must
    /// come first in a Java `extends` clause; the implicit universal bound
    /// is elided.
    pub fn type_formal(&self, formal: &TypeDefinition) -> JavaTypeFormal {
        let mut bounds: Vec<&StaticType> = formal.upper_bounds().iter().collect();
        bounds.sort_by_key(|bound| {
            !bound
                .definition()
                .is_some_and(|definition| definition.is_class_like())
        });
        let object = java_lang_object();
        let upper_bounds = bounds
            .into_iter()
            .map(|bound| self.from_frontend(bound).as_reference_type())
            .filter(|bound| bound.name != object)
            .collect();
        JavaTypeFormal {
            name: self.names.type_formal_name(formal),
            upper_bounds,
        }
    }
}

/// Rebuild an intermediate type as a frontend type so one set of lowering
/// rules serves both representations.
fn to_frontend(ty: &TmplType) -> StaticType {
    match ty {
        TmplType::Nominal { definition, params } => StaticType::Named {
            definition: Arc::clone(definition),
            args: params.iter().map(to_frontend).collect(),
            nullable: false,
        },
        TmplType::Function {
            type_formals,
            formals,
            rest,
            return_type,
        } => {
            let has_receiver = formals
                .first()
                .is_some_and(|formal| !formal.optional && formal.name.as_deref() == Some("this"));
            let value_formals = formals
                .iter()
                .map(|formal| ValueFormal {
                    name: formal.name.clone(),
                    ty: to_frontend(&formal.ty),
                    kind: if formal.optional {
                        ValueFormalKind::Optional
                    } else {
                        ValueFormalKind::Required
                    },
                })
                .collect();
            StaticType::Function {
                signature: Box::new(FunctionSignature {
                    type_formals: type_formals.clone(),
                    formals: value_formals,
                    rest: rest.as_deref().map(to_frontend),
                    has_receiver,
                    return_type: to_frontend(return_type),
                }),
                nullable: false,
            }
        }
        TmplType::Union(members) => union_to_frontend(members),
        TmplType::Intersection(_) => StaticType::builtin(WellKnown::Problem),
        TmplType::Bubble => StaticType::builtin(WellKnown::Void),
        TmplType::Never => StaticType::builtin(WellKnown::Void),
        TmplType::Top => StaticType::builtin(WellKnown::AnyValue).nullable(),
        TmplType::Garbage => StaticType::builtin(WellKnown::Problem),
    }
}

/// A union carries at most one non-marker member beside the null and
/// failure markers. The failure alternative has no Java image, so its
/// presence collapses the whole union to void.
fn union_to_frontend(members: &[TmplType]) -> StaticType {
    let mut has_null = false;
    let mut has_bubble = false;
    let mut principal: Option<StaticType> = None;
    for member in members {
        if matches!(member, TmplType::Bubble) {
            has_bubble = true;
        } else if member.is_null_marker() {
            has_null = true;
        } else if principal.is_none() {
            principal = Some(to_frontend(member));
        } else {
            debug_assert!(false, "union with more than one non-marker member");
        }
    }
    if has_bubble {
        return StaticType::builtin(WellKnown::Void);
    }
    let principal = principal.unwrap_or_else(|| StaticType::builtin(WellKnown::Problem));
    if has_null {
        principal.nullable()
    } else {
        principal
    }
}
