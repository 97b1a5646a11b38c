// quill_types/types - Static types, function signatures, and simplification
use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definition::{TypeDefinition, WellKnown};

/// Position information for source-tracked nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    pub fn dummy() -> Self {
        Self::default()
    }
}

/// Contracts the model can check at construction time. Violations are bugs
/// in the phase that built the value, not user-facing diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeModelError {
    #[error("required value formal at position {index} follows an optional formal")]
    InconsistentFormals { index: usize },
}

/// A checked source-level type: a nominal application or a structural
/// function type. Nullability is a flag on the use, not a separate type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StaticType {
    Named {
        definition: Arc<TypeDefinition>,
        args: Vec<StaticType>,
        nullable: bool,
    },
    Function {
        signature: Box<FunctionSignature>,
        nullable: bool,
    },
}

impl StaticType {
    pub fn named(definition: TypeDefinition) -> Self {
        StaticType::Named {
            definition: Arc::new(definition),
            args: Vec::new(),
            nullable: false,
        }
    }

    pub fn generic(definition: TypeDefinition, args: Vec<StaticType>) -> Self {
        StaticType::Named {
            definition: Arc::new(definition),
            args,
            nullable: false,
        }
    }

    pub fn builtin(wk: WellKnown) -> Self {
        Self::named(TypeDefinition::well_known(wk))
    }

    pub fn function(signature: FunctionSignature) -> Self {
        StaticType::Function {
            signature: Box::new(signature),
            nullable: false,
        }
    }

    /// Copy of this type that admits null.
    pub fn nullable(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            StaticType::Named { nullable, .. } | StaticType::Function { nullable, .. } => {
                *nullable = true
            }
        }
        copy
    }

    /// Copy of this type with the outermost nullability removed.
    pub fn non_null(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            StaticType::Named { nullable, .. } | StaticType::Function { nullable, .. } => {
                *nullable = false
            }
        }
        copy
    }

    /// The outermost nullability flag, ignoring wrapper types.
    pub fn is_nullable_here(&self) -> bool {
        match self {
            StaticType::Named { nullable, .. } | StaticType::Function { nullable, .. } => *nullable,
        }
    }

    /// Whether the type admits null once wrappers are peeled off.
    pub fn is_nullable(&self) -> bool {
        simplify(self).has_null_annotation()
    }

    pub fn definition(&self) -> Option<&Arc<TypeDefinition>> {
        match self {
            StaticType::Named { definition, .. } => Some(definition),
            StaticType::Function { .. } => None,
        }
    }

    pub fn well_known(&self) -> Option<WellKnown> {
        self.definition().and_then(|definition| definition.well_known)
    }

    pub fn args(&self) -> &[StaticType] {
        match self {
            StaticType::Named { args, .. } => args,
            StaticType::Function { .. } => &[],
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, StaticType::Function { .. })
    }

    /// True for the strict non-null boolean and for a never-typed boolean.
    /// Wider than a definition check: the parameter-widening rule in the
    /// back ends keys off this.
    pub fn is_boolean_like(&self) -> bool {
        match self {
            StaticType::Named {
                definition,
                args,
                nullable: false,
            } => match definition.well_known {
                Some(WellKnown::Boolean) => args.is_empty(),
                Some(WellKnown::Never) => args.len() == 1 && args[0].is_boolean_like(),
                _ => false,
            },
            _ => false,
        }
    }

    /// Whether the sole type argument could be null. Containers that reject
    /// null elements cannot be used unless this is provably false.
    pub fn has_nullable_type_actual(&self) -> bool {
        let args = self.args();
        args.len() != 1 || args[0].is_nullable()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueFormalKind {
    Required,
    Optional,
}

/// A value parameter of a function type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueFormal {
    pub name: Option<String>,
    pub ty: StaticType,
    pub kind: ValueFormalKind,
}

impl ValueFormal {
    pub fn required(ty: StaticType) -> Self {
        Self {
            name: None,
            ty,
            kind: ValueFormalKind::Required,
        }
    }

    pub fn optional(ty: StaticType) -> Self {
        Self {
            name: None,
            ty,
            kind: ValueFormalKind::Optional,
        }
    }

    pub fn named(name: impl Into<String>, ty: StaticType, kind: ValueFormalKind) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            kind,
        }
    }
}

/// A structural function type: value formals in declaration order (receiver
/// first when present), an optional variadic tail, and a return type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub type_formals: Vec<Arc<TypeDefinition>>,
    pub formals: Vec<ValueFormal>,
    pub rest: Option<StaticType>,
    pub has_receiver: bool,
    pub return_type: StaticType,
}

impl FunctionSignature {
    pub fn new(formals: Vec<ValueFormal>, return_type: StaticType) -> Self {
        Self {
            type_formals: Vec::new(),
            formals,
            rest: None,
            has_receiver: false,
            return_type,
        }
    }

    pub fn with_rest(mut self, rest: StaticType) -> Self {
        self.rest = Some(rest);
        self
    }

    pub fn with_receiver(mut self) -> Self {
        self.has_receiver = true;
        self
    }

    pub fn with_type_formals(mut self, type_formals: Vec<Arc<TypeDefinition>>) -> Self {
        self.type_formals = type_formals;
        self
    }

    /// Value formals excluding the implicit receiver.
    pub fn value_formals(&self) -> &[ValueFormal] {
        if self.has_receiver {
            self.formals.get(1..).unwrap_or(&[])
        } else {
            &self.formals
        }
    }

    /// Number of leading formals before the first optional one.
    pub fn required_count(&self) -> usize {
        self.value_formals()
            .iter()
            .take_while(|formal| formal.kind == ValueFormalKind::Required)
            .count()
    }

    /// Check the required/optional split invariant upstream phases must
    /// maintain: no required formal after an optional one.
    pub fn validate(&self) -> Result<(), TypeModelError> {
        let mut seen_optional = false;
        for (index, formal) in self.value_formals().iter().enumerate() {
            match formal.kind {
                ValueFormalKind::Optional => seen_optional = true,
                ValueFormalKind::Required if seen_optional => {
                    return Err(TypeModelError::InconsistentFormals { index });
                }
                ValueFormalKind::Required => {}
            }
        }
        Ok(())
    }
}

/// Surface annotations peeled off a type during simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeAnnotation {
    Nullable,
    Bubbly,
    Never,
}

/// A principal type plus the annotations that were stripped from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedType {
    pub principal: StaticType,
    pub annotations: BTreeSet<TypeAnnotation>,
}

impl SimplifiedType {
    pub fn has_null_annotation(&self) -> bool {
        self.annotations.contains(&TypeAnnotation::Nullable)
    }
}

/// Decompose a type into a non-nullable principal type and an annotation
/// set. `Result` wrappers reduce to their pass type and `Never` wrappers to
/// their payload; the nullability of every peeled layer is recorded.
pub fn simplify(ty: &StaticType) -> SimplifiedType {
    let mut annotations = BTreeSet::new();
    let mut principal = ty.clone();
    loop {
        if principal.is_nullable_here() {
            annotations.insert(TypeAnnotation::Nullable);
            principal = principal.non_null();
        }
        let unwrapped = match &principal {
            StaticType::Named {
                definition, args, ..
            } => match definition.well_known {
                Some(WellKnown::Result) if !args.is_empty() => {
                    annotations.insert(TypeAnnotation::Bubbly);
                    Some(args[0].clone())
                }
                Some(WellKnown::Never) if args.len() == 1 => {
                    annotations.insert(TypeAnnotation::Never);
                    Some(args[0].clone())
                }
                _ => None,
            },
            StaticType::Function { .. } => None,
        };
        match unwrapped {
            Some(inner) => principal = inner,
            None => break,
        }
    }
    SimplifiedType {
        principal,
        annotations,
    }
}
