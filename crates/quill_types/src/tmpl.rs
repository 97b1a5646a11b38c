// quill_types/tmpl - Intermediate lowered types with explicit markers
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::definition::{TypeDefinition, WellKnown};

/// A value formal of an intermediate function type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmplFormal {
    pub name: Option<String>,
    pub ty: TmplType,
    pub optional: bool,
}

impl TmplFormal {
    pub fn new(ty: TmplType) -> Self {
        Self {
            name: None,
            ty,
            optional: false,
        }
    }

    pub fn named(name: impl Into<String>, ty: TmplType) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// The intermediate type grammar produced by the middle of the pipeline.
/// Unions carry at most one non-marker member plus the null and failure
/// markers; wider unions are rejected before this representation is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TmplType {
    Nominal {
        definition: Arc<TypeDefinition>,
        params: Vec<TmplType>,
    },
    Function {
        type_formals: Vec<Arc<TypeDefinition>>,
        formals: Vec<TmplFormal>,
        rest: Option<Box<TmplType>>,
        return_type: Box<TmplType>,
    },
    Union(Vec<TmplType>),
    Intersection(Vec<TmplType>),
    /// The failure marker: a computation that may not produce a value.
    Bubble,
    Never,
    /// The universal top type, admitting null.
    Top,
    /// Placeholder for source that did not produce a usable type.
    Garbage,
}

impl TmplType {
    pub fn nominal(definition: TypeDefinition) -> Self {
        TmplType::Nominal {
            definition: Arc::new(definition),
            params: Vec::new(),
        }
    }

    pub fn generic(definition: TypeDefinition, params: Vec<TmplType>) -> Self {
        TmplType::Nominal {
            definition: Arc::new(definition),
            params,
        }
    }

    pub fn builtin(wk: WellKnown) -> Self {
        Self::nominal(TypeDefinition::well_known(wk))
    }

    /// Whether this member of a union marks the null alternative.
    pub fn is_null_marker(&self) -> bool {
        matches!(
            self,
            TmplType::Nominal { definition, .. }
                if definition.well_known == Some(WellKnown::Null)
        )
    }
}
