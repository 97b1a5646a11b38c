// quill_types/definition - Nominal type definitions
use serde::{Deserialize, Serialize};

use crate::types::StaticType;

/// Builtin definitions that back ends dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WellKnown {
    Boolean,
    Int,
    Int64,
    Float64,
    StringIndex,
    NoStringIndex,
    StringIndexOption,
    String,
    Void,
    Never,
    Null,
    Empty,
    AnyValue,
    Problem,
    Result,
}

impl WellKnown {
    /// Canonical source-level name of the definition.
    pub fn name(self) -> &'static str {
        match self {
            WellKnown::Boolean => "Boolean",
            WellKnown::Int => "Int",
            WellKnown::Int64 => "Int64",
            WellKnown::Float64 => "Float64",
            WellKnown::StringIndex => "StringIndex",
            WellKnown::NoStringIndex => "NoStringIndex",
            WellKnown::StringIndexOption => "StringIndexOption",
            WellKnown::String => "String",
            WellKnown::Void => "Void",
            WellKnown::Never => "Never",
            WellKnown::Null => "Null",
            WellKnown::Empty => "Empty",
            WellKnown::AnyValue => "AnyValue",
            WellKnown::Problem => "Problem",
            WellKnown::Result => "Result",
        }
    }
}

/// Whether a declared shape can be instantiated directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Abstractness {
    Concrete,
    Abstract,
}

/// The declaration behind a nominal type reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefinitionKind {
    /// A declared class or interface shape.
    Shape { abstractness: Abstractness },
    /// A declaration-site type parameter with its upper bounds.
    Formal { upper_bounds: Vec<StaticType> },
}

/// A nominal type definition: a builtin, a user declaration, or a type formal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub well_known: Option<WellKnown>,
    /// Metadata tag naming an equivalent native type in a target ecosystem.
    pub connected_to: Option<String>,
    pub kind: DefinitionKind,
}

impl TypeDefinition {
    pub fn well_known(wk: WellKnown) -> Self {
        Self {
            name: wk.name().to_string(),
            well_known: Some(wk),
            connected_to: None,
            kind: DefinitionKind::Shape {
                abstractness: Abstractness::Concrete,
            },
        }
    }

    pub fn shape(name: impl Into<String>, abstractness: Abstractness) -> Self {
        Self {
            name: name.into(),
            well_known: None,
            connected_to: None,
            kind: DefinitionKind::Shape { abstractness },
        }
    }

    pub fn formal(name: impl Into<String>, upper_bounds: Vec<StaticType>) -> Self {
        Self {
            name: name.into(),
            well_known: None,
            connected_to: None,
            kind: DefinitionKind::Formal { upper_bounds },
        }
    }

    pub fn connected(mut self, key: impl Into<String>) -> Self {
        self.connected_to = Some(key.into());
        self
    }

    pub fn is_formal(&self) -> bool {
        matches!(self.kind, DefinitionKind::Formal { .. })
    }

    /// Upper bounds of a type formal; empty for shapes.
    pub fn upper_bounds(&self) -> &[StaticType] {
        match &self.kind {
            DefinitionKind::Formal { upper_bounds } => upper_bounds,
            DefinitionKind::Shape { .. } => &[],
        }
    }

    /// A definition is class-like when it erases to a concrete class; a
    /// formal inherits the property from its bounds.
    pub fn is_class_like(&self) -> bool {
        match &self.kind {
            DefinitionKind::Shape { abstractness } => *abstractness == Abstractness::Concrete,
            DefinitionKind::Formal { upper_bounds } => upper_bounds.iter().any(|bound| {
                bound
                    .definition()
                    .is_some_and(|definition| definition.is_class_like())
            }),
        }
    }
}
