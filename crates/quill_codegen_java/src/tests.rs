use crate::sam::catalog;
use crate::*;
use quill_types::{FunctionSignature, Span, StaticType, ValueFormal, WellKnown};

const ALL_KINDS: [SimpleKind; 6] = [
    SimpleKind::Void,
    SimpleKind::Object,
    SimpleKind::Bool,
    SimpleKind::Double,
    SimpleKind::Int,
    SimpleKind::Long,
];

fn ty(wk: WellKnown) -> StaticType {
    StaticType::builtin(wk)
}

fn func(formals: Vec<StaticType>, return_type: StaticType) -> FunctionSignature {
    FunctionSignature::new(
        formals.into_iter().map(ValueFormal::required).collect(),
        return_type,
    )
}

#[test]
fn strongest_is_commutative_and_idempotent() {
    for a in ALL_KINDS {
        assert_eq!(a.strongest(a), a);
        for b in ALL_KINDS {
            assert_eq!(a.strongest(b), b.strongest(a));
        }
    }
}

#[test]
fn strongest_combines_numeric_kinds() {
    assert_eq!(SimpleKind::Int.strongest(SimpleKind::Long), SimpleKind::Long);
    assert_eq!(
        SimpleKind::Bool.strongest(SimpleKind::Int),
        SimpleKind::Object
    );
    assert_eq!(
        SimpleKind::Double.strongest(SimpleKind::Int),
        SimpleKind::Object
    );
    assert_eq!(
        SimpleKind::Double.strongest(SimpleKind::Double),
        SimpleKind::Double
    );
}

#[test]
fn kind_names() {
    assert_eq!(SimpleKind::Bool.sam_method_name(), "test");
    assert_eq!(SimpleKind::Long.sam_method_name(), "applyAsLong");
    assert_eq!(SimpleKind::Object.short_name(), "Obj");
    assert_eq!(SimpleKind::Int.short_name(), "Int");
}

#[test]
fn classify_follows_the_well_known_table() {
    assert_eq!(classify(&ty(WellKnown::Void)), SimpleKind::Void);
    assert_eq!(classify(&ty(WellKnown::Boolean)), SimpleKind::Bool);
    assert_eq!(classify(&ty(WellKnown::Int)), SimpleKind::Int);
    assert_eq!(classify(&ty(WellKnown::StringIndex)), SimpleKind::Int);
    assert_eq!(classify(&ty(WellKnown::NoStringIndex)), SimpleKind::Int);
    assert_eq!(classify(&ty(WellKnown::StringIndexOption)), SimpleKind::Int);
    assert_eq!(classify(&ty(WellKnown::Float64)), SimpleKind::Double);
    assert_eq!(classify(&ty(WellKnown::Int64)), SimpleKind::Object);
    assert_eq!(classify(&ty(WellKnown::String)), SimpleKind::Object);
}

#[test]
fn classify_boxes_nullable_primitives() {
    assert_eq!(classify(&ty(WellKnown::Int).nullable()), SimpleKind::Object);
    assert_eq!(
        classify(&ty(WellKnown::Boolean).nullable()),
        SimpleKind::Object
    );
}

#[test]
fn classify_is_deterministic() {
    let nullable_int = ty(WellKnown::Int).nullable();
    assert_eq!(classify(&nullable_int), classify(&nullable_int));
}

#[test]
fn signature_widens_boolean_like_formals_but_not_returns() {
    let sig = signature(&func(vec![ty(WellKnown::Boolean)], ty(WellKnown::Boolean)));
    assert_eq!(sig.formals, vec![SimpleKind::Object]);
    assert_eq!(sig.return_type, SimpleKind::Bool);
}

#[test]
fn signature_counts_leading_required_formals() {
    let sig = signature(&FunctionSignature::new(
        vec![
            ValueFormal::required(ty(WellKnown::String)),
            ValueFormal::optional(ty(WellKnown::String)),
        ],
        ty(WellKnown::Void),
    ));
    assert_eq!(sig.formals.len(), 2);
    assert_eq!(sig.required_count, 1);
}

#[test]
fn signature_skips_the_receiver_formal() {
    let sig = signature(
        &FunctionSignature::new(
            vec![
                ValueFormal::named(
                    "this",
                    ty(WellKnown::String),
                    quill_types::ValueFormalKind::Required,
                ),
                ValueFormal::required(ty(WellKnown::String)),
            ],
            ty(WellKnown::Void),
        )
        .with_receiver(),
    );
    assert_eq!(sig.formals, vec![SimpleKind::Object]);
}

#[test]
fn catalog_keys_match_their_entries() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 42);
    for (sig, sam) in catalog {
        assert_eq!(sam.signature(), sig);
        assert!(!sam.synthetic);
        let object_positions = sig
            .formals
            .iter()
            .chain(sig.var_arg.iter())
            .chain(std::iter::once(&sig.return_type))
            .filter(|kind| **kind == SimpleKind::Object)
            .count();
        assert_eq!(sam.num_type_args, object_positions);
    }
}

#[test]
fn standard_lookup_hits_the_expected_interfaces() {
    let predicate = Sam::standard(&func(vec![ty(WellKnown::String)], ty(WellKnown::Boolean)))
        .expect("Predicate");
    assert_eq!(predicate.class_name.to_string(), "java.util.function.Predicate");
    assert_eq!(predicate.method, "test");
    assert_eq!(predicate.num_type_args, 1);

    let operator = Sam::standard(&func(
        vec![ty(WellKnown::Int), ty(WellKnown::Int)],
        ty(WellKnown::Int),
    ))
    .expect("IntBinaryOperator");
    assert_eq!(
        operator.class_name.to_string(),
        "java.util.function.IntBinaryOperator"
    );
    assert_eq!(operator.num_type_args, 0);

    let supplier = Sam::standard(&func(vec![], ty(WellKnown::String))).expect("Supplier");
    assert_eq!(supplier.method, "get");
    assert_eq!(supplier.num_type_args, 1);

    let runnable = Sam::standard(&func(vec![], ty(WellKnown::Void))).expect("Runnable");
    assert_eq!(runnable.class_name.to_string(), "java.lang.Runnable");
    assert_eq!(runnable.method, "run");
}

#[test]
fn varargs_and_optionals_block_standard_matches() {
    let with_rest = func(vec![], ty(WellKnown::Void)).with_rest(ty(WellKnown::String));
    assert_eq!(Sam::standard(&with_rest), None);

    let with_optional = FunctionSignature::new(
        vec![
            ValueFormal::required(ty(WellKnown::String)),
            ValueFormal::optional(ty(WellKnown::String)),
        ],
        ty(WellKnown::Void),
    );
    assert_eq!(Sam::standard(&with_optional), None);
}

#[test]
fn synthesis_covers_every_missed_signature() {
    let missed = func(
        vec![ty(WellKnown::Int), ty(WellKnown::String)],
        ty(WellKnown::Boolean),
    );
    assert_eq!(Sam::standard(&missed), None);
    let sam = Sam::synthetic(
        suggest_sam_name(&missed),
        &missed,
        QualifiedName::known(&["quill", "gen", "function"]),
    );
    assert!(sam.synthetic);
    assert_eq!(sam.num_type_args, 0);
    assert_eq!(
        sam.class_name.to_string(),
        "quill.gen.function.IntStringPredicate"
    );
    assert_eq!(sam.method, "test");
}

#[test]
fn suggested_names_follow_the_fixed_tokens() {
    assert_eq!(
        suggest_sam_name(&func(vec![], ty(WellKnown::String))),
        "NullaryString"
    );
    assert_eq!(
        suggest_sam_name(&func(vec![], ty(WellKnown::Void))),
        "NullaryProcedure"
    );
    let callback = StaticType::function(func(vec![], ty(WellKnown::Void)));
    assert_eq!(
        suggest_sam_name(&func(vec![callback], ty(WellKnown::Void))),
        "FunctionProcedure"
    );
    assert_eq!(
        suggest_sam_name(&func(vec![ty(WellKnown::AnyValue)], ty(WellKnown::Int))),
        "AnyInt"
    );
    // A nullable boolean return is not the predicate shape.
    assert_eq!(
        suggest_sam_name(&func(vec![], ty(WellKnown::Boolean).nullable())),
        "NullaryBoolean"
    );
}

#[test]
fn raw_and_nullable_forms_are_idempotent() {
    let values = vec![
        JavaType::Primitive(Primitive::Int),
        JavaType::Reference(ReferenceType::with_args(
            java_util_list(),
            vec![JavaTypeArg::Reference(ReferenceType::new(
                java_lang_string(),
            ))],
        )),
        JavaType::Void,
        JavaType::Invalid,
    ];
    for value in values {
        assert_eq!(value.to_raw_type().to_raw_type(), value.to_raw_type());
        assert_eq!(
            value.make_nullable().make_nullable(),
            value.make_nullable()
        );
    }
}

#[test]
fn primitives_box_rather_than_becoming_nullable() {
    let nullable = JavaType::Primitive(Primitive::Boolean).make_nullable();
    match nullable {
        JavaType::Reference(reference) => {
            assert_eq!(reference.name, java_lang_boolean());
            assert!(reference.is_nullable);
        }
        other => panic!("expected boxed reference, got {other:?}"),
    }
}

#[test]
fn rendering_covers_the_type_arg_grammar() {
    assert_eq!(JavaType::Primitive(Primitive::Int).render(), "int");
    assert_eq!(JavaType::Void.render(), "java.lang.Void");
    assert_eq!(JavaType::Void.render_result(), "void");
    assert_eq!(JavaType::Invalid.render(), "quill.core.Invalid");
    assert_eq!(JavaTypeArg::Wildcard.render(), "?");
    assert_eq!(
        JavaTypeArg::Bounded {
            dir: WildcardDir::Extends,
            bound: Box::new(JavaType::Reference(ReferenceType::new(java_lang_string()))),
        }
        .render(),
        "? extends java.lang.String"
    );
    assert_eq!(
        JavaTypeArg::Formal(JavaTypeFormal {
            name: "T".to_string(),
            upper_bounds: Vec::new(),
        })
        .render(),
        "T"
    );
}

#[test]
fn nullable_references_render_the_annotation_before_the_simple_name() {
    let nullable = ReferenceType::new(java_lang_string()).make_nullable();
    assert_eq!(nullable.render(), "java.lang.@quill.core.Nullable String");
}

#[test]
fn type_formal_declarations_render_their_bounds() {
    let formal = JavaTypeFormal {
        name: "T".to_string(),
        upper_bounds: vec![
            ReferenceType::new(QualifiedName::known(&["quill", "gen", "Animal"])),
            ReferenceType::new(java_lang_string()),
        ],
    };
    assert_eq!(
        formal.render_declaration(),
        "T extends quill.gen.Animal & java.lang.String"
    );
}

#[test]
fn class_literals_use_the_erased_type() {
    let list = JavaType::Reference(
        ReferenceType::with_args(
            java_util_list(),
            vec![JavaTypeArg::Reference(ReferenceType::new(
                java_lang_string(),
            ))],
        )
        .make_nullable(),
    );
    assert_eq!(list.class_literal(), "java.util.List.class");
    assert_eq!(
        JavaType::Primitive(Primitive::Int).class_literal(),
        "java.lang.Integer.class"
    );
    assert_eq!(JavaType::Invalid.class_literal(), "quill.core.Invalid.class");
}

#[test]
fn positions_stamp_once() {
    let reference = ReferenceType::new(java_lang_string());
    let stamped = reference.with_pos(Span::new(1, 2, 1, 8));
    assert_eq!(stamped.pos, Some(Span::new(1, 2, 1, 8)));
    let restamped = stamped.with_pos(Span::new(9, 9, 9, 9));
    assert_eq!(restamped.pos, Some(Span::new(1, 2, 1, 8)));
    assert_eq!(JavaType::Void.with_pos(Span::dummy()), JavaType::Void);
}
