use super::*;
use crate::types::CustomModifier;
use std::sync::Arc;

#[test]
fn test_intrinsics_have_fixed_ids() {
    let interner = TypeInterner::new();
    for kind in IntrinsicKind::ALL {
        assert_eq!(interner.intrinsic_kind(kind.type_id()), Some(kind));
    }
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize);
}

#[test]
fn test_structurally_equal_types_share_an_id() {
    let interner = TypeInterner::new();
    let a = interner.array(TypeWithAnnotations::not_annotated(TypeId::STRING), 1);
    let b = interner.array(TypeWithAnnotations::not_annotated(TypeId::STRING), 1);
    let c = interner.array(TypeWithAnnotations::annotated(TypeId::STRING), 1);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_unknown_id_reads_as_error() {
    let interner = TypeInterner::new();
    assert_eq!(
        *interner.lookup(TypeId(9_999)),
        TypeData::Intrinsic(IntrinsicKind::Error)
    );
}

#[test]
fn test_tuple_without_names_is_unnamed_tuple() {
    let interner = TypeInterner::new();
    let elements = vec![
        TypeWithAnnotations::oblivious(TypeId::INT),
        TypeWithAnnotations::oblivious(TypeId::STRING),
    ];
    let unnamed = interner.tuple(elements.clone(), None);
    let empty_names = interner.tuple(elements, Some(vec![None, None]));
    assert_eq!(unnamed, empty_names);
}

#[test]
fn test_erase_tuple_names_is_deep() {
    let interner = TypeInterner::new();
    let a = interner.intern_string("a");
    let named = interner.tuple(
        vec![
            TypeWithAnnotations::oblivious(TypeId::INT),
            TypeWithAnnotations::oblivious(TypeId::INT),
        ],
        Some(vec![Some(a), None]),
    );
    let array = interner.array(TypeWithAnnotations::oblivious(named), 1);
    let erased = interner.erase_tuple_names(array);
    let expected = interner.array(
        TypeWithAnnotations::oblivious(interner.tuple(
            vec![
                TypeWithAnnotations::oblivious(TypeId::INT),
                TypeWithAnnotations::oblivious(TypeId::INT),
            ],
            None,
        )),
        1,
    );
    assert_eq!(erased, expected);
}

#[test]
fn test_erase_annotations_drops_modifiers_and_nullability() {
    let interner = TypeInterner::new();
    let annotated = interner.array(
        TypeWithAnnotations::annotated(TypeId::STRING)
            .with_modifiers(vec![CustomModifier::optional(TypeId::INT)]),
        1,
    );
    let plain = interner.array(TypeWithAnnotations::oblivious(TypeId::STRING), 1);
    assert_eq!(interner.erase_annotations(annotated), plain);
}

#[test]
fn test_contains_error_looks_inside() {
    let interner = TypeInterner::new();
    let nested = interner.array(TypeWithAnnotations::error(), 2);
    assert!(interner.contains_error(nested));
    assert!(!interner.contains_error(TypeId::INT));
}

#[test]
fn test_strip_nullable_value_type() {
    let interner = TypeInterner::new();
    let nullable_int = interner.nullable_value_type(TypeId::INT);
    assert!(interner.is_nullable_value_type(nullable_int));
    assert_eq!(interner.strip_nullable(nullable_int), TypeId::INT);
    assert_eq!(interner.strip_nullable(TypeId::STRING), TypeId::STRING);
}

#[test]
fn test_concurrent_interning_yields_one_id() {
    let interner = Arc::new(TypeInterner::new());
    let ids: Vec<TypeId> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let interner = Arc::clone(&interner);
                scope.spawn(move || {
                    interner.array(TypeWithAnnotations::oblivious(TypeId::LONG), 3)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect()
    });
    assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize + 1);
}

#[test]
fn test_parallel_interning_of_distinct_shapes() {
    use rayon::prelude::*;

    let interner = TypeInterner::new();
    let ranks: Vec<(u8, TypeId)> = (1u8..=16)
        .into_par_iter()
        .flat_map_iter(|rank| (0..4).map(move |_| rank))
        .map(|rank| (rank, interner.array(TypeWithAnnotations::oblivious(TypeId::INT), rank)))
        .collect();
    for (rank, id) in &ranks {
        let expected = interner.array(TypeWithAnnotations::oblivious(TypeId::INT), *rank);
        assert_eq!(*id, expected);
    }
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize + 16);
}
