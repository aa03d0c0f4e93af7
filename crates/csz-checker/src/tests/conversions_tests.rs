use super::*;
use crate::test_fixtures::Fixture;
use csz_symbols::syntax::{TypeDeclarationSyntax, TypeParameterSyntax};
use csz_symbols::syntax_factory::{generic, named};
use csz_symbols::{SymbolId, VarianceKind};

struct Hierarchy {
    compilation: Compilation,
    animal: SymbolId,
    dog: SymbolId,
    producer: SymbolId,
    consumer: SymbolId,
    pet: SymbolId,
    point: SymbolId,
}

fn hierarchy() -> Hierarchy {
    let mut fixture = Fixture::new();
    let pet = fixture.declare(TypeDeclarationSyntax::interface("IPet"));
    let animal = fixture.declare(TypeDeclarationSyntax::class("Animal"));
    let dog = fixture.declare(
        TypeDeclarationSyntax::class("Dog")
            .with_base(named("Animal"))
            .with_base(named("IPet")),
    );
    let producer = fixture.declare(
        TypeDeclarationSyntax::interface("IProducer")
            .with_type_parameter(TypeParameterSyntax::new("T").with_variance(VarianceKind::Out)),
    );
    let consumer = fixture.declare(
        TypeDeclarationSyntax::interface("IConsumer")
            .with_type_parameter(TypeParameterSyntax::new("T").with_variance(VarianceKind::In)),
    );
    let point = fixture.declare(TypeDeclarationSyntax::struct_("Point").with_base(named("IPet")));
    fixture.declare(
        TypeDeclarationSyntax::class("DogSource").with_base(generic("IProducer", vec![named("Dog")])),
    );
    Hierarchy {
        compilation: fixture.compile(),
        animal,
        dog,
        producer,
        consumer,
        pet,
        point,
    }
}

fn construct(compilation: &Compilation, definition: SymbolId, argument: SymbolId) -> TypeId {
    let arena = compilation.arena();
    arena.interner().named(
        definition,
        vec![TypeWithAnnotations::not_annotated(arena.declared_type(argument))],
    )
}

#[test]
fn test_numeric_conversions() {
    assert!(implicit_numeric_conversion_exists(IntrinsicKind::Int, IntrinsicKind::Long));
    assert!(implicit_numeric_conversion_exists(IntrinsicKind::Char, IntrinsicKind::UShort));
    assert!(implicit_numeric_conversion_exists(IntrinsicKind::Float, IntrinsicKind::Double));
    assert!(!implicit_numeric_conversion_exists(IntrinsicKind::Long, IntrinsicKind::Int));
    assert!(!implicit_numeric_conversion_exists(IntrinsicKind::Int, IntrinsicKind::Int));
    assert!(!implicit_numeric_conversion_exists(IntrinsicKind::Double, IntrinsicKind::Decimal));
}

#[test]
fn test_class_and_interface_reference_conversions() {
    let h = hierarchy();
    let c = &h.compilation;
    let arena = c.arena();
    let (animal, dog, pet) = (
        arena.declared_type(h.animal),
        arena.declared_type(h.dog),
        arena.declared_type(h.pet),
    );

    assert!(c.is_derived_from(dog, animal));
    assert!(!c.is_derived_from(animal, dog));
    assert!(!c.is_derived_from(dog, dog));
    assert!(c.has_implicit_reference_conversion(dog, animal));
    assert!(c.has_implicit_reference_conversion(dog, pet));
    assert!(c.has_implicit_reference_conversion(pet, TypeId::OBJECT));
    assert!(!c.has_implicit_reference_conversion(animal, pet));
    assert!(!c.has_implicit_reference_conversion(dog, dog));
    assert!(c.has_identity_or_implicit_reference_conversion(dog, dog));
    assert!(c.implements_interface(dog, pet));
}

#[test]
fn test_variance_conversions() {
    let h = hierarchy();
    let c = &h.compilation;
    let produces_dog = construct(c, h.producer, h.dog);
    let produces_animal = construct(c, h.producer, h.animal);
    let consumes_dog = construct(c, h.consumer, h.dog);
    let consumes_animal = construct(c, h.consumer, h.animal);

    assert!(c.has_implicit_reference_conversion(produces_dog, produces_animal));
    assert!(!c.has_implicit_reference_conversion(produces_animal, produces_dog));
    assert!(c.has_implicit_reference_conversion(consumes_animal, consumes_dog));
    assert!(!c.has_implicit_reference_conversion(consumes_dog, consumes_animal));

    let arena = c.arena();
    let atom = arena.atom("DogSource").expect("declared");
    let dog_source = arena.declared_type(arena.types_named(atom)[0]);
    assert!(c.has_implicit_reference_conversion(dog_source, produces_animal));
}

#[test]
fn test_boxing_and_nullable_conversions() {
    let h = hierarchy();
    let c = &h.compilation;
    let arena = c.arena();
    let point = arena.declared_type(h.point);
    let pet = arena.declared_type(h.pet);
    let nullable_int = arena.interner().nullable_value_type(TypeId::INT);
    let nullable_long = arena.interner().nullable_value_type(TypeId::LONG);

    assert!(!c.is_reference_type(point));
    assert!(!c.has_implicit_reference_conversion(point, pet));
    assert!(c.has_implicit_conversion(point, pet));
    assert!(c.has_implicit_conversion(point, TypeId::OBJECT));
    assert!(c.has_implicit_conversion(TypeId::INT, nullable_int));
    assert!(c.has_implicit_conversion(nullable_int, nullable_long));
    assert!(!c.has_implicit_conversion(nullable_int, TypeId::INT));
    assert!(c.has_implicit_conversion(TypeId::INT, TypeId::LONG));
    assert!(!c.has_implicit_conversion(TypeId::STRING, TypeId::INT));
    assert!(c.has_implicit_conversion(TypeId::STRING, TypeId::DYNAMIC));
}
