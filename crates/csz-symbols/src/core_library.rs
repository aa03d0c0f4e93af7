//! The minimal core library every compilation references.
//!
//! Installs `System.Object` and friends plus one class per well-known
//! attribute, all as metadata symbols of the `System.Runtime` assembly.

use crate::arena::{CoreTypes, MetadataMethod, MetadataParameter, SymbolArenaBuilder};
use crate::symbol::{Accessibility, AssemblyInfo, DeclarationModifiers, TypeKind};
use crate::types::{TypeId, TypeWithAnnotations, VarianceKind};
use crate::well_known::WellKnownAttributeKind;

pub const CORE_ASSEMBLY_NAME: &str = "System.Runtime";

pub(crate) fn install(builder: &mut SymbolArenaBuilder) -> CoreTypes {
    let assembly = builder.add_assembly(AssemblyInfo::new(CORE_ASSEMBLY_NAME));
    let class = |builder: &mut SymbolArenaBuilder, namespace: &str, name: &str, modifiers: DeclarationModifiers| {
        builder.reserve_metadata_type(assembly, Some(namespace), name, TypeKind::Class, modifiers, &[])
    };

    let object = class(builder, "System", "Object", DeclarationModifiers::empty());
    builder.set_declared_type(object, TypeId::OBJECT);
    let object_type = TypeWithAnnotations::oblivious(TypeId::OBJECT);
    let virtual_ = DeclarationModifiers::VIRTUAL;
    builder.add_metadata_method(
        object,
        MetadataMethod::new("Equals", TypeWithAnnotations::oblivious(TypeId::BOOL))
            .with_modifiers(virtual_)
            .with_parameter(MetadataParameter::new("obj", object_type.clone())),
    );
    builder.add_metadata_method(
        object,
        MetadataMethod::new("GetHashCode", TypeWithAnnotations::oblivious(TypeId::INT))
            .with_modifiers(virtual_),
    );
    builder.add_metadata_method(
        object,
        MetadataMethod::new("ToString", TypeWithAnnotations::oblivious(TypeId::STRING))
            .with_modifiers(virtual_),
    );
    builder.add_metadata_method(
        object,
        MetadataMethod::new("Finalize", TypeWithAnnotations::oblivious(TypeId::VOID))
            .with_modifiers(virtual_)
            .with_accessibility(Accessibility::Protected),
    );

    let value_type = class(builder, "System", "ValueType", DeclarationModifiers::ABSTRACT);
    builder.set_metadata_base(value_type, Some(TypeId::OBJECT), Vec::new());
    let value_type_type = builder.declared_type(value_type);
    let enum_ = class(builder, "System", "Enum", DeclarationModifiers::ABSTRACT);
    builder.set_metadata_base(enum_, Some(value_type_type), Vec::new());
    let attribute = class(builder, "System", "Attribute", DeclarationModifiers::ABSTRACT);
    builder.set_metadata_base(attribute, Some(TypeId::OBJECT), Vec::new());
    let attribute_type = builder.declared_type(attribute);

    let disposable = builder.reserve_metadata_type(
        assembly,
        Some("System"),
        "IDisposable",
        TypeKind::Interface,
        DeclarationModifiers::ABSTRACT,
        &[],
    );
    builder.add_metadata_method(
        disposable,
        MetadataMethod::new("Dispose", TypeWithAnnotations::oblivious(TypeId::VOID))
            .with_modifiers(DeclarationModifiers::ABSTRACT),
    );
    let equatable = builder.reserve_metadata_type(
        assembly,
        Some("System"),
        "IEquatable",
        TypeKind::Interface,
        DeclarationModifiers::ABSTRACT,
        &[("T", VarianceKind::None)],
    );
    let t = builder.type_parameter_type(equatable, 0);
    builder.add_metadata_method(
        equatable,
        MetadataMethod::new("Equals", TypeWithAnnotations::oblivious(TypeId::BOOL))
            .with_modifiers(DeclarationModifiers::ABSTRACT)
            .with_parameter(MetadataParameter::new("other", TypeWithAnnotations::oblivious(t))),
    );
    builder.reserve_metadata_type(
        assembly,
        Some("System.Collections.Generic"),
        "IEnumerable",
        TypeKind::Interface,
        DeclarationModifiers::ABSTRACT,
        &[("T", VarianceKind::Out)],
    );

    for &kind in WellKnownAttributeKind::ALL {
        let attribute_class = class(
            builder,
            kind.namespace(),
            kind.metadata_name(),
            DeclarationModifiers::SEALED,
        );
        builder.set_metadata_base(attribute_class, Some(attribute_type), Vec::new());
        builder.register_attribute_class(kind, attribute_class);
    }

    CoreTypes {
        object,
        value_type,
        enum_,
        attribute,
    }
}
