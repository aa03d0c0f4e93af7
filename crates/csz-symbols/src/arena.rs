//! Symbol arena.
//!
//! Symbols are created once by a single-threaded [`SymbolArenaBuilder`] and
//! then frozen into an immutable [`SymbolArena`] shared by every checking
//! thread. Source declarations get their cheap facts filled in here; their
//! types, attributes and relationships are computed later as facets.

use crate::core_library;
use crate::intern::TypeInterner;
use crate::symbol::{
    Accessibility, AssemblyId, AssemblyInfo, DeclarationModifiers, MetadataMethodInfo,
    MetadataParameterInfo, MetadataPropertyInfo, MetadataTypeInfo, MethodKind, MethodSource,
    MethodSymbol, ObsoleteData, ParameterSource, ParameterSymbol, PropertySource, PropertySymbol,
    Symbol, SymbolData, SymbolId, SymbolOrigin, TypeKind, TypeParameterSymbol, TypeSource,
    TypeSymbol,
};
use crate::syntax::{
    MemberDeclarationSyntax, MethodDeclarationSyntax, MethodSyntaxKind, OperatorKind,
    ParameterSyntax, PropertyDeclarationSyntax, TypeDeclarationSyntax, TypeParameterSyntax,
};
use crate::types::{RefKind, ScopedKind, TypeId, TypeWithAnnotations, VarianceKind};
use crate::well_known::WellKnownAttributeKind;
use csz_common::{Atom, SourceLocation};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;
use tracing::debug;

/// Name under which every indexer of a type is registered.
pub const INDEXER_NAME: &str = "this[]";

type MemberMap = IndexMap<Atom, SmallVec<[SymbolId; 2]>, FxBuildHasher>;

/// Symbols the checker needs by identity.
#[derive(Clone, Copy, Debug)]
pub struct CoreTypes {
    pub object: SymbolId,
    pub value_type: SymbolId,
    pub enum_: SymbolId,
    pub attribute: SymbolId,
}

// =============================================================================
// Arena
// =============================================================================

pub struct SymbolArena {
    interner: Arc<TypeInterner>,
    symbols: Vec<Symbol>,
    members_by_name: FxHashMap<SymbolId, MemberMap>,
    types_by_name: FxHashMap<Atom, SmallVec<[SymbolId; 2]>>,
    types_by_full_name: FxHashMap<(Arc<str>, usize), SymbolId>,
    source_types: Vec<SymbolId>,
    assemblies: Vec<AssemblyInfo>,
    core: CoreTypes,
    attribute_classes: FxHashMap<WellKnownAttributeKind, SymbolId>,
}

impl SymbolArena {
    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn shared_interner(&self) -> Arc<TypeInterner> {
        Arc::clone(&self.interner)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.symbols.len() as u32).map(SymbolId)
    }

    pub fn name(&self, id: SymbolId) -> Arc<str> {
        self.interner.resolve_atom(self.symbol(id).name)
    }

    pub fn atom(&self, name: &str) -> Option<Atom> {
        self.interner.lookup_string(name)
    }

    // -------------------------------------------------------------------------
    // Typed views. Asking for the wrong kind is a caller bug.
    // -------------------------------------------------------------------------

    pub fn type_symbol(&self, id: SymbolId) -> &TypeSymbol {
        match &self.symbol(id).data {
            SymbolData::Type(ty) => ty,
            other => panic!("symbol {id:?} is not a type: {other:?}"),
        }
    }

    pub fn method(&self, id: SymbolId) -> &MethodSymbol {
        match &self.symbol(id).data {
            SymbolData::Method(method) => method,
            other => panic!("symbol {id:?} is not a method: {other:?}"),
        }
    }

    pub fn property(&self, id: SymbolId) -> &PropertySymbol {
        match &self.symbol(id).data {
            SymbolData::Property(property) => property,
            other => panic!("symbol {id:?} is not a property: {other:?}"),
        }
    }

    pub fn parameter(&self, id: SymbolId) -> &ParameterSymbol {
        match &self.symbol(id).data {
            SymbolData::Parameter(parameter) => parameter,
            other => panic!("symbol {id:?} is not a parameter: {other:?}"),
        }
    }

    pub fn type_parameter(&self, id: SymbolId) -> &TypeParameterSymbol {
        match &self.symbol(id).data {
            SymbolData::TypeParameter(type_parameter) => type_parameter,
            other => panic!("symbol {id:?} is not a type parameter: {other:?}"),
        }
    }

    /// Parameters of a method or property.
    pub fn parameters_of(&self, member: SymbolId) -> &[SymbolId] {
        match &self.symbol(member).data {
            SymbolData::Method(method) => &method.parameters,
            SymbolData::Property(property) => &property.parameters,
            _ => &[],
        }
    }

    /// Type parameters of a type or method.
    pub fn type_parameters_of(&self, owner: SymbolId) -> &[SymbolId] {
        match &self.symbol(owner).data {
            SymbolData::Type(ty) => &ty.type_parameters,
            SymbolData::Method(method) => &method.type_parameters,
            _ => &[],
        }
    }

    /// Nearest enclosing type of `id`, or `id` itself when it is a type.
    pub fn containing_type(&self, id: SymbolId) -> Option<SymbolId> {
        let mut current = self.symbol(id).containing;
        while let Some(candidate) = current {
            if self.symbol(candidate).as_type().is_some() {
                return Some(candidate);
            }
            current = self.symbol(candidate).containing;
        }
        None
    }

    /// Method or property that declares a parameter.
    pub fn containing_member(&self, parameter: SymbolId) -> Option<SymbolId> {
        self.symbol(parameter).containing
    }

    // -------------------------------------------------------------------------
    // Members and types
    // -------------------------------------------------------------------------

    pub fn members(&self, ty: SymbolId) -> &[SymbolId] {
        &self.type_symbol(ty).members
    }

    pub fn members_named(&self, ty: SymbolId, name: Atom) -> &[SymbolId] {
        self.members_by_name
            .get(&ty)
            .and_then(|members| members.get(&name))
            .map_or(&[], |members| members.as_slice())
    }

    /// Member names of `ty` in declaration order.
    pub fn member_names(&self, ty: SymbolId) -> impl Iterator<Item = Atom> + '_ {
        self.members_by_name
            .get(&ty)
            .into_iter()
            .flat_map(|members| members.keys().copied())
    }

    pub fn types_named(&self, name: Atom) -> &[SymbolId] {
        self.types_by_name
            .get(&name)
            .map_or(&[], |types| types.as_slice())
    }

    pub fn lookup_type(&self, full_name: &str, arity: usize) -> Option<SymbolId> {
        self.types_by_full_name
            .get(&(Arc::from(full_name), arity))
            .copied()
    }

    /// Source types in declaration order.
    pub fn source_types(&self) -> &[SymbolId] {
        &self.source_types
    }

    pub fn core(&self) -> CoreTypes {
        self.core
    }

    pub fn object_symbol(&self) -> SymbolId {
        self.core.object
    }

    pub fn attribute_class(&self, kind: WellKnownAttributeKind) -> Option<SymbolId> {
        self.attribute_classes.get(&kind).copied()
    }

    /// Type used as the required modifier on `in` parameters of virtual
    /// signatures.
    pub fn in_attribute_type(&self) -> TypeId {
        self.attribute_class(WellKnownAttributeKind::In)
            .map_or(TypeId::ERROR, |class| self.type_symbol(class).declared_type)
    }

    pub fn classify_attribute_class(&self, class: SymbolId) -> Option<WellKnownAttributeKind> {
        let ty = self.symbol(class).as_type()?;
        let namespace = ty.namespace.as_deref().unwrap_or("");
        WellKnownAttributeKind::classify(namespace, &self.name(class))
    }

    /// Symbol behind a class, struct or interface type.
    pub fn type_symbol_of(&self, ty: TypeId) -> Option<SymbolId> {
        if ty == TypeId::OBJECT {
            return Some(self.core.object);
        }
        self.interner.named_symbol(ty)
    }

    pub fn declared_type(&self, ty: SymbolId) -> TypeId {
        self.type_symbol(ty).declared_type
    }

    pub fn type_kind_of(&self, ty: TypeId) -> Option<TypeKind> {
        self.type_symbol_of(ty).map(|symbol| self.type_symbol(symbol).kind)
    }

    pub fn is_interface_type(&self, ty: TypeId) -> bool {
        self.type_kind_of(ty) == Some(TypeKind::Interface)
    }

    pub fn full_name(&self, ty: SymbolId) -> String {
        let name = self.name(ty);
        match &self.type_symbol(ty).namespace {
            Some(namespace) => format!("{namespace}.{name}"),
            None => name.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Assemblies
    // -------------------------------------------------------------------------

    pub fn assembly(&self, id: AssemblyId) -> &AssemblyInfo {
        &self.assemblies[id.0 as usize]
    }

    pub fn assembly_of(&self, symbol: SymbolId) -> AssemblyId {
        self.symbol(symbol).origin.assembly()
    }

    /// Whether code in `from` can see internal members of `to`.
    pub fn has_internal_access(&self, from: AssemblyId, to: AssemblyId) -> bool {
        if from == to {
            return true;
        }
        let from_name = &self.assembly(from).name;
        self.assembly(to)
            .internals_visible_to
            .iter()
            .any(|friend| friend == from_name)
    }
}

impl std::fmt::Debug for SymbolArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolArena")
            .field("symbols", &self.symbols.len())
            .field("source_types", &self.source_types.len())
            .field("assemblies", &self.assemblies.len())
            .finish()
    }
}

// =============================================================================
// Metadata member descriptions
// =============================================================================

#[derive(Clone, Debug)]
pub struct MetadataParameter {
    pub name: Arc<str>,
    pub ref_kind: RefKind,
    pub scoped: ScopedKind,
    pub is_params: bool,
    pub info: MetadataParameterInfo,
}

impl MetadataParameter {
    pub fn new(name: &str, ty: TypeWithAnnotations) -> Self {
        MetadataParameter {
            name: Arc::from(name),
            ref_kind: RefKind::None,
            scoped: ScopedKind::None,
            is_params: false,
            info: MetadataParameterInfo {
                ty,
                default_value: None,
            },
        }
    }

    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub fn with_scoped(mut self, scoped: ScopedKind) -> Self {
        self.scoped = scoped;
        self
    }
}

#[derive(Clone, Debug)]
pub struct MetadataMethod {
    pub name: Arc<str>,
    pub kind: MethodKind,
    pub operator: Option<OperatorKind>,
    pub accessibility: Accessibility,
    pub modifiers: DeclarationModifiers,
    pub parameters: Vec<MetadataParameter>,
    pub info: MetadataMethodInfo,
}

impl MetadataMethod {
    pub fn new(name: &str, return_type: TypeWithAnnotations) -> Self {
        MetadataMethod {
            name: Arc::from(name),
            kind: MethodKind::Ordinary,
            operator: None,
            accessibility: Accessibility::Public,
            modifiers: DeclarationModifiers::empty(),
            parameters: Vec::new(),
            info: MetadataMethodInfo {
                return_type,
                ..MetadataMethodInfo::default()
            },
        }
    }

    pub fn with_modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_parameter(mut self, parameter: MetadataParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_info(mut self, update: impl FnOnce(&mut MetadataMethodInfo)) -> Self {
        update(&mut self.info);
        self
    }
}

#[derive(Clone, Debug)]
pub struct MetadataProperty {
    pub name: Arc<str>,
    pub is_indexer: bool,
    pub accessibility: Accessibility,
    pub modifiers: DeclarationModifiers,
    pub parameters: Vec<MetadataParameter>,
    pub has_getter: bool,
    pub has_setter: bool,
    pub info: MetadataPropertyInfo,
}

impl MetadataProperty {
    pub fn new(name: &str, ty: TypeWithAnnotations) -> Self {
        MetadataProperty {
            name: Arc::from(name),
            is_indexer: false,
            accessibility: Accessibility::Public,
            modifiers: DeclarationModifiers::empty(),
            parameters: Vec::new(),
            has_getter: true,
            has_setter: true,
            info: MetadataPropertyInfo {
                ty,
                ..MetadataPropertyInfo::default()
            },
        }
    }

    pub fn with_modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_accessors(mut self, has_getter: bool, has_setter: bool) -> Self {
        self.has_getter = has_getter;
        self.has_setter = has_setter;
        self
    }
}

// =============================================================================
// Builder
// =============================================================================

pub struct SymbolArenaBuilder {
    interner: Arc<TypeInterner>,
    symbols: Vec<Symbol>,
    members_by_name: FxHashMap<SymbolId, MemberMap>,
    types_by_name: FxHashMap<Atom, SmallVec<[SymbolId; 2]>>,
    types_by_full_name: FxHashMap<(Arc<str>, usize), SymbolId>,
    source_types: Vec<SymbolId>,
    assemblies: Vec<AssemblyInfo>,
    core: Option<CoreTypes>,
    attribute_classes: FxHashMap<WellKnownAttributeKind, SymbolId>,
}

impl SymbolArenaBuilder {
    /// A builder with the core library (System.Object and the well-known
    /// attribute classes) already installed.
    pub fn new() -> Self {
        let mut builder = SymbolArenaBuilder {
            interner: Arc::new(TypeInterner::new()),
            symbols: Vec::with_capacity(1024),
            members_by_name: FxHashMap::default(),
            types_by_name: FxHashMap::default(),
            types_by_full_name: FxHashMap::default(),
            source_types: Vec::new(),
            assemblies: vec![AssemblyInfo::new("<source>")],
            core: None,
            attribute_classes: FxHashMap::default(),
        };
        let core = core_library::install(&mut builder);
        builder.core = Some(core);
        builder
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn set_source_assembly(&mut self, info: AssemblyInfo) {
        self.assemblies[AssemblyId::SOURCE.0 as usize] = info;
    }

    pub fn add_assembly(&mut self, info: AssemblyInfo) -> AssemblyId {
        let id = AssemblyId(self.assemblies.len() as u32);
        self.assemblies.push(info);
        id
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn declared_type(&self, ty: SymbolId) -> TypeId {
        match &self.symbol(ty).data {
            SymbolData::Type(symbol) => symbol.declared_type,
            _ => TypeId::ERROR,
        }
    }

    /// Type of the `ordinal`-th type parameter of a type or method.
    pub fn type_parameter_type(&self, owner: SymbolId, ordinal: usize) -> TypeId {
        let parameters = match &self.symbol(owner).data {
            SymbolData::Type(ty) => &ty.type_parameters,
            SymbolData::Method(method) => &method.type_parameters,
            _ => return TypeId::ERROR,
        };
        parameters
            .get(ordinal)
            .map_or(TypeId::ERROR, |parameter| self.interner.type_parameter(*parameter))
    }

    /// Construct `definition<args>`.
    pub fn construct(&self, definition: SymbolId, args: Vec<TypeWithAnnotations>) -> TypeId {
        self.interner.named(definition, args)
    }

    pub(crate) fn register_attribute_class(&mut self, kind: WellKnownAttributeKind, class: SymbolId) {
        self.attribute_classes.insert(kind, class);
    }

    fn push(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    fn type_symbol_mut(&mut self, id: SymbolId) -> &mut TypeSymbol {
        match &mut self.symbols[id.index()].data {
            SymbolData::Type(ty) => ty,
            other => panic!("symbol {id:?} is not a type: {other:?}"),
        }
    }

    fn add_member(&mut self, owner: SymbolId, member: SymbolId) {
        let name = self.symbols[member.index()].name;
        self.type_symbol_mut(owner).members.push(member);
        self.members_by_name
            .entry(owner)
            .or_default()
            .entry(name)
            .or_default()
            .push(member);
    }

    fn register_type(&mut self, id: SymbolId, namespace: Option<&str>, name: &str, arity: usize) {
        let atom = self.interner.intern_string(name);
        self.types_by_name.entry(atom).or_default().push(id);
        let full_name: Arc<str> = match namespace {
            Some(namespace) => Arc::from(format!("{namespace}.{name}")),
            None => Arc::from(name),
        };
        self.types_by_full_name.insert((full_name, arity), id);
    }

    fn declare_type_parameters(
        &mut self,
        owner: SymbolId,
        origin: SymbolOrigin,
        is_method: bool,
        parameters: impl IntoIterator<Item = (Arc<str>, VarianceKind, SourceLocation)>,
    ) -> Vec<SymbolId> {
        let mut ids = Vec::new();
        for (ordinal, (name, variance, location)) in parameters.into_iter().enumerate() {
            let id = self.push(Symbol {
                name: self.interner.intern_string(&name),
                containing: Some(owner),
                locations: smallvec![location],
                origin,
                accessibility: Accessibility::NotApplicable,
                modifiers: DeclarationModifiers::empty(),
                data: SymbolData::TypeParameter(TypeParameterSymbol {
                    ordinal: ordinal as u32,
                    variance,
                    owner,
                    is_method_type_parameter: is_method,
                }),
            });
            ids.push(id);
        }
        ids
    }

    fn declared_type_for(&self, ty: SymbolId, type_parameters: &[SymbolId]) -> TypeId {
        let args = type_parameters
            .iter()
            .map(|parameter| TypeWithAnnotations::oblivious(self.interner.type_parameter(*parameter)))
            .collect();
        self.interner.named(ty, args)
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    /// Create a metadata type. Its base and interfaces are set afterwards
    /// with [`Self::set_metadata_base`] so types can refer to each other.
    pub fn reserve_metadata_type(
        &mut self,
        assembly: AssemblyId,
        namespace: Option<&str>,
        name: &str,
        kind: TypeKind,
        modifiers: DeclarationModifiers,
        type_parameters: &[(&str, VarianceKind)],
    ) -> SymbolId {
        let origin = SymbolOrigin::Metadata(assembly);
        let id = self.push(Symbol {
            name: self.interner.intern_string(name),
            containing: None,
            locations: SmallVec::new(),
            origin,
            accessibility: Accessibility::Public,
            modifiers,
            data: SymbolData::Type(TypeSymbol {
                kind,
                namespace: namespace.map(Arc::from),
                type_parameters: Vec::new(),
                declared_type: TypeId::ERROR,
                members: Vec::new(),
                source: TypeSource::Metadata(MetadataTypeInfo::default()),
            }),
        });
        let parameters = self.declare_type_parameters(
            id,
            origin,
            false,
            type_parameters
                .iter()
                .map(|(name, variance)| (Arc::from(*name), *variance, SourceLocation::none())),
        );
        let declared = self.declared_type_for(id, &parameters);
        let ty = self.type_symbol_mut(id);
        ty.type_parameters = parameters;
        ty.declared_type = declared;
        self.register_type(id, namespace, name, type_parameters.len());
        id
    }

    pub fn set_metadata_base(&mut self, ty: SymbolId, base: Option<TypeId>, interfaces: Vec<TypeId>) {
        if let TypeSource::Metadata(info) = &mut self.type_symbol_mut(ty).source {
            info.base = base;
            info.interfaces = interfaces;
        }
    }

    pub fn set_metadata_obsolete(&mut self, ty: SymbolId, obsolete: ObsoleteData) {
        if let TypeSource::Metadata(info) = &mut self.type_symbol_mut(ty).source {
            info.obsolete = Some(obsolete);
        }
    }

    pub(crate) fn set_declared_type(&mut self, ty: SymbolId, declared: TypeId) {
        self.type_symbol_mut(ty).declared_type = declared;
    }

    fn push_metadata_parameters(
        &mut self,
        owner: SymbolId,
        origin: SymbolOrigin,
        parameters: Vec<MetadataParameter>,
    ) -> Vec<SymbolId> {
        parameters
            .into_iter()
            .enumerate()
            .map(|(ordinal, parameter)| {
                self.push(Symbol {
                    name: self.interner.intern_string(&parameter.name),
                    containing: Some(owner),
                    locations: SmallVec::new(),
                    origin,
                    accessibility: Accessibility::NotApplicable,
                    modifiers: DeclarationModifiers::empty(),
                    data: SymbolData::Parameter(ParameterSymbol {
                        ordinal: ordinal as u32,
                        ref_kind: parameter.ref_kind,
                        scoped: parameter.scoped,
                        is_params: parameter.is_params,
                        source: ParameterSource::Metadata(parameter.info),
                    }),
                })
            })
            .collect()
    }

    pub fn add_metadata_method(&mut self, owner: SymbolId, mut method: MetadataMethod) -> SymbolId {
        let origin = self.symbol(owner).origin;
        if method.modifiers.intersects(
            DeclarationModifiers::VIRTUAL | DeclarationModifiers::ABSTRACT | DeclarationModifiers::OVERRIDE,
        ) {
            method.info.is_metadata_virtual = true;
        }
        if method.modifiers.contains(DeclarationModifiers::SEALED) {
            method.info.is_metadata_final = true;
        }
        let id = self.push(Symbol {
            name: self.interner.intern_string(&method.name),
            containing: Some(owner),
            locations: SmallVec::new(),
            origin,
            accessibility: method.accessibility,
            modifiers: method.modifiers,
            data: SymbolData::Method(MethodSymbol {
                kind: method.kind,
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                associated_property: None,
                operator: method.operator,
                source: MethodSource::Metadata(method.info),
            }),
        });
        let parameters = self.push_metadata_parameters(id, origin, method.parameters);
        if let SymbolData::Method(symbol) = &mut self.symbols[id.index()].data {
            symbol.parameters = parameters;
        }
        self.add_member(owner, id);
        id
    }

    pub fn add_metadata_property(&mut self, owner: SymbolId, property: MetadataProperty) -> SymbolId {
        let origin = self.symbol(owner).origin;
        let name = if property.is_indexer {
            Arc::from(INDEXER_NAME)
        } else {
            Arc::clone(&property.name)
        };
        let id = self.push(Symbol {
            name: self.interner.intern_string(&name),
            containing: Some(owner),
            locations: SmallVec::new(),
            origin,
            accessibility: property.accessibility,
            modifiers: property.modifiers,
            data: SymbolData::Property(PropertySymbol {
                is_indexer: property.is_indexer,
                parameters: Vec::new(),
                getter: None,
                setter: None,
                source: PropertySource::Metadata(property.info.clone()),
            }),
        });
        let parameters = self.push_metadata_parameters(id, origin, property.parameters.clone());
        let accessor_base = if property.is_indexer { "Item" } else { &*property.name };

        let accessor = |kind: MethodKind, return_type: TypeWithAnnotations| {
            let prefix = if kind == MethodKind::PropertyGet { "get_" } else { "set_" };
            let mut method = MetadataMethod::new(&format!("{prefix}{accessor_base}"), return_type)
                .with_modifiers(property.modifiers)
                .with_accessibility(property.accessibility);
            method.kind = kind;
            method.info.ref_kind = if kind == MethodKind::PropertyGet {
                property.info.ref_kind
            } else {
                RefKind::None
            };
            method.info.must_call_directly = property.info.must_call_directly;
            method.parameters = property.parameters.clone();
            method
        };

        let getter = property.has_getter.then(|| {
            let method = accessor(MethodKind::PropertyGet, property.info.ty.clone());
            self.add_metadata_method(owner, method)
        });
        let setter = property.has_setter.then(|| {
            let method = accessor(MethodKind::PropertySet, TypeWithAnnotations::oblivious(TypeId::VOID))
                .with_parameter(MetadataParameter::new("value", property.info.ty.clone()));
            self.add_metadata_method(owner, method)
        });
        for accessor in getter.iter().chain(setter.iter()) {
            if let SymbolData::Method(method) = &mut self.symbols[accessor.index()].data {
                method.associated_property = Some(id);
            }
        }
        if let SymbolData::Property(symbol) = &mut self.symbols[id.index()].data {
            symbol.parameters = parameters;
            symbol.getter = getter;
            symbol.setter = setter;
        }
        self.add_member(owner, id);
        id
    }

    // -------------------------------------------------------------------------
    // Source
    // -------------------------------------------------------------------------

    /// Declare a source type from its partial parts. Type parameters come
    /// from the first part; members come from every part in order.
    pub fn declare_source_type(&mut self, parts: Vec<Arc<TypeDeclarationSyntax>>) -> SymbolId {
        assert!(!parts.is_empty(), "a source type needs at least one declaration");
        let first = Arc::clone(&parts[0]);
        let modifiers = parts
            .iter()
            .fold(DeclarationModifiers::empty(), |acc, part| acc | part.modifiers);
        let accessibility = parts
            .iter()
            .find_map(|part| part.accessibility)
            .unwrap_or(Accessibility::Internal);

        let id = self.push(Symbol {
            name: self.interner.intern_string(&first.name),
            containing: None,
            locations: parts.iter().map(|part| part.location.clone()).collect(),
            origin: SymbolOrigin::Source,
            accessibility,
            modifiers,
            data: SymbolData::Type(TypeSymbol {
                kind: first.kind,
                namespace: first.namespace.clone(),
                type_parameters: Vec::new(),
                declared_type: TypeId::ERROR,
                members: Vec::new(),
                source: TypeSource::Syntax(parts.clone()),
            }),
        });
        let type_parameters = self.declare_source_type_parameters(id, false, &first.type_parameters);
        let declared = self.declared_type_for(id, &type_parameters);
        {
            let ty = self.type_symbol_mut(id);
            ty.type_parameters = type_parameters;
            ty.declared_type = declared;
        }
        self.register_type(
            id,
            first.namespace.as_deref(),
            &first.name,
            first.type_parameters.len(),
        );

        for part in &parts {
            for member in &part.members {
                match member {
                    MemberDeclarationSyntax::Method(method) => {
                        self.declare_source_method(id, first.kind, Arc::clone(method));
                    }
                    MemberDeclarationSyntax::Property(property) => {
                        self.declare_source_property(id, first.kind, Arc::clone(property));
                    }
                }
            }
        }
        self.source_types.push(id);
        debug!(
            type_name = %first.name,
            parts = parts.len(),
            members = self.type_symbol_mut(id).members.len(),
            "declare_source_type"
        );
        id
    }

    fn declare_source_type_parameters(
        &mut self,
        owner: SymbolId,
        is_method: bool,
        syntax: &[TypeParameterSyntax],
    ) -> Vec<SymbolId> {
        self.declare_type_parameters(
            owner,
            SymbolOrigin::Source,
            is_method,
            syntax.iter().map(|parameter| {
                (
                    Arc::clone(&parameter.name),
                    parameter.variance,
                    parameter.location.clone(),
                )
            }),
        )
    }

    /// Interface members are implicitly abstract without a body and
    /// implicitly virtual with one.
    fn member_modifiers(
        container: TypeKind,
        written: DeclarationModifiers,
        accessibility: Option<Accessibility>,
        has_body: bool,
        is_explicit_implementation: bool,
    ) -> DeclarationModifiers {
        if container != TypeKind::Interface || is_explicit_implementation {
            return written;
        }
        let mut modifiers = written;
        if written.contains(DeclarationModifiers::STATIC) {
            return modifiers;
        }
        if !has_body {
            modifiers |= DeclarationModifiers::ABSTRACT;
        } else if !written.intersects(DeclarationModifiers::SEALED)
            && accessibility != Some(Accessibility::Private)
        {
            modifiers |= DeclarationModifiers::VIRTUAL;
        }
        modifiers
    }

    fn member_accessibility(
        container: TypeKind,
        written: Option<Accessibility>,
        is_explicit_implementation: bool,
    ) -> Accessibility {
        if is_explicit_implementation {
            return Accessibility::Private;
        }
        written.unwrap_or(if container == TypeKind::Interface {
            Accessibility::Public
        } else {
            Accessibility::Private
        })
    }

    fn explicit_member_name(explicit: Option<&crate::syntax::TypeSyntax>, name: &str) -> String {
        match explicit {
            Some(interface) => format!("{interface}.{name}"),
            None => name.to_string(),
        }
    }

    fn declare_source_method(
        &mut self,
        owner: SymbolId,
        container: TypeKind,
        syntax: Arc<MethodDeclarationSyntax>,
    ) -> SymbolId {
        let (kind, operator, simple_name) = match syntax.kind {
            MethodSyntaxKind::Ordinary => (MethodKind::Ordinary, None, syntax.name.to_string()),
            MethodSyntaxKind::Operator { token, is_checked } => {
                let operator = OperatorKind::from_token(token, syntax.parameters.len());
                (
                    MethodKind::UserDefinedOperator,
                    Some(operator),
                    operator.metadata_name(is_checked).to_string(),
                )
            }
            MethodSyntaxKind::Conversion {
                is_explicit,
                is_checked,
            } => {
                let operator = if is_explicit {
                    OperatorKind::Explicit
                } else {
                    OperatorKind::Implicit
                };
                (
                    MethodKind::Conversion,
                    Some(operator),
                    operator.metadata_name(is_checked).to_string(),
                )
            }
        };
        let is_explicit = syntax.explicit_interface.is_some();
        let name = Self::explicit_member_name(syntax.explicit_interface.as_ref(), &simple_name);
        let id = self.push(Symbol {
            name: self.interner.intern_string(&name),
            containing: Some(owner),
            locations: smallvec![syntax.location.clone()],
            origin: SymbolOrigin::Source,
            accessibility: Self::member_accessibility(container, syntax.accessibility, is_explicit),
            modifiers: Self::member_modifiers(
                container,
                syntax.modifiers,
                syntax.accessibility,
                syntax.has_body,
                is_explicit,
            ),
            data: SymbolData::Method(MethodSymbol {
                kind,
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                associated_property: None,
                operator,
                source: MethodSource::Syntax(Arc::clone(&syntax)),
            }),
        });
        let type_parameters = self.declare_source_type_parameters(id, true, &syntax.type_parameters);
        let parameters = self.declare_source_parameters(id, &syntax.parameters);
        if let SymbolData::Method(method) = &mut self.symbols[id.index()].data {
            method.type_parameters = type_parameters;
            method.parameters = parameters;
        }
        self.add_member(owner, id);
        id
    }

    fn declare_source_parameters(
        &mut self,
        owner: SymbolId,
        parameters: &[Arc<ParameterSyntax>],
    ) -> Vec<SymbolId> {
        parameters
            .iter()
            .enumerate()
            .map(|(ordinal, syntax)| {
                let scoped = match (syntax.is_scoped, syntax.ref_kind.is_by_ref()) {
                    (false, _) => ScopedKind::None,
                    (true, true) => ScopedKind::ScopedRef,
                    (true, false) => ScopedKind::ScopedValue,
                };
                self.push(Symbol {
                    name: self.interner.intern_string(&syntax.name),
                    containing: Some(owner),
                    locations: smallvec![syntax.location.clone()],
                    origin: SymbolOrigin::Source,
                    accessibility: Accessibility::NotApplicable,
                    modifiers: DeclarationModifiers::empty(),
                    data: SymbolData::Parameter(ParameterSymbol {
                        ordinal: ordinal as u32,
                        ref_kind: syntax.ref_kind,
                        scoped,
                        is_params: syntax.is_params,
                        source: ParameterSource::Syntax(Arc::clone(syntax)),
                    }),
                })
            })
            .collect()
    }

    fn declare_source_property(
        &mut self,
        owner: SymbolId,
        container: TypeKind,
        syntax: Arc<PropertyDeclarationSyntax>,
    ) -> SymbolId {
        let is_explicit = syntax.explicit_interface.is_some();
        let simple_name = if syntax.is_indexer {
            INDEXER_NAME.to_string()
        } else {
            syntax.name.to_string()
        };
        let name = Self::explicit_member_name(syntax.explicit_interface.as_ref(), &simple_name);
        let has_body = syntax.accessors.iter().any(|accessor| accessor.has_body);
        let accessibility = Self::member_accessibility(container, syntax.accessibility, is_explicit);
        let modifiers = Self::member_modifiers(
            container,
            syntax.modifiers,
            syntax.accessibility,
            has_body,
            is_explicit,
        );
        let id = self.push(Symbol {
            name: self.interner.intern_string(&name),
            containing: Some(owner),
            locations: smallvec![syntax.location.clone()],
            origin: SymbolOrigin::Source,
            accessibility,
            modifiers,
            data: SymbolData::Property(PropertySymbol {
                is_indexer: syntax.is_indexer,
                parameters: Vec::new(),
                getter: None,
                setter: None,
                source: PropertySource::Syntax(Arc::clone(&syntax)),
            }),
        });
        let parameters = self.declare_source_parameters(id, &syntax.parameters);
        let accessor_base = if syntax.is_indexer { "Item" } else { &*syntax.name };

        let mut getter = None;
        let mut setter = None;
        for (index, accessor) in syntax.accessors.iter().enumerate() {
            let (kind, prefix) = if accessor.kind.is_setter() {
                (MethodKind::PropertySet, "set_")
            } else {
                (MethodKind::PropertyGet, "get_")
            };
            let accessor_name = Self::explicit_member_name(
                syntax.explicit_interface.as_ref(),
                &format!("{prefix}{accessor_base}"),
            );
            let accessor_id = self.push(Symbol {
                name: self.interner.intern_string(&accessor_name),
                containing: Some(owner),
                locations: smallvec![accessor.location.clone()],
                origin: SymbolOrigin::Source,
                accessibility: accessor.accessibility.unwrap_or(accessibility),
                modifiers,
                data: SymbolData::Method(MethodSymbol {
                    kind,
                    type_parameters: Vec::new(),
                    parameters: Vec::new(),
                    associated_property: Some(id),
                    operator: None,
                    source: MethodSource::Accessor {
                        property: Arc::clone(&syntax),
                        index,
                    },
                }),
            });
            let mut accessor_parameters: Vec<SymbolId> = parameters
                .iter()
                .enumerate()
                .map(|(ordinal, original)| {
                    let original_symbol = self.symbol(*original).clone();
                    let original_parameter = match &original_symbol.data {
                        SymbolData::Parameter(parameter) => parameter.clone(),
                        _ => unreachable!("property parameters are parameter symbols"),
                    };
                    self.push(Symbol {
                        containing: Some(accessor_id),
                        data: SymbolData::Parameter(ParameterSymbol {
                            ordinal: ordinal as u32,
                            source: ParameterSource::AccessorCopy {
                                original: *original,
                            },
                            ..original_parameter
                        }),
                        ..original_symbol
                    })
                })
                .collect();
            if kind == MethodKind::PropertySet {
                let value = self.push(Symbol {
                    name: self.interner.intern_string("value"),
                    containing: Some(accessor_id),
                    locations: smallvec![accessor.location.clone()],
                    origin: SymbolOrigin::Source,
                    accessibility: Accessibility::NotApplicable,
                    modifiers: DeclarationModifiers::empty(),
                    data: SymbolData::Parameter(ParameterSymbol {
                        ordinal: accessor_parameters.len() as u32,
                        ref_kind: RefKind::None,
                        scoped: ScopedKind::None,
                        is_params: false,
                        source: ParameterSource::AccessorValue { property: id },
                    }),
                });
                accessor_parameters.push(value);
            }
            if let SymbolData::Method(method) = &mut self.symbols[accessor_id.index()].data {
                method.parameters = accessor_parameters;
            }
            self.add_member(owner, accessor_id);
            if kind == MethodKind::PropertySet {
                setter = Some(accessor_id);
            } else {
                getter = Some(accessor_id);
            }
        }

        if let SymbolData::Property(property) = &mut self.symbols[id.index()].data {
            property.parameters = parameters;
            property.getter = getter;
            property.setter = setter;
        }
        self.add_member(owner, id);
        id
    }

    pub fn build(self) -> SymbolArena {
        let core = self
            .core
            .unwrap_or_else(|| unreachable!("core library is installed by SymbolArenaBuilder::new"));
        SymbolArena {
            interner: self.interner,
            symbols: self.symbols,
            members_by_name: self.members_by_name,
            types_by_name: self.types_by_name,
            types_by_full_name: self.types_by_full_name,
            source_types: self.source_types,
            assemblies: self.assemblies,
            core,
            attribute_classes: self.attribute_classes,
        }
    }
}

impl Default for SymbolArenaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/arena_tests.rs"]
mod tests;
