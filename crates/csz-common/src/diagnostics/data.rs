//! Diagnostic codes and message templates.
//!
//! Codes follow the numbering users already know from the C# compiler so
//! existing suppression lists keep working.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    // Binding
    pub const TYPE_OR_NAMESPACE_NOT_FOUND: u32 = 246;
    pub const NULLABLE_ANNOTATION_OUTSIDE_CONTEXT: u32 = 8632;
    pub const ATTRIBUTE_ARGUMENT_NOT_CONSTANT: u32 = 182;
    pub const NO_CONVERSION_FOR_DEFAULT_PARAM: u32 = 1750;

    // Base types and interfaces
    pub const CIRCULAR_BASE: u32 = 146;
    pub const CANNOT_DERIVE_FROM_SEALED: u32 = 509;
    pub const DUPLICATE_INTERFACE_IN_BASE_LIST: u32 = 528;
    pub const NOT_AN_INTERFACE: u32 = 527;

    // Override resolution
    pub const OVERRIDE_NOT_EXPECTED: u32 = 115;
    pub const CANT_OVERRIDE_NON_FUNCTION: u32 = 505;
    pub const CANT_OVERRIDE_NON_PROPERTY: u32 = 544;
    pub const AMBIGUOUS_OVERRIDE: u32 = 462;
    pub const CANT_OVERRIDE_BOGUS: u32 = 569;
    pub const CANT_OVERRIDE_NON_VIRTUAL: u32 = 506;
    pub const CANT_OVERRIDE_SEALED: u32 = 239;
    pub const CANT_CHANGE_ACCESS_ON_OVERRIDE: u32 = 507;
    pub const CANT_CHANGE_REF_RETURN_ON_OVERRIDE: u32 = 8148;
    pub const CANT_CHANGE_RETURN_TYPE_ON_OVERRIDE: u32 = 508;
    pub const CANT_CHANGE_TYPE_ON_OVERRIDE: u32 = 1715;
    pub const RUNTIME_DOES_NOT_SUPPORT_COVARIANT_RETURNS: u32 = 8830;
    pub const RUNTIME_DOES_NOT_SUPPORT_COVARIANT_PROPERTIES: u32 = 8831;
    pub const FEATURE_NOT_AVAILABLE_COVARIANT_RETURNS: u32 = 8400;
    pub const CANT_CHANGE_TUPLE_NAMES_ON_OVERRIDE: u32 = 8139;
    pub const NO_GET_TO_OVERRIDE: u32 = 545;
    pub const NO_SET_TO_OVERRIDE: u32 = 546;
    pub const NULLABILITY_MISMATCH_IN_TYPE_ON_OVERRIDE: u32 = 8608;
    pub const NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_OVERRIDE: u32 = 8609;
    pub const NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_OVERRIDE: u32 = 8610;
    pub const OBSOLETE_OVERRIDING_NON_OBSOLETE: u32 = 672;
    pub const NON_OBSOLETE_OVERRIDING_OBSOLETE: u32 = 809;
    pub const SCOPED_MISMATCH_IN_PARAMETER_OF_OVERRIDE: u32 = 8987;
    pub const SCOPED_MISMATCH_IN_PARAMETER_OF_OVERRIDE_WARNING: u32 = 9074;

    // Hiding
    pub const NEW_REQUIRED: u32 = 108;
    pub const NEW_NOT_REQUIRED: u32 = 109;
    pub const NEW_OR_OVERRIDE_EXPECTED: u32 = 114;
    pub const HIDING_ABSTRACT_MEMBER: u32 = 533;
    pub const UNIMPLEMENTED_ABSTRACT_MEMBER: u32 = 534;

    // Interface implementation
    pub const UNIMPLEMENTED_INTERFACE_MEMBER: u32 = 535;
    pub const CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_STATIC: u32 = 736;
    pub const CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_NOT_PUBLIC: u32 = 737;
    pub const CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_WRONG_RETURN_TYPE: u32 = 738;
    pub const CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_WRONG_REF_RETURN: u32 = 8152;
    pub const CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_NOT_STATIC: u32 = 8928;
    pub const INTERFACE_MEMBER_NOT_FOUND: u32 = 539;
    pub const CLASS_DOESNT_IMPLEMENT_INTERFACE: u32 = 540;
    pub const EXPLICIT_INTERFACE_NOT_AN_INTERFACE: u32 = 538;
    pub const EXPLICIT_IMPLEMENTATION_COLLISION: u32 = 473;
    pub const MULTIPLE_IMPLEMENTATION_MATCHES: u32 = 1956;
    pub const IMPLEMENTATION_TUPLE_NAMES_MISMATCH: u32 = 8141;
    pub const NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_IMPLICIT_IMPLEMENTATION: u32 = 8766;
    pub const NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_IMPLICIT_IMPLEMENTATION: u32 = 8767;
    pub const NULLABILITY_MISMATCH_IN_TYPE_ON_IMPLICIT_IMPLEMENTATION: u32 = 8612;
    pub const NULLABILITY_MISMATCH_IN_TYPE_ON_EXPLICIT_IMPLEMENTATION: u32 = 8615;
    pub const NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_EXPLICIT_IMPLEMENTATION: u32 = 8616;
    pub const NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_EXPLICIT_IMPLEMENTATION: u32 = 8617;
    pub const NULLABILITY_MISMATCH_IN_INTERFACE_IMPLEMENTED_BY_BASE: u32 = 8644;
    pub const SCOPED_MISMATCH_IN_PARAMETER_OF_IMPLEMENTATION: u32 = 8988;
    pub const SCOPED_MISMATCH_IN_PARAMETER_OF_IMPLEMENTATION_WARNING: u32 = 9075;

    // Operators
    pub const OPERATORS_MUST_BE_STATIC: u32 = 558;
    pub const BAD_UNARY_OPERATOR_ARITY: u32 = 1535;
    pub const BAD_BINARY_OPERATOR_ARITY: u32 = 1534;
    pub const BAD_UNARY_OPERATOR_SIGNATURE: u32 = 562;
    pub const BAD_BINARY_OPERATOR_SIGNATURE: u32 = 563;
    pub const BAD_SHIFT_OPERATOR_SIGNATURE: u32 = 564;
    pub const BAD_INC_DEC_SIGNATURE: u32 = 559;
    pub const BAD_INC_DEC_RETURN_TYPE: u32 = 448;
    pub const TRUE_FALSE_MUST_RETURN_BOOL: u32 = 215;
    pub const CONVERSION_WITH_INTERFACE: u32 = 552;
    pub const CONVERSION_WITH_BASE: u32 = 553;
    pub const CONVERSION_WITH_DERIVED: u32 = 554;
    pub const IDENTITY_CONVERSION: u32 = 555;
    pub const CONVERSION_NOT_INVOLVING_CONTAINING_TYPE: u32 = 556;
    pub const BAD_DYNAMIC_CONVERSION: u32 = 1964;
    pub const OPERATOR_NEEDS_MATCH: u32 = 216;
    pub const CHECKED_OPERATOR_NEEDS_MATCH: u32 = 9025;
    pub const INTERFACES_CANT_CONTAIN_CONVERSION_OR_EQUALITY: u32 = 567;
    pub const BAD_ABSTRACT_UNARY_OPERATOR_SIGNATURE: u32 = 8921;
    pub const BAD_ABSTRACT_INC_DEC_SIGNATURE: u32 = 8922;
    pub const BAD_ABSTRACT_INC_DEC_RETURN_TYPE: u32 = 8923;
    pub const BAD_ABSTRACT_BINARY_OPERATOR_SIGNATURE: u32 = 8924;
    pub const BAD_ABSTRACT_SHIFT_OPERATOR_SIGNATURE: u32 = 8925;
    pub const BAD_ABSTRACT_EQUALITY_OPERATOR_SIGNATURE: u32 = 9311;
    pub const EQUALS_WITHOUT_GET_HASH_CODE: u32 = 659;
    pub const EQUALITY_OP_WITHOUT_EQUALS: u32 = 660;
    pub const EQUALITY_OP_WITHOUT_GET_HASH_CODE: u32 = 661;

    // Constraints and partial declarations
    pub const PARTIAL_WRONG_CONSTRAINTS: u32 = 265;
    pub const PARTIAL_WRONG_TYPE_PARAMS: u32 = 264;
    pub const PARTIAL_WRONG_TYPE_PARAMS_VARIANCE: u32 = 1067;
    pub const TYPE_PARAMETER_NOT_FOUND_IN_CONSTRAINT: u32 = 699;
    pub const DUPLICATE_CONSTRAINT_CLAUSE: u32 = 409;

    // Default values
    pub const DEFAULT_VALUE_MUST_BE_CONSTANT: u32 = 1736;
    pub const REF_OUT_DEFAULT_VALUE: u32 = 1741;
    pub const DEFAULT_VALUE_USED_WITH_ATTRIBUTES: u32 = 1745;
    pub const DEFAULT_VALUE_FOR_PARAMS_PARAMETER: u32 = 1751;
    pub const DEFAULT_VALUE_BAD_VALUE_TYPE: u32 = 1910;
    pub const DEFAULT_VALUE_TYPE_MUST_MATCH: u32 = 1908;
    pub const PARAM_DEFAULT_VALUE_DIFFERS_FROM_ATTRIBUTE: u32 = 8017;
    pub const DEFAULT_VALUE_FOR_UNCONSUMED_LOCATION: u32 = 1066;

    // Caller info
    pub const NO_CONVERSION_FOR_CALLER_LINE_NUMBER: u32 = 4017;
    pub const NO_CONVERSION_FOR_CALLER_FILE_PATH: u32 = 4018;
    pub const NO_CONVERSION_FOR_CALLER_MEMBER_NAME: u32 = 4019;
    pub const CALLER_LINE_NUMBER_WITHOUT_DEFAULT: u32 = 4020;
    pub const CALLER_FILE_PATH_WITHOUT_DEFAULT: u32 = 4021;
    pub const CALLER_MEMBER_NAME_WITHOUT_DEFAULT: u32 = 4022;
    pub const CALLER_LINE_NUMBER_UNCONSUMED_LOCATION: u32 = 4024;
    pub const CALLER_FILE_PATH_UNCONSUMED_LOCATION: u32 = 4025;
    pub const CALLER_MEMBER_NAME_UNCONSUMED_LOCATION: u32 = 4026;
    pub const CALLER_LINE_NUMBER_PREFERRED_OVER_MEMBER_NAME: u32 = 7080;
    pub const CALLER_LINE_NUMBER_PREFERRED_OVER_FILE_PATH: u32 = 7081;
    pub const CALLER_FILE_PATH_PREFERRED_OVER_MEMBER_NAME: u32 = 7082;
    pub const NO_CONVERSION_FOR_CALLER_ARGUMENT_EXPRESSION: u32 = 8959;
    pub const CALLER_ARGUMENT_EXPRESSION_INVALID_NAME: u32 = 8963;
    pub const CALLER_ARGUMENT_EXPRESSION_WITHOUT_DEFAULT: u32 = 8964;
    pub const CALLER_ARGUMENT_EXPRESSION_SELF_REFERENTIAL: u32 = 8965;
    pub const CALLER_ARGUMENT_EXPRESSION_UNCONSUMED_LOCATION: u32 = 8966;

    // Attributes
    pub const EXPLICIT_DYNAMIC_ATTRIBUTE: u32 = 1970;
    pub const EXPLICIT_TUPLE_ELEMENT_NAMES_ATTRIBUTE: u32 = 8138;
    pub const EXPLICIT_NULLABLE_ATTRIBUTE: u32 = 8623;
    pub const EXPLICIT_RESERVED_ATTRIBUTE: u32 = 8335;
    pub const EXPLICIT_EXTENSION_ATTRIBUTE: u32 = 1112;
    pub const EXPLICIT_SCOPED_REF_ATTRIBUTE: u32 = 9063;
    pub const EXPLICIT_PARAM_ARRAY_ATTRIBUTE: u32 = 674;
    pub const BAD_ATTRIBUTE_ARGUMENT: u32 = 633;
    pub const BAD_INDEXER_NAME_ATTRIBUTE: u32 = 415;
    pub const DEFAULT_MEMBER_ON_INDEXED_TYPE: u32 = 646;
    pub const INCONSISTENT_INDEXER_NAMES: u32 = 668;
    pub const UNSCOPED_REF_UNSUPPORTED_TARGET: u32 = 9101;
    pub const INVALID_INTERPOLATED_HANDLER_ARGUMENT_NAME: u32 = 8945;
    pub const ATTRIBUTE_NOT_VALID_ON_TARGET: u32 = 592;

    // Declaration shape
    pub const VIRTUAL_PRIVATE: u32 = 621;
    pub const STATIC_NOT_VIRTUAL: u32 = 112;
    pub const OVERRIDE_NOT_NEW: u32 = 113;
    pub const SEALED_NON_OVERRIDE: u32 = 238;
    pub const ABSTRACT_AND_EXTERN: u32 = 180;
    pub const ABSTRACT_AND_SEALED: u32 = 502;
    pub const ABSTRACT_NOT_VIRTUAL: u32 = 503;
    pub const NEW_VIRTUAL_IN_SEALED: u32 = 549;
    pub const ABSTRACT_IN_CONCRETE_CLASS: u32 = 513;
    pub const BAD_MEMBER_FLAG: u32 = 106;
    pub const PROTECTED_IN_SEALED: u32 = 628;
    pub const PROTECTED_IN_STRUCT: u32 = 666;
    pub const INSTANCE_MEMBER_IN_STATIC_CLASS: u32 = 708;
    pub const PROPERTY_WITH_NO_ACCESSORS: u32 = 548;
    pub const REF_PROPERTY_MUST_HAVE_GET: u32 = 8146;
    pub const REF_PROPERTY_CANNOT_HAVE_SET: u32 = 8147;
    pub const INVALID_PROPERTY_ACCESSOR_MODIFIER: u32 = 273;
    pub const DUPLICATE_PROPERTY_ACCESSOR_MODIFIERS: u32 = 274;
    pub const ACCESSOR_MODIFIER_REQUIRES_BOTH_ACCESSORS: u32 = 276;
    pub const PRIVATE_ABSTRACT_ACCESSOR: u32 = 442;
}

use diagnostic_codes as c;

const fn error(code: u32, message: &'static str) -> DiagnosticMessage {
    DiagnosticMessage {
        code,
        category: DiagnosticCategory::Error,
        message,
    }
}

const fn warning(code: u32, message: &'static str) -> DiagnosticMessage {
    DiagnosticMessage {
        code,
        category: DiagnosticCategory::Warning,
        message,
    }
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    error(c::TYPE_OR_NAMESPACE_NOT_FOUND, "The type or namespace name '{0}' could not be found"),
    warning(
        c::NULLABLE_ANNOTATION_OUTSIDE_CONTEXT,
        "The annotation for nullable reference types should only be used in code within a '#nullable' annotations context.",
    ),
    error(
        c::ATTRIBUTE_ARGUMENT_NOT_CONSTANT,
        "An attribute argument must be a constant expression, typeof expression or array creation expression of an attribute parameter type",
    ),
    error(
        c::NO_CONVERSION_FOR_DEFAULT_PARAM,
        "A value of type '{0}' cannot be used as a default parameter because there are no standard conversions to type '{1}'",
    ),
    error(c::CIRCULAR_BASE, "Circular base type dependency involving '{0}' and '{1}'"),
    error(c::CANNOT_DERIVE_FROM_SEALED, "'{0}': cannot derive from sealed type '{1}'"),
    error(c::DUPLICATE_INTERFACE_IN_BASE_LIST, "'{0}' is already listed in interface list"),
    error(c::NOT_AN_INTERFACE, "Type '{0}' in interface list is not an interface"),
    error(c::OVERRIDE_NOT_EXPECTED, "'{0}': no suitable method found to override"),
    error(c::CANT_OVERRIDE_NON_FUNCTION, "'{0}': cannot override because '{1}' is not a function"),
    error(c::CANT_OVERRIDE_NON_PROPERTY, "'{0}': cannot override because '{1}' is not a property"),
    error(
        c::AMBIGUOUS_OVERRIDE,
        "The inherited members '{0}' and '{1}' have the same signature in type '{2}', so they cannot be overridden",
    ),
    error(c::CANT_OVERRIDE_BOGUS, "'{0}': cannot override '{1}' because it is not supported by the language"),
    error(
        c::CANT_OVERRIDE_NON_VIRTUAL,
        "'{0}': cannot override inherited member '{1}' because it is not marked virtual, abstract, or override",
    ),
    error(c::CANT_OVERRIDE_SEALED, "'{0}': cannot override inherited member '{1}' because it is sealed"),
    error(
        c::CANT_CHANGE_ACCESS_ON_OVERRIDE,
        "'{0}': cannot change access modifiers when overriding '{1}' inherited member '{2}'",
    ),
    error(
        c::CANT_CHANGE_REF_RETURN_ON_OVERRIDE,
        "'{0}' must match by reference return of overridden member '{1}'",
    ),
    error(c::CANT_CHANGE_RETURN_TYPE_ON_OVERRIDE, "'{0}': return type must be '{2}' to match overridden member '{1}'"),
    error(c::CANT_CHANGE_TYPE_ON_OVERRIDE, "'{0}': type must be '{2}' to match overridden member '{1}'"),
    error(
        c::RUNTIME_DOES_NOT_SUPPORT_COVARIANT_RETURNS,
        "'{0}': Target runtime doesn't support covariant return types in overrides. Return type must be '{2}' to match overridden member '{1}'.",
    ),
    error(
        c::RUNTIME_DOES_NOT_SUPPORT_COVARIANT_PROPERTIES,
        "'{0}': Target runtime doesn't support covariant types in overrides. Type must be '{2}' to match overridden member '{1}'.",
    ),
    error(
        c::FEATURE_NOT_AVAILABLE_COVARIANT_RETURNS,
        "Feature 'covariant returns' is not available in C# {0}. Please use language version 9.0 or greater.",
    ),
    error(
        c::CANT_CHANGE_TUPLE_NAMES_ON_OVERRIDE,
        "'{0}': cannot change tuple element names when overriding inherited member '{1}'",
    ),
    error(c::NO_GET_TO_OVERRIDE, "'{0}': cannot override because '{1}' does not have an overridable get accessor"),
    error(c::NO_SET_TO_OVERRIDE, "'{0}': cannot override because '{1}' does not have an overridable set accessor"),
    warning(
        c::NULLABILITY_MISMATCH_IN_TYPE_ON_OVERRIDE,
        "Nullability of reference types in type doesn't match overridden member.",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_OVERRIDE,
        "Nullability of reference types in return type doesn't match overridden member.",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_OVERRIDE,
        "Nullability of reference types in type of parameter '{0}' doesn't match overridden member.",
    ),
    warning(c::OBSOLETE_OVERRIDING_NON_OBSOLETE, "Obsolete member '{0}' overrides non-obsolete member '{1}'"),
    warning(c::NON_OBSOLETE_OVERRIDING_OBSOLETE, "Member '{0}' overrides obsolete member '{1}'. Add the Obsolete attribute to '{0}'."),
    error(
        c::SCOPED_MISMATCH_IN_PARAMETER_OF_OVERRIDE,
        "The 'scoped' modifier of parameter '{0}' doesn't match overridden or implemented member.",
    ),
    warning(
        c::SCOPED_MISMATCH_IN_PARAMETER_OF_OVERRIDE_WARNING,
        "The 'scoped' modifier of parameter '{0}' doesn't match overridden or implemented member.",
    ),
    warning(
        c::NEW_REQUIRED,
        "'{0}' hides inherited member '{1}'. Use the new keyword if hiding was intended.",
    ),
    warning(c::NEW_NOT_REQUIRED, "The member '{0}' does not hide an accessible member. The new keyword is not required."),
    warning(
        c::NEW_OR_OVERRIDE_EXPECTED,
        "'{0}' hides inherited member '{1}'. To make the current member override that implementation, add the override keyword. Otherwise add the new keyword.",
    ),
    error(c::HIDING_ABSTRACT_MEMBER, "'{0}' hides inherited abstract member '{1}'"),
    error(c::UNIMPLEMENTED_ABSTRACT_MEMBER, "'{0}' does not implement inherited abstract member '{1}'"),
    error(c::UNIMPLEMENTED_INTERFACE_MEMBER, "'{0}' does not implement interface member '{1}'"),
    error(
        c::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_STATIC,
        "'{0}' does not implement instance interface member '{1}'. '{2}' cannot implement the interface member because it is static.",
    ),
    error(
        c::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_NOT_PUBLIC,
        "'{0}' does not implement interface member '{1}'. '{2}' cannot implement an interface member because it is not public.",
    ),
    error(
        c::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_WRONG_RETURN_TYPE,
        "'{0}' does not implement interface member '{1}'. '{2}' cannot implement '{1}' because it does not have the matching return type of '{3}'.",
    ),
    error(
        c::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_WRONG_REF_RETURN,
        "'{0}' does not implement interface member '{1}'. '{2}' cannot implement '{1}' because it does not have matching return by reference.",
    ),
    error(
        c::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_NOT_STATIC,
        "'{0}' does not implement static interface member '{1}'. '{2}' cannot implement the interface member because it is not static.",
    ),
    error(c::INTERFACE_MEMBER_NOT_FOUND, "'{0}' in explicit interface declaration is not found among members of the interface that can be implemented"),
    error(c::CLASS_DOESNT_IMPLEMENT_INTERFACE, "'{0}': containing type does not implement interface '{1}'"),
    error(c::EXPLICIT_INTERFACE_NOT_AN_INTERFACE, "'{0}' in explicit interface declaration is not an interface"),
    warning(
        c::EXPLICIT_IMPLEMENTATION_COLLISION,
        "Explicit interface implementation '{0}' matches more than one interface member. Which interface member is actually chosen is implementation-dependent.",
    ),
    warning(
        c::MULTIPLE_IMPLEMENTATION_MATCHES,
        "Member '{0}' implements interface member '{1}' in type '{2}'. There are multiple matches for the interface member at run-time.",
    ),
    error(
        c::IMPLEMENTATION_TUPLE_NAMES_MISMATCH,
        "The tuple element names in the signature of method '{0}' must match the tuple element names of interface method '{1}' (including on the return type).",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_IMPLICIT_IMPLEMENTATION,
        "Nullability of reference types in return type of '{0}' doesn't match implicitly implemented member '{1}'.",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_IMPLICIT_IMPLEMENTATION,
        "Nullability of reference types in type of parameter '{0}' of '{1}' doesn't match implicitly implemented member '{2}'.",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_TYPE_ON_IMPLICIT_IMPLEMENTATION,
        "Nullability of reference types in type of '{0}' doesn't match implicitly implemented member '{1}'.",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_TYPE_ON_EXPLICIT_IMPLEMENTATION,
        "Nullability of reference types in type doesn't match implemented member '{0}'.",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_EXPLICIT_IMPLEMENTATION,
        "Nullability of reference types in return type doesn't match implemented member '{0}'.",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_EXPLICIT_IMPLEMENTATION,
        "Nullability of reference types in type of parameter '{0}' doesn't match implemented member '{1}'.",
    ),
    warning(
        c::NULLABILITY_MISMATCH_IN_INTERFACE_IMPLEMENTED_BY_BASE,
        "'{0}' does not implement interface member '{1}'. Nullability of reference types in interface implemented by the base type doesn't match.",
    ),
    error(
        c::SCOPED_MISMATCH_IN_PARAMETER_OF_IMPLEMENTATION,
        "The 'scoped' modifier of parameter '{0}' doesn't match implemented member '{1}'.",
    ),
    warning(
        c::SCOPED_MISMATCH_IN_PARAMETER_OF_IMPLEMENTATION_WARNING,
        "The 'scoped' modifier of parameter '{0}' doesn't match implemented member '{1}'.",
    ),
    error(c::OPERATORS_MUST_BE_STATIC, "User-defined operator '{0}' must be declared static and public"),
    error(c::BAD_UNARY_OPERATOR_ARITY, "Overloaded unary operator '{0}' takes one parameter"),
    error(c::BAD_BINARY_OPERATOR_ARITY, "Overloaded binary operator '{0}' takes two parameters"),
    error(c::BAD_UNARY_OPERATOR_SIGNATURE, "The parameter of a unary operator must be the containing type"),
    error(c::BAD_BINARY_OPERATOR_SIGNATURE, "One of the parameters of a binary operator must be the containing type"),
    error(
        c::BAD_SHIFT_OPERATOR_SIGNATURE,
        "The first operand of an overloaded shift operator must have the same type as the containing type, and the type of the second operand must be int",
    ),
    error(c::BAD_INC_DEC_SIGNATURE, "The parameter type for ++ or -- operator must be the containing type"),
    error(c::BAD_INC_DEC_RETURN_TYPE, "The return type for ++ or -- operator must match the parameter type or be derived from the parameter type"),
    error(c::TRUE_FALSE_MUST_RETURN_BOOL, "The return type of operator True or False must be bool"),
    error(c::CONVERSION_WITH_INTERFACE, "'{0}': user-defined conversions to or from an interface are not allowed"),
    error(c::CONVERSION_WITH_BASE, "'{0}': user-defined conversions to or from a base type are not allowed"),
    error(c::CONVERSION_WITH_DERIVED, "'{0}': user-defined conversions to or from a derived type are not allowed"),
    error(c::IDENTITY_CONVERSION, "User-defined operator cannot convert a type to itself"),
    error(c::CONVERSION_NOT_INVOLVING_CONTAINING_TYPE, "User-defined conversion must convert to or from the enclosing type"),
    error(c::BAD_DYNAMIC_CONVERSION, "'{0}': user-defined conversions to or from the dynamic type are not allowed"),
    error(c::OPERATOR_NEEDS_MATCH, "The operator '{0}' requires a matching operator '{1}' to also be defined"),
    error(c::CHECKED_OPERATOR_NEEDS_MATCH, "The operator '{0}' requires a matching non-checked version of the operator to also be defined"),
    error(c::INTERFACES_CANT_CONTAIN_CONVERSION_OR_EQUALITY, "Interfaces cannot contain conversion, equality, or inequality operators"),
    error(
        c::BAD_ABSTRACT_UNARY_OPERATOR_SIGNATURE,
        "The parameter of a unary operator must be the containing type, or its type parameter constrained to it.",
    ),
    error(
        c::BAD_ABSTRACT_INC_DEC_SIGNATURE,
        "The parameter type for ++ or -- operator must be the containing type, or its type parameter constrained to it.",
    ),
    error(
        c::BAD_ABSTRACT_INC_DEC_RETURN_TYPE,
        "The return type for ++ or -- operator must either match the parameter type, or be derived from the parameter type, or be the containing type's type parameter constrained to it unless the parameter type is a different type parameter.",
    ),
    error(
        c::BAD_ABSTRACT_BINARY_OPERATOR_SIGNATURE,
        "One of the parameters of a binary operator must be the containing type, or its type parameter constrained to it.",
    ),
    error(
        c::BAD_ABSTRACT_SHIFT_OPERATOR_SIGNATURE,
        "The first operand of an overloaded shift operator must have the same type as the containing type or its type parameter constrained to it",
    ),
    error(
        c::BAD_ABSTRACT_EQUALITY_OPERATOR_SIGNATURE,
        "One of the parameters of an equality, or inequality operator declared in interface '{0}' must be a type parameter on '{0}' constrained to '{0}'",
    ),
    warning(c::EQUALS_WITHOUT_GET_HASH_CODE, "'{0}' overrides Object.Equals(object o) but does not override Object.GetHashCode()"),
    warning(c::EQUALITY_OP_WITHOUT_EQUALS, "'{0}' defines operator == or operator != but does not override Object.Equals(object o)"),
    warning(c::EQUALITY_OP_WITHOUT_GET_HASH_CODE, "'{0}' defines operator == or operator != but does not override Object.GetHashCode()"),
    error(
        c::PARTIAL_WRONG_CONSTRAINTS,
        "Partial declarations of '{0}' have inconsistent constraints for type parameter '{1}'",
    ),
    error(
        c::PARTIAL_WRONG_TYPE_PARAMS,
        "Partial declarations of '{0}' must have the same type parameter names in the same order",
    ),
    error(
        c::PARTIAL_WRONG_TYPE_PARAMS_VARIANCE,
        "Partial declarations of '{0}' must have the same type parameter names and variance modifiers in the same order",
    ),
    error(c::TYPE_PARAMETER_NOT_FOUND_IN_CONSTRAINT, "'{1}' does not define type parameter '{0}'"),
    error(c::DUPLICATE_CONSTRAINT_CLAUSE, "A constraint clause has already been specified for type parameter '{0}'. All of the constraints for a type parameter must be specified in a single where clause."),
    error(c::DEFAULT_VALUE_MUST_BE_CONSTANT, "Default parameter value for '{0}' must be a compile-time constant"),
    error(c::REF_OUT_DEFAULT_VALUE, "A ref or out parameter cannot have a default value"),
    error(c::DEFAULT_VALUE_USED_WITH_ATTRIBUTES, "Cannot specify default parameter value in conjunction with DefaultParameterAttribute or OptionalAttribute"),
    error(c::DEFAULT_VALUE_FOR_PARAMS_PARAMETER, "Cannot specify a default value for a parameter collection"),
    error(c::DEFAULT_VALUE_BAD_VALUE_TYPE, "Argument of type '{0}' is not applicable for the DefaultParameterValue attribute"),
    error(c::DEFAULT_VALUE_TYPE_MUST_MATCH, "The type of the argument to the DefaultParameterValue attribute must match the parameter type"),
    error(c::PARAM_DEFAULT_VALUE_DIFFERS_FROM_ATTRIBUTE, "The parameter has multiple distinct default values."),
    warning(
        c::DEFAULT_VALUE_FOR_UNCONSUMED_LOCATION,
        "The default value specified for parameter '{0}' will have no effect because it applies to a member that is used in contexts that do not allow optional arguments",
    ),
    error(c::NO_CONVERSION_FOR_CALLER_LINE_NUMBER, "CallerLineNumberAttribute cannot be applied because there are no standard conversions from type '{0}' to type '{1}'"),
    error(c::NO_CONVERSION_FOR_CALLER_FILE_PATH, "CallerFilePathAttribute cannot be applied because there are no standard conversions from type '{0}' to type '{1}'"),
    error(c::NO_CONVERSION_FOR_CALLER_MEMBER_NAME, "CallerMemberNameAttribute cannot be applied because there are no standard conversions from type '{0}' to type '{1}'"),
    error(c::CALLER_LINE_NUMBER_WITHOUT_DEFAULT, "The CallerLineNumberAttribute may only be applied to parameters with default values"),
    error(c::CALLER_FILE_PATH_WITHOUT_DEFAULT, "The CallerFilePathAttribute may only be applied to parameters with default values"),
    error(c::CALLER_MEMBER_NAME_WITHOUT_DEFAULT, "The CallerMemberNameAttribute may only be applied to parameters with default values"),
    warning(
        c::CALLER_LINE_NUMBER_UNCONSUMED_LOCATION,
        "The CallerLineNumberAttribute applied to parameter '{0}' will have no effect because it applies to a member that is used in contexts that do not allow optional arguments",
    ),
    warning(
        c::CALLER_FILE_PATH_UNCONSUMED_LOCATION,
        "The CallerFilePathAttribute applied to parameter '{0}' will have no effect because it applies to a member that is used in contexts that do not allow optional arguments",
    ),
    warning(
        c::CALLER_MEMBER_NAME_UNCONSUMED_LOCATION,
        "The CallerMemberNameAttribute applied to parameter '{0}' will have no effect because it applies to a member that is used in contexts that do not allow optional arguments",
    ),
    warning(
        c::CALLER_LINE_NUMBER_PREFERRED_OVER_MEMBER_NAME,
        "The CallerMemberNameAttribute applied to parameter '{0}' will have no effect. It is overridden by the CallerLineNumberAttribute.",
    ),
    warning(
        c::CALLER_LINE_NUMBER_PREFERRED_OVER_FILE_PATH,
        "The CallerFilePathAttribute applied to parameter '{0}' will have no effect. It is overridden by the CallerLineNumberAttribute.",
    ),
    warning(
        c::CALLER_FILE_PATH_PREFERRED_OVER_MEMBER_NAME,
        "The CallerMemberNameAttribute applied to parameter '{0}' will have no effect. It is overridden by the CallerFilePathAttribute.",
    ),
    error(c::NO_CONVERSION_FOR_CALLER_ARGUMENT_EXPRESSION, "CallerArgumentExpressionAttribute cannot be applied because there are no standard conversions from type '{0}' to type '{1}'"),
    warning(
        c::CALLER_ARGUMENT_EXPRESSION_INVALID_NAME,
        "The CallerArgumentExpressionAttribute applied to parameter '{0}' will have no effect. It is applied with an invalid parameter name.",
    ),
    error(c::CALLER_ARGUMENT_EXPRESSION_WITHOUT_DEFAULT, "The CallerArgumentExpressionAttribute may only be applied to parameters with default values"),
    warning(
        c::CALLER_ARGUMENT_EXPRESSION_SELF_REFERENTIAL,
        "The CallerArgumentExpressionAttribute applied to parameter '{0}' will have no effect because it's self-referential.",
    ),
    warning(
        c::CALLER_ARGUMENT_EXPRESSION_UNCONSUMED_LOCATION,
        "The CallerArgumentExpressionAttribute applied to parameter '{0}' will have no effect because it applies to a member that is used in contexts that do not allow optional arguments",
    ),
    error(c::EXPLICIT_DYNAMIC_ATTRIBUTE, "Do not use 'System.Runtime.CompilerServices.DynamicAttribute'. Use the 'dynamic' keyword instead."),
    error(c::EXPLICIT_TUPLE_ELEMENT_NAMES_ATTRIBUTE, "Cannot reference 'System.Runtime.CompilerServices.TupleElementNamesAttribute' explicitly. Use the tuple syntax to define tuple names."),
    error(c::EXPLICIT_NULLABLE_ATTRIBUTE, "Explicit application of 'System.Runtime.CompilerServices.NullableAttribute' is not allowed."),
    error(c::EXPLICIT_RESERVED_ATTRIBUTE, "Do not use '{0}'. This is reserved for compiler usage."),
    error(c::EXPLICIT_EXTENSION_ATTRIBUTE, "Do not use 'System.Runtime.CompilerServices.ExtensionAttribute'. Use the 'this' keyword instead."),
    error(c::EXPLICIT_SCOPED_REF_ATTRIBUTE, "Do not use 'System.Runtime.CompilerServices.ScopedRefAttribute'. Use the 'scoped' keyword instead."),
    error(c::EXPLICIT_PARAM_ARRAY_ATTRIBUTE, "Do not use 'System.ParamArrayAttribute'. Use the 'params' keyword instead."),
    error(c::BAD_ATTRIBUTE_ARGUMENT, "The argument to the '{0}' attribute must be a valid identifier"),
    error(c::BAD_INDEXER_NAME_ATTRIBUTE, "The 'IndexerName' attribute is valid only on an indexer that is not an explicit interface member declaration"),
    error(c::DEFAULT_MEMBER_ON_INDEXED_TYPE, "Cannot specify the DefaultMember attribute on a type containing an indexer"),
    error(c::INCONSISTENT_INDEXER_NAMES, "Two indexers have different names; the IndexerName attribute must be used with the same name on every indexer within a type"),
    error(c::UNSCOPED_REF_UNSUPPORTED_TARGET, "UnscopedRefAttribute cannot be applied to this parameter because it is unscoped by default."),
    error(c::INVALID_INTERPOLATED_HANDLER_ARGUMENT_NAME, "'{0}' is not a valid parameter name from '{1}'."),
    error(c::ATTRIBUTE_NOT_VALID_ON_TARGET, "Attribute '{0}' is not valid on this declaration type."),
    error(c::VIRTUAL_PRIVATE, "'{0}': virtual or abstract members cannot be private"),
    error(c::STATIC_NOT_VIRTUAL, "A static member cannot be marked as '{0}'"),
    error(c::OVERRIDE_NOT_NEW, "A member '{0}' marked as override cannot be marked as new or virtual"),
    error(c::SEALED_NON_OVERRIDE, "'{0}' cannot be sealed because it is not an override"),
    error(c::ABSTRACT_AND_EXTERN, "'{0}' cannot be both extern and abstract"),
    error(c::ABSTRACT_AND_SEALED, "'{0}' cannot be both abstract and sealed"),
    error(c::ABSTRACT_NOT_VIRTUAL, "The abstract {0} '{1}' cannot be marked virtual"),
    error(c::NEW_VIRTUAL_IN_SEALED, "'{0}' is a new virtual member in sealed type '{1}'"),
    error(c::ABSTRACT_IN_CONCRETE_CLASS, "'{0}' is abstract but it is contained in non-abstract type '{1}'"),
    error(c::BAD_MEMBER_FLAG, "The modifier '{0}' is not valid for this item"),
    warning(c::PROTECTED_IN_SEALED, "'{0}': new protected member declared in sealed type"),
    error(c::PROTECTED_IN_STRUCT, "'{0}': new protected member declared in struct"),
    error(c::INSTANCE_MEMBER_IN_STATIC_CLASS, "'{0}': cannot declare instance members in a static class"),
    error(c::PROPERTY_WITH_NO_ACCESSORS, "'{0}': property or indexer must have at least one accessor"),
    error(c::REF_PROPERTY_MUST_HAVE_GET, "Properties which return by reference must have a get accessor"),
    error(c::REF_PROPERTY_CANNOT_HAVE_SET, "Properties which return by reference cannot have set accessors"),
    error(
        c::INVALID_PROPERTY_ACCESSOR_MODIFIER,
        "The accessibility modifier of the '{0}' accessor must be more restrictive than the property or indexer '{1}'",
    ),
    error(c::DUPLICATE_PROPERTY_ACCESSOR_MODIFIERS, "Cannot specify accessibility modifiers for both accessors of the property or indexer '{0}'"),
    error(
        c::ACCESSOR_MODIFIER_REQUIRES_BOTH_ACCESSORS,
        "'{0}': accessibility modifiers on accessors may only be used if the property or indexer has both a get and a set accessor",
    ),
    error(c::PRIVATE_ABSTRACT_ACCESSOR, "'{0}': abstract properties cannot have private accessors"),
];
