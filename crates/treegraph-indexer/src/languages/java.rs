//! Java grammar tables

use super::LanguageRules;

pub const JAVA: LanguageRules = LanguageRules {
    name: "java",
    simple_names: &["identifier", "type_identifier"],
    references: &["identifier"],
    declarations: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
        "annotation_type_declaration",
        "method_declaration",
        "constructor_declaration",
        "enum_constant",
        "variable_declarator",
        "formal_parameter",
    ],
    callables: &["method_declaration", "constructor_declaration"],
    typed: &[
        ("field_declaration", "type"),
        ("local_variable_declaration", "type"),
        ("formal_parameter", "type"),
        ("method_declaration", "type"),
    ],
    type_names: &["type_identifier"],
    qualified_types: &["scoped_type_identifier"],
    calls: &[
        ("method_invocation", "name"),
        ("object_creation_expression", "type"),
    ],
    callee_name_fields: &[],
};
