//! Rust grammar tables

use super::LanguageRules;

pub const RUST: LanguageRules = LanguageRules {
    name: "rust",
    simple_names: &["identifier", "type_identifier", "field_identifier"],
    references: &["identifier"],
    declarations: &[
        "function_item",
        "function_signature_item",
        "struct_item",
        "enum_item",
        "union_item",
        "trait_item",
        "type_item",
        "const_item",
        "static_item",
        "mod_item",
    ],
    callables: &["function_item", "function_signature_item"],
    typed: &[
        ("let_declaration", "type"),
        ("parameter", "type"),
        ("field_declaration", "type"),
        ("const_item", "type"),
        ("static_item", "type"),
        ("function_item", "return_type"),
    ],
    type_names: &["type_identifier"],
    qualified_types: &["scoped_type_identifier"],
    calls: &[("call_expression", "function")],
    callee_name_fields: &["field", "name"],
};
