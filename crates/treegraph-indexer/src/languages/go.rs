//! Go grammar tables

use super::LanguageRules;

pub const GO: LanguageRules = LanguageRules {
    name: "go",
    simple_names: &[
        "identifier",
        "type_identifier",
        "field_identifier",
        "package_identifier",
    ],
    references: &["identifier"],
    declarations: &["function_declaration", "method_declaration", "type_spec"],
    callables: &["function_declaration", "method_declaration"],
    typed: &[
        ("parameter_declaration", "type"),
        ("var_spec", "type"),
        ("field_declaration", "type"),
        ("function_declaration", "result"),
        ("method_declaration", "result"),
    ],
    type_names: &["type_identifier"],
    qualified_types: &["qualified_type"],
    calls: &[("call_expression", "function")],
    callee_name_fields: &["field"],
};
