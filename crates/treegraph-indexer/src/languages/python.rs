//! Python grammar tables

use super::LanguageRules;

pub const PYTHON: LanguageRules = LanguageRules {
    name: "python",
    simple_names: &["identifier"],
    references: &["identifier"],
    declarations: &["class_definition", "function_definition"],
    callables: &["class_definition", "function_definition"],
    typed: &[
        ("typed_parameter", "type"),
        ("typed_default_parameter", "type"),
        ("function_definition", "return_type"),
    ],
    type_names: &["identifier"],
    qualified_types: &["attribute"],
    calls: &[("call", "function")],
    callee_name_fields: &["attribute"],
};
