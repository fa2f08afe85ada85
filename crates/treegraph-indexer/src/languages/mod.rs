//! Per-language tables driving the semantic links of the lowering pass

pub mod go;
pub mod java;
pub mod python;
pub mod rust;

/// Grammar node kinds the lowering pass needs to know about for one language.
///
/// Declarations are recognised by kind and named by their `name` field.
#[derive(Debug)]
pub struct LanguageRules {
    pub name: &'static str,
    /// Kinds whose whole text is a single identifier.
    pub simple_names: &'static [&'static str],
    /// Identifier kinds that may refer to a declaration.
    pub references: &'static [&'static str],
    pub declarations: &'static [&'static str],
    /// Declarations a call site can target.
    pub callables: &'static [&'static str],
    /// `(kind, field)`: nodes whose `field` child spells a type.
    pub typed: &'static [(&'static str, &'static str)],
    /// Kinds naming a type inside a type expression.
    pub type_names: &'static [&'static str],
    /// Qualified type kinds (`a.b.C`) whose last named child is the type name.
    pub qualified_types: &'static [&'static str],
    /// `(kind, field)`: call sites and the field holding the callee.
    pub calls: &'static [(&'static str, &'static str)],
    /// Fields of a compound callee (`a.b`, `a::b`) holding the called name.
    pub callee_name_fields: &'static [&'static str],
}

impl LanguageRules {
    pub fn is_simple_name(&self, kind: &str) -> bool {
        self.simple_names.contains(&kind)
    }

    pub fn is_reference(&self, kind: &str) -> bool {
        self.references.contains(&kind)
    }

    pub fn is_declaration(&self, kind: &str) -> bool {
        self.declarations.contains(&kind)
    }

    pub fn is_callable(&self, kind: &str) -> bool {
        self.callables.contains(&kind)
    }

    pub fn is_type_name(&self, kind: &str) -> bool {
        self.type_names.contains(&kind)
    }

    pub fn is_qualified_type(&self, kind: &str) -> bool {
        self.qualified_types.contains(&kind)
    }

    pub fn type_field(&self, kind: &str) -> Option<&'static str> {
        lookup(self.typed, kind)
    }

    pub fn callee_field(&self, kind: &str) -> Option<&'static str> {
        lookup(self.calls, kind)
    }
}

fn lookup(table: &[(&'static str, &'static str)], kind: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, field)| *field)
}
