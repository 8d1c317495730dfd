//! Documentation record types.
//!
//! Everything here is computed fresh from source text on each run and
//! serialized with the camelCase JSON shape downstream renderers consume.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// FACET DESCRIPTORS
// ═══════════════════════════════════════════════════════════════════════════════

/// One declared property of a component's Props type.
///
/// `inherited_from` is only ever set together with `inherited`; use
/// [`PropDescriptor::inherit_from`] rather than writing the fields directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub inherited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
}

impl PropDescriptor {
    pub fn own(name: impl Into<String>, type_text: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            optional,
            default_value: None,
            inherited: false,
            inherited_from: None,
        }
    }

    pub fn with_default(mut self, default_value: Option<String>) -> Self {
        self.default_value = default_value;
        self
    }

    /// Tag this descriptor as inherited from `ancestor`.
    pub fn inherit_from(mut self, ancestor: &str) -> Self {
        self.inherited = true;
        self.inherited_from = Some(ancestor.to_string());
        self
    }

    /// Function-shaped types: the bare `Function` marker or anything with an arrow.
    pub fn is_function_typed(&self) -> bool {
        self.type_text == "Function" || self.type_text.contains("=>")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub name: String,
    pub visibility: Visibility,
    pub return_type: String,
    pub params: Vec<ParamDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    /// Parameter names as written at the declaration or call site, e.g. `(e, target)`.
    pub params: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENT RECORD
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    pub component_name: String,
    pub component_path: String,
    pub category: String,
    pub props: Vec<PropDescriptor>,
    pub methods: Vec<MethodDescriptor>,
    pub events: Vec<EventDescriptor>,
    pub styles: Vec<StyleDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ComponentDoc {
    pub fn own_props(&self) -> impl Iterator<Item = &PropDescriptor> {
        self.props.iter().filter(|p| !p.inherited)
    }
}

/// `icon-button` / `icon_button` / `iconButton` → `IconButton`.
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
