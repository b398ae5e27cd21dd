use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Structured configuration decoded from one input unit.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigDocument {
    Single(JsonValue),

    /// A stream of sub-documents sharing one source path (e.g. multi-document YAML).
    Multi(Vec<JsonValue>),
}

impl ConfigDocument {
    /// The document as one value; sub-documents become an array.
    pub fn to_value(&self) -> JsonValue {
        match self {
            ConfigDocument::Single(value) => value.clone(),
            ConfigDocument::Multi(values) => JsonValue::Array(values.clone()),
        }
    }
}

/// Parsed configurations keyed by source path.
pub type Configurations = BTreeMap<String, ConfigDocument>;

/// How documents are presented to the rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckMode {
    /// Each document (and each sub-document) is evaluated on its own.
    #[default]
    Independent,

    /// All documents are merged into one synthetic document first.
    Combined,
}

/// Namespaces a run evaluates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamespaceSelection {
    /// Every namespace declared by the loaded policies.
    All,

    /// Exactly these namespaces, in this order.
    Only(Vec<String>),
}

impl Default for NamespaceSelection {
    fn default() -> Self {
        NamespaceSelection::Only(vec!["main".to_string()])
    }
}

/// Decoder for configuration sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
    Toml,
}

impl InputFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "json" => Some(InputFormat::Json),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            "toml" => Some(InputFormat::Toml),
            _ => None,
        }
    }

    /// Decoder implied by a file extension, if it is a supported one.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::parse(&ext.to_ascii_lowercase())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Yaml => "yaml",
            InputFormat::Toml => "toml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn multi_document_becomes_array() {
        let doc = ConfigDocument::Multi(vec![json!({ "a": 1 }), json!({ "b": 2 })]);
        assert_eq!(doc.to_value(), json!([{ "a": 1 }, { "b": 2 }]));

        let doc = ConfigDocument::Single(json!({ "a": 1 }));
        assert_eq!(doc.to_value(), json!({ "a": 1 }));
    }

    #[test]
    fn input_format_from_extension() {
        assert_eq!(InputFormat::from_extension("YML"), Some(InputFormat::Yaml));
        assert_eq!(InputFormat::from_extension("json"), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_extension("toml"), Some(InputFormat::Toml));
        assert_eq!(InputFormat::from_extension("hcl"), None);
    }
}
