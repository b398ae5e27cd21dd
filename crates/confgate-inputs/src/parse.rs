use confgate_domain::{CheckError, ConfigDocument, InputFormat};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Decode the text of one source into a configuration document.
///
/// A YAML stream with more than one non-empty document becomes a multi-document
/// configuration; every other source is a single document.
pub fn parse_document(
    path: &str,
    text: &str,
    format: InputFormat,
) -> Result<ConfigDocument, CheckError> {
    match format {
        InputFormat::Json => serde_json::from_str(text)
            .map(ConfigDocument::Single)
            .map_err(|e| CheckError::config_parse(path, e)),
        InputFormat::Toml => toml::from_str(text)
            .map(ConfigDocument::Single)
            .map_err(|e| CheckError::config_parse(path, e)),
        InputFormat::Yaml => parse_yaml(path, text),
    }
}

fn parse_yaml(path: &str, text: &str) -> Result<ConfigDocument, CheckError> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value =
            JsonValue::deserialize(document).map_err(|e| CheckError::config_parse(path, e))?;
        if !value.is_null() {
            documents.push(value);
        }
    }

    match documents.len() {
        0 => Ok(ConfigDocument::Single(JsonValue::Null)),
        1 => Ok(ConfigDocument::Single(documents.remove(0))),
        _ => Ok(ConfigDocument::Multi(documents)),
    }
}
