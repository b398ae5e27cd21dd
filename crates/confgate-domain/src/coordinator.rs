use crate::engine::Engine;
use crate::error::CheckError;
use crate::model::{CheckMode, ConfigDocument, Configurations, NamespaceSelection};
use confgate_types::CheckResult;
use confgate_types::ids::COMBINED_FILENAME;
use serde_json::{Map, Value as JsonValue};
use tracing::info;

impl Engine<'_> {
    /// Evaluate `namespace` against every configuration on its own.
    ///
    /// Sub-documents of a multi-document configuration are evaluated
    /// independently and merged back under the configuration's path.
    pub fn check(
        &self,
        configurations: &Configurations,
        namespace: &str,
    ) -> Result<Vec<CheckResult>, CheckError> {
        let counts = self.policy().rule_counts(namespace);

        let mut results = Vec::with_capacity(configurations.len());
        for (path, document) in configurations {
            match document {
                ConfigDocument::Single(value) => {
                    results.push(self.aggregate(path, value, namespace, &counts)?);
                }
                ConfigDocument::Multi(values) => {
                    let mut merged = CheckResult::new(path.as_str(), namespace);
                    for value in values {
                        merged.absorb(self.aggregate(path, value, namespace, &counts)?);
                    }
                    results.push(merged);
                }
            }
        }

        Ok(results)
    }

    /// Evaluate `namespace` once against all configurations merged into a
    /// single document keyed by path.
    pub fn check_combined(
        &self,
        configurations: &Configurations,
        namespace: &str,
    ) -> Result<CheckResult, CheckError> {
        let combined: Map<String, JsonValue> = configurations
            .iter()
            .map(|(path, document)| (path.clone(), document.to_value()))
            .collect();

        self.check_document(COMBINED_FILENAME, &JsonValue::Object(combined), namespace)
    }

    /// Evaluate every selected namespace in order. Results of different
    /// namespaces are concatenated, never merged.
    pub fn run(
        &self,
        configurations: &Configurations,
        selection: &NamespaceSelection,
        mode: CheckMode,
    ) -> Result<Vec<CheckResult>, CheckError> {
        let namespaces = match selection {
            NamespaceSelection::All => self.policy().namespaces(),
            NamespaceSelection::Only(namespaces) => namespaces.clone(),
        };

        let mut results = Vec::new();
        for namespace in &namespaces {
            info!(
                namespace = namespace.as_str(),
                ?mode,
                files = configurations.len(),
                "checking namespace"
            );
            match mode {
                CheckMode::Independent => results.extend(self.check(configurations, namespace)?),
                CheckMode::Combined => {
                    results.push(self.check_combined(configurations, namespace)?);
                }
            }
        }

        Ok(results)
    }
}
