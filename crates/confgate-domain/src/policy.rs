use crate::error::CheckError;
use crate::rules::classify;
use confgate_types::ids::DATA_PREFIX;
use std::collections::BTreeMap;

/// Rule heads declared by one loaded policy module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyModule {
    /// Source name of the module (typically its file path).
    pub name: String,

    /// Package path, e.g. `data.kubernetes.labels`.
    pub package: String,

    /// Head name of every rule clause, one entry per clause.
    pub rules: Vec<String>,
}

impl PolicyModule {
    pub fn new(name: impl Into<String>, package: impl Into<String>, rules: &[&str]) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            rules: rules.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Namespace the module's rules live in: the package path without `data.`.
    pub fn namespace(&self) -> String {
        self.package.replacen(DATA_PREFIX, "", 1)
    }
}

/// Access to the rules of loaded policies.
pub trait PolicySource {
    fn modules(&self) -> &BTreeMap<String, PolicyModule>;

    /// Every namespace declared across the loaded modules, in module order.
    ///
    /// Namespaces differing only in case are reported once.
    fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = Vec::new();
        for module in self.modules().values() {
            let namespace = module.namespace();
            if namespaces.iter().any(|n| n.eq_ignore_ascii_case(&namespace)) {
                continue;
            }
            namespaces.push(namespace);
        }
        namespaces
    }

    /// Clause count of every failure and warning rule declared in `namespace`.
    fn rule_counts(&self, namespace: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for module in self.modules().values() {
            if module.namespace() != namespace {
                continue;
            }
            for rule in &module.rules {
                if classify(rule).is_reported() {
                    *counts.entry(rule.clone()).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

/// In-memory policy set keyed by module name.
#[derive(Clone, Debug, Default)]
pub struct PolicySet {
    modules: BTreeMap<String, PolicyModule>,
}

impl PolicySet {
    pub fn new(modules: impl IntoIterator<Item = PolicyModule>) -> Result<Self, CheckError> {
        let mut set = BTreeMap::new();
        for module in modules {
            if module.package.trim().is_empty() {
                return Err(CheckError::policy_load(&module.name, "empty package path"));
            }
            if set.contains_key(&module.name) {
                return Err(CheckError::policy_load(&module.name, "duplicate module name"));
            }
            set.insert(module.name.clone(), module);
        }
        Ok(Self { modules: set })
    }
}

impl PolicySource for PolicySet {
    fn modules(&self) -> &BTreeMap<String, PolicyModule> {
        &self.modules
    }
}
