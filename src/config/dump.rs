use serde::Serialize;

use crate::paths::to_unix_string;
use crate::report::ReportKind;

use super::Config;

/// User-visible configuration, as printed for editor tooling.
#[derive(Debug, Serialize)]
pub struct ConfigDump {
    pub version: String,
    pub project_path: String,
    pub lib_path: String,
    pub defined_symbols: Vec<DefinedSymbol>,
    pub search_paths: Vec<String>,
    pub lazy_paths: Vec<String>,
    pub active_notes: Vec<ReportKind>,
}

#[derive(Debug, Serialize)]
pub struct DefinedSymbol {
    pub name: String,
    pub value: String,
}

impl Config {
    pub fn dump(&self) -> ConfigDump {
        let resolver = &self.resolver;
        ConfigDump {
            version: self.constants.version().to_string(),
            project_path: to_unix_string(resolver.project_path()),
            lib_path: to_unix_string(resolver.lib_path()),
            defined_symbols: self
                .defines
                .iter()
                .map(|(name, value)| DefinedSymbol {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            search_paths: resolver.search_paths().iter().map(|p| to_unix_string(p)).collect(),
            lazy_paths: resolver.lazy_paths().iter().map(|p| to_unix_string(p)).collect(),
            active_notes: self.notes.active().iter().collect(),
        }
    }

    pub fn dump_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.dump())
    }
}
