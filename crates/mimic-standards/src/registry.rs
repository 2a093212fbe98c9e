#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;

use mimic_model::DatasetSpec;
use tracing::debug;

use crate::error::StandardsError;

const BUILTIN_SPECS: &[(&str, &str)] = &[
    ("admissions.toml", include_str!("../specs/admissions.toml")),
    ("callout.toml", include_str!("../specs/callout.toml")),
    ("icustays.toml", include_str!("../specs/icustays.toml")),
    ("labevents.toml", include_str!("../specs/labevents.toml")),
    ("patients.toml", include_str!("../specs/patients.toml")),
];

/// Parse and validate a spec from TOML text. `origin` names it in errors.
pub fn parse_spec(origin: &str, text: &str) -> Result<DatasetSpec, StandardsError> {
    let spec: DatasetSpec = toml::from_str(text).map_err(|source| StandardsError::Toml {
        origin: origin.to_string(),
        source,
    })?;
    spec.validate()
        .map_err(|source| StandardsError::InvalidSpec {
            origin: origin.to_string(),
            source,
        })?;
    Ok(spec)
}

/// Load and validate a spec file from disk.
pub fn load_spec_file(path: &Path) -> Result<DatasetSpec, StandardsError> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let spec = parse_spec(&path.display().to_string(), &text)?;
    debug!(path = %path.display(), dataset = %spec.name, "loaded spec file");
    Ok(spec)
}

/// All built-in specs, in name order.
pub fn builtin_specs() -> Result<Vec<DatasetSpec>, StandardsError> {
    let mut specs = BUILTIN_SPECS
        .iter()
        .map(|(origin, text)| parse_spec(origin, text))
        .collect::<Result<Vec<_>, _>>()?;
    specs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(specs)
}

/// Look up one built-in spec by name (case-insensitive).
pub fn builtin_spec(name: &str) -> Result<DatasetSpec, StandardsError> {
    SpecRegistry::builtin()?.get(name).cloned()
}

/// Specs available to a run, keyed by upper-cased dataset name.
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    specs: BTreeMap<String, DatasetSpec>,
}

impl SpecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in specs.
    pub fn builtin() -> Result<Self, StandardsError> {
        let mut registry = Self::new();
        for spec in builtin_specs()? {
            registry.insert(spec);
        }
        Ok(registry)
    }

    /// Add a spec, replacing any spec with the same name.
    pub fn insert(&mut self, spec: DatasetSpec) -> Option<DatasetSpec> {
        let previous = self.specs.insert(spec.name.to_uppercase(), spec);
        if let Some(replaced) = &previous {
            debug!(dataset = %replaced.name, "spec overridden");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Result<&DatasetSpec, StandardsError> {
        self.specs
            .get(&name.to_uppercase())
            .ok_or_else(|| StandardsError::UnknownDataset {
                name: name.to_string(),
                available: self.names(),
            })
    }

    pub fn names(&self) -> Vec<String> {
        self.specs.values().map(|s| s.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
