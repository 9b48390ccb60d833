//! Builder for in-memory registries.

use serde_json::{Value, json};

use crate::registry::Registry;

/// One version of one package.
#[derive(Debug, Clone)]
pub struct PackageSpec {
    name: String,
    kind: String,
    version: String,
    url: Option<String>,
    revision: Option<String>,
    platform: Option<String>,
    deps: Vec<Value>,
}

impl PackageSpec {
    /// A package of registry type `kind` (`Lib`, `Exec`, `Interface`, `Framework`).
    pub fn new(name: &str, kind: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            version: version.to_string(),
            url: None,
            revision: None,
            platform: None,
            deps: Vec::new(),
        }
    }

    /// A `Lib` package.
    pub fn lib(name: &str, version: &str) -> Self {
        Self::new(name, "Lib", version)
    }

    /// An `Exec` package.
    pub fn exec(name: &str, version: &str) -> Self {
        Self::new(name, "Exec", version)
    }

    /// An `Interface` package.
    pub fn interface(name: &str, version: &str) -> Self {
        Self::new(name, "Interface", version)
    }

    /// A `Framework` package.
    pub fn framework(name: &str, version: &str) -> Self {
        Self::new(name, "Framework", version)
    }

    /// Declare a dependency with a `LinkType`.
    pub fn dep(mut self, name: &str, version: &str, link: &str) -> Self {
        self.deps.push(json!({ "Name": name, "Version": version, "LinkType": link }));
        self
    }

    /// Declare a dependency without a `LinkType`.
    pub fn dep_unlinked(mut self, name: &str, version: &str) -> Self {
        self.deps.push(json!({ "Name": name, "Version": version }));
        self
    }

    /// Set the platform constraint.
    pub fn platform(mut self, platform: &str) -> Self {
        self.platform = Some(platform.to_string());
        self
    }

    /// Set the repository URL and revision.
    pub fn source(mut self, url: &str, revision: &str) -> Self {
        self.url = Some(url.to_string());
        self.revision = Some(revision.to_string());
        self
    }

    fn version_json(&self) -> Value {
        let mut record = json!({
            "Version": self.version,
            "URL": self.url.clone().unwrap_or_else(|| format!("https://example.com/{}.git", self.name)),
            "Revision": self.revision.clone().unwrap_or_else(|| format!("rev-{}-{}", self.name, self.version)),
            "Dependency": self.deps,
        });
        if let Some(platform) = &self.platform {
            record["Platform"] = json!(platform);
        }
        record
    }
}

/// Collects [`PackageSpec`]s into a registry document.
///
/// Specs with the same name become versions of one package.
#[derive(Debug, Default, Clone)]
pub struct RegistryBuilder {
    packages: Vec<Value>,
}

impl RegistryBuilder {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one package version.
    pub fn add(mut self, spec: PackageSpec) -> Self {
        let record = spec.version_json();
        let existing = self.packages.iter_mut().find(|p| p["Name"] == json!(spec.name));
        match existing.and_then(|p| p["Versions"].as_array_mut()) {
            Some(versions) => versions.push(record),
            None => self.packages.push(json!({
                "Name": spec.name,
                "Type": spec.kind,
                "Versions": [record],
            })),
        }
        self
    }

    /// Registry document in the `{ "Packages": [...] }` layout.
    pub fn to_json(&self) -> String {
        json!({ "Packages": self.packages }).to_string()
    }

    /// Parse the document into a [`Registry`].
    pub fn build(&self) -> Registry {
        match Registry::from_json(&self.to_json()) {
            Ok(registry) => registry,
            Err(e) => panic!("test registry is invalid: {e:#}"),
        }
    }
}
