use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use ahub_core::AnalyticsHub;

/// Routing manifest schema loaded from `routing.toml`.
///
/// Maps event types to the named collectors that should receive them:
///
/// ```toml
/// [routes]
/// ENGAGEMENT = ["clickstream", "audit"]
/// OPERATIONAL = ["audit"]
/// ```
///
/// Collector names refer to collectors registered with the hub at apply time;
/// the manifest carries no collector construction details of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingManifest {
    #[serde(default)]
    pub routes: BTreeMap<String, Vec<String>>,
}

impl RoutingManifest {
    /// Parse and validate manifest TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(input).context("failed to parse routing manifest TOML")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and validate a manifest from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read routing manifest at {}", path.display()))?;

        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid routing manifest at {}", path.display()))
    }

    /// Validate event types and collector name lists.
    pub fn validate(&self) -> Result<()> {
        for (event_type, collectors) in &self.routes {
            if event_type.trim().is_empty() {
                bail!("route event type must not be empty");
            }
            validate_collector_list(event_type, collectors)?;
        }
        Ok(())
    }

    /// Link every routed collector to its event type on the given hub.
    ///
    /// Names that are not registered degrade to the hub's warn-and-skip
    /// behavior, so a manifest can be applied before every backend is wired
    /// up without failing the rest of the routes.
    pub fn apply(&self, hub: &mut AnalyticsHub) {
        for (event_type, collectors) in &self.routes {
            for name in collectors {
                hub.add_registered_collector_to_event_type(event_type, name);
            }
        }
        info!(routes = self.routes.len(), "applied routing manifest");
    }
}

fn validate_collector_list(event_type: &str, collectors: &[String]) -> Result<()> {
    let mut seen = BTreeSet::new();

    for name in collectors {
        if name.trim().is_empty() {
            bail!("route {event_type:?} has an empty collector name");
        }
        if name.trim() != name {
            bail!("route {event_type:?} collector {name:?} has leading/trailing whitespace");
        }
        if !seen.insert(name.as_str()) {
            bail!("route {event_type:?} lists collector {name:?} twice");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use ahub_core::{AnalyticsCollector, Event};

    struct FakeCollector {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl AnalyticsCollector for FakeCollector {
        fn name(&self) -> &str {
            &self.name
        }

        fn record_event(&mut self, event: &Event) -> anyhow::Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, event.name()));
            Ok(())
        }
    }

    const MANIFEST: &str = r#"
[routes]
ENGAGEMENT = ["clickstream", "audit"]
OPERATIONAL = ["audit"]
"#;

    #[test]
    fn parses_routes() {
        let manifest = RoutingManifest::from_toml_str(MANIFEST).unwrap();
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes["ENGAGEMENT"], vec!["clickstream", "audit"]);
        assert_eq!(manifest.routes["OPERATIONAL"], vec!["audit"]);
    }

    #[test]
    fn empty_manifest_is_valid() {
        let manifest = RoutingManifest::from_toml_str("").unwrap();
        assert!(manifest.routes.is_empty());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = RoutingManifest::from_toml_str("default = \"x\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn rejects_duplicate_collector_in_route() {
        let err = RoutingManifest::from_toml_str("[routes]\nT = [\"a\", \"a\"]\n");
        assert!(err.unwrap_err().to_string().contains("twice"));
    }

    #[test]
    fn rejects_empty_collector_name() {
        let err = RoutingManifest::from_toml_str("[routes]\nT = [\"\"]\n");
        assert!(err.unwrap_err().to_string().contains("empty collector name"));
    }

    #[test]
    fn rejects_whitespace_collector_name() {
        let err = RoutingManifest::from_toml_str("[routes]\nT = [\" a\"]\n");
        assert!(err.unwrap_err().to_string().contains("whitespace"));
    }

    #[test]
    fn apply_links_registered_collectors() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hub = AnalyticsHub::new();
        hub.register_collector(Box::new(FakeCollector {
            name: "clickstream".into(),
            log: log.clone(),
        }));
        hub.register_collector(Box::new(FakeCollector {
            name: "audit".into(),
            log: log.clone(),
        }));

        let manifest = RoutingManifest::from_toml_str(MANIFEST).unwrap();
        manifest.apply(&mut hub);

        hub.record_event(&Event::new("e", None, "ENGAGEMENT"));
        assert_eq!(
            log.lock().unwrap().as_slice(),
            &["clickstream:e", "audit:e"]
        );
    }

    #[test]
    fn apply_skips_unregistered_names() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hub = AnalyticsHub::new();
        hub.register_collector(Box::new(FakeCollector {
            name: "audit".into(),
            log: log.clone(),
        }));

        let manifest = RoutingManifest::from_toml_str(MANIFEST).unwrap();
        manifest.apply(&mut hub);

        hub.record_event(&Event::new("e", None, "ENGAGEMENT"));
        assert_eq!(log.lock().unwrap().as_slice(), &["audit:e"]);
    }
}
