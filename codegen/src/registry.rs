use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{CodegenError, Result};
use crate::plugin::ComponentPlatform;

/// Platform registry keyed by domain, then platform name
#[derive(Default)]
pub struct PlatformRegistry {
    platforms: BTreeMap<String, BTreeMap<String, Arc<dyn ComponentPlatform>>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// [`CodegenError::DuplicatePlatform`] if the name is taken in its domain.
    pub fn register(&mut self, platform: Arc<dyn ComponentPlatform>) -> Result<()> {
        let domain = platform.domain().to_string();
        let name = platform.name().to_string();
        let entries = self.platforms.entry(domain.clone()).or_default();
        if entries.contains_key(&name) {
            return Err(CodegenError::DuplicatePlatform {
                domain,
                platform: name,
            });
        }
        tracing::debug!(domain = %domain, platform = %name, "registered platform");
        entries.insert(name, platform);
        Ok(())
    }

    /// # Errors
    ///
    /// [`CodegenError::UnknownPlatform`] when nothing is registered under the name.
    pub fn get(&self, domain: &str, name: &str) -> Result<Arc<dyn ComponentPlatform>> {
        self.platforms
            .get(domain)
            .and_then(|entries| entries.get(name))
            .cloned()
            .ok_or_else(|| CodegenError::UnknownPlatform {
                domain: domain.to_string(),
                platform: name.to_string(),
            })
    }

    pub fn has_domain(&self, domain: &str) -> bool {
        self.platforms.contains_key(domain)
    }

    pub fn list_domains(&self) -> Vec<String> {
        self.platforms.keys().cloned().collect()
    }

    pub fn list_platforms(&self, domain: &str) -> Vec<String> {
        self.platforms
            .get(domain)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::ComponentConfig;
    use crate::types::ClassRef;
    use serde_yaml::Value;

    struct Dummy(&'static str);

    impl ComponentPlatform for Dummy {
        fn name(&self) -> &str {
            self.0
        }

        fn domain(&self) -> &str {
            "display"
        }

        fn class(&self) -> ClassRef {
            ClassRef::new("dummy", "Dummy")
        }

        fn validate(&self, _config: &Value) -> config_schema::Result<Box<dyn ComponentConfig>> {
            Err(config_schema::ValidationError::new("dummy"))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = PlatformRegistry::new();
        registry.register(Arc::new(Dummy("b"))).unwrap();
        registry.register(Arc::new(Dummy("a"))).unwrap();

        assert!(registry.has_domain("display"));
        assert!(!registry.has_domain("sensor"));
        assert_eq!(registry.list_domains(), ["display"]);
        assert_eq!(registry.list_platforms("display"), ["a", "b"]);
        assert_eq!(registry.get("display", "a").unwrap().name(), "a");
    }

    #[test]
    fn test_unknown_and_duplicate_platforms() {
        let mut registry = PlatformRegistry::new();
        registry.register(Arc::new(Dummy("a"))).unwrap();
        assert!(matches!(
            registry.register(Arc::new(Dummy("a"))),
            Err(CodegenError::DuplicatePlatform { .. })
        ));
        let err = registry.get("display", "ssd1306").err().unwrap();
        assert_eq!(err.to_string(), "Platform not found: 'display.ssd1306'");
    }
}
