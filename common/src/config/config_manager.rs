use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a validated config once and caches it; writes go through validation too.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.to_string()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.config.lock().unwrap();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized)?;

        *self.config.lock().unwrap() = Some(config.clone());
        Ok(())
    }

    /// Drops the cached value so the next `get_config` re-reads the provider.
    pub fn invalidate(&self) {
        *self.config.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentConfigProvider;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct SampleConfig {
        interval_ms: u64,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self { interval_ms: 250 }
        }
    }

    impl Validate for SampleConfig {
        fn validate(&self) -> Result<(), String> {
            crate::config::validate_duration_ms("interval_ms", self.interval_ms)
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<MemoryContentConfigProvider, SampleConfig> {
        ConfigManager::new(
            MemoryContentConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_content_returns_default() {
        assert_eq!(manager(None).get_config().unwrap(), SampleConfig::default());
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        assert!(manager(Some("interval_ms: 0\n")).get_config().is_err());
        assert!(manager(Some("interval_ms: [1, 2]\n")).get_config().is_err());
    }

    #[test]
    fn test_set_then_get_returns_saved_value() {
        let manager = manager(None);
        let config = SampleConfig { interval_ms: 900 };
        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        manager.invalidate();
        assert_eq!(manager.get_config().unwrap(), config);
    }

    #[test]
    fn test_set_invalid_config_fails_without_caching() {
        let manager = manager(None);
        assert!(manager.set_config(&SampleConfig { interval_ms: 0 }).is_err());
        assert_eq!(manager.get_config().unwrap(), SampleConfig::default());
    }
}
