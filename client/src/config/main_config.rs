use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};

use super::{ReconnectConfig, ServerConfig, UiConfig};

const CONFIG_FILE_NAME: &str = "board_games_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>
{
    ConfigManager::from_yaml_file(&get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub reconnect: ReconnectConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub player_name: Option<String>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.reconnect.validate()?;
        self.ui.validate()?;
        if let Some(name) = &self.player_name
            && name.trim().is_empty()
        {
            return Err("player_name must not be blank if provided".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};
    use common::id_generator::generate_player_name;

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_board_games_client_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_file() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path);

        let serialized_string = serializer.serialize(&default_config).unwrap();
        assert!(content_provider.set_config_content(&serialized_string).is_ok());

        let read_string = content_provider.get_config_content().unwrap().unwrap();
        let deserialized_config = serializer.deserialize(&read_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_round_trips_through_manager() {
        let config = Config {
            player_name: Some(generate_player_name()),
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let manager = ConfigManager::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new());

        assert!(manager.set_config(&config).is_ok());
        assert_eq!(manager.get_config().unwrap(), config);
        assert_eq!(manager.get_config().unwrap(), config);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let content_provider = FileContentConfigProvider::new("this_file_does_not_exist.yaml".to_string());
        let manager: ConfigManager<_, Config, _> = ConfigManager::new(content_provider, YamlConfigSerializer::new());
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_fills_optional_sections() {
        let content = r#"
            server:
              base_url: "https://games.example.org"
        "#;
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path);
        content_provider.set_config_content(content).unwrap();

        let manager: ConfigManager<_, Config, _> = ConfigManager::new(content_provider, YamlConfigSerializer::new());
        let config = manager.get_config().unwrap();
        assert_eq!(config.server.base_url, "https://games.example.org");
        assert_eq!(config.server.socket_path, "/ws/game/");
        assert_eq!(config.reconnect, ReconnectConfig::default());
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            server:
              base_url: "ftp://games.example.org"
            reconnect:
              initial_delay_ms: 2000
              multiplier: 1.5
              max_delay_ms: 30000
              expired_close_code: 4000
        "#;

        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path);
        content_provider.set_config_content(invalid_config_content).unwrap();

        let manager: ConfigManager<_, Config, _> = ConfigManager::new(content_provider, YamlConfigSerializer::new());
        assert!(manager.get_config().is_err());
    }
}
