use crate::commands::{CmdMessage, CmdResult};
use crate::config::{SiteConfig, CONFIG_KEYS};
use crate::error::{AutopulseError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = SiteConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key).ok_or_else(|| {
                AutopulseError::Api(format!(
                    "Unknown config key: {} (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                ))
            })?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("{} set to {}", key, value)));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_persists_value() {
        let dir = TempDir::new().unwrap();
        run(
            dir.path(),
            ConfigAction::Set("site-name".into(), "Pulse".into()),
        )
        .unwrap();

        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap().site_name, "Pulse");
    }

    #[test]
    fn show_key_and_unknown_key() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("origin".into())).unwrap();
        assert_eq!(result.messages[0].content, "origin = http://localhost:3000");

        assert!(run(dir.path(), ConfigAction::ShowKey("nope".into())).is_err());
        assert!(run(dir.path(), ConfigAction::Set("nope".into(), "x".into())).is_err());
    }
}
