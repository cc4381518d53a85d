use crate::error::ConfigurationError;
use crate::util;
use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub static DEFAULT_SUPER_ADMIN_NAME: &str = "SuperAdmin";

fn default_super_admin() -> Uuid {
    env::var("SUPER_ADMIN_ID")
        .ok()
        .and_then(|id| Uuid::parse_str(id.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn default_super_admin_name() -> String {
    env::var("SUPER_ADMIN_NAME").unwrap_or_else(|_| DEFAULT_SUPER_ADMIN_NAME.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    file_path: PathBuf,

    /// Identity registered as the initial admin when the registry is deployed.
    /// Required in the file, generated only when no file exists yet.
    pub super_admin: Uuid,
    #[serde(default = "default_super_admin_name")]
    pub super_admin_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: config_dir().join("settings.yml"),
            super_admin: default_super_admin(),
            super_admin_name: default_super_admin_name(),
        }
    }
}

#[inline]
fn config_dir() -> PathBuf {
    PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "./config".to_string()))
}

impl Config {
    pub fn load() -> Result<Config, ConfigurationError> {
        let config_file = util::find_first_subpath(
            config_dir(),
            &["settings.yml", "settings.yaml"],
            Path::exists,
        )
        .ok_or_else(|| ConfigurationError::NotFound(config_dir()))?;

        let file = File::open(&config_file)?;
        let mut config: Config = serde_yaml::from_reader(BufReader::new(file))?;
        config.file_path = config_file;

        Ok(config)
    }

    pub fn from_yaml(source: &str) -> Result<Config, ConfigurationError> {
        let mut config: Config = serde_yaml::from_str(source)?;
        config.file_path = config_dir().join("settings.yml");
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigurationError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.file_path)?;
        let mut out = BufWriter::new(file);
        serde_yaml::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_super_admin_from_yaml() {
        let id = Uuid::new_v4();
        let config = Config::from_yaml(&format!(
            "super_admin: {}\nsuper_admin_name: Rector\n",
            id
        ))
        .expect("valid configuration");

        assert_eq!(config.super_admin, id);
        assert_eq!(config.super_admin_name, "Rector");
    }

    #[test]
    fn super_admin_must_be_configured() {
        let result = Config::from_yaml("super_admin_name: Rector\n");
        assert!(matches!(result, Err(ConfigurationError::Yaml(_))));
    }

    #[test]
    fn rejects_malformed_identity() {
        let result = Config::from_yaml("super_admin: not-a-uuid\n");
        assert!(matches!(result, Err(ConfigurationError::Yaml(_))));
    }
}
