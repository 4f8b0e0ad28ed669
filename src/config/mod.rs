use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".bill_planner";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Combined effective state plus federal rate assumed when the user
/// has not configured one.
const DEFAULT_TAX_RATE: f64 = 0.1876;
const DEFAULT_TIMEZONE: &str = "America/Denver";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Flat effective tax rate applied when grossing up bill costs.
    pub tax_rate: f64,
    /// Timezone path passed to the world-time service.
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            timezone: DEFAULT_TIMEZONE.into(),
        }
    }
}

/// Returns the application data directory, defaulting to
/// `~/.bill_planner`. `BILL_PLANNER_HOME` overrides it.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BILL_PLANNER_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Loads the persisted configuration, defaulting when no file has
    /// been written yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load defaults");
        assert_eq!(config.tax_rate, DEFAULT_TAX_RATE);
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
    }

    #[test]
    fn config_roundtrips_through_file() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = Config {
            tax_rate: 0.22,
            timezone: "Europe/Lisbon".into(),
        };
        manager.save(&config).expect("save config");
        let loaded = manager.load().expect("reload config");
        assert_eq!(loaded.tax_rate, 0.22);
        assert_eq!(loaded.timezone, "Europe/Lisbon");
    }
}
