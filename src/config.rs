use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) json: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
}

impl Config {
    pub(crate) fn load() -> Self {
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/msgstats/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("msgstats").join("config.toml"));
        }

        // 2. Platform config dir (e.g. macOS Application Support)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("msgstats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.msgstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".msgstats.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            json = true
            no_color = true
            order = "desc"
            timezone = "Europe/Stockholm"
            "#,
        )
        .unwrap();
        assert!(config.json);
        assert!(config.no_color);
        assert_eq!(config.order, Some(ConfigSortOrder::Desc));
        assert_eq!(config.timezone.as_deref(), Some("Europe/Stockholm"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.json);
        assert!(!config.no_color);
        assert!(config.order.is_none());
        assert!(config.timezone.is_none());
    }

    #[test]
    fn unknown_order_value_fails() {
        assert!(toml::from_str::<Config>(r#"order = "sideways""#).is_err());
    }
}
