use anyhow::{anyhow, Result};
use std::str::FromStr;

pub const ENV_WIDTH: &str = "ELEVATED_WIDTH";
pub const ENV_HEIGHT: &str = "ELEVATED_HEIGHT";
pub const ENV_TITLE: &str = "ELEVATED_TITLE";
pub const ENV_VSYNC: &str = "ELEVATED_VSYNC";

/// Window and context settings used by [`crate::system::System::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub title: String,
    // major, minor
    pub gl_version: (u8, u8),
    pub resizable: bool,
    pub vsync: bool,
    // r, g, b, a
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 800,
            height: 600,
            title: "Elevated".to_string(),
            gl_version: (4, 1),
            resizable: true,
            vsync: true,
            clear_color: [0.5, 0.5, 0.5, 1.0],
        }
    }
}

impl Config {
    /// Defaults overridden by the `ELEVATED_*` environment variables.
    pub fn from_env() -> Result<Config> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(v) = lookup(ENV_WIDTH) {
            cfg.width = parse_size(ENV_WIDTH, &v)?;
        }
        if let Some(v) = lookup(ENV_HEIGHT) {
            cfg.height = parse_size(ENV_HEIGHT, &v)?;
        }
        if let Some(v) = lookup(ENV_TITLE) {
            cfg.title = v;
        }
        if let Some(v) = lookup(ENV_VSYNC) {
            cfg.vsync = parse_bool(ENV_VSYNC, &v)?;
        }

        Ok(cfg)
    }
}

fn parse_size(name: &str, value: &str) -> Result<u32> {
    match u32::from_str(value.trim()) {
        Ok(0) => Err(anyhow!("{name}: window dimension must be non-zero")),
        Ok(v) => Ok(v),
        Err(e) => Err(anyhow!("{name}: invalid value '{value}': {e}")),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{name}: expected a boolean, got '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_the_classic_triangle_window() {
        let cfg = Config::default();
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert_eq!(cfg.title, "Elevated");
        assert_eq!(cfg.gl_version, (4, 1));
        assert!(cfg.resizable);
        assert_eq!(cfg.clear_color, [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn no_overrides_yields_defaults() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = Config::from_lookup(lookup_from(&[
            (ENV_WIDTH, "1024"),
            (ENV_HEIGHT, " 768 "),
            (ENV_TITLE, "tri"),
            (ENV_VSYNC, "off"),
        ]))
        .unwrap();
        assert_eq!(cfg.width, 1024);
        assert_eq!(cfg.height, 768);
        assert_eq!(cfg.title, "tri");
        assert!(!cfg.vsync);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[(ENV_HEIGHT, "0")])).unwrap_err();
        assert!(err.to_string().contains(ENV_HEIGHT));
    }

    #[test]
    fn garbage_values_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[(ENV_WIDTH, "wide")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_VSYNC, "maybe")])).is_err());
    }
}
