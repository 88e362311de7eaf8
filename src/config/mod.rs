mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    config.library.path = expand_path(&config.library.path);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = ["./vidsplit.toml", "~/.config/vidsplit/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    config.library.path = expand_path(&config.library.path);
    Ok(config)
}

/// Expand a leading tilde in a configured path
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy().into_owned();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.as_ref())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.split.max_seconds == 0 {
        anyhow::bail!("split.max_seconds cannot be 0");
    }

    if config.split.confirm_threshold == 0 {
        anyhow::bail!("split.confirm_threshold cannot be 0");
    }

    for (name, tool) in [
        ("ffmpeg", &config.tools.ffmpeg),
        ("ffprobe", &config.tools.ffprobe),
    ] {
        if let Some(path) = tool {
            if !path.exists() {
                tracing::warn!("Configured {} path does not exist: {:?}", name, path);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidsplit_av::Container;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.split.max_seconds, 60);
        assert_eq!(config.split.confirm_threshold, 10);
        assert_eq!(config.split.container, Container::Mp4);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.split.max_seconds, 60);
        assert!(config.tools.ffmpeg.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [library]
            path = "/srv/media/segments"

            [split]
            max_seconds = 30
            confirm_threshold = 5
            container = "mov"

            [tools]
            ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
            "#,
        )
        .unwrap();

        assert_eq!(config.library.path, PathBuf::from("/srv/media/segments"));
        assert_eq!(config.split.max_seconds, 30);
        assert_eq!(config.split.confirm_threshold, 5);
        assert_eq!(config.split.container, Container::Mov);
        assert_eq!(
            config.tools.ffmpeg,
            Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
        );
    }

    #[test]
    fn test_zero_max_seconds_rejected() {
        let config: Config = toml::from_str("[split]\nmax_seconds = 0\n").unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path(Path::new("~/Videos/vidsplit"));
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
