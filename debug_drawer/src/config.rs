//! Overlay settings loaded from TOML.
//!
//! ```toml
//! gizmo_pass = false
//! circle_increments = 24
//! circle_color = [0.0, 1.0, 1.0, 1.0]
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Errors from loading an [`OverlayConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Defaults and mode switches for a [`DebugOverlay`](crate::DebugOverlay).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Color of lines, boxes and spheres when the caller gives none.
    pub default_color: Color,
    /// Color of circles when the caller gives none.
    pub circle_color: Color,
    /// Font size of text when the caller gives none.
    pub text_size: u32,
    pub circle_increments: u32,
    pub sphere_segments: u32,
    /// Whether an editor gizmo pass runs alongside the GUI pass.
    ///
    /// When `true`, text is never freed until a [`RenderPass::Gizmo`] has
    /// drawn it, so the host must render that pass every frame. When `false`,
    /// text only waits for the GUI pass before expiring.
    ///
    /// [`RenderPass::Gizmo`]: crate::RenderPass::Gizmo
    pub gizmo_pass: bool,
    /// Pop-up text rises by this many font sizes over its lifetime.
    pub pop_up_height: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            default_color: Color::WHITE,
            circle_color: Color::YELLOW,
            text_size: 12,
            circle_increments: 8,
            sphere_segments: 16,
            gizmo_pass: true,
            pop_up_height: 1.5,
        }
    }
}

impl OverlayConfig {
    /// Parse a config from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load a config, falling back to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded overlay config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("No overlay config ({e}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = OverlayConfig::from_toml_str("", Path::new("overlay.toml")).unwrap();
        assert_eq!(config, OverlayConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let text = r#"
            gizmo_pass = false
            circle_increments = 24
            circle_color = [0.0, 1.0, 1.0, 1.0]
        "#;
        let config = OverlayConfig::from_toml_str(text, Path::new("overlay.toml")).unwrap();
        assert!(!config.gizmo_pass);
        assert_eq!(config.circle_increments, 24);
        assert_eq!(config.circle_color, Color::CYAN);
        assert_eq!(config.sphere_segments, 16);
        assert_eq!(config.pop_up_height, 1.5);
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = OverlayConfig::from_toml_str("text_size = \"big\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/definitely/not/here/overlay.toml");
        assert!(matches!(
            OverlayConfig::load(path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(
            OverlayConfig::load_or_default(path),
            OverlayConfig::default()
        );
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "overlay_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "text_size = 20\npop_up_height = 2.0\n").unwrap();
        let config = OverlayConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.text_size, 20);
        assert_eq!(config.pop_up_height, 2.0);
    }
}
