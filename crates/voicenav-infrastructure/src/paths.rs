//! Path resolution for voicenav configuration and map directories.

use std::path::{Path, PathBuf};

/// Environment variable naming the ROS workspace relative map paths hang off.
pub const ROS_WORKSPACE_ENV: &str = "ROS_WORKSPACE";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
    /// Platform configuration directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path management for voicenav.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/voicenav/          # Config directory
/// └── config.toml              # Application configuration
///
/// $ROS_WORKSPACE/              # Defaults to ~/catkin_ws
/// └── <catalog.maps_path>/     # Generation folders (map_YYYYMMDD_HHMMSS)
/// ```
pub struct VoicenavPaths;

impl VoicenavPaths {
    /// Returns the voicenav configuration directory (e.g., `~/.config/voicenav/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("voicenav"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns `$ROS_WORKSPACE`, or `~/catkin_ws` when unset.
    pub fn ros_workspace() -> Result<PathBuf, PathError> {
        match std::env::var_os(ROS_WORKSPACE_ENV) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(home_dir()?.join("catkin_ws")),
        }
    }

    /// Resolves the configured maps path.
    ///
    /// - absolute paths are returned as-is
    /// - `~` / `~/...` are expanded against the home directory
    /// - anything else is joined onto [`Self::ros_workspace`]
    pub fn resolve_maps_path(raw: &str) -> Result<PathBuf, PathError> {
        if Path::new(raw).is_absolute() {
            return Ok(PathBuf::from(raw));
        }
        if raw.starts_with('~') {
            return resolve_maps_path_with(raw, &home_dir()?, Path::new(""));
        }
        resolve_maps_path_with(raw, Path::new(""), &Self::ros_workspace()?)
    }
}

fn home_dir() -> Result<PathBuf, PathError> {
    dirs::home_dir().ok_or(PathError::HomeDirNotFound)
}

/// Pure form of [`VoicenavPaths::resolve_maps_path`] with explicit roots.
pub fn resolve_maps_path_with(raw: &str, home: &Path, workspace: &Path) -> Result<PathBuf, PathError> {
    if Path::new(raw).is_absolute() {
        return Ok(PathBuf::from(raw));
    }
    if let Some(rest) = raw.strip_prefix('~') {
        let rest = rest.trim_start_matches('/');
        return Ok(if rest.is_empty() {
            home.to_path_buf()
        } else {
            home.join(rest)
        });
    }
    Ok(workspace.join(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        if let Ok(config_file) = VoicenavPaths::config_file() {
            assert!(config_file.ends_with("voicenav/config.toml"));
        }
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let path = resolve_maps_path_with("/data/maps", Path::new("/home/u"), Path::new("/ws")).unwrap();
        assert_eq!(path, PathBuf::from("/data/maps"));
    }

    #[test]
    fn test_home_path_is_expanded() {
        let path = resolve_maps_path_with("~/maps", Path::new("/home/u"), Path::new("/ws")).unwrap();
        assert_eq!(path, PathBuf::from("/home/u/maps"));
        let path = resolve_maps_path_with("~", Path::new("/home/u"), Path::new("/ws")).unwrap();
        assert_eq!(path, PathBuf::from("/home/u"));
    }

    #[test]
    fn test_relative_path_joins_workspace() {
        let path = resolve_maps_path_with(
            "src/clip_sam_semantic_mapping/results/waypoints",
            Path::new("/home/u"),
            Path::new("/home/u/catkin_ws"),
        )
        .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/u/catkin_ws/src/clip_sam_semantic_mapping/results/waypoints")
        );
    }
}
