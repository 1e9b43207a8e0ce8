//! Filesystem-backed GenerationSource.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! ├── map_20250213_120000/
//! │   ├── waypoints.xml    # named points, pixel coordinates
//! │   ├── map.yaml         # resolution + origin
//! │   └── map.pgm          # raster; only its presence is checked
//! └── map_20250214_093000/
//!     └── ...
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use voicenav_core::config::CatalogConfig;
use voicenav_core::error::{NavError, Result};
use voicenav_core::generation::MapGeneration;
use voicenav_core::source::GenerationSource;

use crate::dto::{load_coordinate_reference, parse_waypoints};

/// Naming convention of a generation directory and its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationLayout {
    pub folder_prefix: String,
    pub waypoints_filename: String,
    pub metadata_filename: String,
    pub image_filename: String,
}

impl Default for GenerationLayout {
    fn default() -> Self {
        Self::from(&CatalogConfig::default())
    }
}

impl From<&CatalogConfig> for GenerationLayout {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            folder_prefix: config.folder_prefix.clone(),
            waypoints_filename: config.waypoints_filename.clone(),
            metadata_filename: config.metadata_filename.clone(),
            image_filename: config.image_filename.clone(),
        }
    }
}

impl GenerationLayout {
    /// Artifacts that must all exist for a directory to be a generation.
    fn required_files(&self) -> [&str; 3] {
        [
            self.waypoints_filename.as_str(),
            self.metadata_filename.as_str(),
            self.image_filename.as_str(),
        ]
    }
}

/// Scans a base directory for generation folders.
pub struct FsGenerationSource {
    base_dir: PathBuf,
    layout: GenerationLayout,
}

impl FsGenerationSource {
    pub fn new(base_dir: impl Into<PathBuf>, layout: GenerationLayout) -> Self {
        Self {
            base_dir: base_dir.into(),
            layout,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Reads one generation directory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeneration` if a required artifact is missing or the
    /// waypoint list is not well-formed. A malformed coordinate reference is
    /// not an error.
    pub async fn read_generation(&self, dir: &Path) -> Result<MapGeneration> {
        let id = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| NavError::invalid_generation(dir.display().to_string(), "no directory name"))?;

        for file in self.layout.required_files() {
            if !fs::try_exists(dir.join(file)).await.unwrap_or(false) {
                return Err(NavError::invalid_generation(&id, format!("missing {}", file)));
            }
        }

        let xml = fs::read_to_string(dir.join(&self.layout.waypoints_filename)).await?;
        let raw = parse_waypoints(&xml)
            .map_err(|e| NavError::invalid_generation(&id, e.to_string()))?;
        let reference =
            load_coordinate_reference(&dir.join(&self.layout.metadata_filename)).await;

        Ok(MapGeneration::new(
            id,
            &self.layout.folder_prefix,
            dir,
            reference,
            raw,
        ))
    }

    /// Reads the generation named `id` under the base directory.
    pub async fn read_by_id(&self, id: &str) -> Result<MapGeneration> {
        let dir = self.base_dir.join(id);
        if !id.starts_with(&self.layout.folder_prefix) || !is_dir(&dir).await {
            return Err(NavError::not_found("generation", id));
        }
        self.read_generation(&dir).await
    }

    /// Candidate directories (name has the prefix), unsorted.
    pub async fn candidate_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.base_dir.display(), "maps directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if !name.to_string_lossy().starts_with(&self.layout.folder_prefix) {
                continue;
            }
            let path = entry.path();
            if is_dir(&path).await {
                dirs.push(path);
            }
        }
        Ok(dirs)
    }
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Total size in bytes of all regular files below `path`.
pub async fn directory_size(path: &Path) -> Result<u64> {
    let mut total = 0;
    let mut pending = vec![path.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if metadata.is_dir() {
                pending.push(entry.path());
            } else if metadata.is_file() {
                total += metadata.len();
            }
        }
    }
    Ok(total)
}

#[async_trait]
impl GenerationSource for FsGenerationSource {
    async fn scan(&self) -> Result<Vec<MapGeneration>> {
        let mut generations = Vec::new();
        for dir in self.candidate_dirs().await? {
            match self.read_generation(&dir).await {
                Ok(generation) => generations.push(generation),
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "skipping generation");
                }
            }
        }
        tracing::debug!(
            base = %self.base_dir.display(),
            count = generations.len(),
            "scanned generations"
        );
        Ok(generations)
    }

    fn describe(&self) -> String {
        self.base_dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use voicenav_core::generation::WorldPoint;

    const WAYPOINTS: &str = r#"<Waypoints>
  <Waypoint><Name>Living Room</Name><Pos_x>100</Pos_x><Pos_y>200</Pos_y></Waypoint>
  <Waypoint><Name>Kitchen</Name><Pos_x>0</Pos_x><Pos_y>0</Pos_y></Waypoint>
</Waypoints>"#;

    fn write_generation(base: &Path, name: &str, yaml: Option<&str>, image: bool) -> PathBuf {
        let dir = base.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("waypoints.xml"), WAYPOINTS).unwrap();
        if let Some(yaml) = yaml {
            std::fs::write(dir.join("map.yaml"), yaml).unwrap();
        }
        if image {
            std::fs::write(dir.join("map.pgm"), b"P5\n1 1\n255\n\0").unwrap();
        }
        dir
    }

    fn source(base: &Path) -> FsGenerationSource {
        FsGenerationSource::new(base, GenerationLayout::default())
    }

    #[tokio::test]
    async fn test_scan_reads_valid_generations() {
        let temp = TempDir::new().unwrap();
        write_generation(
            temp.path(),
            "map_20250213_120000",
            Some("resolution: 0.05\norigin: [-10.0, -10.0, 0.0]\n"),
            true,
        );

        let generations = source(temp.path()).scan().await.unwrap();
        assert_eq!(generations.len(), 1);

        let generation = &generations[0];
        assert_eq!(generation.id(), "map_20250213_120000");
        assert_eq!(
            generation.waypoint("living room").unwrap().world,
            WorldPoint { x: -5.0, y: 0.0, z: 0.0 }
        );
        assert_eq!(
            generation.waypoint("kitchen").unwrap().world,
            WorldPoint { x: -10.0, y: -10.0, z: 0.0 }
        );
    }

    #[tokio::test]
    async fn test_scan_skips_incomplete_and_foreign_dirs() {
        let temp = TempDir::new().unwrap();
        write_generation(temp.path(), "map_20250101_000000", Some("resolution: 0.05\n"), false);
        write_generation(temp.path(), "map_20250102_000000", None, true);
        write_generation(temp.path(), "backup_20250103_000000", Some("resolution: 0.05\n"), true);
        std::fs::write(temp.path().join("map_notes.txt"), "not a dir").unwrap();

        let generations = source(temp.path()).scan().await.unwrap();
        assert!(generations.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_waypoints_exclude_generation() {
        let temp = TempDir::new().unwrap();
        let dir = write_generation(temp.path(), "map_20250101_000000", Some("resolution: 0.05\n"), true);
        std::fs::write(dir.join("waypoints.xml"), "<Waypoints><Waypoint>").unwrap();

        let err = source(temp.path()).read_generation(&dir).await.unwrap_err();
        assert!(matches!(err, NavError::InvalidGeneration { .. }));
        assert!(source(temp.path()).scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_reference_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        write_generation(temp.path(), "map_20250101_000000", Some(": : :\n  - ["), true);

        let generations = source(temp.path()).scan().await.unwrap();
        assert_eq!(
            generations[0].waypoint("living room").unwrap().world,
            WorldPoint { x: -5.0, y: 0.0, z: 0.0 }
        );
    }

    #[tokio::test]
    async fn test_missing_base_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let generations = source(&temp.path().join("nope")).scan().await.unwrap();
        assert!(generations.is_empty());
    }

    #[tokio::test]
    async fn test_read_by_id() {
        let temp = TempDir::new().unwrap();
        write_generation(temp.path(), "map_20250101_000000", Some("resolution: 0.1\n"), true);
        let source = source(temp.path());

        let generation = source.read_by_id("map_20250101_000000").await.unwrap();
        assert_eq!(generation.reference().resolution, 0.1);
        assert!(source.read_by_id("map_missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_directory_size() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a"), [0u8; 10]).unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("sub").join("b"), [0u8; 5]).unwrap();
        assert_eq!(directory_size(temp.path()).await.unwrap(), 15);
    }
}
