pub mod list;
pub mod resolve;
pub mod serve;
pub mod show;

use anyhow::{Context, Result};

use voicenav_core::NavConfig;
use voicenav_infrastructure::{FsGenerationSource, GenerationLayout, VoicenavPaths};

/// Builds the filesystem source described by `config.catalog`.
pub fn generation_source(config: &NavConfig) -> Result<FsGenerationSource> {
    let base_dir = VoicenavPaths::resolve_maps_path(&config.catalog.maps_path)
        .with_context(|| format!("Failed to resolve maps path {}", config.catalog.maps_path))?;
    Ok(FsGenerationSource::new(
        base_dir,
        GenerationLayout::from(&config.catalog),
    ))
}
