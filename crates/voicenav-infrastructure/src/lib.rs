pub mod config_service;
pub mod dto;
pub mod fs_generation_source;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::fs_generation_source::{FsGenerationSource, GenerationLayout, directory_size};
pub use crate::paths::VoicenavPaths;
