use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use voicenav_core::{Catalog, GenerationSource, NavConfig};
use voicenav_infrastructure::directory_size;

pub async fn run(config: &NavConfig, limit: usize) -> Result<()> {
    let source = super::generation_source(config)?;
    let generations = source.scan().await?;
    let catalog = Catalog::new(generations.into_iter().map(Arc::new).collect(), None);

    if catalog.is_empty() {
        println!(
            "{}",
            format!("No map generations found in {}", source.base_dir().display()).yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Map generations in {}", source.base_dir().display()).bold()
    );
    for (i, generation) in catalog.generations().iter().take(limit).enumerate() {
        let size = match directory_size(generation.path()).await {
            Ok(size) => format_size(size),
            Err(e) => {
                tracing::debug!(generation = %generation.id(), error = %e, "size unavailable");
                "?".to_string()
            }
        };
        let marker = if i == 0 {
            format!(" {}", "(latest)".green())
        } else {
            String::new()
        };

        println!("{:>3}. {}{}", i + 1, generation.id().bright_cyan(), marker);
        println!(
            "     created: {}  rooms: {}  size: {}",
            generation.display_time(),
            generation.waypoints().len(),
            size
        );
    }

    if catalog.len() > limit {
        println!(
            "{}",
            format!("... and {} more", catalog.len() - limit).bright_black()
        );
    }

    Ok(())
}

/// Human-readable byte count using binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_size_caps_at_gigabytes() {
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024), "2048.0 GB");
    }
}
