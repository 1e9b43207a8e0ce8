use anyhow::Result;
use colored::Colorize;

use voicenav_core::{NavConfig, RoomResolver};

pub fn run(config: &NavConfig, phrase: &str) -> Result<()> {
    let resolution = RoomResolver::new().resolve(phrase);

    let Some(category) = resolution.category else {
        println!("{}", "no room detected".yellow());
        return Ok(());
    };

    println!(
        "{} ({}) confidence {:.2}",
        category.to_string().green(),
        category.display_name(&config.resolver.display_language),
        resolution.confidence
    );
    if resolution.confidence < config.resolver.confidence_threshold {
        let note = if config.resolver.enforce_threshold {
            "below threshold, would be rejected"
        } else {
            "below threshold"
        };
        println!(
            "{}",
            format!("{} ({:.2})", note, config.resolver.confidence_threshold).bright_black()
        );
    }

    Ok(())
}
