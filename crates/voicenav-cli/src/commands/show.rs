use anyhow::Result;
use colored::Colorize;

use voicenav_core::NavConfig;

pub async fn run(config: &NavConfig, id: &str) -> Result<()> {
    let source = super::generation_source(config)?;
    let generation = source.read_by_id(id).await?;
    let reference = generation.reference();

    println!("{}", generation.id().bright_cyan().bold());
    println!("  path:       {}", generation.path().display());
    println!("  created:    {}", generation.display_time());
    println!("  resolution: {} m/px", reference.resolution);
    println!(
        "  origin:     ({}, {})",
        reference.origin_x, reference.origin_y
    );

    if generation.waypoints().is_empty() {
        println!("{}", "  no waypoints".yellow());
        return Ok(());
    }

    println!("  waypoints:");
    for waypoint in generation.waypoints() {
        println!(
            "    {:<16} pixel ({:.1}, {:.1}) -> world ({:.3}, {:.3})",
            waypoint.label.green(),
            waypoint.pixel.x,
            waypoint.pixel.y,
            waypoint.world.x,
            waypoint.world.y
        );
    }

    Ok(())
}
