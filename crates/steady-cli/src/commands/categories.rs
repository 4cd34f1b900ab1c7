//! Category map inspection

use anyhow::{Context, Result};

use steady_core::CategoryMap;

pub fn cmd_categories() -> Result<()> {
    let map = CategoryMap::load().context("Failed to load category map")?;

    println!();
    println!("🏷️  Category keyword map");
    println!("   ─────────────────────────────────────────────────────────────");

    for rule in map.rules() {
        println!("   {:<16} {}", rule.category.label(), rule.keywords.join(", "));
    }

    println!();
    println!("   Unmatched categories fall back to: {}", map.fallback().label());
    println!("   Override with a categories.toml in your platform data dir.");
    println!();

    Ok(())
}
