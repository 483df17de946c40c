use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use nodewire::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = if path.exists() {
        println!("{} {}", "Config file:".dimmed(), path.display());
        Config::load_from(&path)?
    } else {
        println!(
            "{} {} {}",
            "Config file:".dimmed(),
            path.display(),
            "(not created yet, showing defaults)".yellow()
        );
        Config::default()
    };

    println!();
    println!("{}", "Defaults".bold());
    println!("  theme:         {}", config.theme());
    println!("  debug_overlay: {}", config.debug_overlay());
    println!("  segments:      {}", config.segments());
    println!("  hit_width:     {}", config.hit_width());

    println!();
    println!("{}", "Resolved style".bold());
    let style = config.resolved_style()?;
    print!("{}", serde_yaml::to_string(&style)?);
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    config.resolved_style()?;
    let path = config.save()?;
    println!(
        "{} {key} = {value} {}",
        "Set".green().bold(),
        format!("({})", path.display()).dimmed()
    );
    Ok(())
}
