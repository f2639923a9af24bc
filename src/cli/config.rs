use media_scope::config::Config;
use owo_colors::OwoColorize;
use std::error::Error;
use std::process::Command;

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    println!("Current media-scope configuration:");
    println!("  recursive_scan: {}", config.recursive_scan);
    println!("  playlist_sort_mode: {}", config.playlist_sort_mode);
    println!("  log_level: {}", config.log_level);
    println!(
        "  log_file: {}",
        config.log_file.as_deref().unwrap_or("(none)")
    );
    println!("  state: {}", Config::state_path()?.display());

    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    config.set_value(key, value)?;
    config.save()?;

    println!("Configuration updated: {key} = {value}");

    Ok(())
}

pub fn handle_config_edit() -> Result<(), Box<dyn Error>> {
    if !Config::exists()? {
        return Err("media-scope not initialized. Run 'mscope init' first.".into());
    }

    let config_path = Config::config_path()?;
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} in {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("Editor '{editor}' not found. Set $EDITOR to a valid editor path.")
            } else {
                format!("Failed to launch editor '{editor}': {e}")
            }
        })?;

    if !status.success() {
        return Err(format!("Editor '{editor}' exited with error").into());
    }

    let mut config = Config::load().map_err(|e| format!("{} {e}", "Invalid configuration:".red()))?;
    let level = config.log_level.clone();
    config
        .set_value("log_level", &level)
        .map_err(|e| format!("{} {e}", "Invalid configuration:".red()))?;

    println!("{}", "Configuration saved".green());
    Ok(())
}
