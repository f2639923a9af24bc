use media_scope::config::Config;
use media_scope::state::LibraryState;
use std::error::Error;

pub fn handle_init() -> Result<(), Box<dyn Error>> {
    // Check if already initialized
    if Config::exists()? {
        return Err(
            "media-scope is already initialized. Use 'mscope config view' to inspect it.".into(),
        );
    }

    let config = Config::new();
    config.save()?;

    let state_path = Config::state_path()?;
    if !state_path.exists() {
        LibraryState::default().save(&state_path)?;
    }

    println!("media-scope initialized successfully!");
    println!(
        "Configuration saved to: {}",
        Config::config_path()?.display()
    );
    println!("Library state: {}", state_path.display());
    println!("Add a scope with: mscope scope add <directory>");

    Ok(())
}
