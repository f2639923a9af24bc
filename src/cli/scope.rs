use super::session::Session;
use media_scope::utils::validation::{expand_path, validate_scope_root};
use owo_colors::OwoColorize;
use std::error::Error;
use std::fs;

pub fn handle_scope_add(path: &str) -> Result<(), Box<dyn Error>> {
    let path = expand_path(path)?;
    validate_scope_root(&path)?;
    let path = fs::canonicalize(&path)?;

    let mut session = Session::open()?;
    let id = session.library.add_scope(&path)?;
    session.library.rescan_all(session.config.recursive_scan);
    session.save()?;

    let count = session.library.tree(id).map_or(0, |tree| tree.file_count());
    println!(
        "{} Added scope {} ({count} files)",
        "✓".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

pub fn handle_scope_remove(path: &str) -> Result<(), Box<dyn Error>> {
    let path = expand_path(path)?;
    let path = fs::canonicalize(&path).unwrap_or(path);

    let mut session = Session::open()?;
    if !session.library.remove_scope(&path) {
        return Err(format!(
            "{} Not a configured scope: {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    }
    let pruned = session.library.prune_playlists();
    session.save()?;

    println!("{} Removed scope {}", "✓".green(), path.display());
    if pruned > 0 {
        println!("  dropped {pruned} playlist entries from that scope");
    }
    Ok(())
}

pub fn handle_scope_list() -> Result<(), Box<dyn Error>> {
    let session = Session::open()?;

    if session.library.scopes().is_empty() {
        println!("No scopes configured. Add one with: mscope scope add <directory>");
        return Ok(());
    }

    for tree in session.library.scopes() {
        println!(
            "{}  {} {}",
            tree.location().display().to_string().cyan(),
            tree.file_count(),
            "files".bright_black()
        );
    }
    Ok(())
}
