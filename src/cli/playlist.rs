use super::session::Session;
use media_scope::navigation;
use media_scope::{Library, Playlist, SortMode};
use owo_colors::OwoColorize;
use std::error::Error;

fn find<'a>(library: &'a Library, name: &str) -> Result<&'a Playlist, Box<dyn Error>> {
    library
        .playlist(name)
        .ok_or_else(|| format!("{} No playlist named '{name}'", "Error:".red().bold()).into())
}

pub fn handle_playlist_new(name: &str, sort: Option<SortMode>) -> Result<(), Box<dyn Error>> {
    let mut session = Session::open()?;
    let sort = sort.unwrap_or(session.config.playlist_sort_mode);
    session.library.create_playlist(name, sort)?;
    session.save()?;

    println!("{} Created playlist {}", "✓".green(), name.cyan());
    Ok(())
}

pub fn handle_playlist_delete(name: &str) -> Result<(), Box<dyn Error>> {
    let mut session = Session::open()?;
    if session.library.remove_playlist(name).is_none() {
        return Err(format!("{} No playlist named '{name}'", "Error:".red().bold()).into());
    }
    session.save()?;

    println!("{} Deleted playlist {}", "✓".green(), name);
    Ok(())
}

pub fn handle_playlist_list() -> Result<(), Box<dyn Error>> {
    let session = Session::open()?;

    if session.library.playlists().is_empty() {
        println!("No playlists. Create one with: mscope playlist new <name>");
        return Ok(());
    }
    for playlist in session.library.playlists() {
        let reverse = if playlist.reverse { ", reversed" } else { "" };
        println!(
            "{}  {} {}",
            playlist.name.cyan(),
            playlist.len(),
            format!("files ({}{reverse})", playlist.sort_mode).bright_black()
        );
    }
    Ok(())
}

pub fn handle_playlist_show(name: &str) -> Result<(), Box<dyn Error>> {
    let session = Session::open()?;
    let playlist = find(&session.library, name)?;

    println!("{}", playlist.name.cyan().bold());
    for (index, id) in playlist.iter().enumerate() {
        if let Some(file) = session.library.file(id) {
            println!(
                "{:>3}  {}  {}",
                index + 1,
                file.name(),
                file.location().display().to_string().bright_black()
            );
        }
    }
    Ok(())
}

pub fn handle_playlist_add(name: &str, files: &[String]) -> Result<(), Box<dyn Error>> {
    let mut session = Session::open()?;
    let ids = files
        .iter()
        .map(|file| session.resolve_file(file))
        .collect::<Result<Vec<_>, _>>()?;

    let playlist = session
        .library
        .playlist_mut(name)
        .ok_or_else(|| format!("{} No playlist named '{name}'", "Error:".red().bold()))?;
    let added = ids.into_iter().filter(|&id| playlist.add(id)).count();
    session.save()?;

    println!("{} Added {added} file(s) to {}", "✓".green(), name.cyan());
    Ok(())
}

pub fn handle_playlist_remove(name: &str, file: &str) -> Result<(), Box<dyn Error>> {
    let mut session = Session::open()?;
    let id = session.resolve_file(file)?;

    let playlist = session
        .library
        .playlist_mut(name)
        .ok_or_else(|| format!("{} No playlist named '{name}'", "Error:".red().bold()))?;
    let removed = playlist.remove(id);
    session.save()?;

    println!("{} Removed {removed} entry(ies) from {}", "✓".green(), name.cyan());
    Ok(())
}

pub fn handle_playlist_sort(
    name: &str,
    sort: Option<SortMode>,
    reverse: Option<bool>,
) -> Result<(), Box<dyn Error>> {
    let mut session = Session::open()?;
    let playlist = session
        .library
        .playlist_mut(name)
        .ok_or_else(|| format!("{} No playlist named '{name}'", "Error:".red().bold()))?;
    if let Some(sort) = sort {
        playlist.sort_mode = sort;
    }
    if let Some(reverse) = reverse {
        playlist.reverse = reverse;
    }
    session.library.sort_playlist(name)?;
    session.save()?;

    println!("{} Sorted {}", "✓".green(), name.cyan());
    Ok(())
}

/// Move an entry to a new position. Positions are counted from 1.
pub fn handle_playlist_move(name: &str, from: usize, to: usize) -> Result<(), Box<dyn Error>> {
    let mut session = Session::open()?;
    let playlist = session
        .library
        .playlist_mut(name)
        .ok_or_else(|| format!("{} No playlist named '{name}'", "Error:".red().bold()))?;
    let len = playlist.len();
    if from == 0 || to == 0 || !playlist.move_entry(from - 1, to - 1) {
        return Err(format!(
            "{} Positions must be between 1 and {len}",
            "Error:".red().bold()
        )
        .into());
    }
    session.save()?;

    println!("{} Moved entry {from} to {to} in {}", "✓".green(), name.cyan());
    Ok(())
}

/// Print the file that plays after (or before) `file` in a playlist.
pub fn handle_playlist_step(name: &str, file: &str, forward: bool) -> Result<(), Box<dyn Error>> {
    let session = Session::open()?;
    let current = session.resolve_file(file)?;
    let playlist = find(&session.library, name)?;

    let step = if forward {
        navigation::next(playlist, current)
    } else {
        navigation::previous(playlist, current)
    };
    match step.and_then(|id| session.library.file(id)) {
        Some(entry) => println!("{}", entry.location().display()),
        None => println!("{}", "(playlist is empty)".bright_black()),
    }
    Ok(())
}
