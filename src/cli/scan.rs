use super::session::Session;
use chrono::{DateTime, Local};
use media_scope::identifier::tree_key;
use media_scope::media::MediaKind;
use media_scope::utils::validation::expand_path;
use media_scope::{DirId, MediaTree, SortMode};
use owo_colors::OwoColorize;
use std::error::Error;
use std::fs;

pub fn handle_scan(shallow: bool) -> Result<(), Box<dyn Error>> {
    let session = Session::open_with_depth(shallow.then_some(false))?;
    session.save()?;

    println!("{} Scan complete!", "✓".green());
    for tree in session.library.scopes() {
        println!(
            "  {}: {} directories, {} files",
            tree.location().display(),
            tree.directory_count(),
            tree.file_count()
        );
    }
    Ok(())
}

pub fn handle_tree(show_files: bool) -> Result<(), Box<dyn Error>> {
    let session = Session::open()?;

    for tree in session.library.scopes() {
        let label = tree.location().display().to_string();
        println!("{}", label.cyan().bold());
        print_node(tree, tree.root(), &[label.as_str()], show_files, 1, &session);
    }
    Ok(())
}

fn print_node<'t>(
    tree: &'t MediaTree,
    dir: DirId,
    labels: &[&'t str],
    show_files: bool,
    depth: usize,
    session: &Session,
) {
    let Some(node) = tree.dir(dir) else {
        return;
    };
    let indent = "  ".repeat(depth);

    for &child in node.directories() {
        let Some(child_node) = tree.dir(child) else {
            continue;
        };
        let mut chain = labels.to_vec();
        chain.push(child_node.name());
        let marker = if session.library.is_expanded(&tree_key(chain.iter().copied())) {
            "▾"
        } else {
            "▸"
        };
        println!("{indent}{marker} {}/", child_node.name().blue());
        print_node(tree, child, &chain, show_files, depth + 1, session);
    }

    if show_files {
        for index in 0..node.len() {
            if let Some(file) = node.file_at(index).and_then(|id| tree.file(id)) {
                println!("{indent}  {}", file.name());
            }
        }
    }
}

pub fn handle_ls(path: &str, sort: Option<SortMode>, reverse: bool) -> Result<(), Box<dyn Error>> {
    let path = expand_path(path)?;
    let path = fs::canonicalize(&path).unwrap_or(path);
    let mut session = Session::open()?;

    let found = session
        .library
        .scopes()
        .iter()
        .find_map(|tree| tree.find_directory(&path).map(|dir| (tree.id(), dir)));
    let Some((tree_id, dir)) = found else {
        return Err(format!(
            "{} Not inside any scope: {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    };

    let tree = session
        .library
        .tree_mut(tree_id)
        .ok_or("Scope disappeared while listing")?;
    if let Some(mode) = sort {
        tree.set_sort_mode(dir, mode)?;
    }
    tree.set_reverse(dir, reverse)?;

    let Some(node) = tree.dir(dir) else {
        return Ok(());
    };
    for &child in node.directories() {
        if let Some(child) = tree.dir(child) {
            println!("{}/", child.name().blue());
        }
    }
    for index in 0..node.len() {
        let Some(file) = node.file_at(index).and_then(|id| tree.file(id)) else {
            continue;
        };
        let modified: DateTime<Local> = file.modified().into();
        let kind = match file.kind() {
            MediaKind::Audio => "audio".green().to_string(),
            MediaKind::Video => "video".magenta().to_string(),
            MediaKind::Image => "image".yellow().to_string(),
            MediaKind::Unknown => "-".bright_black().to_string(),
        };
        println!(
            "{:>3}  {:<7} {}  {}",
            index,
            kind,
            modified.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            file.name()
        );
    }
    Ok(())
}
