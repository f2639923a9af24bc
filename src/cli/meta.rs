use super::session::Session;
use owo_colors::OwoColorize;
use std::error::Error;

pub fn handle_meta_show(file: &str) -> Result<(), Box<dyn Error>> {
    let session = Session::open()?;
    let id = session.resolve_file(file)?;
    let entry = session
        .library
        .file(id)
        .ok_or("File disappeared during lookup")?;

    println!("{}", entry.location().display().to_string().cyan());
    println!("  name: {}", entry.name());
    println!("  kind: {}", entry.kind());
    println!("  identifier: {}", entry.identifier().bright_black());
    println!("  comment: {}", entry.comment);
    println!("  categories: {}", entry.categories_as_text());
    println!("  image: {}", entry.image.as_deref().unwrap_or(""));
    Ok(())
}

pub fn handle_meta_set(
    file: &str,
    comment: Option<&str>,
    categories: Option<&str>,
    image: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    if comment.is_none() && categories.is_none() && image.is_none() {
        return Err("Nothing to set. Pass --comment, --categories or --image.".into());
    }

    let mut session = Session::open()?;
    let id = session.resolve_file(file)?;
    session.library.set_metadata(id, comment, categories, image)?;
    session.save()?;

    println!("{} Metadata updated", "✓".green());
    Ok(())
}
