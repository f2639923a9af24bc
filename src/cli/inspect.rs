use super::session::Session;
use media_scope::identifier::identifier_of;
use media_scope::media::classify;
use owo_colors::OwoColorize;
use std::error::Error;

pub fn handle_id(value: &str) -> Result<(), Box<dyn Error>> {
    println!("{}", identifier_of(value));
    Ok(())
}

pub fn handle_classify(extension: &str) -> Result<(), Box<dyn Error>> {
    println!("{}", classify(extension));
    Ok(())
}

pub fn handle_find(reference: &str) -> Result<(), Box<dyn Error>> {
    let session = Session::open()?;
    let id = session.resolve_file(reference)?;
    let file = session
        .library
        .file(id)
        .ok_or("File disappeared during lookup")?;

    println!(
        "{}  {}",
        file.identifier().bright_black(),
        file.location().display()
    );
    Ok(())
}
