//! media-scope - a catalog of local media files.
//!
//! The `mscope` command keeps track of one or more directory trees ("scopes"),
//! gives every file a stable identifier derived from its location, and lets
//! you attach comments, categories and images to files and collect them into
//! playlists. Everything survives rescans: files that are still on disk keep
//! their identity and metadata, files that vanished drop out of the library
//! and out of any playlist that referenced them.

use clap::{CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use media_scope::SortMode;
use std::error::Error;
use std::fs::File;
use std::io;

mod cli;

#[derive(Parser)]
#[command(name = "mscope")]
#[command(about = "Catalog local media under scoped roots, with stable identifiers and playlists")]
#[command(version)]
struct Cli {
    /// Log debug output to the terminal
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and an empty library
    Init,
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Manage scope directories
    Scope {
        #[command(subcommand)]
        action: ScopeAction,
    },
    /// Rescan every scope and save the result
    Scan {
        /// Only rescan the top level of each scope
        #[arg(long)]
        shallow: bool,
    },
    /// Print the directory tree of every scope
    Tree {
        /// Include files
        #[arg(short, long)]
        files: bool,
    },
    /// List a directory inside a scope in playback order
    Ls {
        /// Directory to list
        path: String,
        /// Sort mode: none, name or modified
        #[arg(short, long)]
        sort: Option<SortMode>,
        /// Reverse the sort order
        #[arg(short, long)]
        reverse: bool,
    },
    /// Find a file by path or identifier
    Find {
        /// File path or identifier
        reference: String,
    },
    /// Show or edit file metadata
    Meta {
        #[command(subcommand)]
        action: MetaAction,
    },
    /// Manage playlists
    Playlist {
        #[command(subcommand)]
        action: PlaylistAction,
    },
    /// Print the identifier of a string
    Id {
        value: String,
    },
    /// Print the media kind of a file extension
    Classify {
        extension: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new([
            "recursive_scan",
            "playlist_sort_mode",
            "log_level",
            "log_file",
        ]))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
}

#[derive(Subcommand)]
enum ScopeAction {
    /// Add a directory as a scope
    Add { path: String },
    /// Stop tracking a scope
    Remove { path: String },
    /// List configured scopes
    List,
}

#[derive(Subcommand)]
enum MetaAction {
    /// Show a file's metadata
    Show {
        /// File path or identifier
        file: String,
    },
    /// Set a file's metadata
    Set {
        /// File path or identifier
        file: String,
        #[arg(long)]
        comment: Option<String>,
        /// Comma-separated category names
        #[arg(long)]
        categories: Option<String>,
        /// Image path (empty to clear)
        #[arg(long)]
        image: Option<String>,
    },
}

#[derive(Subcommand)]
enum PlaylistAction {
    /// Create an empty playlist
    New {
        name: String,
        #[arg(short, long)]
        sort: Option<SortMode>,
    },
    /// Delete a playlist
    Delete { name: String },
    /// List playlists
    List,
    /// Show the files of a playlist
    Show { name: String },
    /// Add files to a playlist
    Add {
        name: String,
        /// File paths or identifiers
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Remove a file from a playlist
    Remove { name: String, file: String },
    /// Move an entry to another position (1-based)
    Move { name: String, from: usize, to: usize },
    /// Sort a playlist by its sort mode
    Sort {
        name: String,
        #[arg(short, long)]
        sort: Option<SortMode>,
        #[arg(short, long)]
        reverse: Option<bool>,
    },
    /// Print the file after the given one
    Next { name: String, file: String },
    /// Print the file before the given one
    Prev { name: String, file: String },
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    use simplelog::*;

    let config = media_scope::config::Config::load().unwrap_or_default();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(log_file) = &config.log_file {
        loggers.push(WriteLogger::new(
            LevelFilter::Debug,
            simplelog::Config::default(),
            File::create(log_file)?,
        ));
    }
    CombinedLogger::init(loggers)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {e}");
    }

    match cli.command {
        Commands::Init => {
            cli::init::handle_init()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
        Commands::Scope { action } => match action {
            ScopeAction::Add { path } => cli::scope::handle_scope_add(&path)?,
            ScopeAction::Remove { path } => cli::scope::handle_scope_remove(&path)?,
            ScopeAction::List => cli::scope::handle_scope_list()?,
        },
        Commands::Scan { shallow } => {
            cli::scan::handle_scan(shallow)?;
        }
        Commands::Tree { files } => {
            cli::scan::handle_tree(files)?;
        }
        Commands::Ls {
            path,
            sort,
            reverse,
        } => {
            cli::scan::handle_ls(&path, sort, reverse)?;
        }
        Commands::Find { reference } => {
            cli::inspect::handle_find(&reference)?;
        }
        Commands::Meta { action } => match action {
            MetaAction::Show { file } => cli::meta::handle_meta_show(&file)?,
            MetaAction::Set {
                file,
                comment,
                categories,
                image,
            } => cli::meta::handle_meta_set(
                &file,
                comment.as_deref(),
                categories.as_deref(),
                image.as_deref(),
            )?,
        },
        Commands::Playlist { action } => match action {
            PlaylistAction::New { name, sort } => cli::playlist::handle_playlist_new(&name, sort)?,
            PlaylistAction::Delete { name } => cli::playlist::handle_playlist_delete(&name)?,
            PlaylistAction::List => cli::playlist::handle_playlist_list()?,
            PlaylistAction::Show { name } => cli::playlist::handle_playlist_show(&name)?,
            PlaylistAction::Add { name, files } => {
                cli::playlist::handle_playlist_add(&name, &files)?
            }
            PlaylistAction::Remove { name, file } => {
                cli::playlist::handle_playlist_remove(&name, &file)?
            }
            PlaylistAction::Move { name, from, to } => {
                cli::playlist::handle_playlist_move(&name, from, to)?
            }
            PlaylistAction::Sort {
                name,
                sort,
                reverse,
            } => cli::playlist::handle_playlist_sort(&name, sort, reverse)?,
            PlaylistAction::Next { name, file } => {
                cli::playlist::handle_playlist_step(&name, &file, true)?
            }
            PlaylistAction::Prev { name, file } => {
                cli::playlist::handle_playlist_step(&name, &file, false)?
            }
        },
        Commands::Id { value } => {
            cli::inspect::handle_id(&value)?;
        }
        Commands::Classify { extension } => {
            cli::inspect::handle_classify(&extension)?;
        }
    }

    Ok(())
}
