/// Tunify - music client command line
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunify_cli::{output, App, AppConfig};

#[derive(Parser)]
#[command(name = "tunify")]
#[command(about = "Browse, like and organise music from a Tunify data store", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./tunify.toml when present)
    #[arg(short, long, global = true, env = "TUNIFY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// List browse categories
    Categories,
    /// List the songs of a category
    Category {
        slug: String,
        /// Only use songs stored in the data store
        #[arg(long)]
        local: bool,
    },
    /// Search songs by title or artist
    Search {
        term: String,
        /// Search the data store instead of the search API
        #[arg(long)]
        local: bool,
        /// Number of results requested from the search API
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List liked songs
    Liked,
    /// Like a song
    Like {
        track_id: String,
        /// Search term that finds the song when it is not stored yet
        #[arg(long)]
        term: Option<String>,
    },
    /// Remove a song from the liked list
    Unlike { track_id: String },
    /// List your playlists
    Playlists,
    /// Manage a playlist
    Playlist {
        #[command(subcommand)]
        action: PlaylistAction,
    },
    /// Show or edit listening history
    History {
        /// Remove every entry
        #[arg(long, conflicts_with = "remove")]
        clear: bool,
        /// Remove the entry at this position (as listed, 1 = most recent)
        #[arg(long)]
        remove: Option<usize>,
    },
}

#[derive(Subcommand)]
enum PlaylistAction {
    /// Show a playlist and its songs
    Show { id: String },
    /// Create a playlist
    Create {
        name: String,
        /// Songs to start with
        #[arg(short, long = "track")]
        tracks: Vec<String>,
    },
    /// Rename a playlist
    Rename { id: String, name: String },
    /// Delete a playlist
    Delete { id: String },
    /// Add a song to one or more playlists
    Add {
        track_id: String,
        #[arg(required = true)]
        playlists: Vec<String>,
    },
    /// Remove a song from a playlist
    Remove { id: String, track_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunify=info,tunify_cli=info,tunify_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;
    tracing::debug!(store = %config.store_url, search = %config.search_url, "Loaded configuration");

    let app = App::from_config(&config)?;
    run(&app, cli.command).await
}

async fn run(app: &App, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Register { username, password } => {
            let user = app.register(&username, &password).await?;
            println!("Registered {}. Run `tunify login` to sign in.", user.username);
        }
        Commands::Login { username, password } => {
            let user = app.login(&username, &password).await?;
            println!("Logged in as {}", user.username);
        }
        Commands::Logout => match app.logout() {
            Some(user) => println!("Logged out {}", user.username),
            None => println!("Not logged in"),
        },
        Commands::Whoami => {
            println!("{}", output::user_summary(&app.whoami().await?));
        }
        Commands::Categories => {
            for category in app.categories().await? {
                println!("{}", output::category_line(&category));
            }
        }
        Commands::Category { slug, local } => {
            let tracks = app.category(&slug, local).await?;
            println!("{}", output::track_list(&tracks, "No songs in this category."));
        }
        Commands::Search { term, local, limit } => {
            let tracks = app.search(&term, local, limit).await?;
            println!("{}", output::track_list(&tracks, "No songs found."));
        }
        Commands::Liked => {
            let tracks = app.liked().await?;
            println!("{}", output::track_list(&tracks, "No liked songs yet."));
        }
        Commands::Like { track_id, term } => {
            let track = app.like(&track_id, term.as_deref()).await?;
            println!("Liked {} - {}", track.title, track.artist);
        }
        Commands::Unlike { track_id } => {
            app.unlike(&track_id).await?;
            println!("Removed {track_id} from liked songs");
        }
        Commands::Playlists => {
            let playlists = app.playlists().await?;
            if playlists.is_empty() {
                println!("No playlists yet.");
            }
            for playlist in playlists {
                println!("{}", output::playlist_line(&playlist));
            }
        }
        Commands::Playlist { action } => run_playlist(app, action).await?,
        Commands::History { clear, remove } => {
            if clear {
                app.clear_history().await?;
                println!("History cleared");
            } else if let Some(position) = remove {
                let entry = app.remove_history(position).await?;
                println!("Removed {} - {} from history", entry.title, entry.artist);
            } else {
                println!("{}", output::history_list(&app.history().await?));
            }
        }
    }

    Ok(())
}

async fn run_playlist(app: &App, action: PlaylistAction) -> anyhow::Result<()> {
    match action {
        PlaylistAction::Show { id } => {
            let (playlist, tracks) = app.playlist(&id).await?;
            println!("{}", output::playlist_line(&playlist));
            println!("{}", output::track_list(&tracks, "This playlist is empty."));
        }
        PlaylistAction::Create { name, tracks } => {
            let playlist = app.create_playlist(&name, &tracks).await?;
            println!("Created {}", output::playlist_line(&playlist));
        }
        PlaylistAction::Rename { id, name } => {
            let playlist = app.rename_playlist(&id, &name).await?;
            println!("Renamed to {}", playlist.name);
        }
        PlaylistAction::Delete { id } => {
            let playlist = app.delete_playlist(&id).await?;
            println!("Deleted {}", playlist.name);
        }
        PlaylistAction::Add {
            track_id,
            playlists,
        } => {
            for playlist in app.add_to_playlists(&track_id, &playlists).await? {
                println!("Added to {}", output::playlist_line(&playlist));
            }
        }
        PlaylistAction::Remove { id, track_id } => {
            let playlist = app.remove_from_playlist(&id, &track_id).await?;
            println!("Updated {}", output::playlist_line(&playlist));
        }
    }

    Ok(())
}
