/// Tunepick - personal song-queue picker
use anyhow::{anyhow, bail, Context};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunepick_core::{pick, Genre, LastImportMeta, Library, Partition, PickChoice, Song, SongId};
use tunepick_importer::{
    decode_payload, export_library, reconcile, timestamped_filename, ExportOptions, ImportMode,
    ImportReport, Reconciled,
};
use tunepick_storage::{create_pool, LibraryStore};
use tunepick_sync::{HttpDocumentStore, SyncManager};

#[derive(Parser)]
#[command(name = "tunepick")]
#[command(about = "Pick songs from a personal queue, import and sync the library", long_about = None)]
struct Cli {
    /// SQLite database path
    #[arg(long, env = "TUNEPICK_DB", default_value = "tunepick.db", global = true)]
    database: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a song and move it to the archive
    Pick {
        /// Genre to pick from, or "random" (the default)
        genre: Option<String>,
    },
    /// Add one song to the current list
    Add {
        /// Artist name
        artist: String,
        /// Song title
        title: String,
        /// Release year
        #[arg(short, long)]
        year: Option<u16>,
        /// Genre text, normalized to the nearest known genre
        #[arg(short, long, default_value = "Other")]
        genre: String,
    },
    /// List songs
    List {
        /// Which partition: current (default) or archive
        partition: Option<String>,
        /// Only songs in this genre
        #[arg(short, long)]
        genre: Option<String>,
        /// Only songs whose artist or title contains this text
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Move a song from current to the archive
    Archive {
        /// Song id, or an unambiguous prefix of one
        id: String,
    },
    /// Move a song from the archive back to current
    Restore {
        /// Song id, or an unambiguous prefix of one
        id: String,
    },
    /// Delete a song from either partition
    Delete {
        /// Song id, or an unambiguous prefix of one
        id: String,
    },
    /// Move every current song into the archive
    ArchiveAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Move every archived song back to current
    RestoreAll,
    /// Delete every archived song
    ClearArchive {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Import a delimited song file
    Import {
        /// File to import
        file: PathBuf,
        /// Replace the whole library instead of merging into current
        #[arg(long)]
        replace: bool,
        /// Skip the confirmation prompt (replace only)
        #[arg(short, long)]
        yes: bool,
    },
    /// Export the library as delimited text
    Export {
        /// Output file; defaults to a timestamped name in the current directory
        file: Option<PathBuf>,
        /// Omit the UTF-8 byte order mark
        #[arg(long)]
        no_bom: bool,
    },
    /// Replace the local library with the published remote document
    Pull {
        /// Remote document endpoint
        #[arg(long, env = "TUNEPICK_REMOTE")]
        url: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Publish the local library to the remote document endpoint
    Push {
        /// Remote document endpoint
        #[arg(long, env = "TUNEPICK_REMOTE")]
        url: String,
    },
    /// Show recent picks and last-import details
    Recent,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunepick=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let url = format!("sqlite://{}", cli.database);
    let store = LibraryStore::new(create_pool(&url).await?);

    match cli.command {
        Commands::Pick { genre } => pick_song(&store, genre.as_deref()).await,
        Commands::Add {
            artist,
            title,
            year,
            genre,
        } => add_song(&store, &artist, &title, year, &genre).await,
        Commands::List {
            partition,
            genre,
            query,
        } => list_songs(&store, partition.as_deref(), genre.as_deref(), query.as_deref()).await,
        Commands::Archive { id } => move_song(&store, &id, Partition::Archive).await,
        Commands::Restore { id } => move_song(&store, &id, Partition::Current).await,
        Commands::Delete { id } => delete_song(&store, &id).await,
        Commands::ArchiveAll { yes } => archive_all(&store, yes).await,
        Commands::RestoreAll => restore_all(&store).await,
        Commands::ClearArchive { yes } => clear_archive(&store, yes).await,
        Commands::Import { file, replace, yes } => import_file(&store, &file, replace, yes).await,
        Commands::Export { file, no_bom } => export_file(&store, file, no_bom).await,
        Commands::Pull { url, yes } => pull(&store, &url, yes).await,
        Commands::Push { url } => push(&store, &url).await,
        Commands::Recent => show_recent(&store).await,
    }
}

async fn pick_song(store: &LibraryStore, genre: Option<&str>) -> anyhow::Result<()> {
    let choice = match genre {
        None => PickChoice::Random,
        Some(g) if g.eq_ignore_ascii_case("random") => PickChoice::Random,
        Some(g) => PickChoice::Genre(parse_genre(g)?),
    };

    let mut library = store.load_library().await?;
    let Some(song) = pick(&mut library, choice, &mut rand::thread_rng()) else {
        println!("No songs to pick from.");
        return Ok(());
    };

    let mut recent = store.load_recent().await?;
    recent.push(&song);
    store.save_library(&library).await?;
    store.save_recent(&recent).await?;

    println!("{song}");
    Ok(())
}

async fn add_song(
    store: &LibraryStore,
    artist: &str,
    title: &str,
    year: Option<u16>,
    genre: &str,
) -> anyhow::Result<()> {
    let song = Song::new(artist, title, year, Genre::normalize(genre))?;
    let mut library = store.load_library().await?;
    library.add(song.clone())?;
    store.save_library(&library).await?;

    println!("Added: {song}");
    Ok(())
}

async fn list_songs(
    store: &LibraryStore,
    partition: Option<&str>,
    genre: Option<&str>,
    query: Option<&str>,
) -> anyhow::Result<()> {
    let partition = match partition {
        None => Partition::Current,
        Some(p) if p.eq_ignore_ascii_case("current") => Partition::Current,
        Some(p) if p.eq_ignore_ascii_case("archive") => Partition::Archive,
        Some(p) => bail!("unknown partition {p:?}, expected current or archive"),
    };
    let genre = genre.map(parse_genre).transpose()?;
    let query = query.map(str::to_lowercase);

    let library = store.load_library().await?;
    let songs = match partition {
        Partition::Current => &library.current,
        Partition::Archive => &library.archive,
    };

    let mut shown = 0;
    for song in songs {
        if let Some(g) = genre {
            if song.genre != g {
                continue;
            }
        }
        if let Some(q) = &query {
            if !song.artist.to_lowercase().contains(q) && !song.title.to_lowercase().contains(q) {
                continue;
            }
        }
        println!("{}  {song}", short_id(&song.id));
        shown += 1;
    }

    println!("{shown} of {} {partition} songs", songs.len());
    if genre.is_none() && query.is_none() {
        for (g, n) in library.genre_counts(partition) {
            if n > 0 {
                println!("  {g}: {n}");
            }
        }
    }
    Ok(())
}

async fn move_song(store: &LibraryStore, id: &str, to: Partition) -> anyhow::Result<()> {
    let mut library = store.load_library().await?;
    let id = resolve_id(&library, id)?;
    match to {
        Partition::Archive => library.archive_song(&id)?,
        Partition::Current => library.restore_song(&id)?,
    }
    store.save_library(&library).await?;

    println!("Moved {} to {to}.", short_id(&id));
    Ok(())
}

async fn delete_song(store: &LibraryStore, id: &str) -> anyhow::Result<()> {
    let mut library = store.load_library().await?;
    let id = resolve_id(&library, id)?;
    let song = library
        .delete(&id)
        .ok_or_else(|| anyhow!("no song with id {id}"))?;
    store.save_library(&library).await?;

    println!("Deleted: {song}");
    Ok(())
}

async fn archive_all(store: &LibraryStore, yes: bool) -> anyhow::Result<()> {
    let mut library = store.load_library().await?;
    if !confirm(
        &format!("Archive all {} current songs?", library.current.len()),
        yes,
    )? {
        return Ok(());
    }
    let moved = library.archive_all();
    store.save_library(&library).await?;

    println!("Archived {moved} songs.");
    Ok(())
}

async fn restore_all(store: &LibraryStore) -> anyhow::Result<()> {
    let mut library = store.load_library().await?;
    let moved = library.restore_all();
    store.save_library(&library).await?;

    println!("Restored {moved} songs.");
    Ok(())
}

async fn clear_archive(store: &LibraryStore, yes: bool) -> anyhow::Result<()> {
    let mut library = store.load_library().await?;
    if !confirm(
        &format!(
            "Permanently delete all {} archived songs?",
            library.archive.len()
        ),
        yes,
    )? {
        return Ok(());
    }
    let removed = library.clear_archive();
    store.save_library(&library).await?;

    println!("Deleted {removed} archived songs.");
    Ok(())
}

async fn import_file(
    store: &LibraryStore,
    file: &PathBuf,
    replace: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };
    if replace && !confirm("Replace the entire library with this file?", yes)? {
        return Ok(());
    }

    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let text = decode_payload(&bytes);

    let existing = store.load_library().await?;
    let outcome = reconcile(&existing, &text, mode);
    store.save_library(&outcome.library).await?;
    save_import_meta(
        store,
        if replace { "replace" } else { "merge" },
        &file.display().to_string(),
        bytes.len(),
        &outcome,
    )
    .await?;

    print_report(&outcome.report);
    Ok(())
}

async fn export_file(
    store: &LibraryStore,
    file: Option<PathBuf>,
    no_bom: bool,
) -> anyhow::Result<()> {
    let library = store.load_library().await?;
    let opts = if no_bom {
        ExportOptions::for_sync()
    } else {
        ExportOptions::for_download()
    };
    let text = export_library(&library, opts);
    let path = file.unwrap_or_else(|| PathBuf::from(timestamped_filename(Local::now())));

    tokio::fs::write(&path, text)
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Exported {} songs to {}.", library.len(), path.display());
    Ok(())
}

async fn pull(store: &LibraryStore, url: &str, yes: bool) -> anyhow::Result<()> {
    if !confirm("Replace the local library with the remote document?", yes)? {
        return Ok(());
    }

    let manager = SyncManager::new(HttpDocumentStore::new(url)?);
    let existing = store.load_library().await?;
    let Some((document, outcome)) = manager.pull(&existing).await? else {
        println!("Nothing published at the remote yet.");
        return Ok(());
    };

    store.save_library(&outcome.library).await?;
    save_import_meta(store, "pull", url, document.body.len(), &outcome).await?;

    print_report(&outcome.report);
    Ok(())
}

async fn push(store: &LibraryStore, url: &str) -> anyhow::Result<()> {
    let manager = SyncManager::new(HttpDocumentStore::new(url)?);
    let library = store.load_library().await?;
    let document = manager.push(&library).await?;

    println!(
        "Published {} songs (version {}).",
        library.len(),
        document.version
    );
    Ok(())
}

async fn show_recent(store: &LibraryStore) -> anyhow::Result<()> {
    let recent = store.load_recent().await?;
    if recent.is_empty() {
        println!("No picks yet.");
    } else {
        println!("Recent picks, newest first:");
        for entry in recent.entries() {
            let year = entry.year.map_or(String::new(), |y| format!(" ({y})"));
            println!("  {} — {}{} [{}]", entry.title, entry.artist, year, entry.genre);
        }
    }

    if let Some(meta) = store.load_last_import().await? {
        println!(
            "Last import: {} from {} ({} bytes) at {}, route {}: {} added, {} duplicates, {} failed",
            meta.mode,
            meta.source,
            meta.size,
            meta.imported_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            meta.route,
            meta.success_count,
            meta.duplicates_total,
            meta.failed_count
        );
    }
    Ok(())
}

async fn save_import_meta(
    store: &LibraryStore,
    mode: &str,
    source: &str,
    size: usize,
    outcome: &Reconciled,
) -> anyhow::Result<()> {
    let meta = LastImportMeta {
        mode: mode.into(),
        source: source.into(),
        size,
        imported_at: Utc::now(),
        route: outcome.route.as_str().into(),
        success_count: outcome.report.success_count,
        duplicates_total: outcome.report.duplicates_total,
        failed_count: outcome.report.failed_count,
    };
    store.save_last_import(&meta).await?;
    Ok(())
}

fn print_report(report: &ImportReport) {
    println!(
        "{} added, {} duplicates skipped, {} failed",
        report.success_count, report.duplicates_total, report.failed_count
    );
    for line in &report.failed_lines {
        println!("  failed: {line}");
    }
}

/// Resolve a full id or an unambiguous prefix against both partitions.
fn resolve_id(library: &Library, given: &str) -> anyhow::Result<SongId> {
    let matches: Vec<&SongId> = library
        .iter_all()
        .map(|s| &s.id)
        .filter(|id| id.as_str().starts_with(given))
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => bail!("no song with id {given}"),
        _ => bail!("id prefix {given} is ambiguous"),
    }
}

fn short_id(id: &SongId) -> &str {
    &id.as_str()[..8.min(id.as_str().len())]
}

fn parse_genre(text: &str) -> anyhow::Result<Genre> {
    Genre::ALL
        .iter()
        .copied()
        .find(|g| g.as_str().eq_ignore_ascii_case(text.trim()))
        .ok_or_else(|| {
            let labels: Vec<&str> = Genre::ALL.iter().map(Genre::as_str).collect();
            anyhow!("unknown genre {text:?}, expected one of: {}", labels.join(", "))
        })
}

fn confirm(prompt: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let accepted = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
    if !accepted {
        println!("Cancelled.");
    }
    Ok(accepted)
}
