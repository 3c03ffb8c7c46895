use std::path::PathBuf;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;
use shelf_server::{ServerConfig, ShelfServer};
use shelf_store::{Catalog, JsonFileStore};
use shelf_types::{Book, BookDraft, Library, SUGGESTED_GENRES};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    let library = cli.library;
    let catalog = || {
        let path = library
            .clone()
            .unwrap_or_else(|| PathBuf::from(JsonFileStore::DEFAULT_FILE_NAME));
        open_catalog(path, format)
    };

    match cli.command {
        Command::Add(args) => cmd_add(&mut catalog(), args, format),
        Command::Remove(args) => cmd_remove(&mut catalog(), args, format),
        Command::Toggle(args) => cmd_toggle(&mut catalog(), args, format),
        Command::Search(args) => {
            let results = catalog().search(&args.keyword, args.field);
            print_books(&results, format, "No matching books found.")
        }
        Command::List(_) => print_books(catalog().library(), format, "Your library is empty!"),
        Command::Stats(_) => cmd_stats(&catalog(), format),
        Command::Genre(args) => {
            let results = catalog().filter_by_genre(&args.genre);
            print_books(&results, format, "No books found for this genre.")
        }
        Command::Genres(args) => cmd_genres(&catalog(), args, format),
        Command::Reset(args) => cmd_reset(&mut catalog(), args, format),
        Command::Serve(args) => cmd_serve(args, library.clone()),
    }
}

fn open_catalog(path: PathBuf, format: OutputFormat) -> Catalog {
    let catalog = Catalog::open(JsonFileStore::new(path));
    if catalog.load_status().is_degraded() && format == OutputFormat::Text {
        eprintln!(
            "{} {} could not be used ({}); starting with an empty library",
            "warning:".yellow().bold(),
            catalog.location(),
            catalog.load_status()
        );
    }
    catalog
}

fn cmd_add(catalog: &mut Catalog, args: AddArgs, format: OutputFormat) -> anyhow::Result<()> {
    let draft = BookDraft {
        title: args.title,
        author: args.author,
        year: args.year,
        genre: args.genre,
        read: args.read,
    };
    let book = match draft.validate() {
        Ok(book) => book,
        Err(shelf_types::TypeError::MissingField(_)) => bail!("Title and Author are required!"),
        Err(e) => bail!(e),
    };

    catalog.add(book.clone()).context("failed to save the library")?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&book)?),
        OutputFormat::Text => {
            println!("{} Book added successfully!", "✓".green().bold());
            println!("  {}", describe(&book));
        }
    }
    Ok(())
}

fn cmd_remove(catalog: &mut Catalog, args: TitleArgs, format: OutputFormat) -> anyhow::Result<()> {
    let title = require_title(&args.title)?;
    let removed = catalog.remove(title).context("failed to save the library")?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "title": title, "removed": removed })),
        OutputFormat::Text => match removed {
            0 => println!("No book titled {} was found.", title.yellow()),
            1 => println!("{} Book removed successfully!", "✓".green().bold()),
            n => println!("{} {} books removed successfully!", "✓".green().bold(), n),
        },
    }
    Ok(())
}

fn cmd_toggle(catalog: &mut Catalog, args: TitleArgs, format: OutputFormat) -> anyhow::Result<()> {
    let title = require_title(&args.title)?;
    let state = catalog.toggle_read(title).context("failed to save the library")?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "title": title, "read": state })),
        OutputFormat::Text => match state {
            Some(true) => println!("{} Marked as {}", "✓".green().bold(), "Read".green()),
            Some(false) => println!("{} Marked as {}", "✓".green().bold(), "Unread".red()),
            None => println!("No book titled {} was found.", title.yellow()),
        },
    }
    Ok(())
}

fn require_title(title: &str) -> anyhow::Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        bail!("Please enter a book title.");
    }
    Ok(title)
}

fn cmd_stats(catalog: &Catalog, format: OutputFormat) -> anyhow::Result<()> {
    let stats = catalog.statistics();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Total Books: {}", stats.total.to_string().bold());
            println!("Read: {}", format!("{:.2}%", stats.percent_read).green());
            println!("{}", progress_bar(stats.read_fraction(), 30));
        }
    }
    Ok(())
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn cmd_genres(catalog: &Catalog, args: GenresArgs, format: OutputFormat) -> anyhow::Result<()> {
    let genres: Vec<String> = if args.suggested {
        SUGGESTED_GENRES.iter().map(|g| g.to_string()).collect()
    } else {
        catalog.genres()
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&genres)?),
        OutputFormat::Text if genres.is_empty() => println!("No genres yet."),
        OutputFormat::Text => {
            for genre in &genres {
                println!("  {}", genre.cyan());
            }
        }
    }
    Ok(())
}

fn cmd_reset(catalog: &mut Catalog, args: ResetArgs, format: OutputFormat) -> anyhow::Result<()> {
    if !args.yes {
        bail!("reset deletes every book and cannot be undone; pass --yes to confirm");
    }
    catalog.reset().context("failed to save the library")?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "reset": true })),
        OutputFormat::Text => println!("{} Library data reset!", "!".yellow().bold()),
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs, library: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(path) = library {
        config.library_path = path;
    }

    println!(
        "Shelf on {} (library: {})",
        format!("http://{}", config.bind_addr).bold(),
        config.library_path.display()
    );
    let server = ShelfServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn print_books(library: &Library, format: OutputFormat, empty: &str) -> anyhow::Result<()> {
    println!("{}", render_books(library, format, empty)?);
    Ok(())
}

fn render_books(library: &Library, format: OutputFormat, empty: &str) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(library)?,
        OutputFormat::Text if library.is_empty() => empty.dimmed().to_string(),
        OutputFormat::Text => library.iter().map(describe).collect::<Vec<_>>().join("\n"),
    })
}

fn describe(book: &Book) -> String {
    let status = if book.read {
        book.status_label().green()
    } else {
        book.status_label().red()
    };
    format!(
        "{} by {} ({}) [{}] {}",
        book.title.bold(),
        book.author,
        book.year,
        book.genre.cyan(),
        status
    )
}
