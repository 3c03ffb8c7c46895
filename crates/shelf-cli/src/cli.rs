use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shelf_types::SearchField;

#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Shelf: a personal book catalog",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Library file (defaults to library.json in the current directory)
    #[arg(short, long, global = true)]
    pub library: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a book to the library
    Add(AddArgs),
    /// Remove every book with the given title
    Remove(TitleArgs),
    /// Flip the read status of the first book with the given title
    Toggle(TitleArgs),
    /// Search by title or author
    Search(SearchArgs),
    /// Display all books
    List(ListArgs),
    /// Show reading statistics
    Stats(StatsArgs),
    /// Show the books in one genre
    Genre(GenreArgs),
    /// List genres
    Genres(GenresArgs),
    /// Delete every book in the library
    Reset(ResetArgs),
    /// Start the web interface
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct AddArgs {
    pub title: String,
    pub author: String,
    /// Publication year (0 to 2100, defaults to 2024)
    #[arg(short, long, allow_hyphen_values = true)]
    pub year: Option<i32>,
    #[arg(short, long, default_value = "Fiction")]
    pub genre: String,
    /// Mark the book as already read
    #[arg(long)]
    pub read: bool,
}

#[derive(Args)]
pub struct TitleArgs {
    pub title: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive substring; empty matches everything
    #[arg(default_value = "")]
    pub keyword: String,
    #[arg(long = "by", default_value = "title")]
    pub field: SearchField,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct StatsArgs {}

#[derive(Args)]
pub struct GenreArgs {
    pub genre: String,
}

#[derive(Args)]
pub struct GenresArgs {
    /// Show the suggested genres instead of the ones in the library
    #[arg(long)]
    pub suggested: bool,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Confirm that the library should be emptied
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML file with server settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add() {
        let cli = Cli::try_parse_from([
            "shelf", "add", "Dune", "Frank Herbert", "--year", "1965", "--genre", "Science Fiction", "--read",
        ])
        .unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.title, "Dune");
            assert_eq!(args.author, "Frank Herbert");
            assert_eq!(args.year, Some(1965));
            assert_eq!(args.genre, "Science Fiction");
            assert!(args.read);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_add_defaults() {
        let cli = Cli::try_parse_from(["shelf", "add", "Emma", "Jane Austen"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.year, None);
            assert_eq!(args.genre, "Fiction");
            assert!(!args.read);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_add_requires_author() {
        assert!(Cli::try_parse_from(["shelf", "add", "Emma"]).is_err());
    }

    #[test]
    fn parse_remove() {
        let cli = Cli::try_parse_from(["shelf", "remove", "Dune"]).unwrap();
        if let Command::Remove(args) = cli.command {
            assert_eq!(args.title, "Dune");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_toggle() {
        let cli = Cli::try_parse_from(["shelf", "toggle", "The Hobbit"]).unwrap();
        assert!(matches!(cli.command, Command::Toggle(_)));
    }

    #[test]
    fn parse_search_by_author() {
        let cli = Cli::try_parse_from(["shelf", "search", "tolkien", "--by", "author"]).unwrap();
        if let Command::Search(args) = cli.command {
            assert_eq!(args.keyword, "tolkien");
            assert_eq!(args.field, SearchField::Author);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_search_defaults() {
        let cli = Cli::try_parse_from(["shelf", "search"]).unwrap();
        if let Command::Search(args) = cli.command {
            assert_eq!(args.keyword, "");
            assert_eq!(args.field, SearchField::Title);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_search_rejects_unknown_field() {
        assert!(Cli::try_parse_from(["shelf", "search", "x", "--by", "genre"]).is_err());
    }

    #[test]
    fn parse_reset_confirmation() {
        let cli = Cli::try_parse_from(["shelf", "reset", "--yes"]).unwrap();
        if let Command::Reset(args) = cli.command {
            assert!(args.yes);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["shelf", "serve", "--bind", "0.0.0.0:8080", "--config", "shelf.toml"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert_eq!(args.config, Some(PathBuf::from("shelf.toml")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from(["shelf", "list", "--library", "/tmp/books.json", "--format", "json", "-v"]).unwrap();
        assert_eq!(cli.library, Some(PathBuf::from("/tmp/books.json")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }
}
