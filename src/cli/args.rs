use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::catalog::entry::MediaFormat;

/// Library path used when neither `--library` nor `KINO_LIBRARY` is set.
pub const DEFAULT_LIBRARY: &str = "kino-library.json";

/// Environment variable overriding the default library path.
pub const LIBRARY_ENV: &str = "KINO_LIBRARY";

/// CLI argument parsing & validation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "kino",
    about = "Catalog, search, and bulk-import a personal movie library."
)]
pub struct Args {
    /// Library file (JSON). Falls back to KINO_LIBRARY, then to
    /// ./kino-library.json.
    #[arg(long, value_name = "PATH", global = true)]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new library file.
    Init {
        /// Seed the library with three sample entries.
        #[arg(long)]
        samples: bool,
    },

    /// List every entry.
    List {
        /// Emit JSON output (single object).
        #[arg(long)]
        json: bool,
    },

    /// Show one entry in full.
    Show {
        #[arg(value_name = "ID")]
        id: u64,
        #[arg(long)]
        json: bool,
    },

    /// Add one entry manually.
    Add {
        #[arg(long, value_name = "NAME")]
        name: String,
        /// Release year (non-zero integer).
        #[arg(long, value_name = "YEAR", value_parser = parse_year)]
        year: i32,
        #[arg(long, value_name = "NAME", default_value = "")]
        director: String,
        /// May repeat; comma- and pipe-separated values are also split.
        #[arg(long = "actor", value_name = "NAME")]
        actors: Vec<String>,
        #[arg(long, value_name = "GENRE", default_value = "")]
        genre: String,
        /// One of: Digital, DVD, Blu-ray (exact spelling).
        #[arg(long, value_name = "FORMAT", default_value = "Digital", value_parser = parse_format)]
        format: MediaFormat,
        #[arg(long = "cover", value_name = "URL", default_value = "")]
        cover_url: String,
        #[arg(long)]
        json: bool,
    },

    /// Remove an entry by id.
    Remove {
        #[arg(value_name = "ID")]
        id: u64,
    },

    /// Search and filter the library.
    Search {
        /// Free text matched against name, director, and actors.
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
        /// Keep only these genres (repeatable).
        #[arg(long = "genre", value_name = "GENRE")]
        genres: Vec<String>,
        /// Keep only these decades, e.g. 1990s (repeatable).
        #[arg(long = "decade", value_name = "DECADE")]
        decades: Vec<String>,
        #[arg(long)]
        json: bool,
    },

    /// Bulk-import entries from a CSV export.
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Resolve a title against the metadata service.
    #[cfg(feature = "lookup")]
    Find {
        #[arg(value_name = "TITLE")]
        title: String,
        /// Insert the resolved entry into the library.
        #[arg(long)]
        add: bool,
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    pub fn parse() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// The library path after the `--library` / env / default cascade.
    pub fn library_path(&self) -> PathBuf {
        if let Some(path) = &self.library {
            return path.clone();
        }
        std::env::var_os(LIBRARY_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY))
    }
}

fn parse_year(raw: &str) -> Result<i32, String> {
    let year = raw
        .parse::<i32>()
        .map_err(|_| "year must be an integer".to_string())?;
    if year == 0 {
        return Err("year must be non-zero".to_string());
    }
    Ok(year)
}

fn parse_format(raw: &str) -> Result<MediaFormat, String> {
    MediaFormat::from_str(raw).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_parser_rejects_zero_and_text() {
        assert!(parse_year("1979").is_ok());
        assert!(parse_year("-44").is_ok());
        assert!(parse_year("0").is_err());
        assert!(parse_year("abc").is_err());
    }

    #[test]
    fn format_parser_is_strict() {
        assert_eq!(parse_format("DVD"), Ok(MediaFormat::Dvd));
        assert!(parse_format("dvd").is_err());
        assert!(parse_format("vhs").is_err());
    }

    #[test]
    fn library_cascade_prefers_the_flag() {
        let args = Args::try_parse_from(["kino", "--library", "/tmp/a.json", "list"])
            .expect("parse");
        assert_eq!(args.library_path(), PathBuf::from("/tmp/a.json"));
    }

    #[test]
    fn import_takes_a_file_and_json_flag() {
        let args = Args::try_parse_from(["kino", "import", "movies.csv", "--json"])
            .expect("parse");
        match args.command {
            Command::Import { file, json } => {
                assert_eq!(file, PathBuf::from("movies.csv"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn search_collects_repeatable_facets() {
        let args = Args::try_parse_from([
            "kino", "search", "alien", "--genre", "Horror", "--genre", "Crime", "--decade",
            "1970s",
        ])
        .expect("parse");
        match args.command {
            Command::Search {
                query,
                genres,
                decades,
                json,
            } => {
                assert_eq!(query, "alien");
                assert_eq!(genres, vec!["Horror".to_string(), "Crime".to_string()]);
                assert_eq!(decades, vec!["1970s".to_string()]);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
