//! Command dispatch: one function per subcommand, each producing an outcome
//! plus fully rendered output.

use std::error::Error;

use crate::catalog::entry::EntryDraft;
use crate::catalog::search::{SearchFilter, filter_entries};
use crate::catalog::store::{CatalogStore, JsonFileStore, sample_entries};
use crate::import::intake::read_import_file;
use crate::import::runner::run_import;
use crate::output::human::{render_entry, render_entry_list, render_report};
use crate::output::json::{JsonEntries, JsonImport, JsonRefusal, render_json};

use super::args::{Args, Command};
use super::exit::{Outcome, OutputMode};

pub struct CommandResult {
    pub outcome: Outcome,
    pub mode: OutputMode,
    pub output: String,
}

impl CommandResult {
    fn human(outcome: Outcome, lines: Vec<String>) -> Self {
        Self {
            outcome,
            mode: OutputMode::Human,
            output: lines.join("\n"),
        }
    }

    fn json(outcome: Outcome, body: String) -> Self {
        Self {
            outcome,
            mode: OutputMode::Json,
            output: body,
        }
    }

    fn refusal(json_mode: bool, message: impl Into<String>) -> Self {
        let message = message.into();
        if json_mode {
            Self::json(Outcome::Refusal, render_json(&JsonRefusal::new(message)))
        } else {
            Self::human(Outcome::Refusal, vec![message])
        }
    }
}

pub fn run(args: &Args) -> Result<CommandResult, Box<dyn Error>> {
    let library = args.library_path();

    match &args.command {
        Command::Init { samples } => {
            let entries = if *samples { sample_entries() } else { Vec::new() };
            let seeded = entries.len();
            match JsonFileStore::create(&library, entries) {
                Ok(store) => Ok(CommandResult::human(
                    Outcome::Clean,
                    vec![format!(
                        "Created library at {} ({seeded} entries)",
                        store.path().display()
                    )],
                )),
                Err(err) => Ok(CommandResult::refusal(false, err.to_string())),
            }
        }

        Command::List { json } => {
            let store = JsonFileStore::open(&library)?;
            let entries = store.list();
            if *json {
                Ok(CommandResult::json(
                    Outcome::Clean,
                    render_json(&JsonEntries::new(entries)),
                ))
            } else {
                let refs: Vec<&_> = entries.iter().collect();
                Ok(CommandResult::human(Outcome::Clean, render_entry_list(&refs)))
            }
        }

        Command::Show { id, json } => {
            let store = JsonFileStore::open(&library)?;
            match store.get(*id) {
                Some(entry) if *json => Ok(CommandResult::json(
                    Outcome::Clean,
                    render_json(&JsonEntries::new(vec![entry])),
                )),
                Some(entry) => Ok(CommandResult::human(Outcome::Clean, render_entry(&entry))),
                None => Ok(CommandResult::refusal(
                    *json,
                    format!("no entry with id {id}"),
                )),
            }
        }

        Command::Add {
            name,
            year,
            director,
            actors,
            genre,
            format,
            cover_url,
            json,
        } => {
            let mut store = JsonFileStore::open(&library)?;
            let draft = EntryDraft {
                name: name.clone(),
                year: *year,
                director: director.clone(),
                actors: actors
                    .iter()
                    .flat_map(|value| crate::import::fields::split_actors(value))
                    .collect(),
                genre: genre.clone(),
                format: *format,
                cover_url: cover_url.clone(),
            }
            .with_defaults();
            let entry = store.insert(draft)?;
            if *json {
                Ok(CommandResult::json(
                    Outcome::Clean,
                    render_json(&JsonEntries::new(vec![entry])),
                ))
            } else {
                Ok(CommandResult::human(
                    Outcome::Clean,
                    vec![format!(
                        "Added \"{}\" ({}) as #{}",
                        entry.name, entry.year, entry.id
                    )],
                ))
            }
        }

        Command::Remove { id } => {
            let mut store = JsonFileStore::open(&library)?;
            match store.delete(*id) {
                Ok(()) => Ok(CommandResult::human(
                    Outcome::Clean,
                    vec![format!("Removed entry #{id}")],
                )),
                Err(err) => Ok(CommandResult::refusal(false, err.to_string())),
            }
        }

        Command::Search {
            query,
            genres,
            decades,
            json,
        } => {
            let store = JsonFileStore::open(&library)?;
            let entries = store.list();
            let filter = SearchFilter {
                query: query.clone(),
                genres: genres.clone(),
                decades: decades.clone(),
            };
            let hits = filter_entries(&entries, &filter);
            if *json {
                let owned: Vec<_> = hits.into_iter().cloned().collect();
                Ok(CommandResult::json(
                    Outcome::Clean,
                    render_json(&JsonEntries::new(owned)),
                ))
            } else {
                Ok(CommandResult::human(Outcome::Clean, render_entry_list(&hits)))
            }
        }

        Command::Import { file, json } => {
            let text = match read_import_file(file) {
                Ok(text) => text,
                Err(err) => return Ok(CommandResult::refusal(*json, err.to_string())),
            };
            let mut store = JsonFileStore::open(&library)?;
            match run_import(&text, &mut store) {
                Ok(report) => {
                    let outcome = if report.failed == 0 {
                        Outcome::Clean
                    } else {
                        Outcome::Partial
                    };
                    if *json {
                        Ok(CommandResult::json(
                            outcome,
                            render_json(&JsonImport::from_report(
                                file.display().to_string(),
                                &report,
                            )),
                        ))
                    } else {
                        Ok(CommandResult::human(outcome, render_report(&report)))
                    }
                }
                Err(err) => Ok(CommandResult::refusal(*json, err.to_string())),
            }
        }

        #[cfg(feature = "lookup")]
        Command::Find { title, add, json } => find(&library, title, *add, *json),
    }
}

#[cfg(feature = "lookup")]
fn find(
    library: &std::path::Path,
    title: &str,
    add: bool,
    json: bool,
) -> Result<CommandResult, Box<dyn Error>> {
    use serde_json::json;

    use crate::lookup::{LookupOutcome, OmdbClient};
    use crate::output::json::SCHEMA_VERSION;

    let Some(client) = OmdbClient::from_env() else {
        return Ok(CommandResult::refusal(
            json,
            "OMDB_API_KEY is not set; metadata lookup is disabled",
        ));
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(client.lookup(title));

    match outcome {
        LookupOutcome::Found(draft) => {
            if add {
                let mut store = JsonFileStore::open(library)?;
                let entry = store.insert(draft)?;
                if json {
                    Ok(CommandResult::json(
                        Outcome::Clean,
                        render_json(&JsonEntries::new(vec![entry])),
                    ))
                } else {
                    Ok(CommandResult::human(
                        Outcome::Clean,
                        vec![format!(
                            "Added \"{}\" ({}) as #{}",
                            entry.name, entry.year, entry.id
                        )],
                    ))
                }
            } else if json {
                Ok(CommandResult::json(
                    Outcome::Clean,
                    render_json(&json!({
                        "version": SCHEMA_VERSION,
                        "found": true,
                        "entry": draft,
                    })),
                ))
            } else {
                Ok(CommandResult::human(
                    Outcome::Clean,
                    vec![
                        format!("{} ({})", draft.name, draft.year),
                        format!("  director: {}", draft.director),
                        format!("  actors:   {}", draft.actors.join(", ")),
                        format!("  genre:    {}", draft.genre),
                        format!("  cover:    {}", draft.cover_url),
                    ],
                ))
            }
        }
        LookupOutcome::NotFound { reason } => {
            let detail = reason.unwrap_or_else(|| "no match".to_string());
            if json {
                Ok(CommandResult::json(
                    Outcome::Partial,
                    render_json(&json!({
                        "version": SCHEMA_VERSION,
                        "found": false,
                        "error": detail,
                    })),
                ))
            } else {
                Ok(CommandResult::human(
                    Outcome::Partial,
                    vec![format!("No match for \"{title}\": {detail}")],
                ))
            }
        }
    }
}
