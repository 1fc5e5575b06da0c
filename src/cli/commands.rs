//! Command dispatch and rendering

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::CommandFactory;
use itertools::Itertools;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

use crate::application::services::{BrowseSession, CatalogService, LoadOutcome, SearchDebouncer};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{dex_number, flatten, Entry, LineageArena, LineageEntry, MaxResults};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub async fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".to_string()));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => execute_config(cli, command),
        _ => {
            let container = ServiceContainer::new(load_settings(cli)?)?;
            let catalog = &container.catalog;
            match command {
                Commands::List { pages, limit } => _list(catalog, *pages, *limit).await,
                Commands::Search { query, limit } => _search(catalog, query, *limit).await,
                Commands::Suggest { query } => _suggest(catalog, query.as_deref()).await,
                Commands::Show { id } => _show(catalog, *id).await,
                Commands::Lineage { id, tree } => _lineage(catalog, *id, *tree).await,
                Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
            }
        }
    }
}

/// Settings from config layers plus command-line overrides.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(url) = &cli.base_url {
        settings.base_url = url.trim().trim_end_matches('/').to_string();
        settings.validate()?;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(catalog))]
async fn _list(catalog: &CatalogService, pages: u32, limit: Option<u32>) -> CliResult<()> {
    let page_size = limit.unwrap_or(catalog.settings().page_size);
    if page_size == 0 {
        return Err(CliError::InvalidArgs("--limit must be greater than zero".into()));
    }
    let mut session = BrowseSession::new(page_size);

    // Ctrl-C abandons the session; pages still in flight are dropped
    let cancel = session.cancel_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let mut printed = 0;
    for _ in 0..pages {
        match session.load_next(catalog).await? {
            LoadOutcome::Appended(_) => {
                for entry in &session.entries()[printed..] {
                    output::info(entry);
                }
                printed = session.entries().len();
            }
            LoadOutcome::Exhausted => break,
            LoadOutcome::Abandoned => {
                output::warning("interrupted");
                break;
            }
        }
    }
    interrupt.abort();

    if session.pages().is_exhausted() {
        output::detail(&format!("end of catalog ({} entries)", session.entries().len()));
    }
    Ok(())
}

#[instrument(skip(catalog))]
async fn _search(catalog: &CatalogService, query: &str, limit: Option<usize>) -> CliResult<()> {
    let results = catalog.search(query, MaxResults::from(limit)).await?;
    if results.is_empty() {
        output::warning(&format!("no entries found matching \"{}\"", query));
        return Ok(());
    }
    output::header(&format!(
        "Found {} entries matching \"{}\"",
        results.len(),
        query
    ));
    for entry in &results {
        output::info(entry);
    }
    Ok(())
}

fn print_suggestions(query: &str, hits: &[Entry]) {
    if hits.is_empty() {
        output::detail(&format!("{}: -", query.trim()));
    } else {
        output::detail(&format!("{}: {}", query.trim(), hits.iter().join(", ")));
    }
}

#[instrument(skip(catalog))]
async fn _suggest(catalog: &CatalogService, query: Option<&str>) -> CliResult<()> {
    let listing = Arc::new(catalog.fetch_full_listing().await?);

    if let Some(query) = query {
        print_suggestions(query, &catalog.suggest(&listing, query));
        return Ok(());
    }

    let delay = Duration::from_millis(catalog.settings().debounce_ms);
    let mut debouncer = SearchDebouncer::new(delay);
    let mut last = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| InfraError::io("read stdin", e))?
    {
        let catalog = catalog.clone();
        let listing = Arc::clone(&listing);
        last = Some(debouncer.submit(line, move |q| async move {
            let hits = catalog.suggest(&listing, &q);
            print_suggestions(&q, &hits);
        }));
    }

    // The final query is never superseded; let it fire
    if let Some(handle) = last {
        handle
            .await
            .map_err(|e| InfraError::task("final suggestion", e))?;
    }
    Ok(())
}

#[instrument(skip(catalog))]
async fn _show(catalog: &CatalogService, id: u32) -> CliResult<()> {
    let detail = catalog.fetch_detail(id).await?;

    output::header(&format!("{} {}", detail.display_name(), detail.dex_number()));
    output::info(&detail.types.iter().map(|t| output::type_badge(t)).join(" "));
    output::detail(&format!("Height     {} m", detail.height_m()));
    output::detail(&format!("Weight     {} kg", detail.weight_kg()));
    output::detail(&format!("Abilities  {}", detail.ability_labels()));
    if let Some(url) = &detail.artwork_url {
        output::detail(&format!("Artwork    {}", url));
    }

    output::header("Base Stats");
    for stat in &detail.stats {
        output::detail(&output::stat_line(stat));
    }

    let neighbors = detail.neighbors(catalog.settings().max_id);
    let nav = [
        neighbors.prev.map(|p| format!("prev: {}", p)),
        neighbors.next.map(|n| format!("next: {}", n)),
    ];
    let nav = nav.iter().flatten().join("  ");
    if !nav.is_empty() {
        output::detail(&nav);
    }
    Ok(())
}

#[instrument(skip(catalog))]
async fn _lineage(catalog: &CatalogService, id: u32, tree: bool) -> CliResult<()> {
    let root = catalog.fetch_lineage(id).await?;
    let Some(root) = root else {
        output::warning(&format!("{} has no evolution chain", id));
        return Ok(());
    };

    let Some(chain) = render_chain(&flatten(Some(&root))) else {
        output::warning(&format!("{} does not evolve", id));
        return Ok(());
    };

    if tree {
        if let Some(rendered) = LineageArena::from_root(&root).to_termtree() {
            output::info(&rendered);
        }
    } else {
        output::info(&chain);
    }
    Ok(())
}

/// `#001 a -> #002 b`; `None` unless there are at least two stages.
fn render_chain(stages: &[LineageEntry]) -> Option<String> {
    if stages.len() < 2 {
        return None;
    }
    Some(
        stages
            .iter()
            .map(|e| format!("{} {}", dex_number(e.id), e.name))
            .join(" -> "),
    )
}

fn execute_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("cannot determine config directory"),
            }
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine config directory".to_string())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(id: u32, name: &str) -> LineageEntry {
        LineageEntry {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn given_single_stage_when_rendering_chain_then_none() {
        assert_eq!(render_chain(&[stage(132, "ditto")]), None);
        assert_eq!(render_chain(&[]), None);
    }

    #[test]
    fn given_three_stages_when_rendering_chain_then_arrow_joined() {
        let stages = [stage(1, "bulbasaur"), stage(2, "ivysaur"), stage(3, "venusaur")];
        assert_eq!(
            render_chain(&stages).as_deref(),
            Some("#001 bulbasaur -> #002 ivysaur -> #003 venusaur")
        );
    }
}
