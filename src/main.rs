//! Exhibit - a code example catalog server and picker client.

mod catalog;
mod cli;
mod client;
mod config;
mod i18n;
mod serve;
mod utils;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use client::{Action, HttpLoader, LogNavigator, spawn_store};
use config::ExhibitConfig;
use serve::serve_catalog;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static ExhibitConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Serve { .. } => serve_catalog(config),
        Commands::Scan { .. } => scan_once(config),
        Commands::Pick {
            toggles,
            select,
            use_example,
            ..
        } => run_pick(config, toggles, select.as_deref(), *use_example),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is fine; every field has a workable default.
fn load_config(cli: &'static Cli) -> Result<ExhibitConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        ExhibitConfig::from_path(&config_path)?
    } else {
        ExhibitConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Scan the catalog once and print the result as JSON.
fn scan_once(config: &'static ExhibitConfig) -> Result<()> {
    let data = catalog::scan(&config.catalog.dir, &config.scan_options())?;
    crate::log!(
        "scan"; "{} examples, {} tags, {} errors",
        data.examples.len(),
        data.tags.len(),
        data.errors.len()
    );
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

/// Drive the picker client against a running catalog server.
fn run_pick(
    config: &'static ExhibitConfig,
    toggles: &'static [String],
    select: Option<&'static str>,
    use_example: bool,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_picker(config, toggles, select, use_example))
}

async fn run_picker(
    config: &'static ExhibitConfig,
    toggles: &'static [String],
    select: Option<&'static str>,
    use_example: bool,
) -> Result<()> {
    let lang = &config.client.lang;
    let (handle, task) = spawn_store(HttpLoader::new(), LogNavigator);

    handle
        .actions
        .send(Action::Initialize(config.client_options()))
        .await?;

    // Wait for the single load to settle either way
    let mut state_rx = handle.state.clone();
    let state = state_rx
        .wait_for(|s| s.loaded || s.last_error.is_some())
        .await?
        .clone();

    if let Some(error) = &state.last_error {
        crate::log!("error"; "{}: {error}", i18n::message(lang, "LOAD_EXAMPLES_FAILED"));
        drop(handle);
        task.await?;
        bail!("catalog load failed");
    }

    // Apply tag toggles, flipping each relative to the seeded filter
    let mut expected = state.selected_tags.clone();
    for tag in toggles {
        let selected = !expected.contains(tag);
        if selected {
            expected.insert(tag.clone());
        } else {
            expected.remove(tag);
        }
        handle
            .actions
            .send(Action::ToggleTag {
                tag: tag.clone(),
                selected,
            })
            .await?;
    }
    let state = state_rx
        .wait_for(|s| s.selected_tags == expected)
        .await?
        .clone();

    // Print the filtered listing
    crate::log!("client"; "{}", i18n::message(lang, "AVAILABLE_EXAMPLES"));
    if !state.tags.is_empty() {
        let tag_list = state
            .tags
            .iter()
            .map(|tag| i18n::message_or(lang, &format!("tag:{tag}"), tag))
            .collect::<Vec<_>>()
            .join(", ");
        crate::log!("client"; "{} {tag_list}", i18n::message(lang, "TAG_FILTERING_MESSAGE"));
    }
    for example in &state.filtered_examples {
        crate::log!("client"; "  {} ({})", example.title, example.origin);
    }

    // Select by origin and optionally launch
    if let Some(origin) = select {
        let Some(example) = state.filtered_examples.iter().find(|e| e.origin == origin) else {
            drop(handle);
            task.await?;
            bail!("example `{origin}` is not in the filtered catalog");
        };
        handle.actions.send(Action::Select(example.clone())).await?;
        if use_example {
            handle.actions.send(Action::Use).await?;
        }
    } else {
        crate::log!("client"; "{}", i18n::message(lang, "NO_EXAMPLE_SELECTED"));
    }

    drop(handle);
    task.await?;
    Ok(())
}
