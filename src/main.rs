use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod config;
mod items;
mod render;
mod search_query;
mod storage;
#[cfg(test)]
mod tests;

use app::{backend::PreferenceStore, AppFactory, SearchResults};
use items::SourceKind;

const LOG_ENV: &str = "TABFIND_LOG";

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    let paths = AppFactory::get_paths()?;
    let mut config = AppFactory::create_config(&paths)?;

    match args.command {
        cli::Command::Search {
            query,
            profile,
            json,
        } => {
            let profile = profile.unwrap_or_else(|| config.selected_profile());
            let query = query.join(" ");
            let _span = tracing::info_span!("search", %profile, %query).entered();

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start runtime")?;

            let results = runtime.block_on(async {
                let mut aggregator = AppFactory::create_aggregator(&config);
                aggregator.mount(&profile);
                aggregator.set_query(query);
                aggregator.settled().await;
                aggregator.results()
            });

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }
            Ok(())
        }

        cli::Command::Profile { id } => {
            match id {
                Some(id) => {
                    config.selected_profile = Some(id);
                    config.save()?;
                    println!("Selected profile: {}", config.selected_profile());
                }
                None => println!("{}", config.selected_profile()),
            }
            Ok(())
        }

        cli::Command::Profiles {} => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start runtime")?;

            let provider = AppFactory::create_provider(&config);
            let profiles = runtime.block_on(provider.list_profiles())?;
            let selected = config.selected_profile();
            for profile in profiles {
                let marker = if profile == selected { "*" } else { " " };
                println!("{marker} {profile}");
            }
            Ok(())
        }
    }
}

fn print_results(results: &SearchResults) {
    println!("{}", render::new_tab_title(&results.query));

    for section in results.sections() {
        if let Some(kind) = section.error() {
            println!();
            println!("[{}] {}", section.kind.label(), render::error_message(kind));
            continue;
        }
        if section.items.is_empty() {
            continue;
        }

        if section.kind == SourceKind::History {
            let today = chrono::Local::now().date_naive();
            for (label, items) in render::group_by_date(&section.items, today) {
                println!();
                println!("{label}");
                for item in items {
                    print_row(item);
                }
            }
        } else {
            println!();
            for item in &section.items {
                print_row(item);
            }
        }
    }
}

fn print_row(item: &items::Item) {
    let row = render::render_item(item);
    println!("  {}  {}  {}", row.accessory, row.title, row.subtitle);
}
