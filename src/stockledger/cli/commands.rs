use super::print::{
    print_affected, print_config, print_daily, print_export, print_info, print_records,
    print_summary, print_trends,
};
use super::setup::{Cli, Commands, HOME_ENV};
use directories::ProjectDirs;
use log::debug;
use std::path::PathBuf;
use stockledger::api::{ConfigAction, RecordFilter, RecordUpdate, StockApi, StockPaths};
use stockledger::config::StockConfig;
use stockledger::error::{LedgerError, Result};
use stockledger::export::write_csv;
use stockledger::model::ConfirmedCounts;
use stockledger::store::fs_backend::FsBackend;
use stockledger::store::LedgerStore;

struct AppContext {
    api: StockApi<FsBackend>,
}

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { product, count }) => handle_add(&mut ctx, &product, count),
        Some(Commands::Record { entries }) => handle_record(&mut ctx, &entries),
        Some(Commands::List {
            name,
            date,
            oldest_first,
        }) => handle_list(&ctx, RecordFilter { name, date }, oldest_first),
        Some(Commands::Edit {
            selector,
            name,
            count,
        }) => handle_edit(&mut ctx, &selector, RecordUpdate::new(name, count)),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, &selectors),
        Some(Commands::Summary) => handle_summary(&ctx),
        Some(Commands::Daily) => handle_daily(&ctx),
        Some(Commands::Trends { product }) => handle_trends(&ctx, product.as_deref()),
        Some(Commands::Export { out, stdout }) => handle_export(&ctx, out, stdout),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, RecordFilter::default(), false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.dir.clone())?;
    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = StockConfig::load(&data_dir)?;
    let backend = FsBackend::in_dir(&data_dir, &config.ledger_file);
    debug!("ledger file: {}", backend.path().display());

    let store = LedgerStore::open(backend)?;
    let paths = StockPaths { data_dir, work_dir };

    Ok(AppContext {
        api: StockApi::new(store, paths),
    })
}

/// `--dir`, then `$STOCKLEDGER_HOME`, then the platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "stockledger", "stockledger")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| LedgerError::Config("could not determine a data directory".to_string()))
}

fn handle_add(ctx: &mut AppContext, product: &str, count: i64) -> Result<()> {
    let result = ctx.api.add_record(product, count)?;
    print_affected("Added", &result.affected_records);
    Ok(())
}

fn handle_record(ctx: &mut AppContext, entries: &[String]) -> Result<()> {
    let batch = parse_entries(entries)?;
    let result = ctx.api.record_detections(&batch)?;
    if result.affected_records.is_empty() {
        print_info("Nothing to record: every count was zero.");
    }
    print_affected("Recorded", &result.affected_records);
    Ok(())
}

fn handle_list(ctx: &AppContext, filter: RecordFilter, oldest_first: bool) -> Result<()> {
    let mut result = ctx.api.list_records(&filter)?;
    if !oldest_first {
        result.listed_records.reverse();
    }
    print_records(&result.listed_records);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, selector: &str, update: RecordUpdate) -> Result<()> {
    let result = ctx.api.update_record(selector, &update)?;
    print_affected("Updated", &result.affected_records);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: &[String]) -> Result<()> {
    let result = ctx.api.delete_records(selectors)?;
    print_affected("Deleted", &result.affected_records);
    Ok(())
}

fn handle_summary(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.summary()?;
    if let Some(summary) = &result.summary {
        print_summary(summary);
    }
    Ok(())
}

fn handle_daily(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.daily()?;
    if let Some(daily) = &result.daily {
        print_daily(daily);
    }
    Ok(())
}

fn handle_trends(ctx: &AppContext, product: Option<&str>) -> Result<()> {
    let result = ctx.api.trends(product)?;
    if let Some(trends) = &result.trends {
        print_trends(trends);
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, out: Option<PathBuf>, stdout: bool) -> Result<()> {
    if stdout {
        let records = ctx.api.store().all_records();
        if records.is_empty() {
            eprintln!("No records to export.");
            return Ok(());
        }
        write_csv(std::io::stdout().lock(), records)?;
        return Ok(());
    }

    let result = ctx.api.export(out)?;
    if let Some(outcome) = &result.export {
        print_export(outcome);
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (Some(key), Some(value)) => {
            let result = ctx.api.config(ConfigAction::Set(key, value))?;
            if let Some(config) = &result.config {
                print_config(config);
            }
        }
        (Some(key), None) => {
            let result = ctx.api.config(ConfigAction::ShowAll)?;
            if let Some(config) = &result.config {
                match key.as_str() {
                    "ledger-file" => println!("{}", config.ledger_file),
                    "export-dir" => match &config.export_dir {
                        Some(dir) => println!("{}", dir.display()),
                        None => print_info("(current directory)"),
                    },
                    other => {
                        return Err(LedgerError::Config(format!("Unknown config key: {}", other)))
                    }
                }
            }
        }
        (None, _) => {
            let result = ctx.api.config(ConfigAction::ShowAll)?;
            if let Some(config) = &result.config {
                print_config(config);
            }
        }
    }
    Ok(())
}

/// Parses `label=count` entries into one batch. Repeated labels are summed.
fn parse_entries(entries: &[String]) -> Result<ConfirmedCounts> {
    let mut batch = ConfirmedCounts::new();
    for entry in entries {
        let (label, count) = entry.rsplit_once('=').ok_or_else(|| {
            LedgerError::Api(format!("Expected label=count, got '{}'", entry))
        })?;
        let label = label.trim();
        if label.is_empty() {
            return Err(LedgerError::Api(format!("Missing label in '{}'", entry)));
        }
        let count: u32 = count.trim().parse().map_err(|_| {
            LedgerError::Api(format!("Count must be a non-negative integer in '{}'", entry))
        })?;
        let slot = batch.entry(label.to_string()).or_insert(0);
        *slot = slot
            .checked_add(count)
            .ok_or_else(|| LedgerError::Api(format!("Count too large for '{}'", label)))?;
    }
    Ok(batch)
}
