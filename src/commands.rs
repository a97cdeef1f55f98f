use std::path::Path;

use crudewatch::config::{self, CrudewatchConfig};
use crudewatch::generator::{GenerationSummary, Generator, GeneratorConfig};
use crudewatch::output::{OutputMode, emit_json};
use crudewatch::price::format_price_date;
use crudewatch::query::{DateRange, EventFilter, QueryEngine};
use crudewatch::storage::{self, DataStore};
use crudewatch::ui::{self, Icons};
use owo_colors::OwoColorize;

use crate::{ImpactArgs, RangeArgs};

fn open_store(config: &CrudewatchConfig) -> anyhow::Result<DataStore> {
    Ok(DataStore::load(&config.prices_path(), &config.events_path())?)
}

pub async fn run_serve(config: &CrudewatchConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    ui::header("Crudewatch API");
    crudewatch::server::start_server(config.port, store).await
}

pub fn run_generate(
    generator_config: GeneratorConfig,
    output: &Path,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let mut generator = Generator::new(generator_config)?;
    let rows = generator.generate();
    storage::write_prices(output, &rows)?;
    tracing::info!("Wrote {} rows to {}", rows.len(), output.display());

    let Some(summary) = GenerationSummary::from_rows(&rows) else {
        anyhow::bail!("no trading days between the requested start and end dates");
    };

    if !mode.is_human() {
        return emit_json("generate", &summary);
    }

    ui::header("Synthetic price series");
    ui::success(&format!("Generated {} records", summary.records));
    ui::status(
        Icons::CALENDAR,
        "Date range",
        &format!(
            "{} to {}",
            format_price_date(summary.first_date),
            format_price_date(summary.last_date)
        ),
    );
    ui::status(
        Icons::STATS,
        "Price range",
        &format!("${:.2} to ${:.2}", summary.min_price, summary.max_price),
    );
    ui::status(Icons::FILE, "Saved to", &output.display().to_string());
    if generator.config().seed.is_none() {
        ui::summary_row("Seed:", &ui::muted("none (output is not reproducible)"));
    }
    Ok(())
}

pub fn run_prices(config: &CrudewatchConfig, args: &RangeArgs, mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let engine = QueryEngine::new(&store);
    let range = args.range();
    let rows = engine.filter_prices(range);

    if !mode.is_human() {
        return emit_json("prices", &rows);
    }

    ui::header(&format!("Prices {}", range));
    if rows.is_empty() {
        ui::warn("No prices in range.");
    } else {
        println!("{}", ui::price_table(rows));
        ui::summary_row("Rows:", &rows.len().to_string());
    }
    Ok(())
}

pub fn run_events(
    config: &CrudewatchConfig,
    filter: &EventFilter,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let engine = QueryEngine::new(&store);
    let events = engine.filter_events(filter);

    if !mode.is_human() {
        return emit_json("events", &events);
    }

    ui::header("Events");
    if events.is_empty() {
        ui::warn("No events match.");
    } else {
        println!("{}", ui::event_table(&events));
    }
    Ok(())
}

pub fn run_stats(config: &CrudewatchConfig, args: &RangeArgs, mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let engine = QueryEngine::new(&store);
    let range = args.range();
    let stats = engine.statistics(range)?;

    if !mode.is_human() {
        return emit_json("stats", &stats);
    }

    ui::header(&format!("Price statistics {}", range));
    println!("{}", ui::stats_table(&stats));
    Ok(())
}

pub fn run_impact(config: &CrudewatchConfig, args: &ImpactArgs, mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let engine = QueryEngine::new(&store);
    let window_days = args.window.unwrap_or(config.window_days);
    let result = engine.event_impact(args.date, window_days);

    if !mode.is_human() {
        let data = serde_json::json!({
            "event_date": result.event_date,
            "window_days": result.window_days,
            "observations": result.window.len(),
            "impact": result.impact,
        });
        return emit_json("impact", &data);
    }

    ui::header(&format!("Impact of {} (±{} days)", result.event_date, result.window_days));
    let during = EventFilter::new().with_range(DateRange::between(result.event_date, result.event_date));
    for event in engine.filter_events(&during) {
        ui::status(Icons::EVENT, "Event", &event.to_string());
    }
    ui::summary_row("Observations:", &result.window.len().to_string());

    match result.impact {
        Some(impact) => {
            ui::summary_row("Mean before:", &format!("{:.2}", impact.price_before));
            ui::summary_row("Mean after:", &format!("{:.2}", impact.price_after));
            ui::summary_row(
                "Change:",
                &ui::change(impact.absolute_change, impact.percentage_change),
            );
        }
        None => ui::warn("Not enough prices on both sides of the event to measure impact."),
    }
    Ok(())
}

pub fn run_categories(config: &CrudewatchConfig, mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let categories = QueryEngine::new(&store).categories();

    if !mode.is_human() {
        return emit_json("categories", &categories);
    }

    ui::section("Categories");
    for category in &categories.categories {
        println!("  {}", category);
    }
    ui::section("Impact levels");
    for level in &categories.impact_levels {
        println!("  {}", level);
    }
    Ok(())
}

pub fn run_range(config: &CrudewatchConfig, mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let engine = QueryEngine::new(&store);
    let Some(bounds) = engine.date_range() else {
        anyhow::bail!("no price data loaded from {}", config.prices_path().display());
    };

    if !mode.is_human() {
        return emit_json("range", &bounds);
    }

    ui::status(
        Icons::CALENDAR,
        "Date range",
        &format!("{} to {}", bounds.start_date.bold(), bounds.end_date.bold()),
    );
    let stats = store.stats();
    ui::summary_row("Prices:", &stats.prices.to_string());
    ui::summary_row("Events:", &stats.events.to_string());
    Ok(())
}

pub fn run_init(path: &Path, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let defaults = CrudewatchConfig::default();
    config::write_config(path, &defaults, force)?;

    if !mode.is_human() {
        return emit_json("init", &defaults);
    }

    ui::success(&format!("Wrote {}", path.display()));
    ui::info("Prices", &defaults.prices_path().display().to_string());
    ui::info("Events", &defaults.events_path().display().to_string());
    Ok(())
}
