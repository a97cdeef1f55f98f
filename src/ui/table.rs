use tabled::{Table, Tabled, settings::Style};

use crate::event::EventRecord;
use crate::price::PriceObservation;
use crate::query::PriceStatistics;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct EventRow<'a> {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Event")]
    event: &'a str,
    #[tabled(rename = "Category")]
    category: &'a str,
    #[tabled(rename = "Impact")]
    impact_level: &'a str,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &PriceStatistics) -> String {
    let volatility = stats
        .annualized_volatility
        .map(|v| format!("{:.2}%", v * 100.0))
        .unwrap_or_else(|| "n/a".to_string());

    let mut builder = TableBuilder::new();
    builder.add_row("Count", &stats.count.to_string());
    builder.add_row("Mean", &format!("{:.2}", stats.mean));
    builder.add_row("Median", &format!("{:.2}", stats.median));
    builder.add_row("Std Dev", &format!("{:.2}", stats.std_dev));
    builder.add_row("Min", &format!("{:.2}", stats.min));
    builder.add_row("Max", &format!("{:.2}", stats.max));
    builder.add_row("Volatility (ann.)", &volatility);
    builder.build()
}

pub fn price_table(rows: &[PriceObservation]) -> String {
    let rows: Vec<PriceRow> = rows
        .iter()
        .map(|r| PriceRow {
            date: r.date.to_string(),
            price: format!("{:.2}", r.price),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn event_table(events: &[&EventRecord]) -> String {
    let rows: Vec<EventRow<'_>> = events
        .iter()
        .map(|e| EventRow {
            date: e.date.to_string(),
            event: &e.event,
            category: &e.category,
            impact_level: &e.impact_level,
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_stats_table_lists_metrics() {
        let stats = PriceStatistics {
            mean: 50.0,
            median: 49.5,
            std_dev: 3.25,
            min: 44.0,
            max: 57.0,
            count: 4,
            annualized_volatility: None,
        };
        let table = stats_table(&stats);
        assert!(table.contains("Median"));
        assert!(table.contains("49.50"));
        assert!(table.contains("n/a"));
    }

    #[test]
    fn test_empty_builder() {
        assert!(TableBuilder::new().build().is_empty());
    }

    #[test]
    fn test_event_table() {
        let date = NaiveDate::from_ymd_opt(2022, 2, 24).unwrap();
        let event = EventRecord::new(date, "Russia invades Ukraine", "Geopolitical", "High");
        let table = event_table(&[&event]);
        assert!(table.contains("2022-02-24"));
        assert!(table.contains("Geopolitical"));
    }
}
