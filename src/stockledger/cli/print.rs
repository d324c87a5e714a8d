use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use stockledger::analytics::{peak, DailyTotals, ProductTotals, ProductTrends};
use stockledger::config::StockConfig;
use stockledger::export::ExportOutcome;
use stockledger::index::DisplayRecord;
use stockledger::model::DATE_FORMAT;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const TIME_WIDTH: usize = 16;
const BAR_WIDTH: usize = 30;

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

pub(super) fn print_affected(verb: &str, records: &[DisplayRecord]) {
    for dr in records {
        print_success(&format!(
            "{} {}. {} x{} ({})",
            verb,
            dr.position(),
            dr.record.product_name,
            dr.record.count,
            dr.record.timestamp_string()
        ));
    }
}

pub(super) fn print_records(records: &[DisplayRecord]) {
    if records.is_empty() {
        print_info("No records found.");
        return;
    }

    let pos_width = records
        .iter()
        .map(|dr| dr.position().to_string().len())
        .max()
        .unwrap_or(1);

    for dr in records {
        let idx = format!("{:>width$}.", dr.position(), width = pos_width);
        let name = pad_to_width(&truncate_to_width(&dr.record.product_name, NAME_WIDTH), NAME_WIDTH);
        println!(
            "  {} {} {:>6}  {}  {}  {}",
            idx.yellow(),
            name,
            dr.record.count.to_string().bold(),
            dr.record.timestamp_string(),
            format_time_ago(dr.record.timestamp).dimmed(),
            format!("#{}", dr.record.short_id()).dimmed()
        );
    }
}

pub(super) fn print_summary(summary: &ProductTotals) {
    if summary.is_empty() {
        print_info("No records yet.");
        return;
    }
    for (name, total) in summary {
        println!(
            "  {} {:>8}",
            pad_to_width(&truncate_to_width(name, NAME_WIDTH), NAME_WIDTH),
            total.to_string().bold()
        );
    }
}

pub(super) fn print_daily(daily: &DailyTotals) {
    if daily.is_empty() {
        print_info("No records yet.");
        return;
    }
    print_series(daily);
}

pub(super) fn print_trends(trends: &ProductTrends) {
    if trends.is_empty() {
        print_info("No trend data.");
        return;
    }
    for (i, (name, series)) in trends.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", name.bold());
        print_series(series);
    }
}

fn print_series(series: &DailyTotals) {
    let max = peak(series).unwrap_or(0).max(1);
    for (date, total) in series {
        let len = ((*total as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
        println!(
            "  {}  {:<bar$} {}",
            date.format(DATE_FORMAT),
            "█".repeat(len.max(1)).cyan(),
            total,
            bar = BAR_WIDTH
        );
    }
}

pub(super) fn print_export(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::NoData => print_info("No records to export."),
        ExportOutcome::Written(path) => print_success(&format!("Exported to {}", path.display())),
    }
}

pub(super) fn print_config(config: &StockConfig) {
    println!("ledger-file = {}", config.ledger_file);
    match &config.export_dir {
        Some(dir) => println!("export-dir = {}", dir.display()),
        None => println!("export-dir = {}", "(current directory)".dimmed()),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

// `{:<N}` pads by chars, which misaligns wide and combining characters.
fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn format_time_ago(timestamp: NaiveDateTime) -> String {
    let now = Local::now().naive_local();
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
