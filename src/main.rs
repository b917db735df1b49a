use std::sync::Arc;

use tracing::info;

use hallplan::engine::Engine;
use hallplan::layout::HallLayout;
use hallplan::model::{ReservationStatus, Span};
use hallplan::notify::NotifyHub;
use hallplan::time::minutes_to_time;

/// Print the day plan of a saved hall layout.
///
/// HALLPLAN_LAYOUT  path to the layout JSON (required)
/// HALLPLAN_DATE    day to report, YYYY-MM-DD (default: today)
/// HALLPLAN_TODAY   what counts as today (default: local date)
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let layout_path = std::env::var("HALLPLAN_LAYOUT")
        .map_err(|_| "HALLPLAN_LAYOUT must point to a hall layout JSON file")?;
    let today = std::env::var("HALLPLAN_TODAY")
        .unwrap_or_else(|_| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());
    let date = std::env::var("HALLPLAN_DATE").unwrap_or_else(|_| today.clone());
    hallplan::time::validate_date(&date)?;

    let json = std::fs::read_to_string(&layout_path)?;
    let layout = HallLayout::from_json(&json)?;

    let engine = Engine::new(Arc::new(NotifyHub::new()));
    engine.load_layout(layout)?;
    info!("hallplan: {layout_path}");
    info!("  date: {date}");
    info!("  today: {today}");

    for table in engine.list_tables().await {
        let status = engine.reservation_status(&table.id, &date, &today).await?;
        let free = engine.free_spans(&table.id, &date).await?;
        let label = match &status {
            ReservationStatus::Free => "FREE".to_string(),
            ReservationStatus::Reserved { ranges } => format!("RESERVED {}", join(ranges)),
            ReservationStatus::ReservedToday { ranges } => format!("RESERVED TODAY {}", join(ranges)),
        };
        println!(
            "table {:>6}  {:>2}/{:<2} seats free  {label}",
            table.id.to_string(),
            table.empty_seats,
            table.chair_count
        );
        println!("              open: {}", format_spans(&free));
    }

    Ok(())
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

fn format_spans(spans: &[Span]) -> String {
    if spans.is_empty() {
        return "none".to_string();
    }
    let end = |m: u32| if m == 1440 { "24:00".to_string() } else { minutes_to_time(m) };
    spans
        .iter()
        .map(|s| format!("{}-{}", minutes_to_time(s.start), end(s.end)))
        .collect::<Vec<_>>()
        .join(", ")
}
