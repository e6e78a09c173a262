//! `search` and `export` handlers: one pipeline run each, then output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use salonmap_core::{BusinessRecord, FilterCriteria};
use salonmap_locator::{write_csv, ElementSource, FetchOrigin, QueryOutcome, QueryPipeline};

fn origin_label(origin: FetchOrigin) -> &'static str {
    match origin {
        FetchOrigin::Cache => "cache",
        FetchOrigin::Overpass => "overpass",
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max - 3).collect::<String>())
    } else {
        value.to_string()
    }
}

fn format_row(record: &BusinessRecord) -> String {
    format!(
        "{:<32}{:<14}{:<18}{}",
        truncate(record.name.as_deref().unwrap_or("-"), 30),
        truncate(record.category.as_deref().unwrap_or("-"), 12),
        truncate(record.city.as_deref().unwrap_or("-"), 16),
        record.address.as_deref().unwrap_or("-"),
    )
}

fn print_table(outcome: &QueryOutcome, fetched_count: usize) {
    let records = outcome.records();
    if records.is_empty() {
        println!("no businesses matched the current filters");
    } else {
        println!("{:<32}{:<14}{:<18}ADDRESS", "NAME", "CATEGORY", "CITY");
        for record in records {
            println!("{}", format_row(record));
        }
    }
    println!();
    println!(
        "{} of {} records (source: {}, fetched {})",
        records.len(),
        fetched_count,
        origin_label(outcome.origin()),
        outcome.fetched_at().format("%Y-%m-%d %H:%M UTC"),
    );
}

/// Runs one query and prints the result as a table or JSON array.
///
/// # Errors
///
/// Returns an error if the fetch fails or JSON encoding fails.
pub(crate) async fn run_search<S: ElementSource>(
    pipeline: &QueryPipeline<S>,
    criteria: &FilterCriteria,
    region_only: bool,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = pipeline.run(criteria, region_only).await?;

    match &outcome {
        QueryOutcome::NoData { .. } => {
            tracing::warn!("no data returned from Overpass; try again later");
            if json {
                println!("[]");
            } else {
                println!("no data returned from Overpass; try again later");
            }
        }
        QueryOutcome::Matches {
            records,
            fetched_count,
            ..
        } => {
            if json {
                println!("{}", serde_json::to_string_pretty(records)?);
            } else {
                print_table(&outcome, *fetched_count);
            }
        }
    }

    Ok(())
}

/// Runs one query and writes the matching records as CSV to `output`, or
/// to stdout when `output` is `None`.
///
/// # Errors
///
/// Returns an error if the fetch fails, the file cannot be created, or
/// writing fails.
pub(crate) async fn run_export<S: ElementSource>(
    pipeline: &QueryPipeline<S>,
    criteria: &FilterCriteria,
    region_only: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let outcome = pipeline.run(criteria, region_only).await?;
    if outcome.is_no_data() {
        tracing::warn!("no data returned from Overpass; writing header only");
    }
    let records = outcome.records();

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                anyhow::anyhow!("failed to create {}: {e}", path.display())
            })?;
            let mut writer = BufWriter::new(file);
            write_csv(records, &mut writer)?;
            writer.flush()?;
            tracing::info!(
                count = records.len(),
                path = %path.display(),
                "wrote csv export"
            );
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_csv(records, &mut lock)?;
            lock.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> BusinessRecord {
        BusinessRecord {
            element_type: Some("node".to_string()),
            element_id: Some(1),
            name: Some(name.to_string()),
            category: Some("hairdresser".to_string()),
            phone: None,
            website: None,
            opening_hours: None,
            address: None,
            city: Some("Welland".to_string()),
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("Cuts", 10), "Cuts");
    }

    #[test]
    fn truncate_shortens_long_values_on_char_boundaries() {
        assert_eq!(truncate("Coiffure Élégance Studio", 10), "Coiffur...");
    }

    #[test]
    fn format_row_uses_placeholder_for_missing_fields() {
        let row = format_row(&record("Jane's Salon"));
        assert!(row.starts_with("Jane's Salon"));
        assert!(row.contains("hairdresser"));
        assert!(row.contains("Welland"));
        assert!(row.ends_with('-'));
    }

    #[test]
    fn origin_label_matches_wire_names() {
        assert_eq!(origin_label(FetchOrigin::Cache), "cache");
        assert_eq!(origin_label(FetchOrigin::Overpass), "overpass");
    }
}
