//! `reefguard scan` — scan the current viewport and report sector health.

use crate::bounds::BoundingBox;
use crate::cli::output;
use crate::config::RuntimeConfig;
use crate::session::GridSession;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the scan command.
pub async fn run(
    viewport: BoundingBox,
    smooth: bool,
    export: Option<PathBuf>,
    service_url: Option<&str>,
    timeout_ms: Option<u64>,
) -> Result<()> {
    let config = RuntimeConfig::from_env()
        .with_overrides(service_url, timeout_ms)
        .context("invalid --service-url")?;

    let mut session = GridSession::new(&config);
    let mut notices = session.subscribe();
    session.update_viewport(viewport);

    let spinner = output::spinner("Scanning ocean area...");
    let scan = session.scan().await;
    spinner.finish_and_clear();

    while let Ok(event) = notices.try_recv() {
        output::print_notice(&event.notice());
    }
    let summary = scan?;

    let smoothed = if smooth {
        Some(session.smooth()?.clone())
    } else {
        None
    };
    let stats = session.stats();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "bounds": summary.bounds,
            "raw_point_count": summary.raw_point_count,
            "dimension": summary.dimension,
            "grid": session.state().grid(),
            "smoothed": smoothed,
            "stats": stats,
        }));
    } else if !output::is_quiet() {
        if let Some(table) = session.export_grid() {
            println!("{table}");
        }
        if let Some(sm) = &smoothed {
            println!("Neighborhood Averages");
            println!("{}", "=".repeat(40));
            println!();
            for row in sm.values() {
                let line: String = row.iter().map(|v| format!("{v:>4}")).collect();
                println!("{line}");
            }
            println!();
        }
        if let Some(stats) = &stats {
            println!("Average health: {}", stats.avg);
            println!(
                "Most critical: sector [{}, {}] at {}",
                stats.most_critical.row, stats.most_critical.col, stats.most_critical.health
            );
            let d = &stats.distribution;
            println!(
                "Distribution: {} critical / {} warning / {} moderate / {} healthy / {} pristine",
                d.critical, d.warning, d.moderate, d.healthy, d.pristine
            );
        }
    }

    if let Some(path) = export {
        if let Some(table) = session.export_grid() {
            output::write_file(&path, &table)?;
            if !output::is_quiet() && !output::is_json() {
                eprintln!("  Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
