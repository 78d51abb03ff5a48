//! `reefguard rank` — scan, then fetch the restoration priority roadmap.

use crate::bounds::BoundingBox;
use crate::cli::output;
use crate::config::RuntimeConfig;
use crate::session::GridSession;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the rank command. Ranking needs an active grid, so this scans first.
pub async fn run(
    viewport: BoundingBox,
    top: usize,
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
    scan?;

    let spinner = output::spinner("Generating restoration roadmap...");
    let rank = session.rank().await.map(|cells| cells.len());
    spinner.finish_and_clear();
    while let Ok(event) = notices.try_recv() {
        output::print_notice(&event.notice());
    }
    rank?;

    let ranking = session.state().ranking().unwrap_or(&[]);

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "bounds": session.state().active_bounds(),
            "ranking": ranking,
        }));
    } else if !output::is_quiet() {
        println!("Restoration Priority Roadmap");
        println!("{}", "=".repeat(40));
        println!(
            "{:>4}  {:>3} {:>3}  {:>6}  {:>7}  {:>6}",
            "Rank", "Row", "Col", "Health", "Species", "Temp"
        );
        for (i, cell) in ranking.iter().take(top).enumerate() {
            let species = cell
                .species_count
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".into());
            let temp = cell
                .water_temp_c
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".into());
            println!(
                "{:>4}  {:>3} {:>3}  {:>6}  {:>7}  {:>6}",
                i + 1,
                cell.row,
                cell.col,
                cell.health,
                species,
                temp
            );
        }
        if ranking.len() > top {
            println!(
                "  ... {} more sectors (raise --top or use --export)",
                ranking.len() - top
            );
        }
    }

    if let Some(path) = export {
        if let Some(csv) = session.export_ranking() {
            output::write_file(&path, &csv)?;
            if !output::is_quiet() && !output::is_json() {
                eprintln!("  Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
