use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use pari_foot::config::{ClientConfig, ScanConfig, arg_value, load_dotenv};
use pari_foot::export::export_scan_rows;
use pari_foot::football_data::FootballDataClient;
use pari_foot::http_cache::ResponseCache;
use pari_foot::logging::init_tracing;
use pari_foot::scanner::{ScanOutcome, run_scan};

fn main() -> Result<()> {
    load_dotenv();
    init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let scan_cfg = ScanConfig::from_env_and_args(&args)?;
    let client_cfg = ClientConfig::from_env()?;
    let client = FootballDataClient::new(
        &client_cfg.base_url,
        &client_cfg.token,
        ResponseCache::new(client_cfg.cache_ttl),
    )?;

    info!(
        threshold = scan_cfg.threshold_pct,
        hours = scan_cfg.window_hours,
        competitions = scan_cfg.competitions.len(),
        "scan starting"
    );
    let outcome = run_scan(&client, &scan_cfg, Utc::now(), &mut rand::thread_rng());
    print_report(&outcome, &scan_cfg);

    if let Some(path) = arg_value(&args, "--xlsx").map(PathBuf::from) {
        let written = export_scan_rows(&path, &outcome.rows)?;
        println!();
        println!("Exported {written} rows to {}", path.display());
    }

    Ok(())
}

fn print_report(outcome: &ScanOutcome, cfg: &ScanConfig) {
    println!(
        "Matches with a home/away gap >= {:.0}% in the next {}h",
        cfg.threshold_pct, cfg.window_hours
    );
    println!();

    if outcome.rows.is_empty() {
        println!("No matches above the threshold in this window.");
    } else {
        println!(
            "{:<16} {:<48} {:>7} {:>7} {:>7}  {}",
            "Competition", "Match", "Home%", "Away%", "Gap%", "Kickoff UTC"
        );
        for row in &outcome.rows {
            println!(
                "{:<16} {:<48} {:>7.1} {:>7.1} {:>7.1}  {}",
                row.competition,
                row.match_label,
                row.p_home_pct,
                row.p_away_pct,
                row.diff_pct,
                row.kickoff
            );
        }
        println!();
        for comp in &cfg.competitions {
            let n = outcome
                .rows
                .iter()
                .filter(|r| r.competition == comp.name)
                .count();
            if n > 0 {
                println!("{}: {n}", comp.name);
            }
        }
    }

    if !outcome.skipped.is_empty() {
        println!();
        println!("Skipped: {}", outcome.skipped.len());
        for skip in outcome.skipped.iter().take(8) {
            println!(
                " - [{}] {} ({}): {}",
                skip.reason.kind(),
                skip.match_label,
                skip.competition,
                skip.reason
            );
        }
    }
    for (comp, err) in &outcome.failed_competitions {
        println!("Unavailable: {comp}: {err}");
    }
}
