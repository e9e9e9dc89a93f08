use anyhow::Result;
use chrono::Utc;

use pari_foot::analyzer::{MatchAnalysis, fetch_upcoming, run_analysis, select_match};
use pari_foot::classifier::demo_classifier;
use pari_foot::config::{AnalyzerConfig, ClientConfig, load_dotenv};
use pari_foot::football_data::FootballDataClient;
use pari_foot::http_cache::ResponseCache;
use pari_foot::logging::init_tracing;

fn main() -> Result<()> {
    load_dotenv();
    init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = AnalyzerConfig::from_env_and_args(&args)?;
    let client_cfg = ClientConfig::from_env()?;
    let client = FootballDataClient::new(
        &client_cfg.base_url,
        &client_cfg.token,
        ResponseCache::new(client_cfg.cache_ttl),
    )?;

    let today = Utc::now().date_naive();
    let upcoming = fetch_upcoming(&client, cfg.competition, today, cfg.days_ahead)?;
    if upcoming.is_empty() {
        println!(
            "No {} matches in the next {} days.",
            cfg.competition.name, cfg.days_ahead
        );
        return Ok(());
    }

    let Some(index) = cfg.match_index else {
        println!("{}, next {} days:", cfg.competition.name, cfg.days_ahead);
        for (idx, m) in upcoming.iter().enumerate() {
            println!("  [{idx}] {}  {}", m.utc_date, m.label());
        }
        println!();
        println!("Pick one with --match=<index>.");
        return Ok(());
    };

    let selected = select_match(&upcoming, index)?;
    let analysis = run_analysis(&client, cfg.competition, selected, demo_classifier())?;
    print_analysis(&analysis);
    Ok(())
}

fn print_analysis(analysis: &MatchAnalysis) {
    println!("{}", analysis.match_label);
    println!(
        "Form (last 5): home {} pts, {:.2} scored / {:.2} conceded; away {} pts, {:.2} / {:.2}",
        analysis.home_form.points,
        analysis.home_form.avg_scored,
        analysis.home_form.avg_conceded,
        analysis.away_form.points,
        analysis.away_form.avg_scored,
        analysis.away_form.avg_conceded,
    );
    println!("Rank diff (away - home): {:+.0}", analysis.features.rank_diff);
    println!();
    for (label, p) in analysis.outcome_rows() {
        println!("{label:<10} {:>5.1}%", p * 100.0);
    }
    println!();
    println!("Recommendation: {}", analysis.recommendation_label());
    for caveat in &analysis.caveats {
        println!("Caveat: {caveat}");
    }
    println!("Note: {}", analysis.notice());
}
