use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use pari_foot::competitions::competition_by_code;
use pari_foot::config::ScanConfig;
use pari_foot::error::PipelineError;
use pari_foot::football_data::{parse_matches_json, parse_teams_json};
use pari_foot::scanner::scan_competition;
use pari_foot::schedule::parse_utc_kickoff;
use pari_foot::team_stats::build_team_stats;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn config(threshold_pct: f64) -> ScanConfig {
    ScanConfig {
        threshold_pct,
        window_hours: 72,
        competitions: vec![competition_by_code("PL").unwrap()],
    }
}

fn run(threshold_pct: f64) -> pari_foot::scanner::ScanOutcome {
    let teams = parse_teams_json(&read_fixture("teams_pl.json")).unwrap();
    let matches = parse_matches_json(&read_fixture("scheduled_pl.json")).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let stats = build_team_stats(&teams, &mut rng);
    let now = parse_utc_kickoff("2026-10-18T12:00:00Z").unwrap();
    scan_competition(
        competition_by_code("PL").unwrap(),
        &stats,
        &matches,
        now,
        &config(threshold_pct),
    )
}

#[test]
fn scan_keeps_window_edges_and_fetch_order() {
    let out = run(10.0);
    let labels: Vec<&str> = out.rows.iter().map(|r| r.match_label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Liverpool FC vs Manchester City FC",
            "Arsenal FC vs Liverpool FC",
            "Manchester City FC vs Liverpool FC",
        ]
    );

    let first = &out.rows[0];
    assert_eq!(first.competition, "Premier League");
    assert_eq!(first.p_home_pct, 75.0);
    assert_eq!(first.p_away_pct, 25.0);
    assert_eq!(first.diff_pct, 50.0);
    assert_eq!(first.kickoff, "2026-10-18 12:00");

    let second = &out.rows[1];
    assert_eq!(second.p_home_pct, 40.0);
    assert_eq!(second.p_away_pct, 60.0);
    assert_eq!(second.diff_pct, 20.0);

    assert_eq!(out.rows[2].kickoff, "2026-10-21 12:00");
}

#[test]
fn bad_records_are_skipped_not_fatal() {
    let out = run(10.0);
    assert_eq!(out.skipped.len(), 2);
    assert!(matches!(
        out.skipped[0].reason,
        PipelineError::MalformedTimestamp { .. }
    ));
    assert_eq!(
        out.skipped[1].reason,
        PipelineError::MissingTeamStats {
            team: "Manchester United FC".to_string()
        }
    );
    assert_eq!(out.skipped[1].match_label, "Manchester United FC vs Arsenal FC");
}

#[test]
fn higher_threshold_drops_narrow_gaps() {
    let out = run(25.0);
    assert_eq!(out.rows.len(), 2);
    assert!(out.rows.iter().all(|r| r.diff_pct >= 25.0));
    assert!(out.rows.iter().all(|r| r.match_label != "Arsenal FC vs Liverpool FC"));
}

#[test]
fn null_kickoff_is_reported_and_the_rest_of_the_payload_scans() {
    let teams = parse_teams_json(&read_fixture("teams_pl.json")).unwrap();
    let matches = parse_matches_json(&read_fixture("matches_mixed.json")).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let stats = build_team_stats(&teams, &mut rng);
    let now = parse_utc_kickoff("2026-10-18T12:00:00Z").unwrap();
    let out = scan_competition(
        competition_by_code("PL").unwrap(),
        &stats,
        &matches,
        now,
        &config(10.0),
    );

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].match_label, "Liverpool FC vs Manchester City FC");
    assert_eq!(out.skipped.len(), 1);
    assert_eq!(out.skipped[0].match_label, "Arsenal FC vs Chelsea FC");
    assert_eq!(
        out.skipped[0].reason,
        PipelineError::MalformedTimestamp { raw: String::new() }
    );
}
