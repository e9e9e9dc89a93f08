use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use pari_foot::classifier::{OutcomeClassifier, demo_classifier, demo_training_set};
use pari_foot::competitions::competition_by_code;
use pari_foot::config::ScanConfig;
use pari_foot::football_data::{MatchRecord, TeamRef};
use pari_foot::scanner::scan_competition;
use pari_foot::schedule::parse_utc_kickoff;
use pari_foot::team_stats::{Imputed, TeamStats, TeamStatsTable};

fn sample_table(teams: u32) -> TeamStatsTable {
    let mut table = TeamStatsTable::default();
    for idx in 0..teams {
        table.insert(
            &format!("Team {idx}"),
            TeamStats {
                goals_for: 8.0 + f64::from(idx % 17),
                goals_against: 6.0 + f64::from(idx % 11),
                matches_played: 10,
            },
            Imputed::default(),
        );
    }
    table
}

fn sample_matches(teams: u32, n: u32) -> Vec<MatchRecord> {
    (0..n)
        .map(|idx| {
            let home = idx % teams;
            let away = (idx * 7 + 3) % teams;
            MatchRecord {
                id: u64::from(idx),
                utc_date: format!("2026-10-{:02}T{:02}:00:00Z", 18 + idx % 4, 12 + idx % 8),
                status: "SCHEDULED".to_string(),
                home: TeamRef {
                    id: home,
                    name: format!("Team {home}"),
                },
                away: TeamRef {
                    id: away,
                    name: format!("Team {away}"),
                },
                home_goals: None,
                away_goals: None,
            }
        })
        .collect()
}

fn bench_scan_competition(c: &mut Criterion) {
    let table = sample_table(20);
    let matches = sample_matches(20, 380);
    let comp = competition_by_code("PL").expect("known code");
    let cfg = ScanConfig::default();
    let now = parse_utc_kickoff("2026-10-18T00:00:00Z").expect("valid kickoff");

    c.bench_function("scan_competition_380", |b| {
        b.iter(|| {
            let out = scan_competition(comp, black_box(&table), black_box(&matches), now, &cfg);
            black_box(out.rows.len());
        })
    });
}

fn bench_classifier(c: &mut Criterion) {
    let rows = demo_training_set();
    c.bench_function("classifier_fit", |b| {
        b.iter(|| black_box(OutcomeClassifier::fit(black_box(&rows))))
    });

    let model = demo_classifier();
    let features = rows[2].features;
    c.bench_function("classifier_predict", |b| {
        b.iter(|| black_box(model.predict_proba(black_box(&features))))
    });
}

criterion_group!(benches, bench_scan_competition, bench_classifier);
criterion_main!(benches);
