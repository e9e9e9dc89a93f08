use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::http_cache::{ResponseCache, fetch_json_cached};
use crate::http_client::http_client;

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";
const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRecord {
    pub id: u32,
    pub name: String,
    pub short_name: Option<String>,
    pub goals_for: Option<f64>,
    pub goals_against: Option<f64>,
    pub played_games: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: u64,
    pub utc_date: String,
    pub status: String,
    pub home: TeamRef,
    pub away: TeamRef,
    pub home_goals: Option<u8>,
    pub away_goals: Option<u8>,
}

impl MatchRecord {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home.name, self.away.name)
    }

    pub fn is_finished(&self) -> bool {
        self.status.eq_ignore_ascii_case("FINISHED")
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home.id == team_id || self.away.id == team_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub position: u32,
    pub team_id: u32,
    pub team_name: String,
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    id: u32,
    name: String,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    #[serde(rename = "goalsFor")]
    goals_for: Option<f64>,
    #[serde(rename = "goalsAgainst")]
    goals_against: Option<f64>,
    #[serde(rename = "playedGames")]
    played_games: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiMatch {
    id: u64,
    #[serde(rename = "utcDate", default)]
    utc_date: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "homeTeam", default)]
    home_team: Option<ApiTeamRef>,
    #[serde(rename = "awayTeam", default)]
    away_team: Option<ApiTeamRef>,
    #[serde(default)]
    score: Option<ApiScore>,
}

#[derive(Debug, Deserialize)]
struct ApiTeamRef {
    id: Option<u32>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiScore {
    #[serde(rename = "fullTime")]
    full_time: Option<ApiScoreLine>,
}

#[derive(Debug, Deserialize)]
struct ApiScoreLine {
    home: Option<u8>,
    away: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    standings: Option<Vec<ApiStanding>>,
}

#[derive(Debug, Deserialize)]
struct ApiStanding {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    table: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiTableRow {
    position: u32,
    team: Option<ApiTeamRef>,
}

fn is_blank(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "null"
}

// A record that does not fit its shape is logged and dropped; the rest of
// the payload still parses.
fn decode_records<T: DeserializeOwned>(items: Option<Vec<Value>>, kind: &'static str) -> Vec<T> {
    items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(kind, index = idx, error = %err, "dropping malformed record");
                None
            }
        })
        .collect()
}

pub fn parse_teams_json(raw: &str) -> Result<Vec<TeamRecord>> {
    if is_blank(raw) {
        return Ok(Vec::new());
    }
    let resp: TeamsResponse = serde_json::from_str(raw.trim()).context("invalid teams json")?;
    Ok(decode_records::<ApiTeam>(resp.teams, "team")
        .into_iter()
        .filter(|t| !t.name.trim().is_empty())
        .map(|t| TeamRecord {
            id: t.id,
            name: t.name,
            short_name: t.short_name,
            goals_for: t.goals_for,
            goals_against: t.goals_against,
            played_games: t.played_games,
        })
        .collect())
}

/// Parses a `matches` payload. Fixtures whose teams are not yet known (cup
/// draws still pending) carry no id or name and are dropped. A null kickoff
/// is kept as an empty string so the scanner reports it as malformed.
pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchRecord>> {
    if is_blank(raw) {
        return Ok(Vec::new());
    }
    let resp: MatchesResponse = serde_json::from_str(raw.trim()).context("invalid matches json")?;
    let decoded = decode_records::<ApiMatch>(resp.matches, "match");
    let mut out = Vec::with_capacity(decoded.len());
    for m in decoded {
        let home = m.home_team.and_then(team_ref);
        let away = m.away_team.and_then(team_ref);
        let (Some(home), Some(away)) = (home, away) else {
            debug!(match_id = m.id, "dropping match with unresolved teams");
            continue;
        };
        let full_time = m.score.and_then(|s| s.full_time);
        let (home_goals, away_goals) = match full_time {
            Some(line) => (line.home, line.away),
            None => (None, None),
        };
        out.push(MatchRecord {
            id: m.id,
            utc_date: m.utc_date.unwrap_or_default(),
            status: m.status.unwrap_or_default(),
            home,
            away,
            home_goals,
            away_goals,
        });
    }
    Ok(out)
}

/// Returns the `TOTAL` table (falling back to the first table served), sorted
/// by position.
pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingRow>> {
    if is_blank(raw) {
        return Ok(Vec::new());
    }
    let resp: StandingsResponse =
        serde_json::from_str(raw.trim()).context("invalid standings json")?;
    let mut tables = resp.standings.unwrap_or_default();
    if tables.is_empty() {
        return Ok(Vec::new());
    }
    let idx = tables
        .iter()
        .position(|s| {
            s.kind
                .as_deref()
                .is_some_and(|k| k.eq_ignore_ascii_case("TOTAL"))
        })
        .unwrap_or(0);
    let table = tables.swap_remove(idx).table;

    let mut rows: Vec<StandingRow> = decode_records::<ApiTableRow>(table, "standing")
        .into_iter()
        .filter_map(|row| {
            let team = team_ref(row.team?)?;
            Some(StandingRow {
                position: row.position,
                team_id: team.id,
                team_name: team.name,
            })
        })
        .collect();
    rows.sort_by_key(|r| r.position);
    Ok(rows)
}

fn team_ref(raw: ApiTeamRef) -> Option<TeamRef> {
    let name = raw.name?;
    if name.trim().is_empty() {
        return None;
    }
    Some(TeamRef { id: raw.id?, name })
}

/// football-data.org v4 client. Shares the process-wide HTTP client; every
/// GET goes through the injected response cache.
pub struct FootballDataClient {
    http: &'static Client,
    base_url: String,
    token: String,
    cache: ResponseCache,
}

impl FootballDataClient {
    pub fn new(base_url: &str, token: &str, cache: ResponseCache) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            cache,
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn get(&self, path: &str) -> Result<String> {
        let url = format!("{}{path}", self.base_url);
        fetch_json_cached(self.http, &self.cache, &url, &[(AUTH_HEADER, &self.token)])
            .with_context(|| format!("GET {path}"))
    }

    pub fn fetch_teams(&self, competition: &str) -> Result<Vec<TeamRecord>> {
        let body = self.get(&format!("/competitions/{competition}/teams"))?;
        parse_teams_json(&body)
    }

    pub fn fetch_scheduled_matches(&self, competition: &str) -> Result<Vec<MatchRecord>> {
        let body = self.get(&format!(
            "/competitions/{competition}/matches?status=SCHEDULED"
        ))?;
        parse_matches_json(&body)
    }

    pub fn fetch_matches_between(
        &self,
        competition: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MatchRecord>> {
        let body = self.get(&format!(
            "/matches?competitions={competition}&dateFrom={}&dateTo={}",
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        ))?;
        parse_matches_json(&body)
    }

    pub fn fetch_finished_matches(&self, team_id: u32, limit: usize) -> Result<Vec<MatchRecord>> {
        let body = self.get(&format!(
            "/teams/{team_id}/matches?status=FINISHED&limit={limit}"
        ))?;
        parse_matches_json(&body)
    }

    pub fn fetch_standings(&self, competition: &str) -> Result<Vec<StandingRow>> {
        let body = self.get(&format!("/competitions/{competition}/standings"))?;
        parse_standings_json(&body)
    }
}
