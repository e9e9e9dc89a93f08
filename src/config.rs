use std::env;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use crate::competitions::{Competition, competition_by_code, parse_competition_list, scanner_defaults};
use crate::football_data::DEFAULT_BASE_URL;

pub const THRESHOLD_RANGE: (f64, f64) = (5.0, 50.0);
pub const WINDOW_HOURS_RANGE: (u32, u32) = (24, 168);
const DEFAULT_THRESHOLD_PCT: f64 = 10.0;
const DEFAULT_WINDOW_HOURS: u32 = 72;
const DEFAULT_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_DAYS_AHEAD: u32 = 7;

/// Loads `.env.local` then `.env`; values already in the environment win.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub cache_ttl: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("FOOTBALL_DATA_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("FOOTBALL_DATA_TOKEN is not set"))?;
        let base_url = lookup("FOOTBALL_DATA_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let ttl = match lookup("CACHE_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("CACHE_TTL_SECS must be a whole number of seconds")?,
            None => DEFAULT_CACHE_TTL_SECS,
        };
        Ok(Self {
            base_url,
            token,
            cache_ttl: Duration::from_secs(ttl),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub threshold_pct: f64,
    pub window_hours: u32,
    pub competitions: Vec<&'static Competition>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            window_hours: DEFAULT_WINDOW_HOURS,
            competitions: scanner_defaults(),
        }
    }
}

impl ScanConfig {
    pub fn from_env_and_args(args: &[String]) -> Result<Self> {
        Self::from_sources(|key| env::var(key).ok(), args)
    }

    pub fn from_sources(lookup: impl Fn(&str) -> Option<String>, args: &[String]) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(raw) = arg_value(args, "--threshold").or_else(|| lookup("SCAN_DIFF_THRESHOLD")) {
            let v = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("invalid threshold {raw:?}"))?;
            if !v.is_finite() {
                return Err(anyhow!("threshold must be a finite number, got {raw:?}"));
            }
            cfg.threshold_pct = v.clamp(THRESHOLD_RANGE.0, THRESHOLD_RANGE.1);
        }
        if let Some(raw) = arg_value(args, "--hours").or_else(|| lookup("SCAN_WINDOW_HOURS")) {
            let v = raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid window hours {raw:?}"))?;
            cfg.window_hours = v.clamp(WINDOW_HOURS_RANGE.0, WINDOW_HOURS_RANGE.1);
        }
        if let Some(raw) =
            arg_value(args, "--competitions").or_else(|| lookup("SCAN_COMPETITIONS"))
        {
            cfg.competitions = parse_competition_list(&raw)?;
        }
        Ok(cfg)
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub competition: &'static Competition,
    pub days_ahead: u32,
    /// `None` lists the upcoming matches instead of analysing one.
    pub match_index: Option<usize>,
}

impl AnalyzerConfig {
    pub fn from_env_and_args(args: &[String]) -> Result<Self> {
        Self::from_sources(|key| env::var(key).ok(), args)
    }

    pub fn from_sources(lookup: impl Fn(&str) -> Option<String>, args: &[String]) -> Result<Self> {
        let code = arg_value(args, "--competition")
            .or_else(|| lookup("ANALYZE_COMPETITION"))
            .unwrap_or_else(|| "PL".to_string());
        let competition = competition_by_code(&code)
            .ok_or_else(|| anyhow!("unknown competition code {code:?}"))?;

        let days_ahead = match lookup("ANALYZE_DAYS_AHEAD") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .context("ANALYZE_DAYS_AHEAD must be a whole number")?
                .max(1),
            None => DEFAULT_DAYS_AHEAD,
        };

        let match_index = arg_value(args, "--match")
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .with_context(|| format!("invalid match index {raw:?}"))
            })
            .transpose()?;

        Ok(Self {
            competition,
            days_ahead,
            match_index,
        })
    }
}

pub fn arg_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() && !next.starts_with("--") {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
