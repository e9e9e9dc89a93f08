pub mod analyzer;
pub mod classifier;
pub mod competitions;
pub mod config;
pub mod error;
pub mod export;
pub mod features;
pub mod football_data;
pub mod form;
pub mod http_cache;
pub mod http_client;
pub mod logging;
pub mod scanner;
pub mod schedule;
pub mod standings;
pub mod team_stats;
pub mod win_prob;
