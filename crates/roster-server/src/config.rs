//! Command-line and environment configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use roster_core::{EngineConfig, MatchPolicy, Normalizer, SearchStrategy};

use crate::error::{ServerError, ServerResult};
use crate::service::{ServiceConfig, MAX_LIMIT};

/// Candidate policy as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    AllParts,
    AnyPart,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "roster-server")]
#[command(about = "Approximate Arabic name lookup over a SQLite roster")]
#[command(version)]
pub struct Config {
    /// SQLite database produced by the spreadsheet importer
    #[arg(long, env = "ROSTER_DB")]
    pub db: PathBuf,

    /// Table (or original sheet name) to read; defaults to the first table
    #[arg(long, env = "ROSTER_TABLE")]
    pub table: Option<String>,

    /// Use this column as the name column instead of detecting one
    #[arg(long, env = "ROSTER_NAME_COLUMN")]
    pub name_column: Option<String>,

    /// Candidate retrieval: in-memory or query-time
    #[arg(long, env = "ROSTER_STRATEGY", default_value = "in-memory")]
    pub strategy: SearchStrategy,

    /// Which records count as candidates
    #[arg(long, env = "ROSTER_MATCH_POLICY", value_enum, default_value = "all-parts")]
    pub match_policy: PolicyArg,

    /// Minimum score for any-part matches
    #[arg(long, env = "ROSTER_MIN_SCORE", default_value_t = 0.5)]
    pub min_score: f64,

    /// Also fold taa marbouta into haa
    #[arg(long, env = "ROSTER_FOLD_TAA_MARBOUTA")]
    pub fold_taa_marbouta: bool,

    /// In-memory index size at which scans go parallel (`parallel` builds only)
    #[arg(long, env = "ROSTER_PARALLEL_THRESHOLD", default_value_t = 10_000)]
    pub parallel_threshold: usize,

    /// Concurrent searches before queueing
    #[arg(long, env = "ROSTER_MAX_CONCURRENT", default_value_t = 10)]
    pub max_concurrent: usize,

    /// Result cache lifetime in milliseconds
    #[arg(long, env = "ROSTER_CACHE_TTL_MS", default_value_t = 60_000)]
    pub cache_ttl_ms: u64,

    /// Purge expired cache entries every N seconds (0 disables)
    #[arg(long, env = "ROSTER_CACHE_SWEEP_SECS", default_value_t = 0)]
    pub cache_sweep_secs: u64,

    /// Results returned when the request has no limit
    #[arg(long, env = "ROSTER_DEFAULT_LIMIT", default_value_t = 10)]
    pub default_limit: usize,

    /// How long a caller waits for its result
    #[arg(long, env = "ROSTER_REQUEST_TIMEOUT_MS", default_value_t = 30_000)]
    pub request_timeout_ms: u64,

    /// Bind address
    #[arg(long, env = "ROSTER_ADDRESS", default_value = "0.0.0.0")]
    pub address: String,

    /// HTTP port
    #[arg(short, long, env = "ROSTER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> ServerResult<()> {
        if self.max_concurrent == 0 {
            return Err(ServerError::Config("--max-concurrent must be at least 1".into()));
        }
        if self.cache_ttl_ms == 0 {
            return Err(ServerError::Config("--cache-ttl-ms must be positive".into()));
        }
        if self.default_limit == 0 || self.default_limit > MAX_LIMIT {
            return Err(ServerError::Config(format!(
                "--default-limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ServerError::Config("--request-timeout-ms must be positive".into()));
        }
        if !(self.min_score > 0.0 && self.min_score <= 1.0) {
            return Err(ServerError::Config(format!(
                "--min-score must be in (0, 1], got {}",
                self.min_score
            )));
        }
        Ok(())
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer {
            fold_taa_marbouta: self.fold_taa_marbouta,
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        match self.match_policy {
            PolicyArg::AllParts => MatchPolicy::AllParts,
            PolicyArg::AnyPart => MatchPolicy::AnyPart {
                min_score: self.min_score,
            },
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            strategy: self.strategy,
            policy: self.policy(),
            normalizer: self.normalizer(),
            name_column: self.name_column.clone(),
            parallel_threshold: self.parallel_threshold,
        }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            max_concurrent: self.max_concurrent,
            cache_ttl: Duration::from_millis(self.cache_ttl_ms),
            default_limit: self.default_limit,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn cache_sweep_interval(&self) -> Option<Duration> {
        (self.cache_sweep_secs > 0).then(|| Duration::from_secs(self.cache_sweep_secs))
    }

    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.address, self.port)
            .parse()
            .map_err(|e| {
                ServerError::Config(format!(
                    "failed to parse address '{}:{}': {}",
                    self.address, self.port, e
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["roster-server", "--db", "roster.db"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.strategy, SearchStrategy::InMemory);
        assert_eq!(config.policy(), MatchPolicy::AllParts);
        assert!(!config.normalizer().fold_taa_marbouta);
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.service_config().cache_ttl, Duration::from_secs(60));
        assert_eq!(config.service_config().request_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_sweep_interval(), None);
        assert_eq!(config.engine_config().parallel_threshold, 10_000);
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        config.validate().unwrap();
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--strategy",
            "query-time",
            "--match-policy",
            "any-part",
            "--min-score",
            "0.3",
            "--fold-taa-marbouta",
            "--cache-sweep-secs",
            "30",
            "--table",
            "كشف الطلاب",
            "--parallel-threshold",
            "500",
        ]);
        assert_eq!(config.engine_config().parallel_threshold, 500);
        assert_eq!(config.strategy, SearchStrategy::QueryTime);
        assert_eq!(config.policy(), MatchPolicy::AnyPart { min_score: 0.3 });
        assert!(config.engine_config().normalizer.fold_taa_marbouta);
        assert_eq!(config.cache_sweep_interval(), Some(Duration::from_secs(30)));
        assert_eq!(config.table.as_deref(), Some("كشف الطلاب"));
    }

    #[test]
    fn test_db_is_required() {
        assert!(Config::try_parse_from(["roster-server"]).is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result = Config::try_parse_from(["roster-server", "--db", "x", "--strategy", "fuzzy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for args in [
            &["--max-concurrent", "0"][..],
            &["--cache-ttl-ms", "0"],
            &["--default-limit", "0"],
            &["--default-limit", "51"],
            &["--min-score", "0"],
            &["--min-score", "1.5"],
            &["--request-timeout-ms", "0"],
        ] {
            assert!(
                matches!(parse(args).validate(), Err(ServerError::Config(_))),
                "accepted {args:?}"
            );
        }
    }

    #[test]
    fn test_bad_address() {
        let config = parse(&["--address", "not an address"]);
        assert!(config.socket_addr().is_err());
    }
}
