use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::domain::SolverType;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB

/// Settings of the allocation service, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub json_limit: usize,
    /// Backend used when a request names none
    pub default_solver: SolverType,
    /// Wall-clock budget for a single solve
    pub solve_timeout: Option<Duration>,
    pub sentry_dsn: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            json_limit: DEFAULT_JSON_LIMIT,
            default_solver: SolverType::default(),
            solve_timeout: None,
            sentry_dsn: None,
        }
    }
}

impl ServerConfig {
    /// Read `PORT`, `JSON_PAYLOAD_LIMIT`, `SOLVER`, `SOLVE_TIMEOUT_MS` and
    /// `SENTRY_DSN`. Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = ServerConfig::default();

        let default_solver = non_empty_var("SOLVER")
            .and_then(|name| {
                let parsed = SolverType::from_name(&name);
                if parsed.is_none() {
                    warn!("Ignoring unknown SOLVER={:?}", name);
                }
                parsed
            })
            .unwrap_or(defaults.default_solver);

        ServerConfig {
            port: parse_var("PORT").unwrap_or(defaults.port),
            json_limit: parse_var("JSON_PAYLOAD_LIMIT").unwrap_or(defaults.json_limit),
            default_solver,
            solve_timeout: parse_var::<u64>("SOLVE_TIMEOUT_MS")
                .filter(|&millis| millis > 0)
                .map(Duration::from_millis),
            sentry_dsn: non_empty_var("SENTRY_DSN"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = non_empty_var(name)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}", name, raw);
            None
        }
    }
}
