//! Planner defaults from environment.

use flightpath_core::{CentralPolicy, PlannerConfig, DEFAULT_MAX_EXPANSIONS};
use std::env;
use tracing_subscriber::filter::{EnvFilter, ParseError};

/// Default log directives: the planner library plus the binary's own target.
pub const LOG_DIRECTIVES: [&str; 2] = ["flightpath=info", "plan_route=info"];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Per-stage expansion budget; `None` disables it.
    pub max_expansions: Option<usize>,
    pub enforce_central: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            max_expansions: lookup("FLIGHTPATH_MAX_EXPANSIONS")
                .and_then(|s| s.trim().parse().ok())
                .map_or(Some(DEFAULT_MAX_EXPANSIONS), budget),
            enforce_central: lookup("FLIGHTPATH_ENFORCE_CENTRAL")
                .map(|s| parse_flag(&s))
                .unwrap_or(false),
        }
    }

    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            max_expansions: self.max_expansions,
            central_policy: if self.enforce_central {
                CentralPolicy::Enforce
            } else {
                CentralPolicy::Ignore
            },
            ..PlannerConfig::default()
        }
    }
}

/// `RUST_LOG` filter with [`LOG_DIRECTIVES`] added on top.
pub fn log_filter() -> Result<EnvFilter, ParseError> {
    LOG_DIRECTIVES
        .iter()
        .try_fold(EnvFilter::from_default_env(), |filter, directive| {
            Ok(filter.add_directive(directive.parse()?))
        })
}

/// A budget of 0 means unlimited.
pub fn budget(expansions: usize) -> Option<usize> {
    (expansions > 0).then_some(expansions)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
