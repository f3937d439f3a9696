//! Solver configuration.
use serde::{de, Deserialize, Deserializer};

pub use crate::branch::BranchHeuristic;

/// Configurable parameters used during solving.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Rule for choosing the branching literal. (Default: first-literal)
    pub branching: BranchHeuristic,

    /// Give up after this many decisions. (Default: unlimited)
    pub decision_limit: Option<u64>,
}

impl SolverConfig {
    /// Description of all options, as shown by the command line `-C help`.
    pub fn help() -> String {
        let defaults = SolverConfig::default();
        format!(
            "branching: Rule for choosing the branching literal, one of \"first-literal\", \
             \"most-occurrences\" or \"jeroslow-wang\". (Default: \"{}\")\n\
             decision_limit: Give up after this many decisions, or \"unlimited\". (Default: {})\n",
            defaults.branching,
            defaults
                .decision_limit
                .map_or_else(|| "unlimited".to_owned(), |limit| limit.to_string()),
        )
    }
}

/// Partial update of a [`SolverConfig`].
///
/// Deserializes from a TOML table using the field names of `SolverConfig`, e.g.
/// `branching = "jeroslow-wang"`. The decision limit is a count or `"unlimited"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfigUpdate {
    pub branching: Option<BranchHeuristic>,
    /// `Some(None)` removes a previously set limit.
    #[serde(default, deserialize_with = "deserialize_decision_limit")]
    pub decision_limit: Option<Option<u64>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecisionLimitValue {
    Count(u64),
    Keyword(String),
}

fn deserialize_decision_limit<'de, D>(deserializer: D) -> Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    match DecisionLimitValue::deserialize(deserializer)? {
        DecisionLimitValue::Count(limit) => Ok(Some(Some(limit))),
        DecisionLimitValue::Keyword(keyword) if keyword == "unlimited" => Ok(Some(None)),
        DecisionLimitValue::Keyword(keyword) => Err(de::Error::invalid_value(
            de::Unexpected::Str(&keyword),
            &"a decision count or \"unlimited\"",
        )),
    }
}

impl SolverConfigUpdate {
    /// Create an update that leaves every option unchanged.
    pub fn new() -> SolverConfigUpdate {
        SolverConfigUpdate::default()
    }

    /// Combine two updates, options set in `other` take precedence.
    pub fn merge(&mut self, other: SolverConfigUpdate) {
        if other.branching.is_some() {
            self.branching = other.branching;
        }
        if other.decision_limit.is_some() {
            self.decision_limit = other.decision_limit;
        }
    }

    /// Apply the update to a configuration.
    pub fn apply(&self, config: &mut SolverConfig) {
        if let Some(branching) = self.branching {
            config.branching = branching;
        }
        if let Some(limit) = self.decision_limit {
            config.decision_limit = limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_and_apply() -> Result<(), toml::de::Error> {
        let mut update: SolverConfigUpdate = toml::from_str("decision_limit = 100")?;
        update.merge(toml::from_str("branching = \"most-occurrences\"")?);
        update.merge(toml::from_str("decision_limit = 7")?);

        let mut config = SolverConfig::default();
        update.apply(&mut config);

        assert_eq!(
            config,
            SolverConfig {
                branching: BranchHeuristic::MostOccurrences,
                decision_limit: Some(7),
            }
        );

        Ok(())
    }

    #[test]
    fn empty_update() {
        let mut config = SolverConfig {
            branching: BranchHeuristic::JeroslowWang,
            decision_limit: Some(3),
        };
        SolverConfigUpdate::new().apply(&mut config);
        assert_eq!(config.branching, BranchHeuristic::JeroslowWang);
        assert_eq!(config.decision_limit, Some(3));
    }

    #[test]
    fn rejects_unknown_options() {
        assert!(toml::from_str::<SolverConfigUpdate>("restarts = true").is_err());
        assert!(toml::from_str::<SolverConfigUpdate>("branching = \"vsids\"").is_err());
        assert!(toml::from_str::<SolverConfigUpdate>("decision_limit = \"never\"").is_err());
        assert!(toml::from_str::<SolverConfigUpdate>("decision_limit = -1").is_err());
    }

    #[test]
    fn clear_decision_limit() -> Result<(), toml::de::Error> {
        let mut config = SolverConfig::default();

        toml::from_str::<SolverConfigUpdate>("decision_limit = 10")?.apply(&mut config);
        assert_eq!(config.decision_limit, Some(10));

        toml::from_str::<SolverConfigUpdate>("branching = \"jeroslow-wang\"")?.apply(&mut config);
        assert_eq!(config.decision_limit, Some(10));

        let mut update: SolverConfigUpdate = toml::from_str("decision_limit = 4")?;
        update.merge(toml::from_str("decision_limit = \"unlimited\"")?);
        assert_eq!(update.decision_limit, Some(None));

        update.apply(&mut config);
        assert_eq!(config.decision_limit, None);
        assert_eq!(config.branching, BranchHeuristic::JeroslowWang);

        Ok(())
    }

    #[test]
    fn help_lists_defaults() {
        let help = SolverConfig::help();
        assert!(help.contains("(Default: \"first-literal\")"));
        assert!(help.contains("(Default: unlimited)"));
    }
}
