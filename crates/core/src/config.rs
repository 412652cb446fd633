use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const DEFAULT_FILL: &str = "1,2,3,4,5";
pub const DEFAULT_OVERFLOW: &str = "6,7";
pub const DEFAULT_FORMAT: &str = "text";
pub const ENV_FILL: &str = "RING_QUEUE_FILL";
pub const ENV_OVERFLOW: &str = "RING_QUEUE_OVERFLOW";
pub const ENV_FORMAT: &str = "RING_QUEUE_FORMAT";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Comma separated integers, e.g. `"1, 2,3"`. Blank input is an empty list.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueList(Vec<i64>);

impl ValueList {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        raw.split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i64>()
                    .map_err(|_| ConfigError::InvalidValue(part.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn values(&self) -> &[i64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i64>> for ValueList {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemoConfig {
    pub fill: ValueList,
    pub overflow: ValueList,
    pub format: OutputFormat,
}

impl DemoConfig {
    pub fn new(
        fill: ValueList,
        overflow: ValueList,
        format: OutputFormat,
    ) -> Result<Self, ConfigError> {
        if fill.is_empty() {
            return Err(ConfigError::EmptyFill);
        }
        Ok(Self {
            fill,
            overflow,
            format,
        })
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fill: ValueList(vec![1, 2, 3, 4, 5]),
            overflow: ValueList(vec![6, 7]),
            format: OutputFormat::Text,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fill values must not be empty")]
    EmptyFill,
    #[error("invalid integer value: {0:?}")]
    InvalidValue(String),
    #[error("unknown output format {0:?} (expected text or json)")]
    UnknownFormat(String),
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_string_with_default(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
    default: &str,
) -> String {
    match cli_value {
        Some(v) => v,
        None => env.var(env_key).unwrap_or_else(|| default.to_owned()),
    }
}

pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Option<String> {
    match cli_value {
        Some(v) => Some(v),
        None => env.var(env_key),
    }
}

/// Build a [`DemoConfig`] from optional command line values, falling back to
/// the environment and then to the built-in scenario.
pub fn resolve_demo_config(
    fill: Option<String>,
    overflow: Option<String>,
    format: Option<String>,
    env: &impl Env,
) -> Result<DemoConfig, ConfigError> {
    let fill = ValueList::parse(&resolve_string_with_default(
        fill,
        ENV_FILL,
        env,
        DEFAULT_FILL,
    ))?;
    let overflow = match resolve_optional_string(overflow, ENV_OVERFLOW, env) {
        Some(raw) => ValueList::parse(&raw)?,
        None => ValueList::parse(DEFAULT_OVERFLOW)?,
    };
    let format = resolve_string_with_default(format, ENV_FORMAT, env, DEFAULT_FORMAT).parse()?;
    DemoConfig::new(fill, overflow, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_builtin_scenario() {
        let cfg = resolve_demo_config(None, None, None, &MapEnv::default()).expect("valid");
        assert_eq!(cfg, DemoConfig::default());
    }

    #[test]
    fn cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_FILL, "9,9");
        let cfg = resolve_demo_config(Some("1,2".to_owned()), None, None, &env).expect("valid");
        assert_eq!(cfg.fill.values(), &[1, 2]);
    }

    #[test]
    fn env_used_when_cli_missing() {
        let env = MapEnv::default()
            .with_var(ENV_FILL, "4, 5")
            .with_var(ENV_OVERFLOW, "")
            .with_var(ENV_FORMAT, "JSON");
        let cfg = resolve_demo_config(None, None, None, &env).expect("valid");
        assert_eq!(cfg.fill.values(), &[4, 5]);
        assert!(cfg.overflow.is_empty());
        assert_eq!(cfg.format, OutputFormat::Json);
    }

    #[test]
    fn value_list_rejects_junk() {
        assert_eq!(
            ValueList::parse("1,x,3"),
            Err(ConfigError::InvalidValue("x".to_owned()))
        );
        assert_eq!(
            ValueList::parse("1,,3"),
            Err(ConfigError::InvalidValue(String::new()))
        );
    }

    #[test]
    fn empty_fill_is_rejected() {
        let err = resolve_demo_config(Some(" ".to_owned()), None, None, &MapEnv::default())
            .expect_err("empty fill");
        assert_eq!(err, ConfigError::EmptyFill);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = "yaml".parse::<OutputFormat>().expect_err("unknown");
        assert_eq!(err, ConfigError::UnknownFormat("yaml".to_owned()));
    }

    #[test]
    fn resolve_string_with_default_default_used_when_both_missing() {
        let env = MapEnv::default();
        let v = resolve_string_with_default(None, ENV_FORMAT, &env, "def");
        assert_eq!(v, "def");
    }
}
