//! Agent options: the text after `=` in `-agentpath:<lib>=<options>`.
//!
//! A comma-separated list of `key=value` pairs and bare flags:
//!
//! | Key       | Values                                   | Default |
//! |-----------|------------------------------------------|---------|
//! | `version` | `1.0`, `1.1`, `1.2`, `9`, `11`, `21`     | `1.1`   |
//! | `log`     | `off`, `error`, `warn`, `info`, `debug`, `trace` | `info` |
//! | `verbose` | flag, same as `log=debug`                |         |
//!
//! Unknown keys are kept in [`AgentOptions::ignored`] so the agent can warn
//! about them once logging is up.

use std::str::FromStr;

use log::LevelFilter;
use thiserror::Error;

use crate::sys::jni::jint;
use crate::sys::jvmti;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("unknown JVMTI version '{0}' (expected 1.0, 1.1, 1.2, 9, 11 or 21)")]
    UnknownVersion(String),
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
    #[error("option '{0}' needs a value")]
    MissingValue(String),
}

/// JVMTI versions the agent can request from `GetEnv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JvmtiVersion {
    V1_0,
    #[default]
    V1_1,
    V1_2,
    V9,
    V11,
    V21,
}

impl JvmtiVersion {
    pub fn raw(self) -> jint {
        match self {
            JvmtiVersion::V1_0 => jvmti::JVMTI_VERSION_1_0,
            JvmtiVersion::V1_1 => jvmti::JVMTI_VERSION_1_1,
            JvmtiVersion::V1_2 => jvmti::JVMTI_VERSION_1_2,
            JvmtiVersion::V9 => jvmti::JVMTI_VERSION_9,
            JvmtiVersion::V11 => jvmti::JVMTI_VERSION_11,
            JvmtiVersion::V21 => jvmti::JVMTI_VERSION_21,
        }
    }
}

impl FromStr for JvmtiVersion {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" | "1" => Ok(JvmtiVersion::V1_0),
            "1.1" => Ok(JvmtiVersion::V1_1),
            "1.2" => Ok(JvmtiVersion::V1_2),
            "9" => Ok(JvmtiVersion::V9),
            "11" => Ok(JvmtiVersion::V11),
            "21" => Ok(JvmtiVersion::V21),
            other => Err(OptionsError::UnknownVersion(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOptions {
    pub jvmti_version: JvmtiVersion,
    pub log_level: LevelFilter,
    pub ignored: Vec<String>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        AgentOptions {
            jvmti_version: JvmtiVersion::default(),
            log_level: LevelFilter::Info,
            ignored: Vec::new(),
        }
    }
}

impl AgentOptions {
    pub fn parse(options: &str) -> Result<Self, OptionsError> {
        let mut parsed = AgentOptions::default();

        for item in options.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (item, None),
            };

            match (key, value) {
                ("version" | "log", None | Some("")) => {
                    return Err(OptionsError::MissingValue(key.to_string()));
                }
                ("version", Some(value)) => parsed.jvmti_version = value.parse()?,
                ("log", Some(value)) => {
                    parsed.log_level = value
                        .parse()
                        .map_err(|_| OptionsError::UnknownLogLevel(value.to_string()))?;
                }
                ("verbose", None) => parsed.log_level = LevelFilter::Debug,
                _ => parsed.ignored.push(item.to_string()),
            }
        }

        Ok(parsed)
    }
}

impl FromStr for AgentOptions {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentOptions::parse(s)
    }
}
