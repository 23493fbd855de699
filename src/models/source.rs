use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resolved, playable stream candidate offered to the user as a "server"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceLink {
    pub name: String,
    pub url: String,
}

impl SourceLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Progress of resolving playable source links for the current media
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SourceDataState {
    #[default]
    Idle,
    Loading,
    Success(Option<String>),
    Error(String),
}

impl SourceDataState {
    pub fn is_success(&self) -> bool {
        matches!(self, SourceDataState::Success(_))
    }
}

impl fmt::Display for SourceDataState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDataState::Idle => write!(f, "idle"),
            SourceDataState::Loading => write!(f, "loading"),
            SourceDataState::Success(None) => write!(f, "success"),
            SourceDataState::Success(Some(message)) => write!(f, "success:{}", message),
            SourceDataState::Error(reason) => write!(f, "error:{}", reason),
        }
    }
}

/// Parses the `state[:detail]` form produced by `Display`
impl FromStr for SourceDataState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (state, detail) = match s.split_once(':') {
            Some((state, detail)) => (state, Some(detail.to_string())),
            None => (s, None),
        };

        match state.to_ascii_lowercase().as_str() {
            "idle" => Ok(SourceDataState::Idle),
            "loading" => Ok(SourceDataState::Loading),
            "success" => Ok(SourceDataState::Success(detail)),
            "error" => Ok(SourceDataState::Error(detail.unwrap_or_default())),
            other => Err(format!("unknown source state '{}'", other)),
        }
    }
}
