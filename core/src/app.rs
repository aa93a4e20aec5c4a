//! Identifies an app on the deployment service by its owner and name.
use crate::error::RolloutError;
use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Getters, Eq, PartialEq, Hash)]
pub struct AppRef {
    /// User or organization name that owns the app.
    owner: String,
    /// App name, unique within its owner.
    name: String,
}

impl AppRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, RolloutError> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() {
            return RolloutError::MalformedAppRef.into();
        }
        if owner.contains(char::is_whitespace) || name.contains(char::is_whitespace) {
            return RolloutError::InvalidAppRefCharacters.into();
        }
        Ok(Self { owner, name })
    }
}

impl Display for AppRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for AppRef {
    type Err = RolloutError;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let Some((owner, name)) = str.trim().split_once('/') else {
            return RolloutError::MalformedAppRef.into();
        };
        if name.contains('/') {
            return RolloutError::MalformedAppRef.into();
        }
        Self::new(owner, name)
    }
}

impl<'de> Deserialize<'de> for AppRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AppRef::from_str(&s)
            .map_err(|_| serde::de::Error::custom(format!("invalid app value: {s}")))
    }
}

impl Serialize for AppRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
