//! The closed set of model names the assistant can be pointed at.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A model from the supported allow-list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SupportedModel {
    /// `llama3.1`
    #[default]
    Llama31,
    /// `llama3`
    Llama3,
    /// `mistral`
    Mistral,
    /// `codellama`
    Codellama,
}

impl SupportedModel {
    /// Every supported model, default first.
    pub const ALL: [SupportedModel; 4] = [
        SupportedModel::Llama31,
        SupportedModel::Llama3,
        SupportedModel::Mistral,
        SupportedModel::Codellama,
    ];

    /// Model identifier sent to the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Llama31 => "llama3.1",
            Self::Llama3 => "llama3",
            Self::Mistral => "mistral",
            Self::Codellama => "codellama",
        }
    }
}

impl fmt::Display for SupportedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a model name is outside the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported model '{name}', expected one of: llama3.1, llama3, mistral, codellama")]
pub struct UnsupportedModel {
    /// The rejected name.
    pub name: String,
}

impl FromStr for SupportedModel {
    type Err = UnsupportedModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnsupportedModel {
                name: wanted.to_owned(),
            })
    }
}

impl TryFrom<String> for SupportedModel {
    type Error = UnsupportedModel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SupportedModel> for String {
    fn from(model: SupportedModel) -> Self {
        model.as_str().to_owned()
    }
}
