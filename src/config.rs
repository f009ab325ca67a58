use std::str::FromStr;
use std::env;
use std::fmt::{self, Display};
use crate::error::{Error, Result};

/// Model used with the public OpenAI endpoint.
pub const OPENAI_MODEL : &str = "text-embedding-3-small";

/// Words embedded when the user informs none.
pub const DEFAULT_WORDS : [&str; 9] = [
    "cat", "mouse", "lion", "tiger", "helicopter", "train", "blue", "carrot", "space"
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Azure,
    OpenAi
}

impl FromStr for ProviderKind {

    type Err = String;

    fn from_str(s : &str) -> std::result::Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "azure" => Ok(ProviderKind::Azure),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(format!("Unknown provider: {} (expected azure or openai)", other))
        }
    }

}

impl Display for ProviderKind {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Azure => write!(f, "azure"),
            ProviderKind::OpenAi => write!(f, "openai"),
        }
    }

}

/// Where embeddings are requested from.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {

    /// An Azure OpenAI resource, addressed by its base URL and embedding deployment.
    Azure {
        url : String,
        deployment : String
    },

    /// The public OpenAI API, with an explicit model name.
    OpenAi {
        model : String
    }

}

/// Everything the embedding client needs, resolved once at startup. Nothing
/// downstream reads the process environment.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {

    pub endpoint : Endpoint,

    pub api_key : String,

    pub dimensions : usize

}

impl ProviderConfig {

    /// Resolves the settings of the informed provider through lookup, which maps a
    /// variable name to its value. Absent and blank values are reported by name.
    pub fn from_lookup<F>(kind : ProviderKind, dimensions : usize, lookup : F) -> Result<Self>
    where
        F : Fn(&str) -> Option<String>
    {
        let require = |key : &str| -> Result<String> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
                _ => Err(Error::Configuration(key.to_string()))
            }
        };
        match kind {
            ProviderKind::Azure => {
                let url = require("AZURE_OPENAI_ENDPOINT")?;
                let api_key = require("AZURE_OPENAI_API_KEY")?;
                let deployment = require("AZURE_OPENAI_EMBEDDING_DEPLOYMENT")?;
                Ok(Self { endpoint : Endpoint::Azure { url, deployment }, api_key, dimensions })
            },
            ProviderKind::OpenAi => {
                let api_key = require("OPENAI_API_KEY")?;
                let model = OPENAI_MODEL.to_string();
                Ok(Self { endpoint : Endpoint::OpenAi { model }, api_key, dimensions })
            }
        }
    }

    /// Resolves the provider settings from the process environment.
    pub fn from_env(kind : ProviderKind, dimensions : usize) -> Result<Self> {
        Self::from_lookup(kind, dimensions, |key| env::var(key).ok() )
    }

}

// Keeps the key out of logs.
impl fmt::Debug for ProviderConfig {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .field("dimensions", &self.dimensions)
            .finish()
    }

}
