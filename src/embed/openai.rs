use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Serialize, Deserialize};
use std::time::Duration;
use tracing::debug;
use crate::config::{Endpoint, ProviderConfig};
use crate::error::{Error, Result};
use super::EmbeddingSource;

const OPENAI_URL : &str = "https://api.openai.com/v1/embeddings";

const AZURE_API_VERSION : &str = "2024-02-01";

const TIMEOUT_SECS : u64 = 30;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {

    input : &'a str,

    dimensions : usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    model : Option<&'a str>

}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding : Vec<f64>
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data : Vec<EmbeddingData>
}

/// Blocking client for the OpenAI embeddings API, either on an Azure OpenAI
/// resource or on the public endpoint. Requests are not retried.
pub struct OpenAiEmbeddings {

    client : Client,

    config : ProviderConfig

}

impl OpenAiEmbeddings {

    pub fn new(config : ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Provider {
                label : String::new(),
                message : format!("Unable to build HTTP client: {}", e)
            })?;
        Ok(Self { client, config })
    }

    /// Full URL embedding requests are sent to.
    pub fn url(&self) -> String {
        match &self.config.endpoint {
            Endpoint::Azure { url, deployment } => format!(
                "{}/openai/deployments/{}/embeddings?api-version={}",
                url.trim_end_matches('/'),
                deployment,
                AZURE_API_VERSION
            ),
            Endpoint::OpenAi { .. } => OPENAI_URL.to_string()
        }
    }

    fn request<'a>(&'a self, label : &'a str) -> EmbeddingRequest<'a> {
        let model = match &self.config.endpoint {
            Endpoint::OpenAi { model } => Some(&model[..]),
            Endpoint::Azure { .. } => None
        };
        EmbeddingRequest { input : label, dimensions : self.config.dimensions, model }
    }

}

impl EmbeddingSource for OpenAiEmbeddings {

    fn generate(&self, label : &str) -> Result<Vec<f64>> {
        let fail = |message : String| Error::Provider { label : label.to_string(), message };
        let builder = self.client.post(&self.url()).json(&self.request(label));
        let builder = match &self.config.endpoint {
            Endpoint::Azure { .. } => builder.header("api-key", &self.config.api_key),
            Endpoint::OpenAi { .. } => builder.bearer_auth(&self.config.api_key)
        };
        let response = builder.send().map_err(|e| fail(e.to_string()) )?;
        let status = response.status();
        let body = response.text().map_err(|e| fail(e.to_string()) )?;
        let vector = read_embedding(label, status, &body)?;
        debug!("Provider returned {} dimensions for '{}'", vector.len(), label);
        Ok(vector)
    }

}

/// Extracts the first embedding of a provider response, or explains why there is none.
fn read_embedding(label : &str, status : StatusCode, body : &str) -> Result<Vec<f64>> {
    let fail = |message : String| Error::Provider { label : label.to_string(), message };
    if !status.is_success() {
        return Err(fail(format!("HTTP {}: {}", status, body.trim())));
    }
    let parsed : EmbeddingResponse = serde_json::from_str(body).map_err(|e| fail(e.to_string()) )?;
    parsed.data.into_iter()
        .next()
        .map(|d| d.embedding )
        .ok_or_else(|| fail("response carried no embedding".to_string()) )
}
