use {
  crate::Error,
  async_trait::async_trait,
  grants_primitives::MetadataPointer,
  serde::Deserialize,
  serde_json::{json, Value},
  tracing::debug,
};

/// Stores JSON documents in content addressed storage.
#[async_trait]
pub trait PinningClient: Send + Sync {
  async fn pin_json(&self, document: &Value) -> Result<MetadataPointer, Error>;
}

/// [`PinningClient`] backed by the Pinata pinning API.
pub struct PinataClient {
  http: reqwest::Client,
  api_url: String,
  jwt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinResponse {
  ipfs_hash: String,
}

impl PinataClient {
  pub const DEFAULT_API_URL: &'static str = "https://api.pinata.cloud";

  pub fn new(
    http: reqwest::Client,
    api_url: impl Into<String>,
    jwt: impl Into<String>,
  ) -> Self {
    Self {
      http,
      api_url: api_url.into().trim_end_matches('/').to_owned(),
      jwt: jwt.into(),
    }
  }
}

#[async_trait]
impl PinningClient for PinataClient {
  async fn pin_json(&self, document: &Value) -> Result<MetadataPointer, Error> {
    let url = format!("{}/pinning/pinJSONToIPFS", self.api_url);
    let response = self
      .http
      .post(&url)
      .bearer_auth(&self.jwt)
      .json(&json!({ "pinataContent": document }))
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::HttpStatus {
        status: status.as_u16(),
        url,
      });
    }

    let pinned: PinResponse = response.json().await?;
    debug!("pinned document as {}", pinned.ipfs_hash);
    Ok(pinned.ipfs_hash.parse()?)
  }
}
