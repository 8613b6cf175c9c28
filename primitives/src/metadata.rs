use {
  alloy_primitives::U256,
  serde::{Deserialize, Serialize},
};

/// Application as entered by an applicant, before anything is pinned or
/// sent on chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
  /// Registry profile of the applicant. Only a value shaped like a profile
  /// hash is looked up, anything else registers with the zero anchor.
  pub profile_id: Option<String>,
  pub name: String,
  pub website: String,
  pub description: String,
  pub email: String,
  /// Either a `data:image/...;base64,` URI or an already pinned pointer.
  pub base64_image: String,
  pub requested_amount: U256,
}

impl NewApplication {
  pub fn metadata(&self) -> ApplicationMetadata {
    ApplicationMetadata {
      name: self.name.clone(),
      website: self.website.clone(),
      description: self.description.clone(),
      email: self.email.clone(),
      base64_image: self.base64_image.clone(),
    }
  }
}

/// The JSON document pinned to IPFS for an application.
///
/// Field names are fixed by the indexer and front-ends reading the pinned
/// document back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationMetadata {
  pub name: String,
  pub website: String,
  pub description: String,
  pub email: String,
  #[serde(rename = "base64Image")]
  pub base64_image: String,
}

impl ApplicationMetadata {
  /// True when the image is embedded in the document instead of
  /// referenced by pointer, in which case it gets pinned on its own.
  pub fn has_inline_image(&self) -> bool {
    self.base64_image.contains("base64")
  }
}

/// The JSON document pinned to IPFS for a pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolMetadata {
  pub name: String,
  pub description: String,
}
