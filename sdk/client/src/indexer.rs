use {
  crate::Error,
  alloy_primitives::Address,
  async_trait::async_trait,
  grants_primitives::{ChainId, MetadataPointer, PoolId, ProfileId, RecipientId},
  serde::Deserialize,
  serde_json::{json, Map, Value},
  tracing::debug,
};

const RECIPIENT_QUERY: &str = r#"
query getMicroGrantRecipientQuery($chainId: String!, $poolId: String!, $recipientId: String!) {
  microGrantRecipient(chainId: $chainId, poolId: $poolId, recipientId: $recipientId) {
    recipientId
  }
}"#;

const POOL_QUERY: &str = r#"
query getMicroGrantQuery($chainId: String!, $poolId: String!) {
  microGrant(chainId: $chainId, poolId: $poolId) {
    poolId
  }
}"#;

const PROFILE_QUERY: &str = r#"
query getProfileQuery($chainId: String!, $profileId: String!) {
  profile(chainId: $chainId, profileId: $profileId) {
    anchor
  }
}"#;

/// A GraphQL lookup of a single entity. The entity counts as indexed once
/// the field named `entity` in the response is non-null.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexQuery {
  pub entity: &'static str,
  pub query: &'static str,
  pub variables: Value,
}

impl IndexQuery {
  pub fn recipient(chain: ChainId, pool: PoolId, recipient: RecipientId) -> Self {
    Self {
      entity: "microGrantRecipient",
      query: RECIPIENT_QUERY,
      variables: json!({
        "chainId": chain.to_string(),
        "poolId": pool.0.to_string(),
        "recipientId": recipient.to_string().to_lowercase(),
      }),
    }
  }

  pub fn pool(chain: ChainId, pool: PoolId) -> Self {
    Self {
      entity: "microGrant",
      query: POOL_QUERY,
      variables: json!({
        "chainId": chain.to_string(),
        "poolId": pool.0.to_string(),
      }),
    }
  }
}

/// Read side of the eventually consistent services that mirror the chain.
#[async_trait]
pub trait Indexer: Send + Sync {
  async fn is_indexed(&self, query: &IndexQuery) -> Result<bool, Error>;

  /// True once the pinned document can be fetched through the gateway.
  async fn is_metadata_available(
    &self,
    pointer: &MetadataPointer,
  ) -> Result<bool, Error>;
}

/// Resolves registry profiles to their anchor address.
#[async_trait]
pub trait ProfileRegistry: Send + Sync {
  async fn profile_anchor(
    &self,
    chain: ChainId,
    profile_id: &ProfileId,
  ) -> Result<Address, Error>;
}

/// [`Indexer`] and [`ProfileRegistry`] over the Allo GraphQL indexer and
/// an IPFS HTTP gateway.
pub struct GraphqlIndexer {
  http: reqwest::Client,
  graphql_url: String,
  ipfs_gateway: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
  #[serde(default)]
  data: Option<Map<String, Value>>,
  #[serde(default)]
  errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
  message: String,
}

#[derive(Debug, Deserialize)]
struct ProfileAnchor {
  anchor: Address,
}

impl GraphqlIndexer {
  pub const DEFAULT_IPFS_GATEWAY: &'static str = "https://gateway.pinata.cloud";

  pub fn new(
    http: reqwest::Client,
    graphql_url: impl Into<String>,
    ipfs_gateway: impl Into<String>,
  ) -> Self {
    Self {
      http,
      graphql_url: graphql_url.into(),
      ipfs_gateway: ipfs_gateway.into().trim_end_matches('/').to_owned(),
    }
  }

  /// Runs a query and returns the value of the requested top level field,
  /// `Value::Null` when the indexer has no such entity.
  async fn field(
    &self,
    query: &str,
    variables: &Value,
    field: &str,
  ) -> Result<Value, Error> {
    let response = self
      .http
      .post(&self.graphql_url)
      .json(&json!({ "query": query, "variables": variables }))
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::HttpStatus {
        status: status.as_u16(),
        url: self.graphql_url.clone(),
      });
    }

    let body: GraphqlResponse = response.json().await?;
    if !body.errors.is_empty() {
      let messages: Vec<_> =
        body.errors.into_iter().map(|e| e.message).collect();
      return Err(Error::Graphql(messages.join("; ")));
    }

    let mut data = body.data.ok_or_else(|| {
      Error::MalformedResponse("GraphQL response without data".into())
    })?;
    Ok(data.remove(field).unwrap_or(Value::Null))
  }
}

#[async_trait]
impl Indexer for GraphqlIndexer {
  async fn is_indexed(&self, query: &IndexQuery) -> Result<bool, Error> {
    let entity = self
      .field(query.query, &query.variables, query.entity)
      .await?;
    Ok(!entity.is_null())
  }

  async fn is_metadata_available(
    &self,
    pointer: &MetadataPointer,
  ) -> Result<bool, Error> {
    let url = format!("{}/ipfs/{}", self.ipfs_gateway, pointer);
    let response = self.http.get(&url).send().await?;
    debug!("gateway answered {} for {pointer}", response.status());
    Ok(response.status().is_success())
  }
}

#[async_trait]
impl ProfileRegistry for GraphqlIndexer {
  async fn profile_anchor(
    &self,
    chain: ChainId,
    profile_id: &ProfileId,
  ) -> Result<Address, Error> {
    let variables = json!({
      "chainId": chain.to_string(),
      "profileId": profile_id.to_string().to_lowercase(),
    });

    let profile = self.field(PROFILE_QUERY, &variables, "profile").await?;
    if profile.is_null() {
      return Err(Error::ProfileNotFound(*profile_id));
    }

    let profile: ProfileAnchor = serde_json::from_value(profile)?;
    Ok(profile.anchor)
  }
}
