use {
  crate::{DeployParams, Error, Poller},
  alloy_primitives::{Address, Bytes, U64},
  async_trait::async_trait,
  grants_primitives::{Log, Receipt, TransactionData, TxHash},
  serde::{de::DeserializeOwned, Deserialize},
  serde_json::{json, Value},
  std::sync::atomic::{AtomicU64, Ordering},
  tracing::debug,
};

/// Submits transactions to an EVM network and waits for their outcome.
#[async_trait]
pub trait ChainClient: Send + Sync {
  /// Sends a contract creation transaction.
  async fn deploy_contract(&self, params: &DeployParams)
    -> Result<TxHash, Error>;

  async fn send_transaction(
    &self,
    tx: &TransactionData,
  ) -> Result<TxHash, Error>;

  /// Resolves once the transaction is mined and buried under enough
  /// blocks to have `confirmations` confirmations. One confirmation means
  /// included in the latest block.
  ///
  /// Reverted transactions still resolve, with `success == false`.
  async fn wait_for_transaction_receipt(
    &self,
    hash: TxHash,
    confirmations: u64,
  ) -> Result<Receipt, Error>;

  /// Read-only call against the latest block.
  async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error>;
}

/// [`ChainClient`] speaking Ethereum JSON-RPC over HTTP.
///
/// Transactions are submitted through `eth_sendTransaction`, so signing
/// happens in whatever wallet backs the endpoint (a local dev node with
/// unlocked accounts, a signing proxy, ...). This client never sees
/// private keys.
pub struct JsonRpcChainClient {
  http: reqwest::Client,
  url: String,
  from: Address,
  receipts: Poller,
  next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
  #[serde(default)]
  result: Option<Value>,
  #[serde(default)]
  error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
  code: i64,
  message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
  transaction_hash: TxHash,
  block_number: Option<U64>,
  status: Option<U64>,
  contract_address: Option<Address>,
  #[serde(default)]
  logs: Vec<RpcLog>,
}

#[derive(Debug, Deserialize)]
struct RpcLog {
  address: Address,
  topics: Vec<TxHash>,
  data: Bytes,
}

impl From<RpcReceipt> for Receipt {
  fn from(receipt: RpcReceipt) -> Self {
    Receipt {
      transaction_hash: receipt.transaction_hash,
      block_number: receipt.block_number.map(|n| n.to()).unwrap_or_default(),
      // pre-byzantium receipts carry no status, treat them as successful
      success: receipt.status.map(|s| s == U64::from(1)).unwrap_or(true),
      contract_address: receipt.contract_address,
      logs: receipt
        .logs
        .into_iter()
        .map(|log| Log {
          address: log.address,
          topics: log.topics,
          data: log.data,
        })
        .collect(),
    }
  }
}

impl JsonRpcChainClient {
  pub fn new(
    http: reqwest::Client,
    url: impl Into<String>,
    from: Address,
    receipts: Poller,
  ) -> Self {
    Self {
      http,
      url: url.into(),
      from,
      receipts,
      next_id: AtomicU64::new(1),
    }
  }

  pub fn sender(&self) -> Address {
    self.from
  }

  async fn request<T: DeserializeOwned>(
    &self,
    method: &str,
    params: Value,
  ) -> Result<T, Error> {
    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    debug!("rpc request #{id} {method}");

    let response = self
      .http
      .post(&self.url)
      .json(&json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
      }))
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::HttpStatus {
        status: status.as_u16(),
        url: self.url.clone(),
      });
    }

    let body: RpcResponse = response.json().await?;
    if let Some(error) = body.error {
      return Err(Error::Rpc {
        code: error.code,
        message: error.message,
      });
    }

    Ok(serde_json::from_value(body.result.unwrap_or(Value::Null))?)
  }

  async fn block_number(&self) -> Result<u64, Error> {
    let number: U64 = self.request("eth_blockNumber", json!([])).await?;
    Ok(number.to())
  }

  async fn transaction_receipt(
    &self,
    hash: TxHash,
  ) -> Result<Option<Receipt>, Error> {
    let receipt: Option<RpcReceipt> = self
      .request("eth_getTransactionReceipt", json!([hash]))
      .await?;

    // some nodes return receipts of pending transactions with a null
    // block number, those are not mined yet.
    Ok(
      receipt
        .filter(|r| r.block_number.is_some())
        .map(Receipt::from),
    )
  }

  async fn confirmed_receipt(
    &self,
    hash: TxHash,
    confirmations: u64,
  ) -> Result<Option<Receipt>, Error> {
    let Some(receipt) = self.transaction_receipt(hash).await? else {
      return Ok(None);
    };

    if confirmations > 1 {
      let head = self.block_number().await?;
      if head + 1 < receipt.block_number + confirmations {
        return Ok(None);
      }
    }

    Ok(Some(receipt))
  }
}

#[async_trait]
impl ChainClient for JsonRpcChainClient {
  async fn deploy_contract(
    &self,
    params: &DeployParams,
  ) -> Result<TxHash, Error> {
    self
      .request(
        "eth_sendTransaction",
        json!([{
          "from": self.from,
          "data": params.creation_code(),
        }]),
      )
      .await
  }

  async fn send_transaction(
    &self,
    tx: &TransactionData,
  ) -> Result<TxHash, Error> {
    self
      .request(
        "eth_sendTransaction",
        json!([{
          "from": self.from,
          "to": tx.to,
          "data": tx.data,
          "value": tx.value,
        }]),
      )
      .await
  }

  async fn wait_for_transaction_receipt(
    &self,
    hash: TxHash,
    confirmations: u64,
  ) -> Result<Receipt, Error> {
    let label = format!("receipt of {hash}");
    Ok(
      self
        .receipts
        .until_some(&label, || self.confirmed_receipt(hash, confirmations))
        .await?,
    )
  }

  async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error> {
    self
      .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
      .await
  }
}
