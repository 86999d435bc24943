//! Horizon REST client
//!
//! - `GET  {base}/accounts/{id}` for the source sequence number
//! - `POST {base}/transactions` (form field `tx`, base64 XDR envelope)

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::account::AccountId;
use super::client::{LedgerClient, SourceAccountState, SubmissionResult};
use super::error::LedgerError;
use super::result_code::ResultCode;
use crate::payment::envelope::SignedEnvelope;

/// Pooled HTTP client for one Horizon instance.
///
/// Cheap to share: `reqwest::Client` is reference counted internally.
#[derive(Debug, Clone)]
pub struct HorizonClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize, Debug)]
struct AccountResponse {
    id: String,
    sequence: String,
}

#[derive(Deserialize, Debug)]
struct SubmitResponse {
    hash: String,
    #[serde(default)]
    ledger: Option<u32>,
    #[serde(default)]
    successful: Option<bool>,
}

/// RFC 7807 problem document returned on failure
#[derive(Deserialize, Debug, Default)]
struct Problem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    extras: Option<ProblemExtras>,
}

#[derive(Deserialize, Debug)]
struct ProblemExtras {
    #[serde(default)]
    result_codes: Option<ResultCodes>,
}

#[derive(Deserialize, Debug)]
struct ResultCodes {
    transaction: String,
    #[serde(default)]
    operations: Vec<String>,
}

impl HorizonClient {
    /// `timeout` bounds every request, connect included.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LedgerClient for HorizonClient {
    fn name(&self) -> &'static str {
        "horizon"
    }

    async fn load_account(&self, account: &AccountId) -> Result<SourceAccountState, LedgerError> {
        let url = format!("{}/accounts/{}", self.base_url, account);
        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, account = %account.short(), "Horizon account lookup");
        parse_account(status, &body, account)
    }

    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionResult, LedgerError> {
        let url = format!("{}/transactions", self.base_url);
        let tx = envelope.to_base64()?;
        let response = self
            .client
            .post(&url)
            .form(&[("tx", tx.as_str())])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, "Horizon transaction submission");
        parse_submit(status, &body)
    }
}

fn parse_account(
    status: u16,
    body: &str,
    requested: &AccountId,
) -> Result<SourceAccountState, LedgerError> {
    match status {
        200 => {
            let account: AccountResponse = serde_json::from_str(body)
                .map_err(|e| LedgerError::Decode(format!("account response: {}", e)))?;
            let sequence = account
                .sequence
                .parse::<i64>()
                .map_err(|e| LedgerError::Decode(format!("sequence {:?}: {}", account.sequence, e)))?;
            let account_id = account
                .id
                .parse::<AccountId>()
                .map_err(|e| LedgerError::Decode(e.to_string()))?;
            if account_id != *requested {
                return Err(LedgerError::Decode(format!(
                    "asked for {} but Horizon answered for {}",
                    requested, account_id
                )));
            }
            Ok(SourceAccountState {
                account_id,
                sequence,
            })
        }
        404 => Err(LedgerError::AccountNotFound(requested.to_string())),
        _ => Err(unexpected(status, body)),
    }
}

fn parse_submit(status: u16, body: &str) -> Result<SubmissionResult, LedgerError> {
    match status {
        200 => {
            let ok: SubmitResponse = serde_json::from_str(body)
                .map_err(|e| LedgerError::Decode(format!("submit response: {}", e)))?;
            if ok.successful == Some(false) {
                // Horizon never does this on 200, but the field exists
                warn!(hash = %ok.hash, "Horizon returned 200 with successful=false");
                return Ok(SubmissionResult::Rejected(ResultCode::Other(
                    "tx_failed".to_string(),
                )));
            }
            Ok(SubmissionResult::Success {
                hash: ok.hash,
                ledger: ok.ledger,
            })
        }
        400 => {
            let problem: Problem = serde_json::from_str(body).unwrap_or_default();
            match problem.extras.and_then(|x| x.result_codes) {
                Some(codes) => Ok(SubmissionResult::Rejected(ResultCode::from_result_codes(
                    &codes.transaction,
                    &codes.operations,
                ))),
                None => Err(LedgerError::UnexpectedResponse {
                    status,
                    detail: problem
                        .detail
                        .or(problem.title)
                        .unwrap_or_else(|| "bad request without result codes".to_string()),
                }),
            }
        }
        _ => Err(unexpected(status, body)),
    }
}

fn unexpected(status: u16, body: &str) -> LedgerError {
    let problem: Problem = serde_json::from_str(body).unwrap_or_default();
    LedgerError::UnexpectedResponse {
        status,
        detail: problem
            .title
            .unwrap_or_else(|| body.chars().take(200).collect()),
    }
}
