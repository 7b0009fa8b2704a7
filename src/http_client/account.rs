use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ApiOutcome, HttpClient, Result, NOT_AVAILABLE};

/// the parts of `GET /account` we display. everything else lands in `extra`
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub company_name: Option<String>,
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>
}

impl AccountInfo {
    pub fn company_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

impl HttpClient {
    /// get account info. used as the connectivity check
    pub async fn get_account(&self) -> Result<ApiOutcome<AccountInfo>> {
        self.get_json(self.endpoint(&["account"]), &[]).await
    }
}
