use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ApiOutcome, HttpClient, Result};

/// campaign states accepted by the `status` filter
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CampaignStatus {
    Suspended,
    Archive,
    Sent,
    Queued,
    Draft,
    #[value(name = "inProcess")]
    InProcess,
    #[value(name = "inReview")]
    InReview
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suspended => "suspended",
            Self::Archive => "archive",
            Self::Sent => "sent",
            Self::Queued => "queued",
            Self::Draft => "draft",
            Self::InProcess => "inProcess",
            Self::InReview => "inReview"
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// query for one page of `GET /emailCampaigns`. always sorted newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub limit: u32,
    pub offset: u32,
    pub status: Option<CampaignStatus>
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            status: Some(CampaignStatus::Sent)
        }
    }
}

impl ListParams {
    /// small unfiltered page used for the campaign preview
    pub fn preview() -> Self {
        Self {
            limit: 5,
            offset: 0,
            status: None
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("sort", "desc".into())
        ];
        if let Some(status) = self.status {
            query.push(("status", status.as_str().into()));
        }
        query
    }
}

/// campaign ids are integers in practice. anything else is kept as-is
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CampaignId {
    Number(i64),
    Text(String),
    Other(Value)
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{}", v)
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Campaign {
    pub id: Option<CampaignId>,
    pub name: Option<String>,
    pub status: Option<String>,
    /// provider-shaped, shown verbatim
    pub statistics: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CampaignPage {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    /// total number of campaigns matching the filter
    pub count: Option<u64>
}

/// the two statistics blocks we highlight on a campaign detail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics<'a> {
    pub global_stats: Option<&'a Value>,
    pub campaign_stats: Option<&'a Value>
}

/// pull the statistics out of a campaign detail document.
/// `None` if the object is missing, null, or empty
pub fn statistics(detail: &Value) -> Option<Statistics<'_>> {
    let stats = detail.get("statistics")?.as_object()?;
    if stats.is_empty() {
        return None;
    }

    Some(Statistics {
        global_stats: stats.get("globalStats"),
        campaign_stats: stats.get("campaignStats")
    })
}

impl HttpClient {
    pub async fn list_campaigns(&self, params: &ListParams) -> Result<ApiOutcome<CampaignPage>> {
        self.get_json(self.endpoint(&["emailCampaigns"]), &params.query()).await
    }

    /// full campaign document, kept untyped so it can be dumped as-is
    pub async fn get_campaign(&self, campaign_id: &str) -> Result<ApiOutcome<Value>> {
        self.get_json(self.endpoint(&["emailCampaigns", campaign_id]), &[]).await
    }
}
