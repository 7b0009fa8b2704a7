use clap::Subcommand;
use std::io::{self, Write};
use console::style;
use indicatif::MultiProgress;
use serde_json::Value;
use super::{status_spinner::StatusSpinner, write_banner, write_failure, write_missing_api_key, SEPARATOR, Result};
use crate::{config::Config, http_client::{statistics, ApiOutcome, Campaign, CampaignPage, CampaignStatus, HttpClient, HttpClientError, ListParams, NOT_AVAILABLE}};

/// campaign inspected by `diagnose` and by `inspect` without an id
pub const SAMPLE_CAMPAIGN_ID: &str = "288";

/// how many campaigns of the preview page get printed
const PREVIEW_SHOWN: usize = 3;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List one page of email campaigns, newest first
    List {
        /// Number of campaigns to fetch
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
        /// Index of the first campaign
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
        /// Only list campaigns with this status
        #[arg(short, long, value_enum, default_value_t = CampaignStatus::Sent)]
        status: CampaignStatus,
        /// List campaigns of any status
        #[arg(short, long, conflicts_with = "status")]
        all: bool
    },
    /// Show id, name, status and raw statistics of the latest campaigns
    Preview,
    /// Print the full document and statistics of one campaign
    Inspect {
        /// Campaign ID
        #[arg(default_value = SAMPLE_CAMPAIGN_ID)]
        id: String
    }
}

pub async fn handle(command: Command, client: &HttpClient, config: &Config, multi: &MultiProgress, out: &mut impl Write) -> Result {
    if config.require_api_key().is_err() {
        write_missing_api_key(out)?;
        return Ok(());
    }

    match command {
        Command::List { limit, offset, status, all } => {
            let params = ListParams {
                limit,
                offset,
                status: if all { None } else { Some(status) }
            };
            let campaigns = list(client, &params, multi, out).await?;
            for campaign in &campaigns {
                writeln!(
                    out,
                    "  • {} {} {}",
                    style(format!("#{}", display_id(campaign))).cyan().bold(),
                    campaign.name.as_deref().unwrap_or(NOT_AVAILABLE),
                    style(format!("[{}]", campaign.status.as_deref().unwrap_or(NOT_AVAILABLE))).dim()
                )?;
            }
        },
        Command::Preview => preview(client, multi, out).await?,
        Command::Inspect { id } => inspect(client, &id, multi, out).await?
    }

    Ok(())
}

/// campaign preview, a separator, then the sample campaign.
/// the inspection runs whatever the preview's outcome
pub async fn diagnose(client: &HttpClient, config: &Config, multi: &MultiProgress, out: &mut impl Write) -> Result {
    write_banner(out, "🧪 Brevo API test tool")?;

    if config.require_api_key().is_err() {
        write_missing_api_key(out)?;
        return Ok(());
    }

    preview(client, multi, out).await?;
    writeln!(out, "\n{}", SEPARATOR)?;
    inspect(client, SAMPLE_CAMPAIGN_ID, multi, out).await
}

/// fetch one page. an empty list is returned on any failure
pub async fn list(client: &HttpClient, params: &ListParams, multi: &MultiProgress, out: &mut impl Write) -> Result<Vec<Campaign>> {
    writeln!(
        out,
        "🔄 Fetching Brevo campaigns (limit={}, offset={}, status={})...",
        params.limit,
        params.offset,
        params.status.map(|s| s.as_str()).unwrap_or("any")
    )?;

    let status = StatusSpinner::new("Loading campaigns...", multi);
    let outcome = client.list_campaigns(params).await;
    status.clear();

    Ok(write_campaign_page(out, outcome?)?)
}

pub async fn preview(client: &HttpClient, multi: &MultiProgress, out: &mut impl Write) -> Result {
    writeln!(out, "📋 Fetching the latest campaigns...")?;

    let status = StatusSpinner::new("Loading campaigns...", multi);
    let outcome = client.list_campaigns(&ListParams::preview()).await;
    status.clear();

    let campaigns = write_campaign_page(out, outcome?)?;
    for (i, campaign) in campaigns.iter().take(PREVIEW_SHOWN).enumerate() {
        write_campaign_summary(out, i + 1, campaign)?;
    }

    Ok(())
}

pub async fn inspect(client: &HttpClient, campaign_id: &str, multi: &MultiProgress, out: &mut impl Write) -> Result {
    writeln!(out, "🔍 Fetching details of campaign {}...", style(campaign_id).cyan().bold())?;

    let status = StatusSpinner::new("Loading campaign...", multi);
    let outcome = client.get_campaign(campaign_id).await;
    status.clear();

    Ok(write_campaign_detail(out, &outcome?)?)
}

/// report the page and hand back its campaigns
pub fn write_campaign_page(out: &mut impl Write, outcome: ApiOutcome<CampaignPage>) -> io::Result<Vec<Campaign>> {
    match outcome {
        ApiOutcome::Success(page) => {
            writeln!(
                out,
                "✅ {}",
                style(format!("Fetched {} campaigns", page.campaigns.len())).green().bright()
            )?;
            if let Some(count) = page.count {
                writeln!(out, "📦 {} {}", style("Total matching:").dim(), count)?;
            }
            Ok(page.campaigns)
        },
        failure => {
            write_failure(out, "Fetching campaigns", &failure)?;
            Ok(Vec::new())
        }
    }
}

fn write_campaign_summary(out: &mut impl Write, position: usize, campaign: &Campaign) -> io::Result<()> {
    writeln!(out, "\n📧 {}", style(format!("Campaign {}:", position)).bold())?;
    writeln!(out, "  - ID: {}", display_id(campaign))?;
    writeln!(out, "  - Name: {}", campaign.name.as_deref().unwrap_or(NOT_AVAILABLE))?;
    writeln!(out, "  - Status: {}", campaign.status.as_deref().unwrap_or(NOT_AVAILABLE))?;
    writeln!(out, "  - Statistics: {}", display_value(campaign.statistics.as_ref()))
}

pub fn write_campaign_detail(out: &mut impl Write, outcome: &ApiOutcome<Value>) -> io::Result<()> {
    match outcome {
        ApiOutcome::Success(detail) => {
            writeln!(out, "📡 API response status: 200")?;
            writeln!(out, "✅ {}", style("Fetched campaign details").green().bright())?;
            writeln!(out, "📄 Full response:")?;
            serde_json::to_writer_pretty(&mut *out, detail).map_err(io::Error::from)?;
            writeln!(out)?;

            match statistics(detail) {
                Some(stats) => {
                    writeln!(out, "\n📊 {}", style("Statistics:").bold())?;
                    writeln!(out, "  - globalStats: {}", display_value(stats.global_stats))?;
                    writeln!(out, "  - campaignStats: {}", display_value(stats.campaign_stats))?;
                },
                None => writeln!(out, "⚠️ {}", style("No statistics found").yellow())?
            }
            Ok(())
        },
        ApiOutcome::HttpError { status, .. } => {
            writeln!(out, "📡 API response status: {}", status.as_u16())?;
            write_failure(out, "Fetching campaign", outcome)
        },
        // bodies are only parsed for 200 responses
        ApiOutcome::TransportError(HttpClientError::Json(_)) => {
            writeln!(out, "📡 API response status: 200")?;
            write_failure(out, "Fetching campaign", outcome)
        },
        ApiOutcome::TransportError(_) => write_failure(out, "Fetching campaign", outcome)
    }
}

fn display_id(campaign: &Campaign) -> String {
    campaign.id.as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.into())
}

/// strings as-is, everything else as compact JSON
fn display_value(value: Option<&Value>) -> String {
    match value {
        None => NOT_AVAILABLE.into(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string()
    }
}
