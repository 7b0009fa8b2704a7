use std::io::{self, Write};
use console::style;
use indicatif::MultiProgress;
use super::{status_spinner::StatusSpinner, write_banner, write_failure, write_missing_api_key, Result};
use crate::{config::Config, http_client::{AccountInfo, ApiOutcome, HttpClient}};

/// check configuration, then test the API connection.
/// datastore sync would follow a successful check
pub async fn handle(client: &HttpClient, config: &Config, multi: &MultiProgress, out: &mut impl Write) -> Result {
    write_banner(out, "🚀 Brevo campaign sync tool")?;

    if config.require_api_key().is_err() {
        write_missing_api_key(out)?;
        return Ok(());
    }
    match config.require_supabase() {
        Ok(url) => writeln!(out, "🗄️ {} {}", style("Datastore:").dim(), style(url).bright().magenta())?,
        Err(e) => {
            writeln!(out, "❌ {}", style(e).red().bright())?;
            return Ok(());
        }
    }

    if check_connection(client, multi, out).await? {
        writeln!(out, "✅ {}", style("Ready to sync campaign data...").green())?;
    } else {
        writeln!(out, "❌ {}", style("Connection test failed, please check the configuration").red())?;
    }

    Ok(())
}

/// returns whether the account endpoint answered with 200
pub async fn check_connection(client: &HttpClient, multi: &MultiProgress, out: &mut impl Write) -> Result<bool> {
    writeln!(out, "🧪 Testing Brevo API connection...")?;

    let status = StatusSpinner::new("Contacting Brevo...", multi);
    let outcome = client.get_account().await;
    status.clear();

    Ok(write_account(out, &outcome?)?)
}

pub fn write_account(out: &mut impl Write, outcome: &ApiOutcome<AccountInfo>) -> io::Result<bool> {
    match outcome {
        ApiOutcome::Success(info) => {
            writeln!(out, "✅ {}", style("Brevo API connection succeeded").green().bright())?;
            writeln!(out, "📧 {} {}", style("Account:").dim(), style(info.company_name()).bright().cyan())?;
            writeln!(out, "📧 {} {}", style("Email:").dim(), style(info.email()).bright().blue())?;
            Ok(true)
        },
        failure => {
            write_failure(out, "Brevo API connection", failure)?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::tests::{hidden_multi, output}, http_client::{tests::client_for, HttpClientError}};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers::{method, path}};

    fn account_json(value: serde_json::Value) -> AccountInfo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn success_prints_company_and_email() {
        let mut buf = Vec::new();
        let ok = write_account(&mut buf, &ApiOutcome::Success(account_json(json!({
            "companyName": "Acme",
            "email": "a@b.com"
        })))).unwrap();

        let text = output(&buf);
        assert!(ok);
        assert!(text.contains("Account: Acme"));
        assert!(text.contains("Email: a@b.com"));
    }

    #[test]
    fn missing_company_prints_placeholder() {
        let mut buf = Vec::new();
        let ok = write_account(&mut buf, &ApiOutcome::Success(account_json(json!({"email": "a@b.com"})))).unwrap();

        assert!(ok);
        assert!(output(&buf).contains("Account: N/A"));
    }

    #[test]
    fn unauthorized_reports_status_and_body() {
        let mut buf = Vec::new();
        let ok = write_account(&mut buf, &ApiOutcome::HttpError {
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"code":"unauthorized","message":"Key not found"}"#.into()
        }).unwrap();

        let text = output(&buf);
        assert!(!ok);
        assert!(text.contains("401"));
        assert!(text.contains(r#"{"code":"unauthorized","message":"Key not found"}"#));
    }

    #[test]
    fn transport_error_reports_message() {
        let mut buf = Vec::new();
        let err = serde_json::from_str::<AccountInfo>("not json").unwrap_err();
        let ok = write_account(&mut buf, &ApiOutcome::TransportError(HttpClientError::Json(err))).unwrap();

        assert!(!ok);
        assert!(output(&buf).contains("Malformed JSON response"));
    }

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[tokio::test]
    async fn check_stops_when_datastore_config_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let config = config(&[("BREVO_API_KEY", "xkeysib-test")]);
        let mut buf = Vec::new();
        handle(&client, &config, &hidden_multi(), &mut buf).await.unwrap();

        assert!(output(&buf).contains("SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY"));
    }

    #[tokio::test]
    async fn check_reports_ready_after_successful_connection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"companyName": "Acme", "email": "a@b.com"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let config = config(&[
            ("BREVO_API_KEY", "xkeysib-test"),
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key")
        ]);
        let mut buf = Vec::new();
        handle(&client, &config, &hidden_multi(), &mut buf).await.unwrap();

        let text = output(&buf);
        assert!(text.contains("Account: Acme"));
        assert!(text.contains("Ready to sync"));
    }

    #[tokio::test]
    async fn repeated_checks_print_the_same_output() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let multi = hidden_multi();
        let mut first = Vec::new();
        let mut second = Vec::new();
        assert!(!check_connection(&client, &multi, &mut first).await.unwrap());
        assert!(!check_connection(&client, &multi, &mut second).await.unwrap());
        assert_eq!(first, second);
    }
}
