//! Doctor command - verify configuration and service reachability.

use crate::cli::Output;
use crate::collaborator::{check_health, create_http_client};
use crate::config::Settings;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Vidask Doctor");
    println!();
    println!("Checking configuration and services...\n");

    let mut checks = Vec::new();

    println!("{}", style("Configuration").bold());
    checks.push(check_config_file(config_path));
    checks.extend(check_endpoints(settings));
    for check in &checks {
        check.print();
    }

    println!();

    println!("{}", style("Services").bold());
    let service_check = check_service(settings).await;
    service_check.print();
    checks.push(service_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Vidask.",
            errors
        ));
        anyhow::bail!("{} doctor check(s) failed", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Vidask is ready to use.");
    }

    Ok(())
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: vidask config edit",
        )
    }
}

/// Check that every collaborator endpoint resolves.
fn check_endpoints(settings: &Settings) -> Vec<CheckResult> {
    let collaborators = &settings.collaborators;
    let mut results = Vec::new();

    match collaborators.endpoints() {
        Ok(endpoints) => {
            results.push(CheckResult::ok("Transcript endpoint", endpoints.transcript.as_str()));
            results.push(CheckResult::ok("Ingest endpoint", endpoints.ingest.as_str()));
            results.push(CheckResult::ok("Ask endpoint", endpoints.ask.as_str()));
        }
        Err(e) => results.push(CheckResult::error(
            "Endpoints",
            &e.to_string(),
            "Set collaborators.base_url in the config file or pass --server",
        )),
    }

    results.push(match collaborators.timeout() {
        Some(timeout) => CheckResult::ok("Request timeout", &format!("{}s", timeout.as_secs())),
        None => CheckResult::warning(
            "Request timeout",
            "disabled",
            "A stalled service will block the session; set collaborators.timeout_seconds",
        ),
    });

    results
}

/// Probe the service's health endpoint.
async fn check_service(settings: &Settings) -> CheckResult {
    let hint = format!(
        "Start the backend at {} or pass --server <url>",
        settings.collaborators.base_url
    );

    let endpoints = match settings.collaborators.endpoints() {
        Ok(endpoints) => endpoints,
        Err(_) => return CheckResult::error("Backend", "endpoints are not configured", &hint),
    };

    let http = match create_http_client(settings.collaborators.timeout()) {
        Ok(http) => http,
        Err(e) => return CheckResult::error("Backend", &format!("HTTP client error: {}", e), &hint),
    };

    match check_health(&http, endpoints.health.clone()).await {
        Ok(status) if status.is_success() => {
            CheckResult::ok("Backend", &format!("{} ({})", endpoints.health, status))
        }
        Ok(status) => CheckResult::warning(
            "Backend",
            &format!("reachable but returned {}", status),
            "Check collaborators.health_path",
        ),
        Err(e) => CheckResult::error("Backend", &format!("unreachable: {}", e), &hint),
    }
}
