//! Review-feed summarization.
//!
//! Fetches the raw report collection and reduces it to one average rating
//! per category, categories ordered by first appearance in the feed. Used by
//! the `fruitstand summary` CLI command and the `GET /reports-summary` HTTP
//! endpoint.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::config::{Config, UpstreamConfig};
use crate::error::{Error, Result};
use crate::models::{CategorySummary, Report};
use crate::normalize::coerce_number;

const USER_AGENT: &str = concat!("fruitstand/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the review feed.
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReportClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;

        Ok(ReportClient {
            http,
            base_url: config.report_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full report collection from the review feed.
    pub async fn fetch_reports(&self) -> Result<Vec<Report>> {
        let url = format!("{}/reports/", self.base_url);
        tracing::debug!(%url, "fetching reports");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "review feed returned HTTP {}",
                status.as_u16()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;
        let raw = payload.as_array().ok_or_else(|| {
            Error::UpstreamUnavailable("review feed returned a non-array payload".to_string())
        })?;

        Ok(parse_reports(raw))
    }

    /// Fetch and summarize in one call.
    pub async fn fetch_summary(&self) -> Result<Vec<CategorySummary>> {
        let reports = self.fetch_reports().await?;
        Ok(summarize(&reports))
    }
}

/// Parse raw report elements, dropping any that cannot be grouped.
///
/// Only elements carrying a usable category string count as reports. A
/// missing or non-numeric rating coerces to `0.0` rather than dropping the
/// element, so careless feeds still weigh into the average.
pub fn parse_reports(raw: &[Value]) -> Vec<Report> {
    raw.iter()
        .filter_map(|v| {
            let category = v
                .get("category")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|c| !c.is_empty())?;
            let product = v
                .get("product")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let rating = v.get("rating").map(coerce_number).unwrap_or(0.0);
            Some(Report {
                product,
                category: category.to_string(),
                rating,
            })
        })
        .collect()
}

/// Group ratings by category, preserving first-appearance order.
pub fn group_ratings(reports: &[Report]) -> Vec<(String, Vec<f64>)> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for report in reports {
        match index.get(&report.category) {
            Some(&i) => groups[i].1.push(report.rating),
            None => {
                index.insert(report.category.clone(), groups.len());
                groups.push((report.category.clone(), vec![report.rating]));
            }
        }
    }

    groups
}

/// Reduce reports to one [`CategorySummary`] per category.
pub fn summarize(reports: &[Report]) -> Vec<CategorySummary> {
    group_ratings(reports)
        .into_iter()
        .map(|(category, ratings)| {
            let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
            CategorySummary {
                category,
                avg_rating: format_rating(mean),
            }
        })
        .collect()
}

/// Format a rating with exactly two decimals, rounding half away from zero.
pub fn format_rating(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

/// CLI entry point — prints one row per category to stdout.
pub async fn run_summary(config: &Config) -> anyhow::Result<()> {
    let client = ReportClient::new(&config.upstream)?;
    let summary = match client.fetch_summary().await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if summary.is_empty() {
        println!("No reports.");
        return Ok(());
    }

    println!("{:<28} {:>10}", "CATEGORY", "AVG RATING");
    for entry in &summary {
        println!("{:<28} {:>10}", entry.category, entry.avg_rating);
    }

    Ok(())
}
