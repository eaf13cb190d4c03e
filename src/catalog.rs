//! Upstream catalog access and query orchestration.
//!
//! [`CatalogClient`] is the only component that talks to the catalog source.
//! Both operations funnel every payload through [`crate::normalize`], so the
//! lookup and listing paths can never disagree about defaulting. Used by the
//! `fruitstand catalog` CLI command and the `GET /catalog` HTTP endpoint.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config::{Config, UpstreamConfig};
use crate::error::{Error, Result};
use crate::filter::FilterSpec;
use crate::models::CatalogItem;
use crate::normalize::{normalize_all, normalize_item};

const USER_AGENT: &str = concat!("fruitstand/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the upstream catalog source.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

/// Filtered listing response: the retained items, their count, and the
/// constraint set that was actually applied (unset constraints echo null).
#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing {
    pub count: usize,
    pub items: Vec<CatalogItem>,
    pub filters: FilterSpec,
}

impl CatalogClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;

        Ok(CatalogClient {
            http,
            base_url: config.catalog_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a single catalog item by name. No filtering applies here.
    ///
    /// An upstream 404 (or a payload the normalizer rejects) means the name
    /// does not exist; any other non-success status means the source is
    /// unavailable.
    pub async fn lookup(&self, name: &str) -> Result<CatalogItem> {
        let name = name.trim();
        let url = format!("{}/{}", self.base_url, name);
        tracing::debug!(%url, "catalog lookup");

        let response = self.http.get(&url).send().await.map_err(upstream_err)?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("no catalog item named '{}'", name)));
        }
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "catalog source returned HTTP {}",
                status.as_u16()
            )));
        }

        let payload: Value = response.json().await.map_err(upstream_err)?;
        normalize_item(&payload)
            .map_err(|_| Error::NotFound(format!("no catalog item named '{}'", name)))
    }

    /// Fetch the full catalog and apply `filters` to the normalized items.
    ///
    /// Malformed elements are dropped individually and never abort the
    /// listing; a payload that is not an array at all counts as an
    /// unavailable source.
    pub async fn list(&self, filters: FilterSpec) -> Result<CatalogListing> {
        let url = format!("{}/all", self.base_url);
        tracing::debug!(%url, "catalog listing");

        let response = self.http.get(&url).send().await.map_err(upstream_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "catalog source returned HTTP {}",
                status.as_u16()
            )));
        }

        let payload: Value = response.json().await.map_err(upstream_err)?;
        let raw = payload.as_array().ok_or_else(|| {
            Error::UpstreamUnavailable("catalog source returned a non-array payload".to_string())
        })?;

        let normalized = normalize_all(raw);
        let dropped = raw.len() - normalized.len();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped malformed catalog items");
        }

        let items: Vec<CatalogItem> = normalized
            .into_iter()
            .filter(|item| filters.matches(item))
            .collect();

        Ok(CatalogListing {
            count: items.len(),
            items,
            filters,
        })
    }
}

fn upstream_err(e: reqwest::Error) -> Error {
    Error::UpstreamUnavailable(e.to_string())
}

/// CLI entry point — one item when `name` is given, a filtered listing
/// otherwise. Prints to stdout.
pub async fn run_catalog(
    config: &Config,
    name: Option<&str>,
    filters: FilterSpec,
) -> anyhow::Result<()> {
    let client = CatalogClient::new(&config.upstream)?;

    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let item = match client.lookup(name).await {
                Ok(item) => item,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            print_item(&item);
        }
        None => {
            let listing = match client.list(filters).await {
                Ok(listing) => listing,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            if listing.items.is_empty() {
                println!("No items matched.");
                return Ok(());
            }
            println!(
                "{:<20} {:<16} {:>8} {:>10}",
                "NAME", "FAMILY", "SUGAR", "CALORIES"
            );
            for item in &listing.items {
                println!(
                    "{:<20} {:<16} {:>8.1} {:>10.1}",
                    item.name,
                    item.family.as_deref().unwrap_or("-"),
                    item.nutrition.sugar,
                    item.nutrition.calories
                );
            }
            println!();
            println!("{} item(s).", listing.count);
        }
    }

    Ok(())
}

fn print_item(item: &CatalogItem) {
    println!("--- Catalog item ---");
    println!("name:          {}", item.name);
    println!("genus:         {}", item.genus.as_deref().unwrap_or("-"));
    println!("family:        {}", item.family.as_deref().unwrap_or("-"));
    println!("order:         {}", item.order.as_deref().unwrap_or("-"));
    println!("calories:      {}", item.nutrition.calories);
    println!("sugar:         {}", item.nutrition.sugar);
    println!("carbohydrates: {}", item.nutrition.carbohydrates);
    println!("protein:       {}", item.nutrition.protein);
    println!("fat:           {}", item.nutrition.fat);
}
