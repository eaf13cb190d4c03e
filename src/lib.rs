//! # fruitstand
//!
//! A small backend for exploring a fruit catalog.
//!
//! fruitstand proxies an upstream catalog API behind a normalizing,
//! filterable endpoint, reduces an upstream review feed to per-category
//! average ratings, and keeps user-saved favorites in SQLite. Everything is
//! reachable from both a CLI and an HTTP JSON API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌───────────┐
//! │  Upstreams  │──▶│  Normalize  │   │  SQLite   │
//! │ catalog/rev │   │  + Filter   │   │ favorites │
//! └─────────────┘   └──────┬──────┘   └─────┬─────┘
//!                          │                │
//!                      ┌───┴────────────────┤
//!                      ▼                    ▼
//!                 ┌──────────┐        ┌──────────┐
//!                 │   CLI    │        │   HTTP   │
//!                 │fruitstand│        │  (JSON)  │
//!                 └──────────┘        └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! fruitstand init                   # create database
//! fruitstand catalog                # list the whole catalog
//! fruitstand catalog Banana         # one item
//! fruitstand catalog --family rosaceae --max-calories 60
//! fruitstand summary                # average rating per category
//! fruitstand favorites add Banana --notes "breakfast staple"
//! fruitstand serve                  # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`normalize`] | Raw upstream payloads → canonical items |
//! | [`filter`] | Declarative catalog filtering |
//! | [`catalog`] | Upstream catalog client and queries |
//! | [`reports`] | Review feed client and summaries |
//! | [`favorites`] | Favorite validation and storage |
//! | [`server`] | HTTP JSON server |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod migrate;
pub mod models;
pub mod normalize;
pub mod reports;
pub mod server;
