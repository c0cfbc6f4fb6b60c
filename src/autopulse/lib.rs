//! # AutoPulse Architecture
//!
//! AutoPulse is an automotive news publishing toolkit: an article collection with
//! public listings, per-article page metadata, admin authoring, JSON export and
//! import, sitemap generation and AI-drafted articles. It is a library first; the
//! `autopulse` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output, exit codes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Facade over commands, owns store + config + admin gate   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per workflow, returns CmdResult               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ArticleStorage trait, FileStorage, InMemoryStorage       │
//! │  - ArticleStore: the single owner of the collection         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The domain modules (`model`, `slug`, `views`, `metadata`, `sitemap`, `draft`,
//! `route`, `auth`) are pure and are used by the command layer.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the binary decides where they end up
//! (see [`logging`]).
//!
//! ## Testing Strategy
//!
//! 1. **Domain and commands**: unit tests beside the code, on `InMemoryStorage`
//!    fixtures (`store::memory::fixtures`).
//! 2. **API**: dispatch tests, including the admin session requirement.
//! 3. **Storage and CLI**: integration tests under `tests/` against a temporary
//!    data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic per workflow
//! - [`store`]: persistence abstraction and the article repository
//! - [`model`]: `Article` and `ArticleForm`
//! - [`views`]: published, category, search and featured views
//! - [`slug`]: slug derivation and id assignment
//! - [`metadata`]: document head map and the article metadata injector
//! - [`sitemap`]: sitemap XML
//! - [`draft`]: AI draft contract and generation guard
//! - [`route`]: hash-router paths
//! - [`auth`]: admin passphrase gate
//! - [`config`]: site configuration
//! - [`templates`]: embedded minijinja templates
//! - [`logging`]: subscriber setup for binaries
//! - [`error`]: error types

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod model;
pub mod route;
pub mod sitemap;
pub mod slug;
pub mod store;
pub mod templates;
pub mod views;
