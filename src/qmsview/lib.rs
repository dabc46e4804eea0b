//! # QMS View Architecture
//!
//! qmsview is a **UI-agnostic view pipeline** for quality-management tasks and
//! document revisions. It turns one flat list of records into the four things a
//! QMS screen shows: a paged list, a status board, a month calendar and a
//! Gantt timeline. The binary is one client of it; nothing below the CLI knows
//! about a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables and grids, exit codes   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the loaded records and the config                   │
//! │  - Dispatches to commands, fills in configured defaults     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - filter → sort → paginate or project, plus user messages  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Pipeline (filter.rs, paginate.rs, views/)                  │
//! │  - Pure functions over borrowed records                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                                     │
//! │  - RecordSource trait: JSON file, built-in fixture, memory  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Borrowed Views
//!
//! Records are loaded once and never copied by the pipeline. Filtering yields
//! `Vec<&Record>` in source order; every projection and page borrows from the
//! same storage, so a `CmdResult<'a>` lives exactly as long as the API that
//! produced it.
//!
//! ## Dates
//!
//! Record dates are parsed strictly as `YYYY-MM-DD` when records are loaded
//! and compared as `chrono::NaiveDate` from then on. A malformed date is a
//! load error, not a silently mis-ordered row.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all views
//! - [`commands`]: One module per view plus `config`
//! - [`filter`]: Filter criteria, predicate construction, sorting
//! - [`paginate`]: Page arithmetic and slicing
//! - [`views`]: Board, calendar and Gantt projections
//! - [`state`]: Page and criteria state, stale-result guard
//! - [`source`]: Record sources
//! - [`model`]: `Record`, `RecordKind`, `Facet`
//! - [`config`]: Persisted view settings
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod paginate;
pub mod source;
pub mod state;
pub mod views;
