//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every view, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Loads** records once from its [`RecordSource`] and keeps them
//! - **Dispatches** to the appropriate command function
//! - **Supplies defaults** from [`QmsConfig`] (page size, board columns, zoom)
//! - **Returns structured types** (`CmdResult`) that borrow from the loaded records
//!
//! It performs no terminal I/O and holds no filter or page state of its own;
//! callers own a [`ViewState`] or [`FilterCriteria`] and pass it in.
//!
//! ## Generic Over RecordSource
//!
//! `QmsApi<S: RecordSource>` is generic over where records come from:
//! - Production: `QmsApi<JsonFileSource>` or `QmsApi<FixtureSource>`
//! - Testing: `QmsApi<InMemorySource>`

use crate::commands;
use crate::config::QmsConfig;
use crate::error::Result;
use crate::filter::{FilterCriteria, SortSpec};
use crate::model::Record;
use crate::source::RecordSource;
use crate::state::ViewState;
use crate::views::calendar::CalendarMonth;
use crate::views::gantt::GanttScale;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

pub struct QmsApi<S: RecordSource> {
    source: S,
    records: Vec<Record>,
    config: QmsConfig,
    config_dir: PathBuf,
    now: Option<NaiveDateTime>,
}

impl<S: RecordSource> QmsApi<S> {
    pub fn new(source: S, config: QmsConfig, config_dir: impl Into<PathBuf>) -> Result<Self> {
        let records = source.load_records()?;
        tracing::info!(source = %source.describe(), count = records.len(), "records loaded");
        Ok(Self {
            source,
            records,
            config,
            config_dir: config_dir.into(),
            now: None,
        })
    }

    /// Pins "now" instead of reading the local clock.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    /// Re-reads the source, replacing the loaded records.
    pub fn reload(&mut self) -> Result<usize> {
        self.records = self.source.load_records()?;
        tracing::info!(count = self.records.len(), "records reloaded");
        Ok(self.records.len())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn config(&self) -> &QmsConfig {
        &self.config
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// A fresh view state sized by the configured page size.
    pub fn view_state(&self) -> ViewState {
        ViewState::new(self.config.page_size)
    }

    pub fn list(
        &self,
        state: &mut ViewState,
        page: i64,
        sort: Option<SortSpec>,
    ) -> commands::CmdResult<'_> {
        commands::list::run(&self.records, state, page, sort)
    }

    pub fn board(&self, criteria: &FilterCriteria) -> commands::CmdResult<'_> {
        commands::board::run(&self.records, criteria, &self.config.board_statuses)
    }

    /// Calendar for `month`, or for the current month when `None`.
    pub fn calendar(
        &self,
        criteria: &FilterCriteria,
        month: Option<CalendarMonth>,
    ) -> Result<commands::CmdResult<'_>> {
        let today = self.now().date();
        let month = match month {
            Some(month) => month,
            None => CalendarMonth::containing(today)?,
        };
        Ok(commands::calendar::run(
            &self.records,
            criteria,
            month,
            today,
            self.config.calendar_visible,
        ))
    }

    /// Gantt chart. `None` uses the month scale.
    pub fn gantt(
        &self,
        criteria: &FilterCriteria,
        scale: Option<GanttScale>,
    ) -> commands::CmdResult<'_> {
        commands::gantt::run(
            &self.records,
            criteria,
            scale.unwrap_or(GanttScale::Month),
            self.config.gantt_padding_days,
            self.now(),
        )
    }

    /// Day-scale Gantt at the configured zoom.
    pub fn gantt_day_scale(&self, criteria: &FilterCriteria) -> commands::CmdResult<'_> {
        self.gantt(criteria, Some(GanttScale::day(self.config.gantt_px_per_day)))
    }

    pub fn config_action(&self, action: ConfigAction) -> Result<commands::CmdResult<'static>> {
        configure(&self.config_dir, action)
    }
}

/// Reads or updates the config in `config_dir` without loading any records,
/// so a broken data file can still be repointed.
pub fn configure(config_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult<'static>> {
    commands::config::run(config_dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, ListView, MessageLevel};
