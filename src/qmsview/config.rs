use crate::error::{QmsError, Result};
use crate::views::board::DEFAULT_BOARD_STATUSES;
use crate::views::calendar::DEFAULT_VISIBLE_PER_CELL;
use crate::views::gantt::{clamp_zoom, DEFAULT_PADDING_DAYS, DEFAULT_PX_PER_DAY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PAGE_SIZE: usize = 10;

/// View configuration, stored in `<config dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QmsConfig {
    /// Rows per page in the list view
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Board columns, in display order
    #[serde(default = "default_board_statuses")]
    pub board_statuses: Vec<String>,

    /// Records shown per calendar cell before the "+N more" counter
    #[serde(default = "default_calendar_visible")]
    pub calendar_visible: usize,

    /// Days added before the earliest and after the latest Gantt date
    #[serde(default = "default_gantt_padding")]
    pub gantt_padding_days: u32,

    /// Day-scale zoom
    #[serde(default = "default_px_per_day")]
    pub gantt_px_per_day: u32,

    /// JSON file with records; the built-in sample set is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_board_statuses() -> Vec<String> {
    DEFAULT_BOARD_STATUSES.iter().map(|s| s.to_string()).collect()
}

fn default_calendar_visible() -> usize {
    DEFAULT_VISIBLE_PER_CELL
}

fn default_gantt_padding() -> u32 {
    DEFAULT_PADDING_DAYS
}

fn default_px_per_day() -> u32 {
    DEFAULT_PX_PER_DAY
}

impl Default for QmsConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            board_statuses: default_board_statuses(),
            calendar_visible: DEFAULT_VISIBLE_PER_CELL,
            gantt_padding_days: DEFAULT_PADDING_DAYS,
            gantt_px_per_day: DEFAULT_PX_PER_DAY,
            data_file: None,
        }
    }
}

/// Keys settable through `config <key> <value>`.
pub const CONFIG_KEYS: [&str; 5] = [
    "page-size",
    "calendar-visible",
    "gantt-padding",
    "gantt-zoom",
    "data-file",
];

impl QmsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QmsError::Io)?;
        let config: QmsConfig =
            serde_json::from_str(&content).map_err(QmsError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QmsError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QmsError::Serialization)?;
        fs::write(config_path, content).map_err(QmsError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(QmsError::Config("page_size must be at least 1".into()));
        }
        if self.board_statuses.is_empty() {
            return Err(QmsError::Config("board_statuses cannot be empty".into()));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "page-size" => Ok(self.page_size.to_string()),
            "calendar-visible" => Ok(self.calendar_visible.to_string()),
            "gantt-padding" => Ok(self.gantt_padding_days.to_string()),
            "gantt-zoom" => Ok(self.gantt_px_per_day.to_string()),
            "data-file" => Ok(self
                .data_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            other => Err(QmsError::Config(format!("Unknown config key: {}", other))),
        }
    }

    /// Set a key from its string form. Numeric values are range-checked.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let number = |v: &str| {
            v.parse::<u32>()
                .map_err(|_| QmsError::Config(format!("{} expects a number, got '{}'", key, v)))
        };
        match key {
            "page-size" => {
                let n = number(value)?;
                if n == 0 {
                    return Err(QmsError::Config("page-size must be at least 1".into()));
                }
                self.page_size = n as usize;
            }
            "calendar-visible" => self.calendar_visible = number(value)? as usize,
            "gantt-padding" => self.gantt_padding_days = number(value)?,
            "gantt-zoom" => self.gantt_px_per_day = clamp_zoom(number(value)?),
            "data-file" => {
                self.data_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            other => return Err(QmsError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}
