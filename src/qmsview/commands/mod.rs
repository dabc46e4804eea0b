use crate::config::QmsConfig;
use crate::views::{BoardView, CalendarView, GanttView};
use serde::Serialize;

pub mod board;
pub mod calendar;
pub mod config;
pub mod gantt;
pub mod list;

pub use list::ListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured outcome of a command. Exactly one view field is set for the
/// view commands; `config` is set by the config command.
#[derive(Debug, Default, Serialize)]
pub struct CmdResult<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gantt: Option<GanttView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<QmsConfig>,
    pub messages: Vec<CmdMessage>,
}

impl<'a> CmdResult<'a> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_list(mut self, list: ListView<'a>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn with_board(mut self, board: BoardView<'a>) -> Self {
        self.board = Some(board);
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarView<'a>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn with_gantt(mut self, gantt: GanttView<'a>) -> Self {
        self.gantt = Some(gantt);
        self
    }

    pub fn with_config(mut self, config: QmsConfig) -> Self {
        self.config = Some(config);
        self
    }
}
