//! # CLI Layer
//!
//! This module is **one possible UI client** for qmsview. It is the only place
//! that parses arguments, picks a record source, writes to stdout and decides
//! exit codes.
//!
//! ## Flow
//!
//! 1. Parse arguments (`setup.rs`) and install logging (`logging.rs`)
//! 2. Resolve the config dir: `--config-dir`, else the platform config dir
//! 3. `config` is answered here without loading records
//! 4. Otherwise pick the source: `--data`, else the configured `data-file`,
//!    else the built-in sample set; build `QmsApi` around it
//! 5. Call the API, then either print JSON or render for the terminal
//!    (`render.rs`) followed by the result's messages

use super::logging;
use super::render::{
    print_messages, render_board, render_calendar, render_config, render_gantt, render_list,
    terminal_width,
};
use super::setup::{
    print_grouped_help, print_subcommand_help, sort_spec, Cli, Commands, FilterArgs, ScaleArg,
};
use chrono::NaiveTime;
use clap::Parser;
use directories::ProjectDirs;
use qmsview::api::{self, CmdResult, ConfigAction, QmsApi};
use qmsview::config::QmsConfig;
use qmsview::error::{QmsError, Result};
use qmsview::filter::SortSpec;
use qmsview::model::parse_iso_date;
use qmsview::source::fixture::FixtureSource;
use qmsview::source::fs::JsonFileSource;
use qmsview::source::RecordSource;
use qmsview::state::ViewState;
use qmsview::views::calendar::CalendarMonth;
use qmsview::views::GanttScale;
use std::path::{Path, PathBuf};

struct AppContext {
    api: QmsApi<Box<dyn RecordSource>>,
    json: bool,
    width: usize,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    logging::init(cli.verbose);
    let config_dir = resolve_config_dir(cli.config_dir.clone())?;

    let command = match cli.command {
        Some(Commands::Config { key, value }) => {
            return handle_config(&config_dir, key, value, cli.json);
        }
        other => other,
    };

    let ctx = init_context(config_dir, cli.data, cli.today.as_deref(), cli.json)?;

    match command {
        Some(Commands::List {
            filter,
            page,
            page_size,
            sort,
            desc,
        }) => handle_list(&ctx, &filter, page, page_size, sort_spec(sort, desc)),
        Some(Commands::Board { filter }) => handle_board(&ctx, &filter),
        Some(Commands::Calendar { filter, month }) => {
            handle_calendar(&ctx, &filter, month.as_deref())
        }
        Some(Commands::Gantt {
            filter,
            scale,
            zoom,
        }) => handle_gantt(&ctx, &filter, scale, zoom),
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&ctx, &FilterArgs::default(), 1, None, None),
    }
}

fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "qmsview", "qmsview")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            QmsError::Config("could not determine a config directory; pass --config-dir".into())
        })
}

fn init_context(
    config_dir: PathBuf,
    data: Option<PathBuf>,
    today: Option<&str>,
    json: bool,
) -> Result<AppContext> {
    let config = QmsConfig::load(&config_dir)?;

    let source: Box<dyn RecordSource> = match data.or_else(|| config.data_file.clone()) {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(FixtureSource),
    };

    let mut api = QmsApi::new(source, config, config_dir)?;
    if let Some(today) = today {
        api = api.with_now(parse_iso_date(today)?.and_time(NaiveTime::MIN));
    }

    Ok(AppContext {
        api,
        json,
        width: terminal_width(),
    })
}

/// Prints the result as JSON, or as rendered text followed by its messages.
fn emit<'a>(
    ctx: &AppContext,
    result: &CmdResult<'a>,
    render: impl FnOnce(&CmdResult<'a>) -> String,
) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    print!("{}", render(result));
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    filter: &FilterArgs,
    page: i64,
    page_size: Option<usize>,
    sort: Option<SortSpec>,
) -> Result<()> {
    let mut state = match page_size {
        Some(size) => ViewState::new(size),
        None => ctx.api.view_state(),
    };
    state.replace_criteria(filter.to_criteria()?);

    let result = ctx.api.list(&mut state, page, sort);
    emit(ctx, &result, |r| {
        r.list
            .as_ref()
            .map(|view| render_list(view, ctx.width))
            .unwrap_or_default()
    })
}

fn handle_board(ctx: &AppContext, filter: &FilterArgs) -> Result<()> {
    let criteria = filter.to_criteria()?;
    let result = ctx.api.board(&criteria);
    emit(ctx, &result, |r| {
        r.board
            .as_ref()
            .map(|view| render_board(view, ctx.width))
            .unwrap_or_default()
    })
}

fn handle_calendar(ctx: &AppContext, filter: &FilterArgs, month: Option<&str>) -> Result<()> {
    let criteria = filter.to_criteria()?;
    let month = month.map(CalendarMonth::parse).transpose()?;
    let result = ctx.api.calendar(&criteria, month)?;
    emit(ctx, &result, |r| {
        r.calendar
            .as_ref()
            .map(|view| render_calendar(view, ctx.width))
            .unwrap_or_default()
    })
}

fn handle_gantt(
    ctx: &AppContext,
    filter: &FilterArgs,
    scale: ScaleArg,
    zoom: Option<u32>,
) -> Result<()> {
    let criteria = filter.to_criteria()?;
    let scale = match scale {
        ScaleArg::Month => {
            if zoom.is_some() {
                tracing::debug!("--zoom only applies to the day scale; ignoring");
            }
            GanttScale::Month
        }
        ScaleArg::Day => GanttScale::day(zoom.unwrap_or(ctx.api.config().gantt_px_per_day)),
    };
    let result = ctx.api.gantt(&criteria, Some(scale));
    emit(ctx, &result, |r| {
        r.gantt
            .as_ref()
            .map(|view| render_gantt(view, ctx.width))
            .unwrap_or_default()
    })
}

fn handle_config(
    config_dir: &Path,
    key: Option<String>,
    value: Option<String>,
    json: bool,
) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = api::configure(config_dir, action)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
