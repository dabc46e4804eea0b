use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use qmsview::error::Result;
use qmsview::filter::{FilterCriteria, SortKey, SortSpec};
use qmsview::model::{Facet, RecordKind, ALL_SENTINEL};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "qmsview",
    bin_name = "qmsview",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Filter, page and project QMS tasks and documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Records file (JSON array); defaults to the configured file or built-in sample data
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Configuration directory
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_name = "DATE", hide = true)]
    pub today: Option<String>,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Views,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Views => "Views:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "board" | "calendar" | "gantt" => Some(CommandGroup::Views),
            "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Views, CommandGroup::Misc]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("qmsview {version}\n"));
    output.push_str("Filter, page and project QMS tasks and documents\n");
    output.push('\n');
    output.push_str("Usage: qmsview [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", sc.get_name(), about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose         Verbose output\n");
    output.push_str("      --data <FILE>     Records file (JSON array)\n");
    output.push_str("      --config-dir <DIR> Configuration directory\n");
    output.push_str("      --json            Print the result as JSON\n");
    output.push_str("  -h, --help            Print help\n");
    output.push_str("  -V, --version         Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, falling back to the grouped help.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }
    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::List { .. }) => "list",
        Some(Commands::Board { .. }) => "board",
        Some(Commands::Calendar { .. }) => "calendar",
        Some(Commands::Gantt { .. }) => "gantt",
        Some(Commands::Config { .. }) => "config",
        None => {
            print_grouped_help();
            return;
        }
    };
    print_help_for_command(name);
}

/// Filter flags shared by every view.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text in title, description, id or author
    #[arg(short, long)]
    pub search: Option<String>,

    /// Module (e.g. CAPA, Audit); "All" for no constraint
    #[arg(long)]
    pub module: Option<String>,

    /// Priority (e.g. High)
    #[arg(long)]
    pub priority: Option<String>,

    /// Status (e.g. In-Progress)
    #[arg(long)]
    pub status: Option<String>,

    /// Business unit
    #[arg(long)]
    pub unit: Option<String>,

    /// Record kind: task or document
    #[arg(long)]
    pub kind: Option<String>,

    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_date_strings(self.from.as_deref(), self.to.as_deref())?;

        let facets = [
            (Facet::Module, &self.module),
            (Facet::Priority, &self.priority),
            (Facet::Status, &self.status),
            (Facet::BusinessUnit, &self.unit),
        ];
        for (facet, value) in facets {
            if let Some(value) = value {
                criteria = criteria.with_facet(facet, value);
            }
        }

        if let Some(kind) = &self.kind {
            let value = match kind.parse::<RecordKind>() {
                Ok(kind) => kind.as_str(),
                Err(_) if kind == ALL_SENTINEL => ALL_SENTINEL,
                // Unknown kinds match nothing, like any other unknown facet value.
                Err(_) => kind.as_str(),
            };
            criteria = criteria.with_facet(Facet::Kind, value);
        }
        Ok(criteria)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScaleArg {
    Month,
    Day,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Paged list of matching records
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page to show (1-based; out-of-range pages are clamped)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Rows per page (overrides the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Sort by date, title, priority, progress or id
        #[arg(long, value_parser = parse_sort_key)]
        sort: Option<SortKey>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Records grouped into status columns
    #[command(display_order = 2)]
    Board {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Month grid of records by date
    #[command(alias = "cal", display_order = 3)]
    Calendar {
        #[command(flatten)]
        filter: FilterArgs,

        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },

    /// Timeline of records
    #[command(display_order = 4)]
    Gantt {
        #[command(flatten)]
        filter: FilterArgs,

        /// Time scale
        #[arg(long, value_enum, default_value_t = ScaleArg::Month)]
        scale: ScaleArg,

        /// Pixels per day on the day scale (clamped to 30-150)
        #[arg(long)]
        zoom: Option<u32>,
    },

    /// Get or set configuration
    #[command(display_order = 10)]
    Config {
        /// Configuration key (page-size, calendar-visible, gantt-padding, gantt-zoom, data-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

fn parse_sort_key(s: &str) -> std::result::Result<SortKey, String> {
    s.parse()
}

/// Sort flags to a spec; `None` keeps source order.
pub fn sort_spec(sort: Option<SortKey>, desc: bool) -> Option<SortSpec> {
    sort.map(|key| {
        if desc {
            SortSpec::descending(key)
        } else {
            SortSpec::ascending(key)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmsview::filter::FacetSelection;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["qmsview"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn list_flags_parse() {
        let cli = parse(&["list", "--status", "Pending", "--page", "3", "--sort", "date", "--desc"]);
        match cli.command {
            Some(Commands::List {
                filter,
                page,
                sort,
                desc,
                ..
            }) => {
                assert_eq!(page, 3);
                assert_eq!(sort, Some(SortKey::Date));
                assert!(desc);
                let criteria = filter.to_criteria().unwrap();
                assert_eq!(
                    criteria.facets.get(&Facet::Status),
                    Some(&FacetSelection::Value("Pending".into()))
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["board", "--json", "-v"]);
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn kind_is_normalized() {
        let args = FilterArgs {
            kind: Some("doc".into()),
            ..Default::default()
        };
        let criteria = args.to_criteria().unwrap();
        assert_eq!(
            criteria.facets.get(&Facet::Kind),
            Some(&FacetSelection::Value("Document".into()))
        );

        let args = FilterArgs {
            kind: Some("All".into()),
            ..Default::default()
        };
        assert!(args.to_criteria().unwrap().is_empty());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let args = FilterArgs {
            from: Some("2026-1-5".into()),
            ..Default::default()
        };
        assert!(args.to_criteria().is_err());
    }

    #[test]
    fn unknown_sort_key_is_a_parse_error() {
        let argv = ["qmsview", "list", "--sort", "colour"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn grouped_help_lists_views() {
        let help = get_grouped_help();
        assert!(help.contains("Views:"));
        assert!(help.contains("gantt"));
        assert!(help.contains("config"));
    }
}
