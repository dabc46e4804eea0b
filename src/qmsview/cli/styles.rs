use console::Style;

pub(super) fn status(status: &str) -> Style {
    match status {
        "Pending" => Style::new().yellow(),
        "In-Progress" => Style::new().cyan(),
        "Reviewing" => Style::new().magenta(),
        "Completed" => Style::new().green(),
        _ => Style::new().dim(),
    }
}

pub(super) fn priority(priority: &str) -> Style {
    match priority.to_lowercase().as_str() {
        "high" | "critical" => Style::new().red().bold(),
        "medium" => Style::new().yellow(),
        _ => Style::new(),
    }
}

pub(super) fn heading() -> Style {
    Style::new().bold()
}

pub(super) fn today() -> Style {
    Style::new().reverse()
}

pub(super) fn outside_month() -> Style {
    Style::new().dim()
}

pub(super) fn today_marker() -> Style {
    Style::new().red().bold()
}
