use crossterm::style::Stylize;

use crate::ui::primitives::icon::Icon;
use wampa::application::watch::WatchEvent;
use wampa::Source;

pub fn render_watch_header(
    sources: &[Source],
    output: &str,
    mode: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = if supports_color {
        format!("{}", "Wampa Watch".cyan().bold())
    } else {
        "Wampa Watch".to_string()
    };

    let mut out = format!(
        "{} {}\n",
        Icon::Watch.colored(supports_color, supports_unicode),
        title
    );
    for source in sources {
        let icon = if source.is_remote() {
            Icon::Remote
        } else {
            Icon::Arrow
        };
        out.push_str(&format!(
            "  {} {}\n",
            icon.colored(supports_color, supports_unicode),
            source
        ));
    }
    out.push_str(&format!("Output: {}\n", output));
    out.push_str(&format!("Mode: {}\n", mode));
    out.push_str("Hint: Press Ctrl+C to stop\n\n");
    out
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);

    match event {
        WatchEvent::WatchStarted { sources, .. } => format!(
            "{} {} Watching {} source(s)\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            sources.len()
        ),
        WatchEvent::SourceChanged { path } => format!(
            "{} {} Changed: {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            path
        ),
        WatchEvent::SourceError { source, message } => format!(
            "{} {} Skipped {}: {}\n",
            prefix,
            Icon::Warning.colored(supports_color, supports_unicode),
            source,
            message
        ),
        WatchEvent::OutputUpdated { path, sources } => format!(
            "{} {} Updated {} ({} source(s))\n",
            prefix,
            Icon::Success.colored(supports_color, supports_unicode),
            path,
            sources
        ),
        WatchEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            message
        ),
        WatchEvent::Shutdown => format!(
            "\n{} {} Watch stopped.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode)
        ),
    }
}
