//! Configuration loading and layering

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{WampaError, WampaResult};
use crate::infrastructure::watcher::WatcherMode;

use super::types::Config;
use super::ConfigWarning;

/// Config file looked up when `-c` is not given
pub const DEFAULT_CONFIG_FILE: &str = "wampa.json";

const KNOWN_KEYS: &[&str] = &[
    "input_files",
    "output_file",
    "watch",
    "mode",
    "poll_interval_ms",
    "max_remote_size",
    "channel_capacity",
    "retain_on_error",
];

/// Values supplied on the command line. `None` and empty lists leave the
/// lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub input_files: Vec<String>,
    pub output_file: Option<String>,
    pub mode: Option<WatcherMode>,
    pub poll_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Whether the command line alone names inputs and an output
    pub fn is_complete(&self) -> bool {
        !self.input_files.is_empty() && self.output_file.is_some()
    }
}

/// Parse JSON config text, collecting unknown keys as warnings.
pub fn parse_with_warnings(content: &str, file: &Path) -> WampaResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(content);

    let config: Config = serde_ignored::deserialize(&mut deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| WampaError::ConfigParse {
        file: file.to_path_buf(),
        message: e.to_string(),
    })?;

    deserializer.end().map_err(|e| WampaError::ConfigParse {
        file: file.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: file.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> WampaResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Build the effective configuration.
///
/// Layers, lowest first: defaults, the config file, `WAMPA_*` environment
/// variables, then `overrides`. A missing file is tolerated unless
/// `required` is set. The result is validated.
pub fn load_layered(
    path: &Path,
    required: bool,
    overrides: &ConfigOverrides,
) -> WampaResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match load_with_warnings(path) {
        Ok(loaded) => loaded,
        Err(WampaError::Io(e)) if e.kind() == io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            (Config::default(), Vec::new())
        }
        Err(WampaError::Io(e)) => {
            return Err(WampaError::InvalidConfig(format!(
                "failed to load config file {}: {}",
                path.display(),
                e
            )))
        }
        Err(e) => return Err(e),
    };

    let config = apply_overrides(with_env_overrides(config), overrides);
    config.validate()?;
    Ok((config, warnings))
}

/// Apply command-line overrides
pub fn apply_overrides(mut config: Config, overrides: &ConfigOverrides) -> Config {
    if !overrides.input_files.is_empty() {
        config.input_files = overrides.input_files.clone();
    }
    if let Some(output) = &overrides.output_file {
        config.output_file = output.clone();
    }
    if let Some(mode) = overrides.mode {
        config.watch.mode = mode;
    }
    if let Some(ms) = overrides.poll_interval_ms {
        config.watch.poll_interval_ms = ms;
    }
    config
}

/// Apply environment variable overrides (WAMPA_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`. Invalid values are ignored with a
/// warning.
pub(crate) fn apply_env(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(raw) = lookup("WAMPA_WATCH_MODE") {
        match raw.parse::<WatcherMode>() {
            Ok(mode) => config.watch.mode = mode,
            Err(_) => {
                let hint = suggest_from(&raw.to_lowercase(), &["poll", "native"])
                    .map(|s| format!(" (did you mean '{}'?)", s))
                    .unwrap_or_default();
                tracing::warn!("ignoring invalid WAMPA_WATCH_MODE '{}'{}", raw, hint);
            }
        }
    }

    if let Some(ms) = parse_number(&lookup, "WAMPA_POLL_INTERVAL_MS") {
        config.watch.poll_interval_ms = ms;
    }

    if let Some(max) = parse_number(&lookup, "WAMPA_MAX_REMOTE_SIZE") {
        config.watch.max_remote_size = max;
    }

    config
}

fn parse_number(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u64> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!("ignoring invalid {} '{}': expected a positive integer", name, raw);
            None
        }
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    let quoted = format!("\"{}\"", needle);
    content
        .lines()
        .position(|line| line.contains(&quoted))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    suggest_from(unknown, KNOWN_KEYS)
}

fn suggest_from(unknown: &str, candidates: &[&str]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist > 0 && dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_typos() {
        assert_eq!(levenshtein("output_file", "output_file"), 0);
        assert_eq!(levenshtein("output_fiel", "output_file"), 2);
        assert_eq!(levenshtein("mode", "mod"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn suggest_key_close_match() {
        assert_eq!(suggest_key("input_file"), Some("input_files".to_string()));
        assert_eq!(suggest_key("completely_unrelated"), None);
    }

    #[test]
    fn find_line_number_matches_quoted_key() {
        let content = "{\n  \"input_files\": [],\n  \"colour\": true\n}";
        assert_eq!(find_line_number(content, "colour"), Some(3));
        assert_eq!(find_line_number(content, "missing"), None);
    }
}
