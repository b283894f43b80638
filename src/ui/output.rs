use std::path::Path;

use wampa::config::ConfigWarning;

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, path.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, path.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}
