//! Optional file logging.
//!
//! The terminal belongs to the interface while the game runs, so log lines only go to a file and
//! only when one is requested.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result};
use tracing::Level;

/// Installs a global plain-text subscriber writing to `path`, or does nothing without a path.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a global subscriber is already set.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_path_is_noop() {
        assert!(init(None).is_ok(), "logging stays off without a file");
    }

    #[test]
    fn test_init_with_unwritable_path_fails() {
        let path = Path::new("/nonexistent-directory/pacsearch/run.log");

        assert!(init(Some(path)).is_err(), "file creation errors are reported");
    }
}
