//! Page-number carrier: read once at startup, written back on every page change.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stargazer_engine::write_atomically;
use stargazer_logging::{sg_error, sg_warn};

const SESSION_FILENAME: &str = ".stargazer_session.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    page: i64,
}

/// Starting page: the command-line value wins, then the session file, then 1.
pub fn initial_page(cli_page: Option<&str>, data_dir: &Path) -> u32 {
    let stored = || read_page(data_dir).map(|page| page.to_string());
    let raw = cli_page.map(str::to_owned).or_else(stored);
    stargazer_core::initial_page(raw.as_deref())
}

fn read_page(data_dir: &Path) -> Option<i64> {
    let path = data_dir.join(SESSION_FILENAME);
    let content = fs::read_to_string(&path).ok()?;
    match ron::from_str::<PersistedSession>(&content) {
        Ok(session) => Some(session.page),
        Err(err) => {
            sg_warn!("Ignoring unreadable session file {:?}: {}", path, err);
            None
        }
    }
}

pub fn save_page(data_dir: &Path, page: u32) {
    let session = PersistedSession {
        page: i64::from(page),
    };
    let content = match ron::ser::to_string_pretty(&session, ron::ser::PrettyConfig::new()) {
        Ok(text) => text,
        Err(err) => {
            sg_error!("Failed to serialize session: {}", err);
            return;
        }
    };
    let path = data_dir.join(SESSION_FILENAME);
    if let Err(err) = write_atomically(&path, &content) {
        sg_error!("Failed to write session to {:?}: {}", path, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_to_first_page() {
        let temp = TempDir::new().unwrap();
        assert_eq!(initial_page(None, temp.path()), 1);
    }

    #[test]
    fn stored_page_is_restored() {
        let temp = TempDir::new().unwrap();
        save_page(temp.path(), 4);
        assert_eq!(initial_page(None, temp.path()), 4);
    }

    #[test]
    fn command_line_overrides_stored_page() {
        let temp = TempDir::new().unwrap();
        save_page(temp.path(), 4);
        assert_eq!(initial_page(Some("2"), temp.path()), 2);
        assert_eq!(initial_page(Some("-3"), temp.path()), 1);
        assert_eq!(initial_page(Some("x"), temp.path()), 1);
    }

    #[test]
    fn non_positive_or_corrupt_session_falls_back() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SESSION_FILENAME), "(page: 0)").unwrap();
        assert_eq!(initial_page(None, temp.path()), 1);

        fs::write(temp.path().join(SESSION_FILENAME), "garbage").unwrap();
        assert_eq!(initial_page(None, temp.path()), 1);
    }
}
