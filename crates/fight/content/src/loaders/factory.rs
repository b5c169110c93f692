//! Content factory for loading fight content from a data directory.

use std::path::{Path, PathBuf};

use fight_core::FightTables;

use crate::loaders::{LoadResult, Roster, RosterLoader, TablesLoader};

/// Content factory that loads all fight content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const TABLES_FILE: &'static str = "tables.toml";
    pub const ROSTER_FILE: &'static str = "roster.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load balance tables from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<FightTables> {
        TablesLoader::load(&self.data_dir.join(Self::TABLES_FILE))
    }

    /// Load `tables.toml` if present, default tables otherwise.
    pub fn load_tables_or_default(&self) -> LoadResult<FightTables> {
        let path = self.data_dir.join(Self::TABLES_FILE);
        if path.exists() {
            TablesLoader::load(&path)
        } else {
            Ok(FightTables::default())
        }
    }

    /// Load the brute roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        RosterLoader::load(&self.data_dir.join(Self::ROSTER_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tables.toml"), "max_turns = 40\n").unwrap();
        std::fs::write(
            dir.path().join("roster.ron"),
            r#"[(id: 7, name: "Solo", level: 1, hp: 20, strength: 2, agility: 2, speed: 2)]"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_tables().unwrap().max_turns, 40);
        assert_eq!(factory.load_roster().unwrap().len(), 1);
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert!(factory.load_tables().is_err());
        assert_eq!(factory.load_tables_or_default().unwrap(), FightTables::default());
    }

    #[test]
    fn read_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_roster().unwrap_err();
        assert!(err.to_string().contains("roster.ron"));
    }
}
