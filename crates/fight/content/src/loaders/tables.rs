//! Balance tables loader.

use std::path::Path;

use fight_core::FightTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`FightTables`] from TOML files.
///
/// Every field is optional in the file; missing entries keep their default
/// value, so a table file only needs to list what it overrides.
pub struct TablesLoader;

impl TablesLoader {
    /// Load tables from a TOML file.
    pub fn load(path: &Path) -> LoadResult<FightTables> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables TOML {}: {}", path.display(), e))
    }

    /// Parse tables from TOML text.
    pub fn parse(content: &str) -> LoadResult<FightTables> {
        let tables: FightTables = toml::from_str(content)?;
        validate(&tables)?;
        Ok(tables)
    }
}

/// Upper bound for percent rolls and jitter; anything larger is a typo.
const MAX_ROLL: u32 = 10_000;

fn validate(tables: &FightTables) -> LoadResult<()> {
    let rolls = [
        ("initiative_jitter", tables.initiative_jitter),
        ("damage_variance_max", tables.damage_variance_max),
        ("vampirism_heal_max", tables.vampirism_heal_max),
    ];
    for (name, value) in rolls {
        if value > MAX_ROLL {
            anyhow::bail!("{name} ({value}) exceeds {MAX_ROLL}");
        }
    }

    let ranges = [
        ("damage_variance", tables.damage_variance_min, tables.damage_variance_max),
        ("vampirism_heal", tables.vampirism_heal_min, tables.vampirism_heal_max),
        ("bomb_damage", tables.bomb_damage_min, tables.bomb_damage_max),
    ];
    for (name, min, max) in ranges {
        if min > max {
            anyhow::bail!("{name}_min ({min}) is greater than {name}_max ({max})");
        }
    }
    if tables.max_steps == 0 {
        anyhow::bail!("max_steps must be positive");
    }
    Ok(())
}
