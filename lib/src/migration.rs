use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::pipeline::ColorMap;

/// Prefix marking a blockstate target, irrelevant for colors.
pub const BLOCKSTATE_MARKER: char = '*';

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MigrationFile {
    #[serde(default)]
    pub direct_migrations: IndexMap<String, String>,
}

pub fn strip_blockstate_marker(target: &str) -> &str {
    target.strip_prefix(BLOCKSTATE_MARKER).unwrap_or(target)
}

impl MigrationFile {
    /// Copies each target's color to its alias, in file order.
    ///
    /// Stops at the first target without a color; aliases assigned before
    /// that point are kept. Returns how many aliases were assigned.
    pub fn apply(&self, colors: &mut ColorMap) -> crate::Result<usize> {
        for (alias, target) in &self.direct_migrations {
            let target = strip_blockstate_marker(target);

            let Some(color) = colors.get(target).copied() else {
                return Err(crate::Error::UnresolvedMigration {
                    alias: alias.clone(),
                    target: target.to_string(),
                });
            };

            debug!("{alias} -> {target} ({color})");
            colors.insert(alias.clone(), color);
        }

        Ok(self.direct_migrations.len())
    }
}
