use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::HexColor;

pub const MIGRATION_FOLDER: &str = "Server/Item/Block/Migrations";

/// Folders holding block items, relative to the asset root.
pub const SEARCH_FOLDERS: &[&str] = &[
    "Server/Item/Items/Wood",
    "Server/Item/Items/Trap",
    "Server/Item/Items/Soil",
    "Server/Item/Items/Rubble",
    "Server/Item/Items/Rock",
    "Server/Item/Items/Rail",
    "Server/Item/Items/Potion",
    "Server/Item/Items/Portal",
    "Server/Item/Items/Plant",
    "Server/Item/Items/Ore",
    "Server/Item/Items/MISC",
    "Server/Item/Items/Furniture",
    "Server/Item/Items/Electrum",
    "Server/Item/Items/Deco",
    "Server/Item/Items/Coops",
    "Server/Item/Items/Container",
    "Server/Item/Items/Cloth",
    "Server/Item/Items/Bone",
    "Server/Item/Items/Bench",
    MIGRATION_FOLDER,
];

/// Texture paths in block files are relative to this folder.
pub const TEXTURE_ROOT: &str = "Common";

pub const OUTPUT_FILE: &str = "color_map.json";

/// Tint for grayscale masks of blocks that don't declare one.
pub const DEFAULT_TINT: HexColor = HexColor::new(0x83, 0xe0, 0x3e);

#[cfg(feature = "clap")]
const HEADING: anstyle::Style = anstyle::Style::new()
    .bold()
    .underline()
    .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlue)));

#[cfg(feature = "clap")]
pub const STYLE: clap::builder::Styles = clap::builder::Styles::styled()
    .usage(HEADING)
    .header(HEADING)
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightCyan))))
    .error(
        anstyle::Style::new()
            .bold()
            .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightRed))),
    );

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[cfg_attr(feature = "clap", clap(author, version, about, long_about = None))]
#[cfg_attr(feature = "clap", command(styles = STYLE))]
/// Averages block textures into a block name to color map
pub struct Config {
    #[cfg_attr(feature = "clap", clap(long = "assets", short = 'a', default_value = "."))]
    /// Unzipped game Assets folder
    ///
    /// search folders and texture paths are resolved from here
    pub asset_root: PathBuf,

    #[cfg_attr(
        feature = "clap",
        clap(long, short = 'o', visible_alias = "out", default_value = OUTPUT_FILE)
    )]
    /// Where the color map is written, overwritten if it exists
    pub output: PathBuf,

    #[cfg_attr(feature = "clap", clap(long, short = 't', default_value_t = DEFAULT_TINT))]
    /// Tint for grayscale mask textures of blocks without one
    pub default_tint: HexColor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            output: PathBuf::from(OUTPUT_FILE),
            default_tint: DEFAULT_TINT,
        }
    }
}

impl Config {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            ..Default::default()
        }
    }

    pub fn search_folders(&self) -> impl Iterator<Item = (PathBuf, bool)> + '_ {
        SEARCH_FOLDERS
            .iter()
            .map(|folder| (self.asset_root.join(folder), *folder == MIGRATION_FOLDER))
    }

    /// Joins `path` onto the asset root unless it is absolute.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_root.join(path)
        }
    }

    /// The output file sits next to the assets when given relatively.
    pub fn resolve_output(&self) -> PathBuf {
        self.resolve(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_searched_last() {
        let config = Config::new("/assets");
        let folders = config.search_folders().collect::<Vec<_>>();

        assert_eq!(folders.len(), SEARCH_FOLDERS.len());
        assert_eq!(
            folders.last(),
            Some(&(PathBuf::from("/assets").join(MIGRATION_FOLDER), true))
        );
        assert!(folders[..folders.len() - 1].iter().all(|(_, migration)| !migration));
    }

    #[test]
    fn resolves_relative_to_asset_root() {
        let config = Config::new("/assets");

        assert_eq!(
            config.resolve("Common/Blocks/Stone.png"),
            PathBuf::from("/assets/Common/Blocks/Stone.png")
        );
    }

    #[test]
    fn defaults_match_constants() {
        let config = Config::default();

        assert_eq!(config.output, PathBuf::from("color_map.json"));
        assert_eq!(config.default_tint.to_string(), "#83e03e");
        assert_eq!(config.resolve_output(), PathBuf::from("./color_map.json"));
    }
}
