use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::block::{BlockDefinition, BlockTextures, TextureSource};
use crate::color::{self, HexColor};
use crate::config::{Config, TEXTURE_ROOT};
use crate::migration::MigrationFile;
use crate::scan;
use crate::texture::{self, is_grayscale_mask};

/// Block name to color, in the order names were first seen.
pub type ColorMap = IndexMap<String, HexColor>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub colors: ColorMap,
    /// Block files that produced a color.
    pub blocks: usize,
    /// Aliases assigned from migration files.
    pub aliases: usize,
    /// Files that failed and were skipped, fully or in part.
    pub failures: usize,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> crate::Result<T> {
    let file = File::open(path).map_err(|source| crate::Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs every search folder, then resolves migrations against the result.
    ///
    /// Per file failures are logged and counted, the run always completes.
    pub fn run(&self) -> Report {
        let mut report = Report::default();
        let mut migration_files = Vec::new();

        for (folder, is_migration) in self.config.search_folders() {
            for path in scan::json_files(&folder) {
                if is_migration {
                    migration_files.push(path);
                    continue;
                }

                match self.process_block_file(&path) {
                    Ok(Some((names, color))) => {
                        for name in names {
                            report.colors.insert(name, color);
                        }
                        report.blocks += 1;
                    }
                    Ok(None) => {}
                    Err(err) => {
                        error!("Failed to process JSON: {} ({err})", path.display());
                        report.failures += 1;
                    }
                }
            }
        }

        for path in migration_files {
            match self.process_migration_file(&path, &mut report.colors) {
                Ok(count) => report.aliases += count,
                Err(err) => {
                    error!("Failed to process Migration JSON: {} ({err})", path.display());
                    report.failures += 1;
                }
            }
        }

        info!(
            "Resolved {} names from {} blocks and {} aliases, {} failures",
            report.colors.len(),
            report.blocks,
            report.aliases,
            report.failures
        );

        report
    }

    /// Names defined by the block file at `path` and their shared color.
    ///
    /// `None` for items that aren't blocks or have no textures.
    pub fn process_block_file(&self, path: &Path) -> crate::Result<Option<(Vec<String>, HexColor)>> {
        let definition: BlockDefinition = read_json(path)?;

        let Some(block_type) = definition.block_type else {
            debug!("Not a block: {}", path.display());
            return Ok(None);
        };

        let BlockTextures { names, source } =
            block_type.collect(&scan::file_stem(path), TEXTURE_ROOT)?;

        let color = match source {
            TextureSource::Literal(color) => color,
            TextureSource::Paths(refs) if refs.is_empty() => {
                warn!("Didn't find texture path: {}", path.display());
                return Ok(None);
            }
            TextureSource::Paths(refs) => {
                let mut averages = Vec::with_capacity(refs.len());

                for texture in refs {
                    let resolved = self.config.resolve(&texture.path);

                    if !resolved.exists() {
                        warn!("Texture not found: {}", resolved.display());
                        continue;
                    }

                    let tint = is_grayscale_mask(&texture.path)
                        .then(|| texture.tint.unwrap_or(self.config.default_tint));

                    averages.push(texture::average_image_color(&resolved, tint));
                }

                color::average(&averages)?
            }
        };

        Ok(Some((names, color)))
    }

    pub fn process_migration_file(&self, path: &Path, colors: &mut ColorMap) -> crate::Result<usize> {
        let migrations: MigrationFile = read_json(path)?;

        migrations.apply(colors)
    }
}

/// Serializes `colors` with four space indentation, replacing `path`.
pub fn write_color_map(colors: &ColorMap, path: &Path) -> crate::Result<()> {
    let io_err = |source| crate::Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    colors.serialize(&mut serializer)?;

    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(&buffer).map_err(io_err)?;

    Ok(())
}

/// Runs the pipeline and writes its output where the config says.
pub fn generate(config: Config) -> crate::Result<(Report, PathBuf)> {
    let output = config.resolve_output();
    let report = Pipeline::new(config).run();

    write_color_map(&report.colors, &output)?;

    Ok((report, output))
}
