//! Block definition files and the textures they reference.
//!
//! Every field is optional, the asset files are only loosely consistent.

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use crate::color::HexColor;
use crate::texture::is_grayscale_mask;

/// Infix for the names synthesized from `State.Definitions`.
pub const STATE_NAME_INFIX: &str = "_State_Definitions_";

/// Either a single value or a list of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Direction (or slot) to texture path. Non-string values are ignored.
pub type TextureSet = IndexMap<String, serde_json::Value>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockDefinition {
    #[serde(default)]
    pub block_type: Option<BlockType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockType {
    #[serde(default)]
    pub textures: Option<OneOrMany<TextureSet>>,
    #[serde(default)]
    pub custom_model_texture: Option<OneOrMany<TextureSet>>,
    #[serde(default)]
    pub state: Option<State>,
    #[serde(default)]
    pub tint: Option<OneOrMany<String>>,
    #[serde(default)]
    pub tint_up: Option<OneOrMany<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct State {
    #[serde(default)]
    pub definitions: IndexMap<String, StateDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateDefinition {
    #[serde(default)]
    pub custom_model_texture: Option<OneOrMany<TextureSet>>,
}

/// A texture path relative to the asset root, plus the tint for masks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    pub path: String,
    pub tint: Option<HexColor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// A `#rrggbb` path, used as is without loading any image.
    Literal(HexColor),
    Paths(Vec<TextureRef>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTextures {
    /// Base name first, then one name per state definition.
    pub names: Vec<String>,
    pub source: TextureSource,
}

fn first_str(tint: Option<&OneOrMany<String>>) -> Option<&str> {
    tint.and_then(OneOrMany::first).map(String::as_str)
}

/// Tint for a grayscale mask. Other textures never get one, so their tint
/// is never parsed. An unparsable tint falls back to the default.
fn mask_tint(path: &str, tint: Option<&str>) -> Option<HexColor> {
    if !is_grayscale_mask(path) {
        return None;
    }

    match tint?.parse() {
        Ok(color) => Some(color),
        Err(err) => {
            warn!("Ignoring tint for {path}: {err}");
            None
        }
    }
}

/// Collects paths from a list of texture sets. An `Up` texture wins alone
/// and ends the scan; otherwise every string entry of each set is taken.
fn collect_paths(
    sets: &OneOrMany<TextureSet>,
    tint: Option<&str>,
    tint_up: Option<&str>,
    out: &mut Vec<TextureRef>,
) {
    for set in sets.as_slice() {
        if let Some(up) = set.get("Up").and_then(serde_json::Value::as_str)
            && !up.is_empty()
        {
            out.push(TextureRef {
                path: up.to_string(),
                tint: mask_tint(up, tint_up.or(tint)),
            });
            return;
        }

        out.extend(set.values().filter_map(serde_json::Value::as_str).map(|path| TextureRef {
            path: path.to_string(),
            tint: mask_tint(path, tint),
        }));
    }
}

impl BlockType {
    fn has_plain_textures(&self) -> bool {
        self.textures
            .as_ref()
            .is_some_and(|textures| textures.as_slice().iter().any(|set| !set.is_empty()))
    }

    /// Resolves the names this block defines and where its color comes from.
    ///
    /// Paths are prefixed with `texture_root` and use `/` separators. Every
    /// state shares the single color averaged over all collected textures.
    pub fn collect(&self, base_name: &str, texture_root: &str) -> crate::Result<BlockTextures> {
        let tint = first_str(self.tint.as_ref());
        let tint_up = first_str(self.tint_up.as_ref());

        let mut names = vec![base_name.to_string()];
        let mut refs = Vec::new();

        // Rotations only live in states, crops keep their growth stage textures there
        if let Some(state) = &self.state
            && !self.has_plain_textures()
        {
            for (name, definition) in &state.definitions {
                if let Some(textures) = &definition.custom_model_texture {
                    collect_paths(textures, tint, tint_up, &mut refs);
                }

                names.push(format!("{base_name}{STATE_NAME_INFIX}{name}"));
            }
        }

        if let Some(custom) = &self.custom_model_texture {
            collect_paths(custom, tint, tint_up, &mut refs);
        }

        if let Some(textures) = &self.textures {
            collect_paths(textures, tint, tint_up, &mut refs);
        }

        let root = texture_root.trim_end_matches(['/', '\\']);
        let mut paths = Vec::with_capacity(refs.len());

        for TextureRef { path, tint } in refs {
            let path = path.replace('\\', "/");

            if let Some(literal) = path.strip_prefix('#') {
                return Ok(BlockTextures {
                    names,
                    source: TextureSource::Literal(literal.parse()?),
                });
            }

            paths.push(TextureRef {
                path: format!("{root}/{path}"),
                tint,
            });
        }

        Ok(BlockTextures {
            names,
            source: TextureSource::Paths(paths),
        })
    }
}
