//! Scene appearance derived from per-line annotation tags.

use crate::assets::{AssetHandle, AssetResolver};

/// Speaker and visual selection for the current line.
///
/// Recomputed from each step's tags; nothing carries over between lines, so
/// a line without tags hides the portrait and background and clears the name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneAppearance {
    /// Speaker name, empty when the line is unattributed.
    pub speaker: String,
    pub portrait: Option<AssetHandle>,
    pub background: Option<AssetHandle>,
}

impl SceneAppearance {
    /// Scans `key:value` tags in order.
    ///
    /// Keys are case-insensitive; when a key repeats, the later occurrence
    /// wins. Tags without a separator and unknown keys are skipped. Portrait
    /// and background values are resolved at `root + value`; a failed lookup
    /// leaves the field empty.
    pub fn from_tags(tags: &[String], resolver: &dyn AssetResolver, root: &str) -> Self {
        let mut appearance = Self::default();
        for tag in tags {
            let Some((key, value)) = tag.split_once(':') else {
                continue;
            };
            match key.trim().to_ascii_lowercase().as_str() {
                "character" => appearance.speaker = value.to_string(),
                "tachie" => appearance.portrait = resolver.resolve(&format!("{root}{value}")),
                "background" => appearance.background = resolver.resolve(&format!("{root}{value}")),
                _ => {}
            }
        }
        appearance
    }
}
