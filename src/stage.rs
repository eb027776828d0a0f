//! Presentation model consumed by the host renderer.

use crate::assets::AssetHandle;

/// Everything the host needs to draw the dialogue surface.
///
/// The runner mutates this in place; the host reads it each frame.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    /// Dialogue panel opacity, 0.0 (hidden) to 1.0.
    pub panel_alpha: f32,
    /// Whether the panel accepts input.
    pub interactable: bool,
    /// Speaker name for the current line, empty when unattributed.
    pub speaker: String,
    /// Full text of the current line.
    pub line: String,
    /// Number of characters of `line` currently visible.
    pub visible_chars: usize,
    /// Portrait asset, `None` hides the element.
    pub portrait: Option<AssetHandle>,
    /// Background asset, `None` hides the element.
    pub background: Option<AssetHandle>,
    /// Auto-mode button caption.
    pub auto_label: String,
    pub auto_label_alpha: f32,
    /// Font override applied by the presenter, `None` for the host default.
    pub font: Option<AssetHandle>,
}

impl Stage {
    /// The visible prefix of the current line.
    pub fn visible_text(&self) -> &str {
        match self.line.char_indices().nth(self.visible_chars) {
            Some((idx, _)) => &self.line[..idx],
            None => &self.line,
        }
    }
}
