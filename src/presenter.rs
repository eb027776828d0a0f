//! Host-facing facade over the dialogue runner.

use crate::assets::{AssetHandle, AssetResolver};
use crate::choices::ChoiceBoard;
use crate::config::DialogueConfig;
use crate::error::DialogueResult;
use crate::interp::ScriptLoader;
use crate::runner::{DialoguePhase, DialogueRunner};
use crate::stage::Stage;

/// Thin binding layer between a host surface and the runner.
///
/// Holds no state of its own beyond the runner; widget wiring, asset lookup
/// and script loading are supplied at construction.
pub struct DialoguePresenter {
    runner: DialogueRunner,
}

impl DialoguePresenter {
    pub fn new(
        config: DialogueConfig,
        loader: Box<dyn ScriptLoader>,
        resolver: Box<dyn AssetResolver>,
    ) -> Self {
        Self {
            runner: DialogueRunner::new(config, loader, resolver),
        }
    }

    /// Overrides the display font on every text surface, including each
    /// choice entry spawned later.
    pub fn with_font(mut self, font: AssetHandle) -> Self {
        self.runner.set_font(Some(font));
        self
    }

    /// Runs an initial script immediately, like a scene configured with a
    /// startup story.
    pub fn autostart(mut self, source: &str) -> DialogueResult<Self> {
        self.runner.start_dialogue(source, None)?;
        Ok(self)
    }

    /// Starts a dialogue with an optional one-shot completion callback.
    pub fn start_dialogue(
        &mut self,
        source: &str,
        on_end: Option<Box<dyn FnOnce()>>,
    ) -> DialogueResult<()> {
        self.runner.start_dialogue(source, on_end)
    }

    /// Frame pump; `dt` is unscaled wall-clock seconds.
    pub fn tick(&mut self, dt: f32) -> DialogueResult<()> {
        self.runner.tick(dt)
    }

    pub fn tap_advance(&mut self) -> DialogueResult<()> {
        self.runner.skip_sentence()
    }

    pub fn tap_skip_all(&mut self) {
        self.runner.skip_dialogue()
    }

    pub fn tap_toggle_auto(&mut self) -> DialogueResult<()> {
        self.runner.toggle_auto()
    }

    pub fn tap_choice(&mut self, slot: usize) -> DialogueResult<()> {
        self.runner.choose(slot)
    }

    pub fn stage(&self) -> &Stage {
        self.runner.stage()
    }

    pub fn choices(&self) -> &ChoiceBoard {
        self.runner.choices()
    }

    pub fn phase(&self) -> DialoguePhase {
        self.runner.phase()
    }

    pub fn has_dialogue(&self) -> bool {
        self.runner.has_session()
    }

    /// Direct access for notification wiring and advanced control.
    pub fn runner(&mut self) -> &mut DialogueRunner {
        &mut self.runner
    }
}
