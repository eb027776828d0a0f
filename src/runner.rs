//! The dialogue session state machine.

use crate::appear::SceneAppearance;
use crate::assets::AssetResolver;
use crate::choices::{ChoiceBoard, ChoiceSlot};
use crate::config::DialogueConfig;
use crate::error::DialogueResult;
use crate::interp::{Interpreter, ScriptLoader};
use crate::signal::{Hooks, Signal, SignalMut};
use crate::stage::Stage;
use crate::tween::{Easing, FadeBoard, FadeTarget, Tween};
use crate::typing::{TypingProcess, TypingTick};

const AUTO_LABEL_PULSE: f32 = 0.25;

/// Where the state machine currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialoguePhase {
    /// No session.
    #[default]
    Idle,
    /// Interpreter stepping; transient within a single call.
    Advancing,
    /// Revealing the current line, or holding it fully revealed.
    Typing,
    /// Choices shown, waiting for a selection.
    AwaitingChoice,
    /// Teardown in progress.
    Ending,
}

/// Payload for the per-entry choice notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoicePresented {
    /// Display position of the entry.
    pub slot: usize,
    /// Interpreter-assigned index.
    pub choice_index: usize,
    pub text: String,
}

/// External notification surface for a runner.
///
/// Listeners fire in registration order and can be disconnected by `SlotId`.
#[derive(Debug, Default)]
pub struct DialogueEvents {
    /// Fired when a session starts.
    pub dialogue_start: Signal<()>,
    /// Fired at every session end.
    pub dialogue_end: Signal<()>,
    /// Fired on every auto-mode flip with the new value.
    pub auto_toggled: Signal<bool>,
    /// Fired once per entry when a choice set is displayed, with mutable
    /// access to the just-created entry so listeners can customize it.
    pub choice_presented: SignalMut<ChoicePresented, ChoiceSlot>,
    /// Invoked with the interpreter when a session starts, before the first
    /// advance.
    pub bind_hooks: Hooks,
    /// Invoked with the interpreter during teardown, before it is dropped.
    pub unbind_hooks: Hooks,
}

/// Drives one dialogue session: interpreter advancement, typing, scene
/// appearance, choices, auto-advance, and teardown.
///
/// All state transitions happen on the caller's thread; time-based work
/// advances only inside [`DialogueRunner::tick`].
pub struct DialogueRunner {
    config: DialogueConfig,
    loader: Box<dyn ScriptLoader>,
    resolver: Box<dyn AssetResolver>,
    stage: Stage,
    choices: ChoiceBoard,
    fades: FadeBoard,
    typing: Option<TypingProcess>,
    /// Remaining seconds of the armed auto-advance gate.
    auto_gate: Option<f32>,
    auto: bool,
    interpreter: Option<Box<dyn Interpreter>>,
    phase: DialoguePhase,
    events: DialogueEvents,
    end_once: Option<Box<dyn FnOnce()>>,
}

impl DialogueRunner {
    pub fn new(
        config: DialogueConfig,
        loader: Box<dyn ScriptLoader>,
        resolver: Box<dyn AssetResolver>,
    ) -> Self {
        let stage = Stage {
            auto_label: config.auto_off_label.clone(),
            auto_label_alpha: 1.0,
            ..Stage::default()
        };
        Self {
            config,
            loader,
            resolver,
            stage,
            choices: ChoiceBoard::default(),
            fades: FadeBoard::default(),
            typing: None,
            auto_gate: None,
            auto: false,
            interpreter: None,
            phase: DialoguePhase::Idle,
            events: DialogueEvents::default(),
            end_once: None,
        }
    }

    /// Starts a session from an opaque script payload.
    ///
    /// Any active session is torn down first, synchronously, before the new
    /// setup runs. `on_end` fires exactly once when this session ends.
    pub fn start_dialogue(
        &mut self,
        source: &str,
        on_end: Option<Box<dyn FnOnce()>>,
    ) -> DialogueResult<()> {
        if self.interpreter.is_some() {
            tracing::debug!("restart requested, tearing down active session");
            self.end_dialogue();
        }
        self.interpreter = Some(self.loader.load(source)?);
        self.end_once = on_end;
        if let Some(interpreter) = self.interpreter.as_deref_mut() {
            self.events.bind_hooks.invoke(interpreter);
        }
        self.stage.interactable = true;
        self.fades.start(
            FadeTarget::Panel,
            Tween::new(
                self.stage.panel_alpha,
                1.0,
                self.config.fade_duration,
                Easing::OutQuad,
            ),
        );
        tracing::info!("dialogue session started");
        self.continue_story()?;
        self.events.dialogue_start.emit(&());
        Ok(())
    }

    /// Background-tap action: finish the reveal if typing, otherwise advance
    /// past the fully shown line. No-op while choices are displayed or
    /// without a session.
    pub fn skip_sentence(&mut self) -> DialogueResult<()> {
        if self.interpreter.is_none() {
            return Ok(());
        }
        if self.is_typing() {
            self.finish_typing();
            Ok(())
        } else if self.choices.is_empty() {
            self.continue_story()
        } else {
            Ok(())
        }
    }

    /// Skip-scene action: finish the reveal if typing, otherwise abandon the
    /// remaining script and end the session. No-op without a session.
    pub fn skip_dialogue(&mut self) {
        if self.interpreter.is_none() {
            return;
        }
        if self.is_typing() {
            self.finish_typing();
        } else {
            self.end_dialogue();
        }
    }

    /// Flips auto mode. Turning it on while a fully revealed line sits idle
    /// continues immediately, so the displayed line is not wasted.
    pub fn toggle_auto(&mut self) -> DialogueResult<()> {
        self.auto = !self.auto;
        self.stage.auto_label = if self.auto {
            self.config.auto_on_label.clone()
        } else {
            self.config.auto_off_label.clone()
        };
        self.stage.auto_label_alpha = 0.0;
        self.fades.start(
            FadeTarget::AutoLabel,
            Tween::new(0.0, 1.0, AUTO_LABEL_PULSE, Easing::Linear),
        );
        let auto = self.auto;
        self.events.auto_toggled.emit(&auto);
        if !self.auto {
            self.auto_gate = None;
        }
        let can_continue = self
            .interpreter
            .as_deref()
            .map_or(false, Interpreter::can_continue);
        if self.auto && !self.is_typing() && !self.has_choices() && can_continue {
            self.continue_story()?;
        }
        Ok(())
    }

    /// Activates the choice entry at display position `slot`.
    ///
    /// The whole set is cleared before the interpreter sees the selection;
    /// stale or out-of-range activations are ignored.
    pub fn choose(&mut self, slot: usize) -> DialogueResult<()> {
        if self.phase != DialoguePhase::AwaitingChoice {
            return Ok(());
        }
        let Some(choice_index) = self.choices.take_selection(slot) else {
            return Ok(());
        };
        tracing::debug!(slot, choice_index, "choice selected");
        if let Some(interpreter) = self.interpreter.as_deref_mut() {
            interpreter.choose(choice_index)?;
        }
        self.continue_story()
    }

    /// Advances all time-based work by `dt` seconds.
    ///
    /// `dt` must be the unscaled wall-clock delta: typing, the auto delay,
    /// and fades keep running even while gameplay time is paused.
    pub fn tick(&mut self, dt: f32) -> DialogueResult<()> {
        let stage = &mut self.stage;
        self.fades.tick(dt, |target, value| match target {
            FadeTarget::Panel => stage.panel_alpha = value,
            FadeTarget::AutoLabel => stage.auto_label_alpha = value,
        });
        self.choices.tick(dt);

        // a gate armed by this tick's typing completion must get the full
        // delay, so only a gate armed before this tick is charged below
        let gate_armed_before = self.auto_gate.is_some();
        let outcome = match self.typing.as_mut() {
            Some(typing) => typing.tick(dt),
            None => TypingTick::Idle,
        };
        match outcome {
            TypingTick::Revealed(count) => self.stage.visible_chars = count,
            TypingTick::Completed => {
                self.stage.visible_chars = self.stage.line.chars().count();
                self.on_line_revealed();
            }
            TypingTick::Idle => {}
        }

        if gate_armed_before {
            if let Some(remaining) = self.auto_gate.as_mut() {
                *remaining -= dt;
            }
        }
        if matches!(self.auto_gate, Some(remaining) if remaining <= 0.0) {
            self.auto_gate = None;
            // the user may have toggled auto off or choices may have
            // appeared during the wait
            if self.auto && !self.has_choices() && self.interpreter.is_some() {
                self.continue_story()?;
            }
        }
        Ok(())
    }

    /// Ends the active session: starts the panel fade-out and tears down
    /// synchronously. Idempotent; safe with no session.
    pub fn end_dialogue(&mut self) {
        if self.interpreter.is_none() && self.phase == DialoguePhase::Idle {
            return;
        }
        self.phase = DialoguePhase::Ending;
        self.fades.start(
            FadeTarget::Panel,
            Tween::new(
                self.stage.panel_alpha,
                0.0,
                self.config.fade_duration,
                Easing::InQuad,
            ),
        );
        self.stage.interactable = false;
        self.choices.clear();
        if let Some(typing) = self.typing.as_mut() {
            typing.cancel();
        }
        self.typing = None;
        self.auto_gate = None;
        if let Some(mut interpreter) = self.interpreter.take() {
            self.events.unbind_hooks.invoke(interpreter.as_mut());
        }
        if let Some(on_end) = self.end_once.take() {
            on_end();
        }
        self.events.dialogue_end.emit(&());
        self.phase = DialoguePhase::Idle;
        tracing::info!("dialogue session ended");
    }

    pub fn has_session(&self) -> bool {
        self.interpreter.is_some()
    }

    pub fn is_typing(&self) -> bool {
        self.typing.as_ref().map_or(false, TypingProcess::is_typing)
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn choices(&self) -> &ChoiceBoard {
        &self.choices
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    pub fn events(&mut self) -> &mut DialogueEvents {
        &mut self.events
    }

    /// Sets the font override propagated to the stage and to every choice
    /// entry displayed from now on.
    pub fn set_font(&mut self, font: Option<crate::assets::AssetHandle>) {
        self.stage.font = font;
    }

    fn continue_story(&mut self) -> DialogueResult<()> {
        let Some(interpreter) = self.interpreter.as_deref_mut() else {
            return Ok(());
        };
        self.phase = DialoguePhase::Advancing;
        if interpreter.can_continue() {
            let chunk = interpreter.advance()?;
            let line = chunk.text.trim().to_string();
            self.show_line(line);
            self.apply_appearance(&chunk.tags);
            self.phase = DialoguePhase::Typing;
            Ok(())
        } else if !interpreter.current_choices().is_empty() {
            self.display_choices();
            Ok(())
        } else {
            self.end_dialogue();
            Ok(())
        }
    }

    fn show_line(&mut self, line: String) {
        if let Some(typing) = self.typing.as_mut() {
            typing.cancel();
        }
        self.auto_gate = None;
        self.typing = Some(TypingProcess::new(
            &line,
            self.config.effective_type_interval(),
        ));
        self.stage.visible_chars = 0;
        self.stage.line = line;
    }

    fn apply_appearance(&mut self, tags: &[String]) {
        let appearance =
            SceneAppearance::from_tags(tags, self.resolver.as_ref(), &self.config.asset_root);
        self.stage.speaker = appearance.speaker;
        self.stage.portrait = appearance.portrait;
        self.stage.background = appearance.background;
    }

    /// Shared completion path for natural and immediate typing completion.
    fn on_line_revealed(&mut self) {
        self.typing = None;
        if self.has_choices() {
            self.display_choices();
        } else if self.auto {
            self.auto_gate = Some(self.config.auto_next_delay);
        }
    }

    fn finish_typing(&mut self) {
        let Some(mut typing) = self.typing.take() else {
            return;
        };
        let outcome = typing.complete_immediately();
        self.stage.visible_chars = typing.total();
        if outcome == TypingTick::Completed {
            self.on_line_revealed();
        }
    }

    fn display_choices(&mut self) {
        let prompts = self
            .interpreter
            .as_deref()
            .map(Interpreter::current_choices)
            .unwrap_or_default();
        self.auto_gate = None;
        self.choices
            .display(prompts, self.config.option_pop_delay, self.stage.font.clone());
        let events = &mut self.events;
        for (slot, entry) in self.choices.slots_mut().iter_mut().enumerate() {
            let notice = ChoicePresented {
                slot,
                choice_index: entry.choice_index,
                text: entry.text.clone(),
            };
            events.choice_presented.emit(&notice, entry);
        }
        self.phase = DialoguePhase::AwaitingChoice;
        tracing::debug!(count = self.choices.len(), "choices displayed");
    }

    fn has_choices(&self) -> bool {
        self.interpreter
            .as_deref()
            .map_or(false, |interpreter| !interpreter.current_choices().is_empty())
    }
}
