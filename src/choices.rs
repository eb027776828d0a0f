//! Choice presentation lifecycle.

use crate::assets::AssetHandle;
use crate::interp::ChoicePrompt;
use crate::tween::{Easing, Tween};

const POP_DURATION: f32 = 0.25;
const POP_START_SCALE: f32 = 0.95;

/// One displayed choice entry.
#[derive(Clone, Debug)]
pub struct ChoiceSlot {
    /// Interpreter-assigned index forwarded on selection.
    pub choice_index: usize,
    pub text: String,
    pub alpha: f32,
    pub scale: f32,
    /// Font override applied at display time, `None` for the host default.
    pub font: Option<AssetHandle>,
    fade_in: Tween,
    pop: Tween,
}

/// Owns the active choice set between display and selection.
#[derive(Debug, Default)]
pub struct ChoiceBoard {
    slots: Vec<ChoiceSlot>,
}

impl ChoiceBoard {
    /// Replaces any displayed set with `prompts`, staggering each entry's
    /// pop-in by `display position x pop_delay`.
    pub fn display(&mut self, prompts: Vec<ChoicePrompt>, pop_delay: f32, font: Option<AssetHandle>) {
        self.clear();
        for (slot, prompt) in prompts.into_iter().enumerate() {
            let delay = slot as f32 * pop_delay.max(0.0);
            self.slots.push(ChoiceSlot {
                choice_index: prompt.index,
                text: prompt.text,
                alpha: 0.0,
                scale: POP_START_SCALE,
                font: font.clone(),
                fade_in: Tween::new(0.0, 1.0, POP_DURATION, Easing::OutCubic).with_delay(delay),
                pop: Tween::new(POP_START_SCALE, 1.0, POP_DURATION, Easing::OutBack).with_delay(delay),
            });
        }
    }

    /// Destroys every entry. Safe when none are displayed.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Advances the pop-in animations.
    pub fn tick(&mut self, dt: f32) {
        for slot in self.slots.iter_mut() {
            slot.alpha = slot.fade_in.tick(dt);
            slot.scale = slot.pop.tick(dt);
        }
    }

    /// Takes the interpreter index for the entry at display position `slot`
    /// and drops the whole set, so no other entry can be activated afterwards.
    /// Returns `None` for an out-of-range slot, leaving the set intact.
    pub fn take_selection(&mut self, slot: usize) -> Option<usize> {
        let index = self.slots.get(slot)?.choice_index;
        self.slots.clear();
        Some(index)
    }

    pub fn slots(&self) -> &[ChoiceSlot] {
        &self.slots
    }

    /// Mutable view for per-entry customization at presentation time.
    pub fn slots_mut(&mut self) -> &mut [ChoiceSlot] {
        &mut self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompts() -> Vec<ChoicePrompt> {
        vec![
            ChoicePrompt {
                index: 0,
                text: "Yes".to_string(),
            },
            ChoicePrompt {
                index: 2,
                text: "No".to_string(),
            },
        ]
    }

    #[test]
    fn display_replaces_previous_set() {
        let mut board = ChoiceBoard::default();
        board.display(prompts(), 0.05, None);
        board.display(
            vec![ChoicePrompt {
                index: 1,
                text: "Only".to_string(),
            }],
            0.05,
            None,
        );
        assert_eq!(board.len(), 1);
        assert_eq!(board.slots()[0].choice_index, 1);
    }

    #[test]
    fn take_selection_forwards_interpreter_index_and_clears() {
        let mut board = ChoiceBoard::default();
        board.display(prompts(), 0.05, None);
        assert_eq!(board.take_selection(1), Some(2));
        assert!(board.is_empty());
        assert_eq!(board.take_selection(0), None);
    }

    #[test]
    fn pop_in_is_staggered() {
        let mut board = ChoiceBoard::default();
        board.display(prompts(), 0.5, None);
        board.tick(0.25);
        let slots = board.slots();
        assert!(slots[0].alpha > 0.0);
        assert_eq!(slots[1].alpha, 0.0);
        assert_eq!(slots[1].scale, POP_START_SCALE);
    }
}
