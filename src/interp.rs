//! Seam to the opaque branching-narrative interpreter.

use crate::error::DialogueResult;

/// One advancement step: the produced line plus its raw metadata tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineChunk {
    pub text: String,
    pub tags: Vec<String>,
}

/// A selectable choice as the interpreter exposes it.
///
/// `index` is the interpreter-assigned index; it may be non-contiguous when
/// the interpreter filters options upstream, and must be forwarded verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoicePrompt {
    pub index: usize,
    pub text: String,
}

/// Branching-narrative execution engine driven by the dialogue runner.
///
/// The runner owns the instance exclusively for the duration of one session;
/// external code only touches it inside the bind/unbind hook windows.
pub trait Interpreter {
    /// True while more linear content is available.
    fn can_continue(&self) -> bool;

    /// Produces the next line and its tags. Only valid while `can_continue`.
    fn advance(&mut self) -> DialogueResult<LineChunk>;

    /// Choices pending at the current position, empty when none.
    fn current_choices(&self) -> Vec<ChoicePrompt>;

    /// Resolves a pending choice by its interpreter-assigned index.
    fn choose(&mut self, index: usize) -> DialogueResult<()>;
}

/// Builds a fresh interpreter from an opaque script payload.
pub trait ScriptLoader {
    fn load(&self, source: &str) -> DialogueResult<Box<dyn Interpreter>>;
}
