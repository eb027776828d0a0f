//! Data-driven interpreter used by tests, demos, and the Python bindings.
//!
//! This is deliberately not a script language: steps are a serde data model
//! with pre-resolved step-index targets, so the narrative format itself stays
//! outside this crate.

use serde::{Deserialize, Serialize};

use crate::error::{DialogueError, DialogueResult};
use crate::interp::{ChoicePrompt, Interpreter, LineChunk, ScriptLoader};

/// One scripted step. A `target` equal to the step count ends the script.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Line {
        text: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    Menu {
        options: Vec<MenuOption>,
    },
    Jump {
        target: usize,
    },
}

/// Option in a menu step. `target` is a step index.
///
/// Disabled options stay in the list so the visible options keep their
/// original interpreter indices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MenuOption {
    pub text: String,
    pub target: usize,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Interpreter over a validated step list.
#[derive(Clone, Debug)]
pub struct ScriptedInterpreter {
    steps: Vec<Step>,
    position: usize,
}

impl ScriptedInterpreter {
    /// Validates targets and builds an interpreter at step zero.
    pub fn new(steps: Vec<Step>) -> DialogueResult<Self> {
        for step in &steps {
            match step {
                Step::Menu { options } => {
                    for option in options {
                        validate_target(option.target, steps.len())?;
                    }
                }
                Step::Jump { target } => validate_target(*target, steps.len())?,
                Step::Line { .. } => {}
            }
        }
        let mut interpreter = Self { steps, position: 0 };
        interpreter.settle();
        Ok(interpreter)
    }

    /// Parses a JSON step list.
    pub fn from_json(input: &str) -> DialogueResult<Self> {
        let steps: Vec<Step> = serde_json::from_str(input).map_err(|err| {
            let (offset, length) = json_error_span(input, &err);
            DialogueError::Serialization {
                message: err.to_string(),
                src: input.to_string(),
                span: (offset, length).into(),
            }
        })?;
        Self::new(steps)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Follows jump steps until a line, a menu, or the end. Bounded so a
    /// jump cycle degrades to end-of-script instead of spinning.
    fn settle(&mut self) {
        let mut hops = 0;
        while let Some(Step::Jump { target }) = self.steps.get(self.position) {
            self.position = *target;
            hops += 1;
            if hops > self.steps.len() {
                self.position = self.steps.len();
                break;
            }
        }
    }
}

impl Interpreter for ScriptedInterpreter {
    fn can_continue(&self) -> bool {
        matches!(self.steps.get(self.position), Some(Step::Line { .. }))
    }

    fn advance(&mut self) -> DialogueResult<LineChunk> {
        match self.steps.get(self.position) {
            Some(Step::Line { text, tags }) => {
                let chunk = LineChunk {
                    text: text.clone(),
                    tags: tags.clone(),
                };
                self.position += 1;
                self.settle();
                Ok(chunk)
            }
            _ => Err(DialogueError::Interpreter(
                "no line at current position".to_string(),
            )),
        }
    }

    fn current_choices(&self) -> Vec<ChoicePrompt> {
        match self.steps.get(self.position) {
            Some(Step::Menu { options }) => options
                .iter()
                .enumerate()
                .filter(|(_, option)| option.enabled)
                .map(|(index, option)| ChoicePrompt {
                    index,
                    text: option.text.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn choose(&mut self, index: usize) -> DialogueResult<()> {
        let Some(Step::Menu { options }) = self.steps.get(self.position) else {
            return Err(DialogueError::InvalidChoice);
        };
        let option = options
            .get(index)
            .filter(|option| option.enabled)
            .ok_or(DialogueError::InvalidChoice)?;
        self.position = option.target;
        self.settle();
        Ok(())
    }
}

/// Loader that parses a JSON step list into a `ScriptedInterpreter`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedLoader;

impl ScriptLoader for ScriptedLoader {
    fn load(&self, source: &str) -> DialogueResult<Box<dyn Interpreter>> {
        Ok(Box::new(ScriptedInterpreter::from_json(source)?))
    }
}

fn validate_target(target: usize, step_count: usize) -> DialogueResult<()> {
    if target > step_count {
        return Err(DialogueError::InvalidScript(format!(
            "target '{target}' outside script"
        )));
    }
    Ok(())
}

fn json_error_span(input: &str, error: &serde_json::Error) -> (usize, usize) {
    let line = error.line();
    let column = error.column();
    if line == 0 || column == 0 {
        return (0, 1);
    }
    let mut current_line = 1usize;
    let mut offset = 0usize;
    for chunk in input.split_inclusive('\n') {
        if current_line == line {
            let column_index = column.saturating_sub(1);
            let byte_index = chunk
                .char_indices()
                .nth(column_index)
                .map(|(idx, _)| idx)
                .unwrap_or(chunk.len().saturating_sub(1));
            offset += byte_index;
            return (offset, 1);
        }
        offset += chunk.len();
        current_line += 1;
    }
    (input.len().saturating_sub(1), 1)
}
