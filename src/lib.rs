mod appear;
mod assets;
mod choices;
mod config;
mod error;
mod interp;
mod presenter;
mod runner;
mod scripted;
mod signal;
mod stage;
mod tween;
mod typing;

pub use appear::SceneAppearance;
pub use assets::{AssetHandle, AssetResolver, MapResolver, PassthroughResolver};
pub use choices::{ChoiceBoard, ChoiceSlot};
pub use config::{ConfigError, DialogueConfig};
pub use error::{DialogueError, DialogueResult};
pub use interp::{ChoicePrompt, Interpreter, LineChunk, ScriptLoader};
pub use presenter::DialoguePresenter;
pub use runner::{ChoicePresented, DialogueEvents, DialoguePhase, DialogueRunner};
pub use scripted::{MenuOption, ScriptedInterpreter, ScriptedLoader, Step};
pub use signal::{Hooks, Signal, SignalMut, SlotId};
pub use stage::Stage;
pub use tween::{Easing, FadeBoard, FadeTarget, Tween};
pub use typing::{TypingProcess, TypingTick, MIN_TYPE_INTERVAL};

#[cfg(any(feature = "python", feature = "python-embed"))]
use pyo3::prelude::*;

#[cfg(any(feature = "python", feature = "python-embed"))]
fn dialogue_error_to_py(err: DialogueError) -> pyo3::PyErr {
    let report = miette::Report::new(err);
    pyo3::exceptions::PyValueError::new_err(report.to_string())
}

#[cfg(any(feature = "python", feature = "python-embed"))]
#[pymodule]
fn vn_dialogue(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDialogueRunner>()?;
    Ok(())
}

#[cfg(any(feature = "python", feature = "python-embed"))]
#[pyclass]
pub struct PyDialogueRunner {
    inner: DialogueRunner,
}

#[cfg(any(feature = "python", feature = "python-embed"))]
#[pymethods]
impl PyDialogueRunner {
    #[new]
    pub fn new() -> Self {
        Self {
            inner: DialogueRunner::new(
                DialogueConfig::default(),
                Box::new(ScriptedLoader),
                Box::new(PassthroughResolver),
            ),
        }
    }

    fn start(&mut self, script_json: &str) -> PyResult<()> {
        self.inner
            .start_dialogue(script_json, None)
            .map_err(dialogue_error_to_py)
    }

    fn tick(&mut self, dt: f32) -> PyResult<()> {
        self.inner.tick(dt).map_err(dialogue_error_to_py)
    }

    fn tap_advance(&mut self) -> PyResult<()> {
        self.inner.skip_sentence().map_err(dialogue_error_to_py)
    }

    fn tap_skip_all(&mut self) {
        self.inner.skip_dialogue();
    }

    fn tap_toggle_auto(&mut self) -> PyResult<()> {
        self.inner.toggle_auto().map_err(dialogue_error_to_py)
    }

    fn tap_choice(&mut self, slot: usize) -> PyResult<()> {
        self.inner.choose(slot).map_err(dialogue_error_to_py)
    }

    fn has_dialogue(&self) -> bool {
        self.inner.has_session()
    }

    fn stage(&self, py: Python<'_>) -> PyResult<PyObject> {
        use pyo3::types::{PyDict, PyDictMethods};
        let stage = self.inner.stage();
        let dict = PyDict::new_bound(py);
        dict.set_item("panel_alpha", stage.panel_alpha)?;
        dict.set_item("interactable", stage.interactable)?;
        dict.set_item("speaker", stage.speaker.as_str())?;
        dict.set_item("line", stage.line.as_str())?;
        dict.set_item("visible_text", stage.visible_text())?;
        dict.set_item("portrait", stage.portrait.as_ref().map(AssetHandle::key))?;
        dict.set_item("background", stage.background.as_ref().map(AssetHandle::key))?;
        dict.set_item("auto_label", stage.auto_label.as_str())?;
        Ok(dict.into())
    }

    fn choices(&self, py: Python<'_>) -> PyResult<PyObject> {
        use pyo3::types::{PyDict, PyDictMethods, PyList, PyListMethods};
        let list = PyList::empty_bound(py);
        for slot in self.inner.choices().slots() {
            let entry = PyDict::new_bound(py);
            entry.set_item("choice_index", slot.choice_index)?;
            entry.set_item("text", slot.text.as_str())?;
            entry.set_item("alpha", slot.alpha)?;
            entry.set_item("scale", slot.scale)?;
            list.append(entry)?;
        }
        Ok(list.into())
    }
}
