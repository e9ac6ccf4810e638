//! Deterministic stand-ins for the core ports, shared by unit tests.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Mutex;

use promptchain_types::builder::{BuilderChoice, ChainBuilderState};
use promptchain_types::error::{BuilderError, TemplateError};

use crate::builder::session::ChoicePresenter;
use crate::template::TemplateStore;

/// Template store backed by a sorted map.
pub struct InMemoryTemplateStore {
    templates: BTreeMap<String, String>,
    unreadable: HashSet<String>,
    fail_listing: bool,
    /// Every id passed to `load_template`, in call order.
    pub loads: Mutex<Vec<String>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
            unreadable: HashSet::new(),
            fail_listing: false,
            loads: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, id: &str, content: &str) -> Self {
        self.templates.insert(id.to_string(), content.to_string());
        self
    }

    /// Listed, but loading fails with `ReadFailure`.
    pub fn with_unreadable(mut self, id: &str) -> Self {
        self.templates.insert(id.to_string(), String::new());
        self.unreadable.insert(id.to_string());
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn load_log(&self) -> Vec<String> {
        self.loads.lock().unwrap().clone()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    async fn list_templates(&self) -> Result<Vec<String>, TemplateError> {
        if self.fail_listing {
            return Err(TemplateError::ReadFailure {
                id: "<templates>".to_string(),
                reason: "listing disabled".to_string(),
            });
        }
        Ok(self.templates.keys().cloned().collect())
    }

    async fn load_template(&self, id: &str) -> Result<String, TemplateError> {
        self.loads.lock().unwrap().push(id.to_string());
        if self.unreadable.contains(id) {
            return Err(TemplateError::ReadFailure {
                id: id.to_string(),
                reason: "simulated I/O fault".to_string(),
            });
        }
        self.templates
            .get(id)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }
}

/// Presenter that replays a fixed script of answers.
///
/// Records every offer it receives. Running out of script is a presenter
/// error.
pub struct ScriptedPresenter {
    script: VecDeque<BuilderChoice>,
    pub offers: Vec<Vec<BuilderChoice>>,
}

impl ScriptedPresenter {
    pub fn new(script: Vec<BuilderChoice>) -> Self {
        Self {
            script: script.into(),
            offers: Vec::new(),
        }
    }
}

impl ChoicePresenter for ScriptedPresenter {
    async fn present(
        &mut self,
        _state: &ChainBuilderState,
        choices: &[BuilderChoice],
    ) -> Result<BuilderChoice, BuilderError> {
        self.offers.push(choices.to_vec());
        self.script
            .pop_front()
            .ok_or_else(|| BuilderError::Presenter("script exhausted".to_string()))
    }
}
