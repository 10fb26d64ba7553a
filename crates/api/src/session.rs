use crate::{execute_command, execute_query, ApiError, Command, CommandResult, Query, QueryResult};
use editor::{Editor, EditorSettings};
use layout::{LayoutDocument, LayoutTree, NodeId, NodeTemplate};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;
use theme::{Theme, ThemeManager};

/// One entry of a replay script.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Command(Command),
    Query(Query),
}

/// Parse a script: a JSON array of `{"command": ...}` / `{"query": ...}`.
pub fn parse_script(json: &str) -> Result<Vec<Step>, ApiError> {
    Ok(serde_json::from_str(json)?)
}

/// An editor plus the theme registry it listens to, driven by commands.
///
/// The session keeps its own clock so scripted presses get deterministic
/// timestamps: it only advances through [`Command::Wait`].
pub struct Session {
    editor: Rc<RefCell<Editor>>,
    themes: ThemeManager,
    clock: Duration,
}

impl Session {
    pub fn new(tree: LayoutTree, settings: EditorSettings) -> Self {
        let editor = Rc::new(RefCell::new(Editor::new(tree, settings)));
        let mut themes = ThemeManager::default();
        themes.register(&editor);
        Self {
            editor,
            themes,
            clock: Duration::ZERO,
        }
    }

    pub fn from_document(
        document: &LayoutDocument,
        settings: EditorSettings,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(LayoutTree::from_document(document)?, settings))
    }

    pub fn editor(&self) -> Ref<'_, Editor> {
        self.editor.borrow()
    }

    pub fn editor_mut(&self) -> RefMut<'_, Editor> {
        self.editor.borrow_mut()
    }

    pub fn themes(&self) -> &ThemeManager {
        &self.themes
    }

    /// Switch the active theme. The editor restyles its tree through the
    /// observer registration made in [`Session::new`].
    pub fn set_theme(&mut self, theme: Theme) {
        self.themes.set_theme(theme);
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    pub(crate) fn instantiate(
        &mut self,
        parent: NodeId,
        template: &NodeTemplate,
    ) -> Result<NodeId, ApiError> {
        let id = self
            .editor
            .borrow_mut()
            .instantiate(parent, template, &self.themes)?;
        Ok(id)
    }

    pub fn execute(&mut self, command: Command) -> CommandResult {
        execute_command(self, command)
    }

    pub fn query(&self, query: Query) -> QueryResult {
        execute_query(self, query)
    }

    /// Run every step in order and collect the query results. Failed
    /// commands are logged and do not stop the script.
    pub fn run_script(&mut self, steps: Vec<Step>) -> Vec<QueryResult> {
        let mut results = Vec::new();
        for (index, step) in steps.into_iter().enumerate() {
            match step {
                Step::Command(command) => {
                    if let CommandResult::Error { message } = self.execute(command) {
                        tracing::warn!(step = index, %message, "script command failed");
                    }
                }
                Step::Query(query) => results.push(self.query(query)),
            }
        }
        results
    }
}
