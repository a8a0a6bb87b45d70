//! UI state and the actions behind each key.
//!
//! The controller never owns the service; every action borrows it, so the
//! same service value can back the CLI and the UI in one process. Service
//! failures land in `error` and never escape to the terminal loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::Result;
use crate::service::TaskService;
use crate::storage::TaskStorage;
use crate::task::{Task, TaskFilter, UpdateTaskRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Debug, Default)]
pub struct UiController {
    input: String,
    tasks: Vec<Task>,
    selected: Option<usize>,
    error: Option<String>,
}

impl UiController {
    pub fn new<S: TaskStorage>(service: &TaskService<S>) -> Self {
        let mut controller = Self::default();
        controller.refresh(service);
        controller
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Tasks as displayed, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|index| self.tasks.get(index))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Reload the displayed list, keeping the selection on the same task
    /// when it still exists.
    pub fn refresh<S: TaskStorage>(&mut self, service: &TaskService<S>) {
        let previous = self.selected_task().map(|task| task.id.clone());
        self.tasks = service.list(TaskFilter::All);
        self.selected = match previous {
            Some(id) => self
                .tasks
                .iter()
                .position(|task| task.id == id)
                .or_else(|| self.clamped(self.selected)),
            None => self.clamped(Some(0)),
        };
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.error = None;
    }

    /// Create a task from the input line. The input is kept on failure so
    /// it can be corrected.
    pub fn submit<S: TaskStorage>(&mut self, service: &mut TaskService<S>) {
        match service.create(&self.input) {
            Ok(task) => {
                self.input.clear();
                self.error = None;
                self.refresh(service);
                self.selected = self.tasks.iter().position(|t| t.id == task.id);
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn toggle_selected<S: TaskStorage>(&mut self, service: &mut TaskService<S>) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        let request = UpdateTaskRequest::completed(!task.completed);
        let result = service.update(&id, request).map(|_| ());
        self.settle(service, result);
    }

    pub fn delete_selected<S: TaskStorage>(&mut self, service: &mut TaskService<S>) {
        let Some(id) = self.selected_task().map(|task| task.id.clone()) else {
            return;
        };
        let result = service.delete(&id);
        self.settle(service, result);
    }

    pub fn select_next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let last = self.tasks.len() - 1;
        self.selected = Some(self.selected.map_or(0, |index| (index + 1).min(last)));
    }

    pub fn select_previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |index| index.saturating_sub(1)));
    }

    /// Map a key press onto an action.
    ///
    /// Space toggles the selected task only while the input line is empty;
    /// otherwise it is typed.
    pub fn handle_key<S: TaskStorage>(
        &mut self,
        service: &mut TaskService<S>,
        key: KeyEvent,
    ) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return KeyOutcome::Quit,
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('d') if ctrl => self.delete_selected(service),
            KeyCode::Delete => self.delete_selected(service),
            KeyCode::Enter => self.submit(service),
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(' ') if self.input.is_empty() => self.toggle_selected(service),
            KeyCode::Char(ch) if !ctrl => self.push_char(ch),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn settle<S: TaskStorage>(&mut self, service: &TaskService<S>, result: Result<()>) {
        if let Err(err) = result {
            self.fail(err);
        } else {
            self.error = None;
        }
        self.refresh(service);
    }

    fn fail(&mut self, err: crate::error::Error) {
        tracing::debug!(error = %err, "ui action failed");
        self.error = Some(err.to_string());
    }

    fn clamped(&self, index: Option<usize>) -> Option<usize> {
        if self.tasks.is_empty() {
            return None;
        }
        Some(index.unwrap_or(0).min(self.tasks.len() - 1))
    }
}
