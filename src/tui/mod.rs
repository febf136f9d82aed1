// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal front-end.
//!
//! [`Shell`] owns the [`App`] plus presentation-only state (focus, list cursors, overlays).
//! Every change to the session or catalog goes through [`App::apply`]; the shell re-projects
//! its [`View`] afterwards and never mutates domain state directly.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::App;
use crate::model::{CategoryShape, CompositionMode, Delimiter, ModifierLevel, QueryMode};
use crate::navigation::{Activation, ManageTarget, NavOption, OptionNode};
use crate::ops::{
    ApplyResult, BlockOp, CatalogOp, ModifierOp, NavOp, Op, OpOutcome, OutputOp, SelectOp,
};
use crate::suggest::{SuggestionDebouncer, SuggestionState};
use crate::ui::View;

mod hints;
mod input;

use hints::{jump_labels, match_label, HintMatch, HINT_CHARS};
use input::{InputEvent, LineInput};

const FOCUS_COLOR: Color = Color::LightGreen;
const SELECTED_COLOR: Color = Color::LightYellow;
const LOCKED_COLOR: Color = Color::LightRed;
const HINT_COLOR: Color = Color::Magenta;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_TTL: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the terminal UI until the user quits.
///
/// `suggestions` enables the popup under the search line; without it the search only filters.
pub fn run(app: App, suggestions: Option<SuggestionDebouncer>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut shell = Shell::new(app, suggestions);

    while !shell.should_quit {
        terminal.draw(|frame| draw(frame, &mut shell))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => shell.handle_key(key),
                _ => {}
            }
        }

        if let Some(text) = shell.take_clipboard() {
            if let Err(err) = copy_to_clipboard(&text) {
                shell.set_toast(format!("Clipboard failed: {err}"));
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManagerColumn {
    Left,
    Right,
}

impl ManagerColumn {
    fn toggle(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn level(self) -> ModifierLevel {
        match self {
            Self::Left => ModifierLevel::First,
            Self::Right => ModifierLevel::Second,
        }
    }
}

/// Two-column editor: subcategories and their variations, or the two modifier levels.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Manager {
    target: ManageTarget,
    column: ManagerColumn,
    left: usize,
    right: usize,
    adding: Option<LineInput>,
}

impl Manager {
    fn new(target: ManageTarget) -> Self {
        Self { target, column: ManagerColumn::Left, left: 0, right: 0, adding: None }
    }

    fn add_op(&self, value: String) -> Op {
        match (&self.target, self.column) {
            (ManageTarget::Catalog(category_id), ManagerColumn::Left) => {
                Op::Catalog(CatalogOp::AddSubcategory { category_id: category_id.clone(), name: value })
            }
            (ManageTarget::Catalog(category_id), ManagerColumn::Right) => {
                Op::Catalog(CatalogOp::AddVariation {
                    category_id: category_id.clone(),
                    sub_index: self.left,
                    label: value,
                })
            }
            (ManageTarget::SceneModifiers, column) => {
                Op::Modifier(ModifierOp::Add { level: column.level(), value })
            }
        }
    }

    fn remove_op(&self, left_len: usize, right_len: usize) -> Option<Op> {
        let op = match (&self.target, self.column) {
            (ManageTarget::Catalog(category_id), ManagerColumn::Left) if self.left < left_len => {
                Op::Catalog(CatalogOp::RemoveSubcategory {
                    category_id: category_id.clone(),
                    index: self.left,
                })
            }
            (ManageTarget::Catalog(category_id), ManagerColumn::Right) if self.right < right_len => {
                Op::Catalog(CatalogOp::RemoveVariation {
                    category_id: category_id.clone(),
                    sub_index: self.left,
                    var_index: self.right,
                })
            }
            (ManageTarget::SceneModifiers, ManagerColumn::Left) if self.left < left_len => {
                Op::Modifier(ModifierOp::Remove { level: ModifierLevel::First, index: self.left })
            }
            (ManageTarget::SceneModifiers, ManagerColumn::Right) if self.right < right_len => {
                Op::Modifier(ModifierOp::Remove { level: ModifierLevel::Second, index: self.right })
            }
            _ => return None,
        };
        Some(op)
    }

    fn reset_op(&self) -> Op {
        match &self.target {
            ManageTarget::Catalog(category_id) => {
                Op::Catalog(CatalogOp::Reset { category_id: category_id.clone() })
            }
            ManageTarget::SceneModifiers => Op::Modifier(ModifierOp::Reset),
        }
    }
}

#[derive(Debug, Default)]
enum Mode {
    #[default]
    Normal,
    Help,
    Query(LineInput),
    Output(LineInput),
    Block {
        index: usize,
        input: LineInput,
    },
    Delimiter(LineInput),
    Hint {
        labels: Vec<String>,
        typed: String,
    },
    Manager(Manager),
}

#[derive(Debug)]
struct Toast {
    message: String,
    expires_at: Instant,
}

pub(crate) struct Shell {
    app: App,
    view: View,
    focus: Focus,
    mode: Mode,
    options: ListState,
    selection: ListState,
    blocks: ListState,
    suggestions: Option<SuggestionDebouncer>,
    suggestion_cursor: usize,
    toast: Option<Toast>,
    clipboard: Option<String>,
    should_quit: bool,
}

impl Shell {
    pub(crate) fn new(mut app: App, suggestions: Option<SuggestionDebouncer>) -> Self {
        let view = app.view();
        let startup_notice = app.take_notice();
        let mut shell = Self {
            app,
            view,
            focus: Focus::Options,
            mode: Mode::Normal,
            options: ListState::default(),
            selection: ListState::default(),
            blocks: ListState::default(),
            suggestions,
            suggestion_cursor: 0,
            toast: None,
            clipboard: None,
            should_quit: false,
        };
        if let Some(notice) = startup_notice {
            shell.set_toast(notice);
        }
        shell.clamp_cursors();
        shell
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }

    fn take_clipboard(&mut self) -> Option<String> {
        self.clipboard.take()
    }

    fn apply(&mut self, ops: Vec<Op>) -> Option<ApplyResult> {
        let result = self.app.apply(&ops).ok();
        self.refresh();
        result
    }

    fn refresh(&mut self) {
        self.view = self.app.view();
        if let Some(notice) = self.app.take_notice() {
            self.set_toast(notice);
        }
        self.clamp_cursors();
    }

    fn option_len(&self) -> usize {
        self.view.options.as_ref().map_or(0, |list| list.options.len())
    }

    fn clamp_cursors(&mut self) {
        let option_len = self.option_len();
        clamp_list(&mut self.options, option_len);
        clamp_list(&mut self.selection, self.view.selection.len());
        clamp_list(&mut self.blocks, self.view.blocks.len());
    }

    fn suggestion_state(&self) -> SuggestionState {
        self.suggestions.as_ref().map(SuggestionDebouncer::state).unwrap_or_default()
    }

    fn request_suggestions(&mut self, keyword: &str) {
        self.suggestion_cursor = 0;
        if let Some(debouncer) = &self.suggestions {
            debouncer.request(keyword);
        }
    }

    fn hide_suggestions(&mut self) {
        self.suggestion_cursor = 0;
        if let Some(debouncer) = &self.suggestions {
            debouncer.hide();
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        self.handle_key_code(key.code);
    }

    fn handle_key_code(&mut self, code: KeyCode) {
        let mode = std::mem::take(&mut self.mode);
        self.mode = match mode {
            Mode::Normal => self.normal_key(code),
            Mode::Help => match code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Mode::Normal,
                _ => Mode::Help,
            },
            Mode::Query(input) => self.query_key(input, code),
            Mode::Output(input) => self.output_key(input, code),
            Mode::Block { index, input } => self.block_key(index, input, code),
            Mode::Delimiter(input) => self.delimiter_key(input, code),
            Mode::Hint { labels, typed } => self.hint_key(labels, typed, code),
            Mode::Manager(manager) => self.manager_key(manager, code),
        };
    }

    fn normal_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => return Mode::Help,
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(),
            KeyCode::Char('1') => self.focus = Focus::Options,
            KeyCode::Char('2') => self.focus = Focus::Selection,
            KeyCode::Char('3') => self.focus = Focus::Blocks,
            KeyCode::Left | KeyCode::Char('[') | KeyCode::Char('h') => self.switch_category(-1),
            KeyCode::Right | KeyCode::Char(']') | KeyCode::Char('l') => self.switch_category(1),
            KeyCode::Down | KeyCode::Char('j') => self.move_focused(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_focused(-1),
            KeyCode::Enter => return self.activate_focused(),
            KeyCode::Backspace => {
                self.apply(vec![Op::Nav(NavOp::Up)]);
            }
            KeyCode::Esc => {
                let op = if self.view.query.is_empty() {
                    NavOp::Up
                } else {
                    NavOp::SetQuery { query: String::new() }
                };
                self.apply(vec![Op::Nav(op)]);
            }
            KeyCode::Char('/') => return self.begin_query(),
            KeyCode::Char('r') => self.toggle_query_mode(),
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('g') => return self.begin_hints(),
            KeyCode::Char('e') => {
                self.apply(vec![Op::Output(OutputOp::Focus)]);
                return Mode::Output(LineInput::new(self.view.output.clone()));
            }
            KeyCode::Char('y') => self.copy_output(),
            KeyCode::Char('c') => {
                self.apply(vec![Op::Select(SelectOp::Clear)]);
            }
            KeyCode::Char('x') | KeyCode::Delete => self.remove_focused(),
            KeyCode::Char('d') => {
                return Mode::Delimiter(LineInput::new(self.view.delimiter.text()));
            }
            KeyCode::Char('n') => {
                let delimiter =
                    Delimiter::new(self.view.delimiter.text(), !self.view.delimiter.newlines());
                self.apply(vec![Op::Output(OutputOp::SetDelimiter { delimiter })]);
            }
            KeyCode::Char('m') => {
                let mode = match self.view.composition_mode {
                    CompositionMode::Blocks => CompositionMode::Selection,
                    CompositionMode::Selection => CompositionMode::Blocks,
                };
                self.apply(vec![Op::Output(OutputOp::SetMode { mode })]);
            }
            KeyCode::Char(' ') if self.focus == Focus::Blocks => {
                if let Some(index) = self.blocks.selected() {
                    self.apply(vec![Op::Block(BlockOp::ToggleLock { index })]);
                }
            }
            KeyCode::Char('R') => {
                self.apply(vec![Op::Block(BlockOp::RandomizeUnlocked)]);
            }
            KeyCode::Char('M') => return self.open_manager_for_active(),
            _ => {}
        }
        Mode::Normal
    }

    fn switch_category(&mut self, step: isize) {
        let tabs = &self.view.categories;
        if tabs.is_empty() {
            return;
        }
        let current = tabs.iter().position(|tab| tab.active).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(tabs.len() as isize) as usize;
        let category_id = tabs[next].category_id.clone();
        self.apply(vec![Op::Nav(NavOp::SwitchCategory { category_id })]);
        self.options.select(Some(0));
        self.clamp_cursors();
    }

    fn move_focused(&mut self, step: isize) {
        match self.focus {
            Focus::Options => {
                let len = self.option_len();
                move_list(&mut self.options, len, step);
            }
            Focus::Selection => move_list(&mut self.selection, self.view.selection.len(), step),
            Focus::Blocks => move_list(&mut self.blocks, self.view.blocks.len(), step),
        }
    }

    fn activate_focused(&mut self) -> Mode {
        match self.focus {
            Focus::Options => match self.options.selected() {
                Some(index) => self.activate_option(index),
                None => Mode::Normal,
            },
            Focus::Selection => {
                self.remove_focused();
                Mode::Normal
            }
            Focus::Blocks => match self.blocks.selected() {
                Some(index) => {
                    let value = self.view.blocks.get(index).map(|b| b.value.clone()).unwrap_or_default();
                    Mode::Block { index, input: LineInput::new(value) }
                }
                None => Mode::Normal,
            },
        }
    }

    fn activate_option(&mut self, index: usize) -> Mode {
        let Some(list) = &self.view.options else {
            return Mode::Normal;
        };
        let Some(node) = list.options.get(index).map(|option| option.node.clone()) else {
            return Mode::Normal;
        };
        let depth_before = list.depth;

        let Some(result) = self.apply(vec![Op::Nav(NavOp::Activate { node })]) else {
            return Mode::Normal;
        };
        if let Some(OpOutcome::Activated(Activation::OpenManager(target))) = result.outcomes.first() {
            return Mode::Manager(Manager::new(target.clone()));
        }
        if self.view.options.as_ref().map(|list| list.depth) != Some(depth_before) {
            self.options.select(Some(0));
            self.clamp_cursors();
        }
        Mode::Normal
    }

    fn remove_focused(&mut self) {
        match self.focus {
            Focus::Options => {}
            Focus::Selection => {
                let Some(item) = self.selection.selected().and_then(|i| self.view.selection.get(i))
                else {
                    return;
                };
                let variation_id = item.variation_id().clone();
                self.apply(vec![Op::Select(SelectOp::Remove { variation_id })]);
            }
            Focus::Blocks => {
                if let Some(index) = self.blocks.selected() {
                    self.apply(vec![Op::Block(BlockOp::SetValue { index, text: String::new() })]);
                }
            }
        }
    }

    fn toggle_query_mode(&mut self) {
        let mode = match self.view.query_mode {
            QueryMode::Substring => QueryMode::Regex,
            QueryMode::Regex => QueryMode::Substring,
        };
        self.apply(vec![Op::Nav(NavOp::SetQueryMode { mode })]);
    }

    /// All, then each chip in order, then back to all.
    fn cycle_filter(&mut self) {
        let chips = &self.view.filters;
        if chips.is_empty() {
            return;
        }
        let filter = match chips.iter().position(|chip| chip.active) {
            None => Some(chips[0].subcategory_id.clone()),
            Some(index) => chips.get(index + 1).map(|chip| chip.subcategory_id.clone()),
        };
        self.apply(vec![Op::Nav(NavOp::SetSubcategoryFilter { filter })]);
        self.options.select(Some(0));
        self.clamp_cursors();
    }

    fn copy_output(&mut self) {
        let copied = self.app.copy_output();
        if let Some(notice) = self.app.take_notice() {
            self.set_toast(notice);
        }
        self.clipboard = copied;
    }

    fn begin_query(&mut self) -> Mode {
        let query = self.view.query.clone();
        if !query.trim().is_empty() {
            self.request_suggestions(&query);
        }
        Mode::Query(LineInput::new(query))
    }

    fn query_key(&mut self, mut input: LineInput, code: KeyCode) -> Mode {
        let offered = self.suggestion_state().suggestions().len();
        match code {
            KeyCode::Down if offered > 0 => {
                self.suggestion_cursor = (self.suggestion_cursor + 1).min(offered - 1);
                return Mode::Query(input);
            }
            KeyCode::Up if offered > 0 => {
                self.suggestion_cursor = self.suggestion_cursor.saturating_sub(1);
                return Mode::Query(input);
            }
            _ => {}
        }

        match input.handle(code) {
            InputEvent::Changed => {
                let query = input.text().to_owned();
                self.apply(vec![Op::Nav(NavOp::SetQuery { query: query.clone() })]);
                self.options.select(Some(0));
                self.clamp_cursors();
                self.request_suggestions(&query);
                Mode::Query(input)
            }
            InputEvent::Submit => {
                let picked =
                    self.suggestion_state().suggestions().get(self.suggestion_cursor).cloned();
                if let Some(text) = picked {
                    self.apply(vec![Op::Output(OutputOp::ApplySuggestion { text })]);
                }
                self.hide_suggestions();
                Mode::Normal
            }
            InputEvent::Cancel => {
                self.hide_suggestions();
                Mode::Normal
            }
            InputEvent::Ignored => Mode::Query(input),
        }
    }

    fn output_key(&mut self, mut input: LineInput, code: KeyCode) -> Mode {
        match input.handle(code) {
            InputEvent::Changed => {
                let text = input.text().to_owned();
                self.apply(vec![Op::Output(OutputOp::Edit { text })]);
                Mode::Output(input)
            }
            InputEvent::Submit | InputEvent::Cancel => {
                self.apply(vec![Op::Output(OutputOp::Blur)]);
                Mode::Normal
            }
            InputEvent::Ignored => Mode::Output(input),
        }
    }

    fn block_key(&mut self, index: usize, mut input: LineInput, code: KeyCode) -> Mode {
        match input.handle(code) {
            InputEvent::Submit => {
                let text = input.text().to_owned();
                self.apply(vec![Op::Block(BlockOp::SetValue { index, text })]);
                Mode::Normal
            }
            InputEvent::Cancel => Mode::Normal,
            InputEvent::Changed | InputEvent::Ignored => Mode::Block { index, input },
        }
    }

    fn delimiter_key(&mut self, mut input: LineInput, code: KeyCode) -> Mode {
        match input.handle(code) {
            InputEvent::Submit => {
                let delimiter = Delimiter::new(input.text(), self.view.delimiter.newlines());
                self.apply(vec![Op::Output(OutputOp::SetDelimiter { delimiter })]);
                Mode::Normal
            }
            InputEvent::Cancel => Mode::Normal,
            InputEvent::Changed | InputEvent::Ignored => Mode::Delimiter(input),
        }
    }

    fn begin_hints(&mut self) -> Mode {
        let labels = jump_labels(self.option_len(), HINT_CHARS);
        if labels.is_empty() {
            return Mode::Normal;
        }
        self.focus = Focus::Options;
        Mode::Hint { labels, typed: String::new() }
    }

    fn hint_key(&mut self, labels: Vec<String>, mut typed: String, code: KeyCode) -> Mode {
        let KeyCode::Char(ch) = code else {
            return Mode::Normal;
        };
        typed.push(ch.to_ascii_lowercase());
        match match_label(&labels, &typed) {
            HintMatch::Exact(index) => {
                self.options.select(Some(index));
                self.activate_option(index)
            }
            HintMatch::Prefix => Mode::Hint { labels, typed },
            HintMatch::None => {
                self.set_toast(format!("No option labelled {typed:?}"));
                Mode::Normal
            }
        }
    }

    fn open_manager_for_active(&mut self) -> Mode {
        let Some(tab) = self.view.active_category() else {
            return Mode::Normal;
        };
        let Ok(category) = self.app.catalog().get_category(&tab.category_id) else {
            return Mode::Normal;
        };
        let target = match category.shape() {
            CategoryShape::SceneDynamic { .. } => ManageTarget::SceneModifiers,
            CategoryShape::Static | CategoryShape::GenericDynamic => {
                ManageTarget::Catalog(category.category_id().clone())
            }
        };
        Mode::Manager(Manager::new(target))
    }

    /// Labels shown in the two manager columns.
    fn manager_columns(&self, manager: &Manager) -> (Vec<String>, Vec<String>) {
        match &manager.target {
            ManageTarget::Catalog(category_id) => {
                let Ok(category) = self.app.catalog().get_category(category_id) else {
                    return (Vec::new(), Vec::new());
                };
                let left = category.subcategories().iter().map(|s| s.name().to_owned()).collect();
                let right = category
                    .subcategories()
                    .get(manager.left)
                    .map(|s| s.variations().iter().map(|v| v.label().to_owned()).collect())
                    .unwrap_or_default();
                (left, right)
            }
            ManageTarget::SceneModifiers => {
                let modifiers = self.app.catalog().scene_modifiers();
                (modifiers.first().to_vec(), modifiers.second().to_vec())
            }
        }
    }

    fn clamp_manager(&self, manager: &mut Manager) {
        let (left, _) = self.manager_columns(manager);
        manager.left = manager.left.min(left.len().saturating_sub(1));
        let (_, right) = self.manager_columns(manager);
        manager.right = manager.right.min(right.len().saturating_sub(1));
    }

    fn manager_key(&mut self, mut manager: Manager, code: KeyCode) -> Mode {
        if let Some(mut input) = manager.adding.take() {
            match input.handle(code) {
                InputEvent::Submit => {
                    let op = manager.add_op(input.text().to_owned());
                    self.apply(vec![op]);
                }
                InputEvent::Cancel => {}
                InputEvent::Changed | InputEvent::Ignored => manager.adding = Some(input),
            }
            self.clamp_manager(&mut manager);
            return Mode::Manager(manager);
        }

        let (left, right) = self.manager_columns(&manager);
        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('M') => return Mode::Normal,
            KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                manager.column = manager.column.toggle();
            }
            KeyCode::Down | KeyCode::Char('j') => match manager.column {
                ManagerColumn::Left => {
                    manager.left = (manager.left + 1).min(left.len().saturating_sub(1));
                    manager.right = 0;
                }
                ManagerColumn::Right => {
                    manager.right = (manager.right + 1).min(right.len().saturating_sub(1));
                }
            },
            KeyCode::Up | KeyCode::Char('k') => match manager.column {
                ManagerColumn::Left => {
                    manager.left = manager.left.saturating_sub(1);
                    manager.right = 0;
                }
                ManagerColumn::Right => manager.right = manager.right.saturating_sub(1),
            },
            KeyCode::Char('a') => manager.adding = Some(LineInput::default()),
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(op) = manager.remove_op(left.len(), right.len()) {
                    self.apply(vec![op]);
                }
            }
            KeyCode::Char('R') => {
                let op = manager.reset_op();
                self.apply(vec![op]);
            }
            _ => {}
        }
        self.clamp_manager(&mut manager);
        Mode::Manager(manager)
    }
}

fn clamp_list(state: &mut ListState, len: usize) {
    let selected = match len {
        0 => None,
        _ => Some(state.selected().unwrap_or(0).min(len - 1)),
    };
    state.select(selected);
}

fn move_list(state: &mut ListState, len: usize, step: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + step).clamp(0, len as isize - 1);
    state.select(Some(next as usize));
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text)))
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
