//! The application state machine.
//!
//! `App` owns the top-level phase (boot / login / authenticated) and, inside
//! the authenticated phase, the two-column browser: a fixed menu column and
//! a list column whose contents depend on the committed menu entry. It does
//! not perform I/O and holds no clock — every mutation is a synchronous
//! reaction to one input event, and every key handler reports the resulting
//! action and sound cue to the caller.
//!
//! Cursor invariant: a cursor is only ever moved modulo its list's current
//! length, so it wraps at both ends and never indexes out of bounds; an
//! empty list makes cursor movement and commits no-ops.

use dossier_core::archive::Archive;
use dossier_core::types::Record;

use crate::menu::{self, MenuEntry};
use crate::sound::SoundKind;


// ---------------------------------------------------------------------------
// Phase / Focus
// ---------------------------------------------------------------------------

/// Top-level application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Boot,
    Login,
    Authenticated,
}

impl Phase {
    /// Short label for the status bar.
    pub fn label(&self) -> &str {
        match self {
            Phase::Boot => "boot",
            Phase::Login => "login",
            Phase::Authenticated => "archive",
        }
    }
}

/// Which column receives keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    MenuColumn,
    ListColumn,
}


// ---------------------------------------------------------------------------
// Keys, actions, outcomes
// ---------------------------------------------------------------------------

/// A simplified key event, decoupled from the terminal backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    F(u8),
    Ctrl(char),
}

/// A side effect the runner must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// The user committed the exit entry; sign out and return to login.
    SignOut,
    /// Flip and persist the sound-enabled preference.
    ToggleSound,
    /// Leave the application.
    Quit,
}

/// What one input event produced: an action for the runner and/or a sound
/// cue for the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub action: Option<AppAction>,
    pub sound: Option<SoundKind>,
}

impl Outcome {
    pub fn none() -> Outcome {
        Outcome {
            action: None,
            sound: None,
        }
    }

    pub fn sound(kind: SoundKind) -> Outcome {
        Outcome {
            action: None,
            sound: Some(kind),
        }
    }

    pub fn action(action: AppAction, sound: SoundKind) -> Outcome {
        Outcome {
            action: Some(action),
            sound: Some(sound),
        }
    }

    pub fn quiet_action(action: AppAction) -> Outcome {
        Outcome {
            action: Some(action),
            sound: None,
        }
    }
}

/// One resolved row of the list column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub key: String,
    pub label: String,
}

impl From<&MenuEntry> for ListEntry {
    fn from(entry: &MenuEntry) -> Self {
        ListEntry {
            key: entry.key.to_string(),
            label: entry.label.to_string(),
        }
    }
}


// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
pub struct App {
    pub phase: Phase,
    pub focus: Focus,
    pub menu_cursor: usize,
    pub list_cursor: usize,
    /// Committed top-level menu key.
    pub selected_menu: Option<String>,
    /// Committed file category, when browsing inside "files".
    pub selected_category: Option<String>,
    /// Committed leaf item key at the current level.
    pub selected_item: Option<String>,
}

impl App {
    /// Create a new App at the start of the boot sequence.
    pub fn new() -> Self {
        App {
            phase: Phase::Boot,
            focus: Focus::MenuColumn,
            menu_cursor: 0,
            list_cursor: 0,
            selected_menu: None,
            selected_category: None,
            selected_item: None,
        }
    }

    // -------------------------------------------------------------------
    // Phase transitions
    // -------------------------------------------------------------------

    /// Boot finished (naturally or skipped): move to the login phase.
    pub fn complete_boot(&mut self) {
        if self.phase == Phase::Boot {
            self.phase = Phase::Login;
        }
    }

    /// A session was established: enter the authenticated phase with a
    /// fresh navigation state.
    pub fn session_established(&mut self) {
        self.phase = Phase::Authenticated;
        self.reset_navigation();
    }

    /// Return to the login phase, dropping all navigation state.
    pub fn sign_out(&mut self) {
        self.phase = Phase::Login;
        self.reset_navigation();
    }

    fn reset_navigation(&mut self) {
        self.focus = Focus::MenuColumn;
        self.menu_cursor = 0;
        self.list_cursor = 0;
        self.selected_menu = None;
        self.selected_category = None;
        self.selected_item = None;
    }

    // -------------------------------------------------------------------
    // Global keys
    // -------------------------------------------------------------------

    /// Keys handled identically in every phase and focus. Checked by the
    /// runner before phase routing.
    pub fn handle_global(key: &Key) -> Option<Outcome> {
        match key {
            Key::F(2) => Some(Outcome::action(AppAction::ToggleSound, SoundKind::Click)),
            Key::Ctrl('q') | Key::Ctrl('c') => Some(Outcome::quiet_action(AppAction::Quit)),
            _ => None,
        }
    }

    // -------------------------------------------------------------------
    // Navigation keys (authenticated phase)
    // -------------------------------------------------------------------

    /// Process a key in the authenticated browser. Inert in other phases.
    pub fn handle_key(&mut self, key: Key, archive: &Archive) -> Outcome {
        if self.phase != Phase::Authenticated {
            return Outcome::none();
        }
        match self.focus {
            Focus::MenuColumn => self.handle_menu_key(key),
            Focus::ListColumn => self.handle_list_key(key, archive),
        }
    }

    fn handle_menu_key(&mut self, key: Key) -> Outcome {
        let len = menu::TOP_MENU.len();
        match key {
            Key::Down => {
                self.menu_cursor = (self.menu_cursor + 1) % len;
                Outcome::sound(SoundKind::Click)
            }
            Key::Up => {
                self.menu_cursor = (self.menu_cursor + len - 1) % len;
                Outcome::sound(SoundKind::Click)
            }
            Key::Enter => self.commit_menu(),
            _ => Outcome::none(),
        }
    }

    fn handle_list_key(&mut self, key: Key, archive: &Archive) -> Outcome {
        match key {
            Key::Escape => {
                if self.selected_menu.as_deref() == Some(menu::MENU_FILES)
                    && self.selected_category.is_some()
                {
                    // Drill up: back to the category level, same focus.
                    self.selected_category = None;
                    self.selected_item = None;
                    self.list_cursor = 0;
                } else {
                    self.focus = Focus::MenuColumn;
                }
                Outcome::sound(SoundKind::Click)
            }
            Key::Down | Key::Up => {
                let len = self.current_list(archive).len();
                if len == 0 {
                    return Outcome::none();
                }
                self.list_cursor = if key == Key::Down {
                    (self.list_cursor + 1) % len
                } else {
                    (self.list_cursor + len - 1) % len
                };
                Outcome::sound(SoundKind::Click)
            }
            Key::Enter => self.commit_list(archive),
            _ => Outcome::none(),
        }
    }

    /// Commit the menu entry under the cursor.
    fn commit_menu(&mut self) -> Outcome {
        let entry = &menu::TOP_MENU[self.menu_cursor % menu::TOP_MENU.len()];
        self.selected_menu = Some(entry.key.to_string());
        if entry.key == menu::MENU_EXIT {
            return Outcome::action(AppAction::SignOut, SoundKind::Confirm);
        }
        self.selected_category = None;
        self.selected_item = None;
        self.list_cursor = 0;
        self.focus = Focus::ListColumn;
        Outcome::sound(SoundKind::Confirm)
    }

    /// Commit the list entry under the cursor at the current level.
    fn commit_list(&mut self, archive: &Archive) -> Outcome {
        let list = self.current_list(archive);
        if list.is_empty() {
            return Outcome::none();
        }
        let entry = &list[self.list_cursor % list.len()];
        if self.selected_menu.as_deref() == Some(menu::MENU_FILES)
            && self.selected_category.is_none()
        {
            // Entering the second level of the files browser.
            self.selected_category = Some(entry.key.clone());
            self.selected_item = None;
            self.list_cursor = 0;
        } else {
            self.selected_item = Some(entry.key.clone());
        }
        Outcome::sound(SoundKind::Confirm)
    }

    // -------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------

    /// Hovering moves the cursor without changing focus or making a sound.
    pub fn hover_menu(&mut self, index: usize) {
        if index < menu::TOP_MENU.len() {
            self.menu_cursor = index;
        }
    }

    /// List-column counterpart of [`App::hover_menu`].
    pub fn hover_list(&mut self, index: usize, archive: &Archive) {
        if index < self.current_list(archive).len() {
            self.list_cursor = index;
        }
    }

    /// Clicking forces focus onto the menu column, then commits the entry.
    pub fn click_menu(&mut self, index: usize) -> Outcome {
        if self.phase != Phase::Authenticated || index >= menu::TOP_MENU.len() {
            return Outcome::none();
        }
        self.focus = Focus::MenuColumn;
        self.menu_cursor = index;
        self.commit_menu()
    }

    /// Clicking forces focus onto the list column, then commits the entry.
    pub fn click_list(&mut self, index: usize, archive: &Archive) -> Outcome {
        if self.phase != Phase::Authenticated || index >= self.current_list(archive).len() {
            return Outcome::none();
        }
        self.focus = Focus::ListColumn;
        self.list_cursor = index;
        self.commit_list(archive)
    }

    // -------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------

    /// Resolve the list column for the current selection.
    pub fn current_list(&self, archive: &Archive) -> Vec<ListEntry> {
        match self.selected_menu.as_deref() {
            Some(menu::MENU_INVESTIGATIONS) => menu::INVESTIGATION_CATEGORIES
                .iter()
                .map(ListEntry::from)
                .collect(),
            Some(menu::MENU_FILES) => match self.selected_category.as_deref() {
                None => menu::FILE_CATEGORIES.iter().map(ListEntry::from).collect(),
                Some(category) => archive
                    .list_by_category(category)
                    .into_iter()
                    .map(|r| ListEntry {
                        key: r.id.clone(),
                        label: r.name.clone(),
                    })
                    .collect(),
            },
            _ => Vec::new(),
        }
    }

    /// Resolve the selected leaf record, if it still exists.
    ///
    /// Recomputed on every call rather than stored, so a record that has
    /// gone away degrades to "nothing selected".
    pub fn selected_detail<'a>(&self, archive: &'a Archive) -> Option<&'a Record> {
        if self.selected_menu.as_deref() != Some(menu::MENU_FILES) {
            return None;
        }
        let category = self.selected_category.as_deref()?;
        let item = self.selected_item.as_deref()?;
        archive.get_by_id(category, item)
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
