//! TUI runner — ratatui event loop with terminal setup and cleanup.
//!
//! The [`Tui`] struct owns the ratatui terminal, the state machine
//! ([`App`]), the boot sequence, the login form, the archive, and the
//! injected auth service. It runs the main loop: draw the current phase,
//! poll for input, route keys and pointer events into the state machine,
//! drain auth events, and carry out the actions the machine reports.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use dossier_core::archive::Archive;
use dossier_core::auth::{AuthEvent, AuthService, SubscriptionId};
use dossier_core::prefs::{self, Preferences};
use dossier_core::types::Session;

use crate::app::{App, AppAction, Key, Outcome, Phase};
use crate::boot::BootSequence;
use crate::login::LoginForm;
use crate::sound::{SoundKind, SoundSink, TerminalBell};
use crate::theme::Theme;
use crate::views::{self, BootView, BrowserView, LoginView};


/// Startup options for the runner.
pub struct TuiOptions {
    /// Directory holding the preferences file.
    pub config_dir: PathBuf,
    /// Force sounds off regardless of the stored preference.
    pub no_sound: bool,
    /// Jump straight to the login screen.
    pub skip_boot: bool,
}

/// Snapshot of all state needed for rendering a single frame.
///
/// Extracted from `Tui` so that `terminal.draw()` can borrow its closure
/// argument without conflicting with the `&mut self` borrow on the
/// terminal.
struct RenderState<'a> {
    app: &'a App,
    boot: &'a BootSequence,
    login: &'a LoginForm,
    archive: &'a Archive,
    session: Option<&'a Session>,
    theme: &'a Theme,
    sound_enabled: bool,
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    boot: BootSequence,
    login: LoginForm,
    archive: Archive,
    auth: Box<dyn AuthService>,
    auth_rx: Receiver<AuthEvent>,
    auth_sub: SubscriptionId,
    session: Option<Session>,
    bell: TerminalBell,
    prefs: Preferences,
    prefs_path: PathBuf,
    theme: Theme,
    tick_rate: Duration,
    started: Instant,
}

impl Tui {
    /// Create a new TUI, entering raw mode and the alternate screen.
    pub fn new(options: TuiOptions, mut auth: Box<dyn AuthService>) -> Result<Self, io::Error> {
        let archive = Archive::bundled()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let prefs_path = options.config_dir.join(prefs::PREFS_FILE);
        let mut preferences = prefs::load_or_default(&prefs_path);
        if options.no_sound {
            preferences.sound_enabled = false;
        }

        let (tx, rx) = mpsc::channel();
        let auth_sub = auth.subscribe(tx);

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let mut boot = BootSequence::new();
        let mut app = App::new();
        if options.skip_boot {
            boot.skip();
            app.complete_boot();
        }

        let bell = TerminalBell::new(preferences.sound_enabled);

        Ok(Self {
            terminal,
            app,
            boot,
            login: LoginForm::new(),
            archive,
            auth,
            auth_rx: rx,
            auth_sub,
            session: None,
            bell,
            prefs: preferences,
            prefs_path,
            theme: Theme::default(),
            tick_rate: Duration::from_millis(100),
            started: Instant::now(),
        })
    }

    /// Run the main event loop until quit is requested.
    pub fn run(&mut self) -> Result<(), io::Error> {
        loop {
            let state = RenderState {
                app: &self.app,
                boot: &self.boot,
                login: &self.login,
                archive: &self.archive,
                session: self.session.as_ref(),
                theme: &self.theme,
                sound_enabled: self.prefs.sound_enabled,
            };
            self.terminal.draw(|frame| render_frame(frame, &state))?;

            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key_event) => {
                        let key = crossterm_to_key(key_event.code, key_event.modifiers);
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
                    _ => {}
                }
            }

            // Advance the boot timer.
            if self.app.phase == Phase::Boot {
                let tick = self.boot.tick(self.now_ms());
                for _ in &tick.revealed {
                    self.bell.emit(SoundKind::Confirm);
                }
                if tick.completed {
                    self.app.complete_boot();
                }
            }

            self.drain_auth_events();
        }

        self.auth.unsubscribe(self.auth_sub);
        self.shutdown()
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    // -------------------------------------------------------------------
    // Input routing
    // -------------------------------------------------------------------

    /// Route one key event. Returns `true` when the application should
    /// quit.
    fn handle_key(&mut self, key: Key) -> bool {
        if let Some(outcome) = App::handle_global(&key) {
            return self.apply_outcome(outcome);
        }

        match self.app.phase {
            Phase::Boot => {
                if matches!(key, Key::Enter | Key::Escape) && self.boot.skip() {
                    self.bell.emit(SoundKind::Click);
                    self.app.complete_boot();
                }
                false
            }
            Phase::Login => {
                if let Some(kind) = self.login.handle_key(key, &mut *self.auth) {
                    self.bell.emit(kind);
                }
                false
            }
            Phase::Authenticated => {
                let outcome = self.app.handle_key(key, &self.archive);
                self.apply_outcome(outcome)
            }
        }
    }

    /// Route one mouse event into the browser grid.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.app.phase != Phase::Authenticated {
            return;
        }
        let menu_len = crate::menu::TOP_MENU.len();
        let list_len = self.app.current_list(&self.archive).len();
        let hit = views::hit_test(mouse.column, mouse.row, menu_len, list_len);

        match (mouse.kind, hit) {
            (MouseEventKind::Moved, Some(views::Hit::Menu(index))) => {
                self.app.hover_menu(index);
            }
            (MouseEventKind::Moved, Some(views::Hit::List(index))) => {
                self.app.hover_list(index, &self.archive);
            }
            (MouseEventKind::Down(MouseButton::Left), Some(views::Hit::Menu(index))) => {
                let outcome = self.app.click_menu(index);
                self.apply_outcome(outcome);
            }
            (MouseEventKind::Down(MouseButton::Left), Some(views::Hit::List(index))) => {
                let outcome = self.app.click_list(index, &self.archive);
                self.apply_outcome(outcome);
            }
            _ => {}
        }
    }

    /// Carry out an outcome. Returns `true` when the application should
    /// quit.
    fn apply_outcome(&mut self, outcome: Outcome) -> bool {
        if let Some(kind) = outcome.sound {
            self.bell.emit(kind);
        }
        match outcome.action {
            Some(AppAction::Quit) => true,
            Some(AppAction::SignOut) => {
                // Best-effort: the local phase resets no matter what the
                // service does with the request.
                self.auth.sign_out();
                self.session = None;
                self.app.sign_out();
                false
            }
            Some(AppAction::ToggleSound) => {
                self.prefs.sound_enabled = !self.prefs.sound_enabled;
                self.bell.set_enabled(self.prefs.sound_enabled);
                // A failed write only costs persistence, not the toggle.
                let _ = prefs::save(&self.prefs_path, &self.prefs);
                false
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------
    // Auth events
    // -------------------------------------------------------------------

    fn drain_auth_events(&mut self) {
        while let Ok(auth_event) = self.auth_rx.try_recv() {
            if let Some(kind) = self.login.handle_auth_event(&auth_event) {
                self.bell.emit(kind);
            }
            match auth_event {
                AuthEvent::SessionChanged(Some(session)) => {
                    self.session = Some(session);
                    if self.app.phase == Phase::Login {
                        self.app.session_established();
                    }
                }
                AuthEvent::SessionChanged(None) => {
                    self.session = None;
                    if self.app.phase == Phase::Authenticated {
                        self.app.sign_out();
                    }
                }
                _ => {}
            }
        }
    }

    // -------------------------------------------------------------------
    // Shutdown
    // -------------------------------------------------------------------

    /// Restore the terminal to its normal state.
    fn shutdown(&mut self) -> Result<(), io::Error> {
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
    }
}


// ---------------------------------------------------------------------------
// Rendering (free functions to avoid borrow conflicts)
// ---------------------------------------------------------------------------

/// Render the full screen: phase body plus the status bar.
fn render_frame(frame: &mut Frame, state: &RenderState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // phase body
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    let body = chunks[0];
    let width = body.width.saturating_sub(2) as usize;

    match state.app.phase {
        Phase::Boot => {
            let text = BootView::render(state.boot, width).join("\n");
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(state.theme.text.to_tui()))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paragraph, body);
        }
        Phase::Login => {
            let text = LoginView::render(state.login, width).join("\n");
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(state.theme.text.to_tui()))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(state.theme.accent.to_tui())),
                );
            frame.render_widget(paragraph, body);

            // Cursor inside the focused field (offset by the block border).
            let (x, y) = LoginView::cursor(state.login);
            frame.set_cursor_position((body.x + 1 + x, body.y + 1 + y));
        }
        Phase::Authenticated => {
            let text = BrowserView::render(state.app, state.archive, width).join("\n");
            let paragraph =
                Paragraph::new(text).style(Style::default().fg(state.theme.text.to_tui()));
            frame.render_widget(paragraph, body);
        }
    }

    render_status_bar(frame, chunks[1], state);
}

/// Bottom status line: phase, signed-in agent, sound state.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let agent = state
        .session
        .map(|s| s.agent.as_str())
        .unwrap_or("not signed in");
    let sound = if state.sound_enabled { "on" } else { "off" };
    let text = format!(
        " {} | {} | sound {} (F2) | Ctrl+Q quit",
        state.app.phase.label(),
        agent,
        sound
    );
    let bar = Paragraph::new(text).style(Style::default().fg(state.theme.dim.to_tui()));
    frame.render_widget(bar, area);
}


// ---------------------------------------------------------------------------
// Key conversion
// ---------------------------------------------------------------------------

/// Convert a crossterm `KeyCode` + `KeyModifiers` into our domain `Key`.
pub fn crossterm_to_key(code: KeyCode, modifiers: KeyModifiers) -> Key {
    if modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(ch) = code {
            return Key::Ctrl(ch);
        }
    }
    match code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Char('\0'), // unmapped keys produce a null char
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_char_to_key() {
        let key = crossterm_to_key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key, Key::Char('a'));
    }

    #[test]
    fn crossterm_ctrl_to_key() {
        let key = crossterm_to_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(key, Key::Ctrl('q'));
    }

    #[test]
    fn crossterm_function_key() {
        let key = crossterm_to_key(KeyCode::F(2), KeyModifiers::NONE);
        assert_eq!(key, Key::F(2));
    }

    #[test]
    fn crossterm_navigation_keys() {
        assert_eq!(crossterm_to_key(KeyCode::Enter, KeyModifiers::NONE), Key::Enter);
        assert_eq!(crossterm_to_key(KeyCode::Esc, KeyModifiers::NONE), Key::Escape);
        assert_eq!(crossterm_to_key(KeyCode::Up, KeyModifiers::NONE), Key::Up);
        assert_eq!(crossterm_to_key(KeyCode::Down, KeyModifiers::NONE), Key::Down);
    }

    #[test]
    fn crossterm_unmapped_is_null_char() {
        let key = crossterm_to_key(KeyCode::CapsLock, KeyModifiers::NONE);
        assert_eq!(key, Key::Char('\0'));
    }
}
