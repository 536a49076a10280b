//! The agent login form and its bridge to the auth service.
//!
//! Three modes share the same two fields: sign-in, register ("new agent")
//! and password reset. Submissions are validated locally first — a missing
//! field surfaces a message and sends nothing. While a request is in
//! flight a single-flight guard swallows duplicate submissions; the guard
//! clears when the service reports an outcome. Remote failure messages are
//! shown verbatim, the way the provider wrote them.

use dossier_core::auth::{AuthEvent, AuthService};

use crate::app::Key;
use crate::input::FieldBuffer;
use crate::sound::SoundKind;


/// Which input field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Agent,
    Password,
}

/// What submitting the form will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    SignIn,
    Register,
    Reset,
}

impl LoginMode {
    /// Form title for the login screen.
    pub fn title(&self) -> &str {
        match self {
            LoginMode::SignIn => "AGENT ACCESS",
            LoginMode::Register => "REGISTER NEW AGENT",
            LoginMode::Reset => "RESET PASSWORD",
        }
    }

    fn uses_password(&self) -> bool {
        !matches!(self, LoginMode::Reset)
    }
}

/// The login form state machine.
pub struct LoginForm {
    mode: LoginMode,
    field: LoginField,
    agent: FieldBuffer,
    password: FieldBuffer,
    message: Option<String>,
    in_flight: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        LoginForm {
            mode: LoginMode::SignIn,
            field: LoginField::Agent,
            agent: FieldBuffer::new(),
            password: FieldBuffer::new(),
            message: None,
            in_flight: false,
        }
    }

    // -------------------------------------------------------------------
    // Accessors (for views and tests)
    // -------------------------------------------------------------------

    pub fn mode(&self) -> LoginMode {
        self.mode
    }

    pub fn focused_field(&self) -> LoginField {
        self.field
    }

    pub fn agent_text(&self) -> String {
        self.agent.text()
    }

    pub fn password_masked(&self) -> String {
        self.password.masked('*')
    }

    /// Cursor position within the focused field.
    pub fn cursor_pos(&self) -> usize {
        match self.field {
            LoginField::Agent => self.agent.cursor_pos(),
            LoginField::Password => self.password.cursor_pos(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    // -------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------

    /// Process a key in the login phase. Returns the sound cue to emit.
    pub fn handle_key(&mut self, key: Key, auth: &mut dyn AuthService) -> Option<SoundKind> {
        match key {
            Key::Tab | Key::Down => {
                self.cycle_field();
                None
            }
            Key::Up => {
                self.cycle_field();
                None
            }
            Key::Enter => self.submit(auth),
            Key::Escape => {
                // Leave register/reset back to plain sign-in.
                if self.mode != LoginMode::SignIn {
                    self.set_mode(LoginMode::SignIn);
                    Some(SoundKind::Click)
                } else {
                    self.message = None;
                    None
                }
            }
            Key::Ctrl('n') => {
                self.set_mode(LoginMode::Register);
                Some(SoundKind::Click)
            }
            Key::Ctrl('r') => {
                self.set_mode(LoginMode::Reset);
                Some(SoundKind::Click)
            }
            Key::Ctrl('g') => self.submit_federated(auth),
            Key::Char(ch) => {
                self.focused_buffer().insert(ch);
                None
            }
            Key::Backspace => {
                self.focused_buffer().delete_back();
                None
            }
            Key::Delete => {
                self.focused_buffer().delete_forward();
                None
            }
            Key::Left => {
                self.focused_buffer().move_left();
                None
            }
            Key::Right => {
                self.focused_buffer().move_right();
                None
            }
            Key::Home => {
                self.focused_buffer().move_home();
                None
            }
            Key::End => {
                self.focused_buffer().move_end();
                None
            }
            _ => None,
        }
    }

    /// Submit the form in its current mode.
    ///
    /// Duplicate submissions while a request is outstanding are dropped.
    pub fn submit(&mut self, auth: &mut dyn AuthService) -> Option<SoundKind> {
        if self.in_flight {
            return None;
        }
        let agent = self.agent.text();
        match self.mode {
            LoginMode::SignIn => {
                if agent.is_empty() || self.password.is_empty() {
                    self.message = Some("Enter agent and password.".to_string());
                    return None;
                }
                auth.sign_in(&agent, &self.password.text());
            }
            LoginMode::Register => {
                if agent.is_empty() || self.password.is_empty() {
                    self.message = Some("Enter agent and password.".to_string());
                    return None;
                }
                auth.sign_up(&agent, &self.password.text());
            }
            LoginMode::Reset => {
                if agent.is_empty() {
                    self.message = Some("Enter the agent e-mail.".to_string());
                    return None;
                }
                auth.request_reset(&agent);
            }
        }
        self.in_flight = true;
        self.message = None;
        Some(SoundKind::Click)
    }

    /// Start a federated sign-in. Subject to the same single-flight guard.
    pub fn submit_federated(&mut self, auth: &mut dyn AuthService) -> Option<SoundKind> {
        if self.in_flight {
            return None;
        }
        auth.sign_in_federated();
        self.in_flight = true;
        self.message = None;
        Some(SoundKind::Click)
    }

    /// React to an auth-service outcome.
    pub fn handle_auth_event(&mut self, event: &AuthEvent) -> Option<SoundKind> {
        match event {
            AuthEvent::RequestFailed { message, .. } => {
                self.in_flight = false;
                self.message = Some(message.clone());
                Some(SoundKind::Error)
            }
            AuthEvent::SessionChanged(Some(_)) => {
                self.in_flight = false;
                self.password.clear();
                self.message = None;
                None
            }
            AuthEvent::SessionChanged(None) => {
                self.in_flight = false;
                None
            }
            AuthEvent::ResetSent => {
                self.in_flight = false;
                self.message = Some("Reset link sent. Check your inbox.".to_string());
                Some(SoundKind::Confirm)
            }
        }
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn cycle_field(&mut self) {
        if !self.mode.uses_password() {
            self.field = LoginField::Agent;
            return;
        }
        self.field = match self.field {
            LoginField::Agent => LoginField::Password,
            LoginField::Password => LoginField::Agent,
        };
    }

    fn set_mode(&mut self, mode: LoginMode) {
        self.mode = mode;
        self.field = LoginField::Agent;
        self.message = None;
        if !mode.uses_password() {
            self.password.clear();
        }
    }

    fn focused_buffer(&mut self) -> &mut FieldBuffer {
        match self.field {
            LoginField::Agent => &mut self.agent,
            LoginField::Password => &mut self.password,
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm::new()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::auth::{AuthOp, RecordingAuth};
    use dossier_core::types::Session;

    fn type_text(form: &mut LoginForm, auth: &mut RecordingAuth, text: &str) {
        for ch in text.chars() {
            form.handle_key(Key::Char(ch), auth);
        }
    }

    fn filled_form(auth: &mut RecordingAuth) -> LoginForm {
        let mut form = LoginForm::new();
        type_text(&mut form, auth, "agent@ordem.example");
        form.handle_key(Key::Tab, auth);
        type_text(&mut form, auth, "hunter2!");
        form
    }

    fn session() -> Session {
        Session {
            uid: "u-1".into(),
            agent: "agent@ordem.example".into(),
        }
    }

    // --- Editing ---

    #[test]
    fn typing_goes_to_focused_field() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        type_text(&mut form, &mut auth, "abc");
        assert_eq!(form.agent_text(), "abc");

        form.handle_key(Key::Tab, &mut auth);
        assert_eq!(form.focused_field(), LoginField::Password);
        type_text(&mut form, &mut auth, "xyz");
        assert_eq!(form.password_masked(), "***");
        assert_eq!(form.agent_text(), "abc");
    }

    #[test]
    fn tab_cycles_between_fields() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        assert_eq!(form.focused_field(), LoginField::Agent);
        form.handle_key(Key::Tab, &mut auth);
        assert_eq!(form.focused_field(), LoginField::Password);
        form.handle_key(Key::Down, &mut auth);
        assert_eq!(form.focused_field(), LoginField::Agent);
    }

    #[test]
    fn reset_mode_has_single_field() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        form.handle_key(Key::Ctrl('r'), &mut auth);
        assert_eq!(form.mode(), LoginMode::Reset);
        form.handle_key(Key::Tab, &mut auth);
        assert_eq!(form.focused_field(), LoginField::Agent);
    }

    #[test]
    fn escape_returns_to_sign_in() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        form.handle_key(Key::Ctrl('n'), &mut auth);
        assert_eq!(form.mode(), LoginMode::Register);
        form.handle_key(Key::Escape, &mut auth);
        assert_eq!(form.mode(), LoginMode::SignIn);
    }

    // --- Validation ---

    #[test]
    fn empty_sign_in_sends_nothing() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        let cue = form.handle_key(Key::Enter, &mut auth);
        assert!(cue.is_none());
        assert!(auth.calls.is_empty());
        assert_eq!(form.message(), Some("Enter agent and password."));
        assert!(!form.is_in_flight());
    }

    #[test]
    fn missing_password_sends_nothing() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        type_text(&mut form, &mut auth, "agent@ordem.example");
        form.handle_key(Key::Enter, &mut auth);
        assert!(auth.calls.is_empty());
        assert!(form.message().is_some());
    }

    #[test]
    fn reset_requires_only_agent() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        form.handle_key(Key::Ctrl('r'), &mut auth);
        form.handle_key(Key::Enter, &mut auth);
        assert!(auth.calls.is_empty());

        type_text(&mut form, &mut auth, "agent@ordem.example");
        form.handle_key(Key::Enter, &mut auth);
        assert_eq!(auth.count_of(AuthOp::RequestReset), 1);
    }

    // --- Submission ---

    #[test]
    fn sign_in_submits_credentials() {
        let mut auth = RecordingAuth::new();
        let mut form = filled_form(&mut auth);
        let cue = form.handle_key(Key::Enter, &mut auth);
        assert_eq!(cue, Some(SoundKind::Click));
        assert_eq!(auth.count_of(AuthOp::SignIn), 1);
        assert_eq!(auth.calls[0].args[0], "agent@ordem.example");
        assert_eq!(auth.calls[0].args[1], "hunter2!");
        assert!(form.is_in_flight());
    }

    #[test]
    fn register_mode_submits_sign_up() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        form.handle_key(Key::Ctrl('n'), &mut auth);
        type_text(&mut form, &mut auth, "new@ordem.example");
        form.handle_key(Key::Tab, &mut auth);
        type_text(&mut form, &mut auth, "longenough");
        form.handle_key(Key::Enter, &mut auth);
        assert_eq!(auth.count_of(AuthOp::SignUp), 1);
        assert_eq!(auth.count_of(AuthOp::SignIn), 0);
    }

    #[test]
    fn federated_sign_in_submits() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        let cue = form.handle_key(Key::Ctrl('g'), &mut auth);
        assert_eq!(cue, Some(SoundKind::Click));
        assert_eq!(auth.count_of(AuthOp::Federated), 1);
        assert!(form.is_in_flight());
    }

    // --- Single-flight guard ---

    #[test]
    fn duplicate_submissions_are_suppressed() {
        let mut auth = RecordingAuth::new();
        let mut form = filled_form(&mut auth);
        form.handle_key(Key::Enter, &mut auth);
        form.handle_key(Key::Enter, &mut auth);
        form.handle_key(Key::Enter, &mut auth);
        assert_eq!(auth.count_of(AuthOp::SignIn), 1);
    }

    #[test]
    fn guard_blocks_federated_while_pending() {
        let mut auth = RecordingAuth::new();
        let mut form = filled_form(&mut auth);
        form.handle_key(Key::Enter, &mut auth);
        form.handle_key(Key::Ctrl('g'), &mut auth);
        assert_eq!(auth.count_of(AuthOp::Federated), 0);
    }

    #[test]
    fn guard_clears_on_failure_allowing_retry() {
        let mut auth = RecordingAuth::new();
        let mut form = filled_form(&mut auth);
        form.handle_key(Key::Enter, &mut auth);

        form.handle_auth_event(&AuthEvent::RequestFailed {
            op: AuthOp::SignIn,
            message: "auth/wrong-password".into(),
        });
        assert!(!form.is_in_flight());

        form.handle_key(Key::Enter, &mut auth);
        assert_eq!(auth.count_of(AuthOp::SignIn), 2);
    }

    // --- Outcome handling ---

    #[test]
    fn failure_message_surfaces_verbatim_with_error_cue() {
        let mut auth = RecordingAuth::new();
        let mut form = filled_form(&mut auth);
        form.handle_key(Key::Enter, &mut auth);

        let provider_text = "auth/user-not-found: there is no record for this agent";
        let cue = form.handle_auth_event(&AuthEvent::RequestFailed {
            op: AuthOp::SignIn,
            message: provider_text.into(),
        });
        assert_eq!(cue, Some(SoundKind::Error));
        assert_eq!(form.message(), Some(provider_text));
    }

    #[test]
    fn session_establishment_clears_password_and_guard() {
        let mut auth = RecordingAuth::new();
        let mut form = filled_form(&mut auth);
        form.handle_key(Key::Enter, &mut auth);

        let cue = form.handle_auth_event(&AuthEvent::SessionChanged(Some(session())));
        assert!(cue.is_none());
        assert!(!form.is_in_flight());
        assert_eq!(form.password_masked(), "");
        assert!(form.message().is_none());
    }

    #[test]
    fn reset_ack_shows_message_with_confirm_cue() {
        let mut auth = RecordingAuth::new();
        let mut form = LoginForm::new();
        form.handle_key(Key::Ctrl('r'), &mut auth);
        type_text(&mut form, &mut auth, "agent@ordem.example");
        form.handle_key(Key::Enter, &mut auth);

        let cue = form.handle_auth_event(&AuthEvent::ResetSent);
        assert_eq!(cue, Some(SoundKind::Confirm));
        assert!(form.message().unwrap().contains("Reset link sent"));
        assert!(!form.is_in_flight());
    }

    #[test]
    fn sign_out_event_clears_guard_quietly() {
        let mut auth = RecordingAuth::new();
        let mut form = filled_form(&mut auth);
        form.handle_key(Key::Enter, &mut auth);
        let cue = form.handle_auth_event(&AuthEvent::SessionChanged(None));
        assert!(cue.is_none());
        assert!(!form.is_in_flight());
    }

    // --- End-to-end against the offline service ---

    #[test]
    fn full_round_trip_with_local_auth() {
        use dossier_core::auth::LocalAuth;
        use std::sync::mpsc;

        let mut auth = LocalAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        let mut form = LoginForm::new();
        form.handle_key(Key::Ctrl('n'), &mut auth);
        for ch in "agent@ordem.example".chars() {
            form.handle_key(Key::Char(ch), &mut auth);
        }
        form.handle_key(Key::Tab, &mut auth);
        for ch in "correct-horse".chars() {
            form.handle_key(Key::Char(ch), &mut auth);
        }
        form.handle_key(Key::Enter, &mut auth);

        let event = rx.try_recv().unwrap();
        assert!(matches!(event, AuthEvent::SessionChanged(Some(_))));
        form.handle_auth_event(&event);
        assert!(!form.is_in_flight());
    }
}
