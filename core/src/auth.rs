//! The authentication-service contract.
//!
//! The terminal never talks to an identity provider directly; it is handed
//! an [`AuthService`] implementation. Request operations are
//! fire-and-forget — outcomes come back as [`AuthEvent`]s on a channel the
//! caller subscribes, which keeps the event loop free to keep drawing while
//! a request is outstanding. [`RecordingAuth`] is the test double;
//! [`LocalAuth`] is the offline stand-in used by the binary.

use std::collections::HashMap;
use std::sync::mpsc::Sender;

use crate::types::Session;


// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The request operations an auth service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOp {
    SignIn,
    SignUp,
    RequestReset,
    Federated,
    SignOut,
}

impl AuthOp {
    pub fn label(&self) -> &str {
        match self {
            AuthOp::SignIn => "sign-in",
            AuthOp::SignUp => "sign-up",
            AuthOp::RequestReset => "reset",
            AuthOp::Federated => "federated",
            AuthOp::SignOut => "sign-out",
        }
    }
}

/// An asynchronous outcome delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    /// The session changed: `Some` on establishment, `None` on sign-out.
    SessionChanged(Option<Session>),
    /// A request finished unsuccessfully. The message is provider text and
    /// is surfaced to the user verbatim.
    RequestFailed { op: AuthOp, message: String },
    /// A password-reset request was accepted.
    ResetSent,
}

/// Handle returned by [`AuthService::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);


// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

/// The injected authentication collaborator.
///
/// All request operations are fire-and-forget; completion (success or
/// failure) arrives as an [`AuthEvent`] on every subscribed channel.
pub trait AuthService {
    /// Register a channel to receive auth events. Returns a handle for
    /// [`AuthService::unsubscribe`].
    fn subscribe(&mut self, sender: Sender<AuthEvent>) -> SubscriptionId;

    /// Remove a previously registered channel.
    fn unsubscribe(&mut self, id: SubscriptionId);

    fn sign_in(&mut self, identifier: &str, secret: &str);

    fn sign_up(&mut self, identifier: &str, secret: &str);

    fn request_reset(&mut self, identifier: &str);

    fn sign_in_federated(&mut self);

    /// Best-effort sign-out. Callers reset their local phase regardless of
    /// whether this produces an event.
    fn sign_out(&mut self);
}


// ---------------------------------------------------------------------------
// Subscriber list (shared by the implementations below)
// ---------------------------------------------------------------------------

struct Subscribers {
    channels: Vec<(SubscriptionId, Sender<AuthEvent>)>,
    next_id: u64,
}

impl Subscribers {
    fn new() -> Self {
        Subscribers {
            channels: Vec::new(),
            next_id: 1,
        }
    }

    fn add(&mut self, sender: Sender<AuthEvent>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.channels.push((id, sender));
        id
    }

    fn remove(&mut self, id: SubscriptionId) {
        self.channels.retain(|(sid, _)| *sid != id);
    }

    /// Deliver an event to every subscriber. Disconnected receivers are
    /// dropped silently.
    fn emit(&mut self, event: &AuthEvent) {
        self.channels
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }
}


// ---------------------------------------------------------------------------
// RecordingAuth (test double)
// ---------------------------------------------------------------------------

/// A call made against [`RecordingAuth`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthCall {
    pub op: AuthOp,
    pub args: Vec<String>,
}

/// Records every call and never responds on its own; tests drive outcomes
/// through the `emit_*` methods.
pub struct RecordingAuth {
    pub calls: Vec<AuthCall>,
    subscribers: Subscribers,
}

impl RecordingAuth {
    pub fn new() -> Self {
        RecordingAuth {
            calls: Vec::new(),
            subscribers: Subscribers::new(),
        }
    }

    /// Number of recorded calls for one operation.
    pub fn count_of(&self, op: AuthOp) -> usize {
        self.calls.iter().filter(|c| c.op == op).count()
    }

    pub fn emit_session(&mut self, session: Option<Session>) {
        self.subscribers.emit(&AuthEvent::SessionChanged(session));
    }

    pub fn emit_failure(&mut self, op: AuthOp, message: &str) {
        self.subscribers.emit(&AuthEvent::RequestFailed {
            op,
            message: message.to_string(),
        });
    }

    pub fn emit_reset_sent(&mut self) {
        self.subscribers.emit(&AuthEvent::ResetSent);
    }

    fn record(&mut self, op: AuthOp, args: &[&str]) {
        self.calls.push(AuthCall {
            op,
            args: args.iter().map(|s| s.to_string()).collect(),
        });
    }
}

impl Default for RecordingAuth {
    fn default() -> Self {
        RecordingAuth::new()
    }
}

impl AuthService for RecordingAuth {
    fn subscribe(&mut self, sender: Sender<AuthEvent>) -> SubscriptionId {
        self.subscribers.add(sender)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.remove(id);
    }

    fn sign_in(&mut self, identifier: &str, secret: &str) {
        self.record(AuthOp::SignIn, &[identifier, secret]);
    }

    fn sign_up(&mut self, identifier: &str, secret: &str) {
        self.record(AuthOp::SignUp, &[identifier, secret]);
    }

    fn request_reset(&mut self, identifier: &str) {
        self.record(AuthOp::RequestReset, &[identifier]);
    }

    fn sign_in_federated(&mut self) {
        self.record(AuthOp::Federated, &[]);
    }

    fn sign_out(&mut self) {
        self.record(AuthOp::SignOut, &[]);
    }
}


// ---------------------------------------------------------------------------
// LocalAuth (offline stand-in)
// ---------------------------------------------------------------------------

/// An offline auth service for running the terminal without a hosted
/// provider. Registrations are kept in memory; outcomes are delivered on
/// the next event drain, mirroring the provider's asynchronous shape.
pub struct LocalAuth {
    users: HashMap<String, String>,
    session: Option<Session>,
    subscribers: Subscribers,
}

impl LocalAuth {
    pub fn new() -> Self {
        LocalAuth {
            users: HashMap::new(),
            session: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn establish(&mut self, uid: &str, agent: &str) {
        let session = Session {
            uid: uid.to_string(),
            agent: agent.to_string(),
        };
        self.session = Some(session.clone());
        self.subscribers
            .emit(&AuthEvent::SessionChanged(Some(session)));
    }

    fn fail(&mut self, op: AuthOp, message: &str) {
        self.subscribers.emit(&AuthEvent::RequestFailed {
            op,
            message: message.to_string(),
        });
    }
}

impl Default for LocalAuth {
    fn default() -> Self {
        LocalAuth::new()
    }
}

impl AuthService for LocalAuth {
    fn subscribe(&mut self, sender: Sender<AuthEvent>) -> SubscriptionId {
        self.subscribers.add(sender)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.remove(id);
    }

    fn sign_in(&mut self, identifier: &str, secret: &str) {
        match self.users.get(identifier) {
            Some(stored) if stored == secret => {
                let uid = format!("local-{}", identifier);
                self.establish(&uid, identifier);
            }
            Some(_) => self.fail(
                AuthOp::SignIn,
                "auth/invalid-credential: the supplied credentials are incorrect",
            ),
            None if secret.len() >= 6 => {
                // Unknown agents are accepted offline so the terminal is
                // usable without prior registration.
                let uid = format!("local-{}", identifier);
                self.establish(&uid, identifier);
            }
            None => self.fail(
                AuthOp::SignIn,
                "auth/invalid-credential: the supplied credentials are incorrect",
            ),
        }
    }

    fn sign_up(&mut self, identifier: &str, secret: &str) {
        if secret.len() < 6 {
            self.fail(
                AuthOp::SignUp,
                "auth/weak-password: password should be at least 6 characters",
            );
            return;
        }
        if self.users.contains_key(identifier) {
            self.fail(
                AuthOp::SignUp,
                "auth/email-already-in-use: an account already exists for this agent",
            );
            return;
        }
        self.users
            .insert(identifier.to_string(), secret.to_string());
        let uid = format!("local-{}", identifier);
        self.establish(&uid, identifier);
    }

    fn request_reset(&mut self, identifier: &str) {
        if identifier.is_empty() {
            self.fail(AuthOp::RequestReset, "auth/missing-email: no agent supplied");
            return;
        }
        self.subscribers.emit(&AuthEvent::ResetSent);
    }

    fn sign_in_federated(&mut self) {
        self.establish("local-federated", "federated@local");
    }

    fn sign_out(&mut self) {
        self.session = None;
        self.subscribers.emit(&AuthEvent::SessionChanged(None));
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn drain(rx: &mpsc::Receiver<AuthEvent>) -> Vec<AuthEvent> {
        let mut events = Vec::new();
        while let Ok(e) = rx.try_recv() {
            events.push(e);
        }
        events
    }

    // --- AuthOp ---

    #[test]
    fn auth_op_labels() {
        assert_eq!(AuthOp::SignIn.label(), "sign-in");
        assert_eq!(AuthOp::SignUp.label(), "sign-up");
        assert_eq!(AuthOp::RequestReset.label(), "reset");
        assert_eq!(AuthOp::Federated.label(), "federated");
        assert_eq!(AuthOp::SignOut.label(), "sign-out");
    }

    // --- RecordingAuth ---

    #[test]
    fn recording_auth_records_calls() {
        let mut auth = RecordingAuth::new();
        auth.sign_in("agent@ordem.example", "hunter2");
        auth.request_reset("agent@ordem.example");
        assert_eq!(auth.calls.len(), 2);
        assert_eq!(auth.count_of(AuthOp::SignIn), 1);
        assert_eq!(auth.count_of(AuthOp::SignUp), 0);
        assert_eq!(auth.calls[0].args[0], "agent@ordem.example");
    }

    #[test]
    fn recording_auth_emits_to_subscribers() {
        let mut auth = RecordingAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        auth.emit_failure(AuthOp::SignIn, "auth/wrong-password");
        let events = drain(&rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            AuthEvent::RequestFailed { op: AuthOp::SignIn, message } if message == "auth/wrong-password"
        ));
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut auth = RecordingAuth::new();
        let (tx, rx) = mpsc::channel();
        let id = auth.subscribe(tx);
        auth.unsubscribe(id);

        auth.emit_session(None);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let mut auth = RecordingAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);
        drop(rx);
        // Must not panic or error.
        auth.emit_session(None);
    }

    #[test]
    fn multiple_subscribers_all_receive() {
        let mut auth = RecordingAuth::new();
        let (tx1, rx1) = mpsc::channel();
        let (tx2, rx2) = mpsc::channel();
        auth.subscribe(tx1);
        auth.subscribe(tx2);

        auth.emit_reset_sent();
        assert_eq!(drain(&rx1), vec![AuthEvent::ResetSent]);
        assert_eq!(drain(&rx2), vec![AuthEvent::ResetSent]);
    }

    // --- LocalAuth ---

    #[test]
    fn local_sign_up_then_sign_in() {
        let mut auth = LocalAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        auth.sign_up("agent@ordem.example", "correct-horse");
        let events = drain(&rx);
        assert!(matches!(&events[0], AuthEvent::SessionChanged(Some(_))));

        auth.sign_out();
        auth.sign_in("agent@ordem.example", "correct-horse");
        let events = drain(&rx);
        assert!(matches!(events.last(), Some(AuthEvent::SessionChanged(Some(s))) if s.agent == "agent@ordem.example"));
    }

    #[test]
    fn local_sign_in_wrong_secret_fails() {
        let mut auth = LocalAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        auth.sign_up("agent@ordem.example", "correct-horse");
        auth.sign_out();
        drain(&rx);

        auth.sign_in("agent@ordem.example", "wrong");
        let events = drain(&rx);
        assert!(matches!(
            &events[0],
            AuthEvent::RequestFailed { op: AuthOp::SignIn, .. }
        ));
        assert!(auth.session().is_none());
    }

    #[test]
    fn local_weak_password_rejected_on_sign_up() {
        let mut auth = LocalAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        auth.sign_up("agent@ordem.example", "short");
        let events = drain(&rx);
        assert!(matches!(
            &events[0],
            AuthEvent::RequestFailed { op: AuthOp::SignUp, message } if message.contains("weak-password")
        ));
    }

    #[test]
    fn local_duplicate_sign_up_rejected() {
        let mut auth = LocalAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        auth.sign_up("agent@ordem.example", "correct-horse");
        auth.sign_up("agent@ordem.example", "another-pass");
        let events = drain(&rx);
        assert!(matches!(
            events.last(),
            Some(AuthEvent::RequestFailed { op: AuthOp::SignUp, .. })
        ));
    }

    #[test]
    fn local_reset_sends_ack() {
        let mut auth = LocalAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        auth.request_reset("agent@ordem.example");
        assert_eq!(drain(&rx), vec![AuthEvent::ResetSent]);
    }

    #[test]
    fn local_federated_establishes_session() {
        let mut auth = LocalAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        auth.sign_in_federated();
        let events = drain(&rx);
        assert!(matches!(&events[0], AuthEvent::SessionChanged(Some(_))));
        assert!(auth.session().is_some());
    }

    #[test]
    fn local_sign_out_clears_session() {
        let mut auth = LocalAuth::new();
        let (tx, rx) = mpsc::channel();
        auth.subscribe(tx);

        auth.sign_in_federated();
        auth.sign_out();
        let events = drain(&rx);
        assert_eq!(events.last(), Some(&AuthEvent::SessionChanged(None)));
        assert!(auth.session().is_none());
    }
}
