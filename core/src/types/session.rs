use serde::{Deserialize, Serialize};

/// An authenticated identity issued by the auth service.
///
/// Opaque to the navigation machinery; present exactly while the
/// application is in the authenticated phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Provider-assigned unique id.
    pub uid: String,
    /// The identifier the agent signed in with (e-mail).
    pub agent: String,
}
