//! Interface sound cues.
//!
//! The navigation machinery only ever says *which* cue to play; what that
//! means is up to the [`SoundSink`] implementation. Emission is
//! fire-and-forget — a sink must never propagate a failure back into the
//! caller. Tone parameters follow the original terminal's synthesizer:
//! short square-wave envelopes in the old-PC style.

use std::cell::{Cell, RefCell};
use std::io::Write;

/// The cue categories the UI emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    /// Dry tick for cursor movement and toggles.
    Click,
    /// Soft beep for focus changes and confirmations.
    Confirm,
    /// Two-tone descending error cue.
    Error,
}

/// A single tone in a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub freq_hz: u32,
    pub duration_ms: u64,
}

impl SoundKind {
    /// The tone sequence for this cue.
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundKind::Click => &[Tone {
                freq_hz: 920,
                duration_ms: 30,
            }],
            SoundKind::Confirm => &[Tone {
                freq_hz: 660,
                duration_ms: 50,
            }],
            SoundKind::Error => &[
                Tone {
                    freq_hz: 220,
                    duration_ms: 70,
                },
                Tone {
                    freq_hz: 165,
                    duration_ms: 80,
                },
            ],
        }
    }
}

/// Receives sound cues. Implementations swallow their own failures.
pub trait SoundSink {
    fn emit(&self, kind: SoundKind);
}

/// Rings the terminal bell for every enabled cue.
///
/// There is no per-kind pitch over a terminal bell; the distinct tone
/// descriptions are kept for sinks that can do better.
pub struct TerminalBell {
    enabled: Cell<bool>,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        TerminalBell {
            enabled: Cell::new(enabled),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl SoundSink for TerminalBell {
    fn emit(&self, _kind: SoundKind) {
        if !self.enabled.get() {
            return;
        }
        let mut out = std::io::stdout();
        // Failures stay here; the sink contract is fire-and-forget.
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Discards every cue.
pub struct NullSink;

impl SoundSink for NullSink {
    fn emit(&self, _kind: SoundKind) {}
}

/// Records cues for assertions in tests.
pub struct RecordingSink {
    pub events: RefCell<Vec<SoundKind>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink {
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn taken(&self) -> Vec<SoundKind> {
        self.events.borrow().clone()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        RecordingSink::new()
    }
}

impl SoundSink for RecordingSink {
    fn emit(&self, kind: SoundKind) {
        self.events.borrow_mut().push(kind);
    }
}
