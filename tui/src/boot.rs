//! The boot-screen reveal sequence.
//!
//! A fixed set of status lines appears on a timer: the first two after
//! 520 ms each, the rest after 420 ms each, with completion signaled 450 ms
//! after the last line. Enter or Escape short-circuits straight to
//! completion. The sequence owns no clock — the runner feeds it a
//! millisecond timestamp and reacts to what `tick` reports.

/// The status lines, in reveal order.
pub const BOOT_LINES: [&str; 7] = [
    "ORDO REALITAS ARCHIVE TERMINAL v2.41",
    "(C) ORDO REALITAS - AUTHORIZED AGENTS ONLY",
    "CHECKING MEMORY .... 640K OK",
    "MOUNTING CLASSIFIED VOLUME /DOSSIER .... OK",
    "VERIFYING SEAL INTEGRITY .... OK",
    "COUNTER-MEASURES ARMED",
    "LINK TO CENTRAL ESTABLISHED",
];

/// Delay before each of the first two lines.
const OPENING_DELAY_MS: u64 = 520;
/// Delay before every subsequent line.
const LINE_DELAY_MS: u64 = 420;
/// Delay between the last line and the completion signal.
const COMPLETE_DELAY_MS: u64 = 450;

/// What a single `tick` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootTick {
    /// Lines newly revealed by this tick. Each warrants one soft beep.
    pub revealed: Vec<&'static str>,
    /// Whether the sequence finished on this tick.
    pub completed: bool,
}

/// Timer-driven reveal of the boot lines with a manual skip override.
pub struct BootSequence {
    revealed: usize,
    complete: bool,
    /// Absolute deadline of the next reveal (or completion) event.
    next_at: Option<u64>,
}

impl BootSequence {
    pub fn new() -> Self {
        BootSequence {
            revealed: 0,
            complete: false,
            next_at: None,
        }
    }

    /// Restart the sequence from the top.
    pub fn reset(&mut self) {
        self.revealed = 0;
        self.complete = false;
        self.next_at = None;
    }

    /// Advance the timer to `now_ms`.
    ///
    /// The first call anchors the schedule; later calls reveal every line
    /// whose deadline has passed, so a late tick catches up in one step.
    pub fn tick(&mut self, now_ms: u64) -> BootTick {
        let mut out = BootTick {
            revealed: Vec::new(),
            completed: false,
        };
        if self.complete {
            return out;
        }
        if self.next_at.is_none() {
            self.next_at = Some(now_ms + delay_before(0));
        }

        while let Some(deadline) = self.next_at {
            if now_ms < deadline {
                break;
            }
            if self.revealed < BOOT_LINES.len() {
                out.revealed.push(BOOT_LINES[self.revealed]);
                self.revealed += 1;
                let delay = if self.revealed < BOOT_LINES.len() {
                    delay_before(self.revealed)
                } else {
                    COMPLETE_DELAY_MS
                };
                self.next_at = Some(deadline + delay);
            } else {
                self.complete = true;
                self.next_at = None;
                out.completed = true;
            }
        }
        out
    }

    /// Short-circuit to completion. Returns `false` when already complete.
    pub fn skip(&mut self) -> bool {
        if self.complete {
            return false;
        }
        self.revealed = BOOT_LINES.len();
        self.complete = true;
        self.next_at = None;
        true
    }

    /// The lines revealed so far.
    pub fn lines(&self) -> &'static [&'static str] {
        &BOOT_LINES[..self.revealed]
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl Default for BootSequence {
    fn default() -> Self {
        BootSequence::new()
    }
}

/// Delay between line `index - 1` and line `index` (from the start, for
/// index 0).
fn delay_before(index: usize) -> u64 {
    if index < 2 {
        OPENING_DELAY_MS
    } else {
        LINE_DELAY_MS
    }
}
