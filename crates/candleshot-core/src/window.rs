//! Window sequencer: deterministic snapshot windows over a bar series.
//!
//! Reproduces an incrementally updating chart: the initial view shows
//! `show_size` bars, then bars append one at a time and a snapshot fires
//! every `step_size` appended bars, plus one closing snapshot at the last
//! bar. The sequence is a pure function of its inputs; re-creating it with
//! the same arguments yields an identical sequence.

use serde::{Deserialize, Serialize};

use crate::{BarSeries, ValidationError};

/// Half-open index range `[start, end)` designating one snapshot's visible
/// bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Lazy snapshot-window sequence over `series`.
///
/// See [`WindowSequencer`] for the exact schedule. Fails with
/// [`ValidationError::InvalidParameter`] when `show_size` or `step_size` is
/// zero.
pub fn windows(
    series: &BarSeries,
    show_size: usize,
    step_size: usize,
    start_offset: usize,
) -> Result<WindowSequencer, ValidationError> {
    WindowSequencer::new(series.len(), show_size, step_size, start_offset)
}

/// Iterator yielding the snapshot windows for a series of a given length.
///
/// Schedule:
/// - first window is `(start_offset, start_offset + show_size)`, clipped to
///   the series length; for a series no longer than that, it is the only
///   window;
/// - each later window is `(snapshot_start, appended_index + 1)`, fired once
///   `step_size` bars accumulated since the previous snapshot or the last
///   bar was appended, whichever comes first; `snapshot_start` advances by
///   `step_size` per snapshot;
/// - the final partial group still fires exactly one closing snapshot, so no
///   trailing bars are dropped;
/// - an empty series (or `start_offset` past the end) yields no windows.
#[derive(Debug, Clone)]
pub struct WindowSequencer {
    len: usize,
    show_size: usize,
    step_size: usize,
    start_offset: usize,
    phase: Phase,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Initial,
    Stepping {
        idx: usize,
        snapshot_start: usize,
        pending: usize,
    },
    Done,
}

impl WindowSequencer {
    pub fn new(
        len: usize,
        show_size: usize,
        step_size: usize,
        start_offset: usize,
    ) -> Result<Self, ValidationError> {
        if show_size == 0 {
            return Err(ValidationError::InvalidParameter { field: "show_size" });
        }
        if step_size == 0 {
            return Err(ValidationError::InvalidParameter { field: "step_size" });
        }
        Ok(Self::unchecked(len, show_size, step_size, start_offset))
    }

    pub(crate) fn unchecked(
        len: usize,
        show_size: usize,
        step_size: usize,
        start_offset: usize,
    ) -> Self {
        Self {
            len,
            show_size,
            step_size,
            start_offset,
            phase: Phase::Initial,
        }
    }
}

impl Iterator for WindowSequencer {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        match self.phase {
            Phase::Done => None,
            Phase::Initial => {
                if self.start_offset >= self.len {
                    self.phase = Phase::Done;
                    return None;
                }
                let end = (self.start_offset + self.show_size).min(self.len);
                if end == self.len {
                    self.phase = Phase::Done;
                } else {
                    self.phase = Phase::Stepping {
                        idx: end,
                        snapshot_start: self.start_offset + self.step_size,
                        pending: 0,
                    };
                }
                Some(Window::new(self.start_offset, end))
            }
            Phase::Stepping {
                mut idx,
                snapshot_start,
                mut pending,
            } => {
                while idx < self.len {
                    pending += 1;
                    if pending == self.step_size || idx + 1 == self.len {
                        if idx + 1 == self.len {
                            self.phase = Phase::Done;
                        } else {
                            self.phase = Phase::Stepping {
                                idx: idx + 1,
                                snapshot_start: snapshot_start + self.step_size,
                                pending: 0,
                            };
                        }
                        return Some(Window::new(snapshot_start, idx + 1));
                    }
                    idx += 1;
                }
                self.phase = Phase::Done;
                None
            }
        }
    }
}
