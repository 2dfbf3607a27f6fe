//! Request Guards
//!
//! Small pieces of state that keep overlapping async work in order:
//! - [`LoadSequence`]: only the newest load may apply its response
//! - [`SubmitGuard`]: at most one submission in flight, released on drop
//! - [`Debounce`]: only the last value pushed within a window fires

use leptos::prelude::*;

/// Ticket handed out by [`LoadSequence::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Per-page load counter. A response is applied only if its ticket is still
/// the latest one issued; anything older was superseded and is dropped.
#[derive(Debug, Clone, Copy)]
pub struct LoadSequence {
    latest: StoredValue<u64>,
}

impl LoadSequence {
    pub fn new() -> Self {
        Self { latest: StoredValue::new(0) }
    }

    pub fn begin(&self) -> LoadTicket {
        self.latest.update_value(|n| *n += 1);
        LoadTicket(self.latest.get_value())
    }

    /// False once a newer load started or the owning page was disposed
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.try_get_value() == Some(ticket.0)
    }
}

impl Default for LoadSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Double-submit guard. The busy flag is reactive so the submit button can
/// render its disabled state from it.
#[derive(Debug, Clone, Copy)]
pub struct SubmitGuard {
    busy: RwSignal<bool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self { busy: RwSignal::new(false) }
    }

    /// `None` while another submission holds the guard
    pub fn try_begin(&self) -> Option<SubmitPermit> {
        if self.busy.get_untracked() {
            return None;
        }
        self.busy.set(true);
        Some(SubmitPermit { busy: self.busy })
    }

    /// Tracked read for views
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

impl Default for SubmitGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Held for the duration of a submission; releases the guard on every exit path
#[must_use]
pub struct SubmitPermit {
    busy: RwSignal<bool>,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.busy.try_set(false);
    }
}

/// Trailing-edge debounce bookkeeping. Each push supersedes the previous one;
/// a timer firing for an old generation yields nothing.
#[derive(Debug, Clone, Default)]
pub struct Debounce<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Debounce<T> {
    /// Record a new value and return the generation its timer must present
    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Take the pending value if `generation` is still the latest push
    pub fn fire(&mut self, generation: u64) -> Option<T> {
        if generation == self.generation {
            self.pending.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_load_applies() {
        let seq = LoadSequence::new();
        let slow = seq.begin();
        let fast = seq.begin();

        // fast resolves first and applies; slow resolves later and is dropped
        assert!(seq.is_current(fast));
        assert!(!seq.is_current(slow));
    }

    #[test]
    fn test_submit_guard_blocks_second_submit() {
        let guard = SubmitGuard::new();
        let mut calls = 0;

        let first = guard.try_begin();
        if first.is_some() {
            calls += 1;
        }
        if guard.try_begin().is_some() {
            calls += 1;
        }

        assert_eq!(calls, 1);
        assert!(guard.busy.get_untracked());
        drop(first);
        assert!(!guard.busy.get_untracked());
    }

    #[test]
    fn test_submit_guard_released_on_early_return() {
        fn submit(guard: SubmitGuard, valid: bool) -> Result<(), &'static str> {
            let _permit = guard.try_begin().ok_or("busy")?;
            if !valid {
                return Err("invalid");
            }
            Ok(())
        }

        let guard = SubmitGuard::new();
        assert_eq!(submit(guard, false), Err("invalid"));
        assert_eq!(submit(guard, true), Ok(()));
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn test_debounce_fires_once_with_last_value() {
        let mut debounce = Debounce::default();
        let timers: Vec<u64> = ["b", "bl", "bla", "blan"]
            .into_iter()
            .map(|text| debounce.push(text.to_string()))
            .collect();

        let fired: Vec<String> = timers.into_iter().filter_map(|g| debounce.fire(g)).collect();
        assert_eq!(fired, vec!["blan".to_string()]);
    }

    #[test]
    fn test_debounce_fires_each_settled_value() {
        let mut debounce = Debounce::default();
        let first = debounce.push("rice");
        assert_eq!(debounce.fire(first), Some("rice"));
        assert_eq!(debounce.fire(first), None);

        let second = debounce.push("water");
        assert_eq!(debounce.fire(second), Some("water"));
    }
}
