use core::mem;

/// When a requested reconciliation pass actually runs.
///
/// Requests are level-triggered: re-requesting while one is pending
/// coalesces (and, for the debounced strategy, pushes the deadline out).
/// Swapping strategies carries a pending request over without running it
/// twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileSchedule {
    /// Run on the next frame tick.
    NextFrame { pending: bool },
    /// Run once `interval_ms` has elapsed since the most recent request.
    Debounced {
        interval_ms: u64,
        deadline: Option<u64>,
    },
}

impl ReconcileSchedule {
    pub fn new(debounce: Option<u64>) -> Self {
        match debounce {
            Some(interval_ms) => Self::Debounced {
                interval_ms,
                deadline: None,
            },
            None => Self::NextFrame { pending: false },
        }
    }

    pub fn request(&mut self, now_ms: u64) {
        match self {
            Self::NextFrame { pending } => *pending = true,
            Self::Debounced {
                interval_ms,
                deadline,
            } => *deadline = Some(now_ms.saturating_add(*interval_ms)),
        }
    }

    pub fn is_pending(&self) -> bool {
        match self {
            Self::NextFrame { pending } => *pending,
            Self::Debounced { deadline, .. } => deadline.is_some(),
        }
    }

    /// Consumes a due request. Pending-but-not-due requests stay queued.
    pub fn take_due(&mut self, now_ms: u64) -> bool {
        match self {
            Self::NextFrame { pending } => mem::replace(pending, false),
            Self::Debounced { deadline, .. } => match *deadline {
                Some(due) if now_ms >= due => {
                    *deadline = None;
                    true
                }
                _ => false,
            },
        }
    }

    /// Replaces the strategy, migrating any pending request into the new
    /// one instead of dropping or double-running it.
    pub fn replace(&mut self, debounce: Option<u64>, now_ms: u64) {
        let pending = self.is_pending();
        *self = Self::new(debounce);
        if pending {
            self.request(now_ms);
        }
    }
}
