use portable_atomic::{AtomicBool, Ordering};

/// Stop request shared by the task loops.
///
/// Loops check it between sleeps, so a stop takes effect after the current
/// sleep ends. The firmware never requests it.
pub struct Shutdown {
    requested: AtomicBool,
}

impl Shutdown {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
