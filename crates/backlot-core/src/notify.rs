// ── User-notification sink ──
//
// The coordinator reports mutation outcomes through this trait; the CLI
// prints colored lines, tests capture messages, and `NullNotify` keeps
// everything silent. Every method defaults to a no-op, so implementors
// pick what they care about.

/// Sink for user-facing outcome messages.
pub trait Notify: Send + Sync {
    fn success(&self, message: &str) {
        let _ = message;
    }

    fn error(&self, message: &str) {
        let _ = message;
    }

    fn info(&self, message: &str) {
        let _ = message;
    }
}

/// Silent sink — the default when no notifier is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotify;

impl Notify for NullNotify {}
