//! Toast notifications.
//!
//! A short message shown over the bottom of the window. Showing a new message
//! replaces the current one and restarts its timer, so rapid copies never
//! stack toasts.

/// Receiver of user-facing status messages.
pub trait Notify {
    fn notify(&mut self, message: &str);
}

/// A transient message with its own expiry deadline.
///
/// Times are seconds since application start, as reported by egui.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    message: Option<String>,
    expires_at: Option<f64>,
    duration: f64,
    now: f64,
}

impl Toast {
    pub fn new(duration: f64) -> Self {
        Self {
            message: None,
            expires_at: None,
            duration,
            now: 0.0,
        }
    }

    /// Show `message` from `current_time`, replacing any visible toast.
    pub fn show_at(&mut self, message: impl Into<String>, current_time: f64) {
        self.now = self.now.max(current_time);
        self.message = Some(message.into());
        self.expires_at = Some(current_time + self.duration);
    }

    /// Advance the clock, hiding the toast once it expired.
    ///
    /// Call this each frame with the current time.
    pub fn update(&mut self, current_time: f64) {
        self.now = current_time;
        if let Some(expires_at) = self.expires_at {
            if current_time >= expires_at {
                self.clear();
            }
        }
    }

    /// The visible message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Seconds until the toast hides.
    pub fn remaining(&self) -> Option<f64> {
        self.expires_at.map(|at| (at - self.now).max(0.0))
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.expires_at = None;
    }
}

impl Notify for Toast {
    fn notify(&mut self, message: &str) {
        let now = self.now;
        self.show_at(message, now);
    }
}
