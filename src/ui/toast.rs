use egui::Color32;
use std::time::{Duration, Instant};

/// Transient notification shown at the top of the window
#[derive(Clone)]
pub struct Toast {
    pub message: String,
    pub color: Color32,
    pub expires_at: Instant,
}

impl Toast {
    pub fn success(message: String) -> Self {
        Self::new(message, Color32::from_rgb(100, 255, 100))
    }

    pub fn error(message: String) -> Self {
        Self::new(message, Color32::from_rgb(255, 100, 100))
    }

    fn new(message: String, color: Color32) -> Self {
        Self {
            message,
            color,
            expires_at: Instant::now() + Duration::from_secs(4),
        }
    }

    /// Check if the toast has expired
    pub fn has_expired(&self) -> bool {
        self.expires_at <= Instant::now()
    }
}
