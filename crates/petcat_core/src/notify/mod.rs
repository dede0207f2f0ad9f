//! Change notification publishing.
//!
//! # Responsibility
//! - Define the publish side of the observer channel the provider emits on.
//!
//! # Invariants
//! - Notifications are fire-and-forget; the provider never waits on, or
//!   learns about, observer delivery.

use crate::resource::path::PetPath;
use log::info;

/// Publish side of a path-keyed change channel.
///
/// Implementations fan the signal out to whatever observer mechanism the
/// host application uses; this layer only publishes, never subscribes.
pub trait ChangeNotifier {
    /// Announces that data at `path` has changed.
    fn notify_change(&self, path: &PetPath);
}

/// Default notifier publishing change events to the log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl ChangeNotifier for LogNotifier {
    fn notify_change(&self, path: &PetPath) {
        info!("event=data_changed module=notify path={path}");
    }
}
