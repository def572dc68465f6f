//! Messaging and notification sinks backed by `tracing`

use crate::interfaces::{InfoOptions, Messenger, NotifyImage, Notifier};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogMessenger;

impl Messenger for LogMessenger {
    fn info(&self, message: &str, options: InfoOptions) {
        info!(reset = options.reset, "{}", message);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, title: &str, image: NotifyImage) {
        info!(target: "minirun::notify", title, image = image.as_str(), "{}", message);
    }
}
