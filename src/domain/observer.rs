//! Diagnostic sink notified by the tree builder.

use tracing::{debug, trace};

/// Receives progress notifications while a tree is grown.
///
/// `path` is the route from the root, e.g. `root > bp=high`.
pub trait BuildObserver {
    fn node_entered(&mut self, _path: &str, _examples: usize) {}

    fn attribute_chosen(&mut self, _path: &str, _attribute: &str, _gain: f64) {}

    fn node_completed(&mut self, _path: &str, _label: &str, _terminal: bool) {}
}

/// Forwards build notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn node_entered(&mut self, path: &str, examples: usize) {
        trace!(path, examples, "node entered");
    }

    fn attribute_chosen(&mut self, path: &str, attribute: &str, gain: f64) {
        debug!(path, attribute, gain, "attribute chosen");
    }

    fn node_completed(&mut self, path: &str, label: &str, terminal: bool) {
        trace!(path, label, terminal, "node completed");
    }
}

/// Silent observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    Entered { path: String, examples: usize },
    Chosen { path: String, attribute: String, gain: f64 },
    Completed { path: String, label: String, terminal: bool },
}

/// Keeps every notification in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<BuildEvent>,
}

impl BuildObserver for RecordingObserver {
    fn node_entered(&mut self, path: &str, examples: usize) {
        self.events.push(BuildEvent::Entered {
            path: path.to_string(),
            examples,
        });
    }

    fn attribute_chosen(&mut self, path: &str, attribute: &str, gain: f64) {
        self.events.push(BuildEvent::Chosen {
            path: path.to_string(),
            attribute: attribute.to_string(),
            gain,
        });
    }

    fn node_completed(&mut self, path: &str, label: &str, terminal: bool) {
        self.events.push(BuildEvent::Completed {
            path: path.to_string(),
            label: label.to_string(),
            terminal,
        });
    }
}
