//! DOM Events
//!
//! Listener registration tokens and the synthesized click event.

use crate::NodeId;

/// Event types a listener can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
}

/// Opaque handler token.
///
/// The tree only stores tokens; whoever registers one decides what it
/// means when the event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub event_type: EventType,
    pub id: ListenerId,
}

/// Click event travelling from the target up through its ancestors
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    /// Create a click on `target`
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            current_target: None,
            cancelable: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Prevent default action (link navigation)
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_defaults() {
        let event = ClickEvent::new(NodeId(5));

        assert_eq!(event.target, NodeId(5));
        assert_eq!(event.current_target, None);
        assert!(!event.is_default_prevented());
        assert!(!event.is_propagation_stopped());
    }

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut event = ClickEvent::new(NodeId(1));
        event.cancelable = false;
        event.prevent_default();
        assert!(!event.is_default_prevented());

        event.cancelable = true;
        event.prevent_default();
        event.stop_propagation();
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
    }
}
