//! Broadcast of overlay notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! A renderer, a sound player and a logger may all want to hear that
//! the mode changed. Instead of holding a list of callbacks, the
//! [`EventBus`] implements [`OverlaySink`] and forwards each notification
//! as an [`OverlayEvent`] value over a `tokio::sync::broadcast` channel.
//! Sending never blocks; lagging receivers drop old events.

use tokio::sync::broadcast;
use vimvaders_buffer::Position;

use crate::host::OverlaySink;
use crate::mode::ModeKind;

/// Notifications the overlay can receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Mode changed, with an optional floating label
    ModeChanged(ModeKind, Option<String>),
    /// Command line text changed
    CommandBufferChanged(String),
    /// Cursor moved
    CursorMoved(Position),
    /// A selection was deleted
    WordDeleted(String),
    /// A line's text changed
    LineChanged(usize, String),
    /// New page loaded
    DocumentReplaced(Vec<String>),
    /// Transient label
    Effect(String),
    /// Window flash
    Flash,
}

/// Event bus for broadcasting overlay events.
pub struct EventBus {
    sender: broadcast::Sender<OverlayEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        // Capacity of 256 events in the buffer
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: OverlayEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<OverlayEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl OverlaySink for EventBus {
    fn on_mode_change(&mut self, mode: ModeKind, label: Option<&str>) {
        self.emit(OverlayEvent::ModeChanged(mode, label.map(str::to_string)));
    }

    fn on_command_buffer_change(&mut self, text: &str) {
        self.emit(OverlayEvent::CommandBufferChanged(text.to_string()));
    }

    fn on_cursor_move(&mut self, position: Position) {
        self.emit(OverlayEvent::CursorMoved(position));
    }

    fn on_word_deleted(&mut self, text: &str) {
        self.emit(OverlayEvent::WordDeleted(text.to_string()));
    }

    fn on_line_changed(&mut self, line: usize, text: &str) {
        self.emit(OverlayEvent::LineChanged(line, text.to_string()));
    }

    fn on_document_replaced(&mut self, lines: &[String]) {
        self.emit(OverlayEvent::DocumentReplaced(lines.to_vec()));
    }

    fn on_effect(&mut self, label: &str) {
        self.emit(OverlayEvent::Effect(label.to_string()));
    }

    fn on_flash(&mut self) {
        self.emit(OverlayEvent::Flash);
    }
}

/// Helper for reading events asynchronously.
///
/// ```ignore
/// let mut handler = EventHandler::new(bus.subscribe());
///
/// tokio::spawn(async move {
///     while let Some(event) = handler.next().await {
///         if let OverlayEvent::Flash = event {
///             // draw the flash
///         }
///     }
/// });
/// ```
pub struct EventHandler {
    receiver: broadcast::Receiver<OverlayEvent>,
}

impl EventHandler {
    /// Creates a new event handler.
    pub fn new(receiver: broadcast::Receiver<OverlayEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next event.
    pub async fn next(&mut self) -> Option<OverlayEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Overlay event handler lagged, missed {} events", n);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next event if one is already waiting.
    pub fn try_next(&mut self) -> Option<OverlayEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!("Overlay event handler lagged, missed {} events", n);
                    continue;
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(OverlayEvent::Flash);

        let event = rx.recv().await.unwrap();
        assert_eq!(event, OverlayEvent::Flash);
    }

    #[tokio::test]
    async fn test_sink_forwards_to_subscribers() {
        let mut bus = EventBus::new();
        let mut first = EventHandler::new(bus.subscribe());
        let mut second = EventHandler::new(bus.subscribe());

        bus.on_mode_change(ModeKind::Visual, Some("visual-mode"));
        bus.on_cursor_move(Position::new(0, 4));

        for handler in [&mut first, &mut second] {
            assert_eq!(
                handler.next().await,
                Some(OverlayEvent::ModeChanged(
                    ModeKind::Visual,
                    Some("visual-mode".to_string())
                ))
            );
            assert_eq!(
                handler.next().await,
                Some(OverlayEvent::CursorMoved(Position::new(0, 4)))
            );
        }
    }

    #[test]
    fn test_emit_without_receivers() {
        let mut bus = EventBus::new();
        bus.on_flash();

        let mut late = EventHandler::new(bus.subscribe());
        assert_eq!(late.try_next(), None);
    }
}
