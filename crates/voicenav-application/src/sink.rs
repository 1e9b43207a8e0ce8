//! Channel-backed event sink.

use tokio::sync::mpsc;

use voicenav_core::error::{NavError, Result};
use voicenav_core::event::{NavEvent, NavEventSink};

/// Forwards events into an unbounded tokio channel.
///
/// Sending never blocks; once the receiver is dropped every publish fails
/// with [`NavError::ChannelClosed`].
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    sender: mpsc::UnboundedSender<NavEvent>,
}

impl ChannelEventSink {
    pub fn new(sender: mpsc::UnboundedSender<NavEvent>) -> Self {
        Self { sender }
    }
}

impl NavEventSink for ChannelEventSink {
    fn publish(&self, event: NavEvent) -> Result<()> {
        self.sender.send(event).map_err(|_| NavError::ChannelClosed)
    }
}

/// Creates a sink together with the receiver its events arrive on.
pub fn event_channel() -> (ChannelEventSink, mpsc::UnboundedReceiver<NavEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ChannelEventSink::new(sender), receiver)
}

/// Drains everything currently buffered in `receiver`.
pub fn drain(receiver: &mut mpsc::UnboundedReceiver<NavEvent>) -> Vec<NavEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
