use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::model::{Event, TableId};

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for table change notifications, one channel per table.
pub struct NotifyHub {
    channels: DashMap<TableId, broadcast::Sender<Event>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to changes of a table. Creates the channel if needed.
    pub fn subscribe(&self, table_id: TableId) -> broadcast::Receiver<Event> {
        let sender = self
            .channels
            .entry(table_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send a notification. No-op if nobody is listening.
    pub fn send(&self, table_id: &TableId, event: &Event) {
        if let Some(sender) = self.channels.get(table_id) {
            let _ = sender.send(event.clone());
        }
    }

    /// Drop a table's channel; open receivers see the stream close.
    pub fn remove(&self, table_id: &TableId) {
        self.channels.remove(table_id);
    }
}
