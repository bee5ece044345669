//! Bridge from table callbacks to the frame loop.
//!
//! Callbacks fire inside table operations, where the app state is already
//! borrowed, so they only enqueue events that the coordinator drains once
//! per frame.

use mltable::{DeleteRequest, NodeId, TableCallbacks};
use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    RowClicked(NodeId),
    EditRequested(NodeId),
    DeleteRequested(DeleteRequest),
    SelectionChanged { count: usize, all_selected: bool },
}

pub struct TableEvents {
    sender: Sender<TableEvent>,
    receiver: Receiver<TableEvent>,
}

impl TableEvents {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Callbacks that forward into this queue.
    pub fn callbacks(&self) -> TableCallbacks {
        let row_tx = self.sender.clone();
        let edit_tx = self.sender.clone();
        let delete_tx = self.sender.clone();
        let selection_tx = self.sender.clone();

        TableCallbacks::new()
            .on_row_click(move |node| {
                let _ = row_tx.send(TableEvent::RowClicked(node.id.clone()));
            })
            .on_edit_request(move |node| {
                let _ = edit_tx.send(TableEvent::EditRequested(node.id.clone()));
            })
            .on_delete_request(move |request| {
                let _ = delete_tx.send(TableEvent::DeleteRequested(request.clone()));
            })
            .on_selection_change(move |snapshot| {
                let _ = selection_tx.send(TableEvent::SelectionChanged {
                    count: snapshot.selected.len(),
                    all_selected: snapshot.is_all_selected,
                });
            })
    }

    /// Takes every queued event.
    pub fn drain(&self) -> Vec<TableEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Default for TableEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mltable::{Column, MultiLevelTable, Node, TableConfig};

    #[test]
    fn test_callbacks_enqueue_in_order() {
        let events = TableEvents::new();
        let mut table = MultiLevelTable::new(vec![Column::new("name", "Name")], TableConfig::default())
            .with_dataset(vec![Node::new(1).with_field("name", "a")])
            .with_callbacks(events.callbacks());

        table.row_click(&NodeId::from(1));
        table.request_edit(&NodeId::from(1));
        table.toggle_selection(&NodeId::from(1));

        assert_eq!(
            events.drain(),
            vec![
                TableEvent::RowClicked(NodeId::from(1)),
                TableEvent::EditRequested(NodeId::from(1)),
                TableEvent::SelectionChanged { count: 1, all_selected: true },
            ]
        );
        assert!(events.drain().is_empty());
    }
}
