//! Bounded FIFO hand-off between producers and the command loop.
//!
//! Any number of [`CommandSender`] clones feed exactly one [`CommandReceiver`].
//! `push` blocks while the queue is full; nothing is dropped or coalesced.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;

use thiserror::Error;

use crate::operation::Operation;

/// Default queue capacity.
pub const DEFAULT_CAPACITY: usize = 1 << 10;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("command queue is closed")]
    Closed,
}

/// What travels through the queue.
#[derive(Debug)]
pub(crate) enum Message {
    Operation(Operation),
    Shutdown,
}

/// Producer side of the command queue. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: SyncSender<Message>,
    closed: Arc<AtomicBool>,
}

/// Consumer side of the command queue, owned by the loop worker.
#[derive(Debug)]
pub(crate) struct CommandReceiver {
    rx: Receiver<Message>,
}

/// Create a queue holding at most `capacity` pending messages.
pub(crate) fn channel(capacity: usize) -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    let sender = CommandSender {
        tx,
        closed: Arc::new(AtomicBool::new(false)),
    };
    (sender, CommandReceiver { rx })
}

impl CommandSender {
    /// Enqueue an operation, blocking while the queue is at capacity.
    ///
    /// Fails once a shutdown has been requested or the consumer is gone.
    pub fn push(&self, op: Operation) -> Result<(), QueueError> {
        if self.is_closed() {
            return Err(QueueError::Closed);
        }
        self.tx
            .send(Message::Operation(op))
            .map_err(|_| QueueError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Refuse further pushes and enqueue the shutdown token behind whatever
    /// is already pending.
    pub(crate) fn close(&self) -> Result<(), QueueError> {
        self.closed.store(true, Ordering::Release);
        self.tx.send(Message::Shutdown).map_err(|_| QueueError::Closed)
    }

    /// Mark closed without sending a token (the consumer never ran).
    pub(crate) fn seal(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

impl CommandReceiver {
    /// Block until the next message arrives. `None` means every sender is gone.
    pub(crate) fn pull(&self) -> Option<Message> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn pull_op(rx: &CommandReceiver) -> Operation {
        match rx.pull() {
            Some(Message::Operation(op)) => op,
            other => panic!("expected operation, got {:?}", other),
        }
    }

    #[test]
    fn test_fifo_order() {
        let (tx, rx) = channel(8);
        tx.push(Operation::GreenFill).unwrap();
        tx.push(Operation::WhiteFill).unwrap();
        tx.push(Operation::Update).unwrap();
        assert_eq!(pull_op(&rx), Operation::GreenFill);
        assert_eq!(pull_op(&rx), Operation::WhiteFill);
        assert_eq!(pull_op(&rx), Operation::Update);
    }

    #[test]
    fn test_close_rejects_later_pushes() {
        let (tx, rx) = channel(8);
        let other = tx.clone();
        tx.push(Operation::Reset).unwrap();
        tx.close().unwrap();

        assert_eq!(other.push(Operation::Update), Err(QueueError::Closed));
        assert!(other.is_closed());
        assert_eq!(pull_op(&rx), Operation::Reset);
        assert!(matches!(rx.pull(), Some(Message::Shutdown)));
    }

    #[test]
    fn test_push_after_consumer_dropped() {
        let (tx, rx) = channel(1);
        drop(rx);
        assert_eq!(tx.push(Operation::Update), Err(QueueError::Closed));
    }

    #[test]
    fn test_full_queue_blocks_producer() {
        let (tx, rx) = channel(1);
        tx.push(Operation::WhiteFill).unwrap();

        let producer = thread::spawn(move || {
            // Blocks until the consumer frees the slot.
            tx.push(Operation::GreenFill).unwrap();
        });

        assert_eq!(pull_op(&rx), Operation::WhiteFill);
        assert_eq!(pull_op(&rx), Operation::GreenFill);
        producer.join().unwrap();
    }

    #[test]
    fn test_pull_reports_disconnect() {
        let (tx, rx) = channel(4);
        drop(tx);
        assert!(rx.pull().is_none());
    }
}
