//! Channel between the input thread and the tick loop.
//!
//! The reader side produces [`InputEvent`]s; the tick loop drains everything
//! queued at the start of a tick into a [`KeySink`], so key state only changes
//! between steps.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

use crate::core::KeySink;
use crate::types::KeyKind;

/// Queue depth; a tick drains far fewer events than this.
pub const QUEUE_CAPACITY: usize = 64;

/// A logical key going down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub key: KeyKind,
    pub pressed: bool,
}

impl KeyTransition {
    pub fn down(key: KeyKind) -> Self {
        Self { key, pressed: true }
    }

    pub fn up(key: KeyKind) -> Self {
        Self {
            key,
            pressed: false,
        }
    }

    /// Apply to a sink.
    pub fn apply<K: KeySink + ?Sized>(self, sink: &mut K) {
        if self.pressed {
            sink.key_down(self.key);
        } else {
            sink.key_up(self.key);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyTransition),
    Quit,
}

/// Result of draining the queue once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drained {
    /// Key transitions applied to the sink.
    pub applied: usize,
    pub quit: bool,
    /// The producer has gone away.
    pub disconnected: bool,
}

/// Producer half, owned by the input thread.
#[derive(Debug, Clone)]
pub struct KeySender {
    tx: Sender<InputEvent>,
}

impl KeySender {
    /// Queue an event. Returns false once the tick loop has gone away.
    ///
    /// A full queue drops the event rather than blocking the reader.
    pub fn send(&self, event: InputEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                log::warn!("input queue full, dropping {dropped:?}");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn key(&self, transition: KeyTransition) -> bool {
        self.send(InputEvent::Key(transition))
    }
}

/// Consumer half, owned by the tick loop.
#[derive(Debug)]
pub struct KeyQueue {
    rx: Receiver<InputEvent>,
}

impl KeyQueue {
    /// Apply every queued transition to `sink` without blocking.
    ///
    /// Stops at a quit request; transitions queued after it stay queued.
    pub fn drain_into<K: KeySink + ?Sized>(&self, sink: &mut K) -> Drained {
        let mut out = Drained::default();
        loop {
            match self.rx.try_recv() {
                Ok(InputEvent::Key(t)) => {
                    t.apply(sink);
                    out.applied += 1;
                }
                Ok(InputEvent::Quit) => {
                    out.quit = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    out.disconnected = true;
                    break;
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// Create a connected sender/queue pair.
pub fn channel() -> (KeySender, KeyQueue) {
    let (tx, rx) = bounded(QUEUE_CAPACITY);
    (KeySender { tx }, KeyQueue { rx })
}
