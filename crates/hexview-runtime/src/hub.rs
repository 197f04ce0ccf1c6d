#![forbid(unsafe_code)]

//! Typed publish/subscribe channel scoped to one viewer.
//!
//! Subscribers pick the [`Topic`]s they care about and get a
//! [`Subscription`] wrapping an `mpsc` receiver. Publishing never blocks;
//! senders whose receiver was dropped are pruned on the next publish.

use std::sync::mpsc;

use hexview_core::selection::SelectRange;

use crate::store::ViewerStatus;

/// Subject of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Cursor,
    Selection,
    Search,
    Status,
    Clipboard,
    Location,
}

/// Something observable happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    CursorMoved(Option<usize>),
    SelectionChanged(Option<SelectRange>),
    ResultsChanged { count: usize, selected: Option<usize> },
    StatusChanged(ViewerStatus),
    /// Text written to the clipboard by a copy.
    Copied(String),
    /// Share link written to the clipboard.
    LocationShared(String),
}

impl Message {
    #[must_use]
    pub const fn topic(&self) -> Topic {
        match self {
            Self::CursorMoved(_) => Topic::Cursor,
            Self::SelectionChanged(_) => Topic::Selection,
            Self::ResultsChanged { .. } => Topic::Search,
            Self::StatusChanged(_) => Topic::Status,
            Self::Copied(_) => Topic::Clipboard,
            Self::LocationShared(_) => Topic::Location,
        }
    }
}

/// Receiving end handed to a subscriber.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<Message>,
}

impl Subscription {
    /// Next pending message, if any.
    #[must_use]
    pub fn try_recv(&self) -> Option<Message> {
        self.receiver.try_recv().ok()
    }

    /// All pending messages.
    #[must_use]
    pub fn drain(&self) -> Vec<Message> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Debug)]
struct Subscriber {
    topics: Vec<Topic>,
    sender: mpsc::Sender<Message>,
}

#[derive(Debug, Default)]
pub struct Hub {
    subscribers: Vec<Subscriber>,
}

impl Hub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to `topics`. An empty slice listens to everything.
    #[must_use]
    pub fn subscribe(&mut self, topics: &[Topic]) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(Subscriber {
            topics: topics.to_vec(),
            sender,
        });
        Subscription { receiver }
    }

    /// Deliver `message` to every interested subscriber.
    pub fn publish(&mut self, message: Message) {
        let topic = message.topic();
        self.subscribers.retain(|sub| {
            if !sub.topics.is_empty() && !sub.topics.contains(&topic) {
                return true;
            }
            sub.sender.send(message.clone()).is_ok()
        });
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscriber; their receivers see a closed channel.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}
