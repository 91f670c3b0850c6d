// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Stream elements carried through a pipeline's queue.
//!
//! End-of-stream is its own variant, so no value of `T` can be mistaken for it.

/// A value, or the marker saying no more values follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<T> {
    Item(T),
    EndOfStream,
}

impl<T> Message<T> {
    pub fn is_end(&self) -> bool {
        matches!(self, Message::EndOfStream)
    }

    /// The carried value, or `None` for the end marker.
    pub fn into_item(self) -> Option<T> {
        match self {
            Message::Item(item) => Some(item),
            Message::EndOfStream => None,
        }
    }
}

impl<T> From<T> for Message<T> {
    fn from(item: T) -> Self {
        Message::Item(item)
    }
}
