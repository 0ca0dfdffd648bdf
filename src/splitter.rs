//! Word-wrapping of message text into size-bounded parts.

use crate::config::MAX_MESSAGE_BYTES;
use crate::domain::MessageChunk;

/// Greedily pack whitespace-separated tokens into parts of at most
/// `max_bytes` UTF-8 bytes.
///
/// Token order is preserved and parts are joined with single spaces. A token
/// that is longer than `max_bytes` on its own is emitted as a single oversize
/// part rather than being cut. Empty input yields no parts.
pub fn split(text: &str, max_bytes: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for token in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(token);
        } else if current.len() + 1 + token.len() <= max_bytes {
            current.push(' ');
            current.push_str(token);
        } else {
            parts.push(std::mem::take(&mut current));
            current.push_str(token);
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

/// Split `text` into chunks numbered from `start` whose rendered form
/// ("N: payload") stays within [`MAX_MESSAGE_BYTES`].
///
/// The prefix budget is sized for the widest number actually used, so a run
/// that crosses from 9 to 10 still fits.
pub fn split_numbered(text: &str, start: usize) -> Vec<MessageChunk> {
    let mut widest = start;

    loop {
        let budget = MAX_MESSAGE_BYTES.saturating_sub(MessageChunk::prefix_len(widest));
        let parts = split(text, budget);
        let last = start + parts.len().saturating_sub(1);

        if MessageChunk::prefix_len(last) <= MessageChunk::prefix_len(widest) {
            return parts
                .into_iter()
                .enumerate()
                .map(|(i, payload)| MessageChunk::new(start + i, payload))
                .collect();
        }

        widest = last;
    }
}
