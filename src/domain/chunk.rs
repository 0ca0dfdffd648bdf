use std::fmt;

/// A numbered fragment of one entry's messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChunk {
    /// 1-based, per entry
    pub number: usize,
    pub payload: String,
}

impl MessageChunk {
    pub fn new(number: usize, payload: impl Into<String>) -> Self {
        Self {
            number,
            payload: payload.into(),
        }
    }

    /// Bytes taken by the "N: " prefix for a given number.
    pub fn prefix_len(number: usize) -> usize {
        number.to_string().len() + 2
    }

    /// Text handed to the transport.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MessageChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.number, self.payload)
    }
}
