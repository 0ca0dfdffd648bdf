pub mod chunk;
pub mod entry;
pub mod seen;

pub use chunk::MessageChunk;
pub use entry::FeedEntry;
pub use seen::SeenSet;
