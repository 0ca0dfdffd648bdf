pub mod json;

use crate::app::Result;
use crate::domain::SeenSet;

pub use json::JsonSeenStore;

pub trait SeenStore {
    /// Never fails: unreadable state is replaced by an empty set.
    fn load(&self) -> SeenSet;
    fn save(&self, seen: &SeenSet) -> Result<()>;
}
