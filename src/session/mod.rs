pub mod selector;
pub mod store;

pub use selector::{RegionSelector, SelectionMode, SelectionState};
pub use store::SessionStore;
