pub mod patch;
pub mod reducer;
pub mod store;

pub use patch::StatePatch;
pub use reducer::reduce;
pub use store::{AppStore, Subscription};
