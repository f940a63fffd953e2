pub mod classify;
pub mod document;
pub mod location;
pub mod retry;
pub mod shift;

pub use document::DocumentFetchVerifier;
pub use location::LocationCapture;
pub use retry::{RetryEngine, RetryOptions};
pub use shift::ShiftLifecycleController;
