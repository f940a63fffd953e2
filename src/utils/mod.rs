pub mod path;

pub use path::sanitize_key;
