pub mod document;
pub mod geo;
pub mod permission;
pub mod shift;
