mod handler;

pub use handler::{KeyAction, map_key};
