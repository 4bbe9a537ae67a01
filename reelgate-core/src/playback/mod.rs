//! Turning playback requests into player URLs.

mod resolver;

pub use resolver::{
    DEFAULT_EPISODE, DEFAULT_SEASON, Placeholder, missing_placeholders,
    placeholders, resolve,
};
