//! Phase countdown display

pub mod reporter;
