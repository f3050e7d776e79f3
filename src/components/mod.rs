//! Reusable view components.

pub mod topology;
