//! A3S Operator CLI - component image resolution and manifest tooling.

pub mod commands;
pub mod output;
