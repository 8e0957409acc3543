pub mod avc;
pub mod commands;
pub mod runtime;
pub mod version;
