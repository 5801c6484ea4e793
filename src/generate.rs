pub(crate) mod config;
pub(crate) mod gemini;
pub(crate) mod prompt;
pub(crate) mod service;
