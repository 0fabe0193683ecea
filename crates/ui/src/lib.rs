#![deny(unsafe_code)]

/// Nexo desktop shell.
///
/// Wraps the headless conversation controller from `nexo-chat` in gpui views and
/// wires it to the Gemini gateway from `nexo-llm`.
pub mod app;
/// Transcript, composer, ticket card and navigation views.
pub mod chat;
