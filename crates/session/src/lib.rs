//! Session store implementations for GameChat.

pub mod in_memory;

pub use in_memory::InMemorySessionStore;
