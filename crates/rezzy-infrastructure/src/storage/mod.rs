//! Session id storage backends.

mod memory;
mod session_file;

pub use memory::InMemorySessionStore;
pub use session_file::FileSessionStore;
