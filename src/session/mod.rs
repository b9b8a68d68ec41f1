mod filesystem;
mod memory;
mod storage;

pub use filesystem::FilesystemSessionStore;
pub use memory::MemorySessionStore;
pub use storage::SessionStore;
