mod builder;
mod session;

pub use builder::{ChannelBuilder, DEFAULT_ENTRY_NAME};
pub use session::Session;

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub mod layout;
    pub use Buffer::RingChannel; // re-export for stable path
}

pub mod Structs {
    pub mod Buffer_Structs;
    pub use Buffer_Structs::{AccessMode, Consumed, Cursors, Permissions, ReadCursor}; // re-export for stable path
}
