// Module naming follows project convention (Ring = the record ring and its sessions)
#[allow(non_snake_case)]
pub mod Ring;

#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
pub mod Debug;

pub mod ffi;

pub use Core::{ChannelError, Module, Registry};
pub use Ring::Buffer::RingChannel;
pub use Ring::Structs::{AccessMode, Consumed};
pub use Ring::{ChannelBuilder, Session};
