pub mod boundary;
pub mod error;
pub mod module;
pub mod registry;

pub use boundary::{UserBuffer, UserSource};
pub use error::{ChannelError, Result};
pub use module::Module;
pub use registry::{ChannelEntry, Registry};
