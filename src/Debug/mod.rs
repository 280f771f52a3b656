pub mod StructDebug;
mod debug;
