
#[cfg(feature="io_stream")]
pub mod io;

#[cfg(feature="io_stream")]
pub use io::stream::{Provider, StreamForwarder};
