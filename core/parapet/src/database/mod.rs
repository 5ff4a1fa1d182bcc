mod connection;
mod pool;
mod tables;

pub mod queries;
pub mod reader;
pub mod types;
pub mod writer;

pub use reader::Reader;
pub use writer::Writer;
