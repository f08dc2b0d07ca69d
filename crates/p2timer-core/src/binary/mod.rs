mod cursor;
mod writer;

pub use cursor::{ByteCursor, decode_text, trim_nulls};
pub use writer::ByteWriter;
