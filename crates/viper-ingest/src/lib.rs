pub mod table;

pub use table::{RawTable, read_input};
