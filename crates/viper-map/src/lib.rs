pub mod mapper;
pub mod score;

pub use mapper::{ColumnMapping, MappedTable, ensure_required, map_columns};
pub use score::{MATCH_THRESHOLD, normalize, partial_ratio, score};
