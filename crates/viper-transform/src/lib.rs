pub mod dates;
pub mod disease;
pub mod history;
pub mod identifier;
pub mod normalize;
pub mod translate;

pub use dates::{age_in_years, format_display_date, parse_iso_date};
pub use disease::{OTHER_BUCKET, enrich_dose_groups, normalize_disease, overdue_diseases};
pub use history::parse_history;
pub use identifier::{BOARD_PREFIX, SCHOOL_PREFIX, synthesize_identifier};
pub use normalize::{NormalizedRow, POSTAL_NOT_PROVIDED, PhixProvenance, normalize_row};
pub use translate::Translator;
