pub mod artifact;
pub mod enums;
pub mod error;
pub mod record;
pub mod schema;
pub mod warnings;

pub use artifact::{ArtifactPayload, PreprocessResult};
pub use enums::{Language, TranslationDomain};
pub use error::{Result, ViperError};
pub use record::{Board, ClientRecord, Contact, DoseGroup, EnrichedDoseGroup, Person, School};
pub use schema::CanonicalColumn;
pub use warnings::WarningSet;
