//! CLI library components for the immunization record preprocessor.

pub mod logging;
