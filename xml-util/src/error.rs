//! Error types for xml-util

pub use xml_engine_traits::error::{Error, Result};
