pub mod error;
pub mod label;
pub mod logical_type;
pub mod mapping;
pub mod options;

pub use error::{Result, TabprepError};
pub use label::ColumnLabel;
pub use logical_type::LogicalType;
pub use mapping::{MappingEntry, NameMapping};
pub use options::{CleanOptions, ProfileOptions, RESERVED_LABELS};
