//! Comparison statistics for predictions returned by a modeling service:
//! agreement between two confidence maps, per-class support vectors, and
//! column extraction from CSV tables.

pub use bbrc_helpers::{ErrorKind, Label, Occurrence, StatsError, Value};

pub use agreement::{common_fraction_kv, correct_sign_fraction};
pub use support::{
    relative_support, relative_support_difference, relative_support_with, Normalization,
};
pub use table::{column, parse_table, CsvFormat, Row, Table, TableError};
