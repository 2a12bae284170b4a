//! Statement export backends
//!
//! CSV and PDF renderers over [`milkweb_core::Statement`], kept behind
//! narrow functions so the aggregator and summary calculator stay
//! decoupled from the output libraries.

pub mod csv;
pub mod error;
pub mod pdf;

pub use crate::csv::statement_csv;
pub use crate::pdf::statement_pdf;
pub use error::ExportError;

use milkweb_core::StatementFilter;

/// Download file name for a statement export
///
/// Follows the `account-statement-<from>-to-<to>.<ext>` convention.
pub fn statement_filename(filter: &StatementFilter, extension: &str) -> String {
    format!(
        "account-statement-{}-to-{}.{}",
        filter.date_from, filter.date_to, extension
    )
}
