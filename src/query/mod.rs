//! SQL execution helpers.
//!
//! # Data Flow
//! ```text
//! handler
//!     → QueryTemplate::query(sql, mapper)
//!     → DataSource::connection()   (lazy handle resolves on first use)
//!     → fetch_all
//!     → mapper(ResultRow) per row, in result-set order
//!     → Vec<T>
//! ```
//!
//! # Design Decisions
//! - Mappers are plain closures over a column accessor
//! - The first mapping error aborts the whole query; no partial results

pub mod row;
pub mod template;

pub use row::ResultRow;
pub use template::QueryTemplate;
