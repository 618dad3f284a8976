//! In-memory manifest transformations.
//!
//! Every stage mutates a [`crate::types::DataSet`] in place and is free of I/O. The pipeline
//! ([`crate::pipeline`]) runs them in this order:
//!
//! 1. [`drop_empty_rows`]: discard rows whose every cell is null
//! 2. [`rename_columns`]: apply the variant's [`crate::headers::HeaderMap`]
//! 3. [`normalize`]: trim text, normalize nulls, map directions, fill ship/voyage defaults
//! 4. [`apply_coercions`]: best-effort numeric coercion (CSV variant)
//! 5. [`drop_columns`]: prune sensitive fields
//! 6. [`stamp`]: append provenance metadata
//!
//! ## Example
//!
//! ```rust
//! use manifest_flatten::headers::{HeaderMap, EXCEL_HEADERS};
//! use manifest_flatten::processing::{drop_empty_rows, normalize, rename_columns};
//! use manifest_flatten::types::{DataSet, Value};
//!
//! let mut ds = DataSet::new(
//!     vec!["Судно".to_string(), "Направление".to_string()],
//!     vec![
//!         vec![Value::text("  Ship A  "), Value::text("экспорт")],
//!         vec![Value::Null, Value::Null],
//!     ],
//! );
//!
//! let map = HeaderMap::new(EXCEL_HEADERS.iter().copied()).unwrap();
//! drop_empty_rows(&mut ds);
//! rename_columns(&mut ds, &map).unwrap();
//! normalize(&mut ds);
//!
//! assert_eq!(ds.columns, vec!["ship_name", "direction"]);
//! assert_eq!(ds.rows, vec![vec![Value::text("Ship A"), Value::text("export")]]);
//! ```

pub mod coerce;
pub mod filter;
pub mod normalize;
pub mod prune;
pub mod rename;
pub mod stamp;

pub use coerce::{apply_coercions, Coerced, Coercion, CoercionWarning};
pub use filter::{drop_empty_rows, retain_non_empty_rows};
pub use normalize::normalize;
pub use prune::drop_columns;
pub use rename::rename_columns;
pub use stamp::{stamp, ProvenanceMetadata};
