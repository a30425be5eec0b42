//! Data boundary: CSV loading and results export.

pub mod export;
pub mod load;

pub use export::{export_csv, write_csv};
pub use load::{LoadError, load_capex, load_overrides, load_rows, load_rows_from_path, load_wacc};
