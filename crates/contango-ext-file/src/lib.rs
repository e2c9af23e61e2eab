//! # Contango Ext File
//!
//! Delimited-file boundary for the Contango term structure library.
//!
//! This crate is the only part of Contango that touches the filesystem:
//! - Snapshot discovery in directories of `YYYY-MM-DD.csv` contract files
//! - CSV readers for contract price tables and index series
//! - CSV writers for aggregate matrices, change tables and distributions
//! - The directory combiner, reading snapshots lazily newest first

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod prices;
mod sheet;
mod snapshots;
mod tables;

pub use error::{FileError, FileResult};
pub use prices::{read_price_series, read_price_table, CLOSE, SETTLE};
pub use sheet::TRADE_DATE;
pub use snapshots::{
    combine_directory, discover_snapshots, parse_snapshot_name, snapshot_is_complete,
    snapshot_path, SnapshotFile,
};
pub use tables::{read_matrix, write_change_table, write_distribution, write_matrix};
