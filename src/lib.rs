//! French personal income tax estimation.
//!
//! [`tax::compute_tax`] turns a snapshot of income and donation records into a
//! [`tax::TaxComputationResult`]. The engine does no I/O; [`records`] reads the
//! snapshots and [`money`] formats amounts for display.

pub mod money;
pub mod records;
pub mod tax;
