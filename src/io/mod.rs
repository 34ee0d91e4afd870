//! Instance file formats.
//!
//! - [`common`]: sectioned CSV-like single file (NODES/ARCS/COMMODITIES, plus
//!   an optional solution), read and written
//! - [`directory`]: four CSV files with per-commodity variable costs, read only
//! - [`tsp`]: TSP with time windows, converted to a pickup/delivery commodity
//!   set, read only

pub mod common;
pub mod directory;
mod record;
pub mod tsp;

pub use common::{format_common, parse_common, read_common, save_common, write_common};
pub use directory::read_directory;
pub use tsp::{parse_tsp, read_tsp};
