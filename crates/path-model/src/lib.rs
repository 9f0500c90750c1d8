//! Mondrian Path Model
//!
//! Defines the data contracts for transcribed movement:
//! - **Point:** One timestamped sample in floor-plan pixel space
//! - **Path:** An ordered, time-sorted run of points plus stroke styling
//! - **PathStore:** The completed paths, the in-progress path and the export counter
//! - **PathTable:** The `time,x,y` rows a path is exported as
//!
//! Coordinates are in the reference floor plan's pixel space so exported
//! tables line up with the floor-plan image regardless of display size.

pub mod path;
pub mod store;
pub mod table;

pub use path::*;
pub use store::*;
pub use table::*;
