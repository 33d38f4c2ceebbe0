//! Utility functions shared by the picker.
//!
//! ## Modules
//!
//! - [`app_data`] - User configuration file (XDG-compliant location)
//! - [`width`] - Terminal column arithmetic for UTF-8 text
//!
//! ## Key Functions
//!
//! ```
//! use linepick::utils::{truncate_at_width, width_of};
//!
//! // Wide characters take two columns, tabs advance to the next stop
//! assert_eq!(width_of("a\t夢", 0), 10);
//!
//! // Cut at a column limit without splitting a code point
//! assert_eq!(truncate_at_width("ab夢", 3, 0), 2);
//! ```

pub mod app_data;
pub mod width;

pub use app_data::*;
pub use width::*;
