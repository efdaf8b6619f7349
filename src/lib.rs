//! Tabs – typed columns over fixed-width integer rows.
//!
//! Every column of a [`table::Table`] declares a *value type*. A value type
//! knows how to parse text into a compact [`valuetype::Code`] (a `u64`),
//! emit a code back as text, and tell whether a code is well-formed. Rows are
//! therefore uniform vectors of codes no matter what the columns hold, with
//! code `0` doubling as the empty value wherever a type accepts one.
//!
//! ## Modules
//! * [`valuetype`] – The [`valuetype::ValueType`] contract plus the simple
//!   variants: empty, default (constant), time and dotted version.
//! * [`enumeration`] – The self-interning enumeration, whose codes are handed
//!   out on first sight of a label until the enumeration is completed.
//! * [`screen`] – Regex pre-validation in front of any value type.
//! * [`registry`] – Name to value type mapping, explicit or process-wide.
//! * [`table`] – Columns and append-only rows.
//! * [`settings`] – Declaring value types from a configuration file.
//!
//! ## Quick Start
//! ```
//! use tabs::registry::{new_enum, new_version};
//! use tabs::table::Table;
//! use tabs::valuetype::ValueType;
//!
//! let answer = new_enum("quickstart_answer", &["yes", "no"]);
//! let build = new_version("quickstart_build");
//! assert_eq!(answer.parse("no").unwrap(), 2);
//!
//! let mut table = Table::new("releases");
//! table.add_column("answer", answer).unwrap();
//! table.add_column("build", build).unwrap();
//! let row = table.append_row_text(&["maybe", ".20.1.0.13623"]).unwrap();
//! assert_eq!(table.row(row).unwrap(), &[3, 201013623]);
//! assert_eq!(table.row_text(row).unwrap(), vec!["maybe", "20.1.0.13623"]);
//! ```
//!
//! ## Lifecycle
//! Value types are created eagerly, registered once and live for the rest of
//! the process. Registering a name twice is a configuration mistake and
//! aborts. Enumerations only ever grow, and stop growing once completed.

pub mod enumeration;
pub mod error;
pub mod registry;
pub mod screen;
pub mod settings;
pub mod table;
pub mod valuetype;
