//! # Roster Console
//!
//! Interactive numbered menu over the Roster database.
//!
//! - [`menu`] - the loop and one handler per entry
//! - [`prompt`] - re-prompting text and number input
//! - [`view`] - prettytable renderings of rows

pub mod menu;
pub mod prompt;
pub mod view;
