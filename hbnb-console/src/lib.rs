//! Command console for the HBNB object store.
//!
//! [`Console`] is the narrow entity API (create, show, destroy, all, update,
//! count) the shell calls into; [`Shell`] parses input lines into
//! [`Command`]s and prints results or user-facing error messages.

mod command;
mod console;
mod error;
mod shell;

pub use command::{Command, split_args};
pub use console::Console;
pub use error::{CommandError, CommandResult};
pub use shell::{Flow, PROMPT, Shell};
