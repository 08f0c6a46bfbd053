use std::io::{self, Write};

use crate::arguments::{Command, Invocation};
use crate::error::BojtierError;
use crate::help::{self, Palette};

/// Carry out a resolved invocation.
///
/// `help` renders help text. The remaining commands print their resolved
/// parameters, one `key: value` line each.
pub fn run<W: Write>(invocation: &Invocation, out: &mut W, palette: &Palette) -> io::Result<()> {
    match invocation {
        Invocation::Help { topic: None } => help::write_general_help(out, palette),
        Invocation::Help { topic: Some(topic) } => match Command::from_word(topic) {
            Some(command) => help::write_command_help(out, command, palette),
            None => {
                write!(out, "{}: Unknown command '{}'.\n", palette.error(), topic)?;
                help::write_command_list(out, palette)
            }
        },
        _ => {
            for (key, value) in invocation.params() {
                write!(out, "{}: {}\n", key, value)?;
            }
            Ok(())
        }
    }
}

/// Error line followed by the help that fits the failure.
pub fn report<W: Write>(err: &BojtierError, out: &mut W, palette: &Palette) -> io::Result<()> {
    write!(out, "{}: {}\n", palette.error(), err)?;
    match err.command() {
        Some(command) => help::write_command_help(out, command, palette),
        None => help::write_command_list(out, palette),
    }
}
