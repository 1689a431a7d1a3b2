//! Clap adapter for compiled flag sets.
//!
//! This module is the optional bridge between the framework-agnostic
//! [`FlagSet`] and the [clap](https://docs.rs/clap) argument parser. It is
//! compiled only when the `clap` Cargo feature is enabled (on by default).
//!
//! Two steps, matching how a parser consumes descriptors:
//!
//! 1. [`FlagSet::command`] registers each descriptor as a `--long` argument
//!    with its env name, help text, required/hidden markers, and default.
//! 2. [`FlagSet::apply_matches`] writes the parsed values back through the
//!    destination bindings. Boolean flags have no destination; read them
//!    with [`ArgMatches::get_flag`].
//!
//! ```ignore
//! let mut config = Config::default();
//! let mut flags = flagschema::compile(&mut config)?;
//! let matches = flags.command(Command::new("potato")).get_matches();
//! flags.apply_matches(&matches)?;
//! let skip = matches.get_flag("skip-migration");
//! ```

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::descriptor::{FlagDescriptor, FlagSet};
use crate::error::FlagSchemaError;
use crate::types::FlagKind;

impl FlagSet<'_> {
    /// Register every descriptor on `cmd`, in declaration order.
    pub fn command(&self, cmd: Command) -> Command {
        cmd.args(self.iter().enumerate().map(|(i, flag)| to_arg(flag, i)))
    }

    /// Write parsed values into the destinations. Flags the user did not
    /// supply (on the command line or through env) receive their default.
    pub fn apply_matches(&mut self, matches: &ArgMatches) -> Result<(), FlagSchemaError> {
        for flag in self.iter_mut().filter(|f| f.has_destination()) {
            let supplied = matches
                .try_get_one::<String>(flag.name())
                .ok()
                .flatten()
                .cloned();
            match supplied {
                Some(raw) => flag.assign(&raw)?,
                None => flag.apply_default()?,
            }
        }
        Ok(())
    }
}

fn to_arg(flag: &FlagDescriptor<'_>, order: usize) -> Arg {
    let arg = Arg::new(flag.name().to_string())
        .long(flag.name().to_string())
        .env(flag.env().to_string())
        .help(flag.usage().to_string())
        .required(flag.is_required())
        .hide(flag.is_hidden())
        .display_order(order);

    if flag.kind() == FlagKind::Bool {
        return arg.action(ArgAction::SetTrue);
    }

    let arg = arg
        .action(ArgAction::Set)
        .value_name(flag.kind().to_string().to_uppercase())
        .value_parser(clap::value_parser!(String));

    match flag.default().map(|d| d.to_string()) {
        Some(default) if !default.is_empty() => arg.default_value(default),
        _ => arg,
    }
}
