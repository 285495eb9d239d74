// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `preadu`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `PreAdu`, `PreAdu::run`,
//! and `PreAduError`.

#[macro_use]
mod common;
mod board_layout;
mod configure;
mod decode;
mod error;
mod show;

pub(crate) use common::Warn;
pub use error::PreAduError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::{debug, info};

use common::display_warnings;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = "Inspect and configure the receivers of SKA-Low/AAVS PreADU boards"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct PreAdu {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information. No registers are written.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run. Only used by `configure`.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "status")]
    Show(show::ShowArgs),

    #[clap(alias = "set")]
    Configure(configure::ConfigureArgs),

    Decode(decode::DecodeArgs),

    #[clap(alias = "layout")]
    BoardLayout(board_layout::BoardLayoutArgs),
}

impl PreAdu {
    pub fn run(self) -> Result<(), PreAduError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity).map_err(|e| PreAduError::Generic(e.to_string()))?;

        // Print the version of preadu and its build-time information.
        let sub_command = match &self.command {
            Command::Show(_) => "show",
            Command::Configure(_) => "configure",
            Command::Decode(_) => "decode",
            Command::BoardLayout(_) => "board-layout",
        };
        info!("preadu {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        if save_toml.is_some() && !matches!(self.command, Command::Configure(_)) {
            format!("--save-toml is only used by configure; ignoring it for {sub_command}").warn();
        }

        match self.command {
            Command::Configure(args) => {
                let args = args.merge()?;
                if let Some(toml) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let mut f = BufWriter::new(File::create(toml)?);
                    let toml_str = toml::to_string(&args)?;
                    f.write_all(toml_str.as_bytes())?;
                    f.flush()?;
                }
                args.run(dry_run)?;
            }

            Command::Show(args) => args.run(dry_run)?,
            Command::Decode(args) => args.run()?,
            Command::BoardLayout(args) => args.run()?,
        }

        display_warnings();
        info!("preadu {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many debug-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            debug!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => debug!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        debug!("            git head ref: {}", hr);
    }
    debug!("            {}", BUILT_TIME_UTC);
    debug!("         with compiler {}", RUSTC_VERSION);
    debug!("");
}
