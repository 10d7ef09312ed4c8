/// Command line options for the transform binary.
use crate::error::{Result, TransformError};
use crate::transform::TransformMode;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: c3d-reorient <input.c3d> [--mode y_to_x|y_to_z] [--overwrite] [--lenient] [--report]

  -m, --mode <name>   Rotation to apply (default y_to_x)
  -o, --overwrite     Replace the input file instead of writing modified_<name>
      --lenient       Treat unknown mode names as y_to_x instead of failing
      --report        Save <output>_transform.json next to the output
  -h, --help          Print this message

Log verbosity follows RUST_LOG (default: info).";

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub input: PathBuf,
    pub mode: TransformMode,
    pub overwrite: bool,
    pub report: bool,
}

/// Parse outcome: either options to run with, or a request for help.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(CliOptions),
    Help,
}

impl CliOptions {
    /// Parse arguments, program name excluded.
    pub fn parse<I>(args: I) -> Result<Command>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut input = None;
        let mut mode_name = None;
        let mut overwrite = false;
        let mut lenient = false;
        let mut report = false;

        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-o" | "--overwrite" => overwrite = true,
                "--lenient" => lenient = true,
                "--report" => report = true,
                "-m" | "--mode" => {
                    let value = args
                        .next()
                        .ok_or_else(|| TransformError::usage("--mode needs a value"))?;
                    mode_name = Some(value);
                }
                other if other.starts_with("--mode=") => {
                    mode_name = Some(other["--mode=".len()..].to_string());
                }
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(TransformError::usage(format!("unknown option '{other}'")));
                }
                _ if input.is_some() => {
                    return Err(TransformError::usage(
                        "only one input file can be transformed per run",
                    ));
                }
                path => input = Some(PathBuf::from(path)),
            }
        }

        let input = input.ok_or_else(|| TransformError::usage("missing input file"))?;
        let mode = match mode_name {
            None => TransformMode::default(),
            Some(name) if lenient => TransformMode::parse_or_default(&name),
            Some(name) => name.parse()?,
        };

        Ok(Command::Run(Self {
            input,
            mode,
            overwrite,
            report,
        }))
    }
}
