//! Live command runner using `std::process::Command`.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use crate::ports::command::{CommandError, CommandRunner};

/// Live command runner that spawns real processes.
///
/// Arguments are handed to the OS as-is; no shell is involved.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveCommandRunner;

impl CommandRunner for LiveCommandRunner {
    fn run(&self, argv: &[String], cwd: &Path) -> Result<String, CommandError> {
        let Some((program, args)) = argv.split_first() else {
            return Err(CommandError::InvalidArguments {
                program: String::new(),
                message: "empty argument vector".into(),
            });
        };
        if !cwd.is_dir() {
            return Err(CommandError::Fault {
                program: program.clone(),
                message: format!("working directory {} does not exist", cwd.display()),
            });
        }

        log::debug!("running {argv:?} in {}", cwd.display());
        let output =
            Command::new(program).args(args).current_dir(cwd).output().map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    CommandError::NotFound { program: program.clone() }
                } else {
                    CommandError::Fault { program: program.clone(), message: e.to_string() }
                }
            })?;

        if !output.status.success() {
            return Err(CommandError::NonZeroExit {
                program: program.clone(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| CommandError::Fault {
            program: program.clone(),
            message: format!("output is not valid UTF-8: {e}"),
        })?;
        Ok(stdout.trim().to_string())
    }
}
