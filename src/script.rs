//! Running an extracted shell script inside the repository.

use std::path::Path;

use crate::ports::command::{argv, CommandError, CommandRunner};

/// Default file name extracted scripts are saved under.
pub const EXEC_SCRIPT: &str = ".exec.sh";

/// Runs `bash <script_name>` with `repo_path` as the working directory and
/// returns its standard output.
///
/// The script name is passed as a single argument; nothing is interpreted
/// by a shell before `bash` sees it.
///
/// # Errors
///
/// Returns the [`CommandError`] unchanged. Failures are also logged with
/// their exit status and captured streams.
pub fn run_script(
    runner: &dyn CommandRunner,
    repo_path: &Path,
    script_name: &str,
) -> Result<String, CommandError> {
    let result = runner.run(&argv(&["bash", script_name]), repo_path);
    if let Err(e) = &result {
        match e {
            CommandError::NonZeroExit { code, stdout, stderr, .. } => {
                log::error!("script {script_name} failed with exit code {code:?}");
                if !stdout.trim().is_empty() {
                    log::error!("stdout:\n{}", stdout.trim());
                }
                if !stderr.trim().is_empty() {
                    log::error!("stderr:\n{}", stderr.trim());
                }
            }
            other => log::error!("could not run script {script_name}: {other}"),
        }
    }
    result
}
