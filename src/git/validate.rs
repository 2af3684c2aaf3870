//! Working-tree probe.

use std::path::Path;

use super::GIT;
use crate::ports::command::{argv, CommandRunner};

/// Returns `true` if `path` is inside a git working tree.
///
/// Runs `git rev-parse --is-inside-work-tree` in `path` and accepts only the
/// literal answer `true`. A missing path, a missing `git`, or a bare
/// repository all yield `false`.
pub fn is_valid_repository(runner: &dyn CommandRunner, path: &Path) -> bool {
    match runner.run(&argv(&[GIT, "rev-parse", "--is-inside-work-tree"]), path) {
        Ok(out) => out == "true",
        Err(e) => {
            log::debug!("{} is not a working tree: {e}", path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::{ScriptedRunner, VALIDATE};
    use crate::ports::CommandError;

    #[test]
    fn accepts_literal_true() {
        let runner = ScriptedRunner::new().ok(VALIDATE, "true");
        assert!(is_valid_repository(&runner, Path::new("/repo")));
        assert_eq!(runner.cwds(), vec![Path::new("/repo").to_path_buf()]);
    }

    #[test]
    fn rejects_any_other_answer() {
        let runner = ScriptedRunner::new().ok(VALIDATE, "false");
        assert!(!is_valid_repository(&runner, Path::new("/repo/.git")));
    }

    #[test]
    fn rejects_on_command_failure() {
        let runner = ScriptedRunner::new()
            .err(VALIDATE, CommandError::NotFound { program: "git".into() });
        assert!(!is_valid_repository(&runner, Path::new("/repo")));
    }
}
