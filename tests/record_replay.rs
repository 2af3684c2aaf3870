//! Record-replay integration tests.
//!
//! Reports replayed from a cassette must match what was recorded, and
//! repeated replays must match each other, without a `git` binary or the
//! original repository being present.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::json;

use ajapopaja::cassette::recorder::CassetteRecorder;
use ajapopaja::context::ServiceContext;
use ajapopaja::git::GitReporter;

const HEADER_FORMAT: &str = "--pretty=format:commit %H%d%nAuthor: %an <%ae>%nDate:   %ad";

fn record_run(recorder: &mut CassetteRecorder, argv: &[&str], result: serde_json::Value) {
    recorder.record("command", "run", json!({ "argv": argv, "cwd": "/project" }), result);
}

/// The command interactions a report on `c0ffee` performs, in order.
fn write_report_cassette(path: &Path) {
    let mut recorder = CassetteRecorder::new(path, "report-c0ffee", "/project");
    record_run(
        &mut recorder,
        &["git", "rev-parse", "--is-inside-work-tree"],
        json!({ "Ok": "true" }),
    );
    record_run(
        &mut recorder,
        &["git", "show", "--no-patch", "--date=default", HEADER_FORMAT, "c0ffee"],
        json!({ "Ok": "commit c0ffee (HEAD -> main)\nAuthor: Ada <ada@example.com>\nDate:   Sat Mar 15 14:30:00 2025 +0000" }),
    );
    record_run(
        &mut recorder,
        &["git", "show", "--no-patch", "--pretty=format:%B", "c0ffee"],
        json!({ "Ok": "Tidy parser\n\nSplit on tabs." }),
    );
    record_run(
        &mut recorder,
        &["git", "show", "--numstat", "--pretty=format:", "c0ffee"],
        json!({ "Ok": "4\t1\tsrc/parse.rs\n-\t-\tdocs/logo.png\n0\t0\tsrc/{old => new}.rs" }),
    );
    record_run(
        &mut recorder,
        &["git", "show", "--name-status", "--pretty=format:", "c0ffee"],
        json!({ "Err": {
            "kind": "non_zero_exit",
            "program": "git",
            "code": 128,
            "stdout": "",
            "stderr": "fatal: simulated"
        } }),
    );
    recorder.finish().expect("cassette should be written");
}

fn replay_report(cassette: &Path) -> String {
    let ctx = ServiceContext::replaying(cassette).unwrap();
    let reporter = GitReporter::new(ctx.command.as_ref(), Path::new("/project")).unwrap();
    reporter.generate_report("c0ffee")
}

#[test]
fn replayed_report_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("report.cassette.yaml");
    write_report_cassette(&cassette);

    let first = replay_report(&cassette);
    let second = replay_report(&cassette);
    assert_eq!(first, second, "determinism: replays differ");

    let expected = "commit c0ffee (HEAD -> main)\nAuthor: Ada <ada@example.com>\nDate:   Sat Mar 15 14:30:00 2025 +0000\n\n\
                    \x20   Tidy parser\n    \n    Split on tabs.\n\n\
                    [docs/logo.png] [modified] +[0] -[0]\n\
                    [src/parse.rs] [modified] +[4] -[1]\n\
                    [src/{old => new}.rs] [modified] +[0] -[0]";
    assert_eq!(first, expected);
}

#[test]
fn replay_rejects_a_different_command_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("report.cassette.yaml");
    write_report_cassette(&cassette);

    let ctx = ServiceContext::replaying(&cassette).unwrap();
    let reporter = GitReporter::new(ctx.command.as_ref(), Path::new("/project")).unwrap();
    // The cassette recorded a header query for c0ffee, not for HEAD.
    let report = reporter.generate_report("HEAD");
    assert!(report.starts_with("Could not generate report"));
}

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok_and(|o| o.status.success())
}

fn git(repo: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["-c", "user.name=Tester", "-c", "user.email=tester@example.com"])
        .args(args)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {args:?} failed");
}

fn run_binary(args: &[&str], env: (&str, &Path)) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ajapopaja"))
        .args(args)
        .env_remove("AJAPOPAJA_RECORD")
        .env_remove("AJAPOPAJA_REPLAY")
        .env(env.0, env.1)
        .output()
        .expect("failed to run ajapopaja binary")
}

fn only_entry(dir: &Path) -> PathBuf {
    let mut entries: Vec<PathBuf> =
        std::fs::read_dir(dir).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(entries.len(), 1, "expected one recording session in {}", dir.display());
    entries.remove(0)
}

#[test]
fn recorded_cli_report_replays_without_the_repository() {
    if !git_available() {
        return;
    }
    let repo = tempfile::tempdir().unwrap();
    git(repo.path(), &["init", "-q"]);
    std::fs::write(repo.path().join("notes.md"), "# Notes\n").unwrap();
    git(repo.path(), &["add", "."]);
    git(repo.path(), &["commit", "-q", "-m", "Start notes"]);
    let repo_path = repo.path().to_str().unwrap().to_string();
    let args = ["-C", repo_path.as_str(), "report"];

    let recordings = tempfile::tempdir().unwrap();
    let recorded = run_binary(&args, ("AJAPOPAJA_RECORD", recordings.path()));
    assert!(recorded.status.success(), "stderr: {}", String::from_utf8_lossy(&recorded.stderr));
    assert!(String::from_utf8_lossy(&recorded.stderr).contains("Recording saved to:"));

    let session = only_entry(recordings.path());
    let cassette = session.join("command.cassette.yaml");
    assert!(cassette.exists());

    drop(repo);

    let first = run_binary(&args, ("AJAPOPAJA_REPLAY", &cassette));
    let second = run_binary(&args, ("AJAPOPAJA_REPLAY", &cassette));
    assert!(first.status.success(), "stderr: {}", String::from_utf8_lossy(&first.stderr));
    assert_eq!(first.stdout, recorded.stdout, "replay differs from recording");
    assert_eq!(first.stdout, second.stdout, "determinism: replays differ");
    assert!(String::from_utf8_lossy(&first.stdout).contains("[notes.md] [added] +[1] -[0]"));
}
