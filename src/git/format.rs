//! Report rendering.

use super::changes::{ChangeKind, ChangeSet};

/// Prefix applied to every line of the commit message body.
pub const BODY_INDENT: &str = "    ";

/// Renders one changed file as a single report line.
///
/// Implemented for any `Fn(&str, ChangeKind, u64, u64) -> String`, so a
/// closure can be handed to [`GitReporter::with_formatter`] directly.
///
/// [`GitReporter::with_formatter`]: super::GitReporter::with_formatter
pub trait LineFormatter: Send + Sync {
    /// Formats `path` with its (display) kind and line counts.
    fn format_line(&self, path: &str, kind: ChangeKind, added: u64, deleted: u64) -> String;
}

impl<F> LineFormatter for F
where
    F: Fn(&str, ChangeKind, u64, u64) -> String + Send + Sync,
{
    fn format_line(&self, path: &str, kind: ChangeKind, added: u64, deleted: u64) -> String {
        self(path, kind, added, deleted)
    }
}

/// `[path] [kind] +[added] -[deleted]`
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLineFormatter;

impl LineFormatter for DefaultLineFormatter {
    fn format_line(&self, path: &str, kind: ChangeKind, added: u64, deleted: u64) -> String {
        format!("[{path}] [{kind}] +[{added}] -[{deleted}]")
    }
}

/// Assembles a commit report.
///
/// Layout: the metadata block, a blank line, then (only when `body` is
/// present) every body line indented by [`BODY_INDENT`] followed by a blank
/// line, then one formatted line per change in path order. Unknown kinds
/// are passed to the formatter as modified.
#[must_use]
pub fn render_report(
    metadata: &str,
    body: Option<&str>,
    changes: &ChangeSet,
    formatter: &dyn LineFormatter,
) -> String {
    let mut lines: Vec<String> = vec![metadata.to_string(), String::new()];

    if let Some(body) = body {
        lines.extend(body.split('\n').map(|line| format!("{BODY_INDENT}{line}")));
        lines.push(String::new());
    }

    lines.extend(changes.records().map(|rec| {
        formatter.format_line(
            &rec.path,
            rec.change_kind.for_display(),
            rec.lines_added,
            rec.lines_deleted,
        )
    }));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = "commit abc123 (HEAD -> main)\nAuthor: Ada <ada@example.com>\nDate:   Mon Jan 1 00:00:00 2024 +0000";

    #[test]
    fn default_formatter_layout() {
        let line = DefaultLineFormatter.format_line("src/main.py", ChangeKind::Modified, 10, 2);
        assert_eq!(line, "[src/main.py] [modified] +[10] -[2]");
    }

    #[test]
    fn full_report_layout() {
        let changes = ChangeSet::from_queries(Some("3\t0\tb.txt\n1\t1\ta.txt"), Some("A\tb.txt"));
        let report =
            render_report(META, Some("Subject\n\nBody line"), &changes, &DefaultLineFormatter);

        let expected = format!(
            "{META}\n\n    Subject\n    \n    Body line\n\n[a.txt] [modified] +[1] -[1]\n[b.txt] [added] +[3] -[0]"
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn absent_body_renders_no_body_section() {
        let changes = ChangeSet::from_queries(Some("1\t0\tx.rs"), None);
        let report = render_report(META, None, &changes, &DefaultLineFormatter);
        assert_eq!(report, format!("{META}\n\n[x.rs] [modified] +[1] -[0]"));
    }

    #[test]
    fn empty_change_set_leaves_only_headers() {
        let report = render_report(META, Some("msg"), &ChangeSet::new(), &DefaultLineFormatter);
        assert_eq!(report, format!("{META}\n\n    msg\n"));
    }

    #[test]
    fn closures_are_formatters() {
        let changes = ChangeSet::from_queries(None, Some("D\told.rs"));
        let csv = |path: &str, kind: ChangeKind, added: u64, deleted: u64| {
            format!("{path},{kind},{added},{deleted}")
        };
        let report = render_report("meta", None, &changes, &csv);
        assert_eq!(report, "meta\n\nold.rs,deleted,0,0");
    }

    #[test]
    fn formatter_never_sees_unknown() {
        let changes = ChangeSet::from_queries(Some("1\t1\tq.rs"), None);
        let kinds = std::sync::Mutex::new(Vec::new());
        let spy = |_: &str, kind: ChangeKind, _: u64, _: u64| {
            kinds.lock().unwrap().push(kind);
            String::new()
        };
        let _ = render_report("meta", None, &changes, &spy);
        assert_eq!(*kinds.lock().unwrap(), vec![ChangeKind::Modified]);
    }
}
