//! Per-file change records reconciled from numstat and name-status output.
//!
//! The two queries describe the same commit in different shapes:
//!
//! ```text
//! --numstat        12\t3\tsrc/lib.rs          (added, deleted, path)
//!                  -\t-\tlogo.png             (binary: counts unknown)
//! --name-status    M\tsrc/lib.rs              (code, path)
//!                  R087\told.rs\tnew.rs       (code+score, from, to)
//! ```
//!
//! Each query contributes the fields it knows to a [`ChangeRecord`] keyed by
//! path; whatever a query does not mention keeps its zero value.
//!
//! Numstat writes renames as `old => new` or `dir/{old => new}/file`. That
//! notation is only resolved when name-status reports the resulting path as
//! a rename or copy destination; otherwise ` => ` is part of a real filename.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a file changed between a commit and its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// New file (also used for copies).
    Added,
    /// Content or type change.
    Modified,
    /// File removed.
    Deleted,
    /// File moved; recorded under its destination path.
    Renamed,
    /// Not classified by name-status.
    #[default]
    Unknown,
}

impl ChangeKind {
    /// Maps a name-status code letter to a kind.
    ///
    /// `T` (type change) reads as modified and `C` (copy) as added.
    /// Codes outside `AMDTRC` have no kind.
    #[must_use]
    pub fn from_status_code(code: char) -> Option<Self> {
        match code {
            'A' | 'C' => Some(Self::Added),
            'M' | 'T' => Some(Self::Modified),
            'D' => Some(Self::Deleted),
            'R' => Some(Self::Renamed),
            _ => None,
        }
    }

    /// The kind shown in reports: an unclassified file is shown as modified.
    #[must_use]
    pub fn for_display(self) -> Self {
        match self {
            Self::Unknown => Self::Modified,
            other => other,
        }
    }

    /// Lowercase name used in rendered reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Everything known about one path touched by a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Repository-relative path.
    pub path: String,
    /// Lines added; 0 for binary or unmeasured files.
    pub lines_added: u64,
    /// Lines deleted; 0 for binary or unmeasured files.
    pub lines_deleted: u64,
    /// Classification from name-status, `Unknown` if none was given.
    pub change_kind: ChangeKind,
}

impl ChangeRecord {
    /// A record with zero counts and an unknown kind.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lines_added: 0,
            lines_deleted: 0,
            change_kind: ChangeKind::Unknown,
        }
    }
}

/// One parsed numstat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCounts<'a> {
    /// Path exactly as numstat printed it, rename notation included.
    pub path: &'a str,
    /// Lines added.
    pub added: u64,
    /// Lines deleted.
    pub deleted: u64,
}

/// One parsed name-status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Path the kind applies to (destination path for renames and copies).
    pub path: &'a str,
    /// Source path of a rename or copy.
    pub from: Option<&'a str>,
    /// Mapped change kind.
    pub kind: ChangeKind,
}

/// Parses `added\tdeleted\tpath`. Returns `None` for anything else.
///
/// The `-` placeholder git prints for binary files counts as 0. A count
/// that is neither a number nor `-` makes the line malformed.
#[must_use]
pub fn parse_numstat_line(line: &str) -> Option<LineCounts<'_>> {
    let mut fields = line.split('\t');
    let (added, deleted, path) = (fields.next()?, fields.next()?, fields.next()?);
    if fields.next().is_some() || path.is_empty() {
        return None;
    }
    Some(LineCounts {
        path,
        added: parse_count(added)?,
        deleted: parse_count(deleted)?,
    })
}

fn parse_count(field: &str) -> Option<u64> {
    if field == "-" {
        Some(0)
    } else {
        field.parse().ok()
    }
}

/// Reads numstat's rename notation as a destination path.
///
/// `old => new` becomes `new`; `dir/{old => new}/file` becomes
/// `dir/new/file`. `None` when `path` has no arrow.
fn rename_destination(path: &str) -> Option<Cow<'_, str>> {
    if let (Some(open), Some(close)) = (path.find('{'), path.rfind('}')) {
        if open < close {
            if let Some((_, to)) = path[open + 1..close].split_once(" => ") {
                let joined = format!("{}{}{}", &path[..open], to, &path[close + 1..]);
                return Some(Cow::Owned(joined.replace("//", "/")));
            }
        }
    }
    path.split_once(" => ").map(|(_, to)| Cow::Borrowed(to))
}

/// The key numstat counts for `path` are stored under: the rename
/// destination when name-status confirms it, the literal path otherwise.
fn numstat_key<'a>(path: &'a str, destinations: &BTreeSet<&str>) -> Cow<'a, str> {
    match rename_destination(path) {
        Some(to) if destinations.contains(&*to) => to,
        _ => Cow::Borrowed(path),
    }
}

/// Parses `<code>\t<path>` or `<code>\t<from>\t<to>`. Returns `None` for
/// unknown codes and for lines missing the path field their code needs.
#[must_use]
pub fn parse_name_status_line(line: &str) -> Option<Classification<'_>> {
    let fields: Vec<&str> = line.split('\t').collect();
    let code = fields.first()?.chars().next()?;
    let kind = ChangeKind::from_status_code(code)?;
    let (path, from) = match code {
        'R' | 'C' => (*fields.get(2)?, Some(*fields.get(1)?)),
        _ => (*fields.get(1)?, None),
    };
    if path.is_empty() {
        return None;
    }
    Some(Classification { path, from, kind })
}

/// All change records of one commit, keyed by path.
///
/// Iteration is in ascending byte order of the path, whatever order the
/// queries reported paths in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    records: BTreeMap<String, ChangeRecord>,
}

impl ChangeSet {
    /// An empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles both query outputs. Either may be absent (command failed).
    #[must_use]
    pub fn from_queries(numstat: Option<&str>, name_status: Option<&str>) -> Self {
        let classes = name_status.map(parse_name_status).unwrap_or_default();
        let destinations: BTreeSet<&str> =
            classes.iter().filter(|c| c.from.is_some()).map(|c| c.path).collect();

        let mut set = Self::new();
        if let Some(text) = numstat {
            set.apply_numstat(text, &destinations);
        }
        set.apply_classifications(&classes);
        set
    }

    /// The record for `path`, created with zero values if absent.
    pub fn upsert(&mut self, path: &str) -> &mut ChangeRecord {
        self.records.entry(path.to_string()).or_insert_with(|| ChangeRecord::new(path))
    }

    /// Merges line counts from numstat output. Malformed lines are skipped;
    /// a path listed twice keeps the later counts. Rename notation resolves
    /// only to paths in `destinations`.
    fn apply_numstat(&mut self, text: &str, destinations: &BTreeSet<&str>) {
        for line in non_empty_lines(text) {
            let Some(counts) = parse_numstat_line(line) else {
                log::trace!("skipping numstat line {line:?}");
                continue;
            };
            let record = self.upsert(&numstat_key(counts.path, destinations));
            record.lines_added = counts.added;
            record.lines_deleted = counts.deleted;
        }
    }

    /// Merges parsed name-status lines. A path keeps its first classification.
    fn apply_classifications(&mut self, classes: &[Classification<'_>]) {
        for class in classes {
            let record = self.upsert(class.path);
            if record.change_kind == ChangeKind::Unknown {
                record.change_kind = class.kind;
            } else {
                log::debug!(
                    "{} already classified as {}, ignoring {}",
                    class.path,
                    record.change_kind,
                    class.kind
                );
            }
        }
    }

    /// Records in ascending path order.
    pub fn records(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.values()
    }

    /// The record for `path`, if any query mentioned it.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ChangeRecord> {
        self.records.get(path)
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether neither query mentioned any path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses every name-status line, skipping malformed lines and unhandled codes.
fn parse_name_status(text: &str) -> Vec<Classification<'_>> {
    non_empty_lines(text)
        .filter_map(|line| {
            let class = parse_name_status_line(line);
            if class.is_none() {
                log::trace!("skipping name-status line {line:?}");
            }
            class
        })
        .collect()
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
