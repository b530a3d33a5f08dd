//! Semicolon-delimited task file
//!
//! The first record is a header naming the columns; every following non-blank
//! record is one task:
//!
//! ```text
//! TaskId;Project;Task;TimeRequired;TimeSpent;Progress;OtherDepartments;DependsOnTask
//! 1;Website;Wireframes;8;3;40;Design;
//! 2;Website;Build pages;16;0;0;;1
//! ```
//!
//! `OtherDepartments` and `DependsOnTask` hold space-separated lists.
//! `Progress` may be omitted from the header, in which case every task gets
//! `0`. Fields may be double-quoted to contain `;` or line breaks.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::debug;

use crate::domain::{IdError, Task, TaskId};

/// Columns every task file must have
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "TaskId",
    "Project",
    "Task",
    "TimeRequired",
    "TimeSpent",
    "OtherDepartments",
    "DependsOnTask",
];

const PROGRESS_COLUMN: &str = "Progress";
const DEFAULT_PROGRESS: &str = "0";
const DELIMITER: char = ';';

#[derive(Debug, Error, PartialEq)]
pub enum TaskFileError {
    #[error("Task file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file type: '{0}' (expected .csv)")]
    UnsupportedFormat(String),

    #[error("Task file has no header row")]
    MissingHeader,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Line {line}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    #[error("Line {line}: {source}")]
    InvalidId {
        line: usize,
        #[source]
        source: IdError,
    },

    #[error("Duplicate task ID '{id}' on line {line} (first defined on line {first_line})")]
    DuplicateId {
        id: TaskId,
        first_line: usize,
        line: usize,
    },
}

/// Positions of the known columns within a header
struct ColumnIndex {
    task_id: usize,
    project: usize,
    task: usize,
    time_required: usize,
    time_spent: usize,
    other_departments: usize,
    depends_on: usize,
    progress: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self, TaskFileError> {
        let position = |name: &str| header.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TaskFileError::MissingColumns(missing));
        }

        // All required columns were found above
        let required = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            task_id: required("TaskId"),
            project: required("Project"),
            task: required("Task"),
            time_required: required("TimeRequired"),
            time_spent: required("TimeSpent"),
            other_departments: required("OtherDepartments"),
            depends_on: required("DependsOnTask"),
            progress: position(PROGRESS_COLUMN),
        })
    }

    /// Number of fields a row needs to cover every required column
    fn required_len(&self) -> usize {
        [
            self.task_id,
            self.project,
            self.task,
            self.time_required,
            self.time_spent,
            self.other_departments,
            self.depends_on,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
            + 1
    }
}

/// Reader for a task file on disk
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    /// Creates a reader for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the task file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all tasks in file order
    pub fn read_all(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Err(TaskFileError::NotFound(self.path.clone()).into());
        }

        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => {}
            other => {
                let ext = other.map(|e| format!(".{}", e)).unwrap_or_default();
                return Err(TaskFileError::UnsupportedFormat(ext).into());
            }
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read task file: {}", self.path.display()))?;

        let tasks = parse_tasks(&content)
            .with_context(|| format!("Invalid task file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), tasks = tasks.len(), "loaded task file");
        Ok(tasks)
    }
}

/// Parses task file content
pub fn parse_tasks(content: &str) -> Result<Vec<Task>, TaskFileError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = split_records(content)?.into_iter();

    let (_, header) = records.next().ok_or(TaskFileError::MissingHeader)?;
    let columns = ColumnIndex::from_header(&header)?;
    let required_len = columns.required_len();

    let mut tasks = Vec::new();
    let mut seen: HashMap<TaskId, usize> = HashMap::new();

    for (line, fields) in records {
        if fields.len() < required_len {
            return Err(TaskFileError::MalformedRow {
                line,
                expected: required_len,
                found: fields.len(),
            });
        }

        let id: TaskId = fields[columns.task_id]
            .parse()
            .map_err(|source| TaskFileError::InvalidId { line, source })?;

        if let Some(&first_line) = seen.get(&id) {
            return Err(TaskFileError::DuplicateId {
                id,
                first_line,
                line,
            });
        }
        seen.insert(id.clone(), line);

        let progress = columns
            .progress
            .and_then(|i| fields.get(i))
            .map(String::as_str)
            .unwrap_or(DEFAULT_PROGRESS);

        tasks.push(Task {
            id,
            project: fields[columns.project].clone(),
            description: fields[columns.task].clone(),
            time_required: fields[columns.time_required].clone(),
            time_spent: fields[columns.time_spent].clone(),
            other_departments: split_list(&fields[columns.other_departments]),
            depends_on: split_list(&fields[columns.depends_on])
                .into_iter()
                .map(TaskId::new)
                .collect(),
            progress: progress.to_string(),
        });
    }

    Ok(tasks)
}

/// Splits content into records, each tagged with the line it starts on
///
/// Blank lines between records are skipped. A quoted field left open at the
/// end of a line continues on the next one.
fn split_records(content: &str) -> Result<Vec<(usize, Vec<String>)>, TaskFileError> {
    let mut records = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (i, line) in content.lines().enumerate() {
        let (start, text) = match pending.take() {
            Some((start, mut text)) => {
                text.push('\n');
                text.push_str(line);
                (start, text)
            }
            None if line.trim().is_empty() => continue,
            None => (i + 1, line.to_string()),
        };

        match split_record(&text) {
            Some(fields) => records.push((start, fields)),
            None => pending = Some((start, text)),
        }
    }

    if let Some((line, _)) = pending {
        return Err(TaskFileError::UnterminatedQuote { line });
    }
    Ok(records)
}

/// Splits one record into trimmed fields, honoring double quotes
///
/// Returns `None` if a quoted field is still open at the end of the text.
fn split_record(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.trim().is_empty() {
            field.clear();
            in_quotes = true;
        } else if c == DELIMITER {
            fields.push(field.trim().to_string());
            field.clear();
        } else {
            field.push(c);
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field.trim().to_string());
    Some(fields)
}

fn split_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str =
        "TaskId;Project;Task;TimeRequired;TimeSpent;Progress;OtherDepartments;DependsOnTask";

    #[test]
    fn parses_rows_in_file_order() {
        let content = format!(
            "{}\n{}\n{}\n{}\n",
            HEADER,
            "1;Website;Wireframes;8;3;40;Design;",
            "2;Website;Build pages;16;0;0;;1",
            "3;Ops;Deploy;2;0;0;QA Legal;1 2"
        );
        let tasks = parse_tasks(&content).unwrap();

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, TaskId::new("1"));
        assert_eq!(tasks[0].project, "Website");
        assert_eq!(tasks[0].description, "Wireframes");
        assert_eq!(tasks[0].progress, "40");
        assert_eq!(tasks[0].other_departments, vec!["Design"]);
        assert!(tasks[0].depends_on.is_empty());

        assert_eq!(tasks[2].other_departments, vec!["QA", "Legal"]);
        assert_eq!(tasks[2].depends_on, vec![TaskId::new("1"), TaskId::new("2")]);
    }

    #[test]
    fn header_with_spaces_and_other_order() {
        let content = concat!(
            "Project ; TaskId ; Task ; DependsOnTask ; ",
            "OtherDepartments ; TimeSpent ; TimeRequired\n",
            "Ops ; 7 ; Patch servers ;  ; ; 1 ; 2\n"
        );
        let tasks = parse_tasks(content).unwrap();

        assert_eq!(tasks[0].id, TaskId::new("7"));
        assert_eq!(tasks[0].description, "Patch servers");
        assert_eq!(tasks[0].time_required, "2");
        assert_eq!(tasks[0].time_spent, "1");
    }

    #[test]
    fn progress_column_is_optional() {
        let content = "TaskId;Project;Task;TimeRequired;TimeSpent;OtherDepartments;DependsOnTask\n\
                       1;P;Task;1;1;;\n";
        let tasks = parse_tasks(content).unwrap();
        assert_eq!(tasks[0].progress, "0");
    }

    #[test]
    fn missing_columns_are_listed() {
        let content = "TaskId;Project;Task\n1;P;T\n";
        assert_eq!(
            parse_tasks(content),
            Err(TaskFileError::MissingColumns(vec![
                "TimeRequired".to_string(),
                "TimeSpent".to_string(),
                "OtherDepartments".to_string(),
                "DependsOnTask".to_string(),
            ]))
        );
    }

    #[test]
    fn empty_content_has_no_header() {
        assert_eq!(parse_tasks("\n  \n"), Err(TaskFileError::MissingHeader));
    }

    #[test]
    fn short_row_is_malformed() {
        let content = format!("{}\n1;P;Task;1\n", HEADER);
        assert_eq!(
            parse_tasks(&content),
            Err(TaskFileError::MalformedRow {
                line: 2,
                expected: 8,
                found: 4,
            })
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let content = format!("{}\nA;P;One;1;1;0;;\n\nA;P;Two;1;1;0;;\n", HEADER);
        assert_eq!(
            parse_tasks(&content),
            Err(TaskFileError::DuplicateId {
                id: TaskId::new("A"),
                first_line: 2,
                line: 4,
            })
        );
    }

    #[test]
    fn empty_task_id_is_rejected() {
        let content = format!("{}\n ;P;One;1;1;0;;\n", HEADER);
        assert_eq!(
            parse_tasks(&content),
            Err(TaskFileError::InvalidId {
                line: 2,
                source: IdError::Empty,
            })
        );
    }

    #[test]
    fn quoted_fields_may_contain_delimiter() {
        let content = format!("{}\n1;P;\"Plan; then \"\"ship\"\"\";1;1;0;;\n", HEADER);
        let tasks = parse_tasks(&content).unwrap();
        assert_eq!(tasks[0].description, "Plan; then \"ship\"");
    }

    #[test]
    fn quoted_field_may_span_lines() {
        let content = format!(
            "{}\n{}\n\n{}\n{}\n",
            HEADER,
            "1;P;\"Line one\nline two\";1;1;0;;",
            "2;P;Next;1;1;0;;1",
            "2;P;Again;1;1;0;;"
        );
        assert_eq!(
            parse_tasks(&content),
            Err(TaskFileError::DuplicateId {
                id: TaskId::new("2"),
                first_line: 5,
                line: 6,
            })
        );

        let content = format!("{}\n1;P;\"Line one\nline two\";1;1;0;;\n", HEADER);
        let tasks = parse_tasks(&content).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Line one\nline two");
        assert_eq!(tasks[0].time_required, "1");
    }

    #[test]
    fn unterminated_multiline_quote_reports_its_first_line() {
        let content = format!("{}\n1;P;One;1;1;0;;\n2;P;\"Open\nstill open;1;1;0;;\n", HEADER);
        assert_eq!(
            parse_tasks(&content),
            Err(TaskFileError::UnterminatedQuote { line: 3 })
        );
    }

    #[test]
    fn unterminated_quote_is_reported() {
        let content = format!("{}\n1;P;\"Plan;1;1;0;;\n", HEADER);
        assert_eq!(
            parse_tasks(&content),
            Err(TaskFileError::UnterminatedQuote { line: 2 })
        );
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let content = format!("\u{feff}{}\n1;P;Task;1;1;0;;\n", HEADER);
        assert_eq!(parse_tasks(&content).unwrap().len(), 1);
    }

    #[test]
    fn non_numeric_display_fields_are_kept_verbatim() {
        let content = format!("{}\n1;P;Task;about 3h;n/a;half;;\n", HEADER);
        let task = &parse_tasks(&content).unwrap()[0];
        assert_eq!(task.time_required, "about 3h");
        assert_eq!(task.progress, "half");
    }

    #[test]
    fn read_all_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(&path, format!("{}\n1;P;Task;1;1;0;;\n", HEADER)).unwrap();

        let file = TaskFile::new(&path);
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.read_all().unwrap().len(), 1);
    }

    #[test]
    fn read_all_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = TaskFile::new(dir.path().join("tasks.csv")).read_all().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskFileError>(),
            Some(TaskFileError::NotFound(_))
        ));
    }

    #[test]
    fn read_all_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, HEADER).unwrap();

        let err = TaskFile::new(&path).read_all().unwrap_err();
        assert_eq!(
            err.downcast_ref::<TaskFileError>(),
            Some(&TaskFileError::UnsupportedFormat(".txt".to_string()))
        );
    }
}
