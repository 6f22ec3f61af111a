use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::error::{TaskError, TaskResult};

/// Line-based store the task list is mirrored into.
///
/// The store only moves serialized lines around; it never interprets them.
pub trait TaskStore {
    /// All stored lines in order. A store that does not exist yet is empty.
    fn load(&self) -> TaskResult<Vec<String>>;

    /// Replace the whole content with `lines`.
    fn rewrite(&mut self, lines: &[String]) -> TaskResult<()>;

    /// Add one line at the end.
    fn append(&mut self, line: &str) -> TaskResult<()>;
}

/// Store backed by a single UTF-8 text file, one task per line.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn storage_error(&self, err: std::io::Error) -> TaskError {
        TaskError::Storage(format!("{}: {}", self.path.display(), err))
    }

    fn ensure_parent_dir(&self) -> TaskResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
            }
        }
        Ok(())
    }
}

/// Whether a non-empty file stops mid-line, e.g. after a hand edit.
fn ends_without_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

impl TaskStore for FileStore {
    fn load(&self) -> TaskResult<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    /// Written to a `.tmp` sibling first, then renamed over the data file.
    fn rewrite(&mut self, lines: &[String]) -> TaskResult<()> {
        self.ensure_parent_dir()?;

        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content).map_err(|e| self.storage_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.storage_error(e))?;

        Ok(())
    }

    /// Starts a new line first if the file does not already end with one.
    fn append(&mut self, line: &str) -> TaskResult<()> {
        self.ensure_parent_dir()?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.storage_error(e))?;

        let needs_newline = ends_without_newline(&mut file).map_err(|e| self.storage_error(e))?;
        if needs_newline {
            writeln!(file).map_err(|e| self.storage_error(e))?;
        }
        writeln!(file, "{}", line).map_err(|e| self.storage_error(e))?;

        Ok(())
    }
}

/// In-memory store that records how it was written to.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub lines: Vec<String>,
    pub appends: usize,
    pub rewrites: usize,
    pub fail_load: bool,
    pub fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl TaskStore for MemoryStore {
    fn load(&self) -> TaskResult<Vec<String>> {
        if self.fail_load {
            return Err(TaskError::Storage("load refused".to_string()));
        }
        Ok(self.lines.clone())
    }

    fn rewrite(&mut self, lines: &[String]) -> TaskResult<()> {
        if self.fail_writes {
            return Err(TaskError::Storage("disk full".to_string()));
        }
        self.rewrites += 1;
        self.lines = lines.to_vec();
        Ok(())
    }

    fn append(&mut self, line: &str) -> TaskResult<()> {
        if self.fail_writes {
            return Err(TaskError::Storage("disk full".to_string()));
        }
        self.appends += 1;
        self.lines.push(line.to_string());
        Ok(())
    }
}
