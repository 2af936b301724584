//! Hour-bucketed log file resolution
//!
//! Files live at `<executable_dir>/<dir_name>/<YYYY-MM-DDTHH:00>.<suffix>.log`.
//! Resolution runs `Uninitialized -> DirectoryEnsured -> PathResolved -> FileOpen`
//! and stops at the first failing step.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use jiff::civil::DateTime;
use jiff::fmt::strtime;

use crate::logger::error::LoggerError;
use crate::logger::stamp::BUCKET_STAMP_FORMAT;

/// Directory holding the hourly files
pub const LOG_DIR_NAME: &str = "Log";

/// File name suffix placed between the bucket key and `.log`
pub const DEFAULT_SUFFIX: &str = "gin";

/// Progress of a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStage {
    Uninitialized,
    DirectoryEnsured,
    PathResolved,
    FileOpen,
}

/// A freshly opened hourly log file
#[derive(Debug)]
pub struct LogFile {
    pub path: PathBuf,
    pub bucket: String,
    pub file: File,
}

/// Names and opens the log file for a given wall-clock time
#[derive(Debug, Clone)]
pub struct LogFileResolver {
    dir_name: String,
    suffix: String,
    bucket_format: String,
    /// Base for `ensure_log_directory`; the process working directory when unset
    working_dir: Option<PathBuf>,
    /// Overrides the directory of the running binary
    executable_dir: Option<PathBuf>,
}

impl LogFileResolver {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            dir_name: LOG_DIR_NAME.to_string(),
            suffix: suffix.into(),
            bucket_format: BUCKET_STAMP_FORMAT.to_string(),
            working_dir: None,
            executable_dir: None,
        }
    }

    pub fn with_dir_name(mut self, dir_name: impl Into<String>) -> Self {
        self.dir_name = dir_name.into();
        self
    }

    pub fn with_bucket_format(mut self, format: impl Into<String>) -> Self {
        self.bucket_format = format.into();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_executable_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.executable_dir = Some(dir.into());
        self
    }

    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// Bucket key for `at`; equal for every instant of the same clock hour
    pub fn bucket_key(&self, at: DateTime) -> Result<String, LoggerError> {
        strtime::format(&self.bucket_format, at).map_err(|source| {
            LoggerError::BucketFormatFailed {
                format: self.bucket_format.clone(),
                source,
            }
        })
    }

    /// Directory containing the running binary. Looked up on every call.
    pub fn resolve_executable_directory(&self) -> Result<PathBuf, LoggerError> {
        if let Some(dir) = &self.executable_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe()
            .map_err(|source| LoggerError::ExecutableLookupFailed { source })?;

        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| LoggerError::ExecutableLookupFailed {
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} has no parent directory", exe.display()),
                ),
            })
    }

    /// Path `ensure_log_directory` creates
    pub fn log_directory(&self) -> PathBuf {
        match &self.working_dir {
            Some(base) => base.join(&self.dir_name),
            None => PathBuf::from(&self.dir_name),
        }
    }

    /// Create the log directory. An existing entry counts as success.
    pub fn ensure_log_directory(&self) -> Result<(), LoggerError> {
        let path = self.log_directory();
        match fs::create_dir(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Log directory created");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(LoggerError::DirectoryCreateFailed { path, source }),
        }
    }

    /// `<executable_dir>/<dir_name>/<bucket>.<suffix>.log`, checked before any I/O
    pub fn build_log_file_path(
        &self,
        now: DateTime,
        executable_dir: &Path,
    ) -> Result<PathBuf, LoggerError> {
        let file_name = self.file_name(now)?;
        if file_name.is_empty() {
            return Err(LoggerError::EmptyFileName);
        }

        Ok(executable_dir.join(&self.dir_name).join(file_name))
    }

    /// Empty when the bucket key formats to nothing
    fn file_name(&self, now: DateTime) -> Result<String, LoggerError> {
        let key = self.bucket_key(now)?;
        if key.is_empty() {
            return Ok(String::new());
        }

        if self.suffix.is_empty() {
            Ok(format!("{}.log", key))
        } else {
            Ok(format!("{}.{}.log", key, self.suffix))
        }
    }

    /// Open `path` read-write in append mode, creating it when absent.
    /// Existing content is never truncated.
    pub fn open_or_create(path: &Path) -> Result<File, LoggerError> {
        OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)
            .map_err(|source| LoggerError::OpenFailed {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Run the whole chain for `now`
    pub fn open_current(&self, now: DateTime) -> Result<LogFile, LoggerError> {
        let mut stage = ResolveStage::Uninitialized;
        let result = self.advance(now, &mut stage);

        if let Err(ref e) = result {
            tracing::debug!(stage = ?stage, error = %e, "Log file resolution stopped");
        }

        result
    }

    fn advance(&self, now: DateTime, stage: &mut ResolveStage) -> Result<LogFile, LoggerError> {
        self.ensure_log_directory()?;
        *stage = ResolveStage::DirectoryEnsured;

        let executable_dir = self.resolve_executable_directory()?;
        let path = self.build_log_file_path(now, &executable_dir)?;
        *stage = ResolveStage::PathResolved;

        let file = Self::open_or_create(&path)?;
        *stage = ResolveStage::FileOpen;

        tracing::debug!(path = %path.display(), "Log file opened");

        Ok(LogFile {
            path,
            bucket: self.bucket_key(now)?,
            file,
        })
    }
}

impl Default for LogFileResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX)
    }
}
