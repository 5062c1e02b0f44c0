//! File-level insert and check operations driven by the command line.
//!
//! A [`DocJob`] pairs an input document with one output file and the option chain for that
//! output. Jobs come either from paths given on the command line, rewritten in place, or from the
//! `[[docs]]` of the configuration.

use crate::config::{layer, Config};
use crate::options::{OptionLayer, Options};
use crate::{insert_tocs_in_text, Result, TocOutcome};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
/// One input document rendered into one output file.
pub struct DocJob {
    /// Document to read.
    pub input: PathBuf,
    /// File receiving the result; the input itself for in-place updates.
    pub output: PathBuf,
    /// Options chain for this output.
    pub options: Options,
}

impl DocJob {
    #[must_use]
    /// Whether the job rewrites its own input.
    pub fn in_place(&self) -> bool {
        self.input == self.output
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// What happened to one output file.
pub enum Status {
    /// The output was rewritten.
    Updated,
    /// The output already held the result.
    Unchanged,
    /// Checking found a stale or missing output.
    OutOfDate,
    /// Checking found the output current.
    UpToDate,
    /// The document could not be processed.
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Outcome for one job.
pub struct FileReport {
    /// Document read.
    pub input: PathBuf,
    /// Output written or compared.
    pub output: PathBuf,
    /// What happened.
    pub status: Status,
    /// Per-tag warnings, in marker order.
    pub warnings: Vec<String>,
    /// Error that stopped processing, if any.
    pub error: Option<String>,
}

impl FileReport {
    fn new(job: &DocJob, status: Status, warnings: Vec<String>) -> Self {
        Self {
            input: job.input.clone(),
            output: job.output.clone(),
            status,
            warnings,
            error: None,
        }
    }

    fn failed(job: &DocJob, error: &crate::Error) -> Self {
        tracing::error!(path = %job.input.display(), "{error}");
        Self {
            error: Some(error.to_string()),
            ..Self::new(job, Status::Failed, Vec::new())
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Outcome of a whole run.
pub struct Report {
    /// One entry per job, in job order.
    pub files: Vec<FileReport>,
}

impl Report {
    #[must_use]
    /// Whether any job failed or was found out of date.
    pub fn has_failures(&self) -> bool {
        self.files
            .iter()
            .any(|file| matches!(file.status, Status::Failed | Status::OutOfDate))
    }
}

/// Jobs for documents named on the command line, each rewritten in place.
///
/// A path that matches a configured document also picks up that document's options.
///
/// # Errors
///
/// Returns [`crate::Error::Config`] when a configured options table is invalid.
pub fn jobs_for_paths(
    paths: &[PathBuf],
    config: &Config,
    overrides: &OptionLayer,
) -> Result<Vec<DocJob>> {
    let base = base_options(config, overrides)?;
    paths
        .iter()
        .map(|path| {
            let doc_layer = config
                .docs
                .iter()
                .find(|doc| Path::new(&doc.path) == path)
                .map_or_else(|| Ok(OptionLayer::default()), |doc| layer(doc.options.as_ref()))?;
            Ok(DocJob {
                input: path.clone(),
                output: path.clone(),
                options: base.with_layer(doc_layer),
            })
        })
        .collect()
}

/// Jobs for every configured document and output file.
///
/// # Errors
///
/// Returns [`crate::Error::Config`] when a configured options table is invalid.
pub fn jobs_from_config(config: &Config, overrides: &OptionLayer) -> Result<Vec<DocJob>> {
    let base = base_options(config, overrides)?;
    let mut jobs = Vec::new();
    for doc in &config.docs {
        let doc_options = base.with_layer(layer(doc.options.as_ref())?);
        if doc.outputs.is_empty() {
            jobs.push(DocJob {
                input: doc.input(),
                output: doc.input(),
                options: doc_options,
            });
            continue;
        }
        for output in &doc.outputs {
            jobs.push(DocJob {
                input: doc.input(),
                output: PathBuf::from(&output.path),
                options: doc_options.with_layer(layer(output.options.as_ref())?),
            });
        }
    }
    Ok(jobs)
}

fn base_options(config: &Config, overrides: &OptionLayer) -> Result<Options> {
    Ok(Options::new()
        .with_layer(config.project_layer()?)
        .with_layer(overrides.clone()))
}

/// Read the job's input and run the engine on it.
///
/// # Errors
///
/// Returns an error if the input cannot be read or its markers are malformed.
pub fn generate(job: &DocJob, check_current_content: bool) -> Result<TocOutcome> {
    let text = fs::read_to_string(&job.input)?;
    let outcome = insert_tocs_in_text(&text, &job.options, check_current_content)?;
    for warning in &outcome.warnings {
        tracing::warn!("{}: {warning}", job.input.display());
    }
    Ok(outcome)
}

/// What an update would write, without touching any file.
///
/// Nothing is overwritten, so content between the markers is replaced without the list check.
///
/// # Errors
///
/// Returns an error if the input cannot be read or its markers are malformed.
pub fn preview(job: &DocJob) -> Result<TocOutcome> {
    generate(job, false)
}

/// Update the job's output file, writing only when its content changes.
#[must_use]
pub fn insert(job: &DocJob) -> FileReport {
    match try_insert(job) {
        Ok(report) => report,
        Err(error) => FileReport::failed(job, &error),
    }
}

fn try_insert(job: &DocJob) -> Result<FileReport> {
    let outcome = generate(job, job.in_place())?;
    let current = fs::read_to_string(&job.output).ok();
    if current.as_deref() == Some(outcome.text.as_str()) {
        tracing::debug!(path = %job.output.display(), "already up to date");
        return Ok(FileReport::new(job, Status::Unchanged, outcome.warnings));
    }

    if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&job.output, &outcome.text)?;
    tracing::info!(path = %job.output.display(), "updated table of contents");
    Ok(FileReport::new(job, Status::Updated, outcome.warnings))
}

/// Compare the job's output file with what an update would write.
#[must_use]
pub fn check(job: &DocJob) -> FileReport {
    match try_check(job) {
        Ok(report) => report,
        Err(error) => FileReport::failed(job, &error),
    }
}

fn try_check(job: &DocJob) -> Result<FileReport> {
    let outcome = generate(job, false)?;
    let current = fs::read_to_string(&job.output).ok();
    let status = if current.as_deref() == Some(outcome.text.as_str()) {
        Status::UpToDate
    } else {
        Status::OutOfDate
    };
    Ok(FileReport::new(job, status, outcome.warnings))
}

/// Run `jobs` in order, checking instead of updating when `check_only` is set.
#[must_use]
pub fn run(jobs: &[DocJob], check_only: bool) -> Report {
    let files = jobs
        .iter()
        .map(|job| if check_only { check(job) } else { insert(job) })
        .collect();
    Report { files }
}

/// Line printed for an out-of-date output.
#[must_use]
pub fn out_of_date_message(output: &Path) -> String {
    format!(
        "{}: Table of Contents is out of date. Run tocme to update.",
        output.display()
    )
}

#[cfg(test)]
#[path = "tests/tasks.rs"]
mod tests;
