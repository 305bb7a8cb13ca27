//! Batch processing: input collection, per-file cleaning, output naming.

use docstrip::{CleanOptions, CleanStats, FileKind};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix of files written beside their input.
const CLEAN_SUFFIX: &str = ".clean";

/// Outcome of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Text extracted and cleaned
    Cleaned,
    /// Extraction failed; the file was skipped
    Failed,
}

/// Report entry for one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: FileKind,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CleanStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub chars_before: usize,
    pub chars_after: usize,
}

/// Report for a whole run.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub cleaned: usize,
    pub failed: usize,
    pub totals: CleanStats,
}

impl BatchReport {
    pub fn push(&mut self, report: FileReport) {
        match report.status {
            Status::Cleaned => self.cleaned += 1,
            Status::Failed => self.failed += 1,
        }
        if let Some(stats) = report.stats {
            self.totals += stats;
        }
        self.files.push(report);
    }
}

/// Settings shared by every file of a run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub output_dir: Option<PathBuf>,
    pub options: CleanOptions,
    pub dry_run: bool,
}

/// Collect supported files from the given paths.
///
/// Directories contribute their direct children, or their whole tree when
/// `recursive` is set. Files written by a previous run are skipped, and so
/// are named files of an unsupported kind.
pub fn collect_inputs(inputs: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            match docstrip::detect_file_kind(input) {
                Ok(_) => files.push(input.clone()),
                Err(e) => log::warn!("skipping {}: {}", input.display(), e),
            }
            continue;
        }

        let walker = if recursive {
            WalkDir::new(input).min_depth(1)
        } else {
            WalkDir::new(input).min_depth(1).max_depth(1)
        };

        for entry in walker.sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    let path = entry.into_path();
                    if FileKind::from_extension(&path).is_some() && !is_previous_output(&path) {
                        files.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("cannot walk {}: {}", input.display(), e),
            }
        }
    }

    files
}

fn is_previous_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(CLEAN_SUFFIX))
}

/// Picks output paths, never reusing one within a run and never
/// pointing back at the input.
#[derive(Debug, Default)]
pub struct OutputNamer {
    used: HashSet<PathBuf>,
}

impl OutputNamer {
    pub fn output_path(&mut self, input: &Path, output_dir: Option<&Path>) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let ext = input
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let first = match output_dir {
            Some(dir) => dir.join(format!("{stem}.txt")),
            None => input.with_file_name(format!("{stem}{CLEAN_SUFFIX}.txt")),
        };

        let base = if ext.is_empty() {
            format!("{stem}{CLEAN_SUFFIX}")
        } else {
            format!("{stem}.{ext}{CLEAN_SUFFIX}")
        };

        let mut candidate = first.clone();
        let mut attempt = 0usize;
        while candidate == input || self.used.contains(&candidate) {
            let name = match attempt {
                0 => format!("{base}.txt"),
                n => format!("{base}.{n}.txt"),
            };
            candidate = first.with_file_name(name);
            attempt += 1;
        }

        self.used.insert(candidate.clone());
        candidate
    }
}

/// Extract, clean and write one file.
///
/// Never fails: extraction and write errors become a [`Status::Failed`]
/// report so the rest of the batch still runs.
pub fn process_file(path: &Path, config: &BatchConfig, namer: &mut OutputNamer) -> FileReport {
    let kind = docstrip::detect_file_kind(path).unwrap_or(FileKind::Text);
    let failed = |error: String| FileReport {
        path: path.to_path_buf(),
        kind,
        status: Status::Failed,
        output: None,
        stats: None,
        error: Some(error),
        chars_before: 0,
        chars_after: 0,
    };

    let Some(raw) = docstrip::extract_text(path) else {
        return failed("could not extract text".to_string());
    };

    let (cleaned, stats) = docstrip::clean_text(&raw, &config.options);
    let output = namer.output_path(path, config.output_dir.as_deref());

    if config.dry_run {
        log::info!("dry run: would write {}", output.display());
    } else if let Err(e) = write_cleaned(&output, &cleaned) {
        log::warn!("cannot write {}: {}", output.display(), e);
        return failed(format!("cannot write {}: {}", output.display(), e));
    } else {
        log::info!("wrote {}", output.display());
    }

    FileReport {
        path: path.to_path_buf(),
        kind,
        status: Status::Cleaned,
        output: Some(output),
        stats: Some(stats),
        error: None,
        chars_before: raw.chars().count(),
        chars_after: cleaned.chars().count(),
    }
}

fn write_cleaned(output: &Path, cleaned: &str) -> std::io::Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names() {
        let mut namer = OutputNamer::default();
        assert_eq!(
            namer.output_path(Path::new("in/report.docx"), None),
            PathBuf::from("in/report.clean.txt")
        );
        assert_eq!(
            namer.output_path(Path::new("in/report.docx"), Some(Path::new("out"))),
            PathBuf::from("out/report.txt")
        );
        // Same stem from a text file in the same run.
        assert_eq!(
            namer.output_path(Path::new("in/report.txt"), Some(Path::new("out"))),
            PathBuf::from("out/report.txt.clean.txt")
        );
    }

    #[test]
    fn test_output_names_stay_unique() {
        let mut namer = OutputNamer::default();
        let out = Some(Path::new("out"));
        let a = namer.output_path(Path::new("a/report.docx"), out);
        let b = namer.output_path(Path::new("b/report.docx"), out);
        let c = namer.output_path(Path::new("c/report.docx"), out);
        let d = namer.output_path(Path::new("d/report.docx"), out);

        assert_eq!(a, PathBuf::from("out/report.txt"));
        assert_eq!(b, PathBuf::from("out/report.docx.clean.txt"));
        assert_eq!(c, PathBuf::from("out/report.docx.clean.1.txt"));
        assert_eq!(d, PathBuf::from("out/report.docx.clean.2.txt"));
    }

    #[test]
    fn test_output_never_overwrites_input() {
        let mut namer = OutputNamer::default();
        assert_eq!(
            namer.output_path(Path::new("docs/notes.txt"), Some(Path::new("docs"))),
            PathBuf::from("docs/notes.txt.clean.txt")
        );
    }

    #[test]
    fn test_collect_inputs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("a.clean.txt"), "a").unwrap();
        fs::write(dir.path().join("b.png"), "b").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.txt"), "c").unwrap();

        let flat = collect_inputs(&[dir.path().to_path_buf()], false);
        assert_eq!(flat, vec![dir.path().join("a.txt")]);

        let deep = collect_inputs(&[dir.path().to_path_buf()], true);
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn test_named_unsupported_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let picture = dir.path().join("x.png");
        let notes = dir.path().join("notes.txt");
        fs::write(&picture, b"\x89PNG").unwrap();
        fs::write(&notes, "text").unwrap();

        let files = collect_inputs(&[picture, notes.clone()], false);
        assert_eq!(files, vec![notes]);
    }

    #[test]
    fn test_process_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, "one  two\n\n\n\nthree").unwrap();

        let config = BatchConfig {
            output_dir: None,
            options: CleanOptions::default(),
            dry_run: false,
        };
        let mut namer = OutputNamer::default();
        let report = process_file(&input, &config, &mut namer);

        assert_eq!(report.status, Status::Cleaned);
        assert!(report.error.is_none());
        let output = report.output.unwrap();
        assert_eq!(fs::read_to_string(output).unwrap(), "one two\n\nthree");
    }

    #[test]
    fn test_process_broken_docx() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.docx");
        fs::write(&input, "not a zip").unwrap();

        let config = BatchConfig {
            output_dir: None,
            options: CleanOptions::default(),
            dry_run: false,
        };
        let mut namer = OutputNamer::default();
        let report = process_file(&input, &config, &mut namer);
        assert_eq!(report.status, Status::Failed);
        assert!(report.error.is_some());

        let mut batch = BatchReport::default();
        batch.push(report);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.cleaned, 0);
    }

    #[test]
    fn test_write_failure_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.txt");
        let second = dir.path().join("b.txt");
        fs::write(&first, "first").unwrap();
        fs::write(&second, "second").unwrap();
        // A directory where the first output file would go.
        fs::create_dir(dir.path().join("a.clean.txt")).unwrap();

        let config = BatchConfig {
            output_dir: None,
            options: CleanOptions::default(),
            dry_run: false,
        };
        let mut namer = OutputNamer::default();
        let mut batch = BatchReport::default();
        for path in [&first, &second] {
            batch.push(process_file(path, &config, &mut namer));
        }

        assert_eq!(batch.failed, 1);
        assert_eq!(batch.cleaned, 1);
        assert_eq!(batch.files[0].status, Status::Failed);
        assert!(batch.files[0].error.as_deref().unwrap().contains("cannot write"));
        assert_eq!(
            fs::read_to_string(dir.path().join("b.clean.txt")).unwrap(),
            "second"
        );
    }
}
