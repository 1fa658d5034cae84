/// Core edge-list reversal engine.
///
/// This module reads tab-delimited edge files from a source directory and
/// writes a mirrored file per input into a destination directory, with the
/// two fields of every well-formed line swapped. Malformed lines (anything
/// that does not split into exactly two tab-separated fields) are copied
/// through byte-identical, including their original line terminator.
use crate::config::CompiledSelect;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Errors that can occur while reversing edge files.
#[derive(Debug)]
pub enum ReverseError {
    /// The source directory is missing or could not be enumerated.
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The destination directory could not be created.
    DestCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An input file could not be opened or read.
    FileReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An output file could not be created or written.
    FileWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ReverseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnreadable { path, source } => {
                write!(
                    f,
                    "Failed to read source directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DestCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create destination directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            Self::FileWriteFailed { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ReverseError {}

/// Result type for edge reversal operations.
pub type ReverseResult<T> = Result<T, ReverseError>;

/// Per-file line statistics collected while reversing.
#[derive(Debug, Clone)]
pub struct FileStats {
    /// The filename (no directory component).
    pub file_name: String,
    /// Total lines read from the input file.
    pub lines: usize,
    /// Lines that split into exactly two fields and were swapped.
    pub swapped: usize,
    /// Malformed lines copied through unchanged.
    pub passed_through: usize,
}

/// Aggregated statistics for a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Per-file statistics, in processing order.
    pub files: Vec<FileStats>,
}

impl RunSummary {
    /// Total lines across all processed files.
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|s| s.lines).sum()
    }

    /// Total swapped lines across all processed files.
    pub fn total_swapped(&self) -> usize {
        self.files.iter().map(|s| s.swapped).sum()
    }

    /// Total passed-through lines across all processed files.
    pub fn total_passed_through(&self) -> usize {
        self.files.iter().map(|s| s.passed_through).sum()
    }
}

/// Swaps the two tab-separated fields of a well-formed edge line.
///
/// The line is stripped of trailing whitespace before splitting, so a
/// well-formed CRLF line comes back LF-terminated. Returns `None` when the
/// line does not split into exactly two fields; the caller writes the
/// original line unchanged in that case.
fn swap_fields(line: &str) -> Option<String> {
    let fields: Vec<&str> = line.trim_end().split('\t').collect();
    match fields.as_slice() {
        [from, to] => Some(format!("{}\t{}\n", to, from)),
        _ => None,
    }
}

/// Reverses edge files from a source directory into a destination directory.
pub struct EdgeReverser;

impl EdgeReverser {
    /// Collects the files to process from the source directory.
    ///
    /// Only plain files are returned; sub-directories are skipped. Entries
    /// are filtered through the compiled selection rules, and sorted by
    /// filename when `sorted` is true so that processing order does not
    /// depend on filesystem enumeration order.
    ///
    /// # Errors
    ///
    /// Returns `ReverseError::SourceUnreadable` if the source directory is
    /// missing or cannot be enumerated.
    pub fn collect_files(
        source_dir: &Path,
        select: &CompiledSelect,
        sorted: bool,
    ) -> ReverseResult<Vec<PathBuf>> {
        let entries = fs::read_dir(source_dir).map_err(|e| ReverseError::SourceUnreadable {
            path: source_dir.to_path_buf(),
            source: e,
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries.flatten() {
            if let Ok(file_type) = entry.file_type()
                && file_type.is_file()
            {
                let path = entry.path();
                if select.is_selected(&path) {
                    files.push(path);
                }
            }
        }

        if sorted {
            files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
        }

        Ok(files)
    }

    /// Ensures the destination directory exists, creating it recursively.
    ///
    /// An already-existing destination is not an error.
    pub fn ensure_dest_dir(dest_dir: &Path) -> ReverseResult<()> {
        fs::create_dir_all(dest_dir).map_err(|e| ReverseError::DestCreationFailed {
            path: dest_dir.to_path_buf(),
            source: e,
        })
    }

    /// Reverses a single edge file, writing the result to `output_path`.
    ///
    /// Each input line is read with its terminator intact. Lines that split
    /// into exactly two tab-separated fields are written swapped, terminated
    /// by a single newline; every other line is written back byte-identical.
    /// Both file handles are scoped to this call and released on every exit
    /// path, including errors.
    ///
    /// # Arguments
    ///
    /// * `input_path` - The edge file to read
    /// * `output_path` - The mirrored file to create (overwritten if present)
    ///
    /// # Returns
    ///
    /// Returns the per-file line statistics on success.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use edgeflip::edge_reverser::EdgeReverser;
    /// use std::path::Path;
    ///
    /// let stats = EdgeReverser::reverse_file(
    ///     Path::new("edges/a.tsv"),
    ///     Path::new("edges_reversed/a.tsv"),
    /// );
    /// match stats {
    ///     Ok(s) => println!("{}: {} lines", s.file_name, s.lines),
    ///     Err(e) => eprintln!("Reversal failed: {}", e),
    /// }
    /// ```
    pub fn reverse_file(input_path: &Path, output_path: &Path) -> ReverseResult<FileStats> {
        let infile = File::open(input_path).map_err(|e| ReverseError::FileReadFailed {
            path: input_path.to_path_buf(),
            source: e,
        })?;
        let mut reader = BufReader::new(infile);

        let outfile = File::create(output_path).map_err(|e| ReverseError::FileWriteFailed {
            path: output_path.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(outfile);

        let file_name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut stats = FileStats {
            file_name,
            lines: 0,
            swapped: 0,
            passed_through: 0,
        };

        let mut line = String::new();
        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| ReverseError::FileReadFailed {
                    path: input_path.to_path_buf(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }
            stats.lines += 1;

            let out = match swap_fields(&line) {
                Some(swapped) => {
                    stats.swapped += 1;
                    swapped
                }
                None => {
                    // Malformed line: pass through unchanged, terminator included.
                    stats.passed_through += 1;
                    line.clone()
                }
            };
            writer
                .write_all(out.as_bytes())
                .map_err(|e| ReverseError::FileWriteFailed {
                    path: output_path.to_path_buf(),
                    source: e,
                })?;
        }

        writer.flush().map_err(|e| ReverseError::FileWriteFailed {
            path: output_path.to_path_buf(),
            source: e,
        })?;

        Ok(stats)
    }

    /// Counts the lines in a file without transforming it.
    ///
    /// Used by dry-run mode to preview the work without writing anything.
    pub fn count_lines(path: &Path) -> ReverseResult<usize> {
        let file = File::open(path).map_err(|e| ReverseError::FileReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = BufReader::new(file);
        let mut count = 0;
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| ReverseError::FileReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }
            count += 1;
        }
        Ok(count)
    }

    /// Reverses every selected file in a source directory into a destination
    /// directory, creating the destination if needed.
    ///
    /// Files are processed strictly one at a time. An I/O failure terminates
    /// the run; files already fully written remain valid in the destination,
    /// and re-running is safe because the transform is idempotent over its
    /// inputs.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Directory containing tab-delimited edge files
    /// * `dest_dir` - Directory to write reversed files into
    /// * `select` - Compiled file-selection rules
    /// * `sorted` - Whether to process files in filename order
    pub fn reverse_directory(
        source_dir: &Path,
        dest_dir: &Path,
        select: &CompiledSelect,
        sorted: bool,
    ) -> ReverseResult<RunSummary> {
        Self::ensure_dest_dir(dest_dir)?;
        let files = Self::collect_files(source_dir, select, sorted)?;

        let mut summary = RunSummary::default();
        for input_path in &files {
            let output_path = match input_path.file_name() {
                Some(name) => dest_dir.join(name),
                None => continue,
            };
            let stats = Self::reverse_file(input_path, &output_path)?;
            summary.files.push(stats);
        }

        Ok(summary)
    }
}
