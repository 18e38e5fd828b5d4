//! Interactive data-file picker.
//!
//! Used when `hdash` runs without `-f` and the default CSV is not in the
//! working directory. Candidates are `*.csv` files found below it; the ones
//! whose header the loader would accept are listed first and starred.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::io::ingest::has_required_columns;

/// How many directory levels below the root are searched.
const MAX_DEPTH: usize = 4;

/// Directories never worth descending into.
const SKIPPED_DIRS: [&str; 3] = [".git", "target", "node_modules"];

/// A CSV found on disk and whether its header looks like hospital data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub usable: bool,
}

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
    Quit,
    Index(usize),
    OutOfRange(usize),
    Path(PathBuf),
}

fn parse_answer(input: &str, count: usize) -> Answer {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Answer::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Answer::Index(n - 1),
        Ok(n) => Answer::OutOfRange(n),
        Err(_) => Answer::Path(PathBuf::from(input)),
    }
}

/// Ask on stdin which CSV to load.
pub fn prompt_for_data_path() -> Result<PathBuf, AppError> {
    let candidates = discover_candidates(Path::new("."));
    if candidates.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Provide one with `hdash -f <file.csv>`.",
        ));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    choose(&candidates, &mut stdin.lock(), &mut stdout.lock())
}

fn choose(
    candidates: &[Candidate],
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<PathBuf, AppError> {
    let io_err = |e: io::Error| AppError::new(2, format!("Picker I/O failed: {e}"));

    writeln!(out, "Found {} CSV file(s) (* = has the hospital columns):", candidates.len()).map_err(io_err)?;
    for (idx, c) in candidates.iter().enumerate() {
        let mark = if c.usable { '*' } else { ' ' };
        writeln!(out, "{:>3}) {mark} {}", idx + 1, display_path(&c.path)).map_err(io_err)?;
    }

    let mut line = String::new();
    loop {
        write!(out, "Pick 1-{} or type a path (q to quit): ", candidates.len()).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        line.clear();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a CSV path with `hdash -f <file.csv>`.",
            ));
        }

        let picked = match parse_answer(&line, candidates.len()) {
            Answer::Quit => return Err(AppError::new(2, "Canceled.")),
            Answer::Index(i) => candidates[i].path.clone(),
            Answer::OutOfRange(n) => {
                writeln!(out, "No file numbered {n}.").map_err(io_err)?;
                continue;
            }
            Answer::Path(p) => p,
        };

        match validate_data_path(&picked) {
            Ok(path) => return Ok(path),
            Err(err) => writeln!(out, "{err}").map_err(io_err)?,
        }
    }
}

/// Check that `path` is an existing `.csv` file.
pub fn validate_data_path(path: &Path) -> Result<PathBuf, AppError> {
    let problem = if !path.exists() {
        Some("CSV file not found")
    } else if path.is_dir() {
        Some("Expected a file, got a directory")
    } else if !is_csv(path) {
        Some("Expected a .csv file")
    } else {
        None
    };

    match problem {
        Some(what) => Err(AppError::new(2, format!("{what}: {}", path.display()))),
        None => Ok(path.to_path_buf()),
    }
}

/// CSV files under `root`, usable datasets first, then by path.
pub fn discover_candidates(root: &Path) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = walk_csv_files(root)
        .into_iter()
        .map(|path| Candidate {
            usable: header_is_usable(&path),
            path,
        })
        .collect();
    out.sort_by(|a, b| {
        b.usable
            .cmp(&a.usable)
            .then_with(|| display_path(&a.path).cmp(&display_path(&b.path)))
    });
    out
}

fn header_is_usable(path: &Path) -> bool {
    csv::Reader::from_path(path)
        .and_then(|mut r| r.headers().cloned())
        .is_ok_and(|headers| has_required_columns(&headers))
}

/// Breadth-first walk bounded by `MAX_DEPTH`; unreadable entries are skipped.
fn walk_csv_files(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut queue = VecDeque::from([(root.to_path_buf(), 0usize)]);

    while let Some((dir, depth)) = queue.pop_front() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => {
                    let skipped = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| SKIPPED_DIRS.contains(&n));
                    if depth < MAX_DEPTH && !skipped {
                        queue.push_back((path, depth + 1));
                    }
                }
                Ok(ft) if ft.is_file() && is_csv(&path) => found.push(path),
                _ => {}
            }
        }
    }
    found
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn display_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}
