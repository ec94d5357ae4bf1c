//! Filepath: src/app.rs
//! CLI command runner: wires the CLI front-end, file loader, directory
//! walker/pairer, worker pool, and report formatters around the core
//! (spec.md §2 SUPPLEMENT, components 9-13). None of this changes the
//! core's contract; it only gives the core callers to be exercised by.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::cli::{AppContext, DiffArgs, ReportFormat};
use crate::core::diff::{self, ReportedOp};
use crate::core::line::Line;
use crate::core::options::ComparisonOptions;
use crate::format::{DiffContext, Formatter, html, text};
use crate::infra::config::load_config;
use crate::infra::io::{self, LoadError};
use crate::infra::pool::{self, OutputSink};
use crate::infra::walk::{self, UnmatchedSide};

/// Process exit codes, in the convention of `diff`/`cmp` (spec.md §6
/// SUPPLEMENT).
pub const EXIT_IDENTICAL: i32 = 0;
pub const EXIT_DIFFERENT: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Resolved options for one run: CLI flags layered over config-file
/// defaults, CLI always winning (spec.md §7 SUPPLEMENT).
struct ResolvedArgs {
    options: ComparisonOptions,
    context: usize,
    format: ReportFormat,
    exclude: Vec<String>,
    threads: Option<usize>,
}

fn resolve_args(args: &DiffArgs) -> ResolvedArgs {
    let config = load_config().unwrap_or_default();

    let options = ComparisonOptions {
        ignore_case: args.ignore_case || config.ignore_case,
        ignore_space_change: args.ignore_space_change || config.ignore_space_change,
        ignore_all_space: args.ignore_all_space || config.ignore_all_space,
        ignore_blank_lines: args.ignore_blank_lines || config.ignore_blank_lines,
        unicode: args.unicode || config.unicode,
    };

    let context = args.context.or(config.context).unwrap_or(3);
    let format = args.format.unwrap_or_else(|| config.format.map_or(ReportFormat::Normal, Into::into));

    let mut exclude = config.exclude.clone();
    exclude.extend(args.exclude.iter().cloned());

    ResolvedArgs { options, context, format, exclude, threads: args.threads }
}

fn make_formatter(format: ReportFormat) -> Box<dyn Formatter + Send> {
    match format {
        ReportFormat::Normal => Box::new(text::Normal),
        ReportFormat::Unified => Box::new(text::Unified),
        ReportFormat::HtmlNormal => Box::new(html::SideBySide),
        ReportFormat::HtmlUnified => Box::new(html::Unified),
    }
}

/// One loaded file's bytes plus the lines borrowed from them.
struct Loaded {
    content: io::FileContent,
}

impl Loaded {
    fn lines(&self) -> Vec<Line<'_>> {
        io::split_lines(self.content.as_bytes()).into_iter().map(Line::new).collect()
    }
}

enum PairOutcome {
    Identical,
    Differs { report: Vec<u8> },
    Binary { differs: bool },
    Error { message: String },
}

fn diff_one_pair(old_path: &Path, new_path: &Path, old_name: &str, new_name: &str, resolved: &ResolvedArgs, color: bool) -> PairOutcome {
    let old = match io::load_file(old_path) {
        Ok(c) => c,
        Err(LoadError::Binary { .. }) => return binary_outcome(old_path, new_path),
        Err(e) => return PairOutcome::Error { message: e.to_string() },
    };
    let new = match io::load_file(new_path) {
        Ok(c) => c,
        Err(LoadError::Binary { .. }) => return binary_outcome(old_path, new_path),
        Err(e) => return PairOutcome::Error { message: e.to_string() },
    };

    let old = Loaded { content: old };
    let new = Loaded { content: new };
    let old_lines = old.lines();
    let new_lines = new.lines();

    debug!(old = %old_path.display(), new = %new_path.display(), old_lines = old_lines.len(), new_lines = new_lines.len(), "diffing file pair");

    let hunks: Vec<Vec<ReportedOp>> = diff::diff(&old_lines, &new_lines, &resolved.options, resolved.context);
    if hunks.is_empty() {
        return PairOutcome::Identical;
    }

    let ctx = DiffContext { old_name, new_name, old_lines: &old_lines, new_lines: &new_lines, color };
    let mut buf = Vec::new();
    let mut formatter = make_formatter(resolved.format);
    if formatter.emit(&mut buf, &hunks, &ctx).is_err() {
        return PairOutcome::Error { message: format!("{old_name}: failed to render report") };
    }
    PairOutcome::Differs { report: buf }
}

fn binary_outcome(old_path: &Path, new_path: &Path) -> PairOutcome {
    // Two binary files are reported identical only when their bytes match
    // exactly; re-reading both in full is acceptable here since the line
    // diff (the expensive path) is already known to be skipped.
    let differs = match (std::fs::read(old_path), std::fs::read(new_path)) {
        (Ok(a), Ok(b)) => a != b,
        _ => true,
    };
    PairOutcome::Binary { differs }
}

/// Run `diff <old> <new>` for two plain files.
fn run_file_pair(args: &DiffArgs, ctx: &AppContext) -> Result<i32> {
    let resolved = resolve_args(args);
    let old_name = args.old.display().to_string();
    let new_name = args.new.display().to_string();

    let outcome = diff_one_pair(&args.old, &args.new, &old_name, &new_name, &resolved, !ctx.no_color);

    let mut out = open_output(args)?;
    match outcome {
        PairOutcome::Identical => Ok(EXIT_IDENTICAL),
        PairOutcome::Differs { report } => {
            out.write_all(&report)?;
            Ok(EXIT_DIFFERENT)
        }
        PairOutcome::Binary { differs } => {
            if differs {
                writeln!(out, "Binary files {old_name} and {new_name} differ")?;
                Ok(EXIT_DIFFERENT)
            } else {
                Ok(EXIT_IDENTICAL)
            }
        }
        PairOutcome::Error { message } => {
            eprintln!("linediff: {message}");
            Ok(EXIT_ERROR)
        }
    }
}

/// Run `diff -r <old-dir> <new-dir>`: pair files across both trees, then
/// diff every matched pair on a bounded worker pool (spec.md §4.11, §4.12).
fn run_directory(args: &DiffArgs, ctx: &AppContext) -> Result<i32> {
    let resolved = resolve_args(args);
    let pairing = walk::pair_trees(&args.old, &args.new, &resolved.exclude).context("pairing directory trees")?;

    let sink = OutputSink::new(open_output(args)?);
    let thread_pool = pool::build_pool(resolved.threads)?;

    let progress = std::sync::Arc::new(
        (!ctx.quiet).then(|| indicatif::ProgressBar::new((pairing.matched.len() + pairing.unmatched.len()) as u64)),
    );

    let color = !ctx.no_color;
    let old_root = args.old.clone();
    let new_root = args.new.clone();

    let matched_results: Vec<i32> = pool::run_jobs(&thread_pool, pairing.matched, |pair| {
        let old_path = old_root.join(&pair.relative);
        let new_path = new_root.join(&pair.relative);
        let name = pair.relative.display().to_string();
        let outcome = diff_one_pair(&old_path, &new_path, &name, &name, &resolved, color);
        if let Some(bar) = progress.as_ref() {
            bar.inc(1);
        }
        let code = match &outcome {
            PairOutcome::Identical => EXIT_IDENTICAL,
            PairOutcome::Differs { .. } | PairOutcome::Binary { differs: true } => EXIT_DIFFERENT,
            PairOutcome::Binary { differs: false } => EXIT_IDENTICAL,
            PairOutcome::Error { .. } => EXIT_ERROR,
        };
        match outcome {
            PairOutcome::Differs { report } => {
                let _ = sink.write_report(&report);
            }
            PairOutcome::Binary { differs: true } => {
                let _ = sink.write_report(format!("Binary files {name} and {name} differ\n").as_bytes());
            }
            PairOutcome::Error { message } => {
                warn!(pair = %name, error = %message, "file pair failed");
                let _ = sink.write_report(format!("linediff: {name}: {message}\n").as_bytes());
            }
            PairOutcome::Identical | PairOutcome::Binary { differs: false } => {}
        }
        code
    });

    let unmatched_results: Vec<i32> = pairing
        .unmatched
        .into_iter()
        .map(|u| {
            let name = u.relative.display().to_string();
            let (verb, path) = match u.side {
                UnmatchedSide::OldOnly => ("Only in old tree", old_root.join(&u.relative)),
                UnmatchedSide::NewOnly => ("Only in new tree", new_root.join(&u.relative)),
            };
            let _ = path;
            if let Some(bar) = progress.as_ref() {
                bar.inc(1);
            }
            let _ = sink.write_report(format!("{verb}: {name}\n").as_bytes());
            EXIT_DIFFERENT
        })
        .collect();

    if let Some(bar) = progress.as_ref() {
        bar.finish_and_clear();
    }

    let any_error = matched_results.iter().any(|&c| c == EXIT_ERROR);
    let any_diff = matched_results.iter().any(|&c| c == EXIT_DIFFERENT) || !unmatched_results.is_empty();

    if any_error {
        Ok(EXIT_ERROR)
    } else if any_diff {
        Ok(EXIT_DIFFERENT)
    } else {
        Ok(EXIT_IDENTICAL)
    }
}

fn open_output(args: &DiffArgs) -> Result<Box<dyn Write + Send>> {
    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Ok(Box::new(std::io::BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::BufWriter::new(std::io::stdout()))),
    }
}

/// Entry point for the `diff` subcommand: dispatches to file-pair or
/// directory-pair mode and returns the process exit code to use.
pub fn run(args: DiffArgs, ctx: &AppContext) -> Result<i32> {
    let old_is_dir = args.old.is_dir();
    let new_is_dir = args.new.is_dir();

    if old_is_dir != new_is_dir {
        eprintln!("linediff: cannot compare a file against a directory");
        return Ok(EXIT_ERROR);
    }

    if old_is_dir {
        if !args.recursive {
            eprintln!("linediff: {} and {} are directories (use -r/--recursive)", args.old.display(), args.new.display());
            return Ok(EXIT_ERROR);
        }
        run_directory(&args, ctx)
    } else {
        run_file_pair(&args, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_file(path: &Path, contents: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    fn default_args(old: PathBuf, new: PathBuf) -> DiffArgs {
        DiffArgs {
            old,
            new,
            ignore_case: false,
            ignore_space_change: false,
            ignore_all_space: false,
            ignore_blank_lines: false,
            unicode: false,
            context: Some(3),
            format: Some(ReportFormat::Normal),
            recursive: false,
            threads: Some(1),
            exclude: Vec::new(),
            output: None,
        }
    }

    #[test]
    fn identical_files_exit_zero() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("a.txt");
        let new = dir.path().join("b.txt");
        write_file(&old, "same\n");
        write_file(&new, "same\n");

        let ctx = AppContext { quiet: true, no_color: true };
        let mut args = default_args(old, new);
        args.output = Some(dir.path().join("out.txt"));
        let code = run(args, &ctx).unwrap();
        assert_eq!(code, EXIT_IDENTICAL);
    }

    #[test]
    fn differing_files_exit_one_and_render_report() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("a.txt");
        let new = dir.path().join("b.txt");
        write_file(&old, "hello world\n");
        write_file(&new, "hello there\n");

        let ctx = AppContext { quiet: true, no_color: true };
        let out_path = dir.path().join("out.txt");
        let mut args = default_args(old, new);
        args.output = Some(out_path.clone());
        let code = run(args, &ctx).unwrap();
        assert_eq!(code, EXIT_DIFFERENT);
        let rendered = std::fs::read_to_string(&out_path).unwrap();
        assert!(rendered.contains("1c1"));
    }

    #[test]
    fn file_vs_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("a.txt");
        write_file(&old, "x\n");
        let new_dir = dir.path().join("sub");
        std::fs::create_dir(&new_dir).unwrap();

        let ctx = AppContext { quiet: true, no_color: true };
        let args = default_args(old, new_dir);
        let code = run(args, &ctx).unwrap();
        assert_eq!(code, EXIT_ERROR);
    }

    #[test]
    fn directory_mode_without_recursive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let old_dir = dir.path().join("old");
        let new_dir = dir.path().join("new");
        std::fs::create_dir(&old_dir).unwrap();
        std::fs::create_dir(&new_dir).unwrap();

        let ctx = AppContext { quiet: true, no_color: true };
        let args = default_args(old_dir, new_dir);
        let code = run(args, &ctx).unwrap();
        assert_eq!(code, EXIT_ERROR);
    }

    #[test]
    fn directory_mode_pairs_and_diffs_matched_files() {
        let dir = tempfile::tempdir().unwrap();
        let old_dir = dir.path().join("old");
        let new_dir = dir.path().join("new");
        std::fs::create_dir(&old_dir).unwrap();
        std::fs::create_dir(&new_dir).unwrap();
        write_file(&old_dir.join("shared.txt"), "a\n");
        write_file(&new_dir.join("shared.txt"), "b\n");
        write_file(&new_dir.join("added.txt"), "new file\n");

        let ctx = AppContext { quiet: true, no_color: true };
        let out_path = dir.path().join("out.txt");
        let mut args = default_args(old_dir, new_dir);
        args.recursive = true;
        args.output = Some(out_path.clone());
        let code = run(args, &ctx).unwrap();
        assert_eq!(code, EXIT_DIFFERENT);
        let rendered = std::fs::read_to_string(&out_path).unwrap();
        assert!(rendered.contains("shared.txt"));
        assert!(rendered.contains("Only in new tree: added.txt"));
    }
}
