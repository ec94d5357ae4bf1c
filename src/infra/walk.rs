//! Filepath: src/infra/walk.rs
//! Gitignore-aware single-tree traversal, plus a two-tree pairer for
//! directory-mode diffing (spec.md §4.11): walks both root directories
//! independently and produces matched relative paths (present on both
//! sides, queued as diff jobs) and unmatched ones (present on only one
//! side, reported as whole-file insert/remove without invoking the core).

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("invalid --exclude pattern {pattern:?}: {source}")]
    BadGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A relative path present on both sides, queued for a core diff.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchedPair {
    pub relative: PathBuf,
}

/// A relative path present on only one side: reported as a whole-file
/// insert or remove without invoking the core's LCS stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedSide {
    /// Present only under the "old" root; every line is a removal.
    OldOnly,
    /// Present only under the "new" root; every line is an insertion.
    NewOnly,
}

#[derive(Debug, Clone)]
pub struct Unmatched {
    pub relative: PathBuf,
    pub side: UnmatchedSide,
}

/// The result of pairing two directory trees: deterministically ordered
/// matched pairs plus the unmatched entries from either side.
#[derive(Debug, Clone, Default)]
pub struct TreePairing {
    pub matched: Vec<MatchedPair>,
    pub unmatched: Vec<Unmatched>,
}

/// Walk `old_root` and `new_root` independently (same gitignore/extra-glob
/// rules on both) and pair up their relative paths.
pub fn pair_trees(old_root: &Path, new_root: &Path, extra_ignores: &[String]) -> Result<TreePairing> {
    let walker = FileWalker::new(extra_ignores)?;
    let old_files = walker.walk_files(old_root);
    let new_files = walker.walk_files(new_root);

    let old_rel: BTreeSet<PathBuf> = old_files.iter().filter_map(|p| p.strip_prefix(old_root).ok().map(Path::to_path_buf)).collect();
    let new_rel: BTreeSet<PathBuf> = new_files.iter().filter_map(|p| p.strip_prefix(new_root).ok().map(Path::to_path_buf)).collect();

    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for rel in old_rel.union(&new_rel) {
        let in_old = old_rel.contains(rel);
        let in_new = new_rel.contains(rel);
        match (in_old, in_new) {
            (true, true) => matched.push(MatchedPair { relative: rel.clone() }),
            (true, false) => unmatched.push(Unmatched { relative: rel.clone(), side: UnmatchedSide::OldOnly }),
            (false, true) => unmatched.push(Unmatched { relative: rel.clone(), side: UnmatchedSide::NewOnly }),
            (false, false) => unreachable!("path came from the union of both sets"),
        }
    }

    Ok(TreePairing { matched, unmatched })
}

/// Gitignore-aware walker with optional extra ignore globs.
/// Extra globs are applied in two places:
///   1) Early: prune directories during traversal (filter_entry).
///   2) Late: filter out files that still slipped through.
pub struct FileWalker {
    /// Compiled set of additional ignore patterns
    ignore_patterns: GlobSet,
}

impl FileWalker {
    /// Build a walker with additional ignore patterns (e.g., "target/**",
    /// "node_modules/**", "**/*.min.js"). These are matched on full paths.
    pub fn new(additional_ignores: &[String]) -> Result<Self> {
        // Create a builder for the glob set
        let mut builder = GlobSetBuilder::new();

        // Add all caller-provided patterns
        for pattern in additional_ignores {
            // Compile each glob; return early on invalid patterns
            let glob = Glob::new(pattern)?;
            builder.add(glob);
        }

        // Build the compiled set (empty if no patterns provided)
        let ignore_patterns = builder.build()?;

        // Return the configured walker
        Ok(Self { ignore_patterns })
    }

    /// Traverse files under `root`, respecting .gitignore and extra globs.
    /// Returns a sorted list of file paths for determinism.
    pub fn walk_files<P: AsRef<Path>>(&self, root: P) -> Vec<PathBuf> {
        let root_path = root.as_ref();
        // Create a builder so we can attach a directory-pruning predicate
        let mut builder = WalkBuilder::new(root.as_ref());

        // Include hidden files; rely on .gitignore for policy
        builder.hidden(false);

        // Respect all gitignore sources (local, global, excludes)
        builder.git_ignore(true);
        builder.git_exclude(true);
        builder.git_global(true);

        // Prune directories that match additional ignore patterns early.
        // This prevents descending into large ignored trees (e.g., target/, node_modules/).
        //
        // Note: we only prune directories here; file-level ignores are handled later.
        let extra = self.ignore_patterns.clone();
        builder.filter_entry(move |ent: &DirEntry| {
            // If we cannot determine the type, keep it (be conservative)
            let is_dir = ent.file_type().map(|ft| ft.is_dir()).unwrap_or(false);

            // If this is a directory and it matches an extra ignore, prune it now
            if is_dir && extra.is_match(ent.path()) {
                return false;
            }

            // Otherwise keep traversing
            true
        });

        // Build the iterator
        let walker = builder.build();

        // Collect only files, excluding those matched by extra globs
        let mut out: Vec<PathBuf> = walker
            // Drop entries with IO errors; production code could collect them
            .filter_map(|res| res.ok())
            // Keep only regular files
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            // Convert to owned path
            .map(|entry| entry.into_path())
            // Apply file-level extra ignore filtering using relative paths
            .filter(|path| {
                let rel_path = path.strip_prefix(root_path).unwrap_or(path);
                !self.ignore_patterns.is_match(rel_path)
            })
            // Collect into a vector
            .collect();

        // Ensure deterministic output order (useful for tests and stable CLI)
        out.sort();

        // Return file list
        out
    }

    /// Traverse and then apply a caller-provided filter predicate.
    /// This runs after git/extra ignore filtering.
    #[allow(dead_code)]
    pub fn walk_with_filter<P, F>(&self, root: P, filter: F) -> Vec<PathBuf>
    where
        P: AsRef<Path>,
        F: Fn(&Path) -> bool,
    {
        // Run the main traversal
        let files = self.walk_files(root);

        // Apply the caller's predicate
        files.into_iter().filter(|p| filter(p)).collect()
    }
}
