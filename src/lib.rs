//! **linediff** - a file and directory comparison engine producing
//! human-readable HTML or plain-text diff reports.
//!
//! The [`core`] module is the line-level diff pipeline: equivalence-class
//! preprocessing, the Myers O(ND) LCS engine, boundary-shifting, and
//! intra-line word diff. Everything else (`cli`, `infra`, `format`, `app`)
//! is the ambient stack that gives the core callers to be exercised by —
//! argument parsing, directory pairing, file loading, worker-pool
//! dispatch, and report rendering.

/// Command-line interface with clap integration.
pub mod cli;

/// Shell completion generation.
pub mod completion;

/// Diff command runner: wires the CLI, file loader, walker, worker pool,
/// and formatters around the core.
pub mod app;

/// The line-level diff pipeline: comparator/hasher, rune splitter,
/// equivalence classes, compressor, Myers LCS, boundary shifter, reporter,
/// and intra-line driver.
pub mod core {
    pub mod classes;
    pub mod compare;
    pub mod compress;
    pub mod diff;
    pub mod intraline;
    pub mod lcs;
    pub mod line;
    pub mod options;
    pub mod report;
    pub mod shift;
    pub mod runes;
}

/// Infrastructure external to the core: configuration, file I/O, directory
/// walking, and the worker pool/output sink.
pub mod infra {
    /// Configuration management with TOML support.
    pub mod config;

    /// Suffix-dispatched decompression, mmap/buffered reads, binary
    /// detection, and line splitting.
    pub mod io;

    /// Gitignore-aware directory walking and two-tree pairing.
    pub mod walk;

    /// Bounded worker pool and mutex-serialized output sink.
    pub mod pool;
}

/// Report formatters consuming the core's operation stream.
pub mod format;

// Strategic re-exports for a clean CLI interface.
pub use cli::{AppContext, Cli, Commands};
pub use core::diff::diff;
pub use core::options::ComparisonOptions;
