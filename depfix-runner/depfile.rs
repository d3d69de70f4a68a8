use std::path::Path;

use crate::{Error, Io, Settings};

/// Outcome of a single depfile rewrite attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No base directory is configured; the file was not touched.
    Skipped,
    /// No absolute prerequisite path could be made relative; the file was
    /// not written.
    Unchanged,
    /// The file was rewritten in place.
    Rewritten,
}

/// Replace absolute prerequisite paths with relative paths in the
/// dependency file at `depfile`.
///
/// The file is written back only when at least one token changed, so an
/// up-to-date file keeps its timestamp. Paths are made relative to
/// [`Settings::cwd`], and only paths below [`Settings::base_dir`] are
/// considered.
pub fn make_paths_relative(
    io: &dyn Io,
    settings: &Settings,
    depfile: &Path,
) -> Result<Outcome, Error> {
    let Some(base_dir) = settings.base_dir.as_deref() else {
        tracing::debug!("base dir not set, skip using relative paths");
        return Ok(Outcome::Skipped);
    };

    let content = io.read_file(depfile)?;
    let content = std::str::from_utf8(&content)?;

    let rewritten = depfix_depfile::rewrite_source_paths(content, base_dir, |path| {
        depfix_fs::make_relative(path, base_dir, &settings.cwd)
    });
    match rewritten {
        Some(rewritten) => {
            io.write_file(depfile, rewritten.as_bytes())?;
            Ok(Outcome::Rewritten)
        }
        None => {
            tracing::debug!(
                "no paths in dependency file {} made relative",
                depfile.display()
            );
            Ok(Outcome::Unchanged)
        }
    }
}

/// The decoded path tokens of the dependency file at `depfile`, for
/// consumers that only need the dependency list (e.g. cache key
/// computation) and not rewriting.
pub fn read_dependencies(io: &dyn Io, depfile: &Path) -> Result<Vec<String>, Error> {
    let content = io.read_file(depfile)?;
    let content = std::str::from_utf8(&content)?;
    Ok(depfix_depfile::tokenize(content))
}
