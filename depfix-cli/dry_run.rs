use std::path::Path;

use depfix_runner::{Io, RealSystem};

/// An `Io` implementation that reads from the real filesystem but prints
/// would-be writes to stdout instead of persisting them.
#[derive(Default)]
pub struct DryRun {
    inner: RealSystem,
}

impl DryRun {
    pub fn new() -> Self {
        Self {
            inner: RealSystem::new(),
        }
    }
}

impl Io for DryRun {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, std::io::Error> {
        self.inner.read_file(path)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), std::io::Error> {
        use std::io::Write as _;

        tracing::info!("dry run, not writing {}", path.display());
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
