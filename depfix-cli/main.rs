mod dry_run;

use anyhow::Result;
use clap::Parser;
use depfix_runner::{Config, Io, RealSystem, Settings};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// The dependency files to process.
    pub depfiles: Vec<std::path::PathBuf>,
    /// The path to the config file. Defaults to searching for `depfix.toml`
    /// in the working dir and its parents.
    #[clap(short, long)]
    pub config: Option<std::path::PathBuf>,
    /// Directory below which absolute prerequisite paths are made relative.
    /// Overrides the config file.
    #[clap(short, long)]
    pub base_dir: Option<String>,
    /// List the decoded path tokens of each file instead of rewriting.
    #[clap(short, long)]
    pub list: bool,
    /// Dry run; print rewritten content to stdout instead of writing files.
    #[clap(long)]
    pub dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.depfiles.is_empty() {
        anyhow::bail!("no dependency file specified");
    }

    let config = load_config(&args)?;
    let base_dir = args.base_dir.clone().or(config.base_dir);
    if let Some(ref base_dir) = base_dir {
        if !depfix_fs::is_absolute_path(base_dir) {
            anyhow::bail!("base dir must be an absolute path: {base_dir}");
        }
    }

    let cwd = std::env::current_dir()?;
    let Some(cwd) = cwd.to_str() else {
        anyhow::bail!("working directory is not valid UTF-8");
    };
    let settings = Settings {
        base_dir,
        cwd: cwd.to_owned(),
    };

    let io: Box<dyn Io> = if args.dry_run {
        Box::new(dry_run::DryRun::new())
    } else {
        Box::new(RealSystem::new())
    };

    for depfile in &args.depfiles {
        if args.list {
            for token in depfix_runner::read_dependencies(&*io, depfile)? {
                println!("{token}");
            }
        } else {
            let outcome = depfix_runner::make_paths_relative(&*io, &settings, depfile)?;
            tracing::debug!("{}: {outcome:?}", depfile.display());
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let path = match args.config {
        Some(ref path) => Some(path.clone()),
        None => find_config_file()?,
    };
    let Some(path) = path else {
        return Ok(Config::default());
    };
    tracing::debug!("using config file: {}", path.display());
    let source = std::fs::read_to_string(&path)?;
    Ok(Config::from_toml(&source)?)
}

fn find_config_file() -> Result<Option<std::path::PathBuf>> {
    let mut current = std::env::current_dir()?;
    loop {
        let candidate = current.join(depfix_runner::CONFIG_FILENAME);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
        if let Some(parent) = current.parent() {
            current = parent.to_owned();
        } else {
            return Ok(None);
        }
    }
}
