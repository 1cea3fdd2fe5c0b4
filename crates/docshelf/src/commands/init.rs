//! `docshelf init` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use docshelf_config::{CliSettings, Config};
use docshelf_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

/// File name of the sample document.
const SAMPLE_FILE_NAME: &str = "getting-started.md";

const SAMPLE_CONTENT: &str = "# Getting Started

This is a sample markdown file to help you get started.

## Introduction

Write your documentation in markdown files and they will be displayed on the website without reformatting.

### Code Example

```javascript
const hello = 'world';
console.log(hello);
```
";

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Path to configuration file (default: auto-discover docshelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Overwrite an existing sample document.
    #[arg(long)]
    force: bool,
}

/// What `seed` did with the sample document.
#[derive(Debug, PartialEq, Eq)]
enum SeedOutcome {
    Written(PathBuf),
    Overwritten(PathBuf),
    Skipped(PathBuf),
}

impl InitArgs {
    /// Execute the init command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the directory cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;

        match seed(&config.docs_resolved.source_dir, self.force)? {
            SeedOutcome::Written(path) => {
                output.success(&format!("Created {}", path.display()));
            }
            SeedOutcome::Overwritten(path) => {
                output.success(&format!("Overwrote {}", path.display()));
            }
            SeedOutcome::Skipped(path) => {
                output.warning(&format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

/// Create `source_dir` and write the sample document into it.
fn seed(source_dir: &Path, force: bool) -> Result<SeedOutcome, CliError> {
    FsStorage::new(source_dir.to_path_buf()).ensure_dir()?;

    let path = source_dir.join(SAMPLE_FILE_NAME);
    let existed = path.exists();
    if existed && !force {
        return Ok(SeedOutcome::Skipped(path));
    }

    std::fs::write(&path, SAMPLE_CONTENT)?;
    tracing::info!(path = %path.display(), "Wrote sample document");

    Ok(if existed {
        SeedOutcome::Overwritten(path)
    } else {
        SeedOutcome::Written(path)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_seed_creates_directory_and_sample() {
        let temp = TempDir::new().unwrap();
        let docs = temp.path().join("docs");

        let outcome = seed(&docs, false).unwrap();

        let path = docs.join("getting-started.md");
        assert_eq!(outcome, SeedOutcome::Written(path.clone()));
        assert_eq!(std::fs::read_to_string(path).unwrap(), SAMPLE_CONTENT);
    }

    #[test]
    fn test_seed_keeps_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("getting-started.md");
        std::fs::write(&path, "# Mine\n").unwrap();

        let outcome = seed(temp.path(), false).unwrap();

        assert_eq!(outcome, SeedOutcome::Skipped(path.clone()));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Mine\n");
    }

    #[test]
    fn test_seed_force_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("getting-started.md");
        std::fs::write(&path, "# Mine\n").unwrap();

        let outcome = seed(temp.path(), true).unwrap();

        assert_eq!(outcome, SeedOutcome::Overwritten(path.clone()));
        assert_eq!(std::fs::read_to_string(path).unwrap(), SAMPLE_CONTENT);
    }

    #[test]
    fn test_sample_has_code_example() {
        assert!(SAMPLE_CONTENT.starts_with("# Getting Started\n"));
        assert!(SAMPLE_CONTENT.contains("```javascript\n"));
    }
}
