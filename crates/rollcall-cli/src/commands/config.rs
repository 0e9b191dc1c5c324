//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// Prints the effective configuration as TOML. With `--write`, also saves it
/// to `path` when no file exists there yet.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    if args.write {
        if path.exists() {
            println!(
                "{}",
                formatter.warning(&format!("{} already exists, leaving it untouched", path.display()))
            );
        } else {
            config.save(path)?;
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        }
    }

    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;

    #[test]
    fn test_write_creates_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_config(ConfigArgs { write: true }, &Config::default(), &path, &formatter).unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());

        fs::write(&path, "[settings]\ncolor = false\n").unwrap();
        execute_config(ConfigArgs { write: true }, &Config::default(), &path, &formatter).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[settings]\ncolor = false\n");
    }
}
