//! Show command implementation.

use super::open_store;
use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use rollcall_domain::traits::TableStore;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(args.out.as_deref(), config.store.options, config);
    let mut rows = store.load()?;

    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    println!("{}", formatter.format_rows(&rows)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use std::fs;

    #[test]
    fn test_show_missing_table_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let args = ShowArgs {
            out: Some(dir.path().join("results.csv")),
            limit: Some(3),
        };

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert!(execute_show(args, &Config::default(), &formatter).is_ok());
    }

    #[test]
    fn test_show_rejects_foreign_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, "id,score\n1,2\n").unwrap();

        let args = ShowArgs {
            out: Some(path),
            limit: None,
        };

        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(matches!(
            execute_show(args, &Config::default(), &formatter),
            Err(CliError::Store(_))
        ));
    }
}
