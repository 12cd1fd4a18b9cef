use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the data directory and:
/// - Creates an initial `config.json` file with default budgets
/// - Creates an empty expenses file and the default categories file
///
/// Running it again keeps the files that already exist.
///
/// # Arguments
/// - `home` - The directory that will be the root of data directory, e.g. `$HOME/spendlog`
///
/// # Errors
/// - Returns an error if any file operations fail.
pub fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)?;
    Ok(format!(
        "Successfully created the spendlog directory and config at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("spendlog");
        let out = init(&home).unwrap();
        assert!(out.message().contains("Successfully created"));
        assert!(home.join("config.json").is_file());
        assert!(home.join("data").join("expenses.csv").is_file());
        assert!(home.join("data").join("categories.json").is_file());
        assert!(home.join("data").join("reports").is_dir());

        let content = std::fs::read_to_string(home.join("data").join("expenses.csv")).unwrap();
        assert_eq!(content, "date,amount,category,description\n");
    }

    #[test]
    fn test_init_twice() {
        let dir = TempDir::new().unwrap();
        init(dir.path()).unwrap();
        init(dir.path()).unwrap();
        assert!(Config::load(dir.path()).is_ok());
    }
}
