//! Category command handlers.

use crate::categories::Categories;
use crate::commands::{plural, Out};
use crate::{Config, Result};

/// Lists the stored categories.
pub fn list_categories(config: Config) -> Result<Out<Categories>> {
    let categories = config.categories().load()?;
    if categories.is_empty() {
        return Ok(Out::new("There are no categories", categories));
    }
    let message = format!(
        "{}: {}",
        plural(categories.len(), "category", "categories"),
        categories.names().join(", ")
    );
    Ok(Out::new(message, categories))
}

/// Adds a category. The name is stored trimmed and in title case, and that form is returned.
///
/// # Errors
/// - `Validation` if `name` is blank.
pub fn add_category(config: Config, name: &str) -> Result<Out<String>> {
    let canonical = config.categories().add(name)?;
    Ok(Out::new(format!("Added category '{canonical}'"), canonical))
}

/// Removes a category. The name must match a stored name exactly; removing a name that is not
/// stored is not an error.
pub fn remove_category(config: Config, name: &str) -> Result<Out<bool>> {
    let removed = config.categories().remove(name)?;
    let message = if removed {
        format!("Removed category '{name}'")
    } else {
        format!("There is no category '{name}', nothing was removed")
    };
    Ok(Out::new(message, removed))
}
