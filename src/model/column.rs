use anyhow::bail;
use serde::{Deserialize, Serialize};

/// The canonical columns of the record file, in the order they are written.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    Amount,
    Category,
    Description,
}

serde_plain::derive_display_from_serialize!(Column);
serde_plain::derive_fromstr_from_deserialize!(Column);

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Date,
        Column::Amount,
        Column::Category,
        Column::Description,
    ];

    /// Matches a header cell. Surrounding whitespace and case are ignored, so files written with
    /// `Date,Amount,Category,Description` are understood.
    pub fn from_header(header: impl AsRef<str>) -> anyhow::Result<Column> {
        let header = header.as_ref().trim().to_lowercase();
        match header.as_str() {
            DATE_STR => Ok(Column::Date),
            AMOUNT_STR => Ok(Column::Amount),
            CATEGORY_STR => Ok(Column::Category),
            DESCRIPTION_STR => Ok(Column::Description),
            bad => bail!("Invalid expense column name '{bad}'"),
        }
    }

    pub fn as_header_str(&self) -> &'static str {
        match self {
            Column::Date => DATE_STR,
            Column::Amount => AMOUNT_STR,
            Column::Category => CATEGORY_STR,
            Column::Description => DESCRIPTION_STR,
        }
    }

    /// The position of this column in a written row.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

const DATE_STR: &str = "date";
const AMOUNT_STR: &str = "amount";
const CATEGORY_STR: &str = "category";
const DESCRIPTION_STR: &str = "description";
