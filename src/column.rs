use crate::fk::ForeignKey;

/// Abstraction level of the rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErLevel {
    /// Full column detail, data types included.
    Physical,
    /// Business-friendly subset: technical columns hidden, no data types.
    Logical,
    /// Tables only, no columns.
    Conceptual,
}

impl ErLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "physical" => Some(Self::Physical),
            "logical" => Some(Self::Logical),
            "conceptual" => Some(Self::Conceptual),
            _ => None,
        }
    }
}

/// Column visibility, resolved once from the `name:flag` suffix convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    HiddenInLogical,
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub table_name: String,
    pub visibility: Visibility,
    pub is_primary_key: bool,
    pub foreign_key: Option<ForeignKey>,
}

impl Column {
    /// Build a column from a raw sheet cell name. A `:h` suffix (any case)
    /// hides the column everywhere, any other `:x` suffix hides it at the
    /// logical level only; the suffix is stripped from the stored name.
    pub fn new(table_name: &str, raw_name: &str, data_type: &str) -> Self {
        let (name, visibility) = split_visibility(raw_name);
        Self {
            name,
            data_type: data_type.to_string(),
            table_name: table_name.to_string(),
            visibility,
            is_primary_key: false,
            foreign_key: None,
        }
    }

    pub fn is_hidden(&self, level: ErLevel) -> bool {
        match level {
            ErLevel::Physical => self.visibility == Visibility::Hidden,
            ErLevel::Logical => matches!(
                self.visibility,
                Visibility::Hidden | Visibility::HiddenInLogical
            ),
            // The conceptual view never shows columns, so nothing is
            // individually hidden there.
            ErLevel::Conceptual => false,
        }
    }
}

fn split_visibility(raw: &str) -> (String, Visibility) {
    match raw.split_once(':') {
        Some((name, flag)) if flag.eq_ignore_ascii_case("h") => {
            (name.to_string(), Visibility::Hidden)
        }
        Some((name, _)) => (name.to_string(), Visibility::HiddenInLogical),
        None => (raw.to_string(), Visibility::Visible),
    }
}
