//! Foreign-key directive parsing and cardinality → arrow-style mapping.
//!
//! A directive looks like `FK orders.id 1:n`: the keyword, the referenced
//! table (optionally qualified with a column), and the own:foreign
//! cardinality pair. Cardinality codes are kept as raw strings and resolved
//! to an [`ArrowStyle`] only when an edge is built, so a bad code fails the
//! render, not the import.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "bad foreign key directive {input:?} in {table}.{column}: \
     expected `FK <table>[.<column>] <cardinality>:<cardinality_fk>`"
)]
pub struct ForeignKeyFormatError {
    pub table: String,
    pub column: String,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown cardinality code {code:?} in {table}.{column}: \
     expected 0, 1, n, 11, 01, 0n or 1n"
)]
pub struct CardinalityError {
    pub table: String,
    pub column: String,
    pub code: String,
}

/// Arrowhead/arrowtail symbol understood by the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowStyle {
    NoArrow,
    Tee,
    Crow,
    TeeTee,
    TeeOdot,
    CrowOdot,
    CrowTee,
}

impl ArrowStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoArrow => "none",
            Self::Tee => "tee",
            Self::Crow => "crow",
            Self::TeeTee => "teetee",
            Self::TeeOdot => "teeodot",
            Self::CrowOdot => "crowodot",
            Self::CrowTee => "crowtee",
        }
    }
}

/// Resolve a cardinality code: compound codes (`11`, `01`, `0n`, `1n`) use
/// the compound table, single letters fall back to the legacy `0`/`1`/`n`
/// table.
pub fn arrow_style(code: &str) -> Option<ArrowStyle> {
    if code.len() > 1 {
        match code {
            "11" => Some(ArrowStyle::TeeTee),
            "01" => Some(ArrowStyle::TeeOdot),
            "0n" => Some(ArrowStyle::CrowOdot),
            "1n" => Some(ArrowStyle::CrowTee),
            _ => None,
        }
    } else {
        match code {
            "0" => Some(ArrowStyle::NoArrow),
            "1" => Some(ArrowStyle::Tee),
            "n" => Some(ArrowStyle::Crow),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub referenced_table: String,
    pub referenced_column: String,
    pub cardinality_own: String,
    pub cardinality_foreign: String,
}

impl ForeignKey {
    /// Parse a `FK <table>[.<column>] <card>:<card_fk>` directive. `table`
    /// and `column` name the referencing column and are only used for error
    /// context; an unqualified target references a column with the same name
    /// as `column`. The parse is atomic: on any failure nothing is built.
    pub fn parse(
        directive: &str,
        table: &str,
        column: &str,
    ) -> Result<Self, ForeignKeyFormatError> {
        let fail = || ForeignKeyFormatError {
            table: table.to_string(),
            column: column.to_string(),
            input: directive.to_string(),
        };

        let mut tokens = directive.split(' ');
        let (Some(keyword), Some(target), Some(pair), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(fail());
        };
        if keyword != "FK" {
            return Err(fail());
        }

        let (referenced_table, referenced_column) = match target.split_once('.') {
            Some((t, c)) => (t.to_string(), c.to_string()),
            None => (target.to_string(), column.to_string()),
        };

        // The `:` separator distinguishes the pair form from the legacy
        // single-cardinality form, which is not accepted here.
        let Some((own, foreign)) = pair.split_once(':') else {
            return Err(fail());
        };

        Ok(Self {
            referenced_table,
            referenced_column,
            cardinality_own: own.to_ascii_lowercase(),
            cardinality_foreign: foreign.to_ascii_lowercase(),
        })
    }

    /// Arrow style at the referenced end (foreign cardinality).
    pub fn arrow_head(&self) -> Option<ArrowStyle> {
        arrow_style(&self.cardinality_foreign)
    }

    /// Arrow style at the referencing end (own cardinality).
    pub fn arrow_tail(&self) -> Option<ArrowStyle> {
        arrow_style(&self.cardinality_own)
    }
}
