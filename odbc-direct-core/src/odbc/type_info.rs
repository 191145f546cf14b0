//! ODBC type information.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// The native SQL data type of a result-set column.
///
/// Built from the raw type code reported by column introspection. Drivers
/// are free to report codes outside the standard set; those land in
/// [`OdbcDataType::Other`] and are fetched through the text path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OdbcDataType {
    Char,
    Varchar,
    LongVarchar,
    WChar,
    WVarchar,
    WLongVarchar,
    Decimal,
    Numeric,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Float,
    Double,
    Bit,
    Date,
    Time,
    Timestamp,
    /// A type code this connector does not recognize.
    Other(i16),
}

impl OdbcDataType {
    /// Map a raw SQL type code onto the closed variant set.
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => Self::Char,
            12 => Self::Varchar,
            -1 => Self::LongVarchar,
            -8 => Self::WChar,
            -9 => Self::WVarchar,
            -10 => Self::WLongVarchar,
            3 => Self::Decimal,
            2 => Self::Numeric,
            -6 => Self::TinyInt,
            5 => Self::SmallInt,
            4 => Self::Integer,
            -5 => Self::BigInt,
            7 => Self::Real,
            6 => Self::Float,
            8 => Self::Double,
            -7 => Self::Bit,
            91 => Self::Date,
            92 => Self::Time,
            93 => Self::Timestamp,
            other => Self::Other(other),
        }
    }

    /// The raw SQL type code this variant stands for.
    pub fn code(&self) -> i16 {
        match self {
            Self::Char => 1,
            Self::Varchar => 12,
            Self::LongVarchar => -1,
            Self::WChar => -8,
            Self::WVarchar => -9,
            Self::WLongVarchar => -10,
            Self::Decimal => 3,
            Self::Numeric => 2,
            Self::TinyInt => -6,
            Self::SmallInt => 5,
            Self::Integer => 4,
            Self::BigInt => -5,
            Self::Real => 7,
            Self::Float => 6,
            Self::Double => 8,
            Self::Bit => -7,
            Self::Date => 91,
            Self::Time => 92,
            Self::Timestamp => 93,
            Self::Other(code) => *code,
        }
    }

    /// The display name for this type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::LongVarchar => "LONGVARCHAR",
            Self::WChar => "WCHAR",
            Self::WVarchar => "WVARCHAR",
            Self::WLongVarchar => "WLONGVARCHAR",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Real => "REAL",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Bit => "BIT",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Other(_) => "OTHER",
        }
    }

    /// Check if this is a character/string type.
    pub fn is_character(&self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::Varchar
                | Self::LongVarchar
                | Self::WChar
                | Self::WVarchar
                | Self::WLongVarchar
        )
    }

    /// Check if this is a date/time type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }

    /// Check if this is an exact integer type.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::Integer | Self::BigInt
        )
    }

    /// Check if this type is materialized as a 64-bit float (including
    /// decimal/numeric, whose extra precision is accepted to be lost).
    pub fn is_double_backed(&self) -> bool {
        matches!(
            self,
            Self::Real | Self::Float | Self::Double | Self::Decimal | Self::Numeric
        )
    }
}

impl Display for OdbcDataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Other(code) => write!(f, "OTHER({code})"),
            _ => f.pad(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_codes_round_trip() {
        for code in [1, 12, -1, -8, -9, -10, 3, 2, -6, 5, 4, -5, 7, 6, 8, -7, 91, 92, 93] {
            assert_eq!(OdbcDataType::from_code(code).code(), code);
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_other() {
        // -155 is SQL Server's DATETIMEOFFSET, which we do not special-case.
        assert_eq!(OdbcDataType::from_code(-155), OdbcDataType::Other(-155));
        assert_eq!(OdbcDataType::Other(-155).code(), -155);
        assert_eq!(OdbcDataType::from_code(-155).to_string(), "OTHER(-155)");
    }

    #[test]
    fn category_predicates() {
        assert!(OdbcDataType::WVarchar.is_character());
        assert!(!OdbcDataType::Integer.is_character());
        assert!(OdbcDataType::Timestamp.is_temporal());
        assert!(OdbcDataType::TinyInt.is_integer());
        assert!(OdbcDataType::Numeric.is_double_backed());
        assert!(!OdbcDataType::Bit.is_double_backed());
    }

    #[test]
    fn display_names() {
        assert_eq!(OdbcDataType::Varchar.to_string(), "VARCHAR");
        assert_eq!(OdbcDataType::Bit.name(), "BIT");
    }
}
