use core::fmt;

/// Which numeric column of a tick-log row failed to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleField {
    Tick,
    Shot,
    Hit,
    Kill,
    Yaw,
    Pitch,
    Weapon,
}

impl fmt::Display for SampleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tick => write!(f, "tick"),
            Self::Shot => write!(f, "shot"),
            Self::Hit => write!(f, "hit"),
            Self::Kill => write!(f, "kill"),
            Self::Yaw => write!(f, "yaw"),
            Self::Pitch => write!(f, "pitch"),
            Self::Weapon => write!(f, "weapon"),
        }
    }
}

/// Tick-log ingestion failure. Line numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    InvalidInteger {
        line: usize,
        field: SampleField,
        value: String,
    },
    InvalidFloat {
        line: usize,
        field: SampleField,
        value: String,
    },
    Io {
        line: usize,
        message: String,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::FieldCount { line, .. }
            | Self::InvalidInteger { line, .. }
            | Self::InvalidFloat { line, .. }
            | Self::Io { line, .. } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected {expected} comma-separated fields, found {found}"
            ),
            Self::InvalidInteger { line, field, value } => {
                write!(f, "line {line}: {field} is not an integer: {value:?}")
            }
            Self::InvalidFloat { line, field, value } => {
                write!(f, "line {line}: {field} is not a number: {value:?}")
            }
            Self::Io { line, message } => write!(f, "line {line}: read failed: {message}"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractError {
    InvalidEventLog { message: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEventLog { message } => write!(f, "invalid event log: {message}"),
        }
    }
}

impl std::error::Error for ExtractError {}
