use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("Table full.")]
    TableFull { max_rows: usize },

    #[error("Field '{field}' is too long ({len} bytes, max: {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Row index {index} out of range (max rows: {max_rows})")]
    IndexOutOfRange { index: usize, max_rows: usize },

    #[error("Invalid table configuration: {details}")]
    InvalidConfig { details: String },
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
