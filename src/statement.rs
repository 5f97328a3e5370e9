use std::io::{self, Write};

use thiserror::Error;

use crate::{error::DatabaseError, row::Record, table::Table};

// Non-SQL statements like .exit are called “meta-commands”.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Unrecognized(String),
}

impl MetaCommand {
    pub fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized(input.to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Record),
    Select,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    Syntax,

    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,

    #[error("Unrecognized command: {0}")]
    Unrecognized(String),

    #[error("Error: {0}")]
    Database(DatabaseError),
}

impl Statement {
    pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
        let mut tokens = input.split_whitespace();
        match tokens.next() {
            Some("insert") => {
                let (Some(id), Some(username), Some(email), None) =
                    (tokens.next(), tokens.next(), tokens.next(), tokens.next())
                else {
                    return Err(PrepareError::Syntax);
                };
                let id = parse_id(id)?;
                let record = Record::new(id, username, email).map_err(|err| match err {
                    DatabaseError::FieldTooLong { .. } => PrepareError::StringTooLong,
                    other => PrepareError::Database(other),
                })?;
                Ok(Statement::Insert(record))
            }
            Some("select") if tokens.next().is_none() => Ok(Statement::Select),
            Some("select") => Err(PrepareError::Syntax),
            _ => Err(PrepareError::Unrecognized(input.to_string())),
        }
    }

    /// Runs the statement against `table`, writing any result rows to `out`.
    pub fn execute<W: Write>(&self, table: &mut Table, out: &mut W) -> Result<(), ExecuteError> {
        match self {
            Statement::Insert(record) => table.append(record)?,
            Statement::Select => {
                for record in table.scan() {
                    writeln!(out, "{record}")?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Error: {0}")]
    Database(#[from] DatabaseError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn parse_id(token: &str) -> Result<u32, PrepareError> {
    let id: i64 = token.parse().map_err(|_| PrepareError::Syntax)?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    u32::try_from(id).map_err(|_| PrepareError::Syntax)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    Empty,
    Meta(MetaCommand),
    Statement(Result<Statement, PrepareError>),
}

impl InputType {
    pub fn parse(input: &str) -> InputType {
        let input = input.trim();
        if input.is_empty() {
            InputType::Empty
        } else if let Some(meta) = MetaCommand::parse(input) {
            InputType::Meta(meta)
        } else {
            InputType::Statement(Statement::prepare(input))
        }
    }
}
