use std::borrow::Cow;
use std::fmt;

use crate::{
    EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
    error::{DatabaseError, Result},
};

/// Byte offsets of each column inside a serialized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub id_offset: usize,
    pub username_offset: usize,
    pub email_offset: usize,
    pub row_size: usize,
}

/*
 * Row Layout (no padding between columns)
 * ┌──────────┬────────────────────┬──────────────────────────────┐
 * │ id (4)   │ username (32)      │ email (255)                  │
 * │ u32 LE   │ zero-filled        │ zero-filled                  │
 * └──────────┴────────────────────┴──────────────────────────────┘
 */
pub const fn layout() -> RowLayout {
    RowLayout {
        id_offset: ID_OFFSET,
        username_offset: USERNAME_OFFSET,
        email_offset: EMAIL_OFFSET,
        row_size: ROW_SIZE,
    }
}

/// A single record. Text columns keep their full fixed-size window so a
/// record is a plain `Copy` value and serializes byte for byte.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    username: [u8; USERNAME_SIZE],
    email: [u8; EMAIL_SIZE],
}

impl Record {
    /// Builds a record, rejecting text that does not fit its column.
    /// A value of exactly the column size is accepted: no terminator is
    /// reserved.
    pub fn new(id: u32, username: &str, email: &str) -> Result<Self> {
        Ok(Self {
            id,
            username: fixed_bytes("username", username)?,
            email: fixed_bytes("email", email)?,
        })
    }

    pub fn username(&self) -> Cow<'_, str> {
        text(&self.username)
    }

    pub fn email(&self) -> Cow<'_, str> {
        text(&self.email)
    }

    pub fn username_bytes(&self) -> &[u8; USERNAME_SIZE] {
        &self.username
    }

    pub fn email_bytes(&self) -> &[u8; EMAIL_SIZE] {
        &self.email
    }

    /// Serialize into a row-sized slot.
    pub fn encode(&self, dst: &mut [u8; ROW_SIZE]) {
        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE].copy_from_slice(&self.username);
        dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE].copy_from_slice(&self.email);
    }

    pub fn decode(src: &[u8; ROW_SIZE]) -> Self {
        let mut id = [0u8; ID_SIZE];
        let mut username = [0u8; USERNAME_SIZE];
        let mut email = [0u8; EMAIL_SIZE];

        id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);
        username.copy_from_slice(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        email.copy_from_slice(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);

        Self {
            id: u32::from_le_bytes(id),
            username,
            email,
        }
    }

    pub fn to_bytes(&self) -> [u8; ROW_SIZE] {
        let mut buffer = [0u8; ROW_SIZE];
        self.encode(&mut buffer);
        buffer
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("username", &self.username())
            .field("email", &self.email())
            .finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username(), self.email())
    }
}

fn fixed_bytes<const N: usize>(field: &'static str, input: &str) -> Result<[u8; N]> {
    let bytes = input.as_bytes();
    if bytes.len() > N {
        return Err(DatabaseError::FieldTooLong {
            field,
            len: bytes.len(),
            max: N,
        });
    }

    let mut buffer = [0u8; N];
    buffer[..bytes.len()].copy_from_slice(bytes);
    Ok(buffer)
}

// Text ends at the first zero byte, or fills the whole window.
fn text(window: &[u8]) -> Cow<'_, str> {
    let end = window.iter().position(|&b| b == 0).unwrap_or(window.len());
    String::from_utf8_lossy(&window[..end])
}
