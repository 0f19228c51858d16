use crate::error::{DbError, Result};
use std::fmt;
use std::str::FromStr;

/// Key type for profiles
pub type ProfileId = i64;

/// Default maximum name length in characters
pub const DEFAULT_NAME_MAX_LEN: usize = 99;

/// Default maximum contact length in characters
pub const DEFAULT_CONTACT_MAX_LEN: usize = 14;

/// Sex code stored with a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Single-character code used for input and display
    pub fn as_char(self) -> char {
        match self {
            Sex::Male => 'M',
            Sex::Female => 'F',
        }
    }
}

impl TryFrom<char> for Sex {
    type Error = DbError;

    fn try_from(code: char) -> Result<Self> {
        match code {
            'M' => Ok(Sex::Male),
            'F' => Ok(Sex::Female),
            other => Err(DbError::InvalidField {
                field: "sex",
                reason: format!("expected M or F, got {:?}", other),
            }),
        }
    }
}

impl FromStr for Sex {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Sex::try_from(code),
            _ => Err(DbError::InvalidField {
                field: "sex",
                reason: format!("expected M or F, got {:?}", s.trim()),
            }),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Length bounds applied to text fields before they reach the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub name_max_len: usize,
    pub contact_max_len: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            name_max_len: DEFAULT_NAME_MAX_LEN,
            contact_max_len: DEFAULT_CONTACT_MAX_LEN,
        }
    }
}

/// A single profile record.
///
/// The `id` is the sort and search key and never changes once the record
/// is stored; every other field is payload the index does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub age: i32,
    pub sex: Sex,
    pub contact: String,
}

impl Profile {
    /// Create a profile without checking field bounds
    pub fn new(
        id: ProfileId,
        name: impl Into<String>,
        age: i32,
        sex: Sex,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            sex,
            contact: contact.into(),
        }
    }

    /// Create a profile after checking text fields against `limits`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` if the name or contact is empty or longer
    /// than allowed. Lengths are counted in characters, not bytes.
    pub fn validated(
        id: ProfileId,
        name: &str,
        age: i32,
        sex: Sex,
        contact: &str,
        limits: &FieldLimits,
    ) -> Result<Self> {
        check_text("name", name, limits.name_max_len)?;
        check_text("contact", contact, limits.contact_max_len)?;
        Ok(Self::new(id, name, age, sex, contact))
    }
}

fn check_text(field: &'static str, value: &str, max_len: usize) -> Result<()> {
    if value.is_empty() {
        return Err(DbError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(DbError::InvalidField {
            field,
            reason: format!("{} characters exceeds limit of {}", len, max_len),
        });
    }
    Ok(())
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Age: {}, Gender: {}, Contact: {}",
            self.id, self.name, self.age, self.sex, self.contact
        )
    }
}
