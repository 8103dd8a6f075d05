//! Password generation policy as declared on the resource.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PASSWORD_LENGTH: i64 = 16;

/// Generation policy for the `PasswordOptions` property.
///
/// Every field is optional on the wire; the accessors apply the documented
/// defaults so callers compare and generate against the effective policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PasswordOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_numbers: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_symbols: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_similar_characters: Option<bool>,

    /// Bumping this forces a new password even when nothing else changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<i64>,
}

impl PasswordOptions {
    pub fn length(&self) -> i64 {
        self.length.unwrap_or(DEFAULT_PASSWORD_LENGTH)
    }

    pub fn include_numbers(&self) -> bool {
        self.include_numbers.unwrap_or(true)
    }

    pub fn include_symbols(&self) -> bool {
        self.include_symbols.unwrap_or(true)
    }

    pub fn exclude_similar_characters(&self) -> bool {
        self.exclude_similar_characters.unwrap_or(false)
    }

    /// True when both policies would keep the same password on Update.
    ///
    /// Compares the effective `length`, `include_numbers`, `include_symbols`
    /// and the raw `serial`. `exclude_similar_characters` does not take part.
    pub fn same_generation_inputs(&self, other: &PasswordOptions) -> bool {
        self.length() == other.length()
            && self.include_numbers() == other.include_numbers()
            && self.include_symbols() == other.include_symbols()
            && self.serial == other.serial
    }

    pub fn with_length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_numbers(mut self, include: bool) -> Self {
        self.include_numbers = Some(include);
        self
    }

    pub fn with_symbols(mut self, include: bool) -> Self {
        self.include_symbols = Some(include);
        self
    }

    pub fn with_exclude_similar(mut self, exclude: bool) -> Self {
        self.exclude_similar_characters = Some(exclude);
        self
    }

    pub fn with_serial(mut self, serial: i64) -> Self {
        self.serial = Some(serial);
        self
    }
}
