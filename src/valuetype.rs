// used for rendering and reading timestamps
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

// used to print out readable forms of a value type
use std::fmt;
use std::fmt::Write as _;

// used to recover the concrete type behind a registered value type
use std::any::Any;
use std::sync::Arc;

use crate::error::{Result, TabsError};

/// Every value in a table is stored as one of these.
pub type Code = u64;

/// The canonical code for the empty value, where a value type accepts one.
pub const VOID: Code = 0;

pub trait Idented {
    fn ident(&self) -> &str;
}

pub trait AsAny {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}
impl<T: Any + Send + Sync> AsAny for T {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// The contract every column type fulfils: text goes in through `parse`,
/// codes come back out through `emit`.
///
/// `validate` is the preflight for raw input. It may normalize the text in
/// place (trimming, for instance) and reports whether the result would be
/// admissible, without touching any state of the value type.
pub trait ValueType: Idented + AsAny + fmt::Debug + Send + Sync {
    fn data_type(&self) -> &'static str;
    fn parse(&self, text: &str) -> Result<Code>;
    fn validate(&self, text: &mut String) -> Result<()>;
    fn emit(&self, code: Code) -> String;
    fn valid(&self, code: Code) -> bool;
}

// ------------- Empty -------------
pub const EMPTY_IDENT: &str = "empty";

/// Placeholder for columns that must never hold data.
#[derive(Debug, Default)]
pub struct EmptyValueType;

impl EmptyValueType {
    pub fn new() -> Self {
        Self
    }
}
impl Idented for EmptyValueType {
    fn ident(&self) -> &str {
        EMPTY_IDENT
    }
}
impl ValueType for EmptyValueType {
    fn data_type(&self) -> &'static str {
        "Empty"
    }
    fn parse(&self, text: &str) -> Result<Code> {
        let mut text = text.to_owned();
        self.validate(&mut text)?;
        Ok(VOID)
    }
    fn validate(&self, text: &mut String) -> Result<()> {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return Err(TabsError::parse(format!("'{}' is not empty", trimmed)));
        }
        text.clear();
        Ok(())
    }
    fn emit(&self, _code: Code) -> String {
        String::new()
    }
    fn valid(&self, code: Code) -> bool {
        code == VOID
    }
}

// ------------- Default -------------
/// Constant-valued type: whatever comes in, `code` is stored and `text` is shown.
#[derive(Debug)]
pub struct DefaultValueType {
    name: String,
    text: String,
    code: Code,
}

impl DefaultValueType {
    pub fn new(name: &str, text: &str, code: Code) -> Self {
        Self {
            name: name.to_owned(),
            text: text.to_owned(),
            code,
        }
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn code(&self) -> Code {
        self.code
    }
}
impl Idented for DefaultValueType {
    fn ident(&self) -> &str {
        &self.name
    }
}
impl ValueType for DefaultValueType {
    fn data_type(&self) -> &'static str {
        "Default"
    }
    fn parse(&self, _text: &str) -> Result<Code> {
        Ok(self.code)
    }
    fn validate(&self, _text: &mut String) -> Result<()> {
        Ok(())
    }
    fn emit(&self, _code: Code) -> String {
        self.text.clone()
    }
    fn valid(&self, code: Code) -> bool {
        code == self.code
    }
}

// ------------- Time -------------
/// Codes are seconds since the Unix epoch, rendered in UTC through a
/// strftime-style format.
#[derive(Debug)]
pub struct TimeValueType {
    name: String,
    format: String,
}

impl TimeValueType {
    pub fn new(name: &str, format: &str) -> Result<Self> {
        // some items are only understood when parsing, rendering them fails
        let mut rendered = String::new();
        if format.is_empty()
            || StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
            || write!(rendered, "{}", DateTime::<Utc>::UNIX_EPOCH.format(format)).is_err()
        {
            return Err(TabsError::Config(format!(
                "Bad time format '{}' for {}",
                format, name
            )));
        }
        Ok(Self {
            name: name.to_owned(),
            format: format.to_owned(),
        })
    }
    pub fn format(&self) -> &str {
        &self.format
    }
    fn seconds(&self, text: &str) -> Option<i64> {
        if let Ok(t) = DateTime::parse_from_str(text, &self.format) {
            return Some(t.timestamp());
        }
        if let Ok(t) = NaiveDateTime::parse_from_str(text, &self.format) {
            return Some(t.and_utc().timestamp());
        }
        NaiveDate::parse_from_str(text, &self.format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc().timestamp())
    }
}
impl Idented for TimeValueType {
    fn ident(&self) -> &str {
        &self.name
    }
}
impl ValueType for TimeValueType {
    fn data_type(&self) -> &'static str {
        "Time"
    }
    fn parse(&self, text: &str) -> Result<Code> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TabsError::EmptyDisallowed {
                value_type: self.name.clone(),
            });
        }
        let seconds = self.seconds(text).ok_or_else(|| {
            TabsError::parse(format!("'{}' does not match the {} format '{}'", text, self.name, self.format))
        })?;
        Code::try_from(seconds)
            .map_err(|_| TabsError::out_of_range(format!("'{}' is before the epoch", text)))
    }
    fn validate(&self, text: &mut String) -> Result<()> {
        let trimmed = text.trim().to_owned();
        self.parse(&trimmed)?;
        *text = trimmed;
        Ok(())
    }
    fn emit(&self, code: Code) -> String {
        let mut rendered = String::new();
        match i64::try_from(code)
            .ok()
            .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
        {
            Some(t) if write!(rendered, "{}", t.format(&self.format)).is_ok() => rendered,
            _ => code.to_string(),
        }
    }
    fn valid(&self, _code: Code) -> bool {
        true
    }
}

// ------------- Version -------------
pub const VERSION_MIN: Code = 100_000_000;
pub const VERSION_MAX: Code = 999_999_999;

/// A fixed-layout build identifier: nine digits shown as `DD.D.D.DDDDD`.
/// The dots are cosmetic, the code is the plain integer so ordering is numeric.
#[derive(Debug)]
pub struct VersionValueType {
    name: String,
    zero: Code,
}

impl VersionValueType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            zero: VOID,
        }
    }
    pub fn zero(&self) -> Code {
        self.zero
    }
}
impl Idented for VersionValueType {
    fn ident(&self) -> &str {
        &self.name
    }
}
impl ValueType for VersionValueType {
    fn data_type(&self) -> &'static str {
        "Version"
    }
    fn parse(&self, text: &str) -> Result<Code> {
        if text.is_empty() {
            return Ok(self.zero);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(TabsError::parse(format!("Bad {} version: blank text", self.name)));
        }
        let digits: String = text.chars().filter(|c| *c != '.').collect();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TabsError::parse(format!("Bad {} version '{}'", self.name, text)));
        }
        let code = digits
            .parse::<Code>()
            .map_err(|_| TabsError::out_of_range(format!("Bad {} version '{}'", self.name, text)))?;
        if !self.valid(code) {
            return Err(TabsError::out_of_range(format!(
                "Bad {} version '{}': expected nine digits",
                self.name, text
            )));
        }
        Ok(code)
    }
    fn validate(&self, text: &mut String) -> Result<()> {
        self.parse(text)?;
        *text = text.trim().to_owned();
        Ok(())
    }
    fn emit(&self, code: Code) -> String {
        if !self.valid(code) {
            panic!("Bad {} version value {}", self.name, code);
        }
        if code == self.zero {
            return String::new();
        }
        let s = code.to_string();
        format!("{}.{}.{}.{}", &s[..2], &s[2..3], &s[3..4], &s[4..])
    }
    fn valid(&self, code: Code) -> bool {
        code == self.zero || (VERSION_MIN..=VERSION_MAX).contains(&code)
    }
}
