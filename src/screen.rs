// the "standard" regular expression package
use regex::Regex;

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::error::{Result, TabsError};
use crate::valuetype::{Code, Idented, ValueType};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Puts a pattern in front of another value type. Text that does not match
/// is rejected before the wrapped type sees it, so a screened enumeration
/// never interns a label the pattern refuses.
///
/// Empty text bypasses the pattern and goes straight to the wrapped type,
/// which decides about void on its own.
#[derive(Debug, Clone)]
pub struct Screened {
    inner: Arc<dyn ValueType>,
    pattern: Regex,
}

impl Screened {
    pub fn new(inner: Arc<dyn ValueType>, pattern: &str) -> Result<Self> {
        Ok(Self {
            inner,
            pattern: Regex::new(pattern)?,
        })
    }
    pub fn identifier(inner: Arc<dyn ValueType>) -> Self {
        Self {
            inner,
            pattern: IDENTIFIER.clone(),
        }
    }
    pub fn inner(&self) -> Arc<dyn ValueType> {
        Arc::clone(&self.inner)
    }
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
    fn screen(&self, text: &str) -> Result<()> {
        if text.is_empty() || self.pattern.is_match(text) {
            Ok(())
        } else {
            Err(TabsError::parse(format!(
                "'{}' is not admissible for {}",
                text,
                self.inner.ident()
            )))
        }
    }
}
impl Idented for Screened {
    fn ident(&self) -> &str {
        self.inner.ident()
    }
}
impl ValueType for Screened {
    fn data_type(&self) -> &'static str {
        "Screened"
    }
    fn parse(&self, text: &str) -> Result<Code> {
        let mut normalized = text.to_owned();
        self.validate(&mut normalized)?;
        self.inner.parse(text)
    }
    fn validate(&self, text: &mut String) -> Result<()> {
        self.inner.validate(text)?;
        self.screen(text)
    }
    fn emit(&self, code: Code) -> String {
        self.inner.emit(code)
    }
    fn valid(&self, code: Code) -> bool {
        self.inner.valid(code)
    }
}
