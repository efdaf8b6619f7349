// used to keep the one-to-one mapping between codes and their labels
use bimap::BiMap;

use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::error::{Result, TabsError};
use crate::valuetype::{Code, Idented, ValueType, VOID};

#[derive(Debug, Default)]
struct EnumState {
    labels: BiMap<Code, String>,
    complete: bool,
}

/// A self-interning enumeration. Unknown labels are given the next code on
/// first sight until `complete` is called, after which the label set is frozen.
///
/// Codes are assigned in the order labels are first parsed, starting at 1,
/// and an assigned code never changes.
#[derive(Debug)]
pub struct EnumValueType {
    name: String,
    void: bool,
    state: RwLock<EnumState>,
}

impl EnumValueType {
    pub fn new(name: &str, void: bool) -> Self {
        Self {
            name: name.to_owned(),
            void,
            state: RwLock::new(EnumState::default()),
        }
    }
    /// Interns each label in turn, as if parsed.
    pub fn prime<S: AsRef<str>>(&self, labels: &[S]) -> Result<()> {
        for label in labels {
            self.parse(label.as_ref())?;
        }
        Ok(())
    }
    // Interning never leaves the two maps out of step, so a poisoned lock
    // still guards a consistent state.
    fn read(&self) -> RwLockReadGuard<'_, EnumState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
    fn write(&self) -> RwLockWriteGuard<'_, EnumState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
    pub fn has_void(&self) -> bool {
        self.void
    }
    pub fn is_complete(&self) -> bool {
        self.read().complete
    }
    pub fn complete(&self) {
        let mut state = self.write();
        if !state.complete {
            state.complete = true;
            info!(value_type = %self.name, labels = state.labels.len(), "enumeration completed");
        }
    }
    pub fn len(&self) -> usize {
        self.read().labels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn code(&self, label: &str) -> Option<Code> {
        self.read().labels.get_by_right(label).copied()
    }
    /// Labels in code order.
    pub fn labels(&self) -> Vec<String> {
        let state = self.read();
        (1..=state.labels.len() as Code)
            .filter_map(|code| state.labels.get_by_left(&code).cloned())
            .collect()
    }
}
impl Idented for EnumValueType {
    fn ident(&self) -> &str {
        &self.name
    }
}
impl ValueType for EnumValueType {
    fn data_type(&self) -> &'static str {
        "Enum"
    }
    fn parse(&self, text: &str) -> Result<Code> {
        if text.is_empty() {
            if self.void {
                return Ok(VOID);
            }
            return Err(TabsError::EmptyDisallowed {
                value_type: self.name.clone(),
            });
        }
        if let Some(code) = self.code(text) {
            return Ok(code);
        }
        let mut state = self.write();
        // someone may have interned it between the two locks
        if let Some(code) = state.labels.get_by_right(text) {
            return Ok(*code);
        }
        if state.complete {
            return Err(TabsError::UnknownLabel {
                value_type: self.name.clone(),
                label: text.to_owned(),
            });
        }
        let mut label = text.to_owned();
        self.validate(&mut label)?;
        if let Some(code) = state.labels.get_by_right(&label) {
            return Ok(*code);
        }
        let code = state.labels.len() as Code + 1;
        debug!(value_type = %self.name, %label, code, "interned label");
        state.labels.insert(code, label);
        Ok(code)
    }
    fn validate(&self, text: &mut String) -> Result<()> {
        if text.is_empty() && !self.void {
            return Err(TabsError::EmptyDisallowed {
                value_type: self.name.clone(),
            });
        }
        Ok(())
    }
    fn emit(&self, code: Code) -> String {
        match self.read().labels.get_by_left(&code) {
            Some(label) => label.clone(),
            None => {
                if code != VOID {
                    warn!(value_type = %self.name, code, "unknown code emitted as void");
                }
                String::new()
            }
        }
    }
    fn valid(&self, code: Code) -> bool {
        (code == VOID && self.void) || (code > 0 && code <= self.len() as Code)
    }
}
impl fmt::Display for EnumValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{{{}}}", self.name, self.labels().join(", "))
    }
}
