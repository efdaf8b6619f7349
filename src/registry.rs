//! Name to value type mapping.
//!
//! A [`Registry`] can be owned and passed around explicitly, but most callers
//! go through the process-wide one via the free functions of this module
//! (`new_enum`, `new_time`, `get`, ...). Registration is single-assignment:
//! registering a second value type under a name already taken is a
//! configuration mistake and aborts, as does registering after [`freeze`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// we will use a fast hashing algo for hashmaps where keys are type names
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

use lazy_static::lazy_static;
use tracing::info;

use crate::enumeration::EnumValueType;
use crate::error::Result;
use crate::valuetype::{
    Code, DefaultValueType, EMPTY_IDENT, EmptyValueType, TimeValueType, ValueType,
    VersionValueType,
};

pub type NameHasher = BuildHasherDefault<SeaHasher>;

#[derive(Debug, Default)]
pub struct Registry {
    kept: HashMap<String, Arc<dyn ValueType>, NameHasher>,
    // the empty type is a singleton, kept typed so it can be handed out again
    empty: Option<Arc<EmptyValueType>>,
    frozen: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn register(&mut self, value_type: Arc<dyn ValueType>) {
        let key = value_type.ident().to_owned();
        if key.is_empty() {
            panic!("Value type of kind {} has no name", value_type.data_type());
        }
        if self.frozen {
            panic!("Value type '{}' registered after the registry was frozen", key);
        }
        if self.kept.contains_key(&key) {
            panic!("Value type '{}' already exists", key);
        }
        info!(value_type = %key, data_type = value_type.data_type(), "registered value type");
        if key == EMPTY_IDENT {
            if let Ok(empty) = Arc::clone(&value_type).into_any().downcast::<EmptyValueType>() {
                self.empty = Some(empty);
            }
        }
        self.kept.insert(key, value_type);
    }
    pub fn get(&self, name: &str) -> Option<Arc<dyn ValueType>> {
        self.kept.get(name).map(Arc::clone)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.kept.contains_key(name)
    }
    /// Registered names in sorted order, for diagnostics.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.kept.keys().cloned().collect();
        names.sort();
        names
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    pub fn freeze(&mut self) {
        if !self.frozen {
            self.frozen = true;
            info!(value_types = self.kept.len(), "registry frozen");
        }
    }
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
    // typed constructors that create, prime and register in one go
    pub fn enumeration<S: AsRef<str>>(
        &mut self,
        name: &str,
        void: bool,
        labels: &[S],
    ) -> Arc<EnumValueType> {
        let value_type = EnumValueType::new(name, void);
        if let Err(e) = value_type.prime(labels) {
            panic!("Can't prime enumeration '{}': {}", name, e);
        }
        let value_type = Arc::new(value_type);
        self.register(value_type.clone());
        value_type
    }
    pub fn time(&mut self, name: &str, format: &str) -> Result<Arc<TimeValueType>> {
        let value_type = Arc::new(TimeValueType::new(name, format)?);
        self.register(value_type.clone());
        Ok(value_type)
    }
    pub fn empty(&mut self) -> Arc<EmptyValueType> {
        if let Some(kept) = &self.empty {
            return Arc::clone(kept);
        }
        let value_type = Arc::new(EmptyValueType::new());
        self.register(value_type.clone());
        value_type
    }
    pub fn default_type(&mut self, name: &str, text: &str, code: Code) -> Arc<DefaultValueType> {
        let value_type = Arc::new(DefaultValueType::new(name, text, code));
        self.register(value_type.clone());
        value_type
    }
    pub fn version(&mut self, name: &str) -> Arc<VersionValueType> {
        let value_type = Arc::new(VersionValueType::new(name));
        self.register(value_type.clone());
        value_type
    }
}
impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for name in self.names() {
            if let Some(value_type) = self.kept.get(&name) {
                writeln!(f, "{}: {}", name, value_type.data_type())?;
            }
        }
        Ok(())
    }
}

// ------------- Process-wide registry -------------
lazy_static! {
    static ref REGISTRY: RwLock<Registry> = RwLock::new(Registry::new());
}

// Registration aborts before touching the map, so a lock poisoned by such
// an abort still guards a consistent registry.
pub fn global() -> RwLockReadGuard<'static, Registry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}
pub fn global_mut() -> RwLockWriteGuard<'static, Registry> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Creates an enumeration accepting void, interns `labels` in order and registers it.
pub fn new_enum<S: AsRef<str>>(name: &str, labels: &[S]) -> Arc<EnumValueType> {
    global_mut().enumeration(name, true, labels)
}
pub fn new_enum_without_void<S: AsRef<str>>(name: &str, labels: &[S]) -> Arc<EnumValueType> {
    global_mut().enumeration(name, false, labels)
}
pub fn new_time(name: &str, format: &str) -> Result<Arc<TimeValueType>> {
    global_mut().time(name, format)
}
/// The one empty value type, registered as `"empty"` on first use.
pub fn new_empty() -> Arc<EmptyValueType> {
    global_mut().empty()
}
pub fn new_default(name: &str, text: &str, code: Code) -> Arc<DefaultValueType> {
    global_mut().default_type(name, text, code)
}
pub fn new_version(name: &str) -> Arc<VersionValueType> {
    global_mut().version(name)
}
pub fn get(name: &str) -> Option<Arc<dyn ValueType>> {
    global().get(name)
}
pub fn registered() -> Vec<String> {
    global().names()
}
pub fn freeze() {
    global_mut().freeze()
}
