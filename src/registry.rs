//! Single-instance registry keyed by type.
//!
//! The registry is an ordinary value: whoever owns it decides its lifetime and
//! passes it to the code that needs shared instances. Entries are created on
//! first request and never removed.
//!
//! Single-threaded by construction (`Rc`, `&mut self` on creation).

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct SingletonRegistry {
    instances: HashMap<TypeId, Rc<dyn Any>>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the instance of `T`, creating it with `init` on first request.
    ///
    /// Once an instance exists `init` is never called, so any arguments it
    /// captures are ignored.
    pub fn get_or_create<T, F>(&mut self, init: F) -> Rc<T>
    where
        T: Any,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get::<T>() {
            return existing;
        }
        log::debug!("registry: creating instance of {}", type_name::<T>());
        let instance = Rc::new(init());
        self.instances.insert(TypeId::of::<T>(), instance.clone());
        instance
    }

    /// Return the instance of `T` if one exists. Never constructs.
    pub fn get<T: Any>(&self) -> Option<Rc<T>> {
        self.instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|rc| rc.downcast::<T>().ok())
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.instances.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl std::fmt::Debug for SingletonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonRegistry")
            .field("len", &self.instances.len())
            .finish()
    }
}
