use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

type Instance = Arc<dyn Any + Send + Sync>;

static GLOBAL: Lazy<Orbis> = Lazy::new(Orbis::new);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrbisError {
    #[error("an instance of {type_name} is already registered")]
    AlreadyRegistered { type_name: &'static str },
}

/// Holds at most one shared instance per type.
///
/// Instances are never replaced once registered. Hosts can own an `Orbis`
/// explicitly or use the process-wide one from [`Orbis::global`].
pub struct Orbis {
    instances: RwLock<HashMap<TypeId, Instance>>,
}

impl Orbis {
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    pub fn global() -> &'static Orbis {
        &GLOBAL
    }

    pub fn register<T>(&self) -> Result<Arc<T>, OrbisError>
    where
        T: Default + Send + Sync + 'static,
    {
        self.register_instance(T::default())
    }

    pub fn register_instance<T>(&self, value: T) -> Result<Arc<T>, OrbisError>
    where
        T: Send + Sync + 'static,
    {
        let mut instances = self.instances.write();
        if instances.contains_key(&TypeId::of::<T>()) {
            return Err(OrbisError::AlreadyRegistered {
                type_name: type_name::<T>(),
            });
        }

        let instance = Arc::new(value);
        instances.insert(TypeId::of::<T>(), instance.clone());
        tracing::debug!(instance = type_name::<T>(), "Registered shared instance");
        Ok(instance)
    }

    pub fn instance<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.instances
            .read()
            .get(&TypeId::of::<T>())
            .and_then(downcast::<T>)
    }

    /// Returns the registered `T`, constructing it with `init` if there is none.
    ///
    /// `init` runs while the registry is locked and must not touch this `Orbis`.
    pub fn get_or_register_with<T, F>(&self, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.instance::<T>() {
            return existing;
        }

        let mut instances = self.instances.write();
        // another thread may have won the race between the two locks
        if let Some(existing) = instances.get(&TypeId::of::<T>()).and_then(downcast::<T>) {
            return existing;
        }

        let instance = Arc::new(init());
        instances.insert(TypeId::of::<T>(), instance.clone());
        tracing::debug!(instance = type_name::<T>(), "Created shared instance on first use");
        instance
    }

    pub fn get_or_register<T>(&self) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
    {
        self.get_or_register_with(T::default)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.instances.read().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }
}

impl Default for Orbis {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<T>(instance: &Instance) -> Option<Arc<T>>
where
    T: Send + Sync + 'static,
{
    instance.clone().downcast::<T>().ok()
}
