use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// Entity Reference - newtype to express entity boundaries
///
/// Equality and hashing go by identity: two references are equal iff they
/// point at the same entity.
pub struct ERef<T: ?Sized>(Arc<RwLock<T>>);

impl<T: ?Sized> Clone for ERef<T> {
    fn clone(&self) -> Self {
        ERef(self.0.clone())
    }
}

impl<T: ?Sized> ERef<T> {
    pub fn new(element: T) -> Self
    where
        T: Sized,
    {
        Self(Arc::new(RwLock::new(element)))
    }

    pub fn from_arc(inner: Arc<RwLock<T>>) -> Self {
        Self(inner)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn downgrade(&self) -> WeakERef<T> {
        WeakERef(Arc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl<T: ?Sized> PartialEq for ERef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: ?Sized> Eq for ERef<T> {}

impl<T: ?Sized> Hash for ERef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).cast::<()>().hash(state)
    }
}

impl<T: ?Sized> std::fmt::Debug for ERef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ERef({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// Non-owning counterpart of [`ERef`], used for back references.
pub struct WeakERef<T: ?Sized>(Weak<RwLock<T>>);

impl<T: ?Sized> Clone for WeakERef<T> {
    fn clone(&self) -> Self {
        WeakERef(self.0.clone())
    }
}

impl<T: ?Sized> WeakERef<T> {
    pub fn upgrade(&self) -> Option<ERef<T>> {
        self.0.upgrade().map(ERef)
    }

    pub fn into_inner(self) -> Weak<RwLock<T>> {
        self.0
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.0.as_ptr(), other.0.as_ptr())
    }

    pub fn points_to(&self, other: &ERef<T>) -> bool {
        std::ptr::addr_eq(self.0.as_ptr(), Arc::as_ptr(&other.0))
    }
}

impl<T: ?Sized> From<Weak<RwLock<T>>> for WeakERef<T> {
    fn from(value: Weak<RwLock<T>>) -> Self {
        WeakERef(value)
    }
}
