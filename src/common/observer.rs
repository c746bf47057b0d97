use crate::common::eref::WeakERef;
use crate::common::uuid::ViewUuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeChange {
    Moved,
    Resized,
    Renamed,
}

// The structural-change observer of a node
pub trait NodeChangeListener: Send + Sync {
    fn node_changed(&mut self, node: ViewUuid, change: NodeChange);
}

pub type ListenerRef = WeakERef<dyn NodeChangeListener>;

// The Observable trait
pub trait Observable {
    fn notify_observers(&mut self, change: NodeChange);
    /// Returns false if the observer was already registered.
    fn register_observer(&mut self, observer: ListenerRef) -> bool;
    fn unregister_observer(&mut self, observer: &ListenerRef);
}

// Macro for generating Observable implementations
macro_rules! impl_observable {
    ($observable:ty) => {
        impl $crate::common::observer::Observable for $observable {
            fn notify_observers(&mut self, change: $crate::common::observer::NodeChange) {
                let uuid = self.uuid;
                self.observers.retain(|o| o.is_alive());
                for observer in self.observers.iter().filter_map(|o| o.upgrade()) {
                    observer.write().node_changed(uuid, change);
                }
            }
            fn register_observer(
                &mut self,
                observer: $crate::common::observer::ListenerRef,
            ) -> bool {
                if self.observers.iter().any(|o| o.ptr_eq(&observer)) {
                    return false;
                }
                self.observers.push(observer);
                true
            }
            fn unregister_observer(&mut self, observer: &$crate::common::observer::ListenerRef) {
                self.observers.retain(|o| !o.ptr_eq(observer));
            }
        }
    };
}
pub(crate) use impl_observable;
