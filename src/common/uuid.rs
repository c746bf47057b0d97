use serde::{Deserialize, Serialize};

macro_rules! impl_uuid {
    ($struct_name:ty) => {
        impl $struct_name {
            pub fn now_v7() -> Self {
                Self { inner: uuid::Uuid::now_v7() }
            }

            pub fn is_nil(&self) -> bool {
                self.inner.is_nil()
            }
        }

        impl From<uuid::Uuid> for $struct_name {
            fn from(value: uuid::Uuid) -> Self {
                Self { inner: value }
            }
        }

        impl std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.inner.fmt(f)
            }
        }
    };
}

/// Identifies an element of the semantic model.
#[derive(Clone, Copy, Debug, Hash, PartialOrd, Ord, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelUuid {
    inner: uuid::Uuid,
}

impl_uuid!(ModelUuid);

/// Identifies a visual element of a diagram.
#[derive(Clone, Copy, Debug, Hash, PartialOrd, Ord, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewUuid {
    inner: uuid::Uuid,
}

impl_uuid!(ViewUuid);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_now_v7_is_unique() {
        let a = ModelUuid::now_v7();
        let b = ModelUuid::now_v7();
        assert!(!a.is_nil());
        assert_ne!(a, b);
    }

    #[test]
    fn test_nil_from_uuid() {
        let v: ViewUuid = uuid::Uuid::nil().into();
        assert!(v.is_nil());
        assert_eq!(v.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
