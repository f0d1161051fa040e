//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use chrono::{DateTime, Utc};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use premium_core::define_id;
/// define_id!(SkuId);
/// define_id!(CouponId);
///
/// let sku = SkuId::new("sku-1");
/// let coupon = CouponId::new("sku-1");
///
/// // These are different types, so this won't compile:
/// // let _: SkuId = coupon;
/// assert_eq!(sku.as_str(), coupon.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

impl OrderId {
    /// Prefix shared by every generated order ID.
    pub const PREFIX: &'static str = "ORD-";

    /// Generate a fresh order ID for an order placed at `now`.
    ///
    /// The millisecond timestamp comes first so IDs sort by recency; the
    /// random suffix keeps two orders placed in the same millisecond apart.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let suffix = suffix.get(..8).unwrap_or(&suffix);
        Self(format!(
            "{}{}-{}",
            Self::PREFIX,
            now.timestamp_millis(),
            suffix.to_uppercase()
        ))
    }

    /// The placement timestamp encoded in a generated ID, in epoch milliseconds.
    ///
    /// Returns `None` for IDs that were not produced by [`OrderId::generate`].
    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0
            .strip_prefix(Self::PREFIX)?
            .split('-')
            .next()?
            .parse()
            .ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_product_id_display_and_serde() {
        let id = ProductId::new("p-42");
        assert_eq!(id.to_string(), "p-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-42\"");
    }

    #[test]
    fn test_order_id_prefix_and_timestamp() {
        let now = Utc.timestamp_millis_opt(1_762_310_404_000).unwrap();
        let id = OrderId::generate(now);
        assert!(id.as_str().starts_with("ORD-1762310404000-"));
        assert_eq!(id.timestamp_millis(), Some(1_762_310_404_000));
    }

    #[test]
    fn test_order_ids_unique_within_same_millisecond() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let a = OrderId::generate(now);
        let b = OrderId::generate(now);
        assert_ne!(a, b);
    }

    #[test]
    fn test_foreign_order_id_has_no_timestamp() {
        assert_eq!(OrderId::new("legacy").timestamp_millis(), None);
    }
}
