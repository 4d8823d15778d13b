//! Kind tags and their type-erased token.
//!
//! Every displayable view model reports a *kind*: a small, hashable value
//! naming the visual component that renders it. Each screen usually declares
//! its own enumeration of kinds, so many unrelated tag types coexist in one
//! program. [`AnyKind`] boxes any of them into a single token type that can be
//! used as a map key next to tokens erased from other tag types.
//!
//! # Identity Rule
//!
//! Two [`AnyKind`] tokens are equal, and hash identically, exactly when their
//! raw values are equal. The concrete tag type does not take part in the
//! comparison. A kind declared by one screen therefore collides with a kind
//! declared by another screen when both use the same raw value, which is how
//! components share a reuse identifier across modules.
//!
//! # Example
//!
//! ```
//! use bradel_core::{AnyKind, KindTag};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum SettingsKind {
//!     Toggle,
//! }
//!
//! impl KindTag for SettingsKind {
//!     fn raw_value(&self) -> &str {
//!         match self {
//!             SettingsKind::Toggle => "toggle",
//!         }
//!     }
//! }
//!
//! let from_enum = AnyKind::new(SettingsKind::Toggle);
//! let from_str = AnyKind::new("toggle");
//! assert_eq!(from_enum, from_str);
//! assert_eq!(from_enum.raw_value(), "toggle");
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A hashable value identifying which visual component renders an item.
///
/// The raw value must be stable for the lifetime of the program and unique
/// among the kinds that should *not* share a component. It doubles as the
/// reuse identifier handed to the rendering surface.
///
/// Fieldless enums can derive this trait with `#[derive(KindTag)]`.
pub trait KindTag: Hash + Eq + Send + Sync + 'static {
    /// Returns the raw identifier of this kind.
    fn raw_value(&self) -> &str;
}

impl KindTag for &'static str {
    fn raw_value(&self) -> &str {
        self
    }
}

impl KindTag for String {
    fn raw_value(&self) -> &str {
        self.as_str()
    }
}

/// Object-safe view of a boxed kind tag.
trait ErasedKind: Send + Sync {
    fn raw_value(&self) -> &str;
    fn as_any(&self) -> &dyn Any;
    fn concrete_type_name(&self) -> &'static str;
}

struct KindBox<K: KindTag> {
    concrete: K,
}

impl<K: KindTag> ErasedKind for KindBox<K> {
    fn raw_value(&self) -> &str {
        self.concrete.raw_value()
    }

    fn as_any(&self) -> &dyn Any {
        &self.concrete
    }

    fn concrete_type_name(&self) -> &'static str {
        std::any::type_name::<K>()
    }
}

/// A type-erased kind token.
///
/// `AnyKind` holds exactly one concrete [`KindTag`] value behind a shared
/// pointer, so cloning is cheap and tokens can be freely copied into maps and
/// across threads. Equality, hashing and ordering are defined solely by
/// [`raw_value`](Self::raw_value).
#[derive(Clone)]
pub struct AnyKind {
    inner: Arc<dyn ErasedKind>,
}

impl AnyKind {
    /// Erases a concrete kind tag.
    ///
    /// Erasing a value that already is an `AnyKind` returns that token
    /// unchanged instead of nesting a second box.
    pub fn new<K: KindTag>(kind: K) -> Self {
        let any: &dyn Any = &kind;
        if let Some(existing) = any.downcast_ref::<AnyKind>() {
            return existing.clone();
        }
        Self {
            inner: Arc::new(KindBox { concrete: kind }),
        }
    }

    /// Returns the raw identifier of the wrapped tag.
    #[inline]
    pub fn raw_value(&self) -> &str {
        self.inner.raw_value()
    }

    /// Returns the wrapped tag if it has concrete type `K`.
    pub fn downcast_ref<K: KindTag>(&self) -> Option<&K> {
        self.inner.as_any().downcast_ref::<K>()
    }

    /// Returns `true` if the wrapped tag has concrete type `K`.
    pub fn is<K: KindTag>(&self) -> bool {
        self.inner.as_any().is::<K>()
    }

    /// Returns the type name of the wrapped tag, for diagnostics.
    pub fn concrete_type_name(&self) -> &'static str {
        self.inner.concrete_type_name()
    }
}

impl KindTag for AnyKind {
    fn raw_value(&self) -> &str {
        AnyKind::raw_value(self)
    }
}

impl PartialEq for AnyKind {
    fn eq(&self, other: &Self) -> bool {
        self.raw_value() == other.raw_value()
    }
}

impl Eq for AnyKind {}

impl Hash for AnyKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw_value().hash(state);
    }
}

impl PartialOrd for AnyKind {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AnyKind {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw_value().cmp(other.raw_value())
    }
}

impl fmt::Debug for AnyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyKind")
            .field("raw_value", &self.raw_value())
            .field("concrete", &self.concrete_type_name())
            .finish()
    }
}

impl fmt::Display for AnyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw_value())
    }
}

impl From<&'static str> for AnyKind {
    fn from(raw: &'static str) -> Self {
        AnyKind::new(raw)
    }
}

impl From<String> for AnyKind {
    fn from(raw: String) -> Self {
        AnyKind::new(raw)
    }
}

static_assertions::assert_impl_all!(AnyKind: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum ProfileKind {
        Avatar,
        Name,
    }

    impl KindTag for ProfileKind {
        fn raw_value(&self) -> &str {
            match self {
                ProfileKind::Avatar => "avatar",
                ProfileKind::Name => "name",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum FeedKind {
        Avatar,
        Story,
    }

    impl KindTag for FeedKind {
        fn raw_value(&self) -> &str {
            match self {
                FeedKind::Avatar => "avatar",
                FeedKind::Story => "story",
            }
        }
    }

    fn hash_of(kind: &AnyKind) -> u64 {
        let mut hasher = DefaultHasher::new();
        kind.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equal_raw_values_across_tag_types() {
        let profile = AnyKind::new(ProfileKind::Avatar);
        let feed = AnyKind::new(FeedKind::Avatar);

        assert_eq!(profile, feed);
        assert_eq!(hash_of(&profile), hash_of(&feed));
    }

    #[test]
    fn test_different_raw_values_are_unequal() {
        assert_ne!(AnyKind::new(ProfileKind::Name), AnyKind::new(FeedKind::Story));
        assert_ne!(AnyKind::new(ProfileKind::Avatar), AnyKind::new(ProfileKind::Name));
    }

    #[test]
    fn test_map_key_across_tag_types() {
        let mut components: HashMap<AnyKind, &str> = HashMap::new();
        components.insert(AnyKind::new(ProfileKind::Avatar), "AvatarCell");
        components.insert(AnyKind::new(FeedKind::Story), "StoryCell");

        assert_eq!(components.get(&AnyKind::new(FeedKind::Avatar)), Some(&"AvatarCell"));
        assert_eq!(components.get(&AnyKind::from("story")), Some(&"StoryCell"));
        assert_eq!(components.get(&AnyKind::new(ProfileKind::Name)), None);

        // Colliding kinds overwrite each other.
        components.insert(AnyKind::new(FeedKind::Avatar), "FeedAvatarCell");
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn test_downcast_recovers_concrete_tag() {
        let kind = AnyKind::new(ProfileKind::Name);
        assert_eq!(kind.downcast_ref::<ProfileKind>(), Some(&ProfileKind::Name));
        assert!(kind.downcast_ref::<FeedKind>().is_none());
        assert!(kind.is::<ProfileKind>());
        assert!(kind.concrete_type_name().ends_with("ProfileKind"));
    }

    #[test]
    fn test_erasing_token_does_not_nest() {
        let kind = AnyKind::new(FeedKind::Story);
        let again = AnyKind::new(kind.clone());
        assert!(again.is::<FeedKind>());
        assert_eq!(again, kind);
    }

    #[test]
    fn test_string_tags() {
        let owned = AnyKind::new(String::from("row"));
        let borrowed = AnyKind::new("row");
        assert_eq!(owned, borrowed);
        assert_eq!(owned.to_string(), "row");

        let set: HashSet<AnyKind> = [owned, borrowed].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering_by_raw_value() {
        let mut kinds = vec![
            AnyKind::new(FeedKind::Story),
            AnyKind::new(ProfileKind::Avatar),
            AnyKind::new(ProfileKind::Name),
        ];
        kinds.sort();
        let raw: Vec<_> = kinds.iter().map(|k| k.raw_value()).collect();
        assert_eq!(raw, vec!["avatar", "name", "story"]);
    }
}
