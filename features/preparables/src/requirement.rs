use std::any::Any;

use crate::{prefills::Prefills, types::Tag};

/// One unit of data a [crate::Preparable] needs
///
/// The [Requirement::TAG] selects the resolver, [Requirement::key] names the
/// value on injection.
pub trait Requirement: Send + Sync + 'static {
    /// Tag of this requirement variant, resolvers are registered under it
    const TAG: Tag;

    /// Key the resolved value is injected under
    fn key(&self) -> &str;

    /// If true, resolved values are cached under [Requirement::cache_key]
    fn is_cacheable(&self) -> bool {
        false
    }

    /// Only used if cacheable
    fn cache_key(&self) -> &str {
        self.key()
    }

    /// Values this requirement already carries, keyed like caller prefills
    ///
    /// If they contain [Requirement::key], the value is used without resolving.
    fn prefills(&self) -> Option<&Prefills> {
        None
    }
}

/// Wrapper Trait for requirements, allowing batches of mixed requirement types
pub trait DynRequirement: Send + Sync {
    fn tag(&self) -> Tag;
    fn key(&self) -> &str;
    fn is_cacheable(&self) -> bool;
    fn cache_key(&self) -> &str;
    fn prefills(&self) -> Option<&Prefills>;
    fn as_any(&self) -> &dyn Any;
}
// Impl DynRequirement for any Requirement
impl<R: Requirement> DynRequirement for R {
    fn tag(&self) -> Tag {
        R::TAG
    }

    fn key(&self) -> &str {
        Requirement::key(self)
    }

    fn is_cacheable(&self) -> bool {
        Requirement::is_cacheable(self)
    }

    fn cache_key(&self) -> &str {
        Requirement::cache_key(self)
    }

    fn prefills(&self) -> Option<&Prefills> {
        Requirement::prefills(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Requirements which are resolved together before the next batch is pulled
pub type Batch = Vec<Box<dyn DynRequirement>>;

/// Lazy sequence of batches declared by a preparable
///
/// Single use - once exhausted, call [crate::Preparable::collect] again.
pub type Batches = Box<dyn Iterator<Item = Batch>>;

/// Builds a [Batch] out of requirements of any type
///
/// ```
/// use preparables::{batch, Batch, Requirement, Tag};
///
/// struct Name(String);
/// impl Requirement for Name {
///     const TAG: Tag = Tag::new("name");
///     fn key(&self) -> &str {
///         &self.0
///     }
/// }
///
/// let batch: Batch = batch![Name("first".into()), Name("last".into())];
/// assert_eq!(batch.len(), 2);
/// ```
#[macro_export]
macro_rules! batch {
    ($($requirement:expr),* $(,)?) => {
        vec![$(::std::boxed::Box::new($requirement) as ::std::boxed::Box<dyn $crate::DynRequirement>),*]
    };
}
