//! Preparables resolve the declared requirements of an object and inject the
//! resolved values back into it.
//!
//! Preparation consists of the following parts:
//! 1. [Requirement]: one value a preparable needs, named by a key and tagged with its variant
//! 2. [Resolver]: produces the value for one requirement variant
//! 3. [Preparable]: declares requirements in batches and accepts the resolved values
//! 4. [Preparer]: drives the above, with prefills and a per-preparer cache
//!
//! # Examples
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use preparables::{
//!     batch, Batches, DynError, InjectError, Preparable, Preparer, Prefills, Requirement,
//!     Resolved, Resolver, Tag,
//! };
//!
//! struct UserName {
//!     id: u64,
//!     key: String,
//! }
//! impl Requirement for UserName {
//!     const TAG: Tag = Tag::new("user-name");
//!     fn key(&self) -> &str {
//!         &self.key
//!     }
//!     fn is_cacheable(&self) -> bool {
//!         true
//!     }
//! }
//!
//! struct UserNames;
//! impl Resolver for UserNames {
//!     type Requirement = UserName;
//!     type Output = String;
//!
//!     fn resolve(&self, requirement: &UserName) -> Result<String, impl Into<DynError>> {
//!         Ok::<_, Infallible>(format!("user-{}", requirement.id))
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Post {
//!     author: Option<String>,
//! }
//! impl Preparable for Post {
//!     fn collect(&self) -> Batches {
//!         Box::new(std::iter::once(batch![UserName {
//!             id: 7,
//!             key: "author".into()
//!         }]))
//!     }
//!
//!     fn inject(&mut self, key: &str, value: Resolved) -> Result<(), InjectError> {
//!         match key {
//!             "author" => self.author = Some(value.get()?),
//!             other => return Err(InjectError::UnknownKey(other.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let preparer = Preparer::builder().add_resolver(UserNames).build().unwrap();
//!
//! let mut post = Post::default();
//! preparer.prepare(&mut post).unwrap();
//! assert_eq!(post.author.as_deref(), Some("user-7"));
//!
//! let mut prefilled = Post::default();
//! preparer
//!     .prepare_with(&mut prefilled, &Prefills::new().with("author", "guest".to_string()))
//!     .unwrap();
//! assert_eq!(prefilled.author.as_deref(), Some("guest"));
//! ```

pub mod builder;
mod cache;
pub mod config;
pub mod errors;
pub mod prefills;
pub mod preparable;
pub mod preparer;
pub mod registry;
pub mod requirement;
pub mod resolver;
pub mod types;

pub use builder::PreparerBuilder;
pub use config::{CachePolicy, PreparerConfig};
pub use errors::{InjectError, PrepareError, RegistryError, ResolveError};
pub use prefills::Prefills;
pub use preparable::Preparable;
pub use preparer::{PrepareReport, Preparer};
pub use registry::ResolverRegistry;
pub use requirement::{Batch, Batches, DynRequirement, Requirement};
pub use resolver::{
    func::{resolver_fn, FnResolver},
    DynResolver, Resolver,
};
pub use types::{DynError, Injectable, Resolved, Tag};
