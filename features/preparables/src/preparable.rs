use crate::{errors::InjectError, requirement::Batches, types::Resolved};

/// An object which declares requirements and accepts their resolved values
///
/// The [crate::Preparer] pulls one batch from [Preparable::collect], resolves and
/// injects all of it, and only then pulls the next batch.
pub trait Preparable {
    /// Declares the requirements, in batches
    ///
    /// The returned iterator is used for a single pass. It must not borrow `self`,
    /// since values are injected while it is still being pulled. A later batch
    /// which depends on an earlier injected value has to share that value with
    /// the iterator, e.g. through an `Arc<Mutex<_>>`:
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    ///
    /// use preparables::{batch, Batches, InjectError, Preparable, Requirement, Resolved, Tag};
    ///
    /// struct UserId;
    /// impl Requirement for UserId {
    ///     const TAG: Tag = Tag::new("user-id");
    ///     fn key(&self) -> &str {
    ///         "user_id"
    ///     }
    /// }
    ///
    /// struct UserName(u64);
    /// impl Requirement for UserName {
    ///     const TAG: Tag = Tag::new("user-name");
    ///     fn key(&self) -> &str {
    ///         "name"
    ///     }
    /// }
    ///
    /// #[derive(Default)]
    /// struct Session {
    ///     user_id: Arc<Mutex<Option<u64>>>,
    ///     name: Option<String>,
    /// }
    /// impl Preparable for Session {
    ///     fn collect(&self) -> Batches {
    ///         let user_id = self.user_id.clone();
    ///         let mut stage = 0;
    ///         Box::new(std::iter::from_fn(move || {
    ///             stage += 1;
    ///             match stage {
    ///                 1 => Some(batch![UserId]),
    ///                 // Pulled after user_id was injected
    ///                 2 => (*user_id.lock().unwrap()).map(|id| batch![UserName(id)]),
    ///                 _ => None,
    ///             }
    ///         }))
    ///     }
    ///
    ///     fn inject(&mut self, key: &str, value: Resolved) -> Result<(), InjectError> {
    ///         match key {
    ///             "user_id" => *self.user_id.lock().unwrap() = Some(value.get()?),
    ///             "name" => self.name = Some(value.get()?),
    ///             other => return Err(InjectError::UnknownKey(other.to_string())),
    ///         }
    ///         Ok(())
    ///     }
    /// }
    /// ```
    fn collect(&self) -> Batches;

    /// Accepts the value for a declared key
    ///
    /// Called exactly once per declared requirement and prepare call.
    /// An error aborts preparation.
    fn inject(&mut self, key: &str, value: Resolved) -> Result<(), InjectError>;
}

impl<P: Preparable + ?Sized> Preparable for Box<P> {
    fn collect(&self) -> Batches {
        (**self).collect()
    }

    fn inject(&mut self, key: &str, value: Resolved) -> Result<(), InjectError> {
        (**self).inject(key, value)
    }
}
