//! Posts or updates a pull request comment linking to the artifacts of a workflow run.
//!
//! The work is split into pre-made [`transactions`] (resolve the pull request, list the artifacts,
//! format the message, upsert the comment) which the [`notifier::Notifier`] runs in sequence
//! against the collaborator traits in [`github`] and [`workflow`].

pub mod context;
pub mod env;
pub mod error;
pub mod github;
pub mod notifier;
pub mod transactions;
pub mod workflow;

/// A shorthand to define a statically allocated variable using a [`std::sync::LazyLock`].
///
/// # Examples
///
/// ```rust
/// # use artifact_notifier::static_lazy_lock;
/// # use std::sync::LazyLock;
/// static_lazy_lock! {
///     pub VAR_1: String = String::from("a static variable");
/// }
/// // ...equals to...
/// pub static VAR_2: LazyLock<String> = LazyLock::new(|| String::from("a static variable"));
/// ```
#[macro_export]
macro_rules! static_lazy_lock {
    ($(#[$meta:meta])* $vis:vis $name:ident: $type:ty = $expr:expr $(;)?) => {
        $(#[$meta])*
        $vis static $name: $crate::__priv_macro_use::LazyLock<$type> =
            $crate::__priv_macro_use::LazyLock::new(|| $expr);
    };
}

#[doc(hidden)]
pub mod __priv_macro_use {
    pub use std::sync::LazyLock;
}
