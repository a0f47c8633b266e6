//! Utilities - string interning for node ids
//!
//! Node ids are compared and cloned constantly while traversing the visible
//! set; interning them as `Arc<str>` makes every clone a refcount bump.

mod intern;

pub use intern::intern;
