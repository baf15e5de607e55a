//! Core traits for form actions
//!
//! ```text
//! Forms:
//!   - FormAction: callback surface a dialogue host invokes to fill a form
//! ```

pub mod form;

pub use form::FormAction;
