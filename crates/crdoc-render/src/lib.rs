//! crdoc Render - HTML pages for documented CRDs
//!
//! Reproduces a [`crdoc_core::DocNode`] tree 1:1 as nested, collapsible
//! `<details>` sections, and renders the repository listing, "not yet
//! documented" and error pages. All user-facing failure text comes from the
//! [`messages`] table.

pub mod engine;
pub mod error;
pub mod filters;
pub mod messages;
pub mod pages;

pub use engine::DocRenderer;
pub use error::{RenderError, Result};
pub use messages::{UserMessage, user_message};
pub use pages::{DocPage, OrgPage};
