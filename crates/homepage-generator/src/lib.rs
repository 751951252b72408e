//! Homepage Generator Library
//!
//! Turns a parsed layout into a page model and renders it to HTML.
//!
//! # Modules
//!
//! - [`classify`] - Section roles (page, styles, tabs, lists, buttons)
//! - [`resolve`] - Model building with reference checks and style merging
//! - [`template`] - MiniJinja rendering with HTML auto-escaping
//! - [`build`] - Build orchestration and output writing

pub mod build;
pub mod classify;
pub mod resolve;
pub mod template;

pub use build::{BuildError, BuildStats, Builder};
pub use classify::{ClassifiedSections, SectionRole, classify};
pub use resolve::{ModelBuilder, resolve};
pub use template::{TemplateError, TemplateRenderer};
