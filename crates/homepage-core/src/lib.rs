//! Homepage Core Library
//!
//! Core types, settings, INI reading and error handling for the homepage
//! generator.

pub mod config;
pub mod error;
pub mod ini;
pub mod model;

pub use config::Settings;
pub use error::{CoreError, Result};
pub use ini::{IniDocument, IniSection};
pub use model::{Attributes, PageButton, PageContext, PageList, PageTab, tab_width};
