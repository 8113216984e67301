//! Storefront admin list screens.
//!
//! Builds the dashboard's list screens on top of [`gridview`]:
//!
//! - [`model`] holds the storefront records and their drafts
//! - [`api`] fetches and mutates them over the admin REST API
//! - [`screens`] declares each screen's table and drives row actions
//! - [`validation`] checks drafts before they are sent
//! - [`cli`] exposes list, delete and toggle on the command line

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod paths;
pub mod screens;
pub mod validation;

pub use api::{AdminClient, MemoryResource, Resource, RestResource};
pub use config::AdminConfig;
pub use error::{ApiError, ConfigError, Error, ValidationError};
pub use model::{Record, ResourceKind};
pub use navigation::{Navigator, Route, RouteLog};
pub use screens::{ListScreen, Listing, PendingConfirm, RowRequest};
