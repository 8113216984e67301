//! Navigation collaborator for row actions.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::model::ResourceKind;

/// Where a row action leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Read-only detail page.
    Detail { resource: ResourceKind, id: String },
    /// Edit form.
    Edit { resource: ResourceKind, id: String },
}

impl Route {
    pub fn detail(resource: ResourceKind, id: impl Into<String>) -> Self {
        Self::Detail {
            resource,
            id: id.into(),
        }
    }

    pub fn edit(resource: ResourceKind, id: impl Into<String>) -> Self {
        Self::Edit {
            resource,
            id: id.into(),
        }
    }
}

/// Renders the dashboard path, e.g. `/products/42/edit`.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detail { resource, id } => write!(f, "/{}/{}", resource.path(), id),
            Self::Edit { resource, id } => write!(f, "/{}/{}/edit", resource.path(), id),
        }
    }
}

/// Receives navigation requests.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route)
    }
}

/// Records every route it is asked to open.
#[derive(Debug, Clone, Default)]
pub struct RouteLog {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All routes so far, oldest first.
    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes().pop()
    }
}

impl Navigator for RouteLog {
    fn navigate(&self, route: Route) {
        log::debug!("Navigate to {}", route);
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
