//! Entity routes
//!
//! Paths have the form `/{tenant}/{kind}` or `/{tenant}/{kind}/{id}`.

use crate::model::EntityKind;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route must start with '/'")]
    NotAbsolute,
    #[error("route is missing the {0} segment")]
    MissingSegment(&'static str),
    #[error("unknown entity kind `{0}`")]
    UnknownKind(String),
    #[error("unexpected segment `{0}`")]
    Trailing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub tenant: String,
    pub kind: EntityKind,
    pub id: Option<String>,
}

impl Route {
    pub fn list(tenant: &str, kind: EntityKind) -> Self {
        Self {
            tenant: tenant.to_string(),
            kind,
            id: None,
        }
    }

    pub fn record(tenant: &str, kind: EntityKind, id: &str) -> Self {
        Self {
            tenant: tenant.to_string(),
            kind,
            id: Some(id.to_string()),
        }
    }

    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let rest = path.strip_prefix('/').ok_or(RouteError::NotAbsolute)?;
        let mut segments = rest.split('/').filter(|s| !s.is_empty());

        let tenant = segments.next().ok_or(RouteError::MissingSegment("tenant"))?;
        let kind = segments.next().ok_or(RouteError::MissingSegment("kind"))?;
        let kind = EntityKind::from_slug(kind).ok_or_else(|| RouteError::UnknownKind(kind.to_string()))?;
        let id = segments.next().map(str::to_string);

        if let Some(extra) = segments.next() {
            return Err(RouteError::Trailing(extra.to_string()));
        }

        Ok(Route {
            tenant: tenant.to_string(),
            kind,
            id,
        })
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.tenant, self.kind.slug())?;
        if let Some(id) = &self.id {
            write!(f, "/{}", id)?;
        }
        Ok(())
    }
}
