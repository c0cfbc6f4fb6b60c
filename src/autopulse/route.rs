use crate::error::{AutopulseError, Result};
use std::fmt;
use std::str::FromStr;

/// Logical pages of the site, addressed with hash-router paths (`/#/post/<slug>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Category(String),
    Post(String),
    Admin,
}

impl FromStr for Route {
    type Err = AutopulseError;

    fn from_str(s: &str) -> Result<Self> {
        let path = s.trim();
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_prefix('#').unwrap_or(path);
        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["category", name] => Ok(Route::Category(name.to_string())),
            ["post", slug] => Ok(Route::Post(slug.to_string())),
            ["admin", ..] => Ok(Route::Admin),
            _ => Err(AutopulseError::Api(format!("Unknown route: {}", s))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/#/"),
            Route::Category(name) => write!(f, "/#/category/{}", name),
            Route::Post(slug) => write!(f, "/#/post/{}", slug),
            Route::Admin => write!(f, "/#/admin"),
        }
    }
}
