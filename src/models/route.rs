use serde::{Deserialize, Serialize};

/// Path of the catch-all entry. It matches any path no other entry
/// matched and is always evaluated last.
pub const WILDCARD_PATH: &str = "*";

/// The view components the presentation layer can render. The panel
/// ships tables, queries and backups sections plus a not-found page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Tables,
    Queries,
    Backups,
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub requires_auth: bool,
}

/// One entry of the route table: a path pattern plus the view and
/// metadata it resolves to. Pattern segments starting with `:` capture
/// a path parameter. Redirect entries carry no view of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub view: Option<View>,
    pub redirect: Option<String>,
    pub meta: RouteMeta,
}

impl Route {
    pub fn view(path: &str, name: &str, view: View, meta: RouteMeta) -> Self {
        Route {
            path: path.to_string(),
            name: name.to_string(),
            view: Some(view),
            redirect: None,
            meta,
        }
    }

    pub fn redirect(path: &str, name: &str, target: &str) -> Self {
        Route {
            path: path.to_string(),
            name: name.to_string(),
            view: None,
            redirect: Some(target.to_string()),
            meta: RouteMeta::default(),
        }
    }

    pub fn wildcard(name: &str, view: View, meta: RouteMeta) -> Self {
        Route {
            path: WILDCARD_PATH.to_string(),
            name: name.to_string(),
            view: Some(view),
            redirect: None,
            meta,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.path == WILDCARD_PATH
    }
}

impl RouteMeta {
    pub fn titled(title: &str, icon: &str) -> Self {
        RouteMeta {
            title: Some(title.to_string()),
            icon: Some(icon.to_string()),
            requires_auth: false,
        }
    }
}
