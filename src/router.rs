use std::collections::HashMap;

use crate::error::NavigationError;
use crate::models::{Route, RouteMeta, View};

/// Redirect chains longer than this are treated as cycles.
const MAX_REDIRECT_HOPS: usize = 8;

/// Emitted on every navigation attempt that reaches a concrete route.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    pub from: String,
    pub to: String,
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
}

/// A completed transition: the matched route, the view to render, the
/// extracted parameters and the document title to display.
#[derive(Debug, Clone)]
pub struct Navigation {
    pub route: Route,
    pub view: View,
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub title: String,
}

pub type NavigationObserver = Box<dyn Fn(&NavigationEvent) + Send + Sync>;

/// Navigation service owning the route table. Matching is a pure
/// function; logging and observer notification happen only in
/// `navigate`, so the presentation layer can resolve paths without
/// side effects.
pub struct Router {
    routes: Vec<Route>,
    app_name: String,
    observers: Vec<NavigationObserver>,
}

/// The panel's route table: tables, queries and backups sections, a
/// root redirect to tables, and the catch-all not-found entry.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::redirect("/", "home", "/tables"),
        Route::view(
            "/tables",
            "tables",
            View::Tables,
            RouteMeta::titled("Таблицы", "table"),
        ),
        Route::view(
            "/queries",
            "queries",
            View::Queries,
            RouteMeta::titled("Запросы", "terminal"),
        ),
        Route::view(
            "/backup",
            "backup",
            View::Backups,
            RouteMeta::titled("Бэкапы", "archive"),
        ),
        Route::wildcard("not-found", View::NotFound, RouteMeta::default()),
    ]
}

impl Router {
    pub fn new(routes: Vec<Route>, app_name: &str) -> Self {
        Router {
            routes,
            app_name: app_name.to_string(),
            observers: Vec::new(),
        }
    }

    pub fn with_default_routes(app_name: &str) -> Self {
        Router::new(default_routes(), app_name)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Register a callback invoked on every navigation that reaches a
    /// concrete route.
    pub fn add_observer(&mut self, observer: NavigationObserver) {
        self.observers.push(observer);
    }

    /// Match a path against the route table. Entries are tried in table
    /// order; the wildcard is evaluated last regardless of where it
    /// sits in the table. Returns the matched route and any captured
    /// path parameters.
    pub fn resolve(&self, path: &str) -> Option<(&Route, HashMap<String, String>)> {
        for route in self.routes.iter().filter(|r| !r.is_wildcard()) {
            if let Some(params) = match_path(&route.path, path) {
                return Some((route, params));
            }
        }

        self.routes
            .iter()
            .find(|r| r.is_wildcard())
            .map(|r| (r, HashMap::new()))
    }

    /// Perform a transition from `from` to `to`: parse the target,
    /// resolve it (following redirects), notify observers, check the
    /// route's guard and compute the document title. Failures are
    /// logged here and the attempt is abandoned; the caller stays on
    /// the current route.
    pub fn navigate(&self, from: &str, to: &str) -> Result<Navigation, NavigationError> {
        self.try_navigate(from, to).map_err(|e| {
            log::error!("Navigation from {} to {} failed: {}", from, to, e);
            e
        })
    }

    fn try_navigate(&self, from: &str, to: &str) -> Result<Navigation, NavigationError> {
        let (mut path, query) = parse_target(to)?;

        let mut hops = 0;
        let (route, params) = loop {
            let (route, params) = self
                .resolve(&path)
                .ok_or_else(|| NavigationError::NoMatch(path.clone()))?;

            match &route.redirect {
                Some(target) => {
                    hops += 1;
                    if hops > MAX_REDIRECT_HOPS {
                        return Err(NavigationError::RedirectLoop(to.to_string()));
                    }
                    path = target.clone();
                }
                None => break (route, params),
            }
        };

        // A non-redirect entry without a view is a broken table entry.
        let view = route
            .view
            .ok_or_else(|| NavigationError::NoMatch(path.clone()))?;

        let event = NavigationEvent {
            from: from.to_string(),
            to: to.to_string(),
            params,
            query,
        };
        log::info!(
            "Navigating from {} to {} (params: {:?}, query: {:?})",
            event.from,
            event.to,
            event.params,
            event.query
        );
        for observer in &self.observers {
            observer(&event);
        }

        if route.meta.requires_auth && !self.authorize(route) {
            return Err(NavigationError::NotPermitted(path));
        }

        let title = self.document_title(route);
        let NavigationEvent { params, query, .. } = event;

        Ok(Navigation {
            route: route.clone(),
            view,
            params,
            query,
            title,
        })
    }

    /// `"<route title> | <app name>"` when the route declares a title,
    /// else the bare application name.
    pub fn document_title(&self, route: &Route) -> String {
        match &route.meta.title {
            Some(title) => format!("{} | {}", title, self.app_name),
            None => self.app_name.clone(),
        }
    }

    // Authorization placeholder: the panel has no account system, so
    // guarded routes are always permitted.
    fn authorize(&self, _route: &Route) -> bool {
        true
    }
}

/// Split a navigation target into its decoded path and query map.
/// Targets must be absolute paths.
fn parse_target(to: &str) -> Result<(String, HashMap<String, String>), NavigationError> {
    if !to.starts_with('/') {
        return Err(NavigationError::MalformedTarget(to.to_string()));
    }

    let (raw_path, raw_query) = match to.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (to, None),
    };

    let path = urlencoding::decode(raw_path)
        .map_err(|_| NavigationError::MalformedTarget(to.to_string()))?
        .into_owned();

    let mut query = HashMap::new();
    if let Some(raw) = raw_query {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            query.insert(key.into_owned(), value.into_owned());
        }
    }

    Ok((path, query))
}

fn match_path(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_segments = segments(pattern);
    let path_segments = segments(path);

    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (pattern_segment, path_segment) in pattern_segments.iter().zip(&path_segments) {
        if let Some(name) = pattern_segment.strip_prefix(':') {
            params.insert(name.to_string(), (*path_segment).to_string());
        } else if pattern_segment != path_segment {
            return None;
        }
    }

    Some(params)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    fn router() -> Router {
        let _ = env_logger::builder().is_test(true).try_init();
        Router::with_default_routes("PgPanel")
    }

    #[rstest]
    #[case("/tables", View::Tables, "Таблицы | PgPanel")]
    #[case("/queries", View::Queries, "Запросы | PgPanel")]
    #[case("/backup", View::Backups, "Бэкапы | PgPanel")]
    fn registered_paths_resolve_with_titles(
        #[case] to: &str,
        #[case] view: View,
        #[case] title: &str,
    ) {
        let nav = router().navigate("/", to).unwrap();
        assert_eq!(nav.view, view);
        assert_eq!(nav.title, title);
    }

    #[rstest]
    #[case("/does-not-exist")]
    #[case("/tables/extra/segments")]
    #[case("/шаблоны")]
    fn unregistered_paths_fall_back_to_not_found(#[case] to: &str) {
        let nav = router().navigate("/tables", to).unwrap();
        assert_eq!(nav.view, View::NotFound);
        // The not-found entry declares no title, so the app name stands alone.
        assert_eq!(nav.title, "PgPanel");
    }

    #[test]
    fn root_redirects_to_tables() {
        let nav = router().navigate("/queries", "/").unwrap();
        assert_eq!(nav.view, View::Tables);
        assert_eq!(nav.route.name, "tables");
    }

    #[test]
    fn query_parameters_are_parsed_and_decoded() {
        let nav = router()
            .navigate("/", "/queries?limit=10&search=select%20*%20from")
            .unwrap();
        assert_eq!(nav.query.get("limit").map(String::as_str), Some("10"));
        assert_eq!(
            nav.query.get("search").map(String::as_str),
            Some("select * from")
        );
    }

    #[test]
    fn param_segments_capture_path_parameters() {
        let routes = vec![
            Route::view(
                "/tables/:name",
                "table-detail",
                View::Tables,
                RouteMeta::titled("Таблица", "table"),
            ),
            Route::wildcard("not-found", View::NotFound, RouteMeta::default()),
        ];
        let router = Router::new(routes, "PgPanel");

        let nav = router.navigate("/tables", "/tables/users").unwrap();
        assert_eq!(nav.params.get("name").map(String::as_str), Some("users"));

        let (route, _) = router.resolve("/tables/users").unwrap();
        assert_eq!(route.name, "table-detail");
    }

    #[test]
    fn relative_target_is_a_navigation_failure() {
        let err = router().navigate("/", "tables").unwrap_err();
        assert!(matches!(err, NavigationError::MalformedTarget(_)));
    }

    #[test]
    fn redirect_cycle_is_a_navigation_failure() {
        let routes = vec![
            Route::redirect("/a", "a", "/b"),
            Route::redirect("/b", "b", "/a"),
            Route::wildcard("not-found", View::NotFound, RouteMeta::default()),
        ];
        let router = Router::new(routes, "PgPanel");

        let err = router.navigate("/", "/a").unwrap_err();
        assert!(matches!(err, NavigationError::RedirectLoop(_)));
    }

    #[test]
    fn observers_see_every_navigation() {
        let seen: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut router = router();
        router.add_observer(Box::new(move |event| {
            sink.lock()
                .unwrap()
                .push((event.from.clone(), event.to.clone()));
        }));

        router.navigate("/tables", "/queries").unwrap();
        router.navigate("/queries", "/backup").unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("/tables".to_string(), "/queries".to_string()),
                ("/queries".to_string(), "/backup".to_string()),
            ]
        );
    }

    #[test]
    fn guarded_routes_are_currently_permitted() {
        let mut meta = RouteMeta::titled("Бэкапы", "archive");
        meta.requires_auth = true;
        let routes = vec![
            Route::view("/backup", "backup", View::Backups, meta),
            Route::wildcard("not-found", View::NotFound, RouteMeta::default()),
        ];
        let router = Router::new(routes, "PgPanel");

        assert!(router.navigate("/", "/backup").is_ok());
    }

    #[test]
    fn wildcard_is_evaluated_last_even_when_listed_first() {
        let routes = vec![
            Route::wildcard("not-found", View::NotFound, RouteMeta::default()),
            Route::view(
                "/tables",
                "tables",
                View::Tables,
                RouteMeta::titled("Таблицы", "table"),
            ),
        ];
        let router = Router::new(routes, "PgPanel");

        let (route, _) = router.resolve("/tables").unwrap();
        assert_eq!(route.name, "tables");
    }

    #[test]
    fn trailing_slash_matches_the_same_route() {
        let router = router();
        let (route, _) = router.resolve("/tables/").unwrap();
        assert_eq!(route.name, "tables");
    }
}
