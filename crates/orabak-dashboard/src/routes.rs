//! Client-visible routes and the current location

/// Routed views. Paths are matched by exact string equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Backups,
    Logs,
    Settings,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Backups => "/backups",
            Self::Logs => "/logs",
            Self::Settings => "/settings",
        }
    }

    /// Navigation label
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Backups => "Estrategias",
            Self::Logs => "Logs",
            Self::Settings => "Configuración",
        }
    }

    /// Icon for the collapsed panel
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Dashboard => "▦",
            Self::Backups => "⛁",
            Self::Logs => "☰",
            Self::Settings => "⚙",
        }
    }

    /// Navigation order
    pub fn all() -> &'static [Route] {
        &[Route::Dashboard, Route::Backups, Route::Logs, Route::Settings]
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::all().iter().copied().find(|r| r.path() == path)
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Current location. Holds a raw path so unknown paths stay representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    path: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Dashboard.path())
    }
}

impl Router {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn navigate(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!("Navigating to {}", path);
        self.path = path;
    }

    pub fn go(&mut self, route: Route) {
        self.navigate(route.path());
    }

    /// Matched route; `None` for unknown paths
    pub fn route(&self) -> Option<Route> {
        Route::from_path(&self.path)
    }

    /// Whether the navigation entry for `route` is highlighted
    pub fn is_selected(&self, route: Route) -> bool {
        self.path == route.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_table() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/backups"), Some(Route::Backups));
        assert_eq!(Route::from_path("/logs"), Some(Route::Logs));
        assert_eq!(Route::from_path("/settings"), Some(Route::Settings));
        assert_eq!(Route::from_path("/backups/"), None);
        assert_eq!(Route::from_path("/Logs"), None);
    }

    #[test]
    fn test_exactly_one_entry_highlighted() {
        let mut router = Router::default();
        for route in Route::all() {
            router.go(*route);
            let selected: Vec<_> = Route::all().iter().filter(|r| router.is_selected(**r)).collect();
            assert_eq!(selected, vec![route]);
        }

        router.navigate("/backups/7");
        assert!(Route::all().iter().all(|r| !router.is_selected(*r)));
        assert_eq!(router.route(), None);
    }

    #[test]
    fn test_cycling() {
        assert_eq!(Route::Settings.next(), Route::Dashboard);
        assert_eq!(Route::Dashboard.prev(), Route::Settings);
        assert_eq!(Route::Backups.next(), Route::Logs);
    }
}
