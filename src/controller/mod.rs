pub mod reservation_controller;

pub const RESERVATION_PATH: &str = "reservation";

/// Views a route can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Reservation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    /// Only taken when the whole path matches.
    Redirect { to: &'static str },
    Render(View),
}

#[derive(Clone, Debug)]
pub struct Route {
    pub path: &'static str,
    pub target: RouteTarget,
}

#[derive(Clone, Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn route(mut self, path: &'static str, target: RouteTarget) -> Self {
        self.routes.push(Route { path, target });
        self
    }

    /// Follows redirects until a view is found. `None` means no route
    /// matches the path.
    pub fn resolve(&self, path: &str) -> Option<View> {
        let mut current = path.trim_matches('/');
        // each route can be visited at most once, which rules out redirect loops
        for _ in 0..=self.routes.len() {
            let route = self.routes.iter().find(|route| route.path == current)?;
            match &route.target {
                RouteTarget::Redirect { to } => current = *to,
                RouteTarget::Render(view) => return Some(*view),
            }
        }
        None
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

pub fn router_endpoints() -> Router {
    Router::new()
        .route("", RouteTarget::Redirect { to: RESERVATION_PATH })
        .route(RESERVATION_PATH, RouteTarget::Render(View::Reservation))
}
