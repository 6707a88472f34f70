//! 页面路由

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Landing,
    Game,
    PackagedGames,
    ExternalGames,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Landing,
        Route::Game,
        Route::PackagedGames,
        Route::ExternalGames,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Game => "/game",
            Route::PackagedGames => "/mpk-games",
            Route::ExternalGames => "/non-magtinum-games",
            Route::NotFound => "*",
        }
    }

    /// 未知路径对应 NotFound；忽略末尾的斜杠和查询参数
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(Route::NotFound)
    }
}

/// 当前页面和返回栈
#[derive(Debug, Default)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        log::debug!("导航: {} -> {}", self.current.path(), route.path());
        self.history.push(self.current);
        self.current = route;
    }

    pub fn navigate_path(&mut self, path: &str) -> Route {
        let route = Route::from_path(path);
        if route == Route::NotFound {
            log::warn!("404 Error: User attempted to access non-existent route: {}", path);
        }
        self.navigate(route);
        route
    }

    /// 返回上一页，没有历史时停留在当前页
    pub fn back(&mut self) -> Route {
        if let Some(previous) = self.history.pop() {
            self.current = previous;
        }
        self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_parse_back_to_routes() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert_eq!(Route::from_path("/mpk-games/"), Route::PackagedGames);
        assert_eq!(Route::from_path("/game?from=home"), Route::Game);
        assert_eq!(Route::from_path(""), Route::Landing);
        assert_eq!(Route::from_path("/settings"), Route::NotFound);
    }

    #[test]
    fn back_stack() {
        let mut router = Router::new();
        assert!(!router.can_go_back());
        router.navigate(Route::Game);
        router.navigate(Route::Game);
        router.navigate_path("/non-magtinum-games");
        assert_eq!(router.current(), Route::ExternalGames);

        assert_eq!(router.back(), Route::Game);
        assert_eq!(router.back(), Route::Landing);
        assert_eq!(router.back(), Route::Landing);
    }

    #[test]
    fn unknown_path_lands_on_not_found() {
        let mut router = Router::new();
        assert_eq!(router.navigate_path("/nowhere"), Route::NotFound);
        assert_eq!(router.back(), Route::Landing);
    }
}
