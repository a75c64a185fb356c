use super::{Page, RouteEntry, RouteTable, RouteTarget};
use crate::error::RouterError;

/// The application's route table: the root redirects to the login page and
/// the three views are addressed directly.
pub fn default_routes() -> Result<RouteTable, RouterError> {
    RouteTable::new(vec![
        RouteEntry {
            path: "/",
            target: RouteTarget::Redirect("/login"),
        },
        RouteEntry {
            path: "/login",
            target: RouteTarget::View {
                name: "Login",
                page: Page::Login,
            },
        },
        RouteEntry {
            path: "/signin",
            target: RouteTarget::View {
                name: "Signin",
                page: Page::Signin,
            },
        },
        RouteEntry {
            path: "/home",
            target: RouteTarget::View {
                name: "Home",
                page: Page::Home,
            },
        },
    ])
}
