use crate::router::Route;

pub const BRAND: &str = "Copiloto PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Inicio",
        path: "/",
    },
    NavItem {
        label: "Chat",
        path: "/chat",
    },
    NavItem {
        label: "Resúmenes",
        path: "/summaries",
    },
];

/// Header entries paired with whether each matches the current location.
/// Only exact path matches count; `/summary/x` does not light up `/summaries`.
pub fn nav_state(current: &Route) -> Vec<(NavItem, bool)> {
    let path = current.path();
    NAV_ITEMS
        .iter()
        .map(|item| (*item, item.path == path))
        .collect()
}
