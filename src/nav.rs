//! Navigation shell: layout chrome and the sidebar state machine
//!
//! The sidebar is either open or closed. Transitions are a pure function of
//! the current state and an event; the shell owns the only copy of the state
//! and tells listeners when it changes so the presentation layer can animate.
//! Viewport width is not this module's concern.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::routes::Route;

/// Whether the sidebar is intended to be visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarState {
    #[default]
    Closed,
    Open,
}

/// Inputs to the sidebar state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    OpenRequested,
    CloseRequested,
    /// A navigation link was followed
    NavigationOccurred,
}

impl SidebarState {
    /// Next state after `event`. Unlisted pairs leave the state unchanged.
    pub fn next(self, event: NavEvent) -> Self {
        match (self, event) {
            (SidebarState::Closed, NavEvent::OpenRequested) => SidebarState::Open,
            (SidebarState::Open, NavEvent::CloseRequested) => SidebarState::Closed,
            (SidebarState::Open, NavEvent::NavigationOccurred) => SidebarState::Closed,
            (state, _) => state,
        }
    }
}

/// A link in the sidebar navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub route: String,
}

/// Static parts of the layout shared by every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellChrome {
    pub site_title: String,
    pub author: String,
    pub avatar: Option<String>,
    pub contact: Option<String>,
    pub links: Vec<NavLink>,
}

impl ShellChrome {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            site_title: config.title.clone(),
            author: config.author.clone(),
            avatar: config.avatar.clone(),
            contact: config.contact.clone(),
            links: config
                .menu
                .iter()
                .map(|(label, route)| NavLink {
                    label: label.clone(),
                    route: route.clone(),
                })
                .collect(),
        }
    }
}

type Listener = Box<dyn FnMut(SidebarState)>;

/// Per-page navigation shell. Every mount starts closed.
pub struct NavigationShell {
    chrome: ShellChrome,
    state: SidebarState,
    listeners: Vec<Listener>,
}

impl NavigationShell {
    /// Mount a fresh shell for one page view
    pub fn mount(chrome: ShellChrome) -> Self {
        Self {
            chrome,
            state: SidebarState::Closed,
            listeners: Vec::new(),
        }
    }

    pub fn current_state(&self) -> SidebarState {
        self.state
    }

    /// Register a callback fired after every actual state change
    pub fn on_change(&mut self, listener: impl FnMut(SidebarState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn request_open(&mut self) -> SidebarState {
        self.dispatch(NavEvent::OpenRequested)
    }

    pub fn request_close(&mut self) -> SidebarState {
        self.dispatch(NavEvent::CloseRequested)
    }

    pub fn navigation_occurred(&mut self) -> SidebarState {
        self.dispatch(NavEvent::NavigationOccurred)
    }

    /// Apply an event; the latest request always wins
    pub fn dispatch(&mut self, event: NavEvent) -> SidebarState {
        let next = self.state.next(event);
        if next != self.state {
            self.state = next;
            for listener in &mut self.listeners {
                listener(next);
            }
        }
        self.state
    }

    /// Layout context for composing the page at `route`
    pub fn layout_context(&self, route: Route) -> LayoutContext {
        LayoutContext {
            route,
            navigation: self.state,
            chrome: self.chrome.clone(),
        }
    }
}

/// What the page composer needs to know about the surrounding layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutContext {
    pub route: Route,
    pub navigation: SidebarState,
    pub chrome: ShellChrome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn shell() -> NavigationShell {
        NavigationShell::mount(ShellChrome::from_config(&SiteConfig::default()))
    }

    #[test]
    fn test_transition_table() {
        use NavEvent::*;
        use SidebarState::*;

        assert_eq!(Closed.next(OpenRequested), Open);
        assert_eq!(Closed.next(CloseRequested), Closed);
        assert_eq!(Closed.next(NavigationOccurred), Closed);
        assert_eq!(Open.next(OpenRequested), Open);
        assert_eq!(Open.next(CloseRequested), Closed);
        assert_eq!(Open.next(NavigationOccurred), Closed);
    }

    #[test]
    fn test_open_then_close() {
        let mut shell = shell();
        assert_eq!(shell.current_state(), SidebarState::Closed);
        assert_eq!(shell.request_open(), SidebarState::Open);
        assert_eq!(shell.request_close(), SidebarState::Closed);
    }

    #[test]
    fn test_navigation_closes_open_sidebar() {
        let mut shell = shell();
        shell.request_open();
        assert_eq!(shell.navigation_occurred(), SidebarState::Closed);
        // Already closed: no-op
        assert_eq!(shell.navigation_occurred(), SidebarState::Closed);
    }

    #[test]
    fn test_listeners_only_see_real_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut shell = shell();
        let sink = Rc::clone(&seen);
        shell.on_change(move |state| sink.borrow_mut().push(state));

        shell.request_close();
        shell.request_open();
        shell.request_open();
        shell.navigation_occurred();
        shell.navigation_occurred();

        assert_eq!(
            *seen.borrow(),
            vec![SidebarState::Open, SidebarState::Closed]
        );
    }

    #[test]
    fn test_last_request_wins() {
        let mut shell = shell();
        shell.request_open();
        shell.request_close();
        shell.request_open();
        assert_eq!(shell.current_state(), SidebarState::Open);
    }

    #[test]
    fn test_every_mount_starts_closed() {
        let mut first = shell();
        first.request_open();
        let second = shell();
        assert_eq!(second.current_state(), SidebarState::Closed);
        assert_eq!(
            second.layout_context(Route::index()).navigation,
            SidebarState::Closed
        );
    }

    #[test]
    fn test_chrome_from_config() {
        let mut config = SiteConfig::default();
        config.contact = Some("me@example.com".to_string());
        let chrome = ShellChrome::from_config(&config);
        assert_eq!(chrome.links.len(), 2);
        assert_eq!(chrome.links[1].label, "About Me");
        assert_eq!(chrome.links[1].route, "/about/");
        assert_eq!(chrome.contact.as_deref(), Some("me@example.com"));
    }
}
