//! Site navigation: mobile menu toggle, in-page anchor scrolling and
//! scroll-spy highlighting.
//!
//! The DOM is reached only through [`NavigationView`], so the controller
//! runs unchanged against the browser binding and the test fake.

/// Pixels a section may still be below the viewport top and count as current.
pub const SCROLL_SPY_LOOKAHEAD: f64 = 200.0;

/// DOM operations the navigation controller needs.
pub trait NavigationView {
    /// Reflect the menu state on the toggle control and the menu container.
    fn set_menu_open(&mut self, open: bool);

    /// Document offset of the element with this id, if it exists.
    fn target_offset(&self, id: &str) -> Option<f64>;

    /// Smooth-scroll the viewport to a document offset.
    fn scroll_to(&mut self, top: f64);

    /// Mark the link for `section_id` active and clear all others.
    /// `None` clears every link.
    fn set_active_link(&mut self, section_id: Option<&str>);
}

/// A page section, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// What a link click resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// Not an in-page anchor; the browser handles it.
    NotAnchor,
    /// Scrolled to the target.
    Scrolled,
    /// Anchor without a matching element; menu closed, no scroll.
    Unresolved,
}

impl LinkAction {
    /// Whether the browser's default jump must be suppressed.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, LinkAction::NotAnchor)
    }
}

/// The section the scroll-spy marks current at `scroll_y`: the last section in
/// document order whose top, less the lookahead, is at or above the scroll
/// position. `None` above every section.
pub fn current_section(sections: &[Section], scroll_y: f64) -> Option<&Section> {
    sections
        .iter()
        .filter(|section| section.top - SCROLL_SPY_LOOKAHEAD <= scroll_y)
        .last()
}

pub struct NavigationController<V> {
    view: V,
    menu_open: bool,
    active: Option<String>,
}

impl<V: NavigationView> NavigationController<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            menu_open: false,
            active: None,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Id of the section whose link is active.
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Flip the menu state. Returns the new state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.view.set_menu_open(self.menu_open);
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        if self.menu_open {
            self.menu_open = false;
            self.view.set_menu_open(false);
        }
    }

    /// Handle a click on a link with this `href`.
    pub fn on_link_click(&mut self, href: &str) -> LinkAction {
        let Some(id) = href.strip_prefix('#') else {
            return LinkAction::NotAnchor;
        };
        self.close_menu();
        match self.view.target_offset(id) {
            Some(top) => {
                self.view.scroll_to(top);
                LinkAction::Scrolled
            }
            None => {
                log::debug!("navigation: no element for anchor '#{}'", id);
                LinkAction::Unresolved
            }
        }
    }

    /// Recompute the active link for the scroll position.
    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[Section]) -> Option<&str> {
        self.active = current_section(sections, scroll_y).map(|section| section.id.clone());
        self.view.set_active_link(self.active.as_deref());
        self.active.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeView {
        menu_open: bool,
        targets: HashMap<String, f64>,
        scrolls: Vec<f64>,
        links: Vec<(String, bool)>,
    }

    impl FakeView {
        fn with_links(ids: &[&str]) -> Self {
            Self {
                links: ids.iter().map(|id| (id.to_string(), false)).collect(),
                ..Self::default()
            }
        }

        fn active_links(&self) -> Vec<&str> {
            self.links
                .iter()
                .filter(|(_, active)| *active)
                .map(|(id, _)| id.as_str())
                .collect()
        }
    }

    impl NavigationView for FakeView {
        fn set_menu_open(&mut self, open: bool) {
            self.menu_open = open;
        }

        fn target_offset(&self, id: &str) -> Option<f64> {
            self.targets.get(id).copied()
        }

        fn scroll_to(&mut self, top: f64) {
            self.scrolls.push(top);
        }

        fn set_active_link(&mut self, section_id: Option<&str>) {
            for (id, active) in self.links.iter_mut() {
                *active = Some(id.as_str()) == section_id;
            }
        }
    }

    fn sections() -> Vec<Section> {
        vec![
            Section::new("intro", 0.0),
            Section::new("chart", 800.0),
            Section::new("about", 1600.0),
        ]
    }

    #[test]
    fn toggle_flips_menu_state() {
        let mut nav = NavigationController::new(FakeView::default());
        assert!(nav.toggle_menu());
        assert!(nav.view().menu_open);
        assert!(!nav.toggle_menu());
        assert!(!nav.view().menu_open);
    }

    #[test]
    fn anchor_click_scrolls_and_closes_menu() {
        let mut view = FakeView::default();
        view.targets.insert("chart".into(), 800.0);
        let mut nav = NavigationController::new(view);
        nav.toggle_menu();

        let action = nav.on_link_click("#chart");
        assert_eq!(action, LinkAction::Scrolled);
        assert!(action.prevents_default());
        assert!(!nav.menu_open());
        assert_eq!(nav.view().scrolls, vec![800.0]);
    }

    #[test]
    fn unresolved_anchor_closes_menu_without_scrolling() {
        let mut nav = NavigationController::new(FakeView::default());
        nav.toggle_menu();
        assert_eq!(nav.on_link_click("#missing"), LinkAction::Unresolved);
        assert!(!nav.view().menu_open);
        assert!(nav.view().scrolls.is_empty());
    }

    #[test]
    fn external_links_are_left_alone() {
        let mut nav = NavigationController::new(FakeView::default());
        nav.toggle_menu();
        let action = nav.on_link_click("https://example.com/report");
        assert_eq!(action, LinkAction::NotAnchor);
        assert!(!action.prevents_default());
        assert!(nav.menu_open());
    }

    #[test]
    fn scroll_spy_uses_lookahead() {
        let sections = sections();
        assert_eq!(current_section(&sections, 0.0).map(|s| s.id.as_str()), Some("intro"));
        assert_eq!(current_section(&sections, 599.0).map(|s| s.id.as_str()), Some("intro"));
        assert_eq!(current_section(&sections, 600.0).map(|s| s.id.as_str()), Some("chart"));
        assert_eq!(current_section(&sections, 5000.0).map(|s| s.id.as_str()), Some("about"));
    }

    #[test]
    fn scroll_spy_above_all_sections_is_none() {
        let sections = vec![Section::new("chart", 900.0)];
        assert!(current_section(&sections, 100.0).is_none());
        assert!(current_section(&[], 100.0).is_none());
    }

    #[test]
    fn at_most_one_link_active_for_every_position() {
        let mut nav = NavigationController::new(FakeView::with_links(&["intro", "chart", "about"]));
        let sections = vec![
            Section::new("intro", 300.0),
            Section::new("chart", 800.0),
            Section::new("about", 1600.0),
        ];
        for y in (0..2400).step_by(25) {
            let active = nav.on_scroll(y as f64, &sections).map(str::to_string);
            let links = nav.view().active_links();
            match active {
                Some(id) => assert_eq!(links, vec![id.as_str()]),
                None => assert!(links.is_empty()),
            }
        }
    }

    #[test]
    fn repeated_scroll_ticks_are_idempotent() {
        let mut nav = NavigationController::new(FakeView::with_links(&["intro", "chart", "about"]));
        let sections = sections();
        nav.on_scroll(700.0, &sections);
        nav.on_scroll(700.0, &sections);
        assert_eq!(nav.active_section(), Some("chart"));
        assert_eq!(nav.view().active_links(), vec!["chart"]);
    }
}
