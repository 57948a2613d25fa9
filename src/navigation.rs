//! Page sections, the mobile menu, and scroll-to-section navigation.

use log::Level;
use serde_json::json;

use crate::logging::log_event;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Self::Home,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Contact,
    ];

    /// Anchor id in the rendered document.
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.id() == id)
    }
}

/// Scrolls the anchor with the given id into view. Returns `false` when no
/// such anchor exists.
pub trait SectionScroller {
    fn scroll_to(&self, id: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationController {
    menu_open: bool,
}

impl NavigationController {
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Scrolls to `id` and closes the menu. Unknown ids only close the menu.
    pub fn navigate_to(&mut self, id: &str, scroller: &impl SectionScroller) -> bool {
        self.close_menu();

        let scrolled = scroller.scroll_to(id);
        match (scrolled, Section::from_id(id)) {
            (true, known) => log_event(
                Level::Debug,
                "nav.scrolled",
                json!({ "section": id, "label": known.map(Section::label) }),
            ),
            (false, Some(section)) => log_event(
                Level::Warn,
                "nav.anchor_missing",
                json!({ "section": section.id() }),
            ),
            (false, None) => {
                log_event(Level::Debug, "nav.unknown_section", json!({ "section": id }))
            }
        }
        scrolled
    }
}
