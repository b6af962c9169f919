//! Control surface of a listing page.
//!
//! Not every page carries every control (a page may have no newsletter
//! form, or no pager). A missing control simply means the feature is absent;
//! input aimed at it is ignored.
use bitflags::bitflags;

bitflags! {
    /// Set of controls a page offers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Controls: u16
    {
        /// Light/dark theme switch
        const THEME_TOGGLE = 1;
        /// Navigation menu toggle
        const NAV_MENU = 1 << 1;
        /// Search toggle, input and submit
        const SEARCH = 1 << 2;
        /// Category cards
        const CATEGORIES = 1 << 3;
        /// Filter buttons
        const FILTERS = 1 << 4;
        /// Prev/next and page-number buttons
        const PAGINATION = 1 << 5;
        /// Newsletter signup form
        const NEWSLETTER = 1 << 6;
        /// Contact form
        const CONTACT = 1 << 7;
        /// Back-to-top button
        const BACK_TO_TOP = 1 << 8;
    }
}

impl Controls
{
    /// Parses a control name as written in catalog files.
    ///
    /// Names are case-insensitive and accept `-` or `_` separators.
    #[must_use]
    pub fn parse_name(name: &str) -> Option<Self>
    {
        let name = name.trim().to_lowercase().replace('-', "_");

        let control = match name.as_str()
        {
            "theme_toggle" | "theme" => Self::THEME_TOGGLE,
            "nav_menu" | "menu" => Self::NAV_MENU,
            "search" => Self::SEARCH,
            "categories" | "category_cards" => Self::CATEGORIES,
            "filters" | "filter_buttons" => Self::FILTERS,
            "pagination" | "pager" => Self::PAGINATION,
            "newsletter" => Self::NEWSLETTER,
            "contact" | "contact_form" => Self::CONTACT,
            "back_to_top" => Self::BACK_TO_TOP,
            _ => return None,
        };

        Some(control)
    }
}

impl Default for Controls
{
    fn default() -> Self
    {
        Self::all()
    }
}
