// src/pagination/control.rs
// =============================================================================
// The pagination control: a stateless view over the page-range calculator.
//
// render() takes the current page, result count, and page size and returns
// a PaginationView describing every button: its label, whether it is
// enabled, and which page it leads to. Nothing is stored between renders.
// The owner of the search parameters (the orchestrator) reacts to clicks
// and renders again with the new page.
//
// Two layouts exist, compact and expanded. They run the same calculation
// and differ only in how many neighbouring pages are shown (delta) and in
// whether button labels are abbreviated.
// =============================================================================

use serde::Serialize;
use tracing::warn;

use super::range::{clamp_page, compute_visible_pages, total_pages, DEFAULT_MAX_PAGES};
use crate::format::format_thousands;
use crate::theme::Palette;

// Jump-to-first/last buttons only appear for result sets larger than this
const JUMP_BUTTONS_MIN_PAGES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub delta: u32,
    pub abbreviated: bool,
}

impl Layout {
    pub const COMPACT: Layout = Layout {
        delta: 1,
        abbreviated: true,
    };

    pub const EXPANDED: Layout = Layout {
        delta: 2,
        abbreviated: false,
    };
}

// Which layout a terminal gets. Decided once per session, not per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutClass {
    Compact,
    Expanded,
}

impl LayoutClass {
    // Terminals narrower than this get the compact strip
    const COMPACT_BELOW_COLUMNS: u16 = 80;

    pub fn from_width(columns: u16) -> Self {
        if columns < Self::COMPACT_BELOW_COLUMNS {
            LayoutClass::Compact
        } else {
            LayoutClass::Expanded
        }
    }

    // Falls back to the expanded layout when the width cannot be read
    // (output piped to a file, for example)
    pub fn detect() -> Self {
        crossterm::terminal::size()
            .map(|(columns, _)| Self::from_width(columns))
            .unwrap_or(LayoutClass::Expanded)
    }
}

// Inputs to one render. Mirrors what the search orchestrator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationProps {
    pub current_page: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub max_pages: u32,
}

impl PaginationProps {
    pub fn new(current_page: u32, total_items: u64, items_per_page: u32) -> Self {
        Self {
            current_page,
            total_items,
            items_per_page,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Something the user can click on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    First,
    Previous,
    Page(u32),
    Ellipsis,
    Next,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub affordance: Affordance,
    pub label: String,
    pub enabled: bool,
    pub is_current: bool,
    // Page passed to the callback when clicked; None for ellipses
    pub target: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub layout: Layout,
    pub current_page: u32,
    pub total_pages: u32,
    pub status_label: String,
    pub range_label: String,
    pub buttons: Vec<Button>,
}

pub struct PaginationControl;

impl PaginationControl {
    // Renders the control for one layout.
    //
    // Returns None when the control should not be shown at all: a single page
    // of results, no results, or a zero page size (a caller bug that is
    // logged rather than allowed to crash the render).
    //
    // The window of page numbers and both labels use the current page clamped
    // into [1, total_pages]. Previous/Next enablement compares the raw value
    // against 1 and total_pages, so an out-of-range page leaves both enabled.
    pub fn render(props: &PaginationProps, layout: Layout) -> Option<PaginationView> {
        let total = match total_pages(props.total_items, props.items_per_page, props.max_pages) {
            Ok(total) => total,
            Err(e) => {
                warn!(error = %e, "pagination rendered with invalid page size");
                return None;
            }
        };

        if total <= 1 {
            return None;
        }

        let raw = props.current_page;
        let current = clamp_page(raw, total);
        let abbreviated = layout.abbreviated;

        let mut buttons = Vec::new();
        let show_jumps = total > JUMP_BUTTONS_MIN_PAGES;

        if show_jumps && current > 3 {
            buttons.push(Button {
                affordance: Affordance::First,
                label: label(abbreviated, "«", "First").to_string(),
                enabled: true,
                is_current: false,
                target: Some(1),
            });
        }

        let previous_enabled = raw != 1;
        buttons.push(Button {
            affordance: Affordance::Previous,
            label: label(abbreviated, "‹ Prev", "‹ Previous").to_string(),
            enabled: previous_enabled,
            is_current: false,
            target: previous_enabled.then_some(raw.saturating_sub(1)),
        });

        for marker in compute_visible_pages(current, total, layout.delta) {
            buttons.push(match marker.page() {
                Some(page) => Button {
                    affordance: Affordance::Page(page),
                    label: page.to_string(),
                    enabled: true,
                    is_current: page == current,
                    target: Some(page),
                },
                None => Button {
                    affordance: Affordance::Ellipsis,
                    label: "…".to_string(),
                    enabled: false,
                    is_current: false,
                    target: None,
                },
            });
        }

        let next_enabled = raw != total;
        buttons.push(Button {
            affordance: Affordance::Next,
            label: "Next ›".to_string(),
            enabled: next_enabled,
            is_current: false,
            target: next_enabled.then_some(raw.saturating_add(1)),
        });

        if show_jumps && current < total - 2 {
            buttons.push(Button {
                affordance: Affordance::Last,
                label: label(abbreviated, "»", "Last").to_string(),
                enabled: true,
                is_current: false,
                target: Some(total),
            });
        }

        Some(PaginationView {
            layout,
            current_page: current,
            total_pages: total,
            status_label: format!("Page {} of {}", current, total),
            range_label: range_label(current, props.total_items, props.items_per_page, abbreviated),
            buttons,
        })
    }

    // Renders both layouts from the same props.
    // Either both are Some or both are None.
    pub fn render_both(props: &PaginationProps) -> Option<(PaginationView, PaginationView)> {
        let compact = Self::render(props, Layout::COMPACT)?;
        let expanded = Self::render(props, Layout::EXPANDED)?;
        Some((compact, expanded))
    }
}

fn label(abbreviated: bool, short: &'static str, long: &'static str) -> &'static str {
    if abbreviated {
        short
    } else {
        long
    }
}

// "Showing 11 to 20 of 50 results" (expanded) or "11 to 20 of 50" (compact)
fn range_label(current: u32, total_items: u64, items_per_page: u32, abbreviated: bool) -> String {
    let per_page = u64::from(items_per_page);
    let first = (u64::from(current) - 1) * per_page + 1;
    let last = (u64::from(current) * per_page).min(total_items);
    let total = format_thousands(total_items);

    if abbreviated {
        format!("{} to {} of {}", first, last, total)
    } else {
        format!("Showing {} to {} of {} results", first, last, total)
    }
}

impl PaginationView {
    pub fn button(&self, affordance: Affordance) -> Option<&Button> {
        self.buttons.iter().find(|b| b.affordance == affordance)
    }

    // Handles a click on one of the rendered buttons.
    //
    // Calls `on_page_change` exactly once when the button exists and is
    // enabled. Disabled buttons, ellipses, and buttons that are not part of
    // this view are ignored. Clicking the current page still fires the
    // callback; deciding that nothing changed is the caller's business.
    //
    // Returns whether the callback was invoked.
    pub fn click(&self, affordance: Affordance, on_page_change: impl FnOnce(u32)) -> bool {
        let target = self
            .button(affordance)
            .filter(|b| b.enabled)
            .and_then(|b| b.target);

        match target {
            Some(page) => {
                on_page_change(page);
                true
            }
            None => false,
        }
    }

    pub fn visible_pages(&self) -> Vec<u32> {
        self.buttons
            .iter()
            .filter_map(|b| match b.affordance {
                Affordance::Page(page) => Some(page),
                _ => None,
            })
            .collect()
    }

    // One-line terminal rendering:
    //
    //   ‹ Previous  1 … 23 24 [25] 26 27 … 50  Next ›   Showing 241 to 250 of 500 results
    pub fn to_line(&self, palette: &Palette) -> String {
        let mut parts = Vec::with_capacity(self.buttons.len() + 1);

        for button in &self.buttons {
            let text = if button.is_current {
                palette.selected(&format!("[{}]", button.label)).to_string()
            } else if button.enabled {
                button.label.clone()
            } else {
                palette.disabled(&button.label).to_string()
            };
            parts.push(text);
        }

        format!(
            "{}   {}",
            parts.join(" "),
            palette.muted(if self.layout.abbreviated {
                &self.status_label
            } else {
                &self.range_label
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn expanded(current: u32, total_items: u64, per_page: u32) -> PaginationView {
        PaginationControl::render(&PaginationProps::new(current, total_items, per_page), Layout::EXPANDED)
            .expect("control should be visible")
    }

    fn clicked(view: &PaginationView, affordance: Affordance) -> Vec<u32> {
        let mut calls = Vec::new();
        view.click(affordance, |page| calls.push(page));
        calls
    }

    #[test]
    fn test_status_label() {
        let view = expanded(1, 45, 10);
        assert_eq!(view.total_pages, 5);
        assert_eq!(view.status_label, "Page 1 of 5");
    }

    #[test]
    fn test_range_labels() {
        assert_eq!(expanded(2, 50, 10).range_label, "Showing 11 to 20 of 50 results");
        assert_eq!(expanded(5, 50, 10).range_label, "Showing 41 to 50 of 50 results");

        let compact = PaginationControl::render(&PaginationProps::new(2, 50, 10), Layout::COMPACT).unwrap();
        assert_eq!(compact.range_label, "11 to 20 of 50");
    }

    #[test]
    fn test_range_label_uses_thousands_separator() {
        let view = expanded(1, 12_345, 25);
        assert_eq!(view.range_label, "Showing 1 to 25 of 12,345 results");
    }

    #[test]
    fn test_hidden_for_zero_or_one_page() {
        assert!(PaginationControl::render(&PaginationProps::new(1, 0, 10), Layout::EXPANDED).is_none());
        assert!(PaginationControl::render(&PaginationProps::new(1, 5, 10), Layout::EXPANDED).is_none());
        assert!(PaginationControl::render_both(&PaginationProps::new(1, 10, 10)).is_none());
    }

    #[test]
    fn test_hidden_for_zero_page_size() {
        assert!(PaginationControl::render(&PaginationProps::new(1, 100, 0), Layout::EXPANDED).is_none());
    }

    #[test]
    fn test_max_pages_cap() {
        let props = PaginationProps::new(1, 100, 10).with_max_pages(100);
        assert_eq!(PaginationControl::render(&props, Layout::EXPANDED).unwrap().total_pages, 10);

        let props = PaginationProps::new(1, 100, 10).with_max_pages(5);
        assert_eq!(PaginationControl::render(&props, Layout::EXPANDED).unwrap().total_pages, 5);
    }

    #[test]
    fn test_visible_pages_in_large_set() {
        let view = expanded(25, 500, 10);
        assert_eq!(view.visible_pages(), vec![1, 23, 24, 25, 26, 27, 50]);

        let ellipses = view
            .buttons
            .iter()
            .filter(|b| b.affordance == Affordance::Ellipsis)
            .count();
        assert_eq!(ellipses, 2);
    }

    #[test]
    fn test_previous_disabled_on_first_page() {
        let view = expanded(1, 50, 10);
        assert!(!view.button(Affordance::Previous).unwrap().enabled);
        assert!(view.button(Affordance::Next).unwrap().enabled);
        assert!(clicked(&view, Affordance::Previous).is_empty());
    }

    #[test]
    fn test_next_disabled_on_last_page() {
        let view = expanded(5, 50, 10);
        assert!(!view.button(Affordance::Next).unwrap().enabled);
        assert!(clicked(&view, Affordance::Next).is_empty());
    }

    #[test]
    fn test_previous_and_next_targets() {
        let view = expanded(3, 50, 10);
        assert_eq!(clicked(&view, Affordance::Previous), vec![2]);
        assert_eq!(clicked(&view, Affordance::Next), vec![4]);
    }

    #[test]
    fn test_each_click_fires_once() {
        let view = expanded(3, 50, 10);
        let mut calls = Vec::new();
        view.click(Affordance::Next, |page| calls.push(page));
        view.click(Affordance::Next, |page| calls.push(page));
        // No debouncing: the same render fires twice with the same target
        assert_eq!(calls, vec![4, 4]);
    }

    #[test]
    fn test_click_numeric_marker() {
        let view = expanded(1, 50, 10);
        assert_eq!(clicked(&view, Affordance::Page(3)), vec![3]);
    }

    #[test]
    fn test_click_current_page_still_fires() {
        let view = expanded(2, 50, 10);
        assert_eq!(clicked(&view, Affordance::Page(2)), vec![2]);
    }

    #[test]
    fn test_click_ellipsis_and_hidden_page_do_nothing() {
        let view = expanded(25, 500, 10);
        assert!(clicked(&view, Affordance::Ellipsis).is_empty());
        assert!(clicked(&view, Affordance::Page(40)).is_empty());
    }

    #[test]
    fn test_jump_buttons_need_more_than_ten_pages() {
        let view = expanded(6, 100, 10);
        assert!(view.button(Affordance::First).is_none());
        assert!(view.button(Affordance::Last).is_none());
    }

    #[test]
    fn test_jump_buttons_are_gated_independently() {
        // 50 pages: near the start only "last", near the end only "first"
        let start = expanded(2, 500, 10);
        assert!(start.button(Affordance::First).is_none());
        assert!(start.button(Affordance::Last).is_some());

        let end = expanded(49, 500, 10);
        assert!(end.button(Affordance::First).is_some());
        assert!(end.button(Affordance::Last).is_none());

        let middle = expanded(25, 500, 10);
        assert_eq!(clicked(&middle, Affordance::First), vec![1]);
        assert_eq!(clicked(&middle, Affordance::Last), vec![50]);
    }

    #[test]
    fn test_out_of_range_page_leaves_both_arrows_enabled() {
        let view = expanded(0, 50, 10);
        assert!(view.button(Affordance::Previous).unwrap().enabled);
        assert!(view.button(Affordance::Next).unwrap().enabled);
        // The strip itself is anchored at the clamped page
        assert_eq!(view.current_page, 1);
        assert_eq!(view.status_label, "Page 1 of 5");

        let beyond = expanded(9, 50, 10);
        assert!(beyond.button(Affordance::Next).unwrap().enabled);
        assert_eq!(beyond.current_page, 5);
    }

    #[test]
    fn test_layouts_share_the_same_calculation() {
        let (compact, expanded) = PaginationControl::render_both(&PaginationProps::new(25, 500, 10)).unwrap();

        assert_eq!(compact.visible_pages(), vec![1, 24, 25, 26, 50]);
        assert_eq!(expanded.visible_pages(), vec![1, 23, 24, 25, 26, 27, 50]);
        assert_eq!(compact.button(Affordance::Previous).unwrap().label, "‹ Prev");
        assert_eq!(expanded.button(Affordance::Previous).unwrap().label, "‹ Previous");
        assert_eq!(compact.button(Affordance::Last).unwrap().label, "»");
        assert_eq!(expanded.button(Affordance::Last).unwrap().label, "Last");
    }

    #[test]
    fn test_layout_class_from_width() {
        assert_eq!(LayoutClass::from_width(60), LayoutClass::Compact);
        assert_eq!(LayoutClass::from_width(120), LayoutClass::Expanded);
    }

    #[test]
    fn test_to_line_marks_current_page() {
        colored::control::set_override(false);
        let line = expanded(2, 50, 10).to_line(&Palette::new(Theme::Dark));
        assert_eq!(line, "‹ Previous 1 [2] 3 4 5 Next ›   Showing 11 to 20 of 50 results");
    }

    proptest! {
        #[test]
        fn prop_hidden_exactly_when_one_page_or_less(
            current in 0u32..60,
            total_items in 0u64..600,
            per_page in 1u32..30,
        ) {
            let pages = total_pages(total_items, per_page, DEFAULT_MAX_PAGES).unwrap();
            let view = PaginationControl::render(&PaginationProps::new(current, total_items, per_page), Layout::EXPANDED);
            prop_assert_eq!(view.is_none(), pages <= 1);
        }

        #[test]
        fn prop_arrows_disabled_only_at_the_ends(
            current in 0u32..60,
            total_items in 0u64..600,
            per_page in 1u32..30,
        ) {
            let props = PaginationProps::new(current, total_items, per_page);
            if let Some((compact, expanded)) = PaginationControl::render_both(&props) {
                for view in [compact, expanded] {
                    let previous = view.button(Affordance::Previous).unwrap();
                    let next = view.button(Affordance::Next).unwrap();
                    prop_assert_eq!(!previous.enabled, current == 1);
                    prop_assert_eq!(!next.enabled, current == view.total_pages);

                    // A disabled arrow never reaches the callback
                    let mut calls = 0;
                    view.click(Affordance::Previous, |_| calls += 1);
                    prop_assert_eq!(calls, usize::from(previous.enabled));
                }
            }
        }
    }
}
