//! Collapsible header menu.
//!
//! Narrow viewports start collapsed. Opening the menu starts listening for
//! clicks outside it; any such click closes it again. Widening the viewport
//! past `reset_above` drops the inline panel width so the desktop layout
//! takes over.

use crate::config::HeaderConfig;
use maud::{Markup, html};

/// Inline width of the collapsible panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelWidth {
    Closed,
    Open,
    /// No inline width; stylesheet decides.
    Auto,
}

impl PanelWidth {
    pub fn as_css(&self) -> &'static str {
        match self {
            PanelWidth::Closed => "0vw",
            PanelWidth::Open => "60vw",
            PanelWidth::Auto => "",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeaderMenu {
    collapsed: bool,
    width: PanelWidth,
    reset_above: u32,
}

impl HeaderMenu {
    pub fn new(config: &HeaderConfig, viewport_width: u32) -> Self {
        Self {
            collapsed: viewport_width < config.collapse_below,
            width: PanelWidth::Auto,
            reset_above: config.reset_above,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Value of the toggle button's `aria-expanded`.
    pub fn aria_expanded(&self) -> bool {
        !self.collapsed
    }

    /// Whether clicks outside the panel should currently be observed.
    pub fn listens_outside(&self) -> bool {
        !self.collapsed
    }

    pub fn width(&self) -> PanelWidth {
        self.width
    }

    /// Toggle button icon class.
    pub fn icon(&self) -> &'static str {
        if self.collapsed { "bi-list" } else { "bi-x" }
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
        self.width = if self.collapsed {
            PanelWidth::Closed
        } else {
            PanelWidth::Open
        };
    }

    /// A document click while open. Returns `true` if it closed the menu.
    pub fn click(&mut self, inside_panel: bool) -> bool {
        if self.collapsed || inside_panel {
            return false;
        }
        self.toggle();
        true
    }

    pub fn resize(&mut self, viewport_width: u32) {
        if viewport_width > self.reset_above {
            self.width = PanelWidth::Auto;
        }
    }

    /// Toggle button and panel wrapper around `items`.
    pub fn render(&self, items: Markup) -> Markup {
        let expanded = if self.aria_expanded() { "true" } else { "false" };
        let panel_class = if self.collapsed { None } else { Some("opacity-100") };
        html! {
            header.site-header {
                button id="collapse-btn" class=(self.icon()) type="button"
                    aria-controls="collapsed-items"
                    aria-expanded=(expanded)
                    aria-label="Menu" {}
                nav id="collapsed-items" class=[panel_class] style=[style_for(self.width)] {
                    (items)
                }
            }
        }
    }
}

fn style_for(width: PanelWidth) -> Option<String> {
    match width {
        PanelWidth::Auto => None,
        w => Some(format!("width: {}", w.as_css())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(width: u32) -> HeaderMenu {
        HeaderMenu::new(&HeaderConfig::default(), width)
    }

    #[test]
    fn initial_state_follows_viewport() {
        assert!(menu(800).is_collapsed());
        assert!(!menu(800).aria_expanded());
        assert!(!menu(1024).is_collapsed());
        assert!(menu(1280).aria_expanded());
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut m = menu(400);
        m.toggle();
        assert!(!m.is_collapsed());
        assert_eq!(m.width(), PanelWidth::Open);
        assert_eq!(m.icon(), "bi-x");
        assert!(m.listens_outside());

        m.toggle();
        assert!(m.is_collapsed());
        assert_eq!(m.width().as_css(), "0vw");
        assert_eq!(m.icon(), "bi-list");
        assert!(!m.listens_outside());
    }

    #[test]
    fn outside_click_closes_open_menu() {
        let mut m = menu(400);
        m.toggle();
        assert!(!m.click(true));
        assert!(!m.is_collapsed());
        assert!(m.click(false));
        assert!(m.is_collapsed());
        assert!(!m.click(false));
    }

    #[test]
    fn widening_resets_inline_width() {
        let mut m = menu(400);
        m.toggle();
        m.resize(700);
        assert_eq!(m.width(), PanelWidth::Open);
        m.resize(751);
        assert_eq!(m.width(), PanelWidth::Auto);
        assert!(!m.is_collapsed());
    }

    #[test]
    fn render_reflects_state() {
        let mut m = menu(400);
        let html = m.render(html! { a href="/" { "Home" } }).into_string();
        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(html.contains("bi-list"));
        assert!(!html.contains("style="));

        m.toggle();
        let html = m.render(html! {}).into_string();
        assert!(html.contains(r#"aria-expanded="true""#));
        assert!(html.contains("opacity-100"));
        assert!(html.contains(r#"style="width: 60vw""#));
    }
}
