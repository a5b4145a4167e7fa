#![forbid(unsafe_code)]

//! DOM element registry and document helpers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use folio_core::intersection::ElementId;
use folio_core::theme::Theme;
use folio_runtime::reactive::Subscription;
use folio_runtime::theme::{THEME_ATTRIBUTE, ThemeContext};
use tracing::warn;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Window};

use crate::convert::{ELEMENT_ID_ATTRIBUTE, element_tag, parse_element_tag};
use crate::error::{Result, WebError};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(WebError::MissingGlobal("window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(WebError::MissingGlobal("document"))
}

/// Maps [`ElementId`]s to live DOM elements.
///
/// Registered elements are tagged with [`ELEMENT_ID_ATTRIBUTE`] so
/// observer entries can be traced back to their id.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: RefCell<HashMap<ElementId, Element>>,
    next: Cell<u64>,
}

impl ElementRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element`, reusing its id if it already has one.
    pub fn register(&self, element: Element) -> ElementId {
        if let Some(existing) = Self::id_of(&element)
            && self
                .elements
                .borrow()
                .get(&existing)
                .is_some_and(|known| *known == element)
        {
            return existing;
        }
        let id = ElementId::new(self.next.get() + 1);
        self.next.set(id.raw());
        if let Err(e) = element.set_attribute(ELEMENT_ID_ATTRIBUTE, &element_tag(id)) {
            warn!(%id, error = %WebError::from(e), "failed to tag element");
        }
        self.elements.borrow_mut().insert(id, element);
        id
    }

    /// Register the element with DOM id `dom_id`.
    pub fn register_by_dom_id(&self, document: &Document, dom_id: &str) -> Result<ElementId> {
        document
            .get_element_by_id(dom_id)
            .map(|el| self.register(el))
            .ok_or_else(|| WebError::MissingElement(dom_id.to_string()))
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(&id).cloned()
    }

    /// The id stored on `element`, if it was registered.
    #[must_use]
    pub fn id_of(element: &Element) -> Option<ElementId> {
        element
            .get_attribute(ELEMENT_ID_ATTRIBUTE)
            .and_then(|tag| parse_element_tag(&tag))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }
}

/// Write `data-theme` on the root element.
pub fn apply_theme(document: &Document, theme: Theme) -> Result<()> {
    let root = document
        .document_element()
        .ok_or(WebError::MissingGlobal("document.documentElement"))?;
    root.set_attribute(THEME_ATTRIBUTE, theme.as_str())?;
    Ok(())
}

/// Keep the root element's theme attribute in sync with `context`.
pub fn bind_theme(document: Document, context: &ThemeContext) -> Result<Subscription> {
    apply_theme(&document, context.theme())?;
    Ok(context.subscribe(move |theme| {
        if let Err(e) = apply_theme(&document, *theme) {
            warn!(error = %e, "failed to apply theme attribute");
        }
    }))
}

/// Lock or release page scrolling while the mobile menu is open.
pub fn set_scroll_lock(document: &Document, locked: bool) -> Result<()> {
    let body: HtmlElement = document.body().ok_or(WebError::MissingGlobal("document.body"))?;
    body.style()
        .set_property("overflow", if locked { "hidden" } else { "" })?;
    Ok(())
}

/// Smooth-scroll to the element with DOM id `anchor`.
pub fn scroll_to_anchor(document: &Document, anchor: &str) -> Result<()> {
    let element = document
        .get_element_by_id(anchor)
        .ok_or_else(|| WebError::MissingElement(anchor.to_string()))?;
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

/// Vertical scroll offset of the page.
pub fn scroll_y(window: &Window) -> Result<f64> {
    Ok(window.scroll_y()?)
}
