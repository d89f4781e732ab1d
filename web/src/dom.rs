//! [`DocumentTree`] over the browser DOM.
//!
//! Reads go straight to `web-sys`; a selector the browser rejects reads as
//! "no match" rather than an error, which is what the engine expects of a
//! page that is still rendering.

use nsdelay::tree::{DocumentTree, Selector, TreeError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// The live document.
pub struct WebTree {
    document: Document,
}

impl WebTree {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The current window's document, if there is one.
    #[must_use]
    pub fn current() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self::new)
    }
}

/// Human-readable text for a thrown JS value.
pub fn js_reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl DocumentTree for WebTree {
    type Node = Element;

    fn select_all(&self, selector: &Selector<'_>) -> Vec<Element> {
        let list = match self.document.query_selector_all(&selector.to_css()) {
            Ok(list) => list,
            Err(err) => {
                log::debug!("query_selector_all failed: {}", js_reason(&err));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .collect()
    }

    fn select_within(&self, scope: &Element, selector: &Selector<'_>) -> Option<Element> {
        match scope.query_selector(&selector.to_css()) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("query_selector failed: {}", js_reason(&err));
                None
            }
        }
    }

    fn matches(&self, node: &Element, selector: &Selector<'_>) -> bool {
        node.matches(&selector.to_css()).unwrap_or(false)
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn previous_sibling(&self, node: &Element) -> Option<Element> {
        node.previous_element_sibling()
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), TreeError> {
        node.set_attribute(name, value)
            .map_err(|err| TreeError::SetAttribute { name: name.to_string(), reason: js_reason(&err) })
    }

    fn set_inner_html(&mut self, node: &Element, html: &str) -> Result<(), TreeError> {
        if !node.is_connected() {
            return Err(TreeError::Detached);
        }
        node.set_inner_html(html);
        Ok(())
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), TreeError> {
        node.class_list()
            .add_1(class)
            .map_err(|err| TreeError::AddClass { class: class.to_string(), reason: js_reason(&err) })
    }

    fn closest(&self, node: &Element, selector: &Selector<'_>) -> Option<Element> {
        node.closest(&selector.to_css()).unwrap_or(None)
    }
}
