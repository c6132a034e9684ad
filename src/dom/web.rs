//! Browser DOM adapter
//!
//! Implements [`DocumentView`] over `web_sys`, so the layout engine can read
//! offsets from and write styles to the live page.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCollection, HtmlElement};

use super::{DocumentView, LineMarker};
use crate::geometry::OffsetNode;
use crate::layout::plan::Geometry;
use crate::layout::LayoutError;

impl OffsetNode for HtmlElement {
    fn offset_top(&self) -> f64 {
        HtmlElement::offset_top(self) as f64
    }

    fn offset_left(&self) -> f64 {
        HtmlElement::offset_left(self) as f64
    }

    fn offset_parent(&self) -> Option<Self> {
        HtmlElement::offset_parent(self).and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
    }
}

/// [`DocumentView`] over a browser `Document`
#[derive(Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Wrap the document of the current window
    pub fn from_window() -> Result<Self, LayoutError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| LayoutError::Dom("no document attached to the window".to_string()))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Text content of the element with identifier `id`, if present
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }
}

/// Collect the HTML elements of a live collection
fn html_elements(collection: HtmlCollection) -> Vec<HtmlElement> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

impl DocumentView for WebDocument {
    type Element = HtmlElement;

    fn elements_by_class(&self, class: &str) -> Vec<HtmlElement> {
        html_elements(self.document.get_elements_by_class_name(class))
    }

    fn marker_in(&self, block: &HtmlElement, id: &str) -> Option<HtmlElement> {
        html_elements(block.children())
            .into_iter()
            .find(|child| child.id() == id)
    }

    fn id_of(&self, element: &HtmlElement) -> Option<String> {
        let id = element.id();
        (!id.is_empty()).then_some(id)
    }

    fn offset_width(&self, element: &HtmlElement) -> f64 {
        element.offset_width() as f64
    }

    fn inner_html(&self, element: &HtmlElement) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &HtmlElement, html: &str) {
        element.set_inner_html(html);
    }

    fn child_texts(&self, element: &HtmlElement) -> Vec<String> {
        html_elements(element.children())
            .iter()
            .map(|child| child.text_content().unwrap_or_default())
            .collect()
    }

    fn replace_with_markers(
        &self,
        block: &HtmlElement,
        markers: &[LineMarker],
    ) -> Result<(), LayoutError> {
        block.set_inner_html("");

        for marker in markers {
            let div = self
                .document
                .create_element("div")
                .map_err(|e| LayoutError::from_js(&e))?;
            div.set_id(&marker.id);
            div.set_text_content(Some(&marker.text));
            block
                .append_child(&div)
                .map_err(|e| LayoutError::from_js(&e))?;
        }

        Ok(())
    }

    fn add_class(&self, element: &HtmlElement, class: &str) {
        if let Err(e) = element.class_list().add_1(class) {
            log::warn!("Failed to add class '{}': {:?}", class, e);
        }
    }

    fn set_geometry(&self, element: &HtmlElement, geometry: &Geometry) {
        let style = element.style();
        let properties = [
            ("width", geometry.width),
            ("top", geometry.top),
            ("left", geometry.left),
        ];

        for (property, value) in properties {
            if let Err(e) = style.set_property(property, &format!("{}px", value)) {
                log::warn!("Failed to set {} on line comment: {:?}", property, e);
            }
        }
    }
}
