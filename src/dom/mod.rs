//! Document access
//!
//! The layout engine never touches the live page directly. Everything it needs
//! to read or write goes through [`DocumentView`], so the algorithm can run
//! against the browser DOM (`web::WebDocument`) or an in-memory page in tests.

pub mod web;

pub use web::WebDocument;

use crate::geometry::OffsetNode;
use crate::layout::plan::Geometry;
use crate::layout::LayoutError;

/// A line-number element to create inside a code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMarker {
    /// Generated identifier, see [`crate::identifier::encode`]
    pub id: String,
    /// Line-number text displayed by the marker
    pub text: String,
}

/// Query and mutation capability over a rendered page
pub trait DocumentView {
    /// Element handle
    type Element: OffsetNode + Clone;

    /// All elements carrying `class`, in document order
    fn elements_by_class(&self, class: &str) -> Vec<Self::Element>;

    /// The line marker of `block` whose identifier is `id`.
    ///
    /// Comments carry identifiers of the same shape, so markers are only
    /// looked up among the block's own children.
    fn marker_in(&self, block: &Self::Element, id: &str) -> Option<Self::Element>;

    /// Identifier of `element`, `None` when it has none
    fn id_of(&self, element: &Self::Element) -> Option<String>;

    /// Rendered width of `element` in pixels
    fn offset_width(&self, element: &Self::Element) -> f64;

    /// Markup content of `element`
    fn inner_html(&self, element: &Self::Element) -> String;

    /// Replace the markup content of `element`
    fn set_inner_html(&self, element: &Self::Element, html: &str);

    /// Text content of each child element, in order
    fn child_texts(&self, element: &Self::Element) -> Vec<String>;

    /// Replace the children of `block` with one element per marker
    fn replace_with_markers(
        &self,
        block: &Self::Element,
        markers: &[LineMarker],
    ) -> Result<(), LayoutError>;

    /// Add `class` to the class list of `element`
    fn add_class(&self, element: &Self::Element, class: &str);

    /// Write width, top and left of `element`
    fn set_geometry(&self, element: &Self::Element, geometry: &Geometry);
}
