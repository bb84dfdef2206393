//! Sections (horizontal bands of the grid) and the chunks they host.

use serde::{Deserialize, Serialize};

use crate::registry::ElementRef;

/// Which band of the grid a section represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    #[default]
    Body,
    Footer,
}

/// Scrollable content placed inside a section's cell.
///
/// `E` is the scroller element type handed to `element_ref` when the
/// section's scroller mounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ChunkSpec<E> {
    /// Opaque content markup
    #[serde(default)]
    pub content: String,
    /// Cell markup rendered verbatim in place of the scroller cell.
    /// A chunk with outer content hosts no scroller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_content: Option<String>,
    /// Receives the scroller element on mount and `None` on unmount
    #[serde(skip)]
    pub element_ref: Option<ElementRef<E>>,
}

impl<E> ChunkSpec<E> {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            outer_content: None,
            element_ref: None,
        }
    }

    /// Chunk whose whole cell is external markup
    pub fn outer(markup: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            outer_content: Some(markup.into()),
            element_ref: None,
        }
    }

    pub fn hosts_scroller(&self) -> bool {
        self.outer_content.is_none()
    }

    #[must_use]
    pub fn with_element_ref(mut self, element_ref: ElementRef<E>) -> Self {
        self.element_ref = Some(element_ref);
        self
    }
}

/// What a section renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", bound = "")]
pub enum SectionContent<E> {
    /// External markup rendered verbatim, bypassing columns and scrollers
    Override(String),
    /// A chunk hosted in a scroller viewport
    Chunk(ChunkSpec<E>),
}

/// One horizontal band of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SectionSpec<E> {
    #[serde(default)]
    pub kind: SectionKind,
    /// Maximum scroller height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f32>,
    /// Grow vertically to fill the grid (only honored when the grid grows too)
    #[serde(default)]
    pub v_grow: bool,
    #[serde(flatten)]
    pub content: SectionContent<E>,
}

impl<E> SectionSpec<E> {
    /// Section hosting a chunk
    pub fn chunk(kind: SectionKind, chunk: ChunkSpec<E>) -> Self {
        Self {
            kind,
            max_height: None,
            v_grow: false,
            content: SectionContent::Chunk(chunk),
        }
    }

    /// Section rendering external markup verbatim
    pub fn override_with(kind: SectionKind, markup: impl Into<String>) -> Self {
        Self {
            kind,
            max_height: None,
            v_grow: false,
            content: SectionContent::Override(markup.into()),
        }
    }

    #[must_use]
    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    #[must_use]
    pub fn with_v_grow(mut self, v_grow: bool) -> Self {
        self.v_grow = v_grow;
        self
    }

    /// The hosted chunk, if this section is not an override
    pub fn chunk_spec(&self) -> Option<&ChunkSpec<E>> {
        match &self.content {
            SectionContent::Chunk(chunk) => Some(chunk),
            SectionContent::Override(_) => None,
        }
    }

    /// The hosted chunk, if it renders inside a scroller
    pub fn scroller_chunk(&self) -> Option<&ChunkSpec<E>> {
        self.chunk_spec().filter(|chunk| chunk.hosts_scroller())
    }
}
