//! Render description: a pure function from configuration and layout state
//! to what each section should look like.
//!
//! Deciding *whether* to recompute layout state lives in [`crate::grid`];
//! this module only applies a given state, so both halves can be tested
//! on their own.

use std::rc::Rc;

use serde::Serialize;

use crate::layout::{needs_vertical_scrolling, section_has_v_grow, ColGroup, LayoutState};
use crate::scroller::{Overflow, ScrollerConfig};
use crate::types::{GridProps, SectionContent, SectionKind};

/// How the cell around a section's scroller is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellWrapper {
    /// Ordinary block wrapper
    Plain,
    /// Wrapper that stretches to the row height of a growing grid
    Grow,
}

/// The single cell of a chunk-bearing section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellRender {
    pub wrapper: CellWrapper,
    pub scroller: ScrollerConfig,
    /// Shared with every other section of the same render
    pub col_group: Rc<ColGroup>,
    pub content: String,
}

/// One rendered section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionRender {
    /// External markup, emitted verbatim
    Override {
        index: usize,
        kind: SectionKind,
        markup: String,
    },
    /// A table row whose cell is external markup
    OuterCell {
        index: usize,
        kind: SectionKind,
        markup: String,
    },
    /// A table row with one cell hosting a scroller
    Row {
        index: usize,
        kind: SectionKind,
        cell: CellRender,
    },
}

impl SectionRender {
    pub fn index(&self) -> usize {
        match self {
            SectionRender::Override { index, .. }
            | SectionRender::OuterCell { index, .. }
            | SectionRender::Row { index, .. } => *index,
        }
    }

    /// The hosted cell, if this section is not an override
    pub fn cell(&self) -> Option<&CellRender> {
        match self {
            SectionRender::Row { cell, .. } => Some(cell),
            SectionRender::Override { .. } | SectionRender::OuterCell { .. } => None,
        }
    }
}

/// Full render description of a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRender {
    /// Root container height hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    pub v_grow: bool,
    pub print: bool,
    pub sections: Vec<SectionRender>,
}

impl GridRender {
    /// Column groups of every chunk-bearing section, in section order
    pub fn col_groups(&self) -> impl Iterator<Item = &Rc<ColGroup>> {
        self.sections
            .iter()
            .filter_map(SectionRender::cell)
            .map(|cell| &cell.col_group)
    }
}

/// Vertical overflow policy for one section's scroller.
pub fn overflow_y(force_vertical_scrollbars: bool, needs_vertical_scrolling: bool) -> Overflow {
    if force_vertical_scrollbars {
        Overflow::Scroll
    } else if needs_vertical_scrolling {
        Overflow::Auto
    } else {
        Overflow::Hidden
    }
}

/// Apply `state` to `props`.
///
/// `col_group` must have been built from `props.cols` and
/// `state.shrink_width`; it is shared by every row.
pub fn render_grid<E>(
    props: &GridProps<E>,
    state: &LayoutState,
    col_group: &Rc<ColGroup>,
) -> GridRender {
    let sections = props
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| match &section.content {
            SectionContent::Override(markup) => SectionRender::Override {
                index,
                kind: section.kind,
                markup: markup.clone(),
            },
            SectionContent::Chunk(chunk) if !chunk.hosts_scroller() => SectionRender::OuterCell {
                index,
                kind: section.kind,
                markup: chunk.outer_content.clone().unwrap_or_default(),
            },
            SectionContent::Chunk(chunk) => {
                let v_grow = section_has_v_grow(props, section);
                let needs_scrolling = needs_vertical_scrolling(props, section, chunk);
                SectionRender::Row {
                    index,
                    kind: section.kind,
                    cell: CellRender {
                        wrapper: if v_grow {
                            CellWrapper::Grow
                        } else {
                            CellWrapper::Plain
                        },
                        scroller: ScrollerConfig {
                            overflow_x: Overflow::Hidden,
                            overflow_y: overflow_y(
                                state.force_vertical_scrollbars,
                                needs_scrolling,
                            ),
                            max_height: section.max_height,
                            v_grow,
                        },
                        col_group: Rc::clone(col_group),
                        content: chunk.content.clone(),
                    },
                }
            }
        })
        .collect();

    GridRender {
        height: props.height.clone(),
        v_grow: props.v_grow,
        print: props.print,
        sections,
    }
}
