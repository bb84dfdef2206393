//! DOM construction and in-place patching from a render description.
//!
//! The structure is built once per configuration; layout state changes are
//! applied by patching styles so mounted scrollers (and their registry
//! entries) survive re-sizing.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::error::{Result, ScrollGridError};
use crate::layout::ColGroup;
use crate::render::{CellRender, CellWrapper, GridRender, SectionRender};
use crate::scroller::ScrollerConfig;
use crate::types::SectionKind;

struct DomSection {
    index: usize,
    scroller: HtmlElement,
    cols: Vec<HtmlElement>,
}

/// The built DOM of one grid
pub struct DomGrid {
    root: HtmlElement,
    sections: Vec<DomSection>,
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement> {
    document
        .create_element(tag)
        .map_err(|_| ScrollGridError::Dom(format!("cannot create <{tag}>")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ScrollGridError::Dom(format!("<{tag}> is not an HtmlElement")))
}

fn append(parent: &HtmlElement, child: &HtmlElement) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|_| ScrollGridError::Dom("append_child failed".into()))
}

fn section_tag(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Header => "thead",
        SectionKind::Body => "tbody",
        SectionKind::Footer => "tfoot",
    }
}

fn section_class(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Header => "scrollgrid-section scrollgrid-section-header",
        SectionKind::Body => "scrollgrid-section scrollgrid-section-body",
        SectionKind::Footer => "scrollgrid-section scrollgrid-section-footer",
    }
}

impl DomGrid {
    /// Build the grid DOM and append it to `container`.
    pub fn build(container: &HtmlElement, render: &GridRender) -> Result<Self> {
        let document = container
            .owner_document()
            .ok_or_else(|| ScrollGridError::Dom("container is not attached to a document".into()))?;

        let root = create(&document, "div")?;
        root.set_class_name("scrollgrid");
        let root_style = root.style();
        if let Some(height) = &render.height {
            let _ = root_style.set_property("height", height);
        }

        let table = create(&document, "table")?;
        table.set_class_name("scrollgrid-table");
        let table_style = table.style();
        let _ = table_style.set_property("width", "100%");
        let _ = table_style.set_property("border-collapse", "collapse");
        if render.v_grow {
            let _ = table_style.set_property("height", "100%");
        }

        let mut sections = Vec::new();
        for section in &render.sections {
            match section {
                SectionRender::Override { kind, markup, .. } => {
                    let group = create(&document, section_tag(*kind))?;
                    group.set_class_name(section_class(*kind));
                    group.set_inner_html(markup);
                    append(&table, &group)?;
                }
                SectionRender::OuterCell { kind, markup, .. } => {
                    let group = create(&document, section_tag(*kind))?;
                    group.set_class_name(section_class(*kind));
                    let row = create(&document, "tr")?;
                    row.set_inner_html(markup);
                    append(&group, &row)?;
                    append(&table, &group)?;
                }
                SectionRender::Row { index, kind, cell } => {
                    let group = create(&document, section_tag(*kind))?;
                    group.set_class_name(section_class(*kind));
                    let row = create(&document, "tr")?;
                    let td = create(&document, "td")?;
                    let (wrapper, scroller, cols) = build_cell(&document, cell)?;
                    append(&td, &wrapper)?;
                    append(&row, &td)?;
                    append(&group, &row)?;
                    append(&table, &group)?;
                    sections.push(DomSection {
                        index: *index,
                        scroller,
                        cols,
                    });
                }
            }
        }

        append(&root, &table)?;
        append(container, &root)?;
        Ok(Self { root, sections })
    }

    /// Patch scroller overflow and column widths to match `render`.
    pub fn apply(&self, render: &GridRender) {
        for section in &self.sections {
            let Some(cell) = render
                .sections
                .get(section.index)
                .and_then(SectionRender::cell)
            else {
                continue;
            };
            style_scroller(&section.scroller, &cell.scroller);
            style_cols(&section.cols, &cell.col_group);
        }
    }

    /// Mounted scroller elements keyed by section index
    pub fn scrollers(&self) -> impl Iterator<Item = (usize, &HtmlElement)> {
        self.sections.iter().map(|s| (s.index, &s.scroller))
    }

    pub fn section_indices(&self) -> Vec<usize> {
        self.sections.iter().map(|s| s.index).collect()
    }

    /// Detach the grid from its container
    pub fn remove(&self) {
        self.root.remove();
    }
}

fn build_cell(
    document: &Document,
    cell: &CellRender,
) -> Result<(HtmlElement, HtmlElement, Vec<HtmlElement>)> {
    let wrapper = create(document, "div")?;
    let wrapper_style = wrapper.style();
    match cell.wrapper {
        CellWrapper::Plain => {
            wrapper.set_class_name("scrollgrid-harness");
            let _ = wrapper_style.set_property("position", "relative");
        }
        CellWrapper::Grow => {
            // Absolute scroller inside a relative box lets the cell, not the
            // content, decide the height.
            wrapper.set_class_name("scrollgrid-harness scrollgrid-harness-grow");
            let _ = wrapper_style.set_property("position", "relative");
            let _ = wrapper_style.set_property("height", "100%");
        }
    }

    let scroller = create(document, "div")?;
    scroller.set_class_name("scrollgrid-scroller");
    style_scroller(&scroller, &cell.scroller);

    let inner = create(document, "table")?;
    let inner_style = inner.style();
    let _ = inner_style.set_property("width", "100%");
    let _ = inner_style.set_property("table-layout", "fixed");

    let colgroup = create(document, "colgroup")?;
    let mut cols = Vec::with_capacity(cell.col_group.len());
    for _ in &cell.col_group.cols {
        let col = create(document, "col")?;
        append(&colgroup, &col)?;
        cols.push(col);
    }
    style_cols(&cols, &cell.col_group);

    let body = create(document, "tbody")?;
    body.set_inner_html(&cell.content);

    append(&inner, &colgroup)?;
    append(&inner, &body)?;
    append(&scroller, &inner)?;
    append(&wrapper, &scroller)?;
    Ok((wrapper, scroller, cols))
}

fn style_scroller(el: &HtmlElement, config: &ScrollerConfig) {
    let style = el.style();
    let _ = style.set_property("overflow-x", config.overflow_x.as_css());
    let _ = style.set_property("overflow-y", config.overflow_y.as_css());
    match config.max_height {
        Some(max_height) => {
            let _ = style.set_property("max-height", &format!("{max_height}px"));
        }
        None => {
            let _ = style.remove_property("max-height");
        }
    }
    if config.v_grow {
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("inset", "0");
    }
}

fn style_cols(cols: &[HtmlElement], group: &ColGroup) {
    for (col, spec) in cols.iter().zip(&group.cols) {
        let style = col.style();
        let _ = style.set_property("width", &spec.width.to_css());
        match spec.min_width {
            Some(min_width) => {
                let _ = style.set_property("min-width", &format!("{min_width}px"));
            }
            None => {
                let _ = style.remove_property("min-width");
            }
        }
    }
}
