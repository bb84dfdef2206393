//! Sizing pass tests
//!
//! Shared shrink width, forced vertical scrollbars, idempotence and the
//! cross-section alignment invariant.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::rc::Rc;

use common::{
    chunk_section, mount_all, recording_ref, three_section_props, FakeElement, FakeScroller,
    TestGrid,
};
use scrollgrid::layout::ColWidth;
use scrollgrid::{
    ChunkSpec, ColSpec, GridProps, LayoutState, Overflow, Phase, ScrollGrid, SectionKind,
    SectionRender, SectionSpec, SizingOutcome,
};

// =============================================================================
// FORCED SCROLLBARS
// =============================================================================

#[test]
fn test_one_overflowing_section_forces_scrollbars_everywhere() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::grow()]));
    mount_all(&mut grid, &[(0, false, 0.0), (1, true, 0.0), (2, false, 0.0)]);

    assert_eq!(grid.did_mount(), SizingOutcome::Changed);
    assert!(grid.layout_state().force_vertical_scrollbars);

    let render = grid.render();
    for section in &render.sections {
        let cell = section.cell().unwrap();
        assert_eq!(cell.scroller.overflow_y, Overflow::Scroll);
        assert_eq!(cell.scroller.overflow_x, Overflow::Hidden);
    }
}

#[test]
fn test_no_overflow_keeps_static_policy() {
    let mut props = three_section_props(vec![ColSpec::grow()]);
    props.sections[1].max_height = Some(200.0);
    let mut grid: TestGrid = ScrollGrid::new(props);
    mount_all(&mut grid, &[(0, false, 0.0), (1, false, 0.0), (2, false, 0.0)]);

    assert_eq!(grid.did_mount(), SizingOutcome::Unchanged);
    assert!(!grid.layout_state().force_vertical_scrollbars);

    let render = grid.render();
    let policies: Vec<Overflow> = render
        .sections
        .iter()
        .map(|s| s.cell().unwrap().scroller.overflow_y)
        .collect();
    assert_eq!(
        policies,
        vec![Overflow::Hidden, Overflow::Auto, Overflow::Hidden]
    );
}

#[test]
fn test_forced_scrollbars_released_when_overflow_goes_away() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![]));
    let mounted = mount_all(&mut grid, &[(0, false, 0.0), (1, true, 0.0), (2, false, 0.0)]);
    grid.did_mount();
    assert!(grid.layout_state().force_vertical_scrollbars);

    mounted[1].0.overflows_y.set(false);
    assert_eq!(grid.handle_resize(), SizingOutcome::Changed);
    assert!(!grid.layout_state().force_vertical_scrollbars);
}

#[test]
fn test_horizontal_overflow_never_forces() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![]));
    let mounted = mount_all(&mut grid, &[(0, false, 0.0), (1, false, 0.0)]);
    mounted[0].0.overflows_x.set(true);
    grid.did_mount();
    assert!(!grid.layout_state().force_vertical_scrollbars);
}

// =============================================================================
// SHRINK WIDTH
// =============================================================================

#[test]
fn test_shrink_width_is_widest_section() {
    let props = GridProps::new(
        vec![ColSpec::shrink(), ColSpec::grow()],
        vec![
            chunk_section(SectionKind::Header, "h"),
            chunk_section(SectionKind::Body, "b"),
        ],
    );
    let mut grid: TestGrid = ScrollGrid::new(props);
    mount_all(&mut grid, &[(0, false, 80.0), (1, false, 120.0)]);
    grid.did_mount();

    assert_eq!(grid.layout_state().shrink_width, Some(120.0));
    let render = grid.render();
    for group in render.col_groups() {
        assert_eq!(group.cols[0].width, ColWidth::Px(120.0));
        assert_eq!(group.cols[1].width, ColWidth::Auto);
    }
}

#[test]
fn test_shrink_width_independent_of_mount_order() {
    let widths = [(0, false, 95.0), (1, false, 40.0), (2, false, 120.0)];
    let mut reversed = widths;
    reversed.reverse();

    let mut a: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::shrink()]));
    mount_all(&mut a, &widths);
    a.did_mount();

    let mut b: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::shrink()]));
    mount_all(&mut b, &reversed);
    b.did_mount();

    assert_eq!(a.layout_state(), b.layout_state());
    assert_eq!(a.layout_state().shrink_width, Some(120.0));
}

#[test]
fn test_no_shrink_columns_skips_measurement() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::fixed(50.0)]));
    let mounted = mount_all(&mut grid, &[(0, false, 80.0), (1, false, 120.0)]);
    grid.did_mount();

    assert_eq!(grid.layout_state().shrink_width, None);
    assert!(mounted.iter().all(|(_, el)| el.measured.get() == 0));
}

#[test]
fn test_print_mode_skips_shrink_measurement() {
    let mut props = three_section_props(vec![ColSpec::shrink()]);
    props.print = true;
    let mut grid: TestGrid = ScrollGrid::new(props);
    let mounted = mount_all(&mut grid, &[(0, false, 80.0), (1, true, 120.0)]);
    grid.did_mount();

    let state = grid.layout_state();
    assert_eq!(state.shrink_width, None);
    assert!(state.force_vertical_scrollbars);
    assert!(mounted.iter().all(|(_, el)| el.measured.get() == 0));

    // Print tables lay columns out from content, so no widths are emitted,
    // and every section still shares the same (empty) group.
    let render = grid.render();
    let groups: Vec<_> = render.col_groups().collect();
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| g.is_empty()));
    assert!(groups.windows(2).all(|w| Rc::ptr_eq(w[0], w[1])));
}

#[test]
fn test_leaving_print_mode_restores_col_group() {
    let mut props = three_section_props(vec![ColSpec::shrink(), ColSpec::grow()]);
    props.print = true;
    let mut grid: TestGrid = ScrollGrid::new(props);
    mount_all(&mut grid, &[(0, false, 80.0)]);
    grid.did_mount();
    assert!(grid.render().col_groups().all(|g| g.is_empty()));

    grid.set_props(three_section_props(vec![ColSpec::shrink(), ColSpec::grow()]));
    assert_eq!(grid.did_update(), SizingOutcome::Changed);
    let render = grid.render();
    let group = render.col_groups().next().unwrap();
    assert_eq!(group.len(), 2);
    assert_eq!(group.cols[0].width, ColWidth::Px(80.0));
}

#[test]
fn test_shrink_width_with_nothing_mounted_is_zero() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::shrink()]));
    grid.did_mount();
    assert_eq!(grid.layout_state(), LayoutState::new(Some(0.0), false));
}

// =============================================================================
// IDEMPOTENCE / CONVERGENCE
// =============================================================================

#[test]
fn test_stable_geometry_converges_after_one_follow_up() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::shrink()]));
    mount_all(&mut grid, &[(0, false, 70.0), (1, true, 90.0), (2, false, 10.0)]);

    assert_eq!(grid.did_mount(), SizingOutcome::Changed);
    let first = grid.layout_state();

    // The state write is itself a sizing input: one more pass, same values.
    assert_eq!(grid.did_update(), SizingOutcome::Unchanged);
    assert_eq!(grid.layout_state(), first);

    for _ in 0..3 {
        assert_eq!(grid.did_update(), SizingOutcome::Skipped);
    }
    assert_eq!(grid.sizing_passes(), 2);
}

#[test]
fn test_repeated_resize_is_idempotent() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::shrink()]));
    mount_all(&mut grid, &[(0, true, 33.0), (1, false, 66.0)]);
    grid.did_mount();
    let settled = grid.layout_state();

    for _ in 0..5 {
        assert_eq!(grid.handle_resize(), SizingOutcome::Unchanged);
        assert_eq!(grid.layout_state(), settled);
    }
}

#[test]
fn test_geometry_change_picked_up_on_resize() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::shrink()]));
    let mounted = mount_all(&mut grid, &[(0, false, 60.0), (1, false, 75.0)]);
    grid.did_mount();
    assert_eq!(grid.did_update(), SizingOutcome::Unchanged);
    assert_eq!(grid.layout_state().shrink_width, Some(75.0));

    mounted[0].1.width.set(140.0);
    // Without a resize signal or sizing input change nothing re-measures.
    assert_eq!(grid.did_update(), SizingOutcome::Skipped);
    assert_eq!(grid.layout_state().shrink_width, Some(75.0));

    assert_eq!(grid.handle_resize(), SizingOutcome::Changed);
    assert_eq!(grid.layout_state().shrink_width, Some(140.0));
}

#[test]
fn test_sizing_prop_change_triggers_pass() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::grow()]));
    mount_all(&mut grid, &[(0, false, 50.0), (1, false, 90.0), (2, false, 10.0)]);
    grid.did_mount();
    grid.did_update();
    assert_eq!(grid.layout_state().shrink_width, None);

    grid.set_props(three_section_props(vec![ColSpec::shrink()]));
    assert_eq!(grid.did_update(), SizingOutcome::Changed);
    assert_eq!(grid.layout_state().shrink_width, Some(90.0));
}

#[test]
fn test_grid_v_grow_toggle_triggers_pass() {
    let growing_sections = || {
        let mut props = three_section_props(vec![ColSpec::grow()]);
        for section in &mut props.sections {
            section.v_grow = true;
        }
        props
    };
    let mut grid: TestGrid = ScrollGrid::new(growing_sections());
    let mounted = mount_all(&mut grid, &[(0, false, 0.0), (1, false, 0.0), (2, false, 0.0)]);
    grid.did_mount();
    assert_eq!(grid.did_update(), SizingOutcome::Skipped);

    // Growing the grid stretches the body until its content overflows.
    mounted[1].0.overflows_y.set(true);
    let mut props = growing_sections();
    props.v_grow = true;
    grid.set_props(props);

    assert_eq!(grid.did_update(), SizingOutcome::Changed);
    assert!(grid.layout_state().force_vertical_scrollbars);
    let render = grid.render();
    for section in &render.sections {
        let cell = section.cell().unwrap();
        assert_eq!(cell.scroller.overflow_y, Overflow::Scroll);
        assert!(cell.scroller.v_grow);
    }
}

#[test]
fn test_height_change_does_not_trigger_pass() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::shrink()]));
    mount_all(&mut grid, &[(0, false, 50.0)]);
    grid.did_mount();
    grid.did_update();
    let passes = grid.sizing_passes();

    let mut props = three_section_props(vec![ColSpec::shrink()]);
    props.height = Some("640px".into());
    grid.set_props(props);
    assert_eq!(grid.did_update(), SizingOutcome::Skipped);
    assert_eq!(grid.sizing_passes(), passes);
    assert_eq!(grid.render().height.as_deref(), Some("640px"));
}

// =============================================================================
// ALIGNMENT INVARIANT
// =============================================================================

#[test]
fn test_every_section_gets_identical_col_group() {
    let cols = vec![
        ColSpec::fixed(40.0),
        ColSpec::shrink(),
        ColSpec::grow().with_min_width(100.0),
    ];
    let props = GridProps::new(
        cols,
        vec![
            chunk_section(SectionKind::Header, "<tr><td>short</td></tr>"),
            chunk_section(SectionKind::Body, "<tr><td>a much longer cell</td></tr>"),
            SectionSpec::override_with(SectionKind::Footer, "<tr><td>totals</td></tr>"),
        ],
    );
    let mut grid: TestGrid = ScrollGrid::new(props);
    mount_all(&mut grid, &[(0, false, 45.0), (1, true, 130.0)]);
    grid.did_mount();

    let render = grid.render();
    let groups: Vec<_> = render.col_groups().collect();
    assert_eq!(groups.len(), 2);
    assert!(groups.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(groups[0].len(), 3);
    assert_eq!(groups[0].cols[1].width, ColWidth::Px(130.0));
    assert!(matches!(
        render.sections[2],
        SectionRender::Override { index: 2, .. }
    ));
}

#[test]
fn test_col_group_memoized_between_renders() {
    let mut grid: TestGrid = ScrollGrid::new(three_section_props(vec![ColSpec::shrink()]));
    let mounted = mount_all(&mut grid, &[(0, false, 50.0)]);
    grid.did_mount();

    let first = grid.render();
    let second = grid.render();
    let a = first.col_groups().next().unwrap();
    let b = second.col_groups().next().unwrap();
    assert!(Rc::ptr_eq(a, b));
    assert_eq!(grid.col_group_builds(), 1);

    mounted[0].1.width.set(75.0);
    grid.handle_resize();
    let third = grid.render();
    assert!(!Rc::ptr_eq(a, third.col_groups().next().unwrap()));
    assert_eq!(grid.col_group_builds(), 2);
}

// =============================================================================
// SECTION UNMOUNT
// =============================================================================

#[test]
fn test_unmounted_section_excluded_and_ref_cleared() {
    let (log, element_ref) = recording_ref();
    let props = GridProps::new(
        vec![ColSpec::shrink()],
        vec![
            chunk_section(SectionKind::Header, "h"),
            SectionSpec::chunk(
                SectionKind::Body,
                ChunkSpec::new("b").with_element_ref(element_ref),
            ),
        ],
    );
    let mut grid: TestGrid = ScrollGrid::new(props);
    mount_all(&mut grid, &[(0, false, 60.0), (1, true, 200.0)]);
    assert_eq!(*log.borrow(), vec![Some("el")]);

    grid.did_mount();
    assert_eq!(grid.layout_state(), LayoutState::new(Some(200.0), true));

    assert!(grid.unmount_section(1));
    assert_eq!(*log.borrow(), vec![Some("el"), None]);
    assert_eq!(grid.mounted_sections(), vec![0]);

    assert_eq!(grid.did_update(), SizingOutcome::Changed);
    assert_eq!(grid.layout_state(), LayoutState::new(Some(60.0), false));
}

#[test]
fn test_section_turned_override_is_unmounted() {
    let (log, element_ref) = recording_ref();
    let props = GridProps::new(
        vec![],
        vec![SectionSpec::chunk(
            SectionKind::Body,
            ChunkSpec::new("b").with_element_ref(element_ref),
        )],
    );
    let mut grid: TestGrid = ScrollGrid::new(props);
    mount_all(&mut grid, &[(0, true, 0.0)]);
    grid.did_mount();

    grid.set_props(GridProps::new(
        vec![],
        vec![SectionSpec::override_with(SectionKind::Body, "<tr></tr>")],
    ));
    assert!(grid.mounted_sections().is_empty());
    assert_eq!(*log.borrow(), vec![Some("el"), None]);

    grid.did_update();
    assert!(!grid.layout_state().force_vertical_scrollbars);
}

#[test]
fn test_outer_content_chunk_hosts_no_scroller() {
    let (log, element_ref) = recording_ref();
    let props = GridProps::new(
        vec![ColSpec::shrink()],
        vec![
            chunk_section(SectionKind::Header, "h"),
            SectionSpec::chunk(
                SectionKind::Body,
                ChunkSpec::new("b").with_element_ref(element_ref),
            ),
        ],
    );
    let mut grid: TestGrid = ScrollGrid::new(props);
    mount_all(&mut grid, &[(0, false, 30.0), (1, true, 90.0)]);
    grid.did_mount();

    grid.set_props(GridProps::new(
        vec![ColSpec::shrink()],
        vec![
            chunk_section(SectionKind::Header, "h"),
            SectionSpec::chunk(SectionKind::Body, ChunkSpec::outer("<td>no rows</td>")),
        ],
    ));
    assert_eq!(grid.mounted_sections(), vec![0]);
    assert_eq!(*log.borrow(), vec![Some("el"), None]);
    assert!(!grid.mount_section(1, FakeScroller::new(true), FakeElement::new("el", 1.0)));

    assert_eq!(grid.did_update(), SizingOutcome::Changed);
    assert_eq!(grid.layout_state(), LayoutState::new(Some(30.0), false));
    let render = grid.render();
    assert!(matches!(
        &render.sections[1],
        SectionRender::OuterCell { index: 1, markup, .. } if markup == "<td>no rows</td>"
    ));
}

#[test]
fn test_dispose_clears_every_element_ref() {
    let (log, element_ref) = recording_ref();
    let props = GridProps::new(
        vec![],
        vec![
            SectionSpec::chunk(
                SectionKind::Header,
                ChunkSpec::new("").with_element_ref(element_ref.clone()),
            ),
            SectionSpec::chunk(
                SectionKind::Body,
                ChunkSpec::new("").with_element_ref(element_ref),
            ),
        ],
    );
    let mut grid: TestGrid = ScrollGrid::new(props);
    mount_all(&mut grid, &[(0, false, 0.0), (1, false, 0.0)]);
    grid.did_mount();

    grid.will_unmount();
    assert_eq!(grid.phase(), Phase::Disposed);
    let cleared = log.borrow().iter().filter(|v| v.is_none()).count();
    assert_eq!(cleared, 2);
    assert_eq!(grid.did_update(), SizingOutcome::Skipped);
}
