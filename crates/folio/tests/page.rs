#![forbid(unsafe_code)]

//! Integration tests: a full page scrolled through a simulated viewport.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio::prelude::*;
use folio::snapshot::SectionSnapshot;
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

const TICK: Duration = Duration::from_millis(2500);

/// Viewport 1280x800; with the default -50px bottom margin an element
/// counts from y to y + 750.
struct Harness {
    viewport: Rc<SimulatedViewport>,
    scheduler: Rc<ManualScheduler>,
    layout: PageLayout,
    page: Page,
}

fn place(viewport: &SimulatedViewport, elements: SectionElements, top: f64, body_height: f64) {
    if let Some(header) = elements.header {
        viewport.place(header, Rect::new(0.0, top, 1280.0, 100.0));
    }
    if let Some(body) = elements.body {
        let y = if elements.header.is_some() { top + 100.0 } else { top };
        viewport.place(body, Rect::new(0.0, y, 1280.0, body_height));
    }
}

fn harness() -> Harness {
    harness_with(&SiteConfig::default())
}

fn harness_with(config: &SiteConfig) -> Harness {
    let viewport = Rc::new(SimulatedViewport::new(1280.0, 800.0));
    let scheduler = Rc::new(ManualScheduler::new());
    let layout = PageLayout::sequential();
    let page = Page::mount(viewport.clone(), scheduler.clone(), config, &layout);

    place(&viewport, layout.skills, 900.0, 600.0);
    place(&viewport, layout.certifications, 1800.0, 600.0);
    place(&viewport, layout.education, 2700.0, 600.0);
    place(&viewport, layout.about, 3600.0, 400.0);
    place(&viewport, layout.contact, 4300.0, 500.0);

    Harness {
        viewport,
        scheduler,
        layout,
        page,
    }
}

fn revealed(page: &Page, section: SectionId) -> bool {
    page.reveal(section).is_some_and(SectionReveal::body_in_view)
}

#[test]
fn nothing_revealed_above_the_fold() {
    let h = harness();
    for section in SectionId::ALL {
        assert!(!revealed(&h.page, section), "{section} revealed early");
    }
    assert_eq!(h.page.pending_sections().len(), 5);
    assert!(h.page.reveal(SectionId::Hero).is_none());
    assert!(h.page.reveal(SectionId::Projects).is_none());
}

#[test]
fn scrolling_reveals_in_order() {
    let h = harness();
    h.viewport.scroll_to(400.0);
    assert!(revealed(&h.page, SectionId::Skills));
    assert!(!revealed(&h.page, SectionId::Certifications));

    h.viewport.scroll_to(1500.0);
    assert!(revealed(&h.page, SectionId::Certifications));
    assert!(!revealed(&h.page, SectionId::Education));

    h.viewport.scroll_to(3900.0);
    assert!(revealed(&h.page, SectionId::About));
    assert!(revealed(&h.page, SectionId::Contact));
    assert!(!revealed(&h.page, SectionId::Education));
}

#[test]
fn reveals_are_one_shot() {
    let h = harness();
    let header = h.layout.skills.header.unwrap();
    assert!(h.viewport.is_observing(header));

    h.viewport.scroll_to(400.0);
    assert!(!h.viewport.is_observing(header));
    h.viewport.scroll_to(0.0);
    assert!(revealed(&h.page, SectionId::Skills));
    let skills = h.page.reveal(SectionId::Skills).unwrap();
    assert!(skills.header_in_view());
    assert!(!h.page.pending_sections().contains(&SectionId::Skills));
}

#[test]
fn certification_slots_shift_only_on_screen() {
    let h = harness();
    let grid = h.page.certifications().unwrap();
    h.scheduler.advance(TICK * 2);
    assert_eq!(grid.offset(), 0);

    h.viewport.scroll_to(1500.0);
    assert!(grid.is_shifting());
    h.scheduler.advance(TICK);
    assert_eq!(grid.offset(), 1);

    h.viewport.scroll_to(4000.0);
    assert!(!grid.is_shifting());
    h.scheduler.advance(TICK * 4);
    assert_eq!(grid.offset(), 1);

    h.viewport.scroll_to(1500.0);
    h.scheduler.advance(TICK);
    assert_eq!(grid.offset(), 0);
}

#[test]
fn snapshot_tracks_reveals() {
    let h = harness();
    let before = h.page.snapshot();
    assert_eq!(
        before.section(SectionId::Skills),
        Some(&SectionSnapshot {
            section: SectionId::Skills,
            header_class: "section-header".to_string(),
            body_class: "skills-grid".to_string(),
        })
    );
    assert_eq!(
        before.grid_style.as_deref(),
        Some("--offset: 0; --empty-slots: 1")
    );

    h.viewport.scroll_to(400.0);
    let after = h.page.snapshot();
    assert_eq!(
        after.section(SectionId::Skills),
        Some(&SectionSnapshot {
            section: SectionId::Skills,
            header_class: "section-header in-view".to_string(),
            body_class: "skills-grid in-view".to_string(),
        })
    );
    assert_eq!(after.sections.len(), 5);
}

#[test]
fn reveal_callbacks_fire_once_per_element() {
    let mut h = harness();
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = Rc::clone(&log);
    h.page.on_reveal(move |section| l.borrow_mut().push(section));

    h.viewport.scroll_to(400.0);
    assert_eq!(*log.borrow(), vec![SectionId::Skills, SectionId::Skills]);
    h.viewport.scroll_to(0.0);
    h.viewport.scroll_to(400.0);
    assert_eq!(log.borrow().len(), 2);

    // Contact has no header, so it reports once.
    h.viewport.scroll_to(3900.0);
    let contact = log
        .borrow()
        .iter()
        .filter(|s| **s == SectionId::Contact)
        .count();
    assert_eq!(contact, 1);

    drop(h.page);
    assert_eq!(Rc::strong_count(&log), 1);
}

#[test]
fn snapshot_grid_style_follows_shift() {
    let h = harness();
    h.viewport.scroll_to(1500.0);
    h.scheduler.advance(TICK);
    assert_eq!(
        h.page.snapshot().grid_style.as_deref(),
        Some("--offset: 1; --empty-slots: 1")
    );
}

#[test]
fn typewriter_runs_on_page_scheduler() {
    let h = harness();
    h.scheduler.advance(Duration::from_millis(400));
    assert_eq!(h.page.snapshot().typed_role, "Full");
}

#[test]
fn theme_toggle_is_handled_by_page() {
    let mut h = harness();
    assert_eq!(h.page.theme().theme(), Theme::Dark);
    assert_eq!(h.page.dispatch(NavAction::ToggleTheme), None);
    assert_eq!(current_theme(), Theme::Light);
    assert_eq!(h.page.snapshot().theme, Theme::Light);
}

#[test]
fn navigation_returns_host_actions() {
    let mut h = harness();
    assert!(h.page.on_scroll(60.0));
    assert_eq!(h.page.snapshot().nav_class, "navbar scrolled");

    h.page.toggle_menu();
    assert!(h.page.snapshot().menu_open);
    let action = h.page.select(SectionId::Contact);
    assert_eq!(action, NavAction::ScrollTo(SectionId::Contact));
    assert!(!h.page.navbar().is_menu_open());
    assert_eq!(h.page.dispatch(action), Some(action));

    h.page.toggle_menu();
    assert_eq!(
        h.page.on_key(NavKey::Escape, None),
        Some(NavAction::FocusMenuButton)
    );
}

#[test]
fn dropping_the_page_releases_everything() {
    let h = harness();
    h.viewport.scroll_to(1500.0);
    assert!(h.viewport.active_observers() > 0);
    assert!(h.scheduler.active_timers() > 0);

    drop(h.page);
    assert_eq!(h.viewport.active_observers(), 0);
    assert_eq!(h.scheduler.active_timers(), 0);
}

#[test]
fn configured_threshold_applies_to_bodies() {
    let config = SiteConfig::from_toml_str("[reveal]\nthreshold = 0.5\n").unwrap();
    let h = harness_with(&config);
    // Skills grid spans 1000..1600; at 400 only 150px (25%) is in view.
    h.viewport.scroll_to(400.0);
    let skills = h.page.reveal(SectionId::Skills).unwrap();
    assert!(skills.header_in_view());
    assert!(!skills.body_in_view());
    h.viewport.scroll_to(700.0);
    assert!(skills.body_in_view());
}

#[test]
#[traced_test]
fn mount_is_logged() {
    let _h = harness();
    assert!(logs_contain("page mounted"));
}
