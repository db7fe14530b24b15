//! Pointer, capture, focus and gesture routing, driven through host events.

use arbor::{
    Ctx, Error, Result, WidgetId,
    event::{Event, HostEvent, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    geom::{Point, Rect, Size},
    layout::Place,
    testing::{EventLog, Harness, Probe, event_log},
    widgets::Absolute,
};

/// A 100x100 display with an absolute root.
fn harness() -> Result<(Harness, WidgetId)> {
    let mut h = Harness::with_size(Size::new(100.0, 100.0));
    let root = h.ui.add(Absolute::default());
    h.ui.set_root(root)?;
    h.ui.layout_root()?;
    Ok((h, root))
}

/// Attach a 20x20 probe under `parent` at `(x, y)`.
fn place(h: &mut Harness, parent: WidgetId, probe: Probe, x: f32, y: f32) -> Result<WidgetId> {
    let id = h.ui.add(probe.desired(Size::new(20.0, 20.0)));
    h.ui.attach(parent, id, None)?;
    h.ui.layout_widget(id, Rect::new(x, y, 20.0, 20.0), Place::FILL)?;
    Ok(id)
}

/// Capture on press, release on release.
fn grab(e: &Event, cx: &mut Ctx<'_>) -> Result<()> {
    match e.mouse().map(|m| m.kind) {
        Some(MouseEventKind::Press) => cx.capture()?,
        Some(MouseEventKind::Release) => cx.release_capture(),
        _ => {}
    }
    Ok(())
}

/// Take focus on press.
fn take_focus(e: &Event, cx: &mut Ctx<'_>) -> Result<()> {
    if e.mouse().is_some_and(|m| m.kind == MouseEventKind::Press) {
        cx.focus()?;
    }
    Ok(())
}

/// A pointer event at a display point.
fn mouse(kind: MouseEventKind, button: Option<MouseButton>, x: f32, y: f32) -> Event {
    Event::Mouse(MouseEvent::new(kind, button, Point::new(x, y)))
}

/// Events of one kind received by `label`.
fn received(log: &EventLog, label: &str, kind: MouseEventKind) -> usize {
    log.borrow()
        .iter()
        .filter(|(l, e)| *l == label && e.mouse().is_some_and(|m| m.kind == kind))
        .count()
}

#[test]
fn hover_sends_enter_and_leave() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    place(&mut h, root, Probe::new("a", &log), 10.0, 10.0)?;
    place(&mut h, root, Probe::new("b", &log), 50.0, 10.0)?;

    h.move_to(Point::new(15.0, 15.0))?;
    assert_eq!(
        *log.borrow(),
        vec![
            ("a", Event::MouseEnter),
            ("a", mouse(MouseEventKind::Move, None, 15.0, 15.0)),
        ]
    );
    log.borrow_mut().clear();

    h.move_to(Point::new(55.0, 15.0))?;
    assert_eq!(
        *log.borrow(),
        vec![
            ("a", Event::MouseLeave),
            ("b", Event::MouseEnter),
            ("b", mouse(MouseEventKind::Move, None, 55.0, 15.0)),
        ]
    );
    log.borrow_mut().clear();

    h.move_to(Point::new(90.0, 90.0))?;
    assert_eq!(*log.borrow(), vec![("b", Event::MouseLeave)]);
    assert_eq!(h.ui.hovered(), Some(root));
    Ok(())
}

#[test]
fn host_y_is_flipped() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let a = place(&mut h, root, Probe::new("a", &log), 0.0, 0.0)?;
    // Host row 99 is display row 0.
    h.send(HostEvent::PointerMoved { x: 5.0, y: 99.0 })?;
    assert_eq!(h.ui.pointer(), Some(Point::new(5.0, 0.0)));
    assert_eq!(h.ui.hovered(), Some(a));
    Ok(())
}

#[test]
fn press_before_any_move_is_at_origin() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let a = place(&mut h, root, Probe::new("a", &log), 0.0, 0.0)?;
    h.ui.capture(a)?;
    h.press(MouseButton::Left)?;
    assert_eq!(
        *log.borrow(),
        vec![(
            "a",
            mouse(MouseEventKind::Press, Some(MouseButton::Left), 0.0, 0.0)
        )]
    );
    Ok(())
}

#[test]
fn presses_bubble_from_the_hovered_widget() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let outer = place(&mut h, root, Probe::new("outer", &log).container(), 10.0, 10.0)?;
    place(&mut h, outer, Probe::new("inner", &log).ignoring(), 0.0, 0.0)?;
    h.move_to(Point::new(12.0, 12.0))?;
    log.borrow_mut().clear();

    h.press(MouseButton::Left)?;
    let labels: Vec<_> = log.borrow().iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, vec!["inner", "outer"]);
    Ok(())
}

#[test]
fn long_press_fires_once_for_the_consumer() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let a = place(&mut h, root, Probe::new("a", &log), 10.0, 10.0)?;
    h.move_to(Point::new(15.0, 15.0))?;

    h.press(MouseButton::Left)?;
    assert!(h.ui.long_press_pending(a));
    h.tick(0.25)?;
    assert_eq!(received(&log, "a", MouseEventKind::LongPress), 0);
    h.tick(0.25)?;
    assert_eq!(received(&log, "a", MouseEventKind::LongPress), 1);
    assert!(!h.ui.long_press_pending(a));
    h.tick(1.0)?;
    assert_eq!(received(&log, "a", MouseEventKind::LongPress), 1);
    Ok(())
}

#[test]
fn release_and_leave_cancel_long_press() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let a = place(&mut h, root, Probe::new("a", &log), 10.0, 10.0)?;
    place(&mut h, root, Probe::new("b", &log), 50.0, 10.0)?;
    h.move_to(Point::new(15.0, 15.0))?;

    h.click(MouseButton::Left)?;
    assert!(!h.ui.long_press_pending(a));
    h.tick(1.0)?;

    h.press(MouseButton::Right)?;
    h.move_to(Point::new(55.0, 15.0))?;
    assert!(!h.ui.long_press_pending(a));
    h.tick(1.0)?;
    assert_eq!(received(&log, "a", MouseEventKind::LongPress), 0);
    Ok(())
}

#[test]
fn double_click_window() -> Result<()> {
    for (gap, double) in [(0.0, true), (0.2, true), (0.5, false), (0.8, false)] {
        let log = event_log();
        let (mut h, root) = harness()?;
        place(&mut h, root, Probe::new("a", &log), 10.0, 10.0)?;
        h.move_to(Point::new(15.0, 15.0))?;

        h.click(MouseButton::Left)?;
        h.tick(gap)?;
        h.press(MouseButton::Left)?;
        assert_eq!(
            received(&log, "a", MouseEventKind::DoubleClick),
            usize::from(double),
            "gap {gap}"
        );
        assert_eq!(
            received(&log, "a", MouseEventKind::Press),
            if double { 1 } else { 2 },
            "gap {gap}"
        );
    }
    Ok(())
}

#[test]
fn double_click_needs_the_same_button() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    place(&mut h, root, Probe::new("a", &log), 10.0, 10.0)?;
    h.move_to(Point::new(15.0, 15.0))?;
    h.click(MouseButton::Left)?;
    h.click(MouseButton::Right)?;
    h.click(MouseButton::Right)?;
    assert_eq!(received(&log, "a", MouseEventKind::Press), 2);
    assert_eq!(received(&log, "a", MouseEventKind::DoubleClick), 1);
    Ok(())
}

#[test]
fn capture_receives_everything() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let a = place(&mut h, root, Probe::new("a", &log).on_event(grab), 10.0, 10.0)?;
    place(&mut h, root, Probe::new("b", &log), 50.0, 10.0)?;

    h.move_to(Point::new(15.0, 15.0))?;
    h.press(MouseButton::Left)?;
    assert_eq!(h.ui.captured(), Some(a));

    h.move_to(Point::new(55.0, 15.0))?;
    assert_eq!(received(&log, "a", MouseEventKind::Move), 2);
    assert_eq!(received(&log, "b", MouseEventKind::Move), 1);

    h.press(MouseButton::Right)?;
    h.release(MouseButton::Right)?;
    assert_eq!(received(&log, "a", MouseEventKind::Press), 2);
    assert_eq!(received(&log, "b", MouseEventKind::Press), 0);
    assert_eq!(received(&log, "b", MouseEventKind::Release), 0);
    assert_eq!(h.ui.captured(), None);

    h.click(MouseButton::Left)?;
    assert_eq!(received(&log, "b", MouseEventKind::Press), 1);
    Ok(())
}

#[test]
fn capture_is_exclusive() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let a = place(&mut h, root, Probe::new("a", &log), 10.0, 10.0)?;
    let b = place(&mut h, root, Probe::new("b", &log), 50.0, 10.0)?;
    h.ui.capture(a)?;
    h.ui.capture(b)?;
    assert_eq!(h.ui.captured(), Some(b));
    h.ui.release_capture(a);
    assert_eq!(h.ui.captured(), Some(b));
    h.ui.release_capture(b);
    assert_eq!(h.ui.captured(), None);
    Ok(())
}

#[test]
fn keys_go_to_focus_and_bubble() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let panel = place(&mut h, root, Probe::new("panel", &log).container(), 10.0, 10.0)?;
    let field = place(&mut h, panel, Probe::new("field", &log).ignoring(), 0.0, 0.0)?;

    h.key(KeyCode::A)?;
    assert!(log.borrow().is_empty());

    h.ui.focus(field)?;
    h.key(KeyCode::A)?;
    let key = Event::Key(KeyEvent::press(Some(KeyCode::A), None));
    assert_eq!(
        *log.borrow(),
        vec![("field", key.clone()), ("panel", key)]
    );
    Ok(())
}

#[test]
fn focus_on_press_and_focus_lost() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let a = place(&mut h, root, Probe::new("a", &log).on_event(take_focus), 10.0, 10.0)?;
    let b = place(&mut h, root, Probe::new("b", &log).on_event(take_focus), 50.0, 10.0)?;

    h.move_to(Point::new(15.0, 15.0))?;
    h.click(MouseButton::Left)?;
    assert_eq!(h.ui.focused(), Some(a));
    h.move_to(Point::new(55.0, 15.0))?;
    h.click(MouseButton::Left)?;
    assert_eq!(h.ui.focused(), Some(b));
    assert!(log.borrow().contains(&("a", Event::FocusLost)));
    Ok(())
}

#[test]
fn widget_destroyed_mid_press_is_forgotten() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let doomed = Probe::new("a", &log).on_event(|e, cx| {
        if e.mouse().is_some_and(|m| m.kind == MouseEventKind::Press) {
            cx.capture()?;
            cx.focus()?;
            let me = cx.id();
            cx.ui().destroy(me)?;
        }
        Ok(())
    });
    let a = place(&mut h, root, doomed, 10.0, 10.0)?;
    h.move_to(Point::new(15.0, 15.0))?;

    h.press(MouseButton::Left)?;
    assert!(!h.ui.contains(a));
    assert_eq!(h.ui.captured(), None);
    assert_eq!(h.ui.focused(), None);
    assert!(!h.ui.long_press_pending(a));

    h.release(MouseButton::Left)?;
    h.tick(1.0)?;
    h.key(KeyCode::Space)?;
    h.move_to(Point::new(16.0, 16.0))?;
    assert_eq!(h.ui.hovered(), Some(root));
    let labels: Vec<_> = log.borrow().iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, vec!["a", "a", "a"]);
    Ok(())
}

#[test]
fn destroying_a_pressed_widget_disarms_its_gestures() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let held = Probe::new("a", &log).on_event(|e, cx| {
        grab(e, cx)?;
        take_focus(e, cx)
    });
    let a = place(&mut h, root, held, 10.0, 10.0)?;
    h.move_to(Point::new(15.0, 15.0))?;

    h.press(MouseButton::Left)?;
    assert!(h.ui.long_press_pending(a));
    assert_eq!(h.ui.captured(), Some(a));
    assert_eq!(h.ui.focused(), Some(a));
    assert_eq!(h.ui.timers().len(), 2);

    h.ui.destroy(a)?;
    assert_eq!(h.ui.timers().len(), 0);
    assert!(!h.ui.long_press_pending(a));
    assert_eq!(h.ui.captured(), None);
    assert_eq!(h.ui.focused(), None);
    assert_eq!(h.ui.hovered(), None);
    let seen = log.borrow().len();

    h.tick(1.0)?;
    h.release(MouseButton::Left)?;
    h.press(MouseButton::Left)?;
    h.tick(1.0)?;
    h.release(MouseButton::Left)?;
    h.key(KeyCode::Space)?;
    h.move_to(Point::new(16.0, 16.0))?;
    assert_eq!(h.ui.hovered(), Some(root));
    assert_eq!(log.borrow().len(), seen);
    assert!(h.ui.timers().is_empty());
    Ok(())
}

#[test]
fn moving_widgets_update_hover() -> Result<()> {
    let log = event_log();
    let (mut h, root) = harness()?;
    let a = place(&mut h, root, Probe::new("a", &log), 60.0, 60.0)?;
    h.move_to(Point::new(15.0, 15.0))?;
    assert_eq!(h.ui.hovered(), Some(root));

    h.ui.set_position(a, Point::new(60.0, 10.0))?;
    let (x, _) = h.ui.position_params(a)?;
    h.ui.animator_mut()
        .transition(x)?
        .target(10.0)
        .duration(0.5);
    h.frame(0.5, [])?;
    assert_eq!(h.ui.position(a)?, Point::new(10.0, 10.0));
    assert_eq!(h.ui.hovered(), Some(a));
    assert_eq!(*log.borrow(), vec![("a", Event::MouseEnter)]);
    Ok(())
}

#[test]
fn unknown_button_is_rejected() -> Result<()> {
    let (mut h, _) = harness()?;
    assert!(matches!(
        h.send(HostEvent::PointerPressed { button: 9 }),
        Err(Error::Invalid(_))
    ));
    Ok(())
}

#[test]
fn input_without_root_is_ignored() -> Result<()> {
    let mut h = Harness::with_size(Size::new(10.0, 10.0));
    h.move_to(Point::new(1.0, 1.0))?;
    h.click(MouseButton::Left)?;
    assert_eq!(h.ui.hovered(), None);
    Ok(())
}
