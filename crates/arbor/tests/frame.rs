//! Ordering of the per-frame steps.

use std::{cell::RefCell, rc::Rc};

use arbor::{
    Result,
    backend::record::DrawOp,
    event::HostEvent,
    geom::{Rect, Size},
    layout::Place,
    testing::{Harness, Probe, event_log},
    widgets::Absolute,
};

#[test]
fn frame_steps_run_in_order() -> Result<()> {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut h = Harness::with_size(Size::new(50.0, 50.0));

    let root = h.ui.add(Absolute::default());
    h.ui.set_root(root)?;
    h.ui.layout_root()?;
    let log = event_log();
    let o = order.clone();
    let probe = h.ui.add(Probe::new("probe", &log).on_event(move |_, _| {
        o.borrow_mut().push("input");
        Ok(())
    }));
    h.ui.attach(root, probe, None)?;
    h.ui.layout_widget(probe, Rect::new(0.0, 0.0, 50.0, 50.0), Place::FILL)?;

    let param = h.ui.animator_mut().param(0.0f32);
    let o = order.clone();
    h.ui.animator_mut().add_change_listener(param, move |_, _| {
        o.borrow_mut().push("animate");
    })?;
    h.ui.animator_mut().transition(param)?.target(1.0).duration(1.0);

    let o = order.clone();
    h.ui.timers_mut().add_timer(0.0, move |_| {
        o.borrow_mut().push("timer");
        Ok(())
    });
    let o = order.clone();
    h.ui.timers_mut().add_updater(move |_, _| {
        o.borrow_mut().push("update");
        Ok(())
    });
    let o = order.clone();
    h.ui.timers_mut().add_frame_hook(move |_| {
        o.borrow_mut().push("hook");
        Ok(())
    });

    h.frame(0.5, [HostEvent::PointerMoved { x: 10.0, y: 10.0 }])?;
    assert_eq!(
        *order.borrow(),
        vec!["animate", "timer", "update", "input", "input", "hook"]
    );
    let ops = h.backend.ops();
    assert_eq!(ops.first(), Some(&DrawOp::BeginFrame { size: Size::new(50.0, 50.0) }));
    assert_eq!(ops.last(), Some(&DrawOp::EndFrame));
    Ok(())
}

#[test]
fn update_skips_input_and_drawing() -> Result<()> {
    let mut h = Harness::with_size(Size::new(10.0, 10.0));
    let hooks = Rc::new(RefCell::new(0));
    let c = hooks.clone();
    h.ui.timers_mut().add_frame_hook(move |_| {
        *c.borrow_mut() += 1;
        Ok(())
    });
    h.tick(0.1)?;
    h.tick(0.1)?;
    assert_eq!(*hooks.borrow(), 2);
    assert!(h.backend.ops().is_empty());
    Ok(())
}
