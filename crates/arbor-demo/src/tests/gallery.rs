use arbor::{
    Error, Result,
    event::{KeyCode, MouseButton},
    geom::{Point, Rect, Size},
    testing::Harness,
};

use crate::{
    gallery::Gallery,
    swatch::{FADE_TIME, Swatch},
};

fn setup() -> Result<(Harness, Gallery)> {
    let mut h = Harness::with_size(Size::new(400.0, 300.0));
    let gallery = Gallery::build(&mut h.ui, 2, 2)?;
    Ok((h, gallery))
}

fn double_click(h: &mut Harness, p: Point) -> Result<()> {
    h.move_to(p)?;
    h.click(MouseButton::Left)?;
    h.click(MouseButton::Left)
}

#[test]
fn lays_out_bars_and_grid() -> Result<()> {
    let (h, g) = setup()?;
    assert_eq!(h.ui.rect(g.button)?, Rect::new(152.0, 4.0, 96.0, 24.0));
    // Cells are placed in the grid's space; the grid sits on top of the footer.
    assert_eq!(h.ui.rect(g.cells[0])?, Rect::new(4.0, 4.0, 196.0, 114.0));
    assert_eq!(h.ui.rect(g.cells[3])?, Rect::new(200.0, 118.0, 196.0, 114.0));
    Ok(())
}

#[test]
fn press_and_keys_cycle_colors() -> Result<()> {
    let (mut h, g) = setup()?;
    let cell = g.cells[0];
    let color = h.ui.widget_ref::<Swatch>(cell)?.color();
    let start = h.ui.animator().get(color)?;

    h.move_to(Point::new(50.0, 60.0))?;
    h.press(MouseButton::Left)?;
    assert_eq!(h.ui.focused(), Some(cell.id()));
    assert_eq!(h.ui.widget_ref::<Swatch>(cell)?.index(), 1);
    h.release(MouseButton::Left)?;
    h.tick(FADE_TIME)?;
    assert!(!h.ui.animator().is_animating(color));
    assert_ne!(h.ui.animator().get(color)?, start);

    h.key(KeyCode::Space)?;
    assert_eq!(h.ui.widget_ref::<Swatch>(cell)?.index(), 2);
    h.key(KeyCode::A)?;
    assert_eq!(h.ui.widget_ref::<Swatch>(cell)?.index(), 2);
    Ok(())
}

#[test]
fn long_press_resets() -> Result<()> {
    let (mut h, g) = setup()?;
    let cell = g.cells[3];
    let color = h.ui.widget_ref::<Swatch>(cell)?.color();
    let start = h.ui.animator().get(color)?;

    h.move_to(Point::new(300.0, 200.0))?;
    h.press(MouseButton::Left)?;
    h.tick(0.5)?;
    assert_eq!(h.ui.widget_ref::<Swatch>(cell)?.index(), 0);
    assert_eq!(h.ui.animator().get(color)?, start);
    Ok(())
}

#[test]
fn button_opens_and_dialog_closes() -> Result<()> {
    let (mut h, g) = setup()?;
    double_click(&mut h, Point::new(200.0, 16.0))?;
    assert!(!g.dialog_open());
    h.tick(0.0)?;
    assert!(g.dialog_open());

    // Closing is refused while the panel slides in.
    g.close_dialog(&mut h.ui)?;
    assert!(g.dialog_open());

    h.tick(0.25)?;
    let panel = g.dialog_panel().ok_or(Error::Invalid("no panel".into()))?;
    assert_eq!(h.ui.rect(panel)?, Rect::new(96.0, 81.0, 208.0, 138.0));

    // A second open request is ignored.
    g.open_dialog(&mut h.ui)?;
    assert_eq!(g.host.open_count(), 1);

    h.tick(1.0)?;
    double_click(&mut h, Point::new(200.0, 150.0))?;
    h.tick(0.0)?;
    assert!(!g.dialog_open());
    h.tick(0.25)?;
    assert!(!h.ui.contains(panel));
    assert_eq!(g.host.open_count(), 0);
    Ok(())
}

#[test]
fn hover_outlines_swatches() -> Result<()> {
    let (mut h, g) = setup()?;
    assert_eq!(h.render()?.len(), 9);
    assert_eq!(h.backend.fills().len(), 7);

    h.move_to(Point::new(200.0, 16.0))?;
    assert_eq!(h.ui.hovered(), Some(g.button.id()));
    h.render()?;
    let fills = h.backend.fills();
    assert_eq!(fills.len(), 11);
    assert_eq!(fills[7].0, Rect::new(152.0, 4.0, 96.0, 2.0));
    Ok(())
}
