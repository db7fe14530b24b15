use crate::{
    error::Result,
    geom::Rect,
    id::WidgetId,
    layout::Place,
    widget::{Ctx, HitTest, Widget},
};

/// A child layer.
#[derive(Debug, Clone, Copy)]
struct Layer {
    /// The child.
    id: WidgetId,
    /// Lay the child out over the whole stack.
    fill: bool,
}

/// The root-only container of overlapping layers.
///
/// Every layer is drawn, bottom first, but only the top layer takes part in hit-testing. Layers
/// pushed with `fill` are laid out over the whole display; the rest are placed by their owner.
#[derive(Debug, Default)]
pub struct Stack {
    /// Layers, bottom first.
    layers: Vec<Layer>,
}

impl Stack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a layer on top.
    pub fn push_child(&mut self, cx: &mut Ctx<'_>, child: WidgetId, fill: bool) -> Result<()> {
        let index = self.layers.len();
        self.insert_child(cx, index, child, fill)
    }

    /// Insert a layer at `index`, clamped to the top.
    pub fn insert_child(
        &mut self,
        cx: &mut Ctx<'_>,
        index: usize,
        child: WidgetId,
        fill: bool,
    ) -> Result<()> {
        let index = index.min(self.layers.len());
        cx.attach(child, Some(index))?;
        self.layers.insert(index, Layer { id: child, fill });
        if fill {
            let size = cx.size()?;
            cx.layout_widget(child, Rect::from_size(size), Place::FILL)?;
        }
        Ok(())
    }

    /// Detach the top layer, returning it.
    pub fn pop_child(&mut self, cx: &mut Ctx<'_>) -> Result<Option<WidgetId>> {
        let Some(top) = self.layers.pop() else {
            return Ok(None);
        };
        cx.detach(top.id)?;
        Ok(Some(top.id))
    }

    /// Detach a layer without destroying it.
    pub fn remove_child(&mut self, cx: &mut Ctx<'_>, child: WidgetId) -> Result<()> {
        self.layers.retain(|l| l.id != child);
        cx.detach(child)
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Is the stack empty?
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Widget for Stack {
    fn accepts_children(&self) -> bool {
        true
    }

    fn root_only(&self) -> bool {
        true
    }

    fn hit_test(&self) -> HitTest {
        HitTest::TopChild
    }

    fn layout_children(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        let bounds = Rect::from_size(cx.size()?);
        for layer in self.layers.iter().filter(|l| l.fill) {
            cx.layout_widget(layer.id, bounds, Place::FILL)?;
        }
        Ok(())
    }

    fn on_child_detached(&mut self, child: WidgetId) {
        self.layers.retain(|l| l.id != child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        EngineConfig, Error, Ui,
        geom::{Point, Size},
        widgets::Rectangle,
    };

    #[test]
    fn only_top_layer_is_hit() -> Result<()> {
        let mut ui = Ui::new(EngineConfig::default());
        let stack = ui.add_typed(Stack::new());
        ui.set_root(stack)?;
        ui.layout_root()?;
        assert_eq!(ui.size(stack)?, Size::new(800.0, 600.0));

        let bottom = ui.build(|a| Rectangle::new(a, Size::zero(), [1.0; 4]));
        let top = ui.build(|a| Rectangle::new(a, Size::new(10.0, 10.0), [1.0; 4]));
        ui.with_typed(stack, |w, cx| {
            w.push_child(cx, bottom.id(), true)?;
            w.push_child(cx, top.id(), false)
        })?;
        assert_eq!(ui.rect(bottom)?, Rect::new(0.0, 0.0, 800.0, 600.0));
        // `top` is unplaced and has no size, so nothing is hit.
        assert_eq!(ui.hit_test(Point::new(5.0, 5.0)), None);

        ui.layout_widget(top, Rect::new(0.0, 0.0, 10.0, 10.0), Place::FILL)?;
        assert_eq!(ui.hit_test(Point::new(5.0, 5.0)), Some(top.id()));
        assert_eq!(ui.hit_test(Point::new(50.0, 50.0)), None);

        let popped = ui.with_typed(stack, |w, cx| w.pop_child(cx))?;
        assert_eq!(popped, Some(top.id()));
        assert_eq!(ui.hit_test(Point::new(50.0, 50.0)), Some(bottom.id()));
        Ok(())
    }

    #[test]
    fn is_root_only() -> Result<()> {
        let mut ui = Ui::new(EngineConfig::default());
        let stack = ui.add_typed(Stack::new());
        assert_eq!(
            ui.layout_widget(stack, Rect::new(0.0, 0.0, 1.0, 1.0), Place::FILL),
            Err(Error::RootOnly(stack.id()))
        );
        Ok(())
    }

    #[test]
    fn resize_refills_layers() -> Result<()> {
        let mut ui = Ui::new(EngineConfig::default());
        let stack = ui.add_typed(Stack::new());
        ui.set_root(stack)?;
        ui.layout_root()?;
        let layer = ui.build(|a| Rectangle::new(a, Size::zero(), [1.0; 4]));
        ui.with_typed(stack, |w, cx| w.push_child(cx, layer.id(), true))?;
        ui.resize(Size::new(320.0, 200.0))?;
        assert_eq!(ui.rect(layer)?, Rect::new(0.0, 0.0, 320.0, 200.0));
        Ok(())
    }
}
