use crate::{
    anim::{Animator, Param},
    geom::{Point, Size},
    id::WidgetId,
    widget::{HitTest, Widget},
};

/// A widget and its place in the tree.
pub(crate) struct Node {
    /// The widget. `None` while it is taken out for a call.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Non-owning back-reference to the parent.
    pub(crate) parent: Option<WidgetId>,
    /// Owned children in draw order.
    pub(crate) children: Vec<WidgetId>,
    /// Invisible widgets are neither drawn nor hit.
    pub(crate) visible: bool,
    /// Horizontal position in the parent's space.
    pub(crate) x: Param<f32>,
    /// Vertical position in the parent's space.
    pub(crate) y: Param<f32>,
    /// Width and height, for sized widgets.
    pub(crate) size: Option<(Param<f32>, Param<f32>)>,
    /// The widget accepts children.
    pub(crate) container: bool,
    /// The widget may only be the root.
    pub(crate) root_only: bool,
    /// Hit-test policy.
    pub(crate) hit_test: HitTest,
    /// Children detached while the widget was taken out, waiting to be reported.
    pub(crate) detached: Vec<WidgetId>,
    /// Widget name, for logs.
    pub(crate) name: &'static str,
}

impl Node {
    /// Wrap a widget, registering its placement parameters.
    pub(crate) fn new(widget: Box<dyn Widget>, animator: &mut Animator) -> Self {
        let sized = widget.sized();
        let size = sized.then(|| (animator.placement_param(0.0), animator.placement_param(0.0)));
        Self {
            parent: None,
            children: Vec::new(),
            visible: true,
            x: animator.placement_param(0.0),
            y: animator.placement_param(0.0),
            size,
            container: widget.accepts_children(),
            root_only: widget.root_only(),
            hit_test: if sized {
                widget.hit_test()
            } else {
                HitTest::Never
            },
            detached: Vec::new(),
            name: widget.name(),
            widget: Some(widget),
        }
    }

    /// Current position.
    pub(crate) fn position(&self, animator: &Animator) -> Point {
        Point::new(
            animator.get(self.x).unwrap_or_default(),
            animator.get(self.y).unwrap_or_default(),
        )
    }

    /// Current size. Position-only widgets report zero.
    pub(crate) fn size(&self, animator: &Animator) -> Size {
        self.size.map_or(Size::zero(), |(w, h)| {
            Size::new(
                animator.get(w).unwrap_or_default(),
                animator.get(h).unwrap_or_default(),
            )
        })
    }

    /// Release the placement parameters.
    pub(crate) fn release_params(&self, animator: &mut Animator) {
        animator.remove(self.x);
        animator.remove(self.y);
        if let Some((w, h)) = self.size {
            animator.remove(w);
            animator.remove(h);
        }
    }
}
