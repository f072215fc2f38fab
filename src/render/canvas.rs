use crate::render::{
    ClipRect, Color, DrawCommand, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PaintState {
    origin_x: f64,
    origin_y: f64,
    clip: Option<ClipRect>,
}

/// Canvas-2D style drawing surface that records into a [`RenderFrame`].
///
/// Coordinates passed to drawing calls are relative to the current origin;
/// `translate` moves the origin and `save`/`restore` bracket translations and
/// clips the same way a browser canvas context does.
#[derive(Debug)]
pub struct PaintContext<'a> {
    frame: &'a mut RenderFrame,
    state: PaintState,
    stack: Vec<PaintState>,
}

impl<'a> PaintContext<'a> {
    #[must_use]
    pub fn new(frame: &'a mut RenderFrame) -> Self {
        Self {
            frame,
            state: PaintState {
                origin_x: 0.0,
                origin_y: 0.0,
                clip: None,
            },
            stack: Vec::new(),
        }
    }

    /// Current origin in absolute canvas pixels.
    #[must_use]
    pub fn origin(&self) -> (f64, f64) {
        (self.state.origin_x, self.state.origin_y)
    }

    #[must_use]
    pub fn command_count(&self) -> usize {
        self.frame.commands.len()
    }

    pub fn save(&mut self) {
        self.stack.push(self.state);
    }

    /// Pops the last saved state. Unbalanced calls are ignored.
    pub fn restore(&mut self) {
        let Some(previous) = self.stack.pop() else {
            return;
        };
        if previous.clip != self.state.clip {
            match previous.clip {
                Some(clip) => self.frame.push(DrawCommand::SetClip(clip)),
                None => self.frame.push(DrawCommand::ClearClip),
            }
        }
        self.state = previous;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.state.origin_x += dx;
        self.state.origin_y += dy;
    }

    /// Intersects the active clip with a rectangle in local coordinates.
    pub fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let local = ClipRect::new(
            self.state.origin_x + x,
            self.state.origin_y + y,
            width.max(0.0),
            height.max(0.0),
        );
        let clip = match self.state.clip {
            Some(active) => active.intersect(local),
            None => local,
        };
        self.state.clip = Some(clip);
        self.frame.push(DrawCommand::SetClip(clip));
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.frame.push(DrawCommand::Rect(RectPrimitive::new(
            self.state.origin_x + x,
            self.state.origin_y + y,
            width,
            height,
            color,
        )));
    }

    pub fn stroke_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke_width: f64,
        color: Color,
    ) {
        let transparent = color.with_alpha(0.0);
        self.frame.push(DrawCommand::Rect(
            RectPrimitive::new(
                self.state.origin_x + x,
                self.state.origin_y + y,
                width.max(0.0),
                height.max(0.0),
                transparent,
            )
            .with_border(stroke_width, color),
        ));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) {
        let (ox, oy) = self.origin();
        self.frame.push(DrawCommand::Line(LinePrimitive::new(
            ox + x1,
            oy + y1,
            ox + x2,
            oy + y2,
            stroke_width,
            color,
        )));
    }

    pub fn fill_text(
        &mut self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.frame.push(DrawCommand::Text(TextPrimitive::new(
            text,
            self.state.origin_x + x,
            self.state.origin_y + y,
            font_size_px,
            color,
            h_align,
        )));
    }
}
