use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};
use crate::render::{ClipRect, LinePrimitive, RectPrimitive, TextPrimitive};

/// A single, stateless draw instruction in absolute canvas pixels.
///
/// Backends consume commands in order: later commands paint over earlier ones,
/// which is what lets the selection overlay dim tracks drawn before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
    /// Restricts subsequent commands to a region.
    SetClip(ClipRect),
    /// Removes the active clip region.
    ClearClip,
}

/// Backend-agnostic scene for one timeline draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.rects().count()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.texts().count()
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for command in &self.commands {
            match command {
                DrawCommand::Line(line) => line.validate()?,
                DrawCommand::Rect(rect) => rect.validate()?,
                DrawCommand::Text(text) => text.validate()?,
                DrawCommand::SetClip(clip) => {
                    if !clip.x.is_finite()
                        || !clip.y.is_finite()
                        || !clip.width.is_finite()
                        || !clip.height.is_finite()
                    {
                        return Err(TimelineError::InvalidData(
                            "clip rect must be finite".to_owned(),
                        ));
                    }
                }
                DrawCommand::ClearClip => {}
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
