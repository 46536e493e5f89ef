// SPDX-License-Identifier: MPL-2.0
//! Canvas spinner drawn in place of the walk cycle when no sprite sheet is
//! configured.

use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Size, Theme};
use std::f32::consts::PI;

const STROKE_WIDTH: f32 = 3.0;
const ARC_SEGMENTS: u16 = 30;

/// Half-circle arc rotating around a faint track.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: Size,
}

impl AnimatedSpinner {
    /// Creates a spinner at `rotation` radians filling `size`.
    #[must_use]
    pub fn new(color: Color, rotation: f32, size: Size) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size,
        }
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size.width.max(0.0)))
            .height(Length::Fixed(size.height.max(0.0)))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = (frame.width().min(frame.height()) / 2.0 - 4.0).max(1.0);

                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                        a: 0.25,
                        ..self.color
                    }),
                );

                // Start at the top of the circle.
                let start_angle = self.rotation - PI / 2.0;
                let end_angle = start_angle + PI;

                let mut arc_path = canvas::path::Builder::new();
                arc_path.move_to(Point::new(
                    center.x + radius * start_angle.cos(),
                    center.y + radius * start_angle.sin(),
                ));
                for i in 1..=ARC_SEGMENTS {
                    let t = f32::from(i) / f32::from(ARC_SEGMENTS);
                    let angle = start_angle + (end_angle - start_angle) * t;
                    arc_path.line_to(Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }

                frame.stroke(
                    &arc_path.build(),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}
