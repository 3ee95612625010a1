//! Drawer overlay: paints the scrim and the panel for a [`Drawer`] and
//! feeds egui pointer input back into it.

use drawer_core::{Direction, Drawer, DrawerFrame, PanelLayout, PointerEvent};
use egui::{pos2, vec2, Color32, Context, CornerRadius, Id, Order, Pos2, Rect, Ui, UiBuilder};
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

use crate::source::{EguiGestureSource, SourceState};
use crate::{sizing, theme};

/// Egui has a single primary pointer; touches are folded into it.
const PRIMARY_POINTER: u64 = 0;

/// Persistent overlay state. Keep one per drawer across frames.
#[derive(Debug)]
pub struct DrawerOverlay {
    id: Id,
    /// Panel size along the drawer axis, as a fraction of the screen.
    extent_fraction: f32,
    source: Rc<SourceState>,
    /// The current press started on the scrim.
    press_on_scrim: bool,
}

impl DrawerOverlay {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id: Id::new(id_salt),
            extent_fraction: sizing::PANEL_EXTENT_FRACTION,
            source: Rc::new(SourceState::default()),
            press_on_scrim: false,
        }
    }

    /// Set the panel size along the drawer axis (fraction of the screen).
    pub fn extent_fraction(mut self, fraction: f32) -> Self {
        self.extent_fraction = fraction.clamp(0.1, 1.0);
        self
    }

    /// Gesture source to hand to [`Drawer::new`].
    pub fn gesture_source(&self) -> EguiGestureSource {
        EguiGestureSource {
            state: self.source.clone(),
        }
    }

    /// Run one frame: advance time, route input, paint.
    pub fn show(
        &mut self,
        ctx: &Context,
        drawer: &mut Drawer,
        now: Instant,
        add_contents: impl FnOnce(&mut Ui),
    ) {
        let dt = ctx.input(|i| i.stable_dt);
        drawer.tick(now);
        drawer.advance(Duration::from_secs_f32(dt.max(0.0)));

        let Some(frame) = drawer.frame() else {
            self.press_on_scrim = false;
            return;
        };

        let screen = ctx.input(|i| i.content_rect());
        let rest_rect = panel_rect(screen, frame.direction, self.extent_fraction);
        // The panel is painted below, so listeners may bind to it now.
        self.source.painted.set(true);
        self.report_layout(drawer, screen, rest_rect);

        let panel = rest_rect.translate(to_vec2(&frame));
        self.route_input(ctx, drawer, panel);

        egui::Area::new(self.id)
            .order(Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let painter = ui.painter();
                painter.rect_filled(screen, CornerRadius::ZERO, scrim_color(frame.scrim_opacity));
                painter.rect_filled(
                    panel,
                    CornerRadius::same(sizing::PANEL_RADIUS),
                    theme::PANEL_BG,
                );
                let content = panel.shrink(sizing::PANEL_PADDING);
                ui.scope_builder(UiBuilder::new().max_rect(content), add_contents);
            });

        if drawer.is_animating() || (drawer.is_mounted() && !drawer.is_open()) {
            ctx.request_repaint();
        }
    }

    fn report_layout(&self, drawer: &mut Drawer, screen: Rect, panel: Rect) {
        let layout = PanelLayout {
            container: to_kurbo_rect(screen),
            panel: to_kurbo_rect(panel),
        };
        if drawer.layout() != Some(layout) {
            log::debug!("Drawer overlay layout changed: {:?}", layout);
            drawer.set_layout(layout);
        }
    }

    fn route_input(&mut self, ctx: &Context, drawer: &mut Drawer, panel: Rect) {
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    if panel.contains(pos) {
                        self.press_on_scrim = false;
                        drawer.handle_pointer(PointerEvent::Down {
                            pointer: PRIMARY_POINTER,
                            position: to_point(pos),
                        });
                    } else {
                        self.press_on_scrim = true;
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    if self.press_on_scrim && !panel.contains(pos) {
                        drawer.backdrop_click();
                    }
                    self.press_on_scrim = false;
                    drawer.handle_pointer(PointerEvent::Up {
                        pointer: PRIMARY_POINTER,
                        position: to_point(pos),
                    });
                }
                egui::Event::PointerMoved(pos) => {
                    drawer.handle_pointer(PointerEvent::Move {
                        pointer: PRIMARY_POINTER,
                        position: to_point(pos),
                    });
                }
                egui::Event::PointerGone => {
                    self.press_on_scrim = false;
                    drawer.handle_pointer(PointerEvent::Cancel {
                        pointer: PRIMARY_POINTER,
                    });
                }
                _ => {}
            }
        }
    }
}

/// Rectangle of the fully open panel, anchored to the drawer's edge.
pub fn panel_rect(screen: Rect, direction: Direction, extent_fraction: f32) -> Rect {
    let width = screen.width() * extent_fraction;
    let height = screen.height() * extent_fraction;
    match direction {
        Direction::Bottom => Rect::from_min_max(pos2(screen.left(), screen.bottom() - height), screen.max),
        Direction::Top => Rect::from_min_max(screen.min, pos2(screen.right(), screen.top() + height)),
        Direction::Left => Rect::from_min_max(screen.min, pos2(screen.left() + width, screen.bottom())),
        Direction::Right => Rect::from_min_max(pos2(screen.right() - width, screen.top()), screen.max),
    }
}

/// Scrim color at the given alpha.
pub fn scrim_color(opacity: f64) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    let [r, g, b, _] = theme::SCRIM.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

fn to_vec2(frame: &DrawerFrame) -> egui::Vec2 {
    let translation = frame.translation();
    vec2(translation.x as f32, translation.y as f32)
}

fn to_point(pos: Pos2) -> kurbo::Point {
    kurbo::Point::new(pos.x as f64, pos.y as f64)
}

fn to_kurbo_rect(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.max.x as f64,
        rect.max.y as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_max(Pos2::ZERO, pos2(400.0, 800.0))
    }

    #[test]
    fn test_panel_rect_anchors() {
        let bottom = panel_rect(screen(), Direction::Bottom, 0.5);
        assert_eq!(bottom, Rect::from_min_max(pos2(0.0, 400.0), pos2(400.0, 800.0)));

        let top = panel_rect(screen(), Direction::Top, 0.5);
        assert_eq!(top, Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 400.0)));

        let left = panel_rect(screen(), Direction::Left, 0.5);
        assert_eq!(left, Rect::from_min_max(pos2(0.0, 0.0), pos2(200.0, 800.0)));

        let right = panel_rect(screen(), Direction::Right, 0.5);
        assert_eq!(right, Rect::from_min_max(pos2(200.0, 0.0), pos2(400.0, 800.0)));
    }

    #[test]
    fn test_scrim_alpha() {
        assert_eq!(scrim_color(0.0).a(), 0);
        assert_eq!(scrim_color(1.0).a(), 255);
        assert_eq!(scrim_color(0.6).a(), 153);
    }

    #[test]
    fn test_first_frame_reports_layout_and_binds() {
        let ctx = Context::default();
        let mut overlay = DrawerOverlay::new("drawer");
        let source = overlay.gesture_source();
        let mut drawer = Drawer::new(
            drawer_core::DrawerConfig::default(),
            drawer_core::DrawerCallbacks::new(|| {}),
            Box::new(overlay.gesture_source()),
        );
        let now = Instant::now();
        drawer.set_open(true, now);
        assert!(!source.is_bound());

        let input = egui::RawInput {
            screen_rect: Some(screen()),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| overlay.show(ctx, &mut drawer, now, |_| {}));

        let layout = drawer.layout().unwrap();
        assert_eq!(layout.container, kurbo::Rect::new(0.0, 0.0, 400.0, 800.0));
        assert_eq!(layout.panel, kurbo::Rect::new(0.0, 320.0, 400.0, 800.0));
        assert!(source.is_bound());
    }

    #[test]
    fn test_rect_conversion() {
        let rect = to_kurbo_rect(Rect::from_min_max(pos2(1.0, 2.0), pos2(3.0, 4.0)));
        assert_eq!(rect, kurbo::Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
