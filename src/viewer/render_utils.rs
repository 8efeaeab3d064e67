use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, pos2};
use graph_relax::Viewport;

const GRID_STEP: f64 = 0.25;

pub(super) fn to_screen(rect: Rect, pixel: (f64, f64)) -> Pos2 {
    pos2(rect.left() + pixel.0 as f32, rect.top() + pixel.1 as f32)
}

pub(super) fn to_local(rect: Rect, screen: Pos2) -> (f64, f64) {
    ((screen.x - rect.left()) as f64, (screen.y - rect.top()) as f64)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, viewport: Viewport) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let mut step = ((GRID_STEP * viewport.zoom.get()) as f32).max(f32::MIN_POSITIVE);
    while step < 20.0 {
        step *= 2.0;
    }
    let origin = to_screen(rect, (viewport.pan[0], viewport.pan[1]));
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    rect.expand(radius).contains(position)
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    Rect::from_two_pos(start, end)
        .expand(padding)
        .intersects(rect)
}

pub(super) fn trim_segment(start: Pos2, end: Pos2, radius: f32) -> Option<(Pos2, Pos2)> {
    let delta: Vec2 = end - start;
    let length = delta.length();
    if length <= radius * 2.0 {
        return None;
    }
    let direction = delta / length;
    Some((start + direction * radius, end - direction * radius))
}

pub(super) fn vertex_color(fixed: bool, hovered: bool, selected: bool) -> Color32 {
    if fixed {
        Color32::from_rgb(246, 206, 104)
    } else if selected {
        Color32::from_rgb(241, 146, 94)
    } else if hovered {
        Color32::from_rgb(255, 164, 101)
    } else {
        Color32::from_rgb(90, 160, 220)
    }
}
