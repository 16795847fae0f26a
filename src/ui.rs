//! Text overlay drawn with egui on top of the rendered surface.

use glam::Vec2;

use crate::camera::Camera;
use crate::surface::{TextLabel, TextSpace};

/// Where a label's center lands, in physical pixels.
pub fn label_anchor(label: &TextLabel, camera: &Camera) -> Vec2 {
    match label.space {
        TextSpace::World => camera.world_to_screen(label.position),
        TextSpace::Screen => Vec2::new(camera.viewport_width / 2.0 + label.position.x, label.position.y),
    }
}

fn to_color32([r, g, b]: [f32; 3]) -> egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgb(channel(r), channel(g), channel(b))
}

/// Draw every label centered on its anchor, with an optional padded backdrop.
pub fn draw_labels(ctx: &egui::Context, labels: &[TextLabel], camera: &Camera) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Foreground, egui::Id::new("labels")));

    // egui works in logical points, the camera in physical pixels
    let ppp = ctx.pixels_per_point();

    for label in labels {
        let anchor = label_anchor(label, camera) / ppp;
        let color = to_color32(label.color);
        let galley = painter.layout_no_wrap(label.text.clone(), egui::FontId::proportional(label.font_size), color);

        let rect = egui::Align2::CENTER_CENTER.anchor_size(egui::pos2(anchor.x, anchor.y), galley.size());
        if let Some(background) = label.background {
            let padding = egui::vec2(label.padding.x, label.padding.y);
            painter.rect_filled(rect.expand2(padding), 0.0, to_color32(background));
        }
        painter.galley(rect.min, galley, color);
    }
}
