#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::Path;

use eframe::egui;
use guide_frame::{
    AlignmentResult, AspectRatio, FrameState, GestureTarget, GuideType, JsonFileStore, Landmark,
    LevelReading, Session, Size, capture, config, hit_test, landmarks, overlay,
};
use image::DynamicImage;

struct GuideFrameApp {
    frame: Option<DynamicImage>,
    texture: Option<egui::TextureHandle>,
    landmarks: Vec<Landmark>,
    session: Session<JsonFileStore>,
    show_grid: bool,
    show_skeleton: bool,
    mirror: bool,
    show_level: bool,
    /// Left-right roll in degrees; a desktop has no orientation sensor.
    roll: f32,
    status: Option<String>,
}

impl GuideFrameApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let store = JsonFileStore::new(config::placements_path());
        let thresholds = config::load_alignment_config(&config::alignment_path());
        Self {
            frame: None,
            texture: None,
            landmarks: Vec::new(),
            session: Session::new(store, thresholds),
            show_grid: false,
            show_skeleton: true,
            mirror: false,
            show_level: false,
            roll: 0.0,
            status: None,
        }
    }

    fn open(&mut self, ctx: &egui::Context, path: &Path) {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            self.open_landmarks(path);
        } else {
            self.open_frame(ctx, path);
        }
    }

    fn open_frame(&mut self, ctx: &egui::Context, path: &Path) {
        match image::open(path) {
            Ok(img) => {
                log::info!("Loaded frame {:?} ({}x{})", path, img.width(), img.height());
                self.frame = Some(img);
                self.load_texture(ctx);
                self.status = None;
            }
            Err(e) => {
                log::error!("Failed to open frame {:?}: {}", path, e);
                self.status = Some(format!("Could not open image: {}", e));
            }
        }
    }

    fn open_landmarks(&mut self, path: &Path) {
        match landmarks::load_frame(path) {
            Ok(points) => {
                log::info!("Loaded {} landmarks from {:?}", points.len(), path);
                self.landmarks = points;
                self.status = None;
            }
            Err(e) => {
                log::error!("Failed to read landmarks {:?}: {}", path, e);
                self.status = Some(format!("Could not read landmarks: {}", e));
            }
        }
    }

    fn load_texture(&mut self, ctx: &egui::Context) {
        if let Some(image) = &self.frame {
            let size = [image.width() as _, image.height() as _];
            let image_buffer = image.to_rgba8();
            let pixels = image_buffer.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            self.texture =
                Some(ctx.load_texture("frame", color_image, egui::TextureOptions::LINEAR));
        }
    }

    fn save_capture(&self) {
        let Some(frame) = &self.frame else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", &["jpg", "jpeg", "png"])
            .save_file()
        else {
            return;
        };
        let photo = capture::crop_to_ratio(frame, self.session.ratio(), self.mirror);
        if let Err(e) = capture::save(&photo, &path) {
            log::error!("Failed to save capture: {}", e);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            if ui.button("Open Frame").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
                    .pick_file()
                {
                    self.open_frame(ctx, &path);
                }
            }
            if ui.button("Open Landmarks").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Landmarks", &["json"])
                    .pick_file()
                {
                    self.open_landmarks(&path);
                }
            }

            ui.separator();
            ui.label("Guide:");
            let mut guide = self.session.guide_type();
            egui::ComboBox::from_id_salt("guide_type")
                .selected_text(guide.to_string())
                .show_ui(ui, |ui| {
                    for option in GuideType::ALL {
                        ui.selectable_value(&mut guide, option, option.to_string());
                    }
                });
            if guide != self.session.guide_type() {
                self.session.select_guide(guide);
            }

            ui.label("Ratio:");
            let mut ratio = self.session.ratio();
            egui::ComboBox::from_id_salt("aspect_ratio")
                .selected_text(ratio.to_string())
                .show_ui(ui, |ui| {
                    for option in AspectRatio::ALL {
                        ui.selectable_value(&mut ratio, option, option.to_string());
                    }
                });
            if ratio != self.session.ratio() {
                self.session.set_ratio(ratio);
            }

            ui.separator();
            if self.session.guide_type().is_visible() {
                let label = if self.session.edit_mode() { "Done" } else { "✏ Edit Guide" };
                if ui.button(label).clicked() {
                    self.session.toggle_edit_mode();
                }
                if self.session.edit_mode() && ui.button("Reset").clicked() {
                    self.session.reset_guide();
                }
            }

            ui.checkbox(&mut self.show_grid, "Grid");
            ui.checkbox(&mut self.show_skeleton, "Skeleton");
            ui.checkbox(&mut self.mirror, "Mirror");
            ui.checkbox(&mut self.show_level, "Level");
            if self.show_level {
                ui.add(egui::Slider::new(&mut self.roll, -60.0..=60.0).text("Roll°"));
            }

            if self.frame.is_some() && !self.session.edit_mode() && ui.button("Save Capture").clicked() {
                self.save_capture();
            }
        });

        if let Some(status) = &self.status {
            ui.colored_label(egui::Color32::LIGHT_RED, status);
        }
        ui.separator();
    }
}

fn frame_color(state: FrameState) -> egui::Color32 {
    match state {
        FrameState::None => egui::Color32::WHITE,
        FrameState::Perfect => egui::Color32::from_rgb(52, 211, 153),
        FrameState::Partial => egui::Color32::from_rgb(250, 204, 21),
        FrameState::Detected => egui::Color32::from_rgb(251, 146, 60),
    }
}

/// Texture coordinates for the preview; mirroring flips them so the preview
/// matches the saved capture.
fn preview_uv(mirror: bool) -> egui::Rect {
    if mirror {
        egui::Rect::from_min_max(egui::pos2(1.0, 0.0), egui::pos2(0.0, 1.0))
    } else {
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))
    }
}

fn to_screen(origin: egui::Pos2, p: guide_frame::Point) -> egui::Pos2 {
    origin + egui::vec2(p.x, p.y)
}

impl eframe::App for GuideFrameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle dropped files
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped_files {
            if let Some(path) = &file.path {
                self.open(ctx, path);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.controls(ui, ctx);

            let Some(texture) = self.texture.clone() else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open or drop a frame image to start framing");
                });
                return;
            };

            const PADDING: f32 = 20.0;
            let available_size = ui.available_size();
            let max_size = available_size - egui::vec2(PADDING * 2.0, PADDING * 2.0);
            let image_size = texture.size_vec2();

            // Calculate size to fit within available space while maintaining aspect ratio
            let scale = (max_size.x / image_size.x).min(max_size.y / image_size.y);
            let display_size = image_size * scale;

            let total_display_size = display_size + egui::vec2(PADDING * 2.0, PADDING * 2.0);

            // Manual centering
            let x_offset = (available_size.x - total_display_size.x) / 2.0;
            let y_offset = (available_size.y - total_display_size.y) / 2.0;
            let start_pos = ui.cursor().min + egui::vec2(x_offset.max(0.0), y_offset.max(0.0));

            let target_rect = egui::Rect::from_min_size(start_pos, total_display_size);

            let response = ui.allocate_rect(target_rect, egui::Sense::drag());
            let painter = ui.painter_at(target_rect);

            let image_rect = egui::Rect::from_min_size(
                target_rect.min + egui::vec2(PADDING, PADDING),
                display_size,
            );
            let origin = image_rect.min;
            let viewport = Size::new(display_size.x, display_size.y);
            let local = |pos: egui::Pos2| guide_frame::Point::new(pos.x - origin.x, pos.y - origin.y);

            painter.image(
                texture.id(),
                image_rect,
                preview_uv(self.mirror),
                egui::Color32::WHITE,
            );

            // Handle Input. Hit-test where the press began, not where the
            // drag threshold was crossed.
            if response.drag_started() {
                let press = ctx.input(|i| i.pointer.press_origin());
                if let Some(pos) = press.or_else(|| response.interact_pointer_pos()) {
                    let point = local(pos);
                    let target = self
                        .session
                        .guide_bounds(viewport)
                        .map_or(GestureTarget::Outside, |bounds| hit_test(point, &bounds));
                    self.session.gesture_start(point, target);
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.session.gesture_move(local(pos), viewport);
                }
            }
            if response.drag_stopped() {
                self.session.gesture_end();
            }

            // Ratio mask
            let overlay_color = egui::Color32::from_black_alpha(150);
            let margins = self.session.mask(viewport);
            let bands = [
                (image_rect.min, egui::pos2(image_rect.max.x, image_rect.min.y + margins.top)),
                (egui::pos2(image_rect.min.x, image_rect.max.y - margins.bottom), image_rect.max),
                (image_rect.min, egui::pos2(image_rect.min.x + margins.left, image_rect.max.y)),
                (egui::pos2(image_rect.max.x - margins.right, image_rect.min.y), image_rect.max),
            ];
            for (min, max) in bands {
                let band = egui::Rect::from_min_max(min, max);
                if band.width() > 0.0 && band.height() > 0.0 {
                    painter.rect_filled(band, 0.0, overlay_color);
                }
            }

            if self.show_grid {
                let stroke = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(90));
                for line in self.session.grid(viewport) {
                    painter.line_segment(
                        [to_screen(origin, line.from), to_screen(origin, line.to)],
                        stroke,
                    );
                }
            }

            let frame_landmarks = if self.mirror {
                landmarks::mirrored(&self.landmarks)
            } else {
                self.landmarks.clone()
            };

            if self.show_skeleton && self.session.guide_type().is_visible() {
                let stroke = egui::Stroke::new(2.0, egui::Color32::from_white_alpha(150));
                for bone in overlay::skeleton_segments(&frame_landmarks, viewport) {
                    painter.line_segment(
                        [to_screen(origin, bone.from), to_screen(origin, bone.to)],
                        stroke,
                    );
                }
                for joint in overlay::skeleton_keypoints(&frame_landmarks, viewport) {
                    painter.circle_filled(
                        to_screen(origin, joint),
                        4.0,
                        egui::Color32::from_white_alpha(230),
                    );
                }
            }

            let result = self.session.evaluate(&frame_landmarks, viewport);

            // Draw guide
            if let Some(bounds) = self.session.guide_bounds(viewport) {
                let guide_rect = egui::Rect::from_min_max(
                    to_screen(origin, guide_frame::Point::new(bounds.left, bounds.top)),
                    to_screen(origin, guide_frame::Point::new(bounds.right, bounds.bottom)),
                );
                let (top, bottom) = self.session.guide_type().corner_radii();
                let s = self.session.placement().scale;
                let rounding = egui::Rounding {
                    nw: top * s,
                    ne: top * s,
                    sw: bottom * s,
                    se: bottom * s,
                };
                let width = if self.session.edit_mode() { 3.0 } else { 2.0 };
                let color = frame_color(result.classification.frame_state());
                painter.rect_stroke(guide_rect, rounding, egui::Stroke::new(width, color));

                if self.session.edit_mode() {
                    let handle_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
                    painter.circle(guide_rect.max, 8.0, egui::Color32::WHITE, handle_stroke);
                }
            }

            if self.show_level {
                draw_level(&painter, image_rect, LevelReading::from_orientation(90.0, self.roll));
            }
            draw_feedback(&painter, image_rect, &result);
        });
    }
}

fn draw_level(painter: &egui::Painter, image_rect: egui::Rect, level: LevelReading) {
    let bar = egui::Rect::from_center_size(
        image_rect.center_top() + egui::vec2(0.0, 60.0),
        egui::vec2(160.0, 14.0),
    );
    painter.rect_filled(bar, 7.0, egui::Color32::from_black_alpha(120));
    let color = if level.is_level {
        frame_color(FrameState::Perfect)
    } else {
        egui::Color32::WHITE
    };
    let x = bar.min.x + bar.width() * level.bubble_position / 100.0;
    painter.circle_filled(egui::pos2(x, bar.center().y), 6.0, color);
}

fn draw_feedback(painter: &egui::Painter, image_rect: egui::Rect, result: &AlignmentResult) {
    let Some(text) = result.hint_text() else {
        return;
    };
    let color = if result.is_ready() {
        frame_color(FrameState::Perfect)
    } else {
        egui::Color32::WHITE
    };
    let anchor = image_rect.center_top() + egui::vec2(0.0, 16.0);
    painter.text(
        anchor,
        egui::Align2::CENTER_TOP,
        text,
        egui::FontId::proportional(20.0),
        color,
    );

    if result.is_ready() {
        painter.circle_filled(image_rect.center_bottom() - egui::vec2(0.0, 24.0), 10.0, color);
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Guide Frame",
        options,
        Box::new(|cc| Ok(Box::new(GuideFrameApp::new(cc)))),
    )
}
