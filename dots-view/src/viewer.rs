//! Interactive particle-field viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (particle field, pointer tracker, configuration, RNG) and implements
//! [`eframe::App`] to drive one [`sim::tick`] per repaint. The
//! unconditional `ctx.request_repaint()` at the end of every frame is
//! the "run again before the next frame" scheduling primitive: the
//! loop reschedules even when a tick is skipped for missing geometry.

use dots_core::{
    config::FieldConfig,
    particle::ParticleField,
    pointer::PointerState,
    sim::{self, Motion},
    types::RegionRect,
};
use eframe::App;
use glam::Vec2;

/// How long the central panel must have been measurable before the
/// field is populated, letting layout settle before the first pass.
const MOUNT_SETTLE_SECS: f64 = 0.1;

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`ParticleField`], [`PointerState`],
///   [`FieldConfig`].
/// - The mount lifecycle: deferred first population, idempotent
///   re-mount, resize recalibration.
/// - eframe/egui callbacks for input and drawing.
///
/// The per-frame update is:
/// 1. Measure the central panel and sync the region rectangle
///    (recalibrating on resize).
/// 2. Populate the field once the region has settled.
/// 3. Feed the latest pointer sample to the tracker.
/// 4. Run one [`sim::tick`] and paint every particle at its rendered
///    pixel offset.
pub struct Viewer {
    field: ParticleField,
    pointer: PointerState,
    cfg: FieldConfig,

    rng: rand::rngs::ThreadRng,

    /// Last measured central-panel rectangle, if any.
    region: Option<RegionRect>,
    /// egui time at which the region first became measurable; cleared
    /// whenever the field is reset or the region goes away.
    region_seen_at: Option<f64>,

    paused: bool,
    show_radii: bool,
    /// Whether the last frame's tick did particle work (for the status bar).
    last_tick_ran: bool,
}

impl Viewer {
    /// Creates a viewer with an empty field and default configuration.
    ///
    /// The field is intentionally not populated here: population waits
    /// until the central panel has been measurable for
    /// [`MOUNT_SETTLE_SECS`], mirroring a page that defers its first
    /// measurement until layout settles.
    pub fn new() -> Self {
        Self {
            field: ParticleField::new(),
            pointer: PointerState::new(),
            cfg: FieldConfig::default(),
            rng: rand::rng(),
            region: None,
            region_seen_at: None,
            paused: false,
            show_radii: false,
            last_tick_ran: false,
        }
    }

    /// Converts an egui rectangle into the core's region type.
    fn region_from_rect(rect: egui::Rect) -> RegionRect {
        RegionRect::new(
            Vec2::new(rect.min.x, rect.min.y),
            Vec2::new(rect.width(), rect.height()),
        )
    }

    /// Records the freshly measured region, recalibrating the field
    /// when the extents changed.
    ///
    /// The rewrite to percentage coordinates happens entirely within
    /// this call, so the tick never observes a half-resized field.
    fn sync_region(&mut self, new_region: RegionRect) {
        if let Some(old) = self.region
            && old.size != new_region.size
            && !self.field.is_empty()
        {
            log::debug!(
                "region resized {}x{} -> {}x{}",
                old.size.x,
                old.size.y,
                new_region.size.x,
                new_region.size.y
            );
            self.field.recalibrate(&new_region);
        }
        self.region = Some(new_region);
    }

    /// Populates the field once the region has been measurable for the
    /// settle delay.
    ///
    /// No-op while the field already holds particles (repeated mount
    /// signals cannot duplicate the population) or while no usable
    /// region exists.
    fn try_populate(&mut self, now: f64, viewport: Vec2) {
        if !self.field.is_empty() {
            return;
        }
        let Some(region) = self.region.filter(|r| r.is_usable()) else {
            self.region_seen_at = None;
            return;
        };

        let seen_at = *self.region_seen_at.get_or_insert(now);
        if now - seen_at < MOUNT_SETTLE_SECS {
            return;
        }

        self.field.populate(viewport, &self.cfg, &mut self.rng);
        self.field.layout(&region);
    }

    /// Clears the field so the next settled frame re-populates it.
    fn reset_field(&mut self) {
        self.field = ParticleField::new();
        self.region_seen_at = None;
        self.last_tick_ran = false;
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (pause, repopulate, overlay toggle).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.paused { "▶ Resume" } else { "⏸ Pause" })
                    .clicked()
                {
                    self.paused = !self.paused;
                }

                if ui.button("Repopulate").clicked() {
                    self.reset_field();
                }

                ui.separator();
                ui.checkbox(&mut self.show_radii, "Show attraction radii");
            });
        });
    }

    /// Builds the bottom status bar (counts, pointer state, region size).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(if self.last_tick_ran {
                    "tick: running"
                } else {
                    "tick: skipped"
                });
                ui.separator();
                ui.label(format!("particles = {}", self.field.len()));
                ui.label(if self.pointer.inside_region {
                    "pointer: inside"
                } else {
                    "pointer: outside"
                });
                if let Some(region) = self.region {
                    ui.label(format!(
                        "region = {:.0}x{:.0}",
                        region.size.x, region.size.y
                    ));
                }
            });
        });
    }

    /// Builds the right-hand configuration panel.
    ///
    /// Motion parameters apply immediately; sizing parameters
    /// (`density_divisor`, `max_particles`) and the per-particle bands
    /// take effect on the next repopulate.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Population");
                Self::labeled_drag_f32(
                    ui,
                    "density_divisor:",
                    &mut self.cfg.density_divisor,
                    1_000.0..=100_000.0,
                    100.0,
                );
                Self::labeled_drag_usize(
                    ui,
                    "max_particles:",
                    &mut self.cfg.max_particles,
                    1..=500,
                    1.0,
                );

                ui.separator();
                ui.label("Follow speed band");
                Self::labeled_drag_f32(
                    ui,
                    "min:",
                    &mut self.cfg.follow_speed_min,
                    0.0..=0.2,
                    0.001,
                );
                Self::labeled_drag_f32(
                    ui,
                    "max:",
                    &mut self.cfg.follow_speed_max,
                    0.0..=0.2,
                    0.001,
                );

                ui.separator();
                ui.label("Idle speed band");
                Self::labeled_drag_f32(
                    ui,
                    "min:",
                    &mut self.cfg.idle_speed_min,
                    0.0..=0.05,
                    0.0005,
                );
                Self::labeled_drag_f32(
                    ui,
                    "max:",
                    &mut self.cfg.idle_speed_max,
                    0.0..=0.05,
                    0.0005,
                );

                ui.separator();
                ui.label("Attraction radius band");
                Self::labeled_drag_f32(
                    ui,
                    "min:",
                    &mut self.cfg.attraction_radius_min,
                    0.0..=100.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "max:",
                    &mut self.cfg.attraction_radius_max,
                    0.0..=100.0,
                    0.5,
                );

                ui.separator();
                ui.label("Motion");
                Self::labeled_drag_f32(
                    ui,
                    "standoff_distance:",
                    &mut self.cfg.standoff_distance,
                    0.0..=20.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "easing_range:",
                    &mut self.cfg.easing_range,
                    0.1..=100.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "wander_range:",
                    &mut self.cfg.wander_range,
                    0.0..=50.0,
                    0.5,
                );
                ui.horizontal(|ui| {
                    ui.label("retarget_probability:");
                    ui.add(
                        egui::DragValue::new(&mut self.cfg.retarget_probability)
                            .range(0.0..=1.0)
                            .speed(0.001),
                    );
                });

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = FieldConfig::default();
                }
            });
    }

    /// Builds the central panel: measures the region, advances the
    /// simulation, and paints every particle.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Region geometry is re-measured every frame; panel layout
            // may have changed since the last one.
            self.sync_region(Self::region_from_rect(rect));

            let now = ctx.input(|i| i.time);
            let viewport = ctx.screen_rect().size();
            self.try_populate(now, Vec2::new(viewport.x, viewport.y));

            // Pointer feed: every sample goes through the bounding-box
            // test; losing the pointer entirely is a leave transition.
            match ctx.input(|i| i.pointer.latest_pos()) {
                Some(pos) => self
                    .pointer
                    .on_pointer_move(Vec2::new(pos.x, pos.y), self.region.as_ref()),
                None => self.pointer.on_region_leave(),
            }

            if !self.paused {
                self.last_tick_ran = sim::tick(
                    &mut self.field,
                    &self.pointer,
                    self.region.as_ref(),
                    &self.cfg,
                    &mut self.rng,
                );
            }

            if let Some(region) = self.region.filter(|r| r.is_usable()) {
                let pointer_pct = self
                    .pointer
                    .inside_region
                    .then(|| self.pointer.region_percent(&region));

                for p in &self.field.particles {
                    let center = egui::pos2(
                        region.min.x + p.rendered.x,
                        region.min.y + p.rendered.y,
                    );

                    let attracted =
                        matches!(sim::classify(p, pointer_pct), Motion::Attracted { .. });
                    let color = if attracted {
                        egui::Color32::YELLOW
                    } else {
                        egui::Color32::LIGHT_BLUE
                    };
                    painter.circle_filled(center, 2.0, color);

                    if self.show_radii && attracted {
                        // Percentage units are anisotropic in pixels;
                        // the overlay uses the x scale.
                        let radius_px = p.attraction_radius / 100.0 * region.size.x;
                        painter.circle_stroke(
                            center,
                            radius_px,
                            egui::Stroke::new(0.5, egui::Color32::from_gray(80)),
                        );
                    }
                }
            }

            // Reschedule unconditionally; skipped ticks retry next frame.
            ctx.request_repaint();
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
