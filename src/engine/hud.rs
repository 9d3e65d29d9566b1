use egui::epaint::Shadow;

use crate::game::Snapshot;

pub struct HudStats {
    pub fps: u32,
    pub frame_time_avg_ms: f32,
    pub instance_count: usize,
    pub resolution: (u32, u32),
    pub sim_time: f64,
}

/// Player-facing numbers pulled from the latest snapshot.
pub struct HudStatus {
    pub health: u32,
    pub max_health: u32,
    pub agents_remaining: usize,
    pub attacking: bool,
    pub game_over: bool,
}

impl HudStatus {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            health: snapshot.avatar.health,
            max_health: snapshot.avatar.max_health,
            agents_remaining: snapshot.agents_remaining(),
            attacking: snapshot.avatar.attacking,
            game_over: snapshot.game_over,
        }
    }

    /// Health as a fraction in [0, 1].
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

pub struct Hud {
    /// F3 stats panel.
    pub show_stats: bool,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Hud {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let egui_ctx = egui::Context::default();

        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = egui::Color32::from_rgba_premultiplied(0, 0, 0, 180);
        visuals.window_stroke = egui::Stroke::NONE;
        visuals.window_shadow = Shadow::NONE;
        visuals.override_text_color = Some(egui::Color32::WHITE);
        egui_ctx.set_visuals(visuals);

        let mut style = (*egui_ctx.style()).clone();
        style.override_font_id = Some(egui::FontId::monospace(14.0));
        egui_ctx.set_style(style);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            None,  // no depth
            1,     // msaa samples
            false, // no dithering
        );

        Self {
            show_stats: false,
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    pub fn toggle_stats(&mut self) {
        self.show_stats = !self.show_stats;
    }

    pub fn handle_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    /// Draw the health bar, agent counter, optional stats panel and, once
    /// the avatar has fallen, the game-over banner.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &winit::window::Window,
        view: &wgpu::TextureView,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        status: &HudStatus,
        stats: Option<&HudStats>,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Area::new(egui::Id::new("hud_status"))
                .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
                .show(ctx, |ui| {
                    egui::Frame::none()
                        .fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 160))
                        .inner_margin(egui::Margin::same(8.0))
                        .rounding(4.0)
                        .show(ui, |ui: &mut egui::Ui| {
                            let frac = status.health_fraction();
                            let fill = if frac > 0.3 {
                                egui::Color32::from_rgb(60, 200, 80)
                            } else {
                                egui::Color32::from_rgb(220, 60, 40)
                            };
                            ui.add(
                                egui::ProgressBar::new(frac)
                                    .desired_width(220.0)
                                    .fill(fill)
                                    .text(format!("HP {} / {}", status.health, status.max_health)),
                            );
                            ui.label(format!("Enemies: {}", status.agents_remaining));
                            if status.attacking {
                                ui.label("Attacking!");
                            }
                        });
                });

            if let Some(stats) = stats {
                egui::Area::new(egui::Id::new("hud_stats"))
                    .fixed_pos(egui::pos2(10.0, 10.0))
                    .show(ctx, |ui| {
                        egui::Frame::none()
                            .fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 180))
                            .inner_margin(egui::Margin::same(8.0))
                            .rounding(4.0)
                            .show(ui, |ui: &mut egui::Ui| {
                                ui.label(format!("FPS: {}", stats.fps));
                                ui.label(format!("Frame: {:.2} ms", stats.frame_time_avg_ms));
                                ui.label(format!("Instances: {}", stats.instance_count));
                                ui.label(format!(
                                    "Resolution: {} x {}",
                                    stats.resolution.0, stats.resolution.1
                                ));
                                ui.label(format!("Sim time: {:.1} s", stats.sim_time));
                            });
                    });
            }

            if status.game_over {
                egui::Area::new(egui::Id::new("hud_game_over"))
                    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        egui::Frame::none()
                            .fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 200))
                            .inner_margin(egui::Margin::same(24.0))
                            .rounding(6.0)
                            .show(ui, |ui: &mut egui::Ui| {
                                ui.label(
                                    egui::RichText::new("GAME OVER")
                                        .size(40.0)
                                        .color(egui::Color32::from_rgb(230, 50, 40)),
                                );
                                ui.label("Press Esc to quit");
                            });
                    });
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, World};

    #[test]
    fn status_reflects_snapshot() {
        let mut world = World::empty(GameConfig::default()).unwrap();
        world.spawn_agent(0.0, 30.0).unwrap();
        let status = HudStatus::from_snapshot(&world.snapshot());
        assert_eq!(status.health, 100);
        assert_eq!(status.agents_remaining, 1);
        assert_eq!(status.health_fraction(), 1.0);
        assert!(!status.game_over);
    }
}
