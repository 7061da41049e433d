use eframe::egui;

use crate::color::BACKGROUND;
use crate::config::SliderConfig;
use crate::dashboard::graph::OutputId;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    slider: SliderConfig,
}

impl LaunchDashApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState, slider: SliderConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self { state, slider }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // Control changes made while laying out this frame.
        let mut events = Vec::new();

        // ---- Central panel: controls and charts ----
        let frame = egui::Frame::central_panel(&ctx.style()).fill(BACKGROUND.to_color32());
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::page_heading(ui);

                    panels::section_label(ui, "Select Launch Site(s):");
                    panels::site_dropdown(ui, &self.state, &mut events);
                    ui.add_space(12.0);

                    plot::chart_output(
                        ui,
                        OutputId::SuccessPieChart,
                        self.state.output(OutputId::SuccessPieChart),
                    );
                    ui.add_space(12.0);

                    panels::section_label(ui, "Payload range (Kg):");
                    panels::payload_slider(ui, &self.state, &self.slider, &mut events);
                    ui.add_space(12.0);

                    plot::chart_output(
                        ui,
                        OutputId::SuccessPayloadScatterChart,
                        self.state.output(OutputId::SuccessPayloadScatterChart),
                    );
                });
        });

        if !events.is_empty() {
            self.state.apply_all(events);
            ctx.request_repaint();
        }
    }
}
