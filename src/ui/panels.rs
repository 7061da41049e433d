use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui};

use crate::color::HEADING;
use crate::config::SliderConfig;
use crate::dashboard::graph::{ControlId, OutputId};
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::state::{AppState, ControlEvent};

// ---------------------------------------------------------------------------
// Page heading and section labels
// ---------------------------------------------------------------------------

pub fn page_heading(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .strong()
                .size(36.0)
                .color(HEADING.to_color32()),
        );
    });
    ui.add_space(16.0);
}

pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).strong());
}

// ---------------------------------------------------------------------------
// site-dropdown
// ---------------------------------------------------------------------------

/// Site selector offering "All Sites" plus every site in the dataset.
pub fn site_dropdown(ui: &mut Ui, state: &AppState, events: &mut Vec<ControlEvent>) {
    let current = &state.controls.site;
    let options = std::iter::once(SiteSelection::All).chain(
        state
            .context
            .dataset()
            .sites()
            .iter()
            .cloned()
            .map(SiteSelection::Site),
    );

    egui::ComboBox::from_id_salt(ControlId::SiteDropdown.as_str())
        .selected_text(current.label())
        .width(ui.available_width().min(480.0))
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let selected = *current == option;
                if ui.selectable_label(selected, option.label()).clicked() && !selected {
                    events.push(ControlEvent::SiteSelected(option));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// payload-slider
// ---------------------------------------------------------------------------

/// Two-handle payload range control rendered as a low and a high slider
/// sharing one scale, with labelled marks underneath.
pub fn payload_slider(
    ui: &mut Ui,
    state: &AppState,
    slider: &SliderConfig,
    events: &mut Vec<ControlEvent>,
) {
    let range = state.controls.payload;
    let mut low = range.low();
    let mut high = range.high();

    ui.spacing_mut().slider_width = (ui.available_width() - 140.0).max(200.0);

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, slider.min..=slider.max)
                .step_by(slider.step)
                // Values are only snapped when the user drags or types, so
                // the startup range keeps the dataset's exact bounds.
                .clamping(egui::SliderClamping::Edits)
                .text("min kg"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, slider.min..=slider.max)
                .step_by(slider.step)
                .clamping(egui::SliderClamping::Edits)
                .text("max kg"),
        )
        .changed();

    slider_marks(ui, slider);

    // The handle being dragged pushes the other one along.
    if low_changed {
        high = high.max(low);
    } else if high_changed {
        low = low.min(high);
    }
    if (low_changed || high_changed) && (low != range.low() || high != range.high()) {
        events.push(ControlEvent::PayloadRangeChanged(PayloadRange::new(low, high)));
    }
}

fn slider_marks(ui: &mut Ui, slider: &SliderConfig) {
    let width = ui.spacing().slider_width;
    let span = slider.max - slider.min;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 16.0), Sense::hover());
    if span <= 0.0 {
        return;
    }
    let painter = ui.painter_at(rect.expand2(egui::vec2(24.0, 0.0)));
    for mark in slider.marks() {
        let t = ((mark - slider.min) / span) as f32;
        painter.text(
            egui::pos2(rect.left() + t * width, rect.center().y),
            Align2::CENTER_CENTER,
            format!("{mark}"),
            FontId::proportional(12.0),
            Color32::BLACK,
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Export", |ui: &mut Ui| {
            for id in OutputId::ALL {
                if ui.button(format!("Copy {id} JSON")).clicked() {
                    copy_chart_json(ui, state, id);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} plotted",
            state.context.dataset().len(),
            state.visible_points()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::DARK_GRAY));
        }
    });
}

fn copy_chart_json(ui: &Ui, state: &mut AppState, id: OutputId) {
    let Some(spec) = state.output(id) else {
        state.status_message = Some(format!("{id} has not been rendered yet"));
        return;
    };
    match spec.to_json() {
        Ok(json) => {
            ui.ctx().copy_text(json);
            state.status_message = Some(format!("Copied {id} to clipboard"));
        }
        Err(e) => {
            log::error!("Failed to serialise {id}: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashContext;
    use crate::data::model::tests::fixture;

    /// Lay out the payload slider for `frames` frames without any input.
    fn idle_frames(state: &AppState, frames: usize) -> Vec<ControlEvent> {
        let ctx = egui::Context::default();
        let slider = SliderConfig::default();
        let mut events = Vec::new();
        for _ in 0..frames {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    payload_slider(ui, state, &slider, &mut events);
                });
            });
        }
        events
    }

    #[test]
    fn idle_slider_keeps_startup_range() {
        // Fixture bounds are 0 and 9600; 9600 is not on the 1000 kg step.
        let mut state = AppState::new(DashContext::new(fixture()));
        let before = state.visible_points();

        let events = idle_frames(&state, 3);
        assert!(events.is_empty(), "unexpected events: {events:?}");

        state.apply_all(events);
        assert_eq!(state.visible_points(), before);
        assert_eq!(state.controls.payload.high(), 9600.0);
    }

    #[test]
    fn idle_site_dropdown_emits_nothing() {
        let state = AppState::new(DashContext::new(fixture()));
        let ctx = egui::Context::default();
        let mut events = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                site_dropdown(ui, &state, &mut events);
            });
        });
        assert!(events.is_empty());
    }
}
