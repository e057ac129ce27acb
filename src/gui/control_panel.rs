//! Control Panel Widget
//! Left side panel with the vehicle type and fuel filters.

use crate::data::{FilterOptions, FilterSelection, TypeSelection};
use egui::{Color32, ComboBox, RichText, ScrollArea};

/// Left side panel holding the filter selection.
pub struct ControlPanel {
    pub options: FilterOptions,
    pub selection: FilterSelection,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            options: FilterOptions::default(),
            selection: FilterSelection::default(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the offered values after a load and reset to "everything selected".
    pub fn update_options(&mut self, options: FilterOptions) {
        self.selection = FilterSelection::from_options(&options);
        self.options = options;
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚗 Used Vehicles")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("US market overview")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("🔍 Filters").size(14.0).strong());
        ui.add_space(8.0);

        // ===== Vehicle type =====
        ui.label("Vehicle type:");
        ComboBox::from_id_salt("vehicle_type")
            .width(200.0)
            .selected_text(self.selection.vehicle_type.to_string())
            .show_ui(ui, |ui| {
                let all_selected = self.selection.vehicle_type == TypeSelection::All;
                if ui.selectable_label(all_selected, "All").clicked() && !all_selected {
                    self.selection.vehicle_type = TypeSelection::All;
                    action = ControlPanelAction::SelectionChanged;
                }
                for vehicle_type in &self.options.types {
                    let candidate = TypeSelection::Only(vehicle_type.clone());
                    let selected = self.selection.vehicle_type == candidate;
                    if ui.selectable_label(selected, vehicle_type).clicked() && !selected {
                        self.selection.vehicle_type = candidate;
                        action = ControlPanelAction::SelectionChanged;
                    }
                }
            });

        ui.add_space(12.0);

        // ===== Fuel =====
        ui.label("Fuel type:");
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                    for fuel in &self.options.fuels {
                        let mut checked = self.selection.fuels.contains(fuel);
                        if ui.checkbox(&mut checked, fuel).changed() {
                            if checked {
                                self.selection.fuels.insert(fuel.clone());
                            } else {
                                self.selection.fuels.remove(fuel);
                            }
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selection.fuels = self.options.fuels.iter().cloned().collect();
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.selection.fuels.clear();
                action = ControlPanelAction::SelectionChanged;
            }
        });
        if self.selection.fuels.is_empty() {
            ui.label(
                RichText::new("No fuel selected: showing every fuel")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
}
