//! Dashboard Main Application
//! Main window with filter panel and chart viewer.

use crate::config::DashboardConfig;
use crate::data::{DataLoader, FilterOptions};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::pipeline::{ChartSettings, DashboardPipeline};
use egui::SidePanel;

/// Main application window.
pub struct DashboardApp {
    loader: DataLoader,
    settings: ChartSettings,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            settings: ChartSettings::from(&config),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        app.load(&config);
        app
    }

    /// Load the listings once and build the first view.
    fn load(&mut self, config: &DashboardConfig) {
        let options = match self.loader.load_csv(&config.data_path) {
            Ok(df) => FilterOptions::from_table(df),
            Err(e) => {
                log::error!("Failed to load listings: {e}");
                self.show_error(&e.to_string());
                return;
            }
        };

        match options {
            Ok(options) => {
                self.control_panel.update_options(options);
                self.rebuild_view();
            }
            Err(e) => self.show_error(&e.to_string()),
        }
    }

    /// Recompute every chart input for the current selection.
    fn rebuild_view(&mut self) {
        let Some(df) = self.loader.get_dataframe() else {
            self.show_error("No data loaded");
            return;
        };

        match DashboardPipeline::build_view(df, &self.control_panel.selection, &self.settings) {
            Ok(view) => {
                let status = format!(
                    "Showing {} of {} listings ({} columns)",
                    view.row_count(),
                    self.loader.get_row_count(),
                    self.loader.get_columns().len()
                );
                self.control_panel.set_status(&status);
                self.chart_viewer.set_view(view);
            }
            Err(e) => {
                log::error!("Failed to build dashboard: {e}");
                self.show_error(&e.to_string());
            }
        }
    }

    fn show_error(&mut self, error: &str) {
        let status = match self.loader.get_file_path() {
            Some(path) => format!("Error: {} ({})", error, path.display()),
            None => format!("Error: {}", error),
        };
        self.control_panel.set_status(&status);
        self.chart_viewer.set_error(error.to_string());
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Filters
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SelectionChanged => self.rebuild_view(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Charts
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
