//! Dashboard Main Application
//! Main window with control panel, chart cards and the debug section.

use crate::analysis::{DebugInfo, Pipeline};
use crate::config::{DashboardConfig, WordCloudConfig};
use crate::data::DataLoader;
use crate::export::export_snapshot;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, DebugPanel};
use crate::refresh::{run_refresh, DashboardSnapshot, RefreshOutcome, RefreshSchedule};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Refresh result from background thread
enum RefreshMessage {
    Progress(String),
    Complete(Box<DashboardSnapshot>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    loader: Arc<Mutex<DataLoader>>,
    pipeline: Arc<Pipeline>,
    schedule: RefreshSchedule,

    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    debug: Option<DebugInfo>,
    snapshot: Option<Box<DashboardSnapshot>>,

    // Async refresh
    refresh_rx: Option<Receiver<RefreshMessage>>,
    is_refreshing: bool,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        loader: DataLoader,
        pipeline: Pipeline,
    ) -> Self {
        let mut control_panel = ControlPanel::new(loader.describe_source());
        control_panel.model_name = Some(pipeline.model_name().to_string());

        Self {
            schedule: RefreshSchedule::new(config.schedule.refresh_interval()),
            config,
            loader: Arc::new(Mutex::new(loader)),
            pipeline: Arc::new(pipeline),
            control_panel,
            chart_viewer: ChartViewer::new(),
            debug: None,
            snapshot: None,
            refresh_rx: None,
            is_refreshing: false,
        }
    }

    /// Start a refresh in a background thread. At most one runs at a time.
    fn start_refresh(&mut self, now: Instant) {
        if self.is_refreshing {
            return;
        }

        let (tx, rx) = channel();
        self.refresh_rx = Some(rx);
        self.is_refreshing = true;
        self.schedule.mark_run(now);
        self.control_panel.is_busy = true;
        self.control_panel.set_status("Carregando dados...");

        let loader = Arc::clone(&self.loader);
        let pipeline = Arc::clone(&self.pipeline);
        let word_cloud = self.config.word_cloud.clone();

        thread::spawn(move || {
            Self::run_refresh_worker(tx, &loader, &pipeline, &word_cloud, now);
        });
    }

    /// Refresh button: bypass the cache and run now
    fn handle_manual_refresh(&mut self) {
        if self.is_refreshing {
            return;
        }
        self.loader
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .invalidate();
        self.start_refresh(Instant::now());
    }

    /// Run one refresh (called from background thread)
    fn run_refresh_worker(
        tx: Sender<RefreshMessage>,
        loader: &Mutex<DataLoader>,
        pipeline: &Pipeline,
        word_cloud: &WordCloudConfig,
        now: Instant,
    ) {
        let _ = tx.send(RefreshMessage::Progress("Processando respostas...".to_string()));

        let message = match run_refresh(loader, pipeline, word_cloud, now) {
            RefreshOutcome::Ready(snapshot) => RefreshMessage::Complete(snapshot),
            RefreshOutcome::FetchFailed(error) => RefreshMessage::Error(error),
        };
        let _ = tx.send(message);
    }

    /// Check for refresh results
    fn check_refresh_results(&mut self, ctx: &egui::Context) {
        // Take the receiver temporarily to avoid borrow issues
        let rx = self.refresh_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Some(message) = next_message(&rx) {
                match message {
                    RefreshMessage::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    RefreshMessage::Complete(snapshot) => {
                        self.apply_snapshot(ctx, snapshot);
                        should_keep_receiver = false;
                    }
                    RefreshMessage::Error(error) => {
                        self.chart_viewer.clear();
                        self.debug = None;
                        self.snapshot = None;
                        self.control_panel.set_error(&error);
                        self.control_panel.set_status("Falha na atualização");
                        self.control_panel.export_enabled = false;
                        should_keep_receiver = false;
                    }
                }
                if !should_keep_receiver {
                    break;
                }
            }

            if should_keep_receiver {
                self.refresh_rx = Some(rx);
            } else {
                self.is_refreshing = false;
                self.control_panel.is_busy = false;
            }
        }
    }

    fn apply_snapshot(&mut self, ctx: &egui::Context, snapshot: Box<DashboardSnapshot>) {
        self.chart_viewer.set_snapshot(ctx, &snapshot);
        self.control_panel.clear_error();
        self.control_panel.model_name = Some(snapshot.model_name.clone());
        self.control_panel.last_refresh = Some(wall_clock());
        self.control_panel.export_enabled = true;
        self.control_panel.set_status(&format!(
            "{} tokens, {} palavras distintas ({:.1}s)",
            snapshot.report.frequencies.total(),
            snapshot.report.frequencies.len(),
            snapshot.generated_at.elapsed().as_secs_f32()
        ));
        self.debug = Some(snapshot.report.debug.clone());
        self.snapshot = Some(snapshot);
    }

    /// Export the current snapshot into a user-chosen folder
    fn handle_export(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            self.control_panel.set_status("Nada para exportar");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match export_snapshot(snapshot, &self.config.chart, &dir) {
            Ok(files) => self
                .control_panel
                .set_status(&format!("{} arquivos exportados", files.len())),
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.control_panel
                    .set_status(&format!("Erro na exportação: {}", e));
            }
        }
    }
}

/// Next pending message. A worker that hung up without a result is
/// reported as an error.
fn next_message(rx: &Receiver<RefreshMessage>) -> Option<RefreshMessage> {
    match rx.try_recv() {
        Ok(message) => Some(message),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => {
            log::error!("Refresh worker stopped without a result");
            Some(RefreshMessage::Error(
                "processamento interrompido".to_string(),
            ))
        }
    }
}

/// UTC time of day, for the "last refresh" line.
fn wall_clock() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!(
        "{:02}:{:02}:{:02} UTC",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Check for background results
        self.check_refresh_results(ctx);

        if self.schedule.is_due(now) {
            self.start_refresh(now);
        }

        // Poll while refreshing, otherwise wake up for the next scheduled run
        if self.is_refreshing {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.schedule.time_until_due(now));
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::Refresh => self.handle_manual_refresh(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Bottom panel - Debug info
        if let Some(debug) = &self.debug {
            egui::TopBottomPanel::bottom("debug_panel")
                .resizable(true)
                .show(ctx, |ui| {
                    DebugPanel::show(ui, debug);
                });
        }

        // Central panel - Chart cards
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_messages_are_drained_in_order() {
        let (tx, rx) = channel();
        tx.send(RefreshMessage::Progress("a".to_string())).unwrap();

        assert!(matches!(next_message(&rx), Some(RefreshMessage::Progress(s)) if s == "a"));
        assert!(next_message(&rx).is_none());
        drop(tx);
    }

    #[test]
    fn panicked_worker_is_reported_as_error() {
        let (tx, rx) = channel::<RefreshMessage>();
        let worker = thread::spawn(move || {
            let _tx = tx;
            panic!("worker failed");
        });
        assert!(worker.join().is_err());

        assert!(matches!(next_message(&rx), Some(RefreshMessage::Error(_))));
    }
}
