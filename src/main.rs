use anyhow::{Context as _, Result};
use clap::Parser;
use eframe::egui;
use env_logger::Target;
use log::{LevelFilter, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use memoria::cli::Args;
use memoria::config::{self, AppConfig, PathConfig};
use memoria::core::carousel::CarouselState;
use memoria::core::dates::{DateTick, generate_date_range};
use memoria::core::jobs::{JobUpdate, Jobs};
use memoria::core::textures::TextureCache;
use memoria::core::timeline::{Direction, TimelineModel};
use memoria::editor::{Editor, EditorAction, SubmitRequest, perform_submit};
use memoria::remote::{ImageUploader, RecordStore};
use memoria::ui::{TimelineAction, render_timeline};
use memoria::widgets::status::StatusBar;

struct MemoriaApp {
    ticks: Vec<DateTick>,
    timeline: TimelineModel,
    carousel: CarouselState,
    /// Id of the record the carousel is currently paging through; a change
    /// of active record resets the pager.
    carousel_record: Option<String>,
    /// `Some` while the create/edit view is showing.
    editor: Option<Editor>,
    textures: TextureCache,
    jobs: Jobs,
    store: Arc<RecordStore>,
    uploader: Arc<ImageUploader>,
    http: Arc<reqwest::blocking::Client>,
    status_bar: StatusBar,
    loading: bool,
    error_msg: Option<String>,
}

impl MemoriaApp {
    fn new(config: AppConfig) -> Self {
        let ticks = generate_date_range(config.timeline.start, config.timeline.end);
        let mut app = Self {
            ticks,
            timeline: TimelineModel::new(),
            carousel: CarouselState::new(0),
            carousel_record: None,
            editor: None,
            textures: TextureCache::new(),
            jobs: Jobs::new(),
            store: Arc::new(RecordStore::new(&config.service)),
            uploader: Arc::new(ImageUploader::new(&config.upload)),
            http: Arc::new(reqwest::blocking::Client::new()),
            status_bar: StatusBar,
            loading: false,
            error_msg: None,
        };
        app.refresh_records();
        app
    }

    /// Kick off a full re-fetch of the record list.
    fn refresh_records(&mut self) {
        self.loading = true;
        let store = Arc::clone(&self.store);
        self.jobs.run("list", move || {
            JobUpdate::RecordsLoaded(store.list_all().map_err(|e| e.to_string()))
        });
    }

    /// Run a validated submission (uploads, then persist) in the background.
    fn submit(&mut self, request: SubmitRequest) {
        let store = Arc::clone(&self.store);
        let uploader = Arc::clone(&self.uploader);
        self.jobs.run("save", move || {
            JobUpdate::RecordSaved(perform_submit(&store, &uploader, request))
        });
    }

    fn handle_job_updates(&mut self, ctx: &egui::Context) {
        for update in self.jobs.drain() {
            match update {
                JobUpdate::RecordsLoaded(Ok(records)) => {
                    info!("Loaded {} record(s)", records.len());
                    self.loading = false;
                    self.error_msg = None;
                    self.timeline.set_records(records);
                }
                JobUpdate::RecordsLoaded(Err(message)) => {
                    error!("Record fetch failed: {message}");
                    self.loading = false;
                    self.error_msg = Some(message);
                }
                JobUpdate::RecordSaved(Ok(())) => {
                    self.editor = None;
                    self.refresh_records();
                }
                JobUpdate::RecordSaved(Err(message)) => {
                    warn!("Save failed: {message}");
                    match &mut self.editor {
                        Some(editor) => editor.submit_failed(message),
                        None => self.error_msg = Some(message),
                    }
                }
                JobUpdate::ImageFetched { url, result } => {
                    self.textures.insert(ctx, url, result);
                }
            }
        }
    }

    /// Reset the image pager whenever the active record changes.
    fn sync_carousel(&mut self) {
        match self.timeline.active().map(|r| (r.id.clone(), r.images.len())) {
            Some((id, count)) => {
                if self.carousel_record.as_deref() != Some(id.as_str()) {
                    self.carousel.reset(count);
                    self.carousel_record = Some(id);
                }
            }
            None => {
                self.carousel.reset(0);
                self.carousel_record = None;
            }
        }
    }
}

impl eframe::App for MemoriaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_job_updates(ctx);
        self.sync_carousel();

        // Dropped files feed the editor's photo list.
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty()
            && let Some(editor) = &mut self.editor
        {
            editor.add_files(&dropped);
        }

        // Arrow keys step through memories while the timeline is showing.
        if self.editor.is_none() && !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                self.timeline.advance(Direction::Next);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                self.timeline.advance(Direction::Prev);
            }
        }

        self.status_bar
            .render(ctx, &self.timeline, self.loading, self.error_msg.as_deref());

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.editor.is_some() {
                let action = match &mut self.editor {
                    Some(editor) => editor.render(ui, &mut self.textures, &self.jobs, &self.http),
                    None => EditorAction::None,
                };
                match action {
                    EditorAction::Close => self.editor = None,
                    EditorAction::Submit(request) => self.submit(request),
                    EditorAction::None => {}
                }
            } else {
                let action = render_timeline(
                    ui,
                    &self.timeline,
                    &mut self.carousel,
                    &self.ticks,
                    &mut self.textures,
                    &self.jobs,
                    &self.http,
                    self.loading,
                );
                match action {
                    TimelineAction::Advance(direction) => self.timeline.advance(direction),
                    TimelineAction::JumpTo(id) => self.timeline.jump_to(&id),
                    TimelineAction::Edit(id) => {
                        if let Some(record) = self.timeline.get(&id) {
                            self.editor = Some(Editor::edit(record));
                        }
                    }
                    TimelineAction::Create => self.editor = Some(Editor::create()),
                    TimelineAction::None => {}
                }
            }
        });

        // Keep polling while background work is in flight.
        let busy = self.loading
            || self.textures.pending()
            || self.editor.as_ref().is_some_and(|e| e.is_busy());
        if busy {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let paths = PathConfig::from_env_and_cli(args.config_dir.clone());
    config::ensure_dirs(&paths)?;

    let level = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    match &args.log_file {
        Some(path) => {
            let path = path
                .clone()
                .unwrap_or_else(|| PathBuf::from("memoria.log"));
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            env_logger::Builder::new()
                .target(Target::Pipe(Box::new(file)))
                .filter_level(level)
                .init();
        }
        None => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(level.to_string()),
            )
            .init();
        }
    }

    let mut app_config = AppConfig::load(&paths)?;
    app_config.apply_cli(&args);
    if app_config.timeline.start > app_config.timeline.end {
        warn!(
            "Timeline start {} is after end {}; the strip will be empty",
            app_config.timeline.start, app_config.timeline.end
        );
    }
    info!("Memoria v{} starting", env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Memoria v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        persist_window: true,
        persistence_path: Some(config::config_file("memoria_ui.json", &paths)),
        ..Default::default()
    };

    eframe::run_native(
        "Memoria",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(MemoriaApp::new(app_config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to launch UI: {e}"))?;

    Ok(())
}
