// filepath: src/main.rs

mod app;
mod canvas;
mod config;
mod config_watch;
mod pointer;
mod render;
mod stroke;
mod touch;
mod wayland;

use app::AppData;
use config::InkConfig;
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::wlr_layer::{Layer, LayerShell},
    shm::{slot::SlotPool, Shm},
};
use wayland_client::{globals::registry_queue_init, Connection};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting inkpad");

    let config = InkConfig::load_from_file().unwrap_or_else(|e| {
        warn!("Failed to load configuration ({e}); using defaults");
        InkConfig::default()
    });
    info!("Configuration loaded");

    let conn = Connection::connect_to_env()?;
    let (globals, mut event_queue) = registry_queue_init(&conn)?;
    let qh = event_queue.handle();

    let compositor = CompositorState::bind(&globals, &qh)?;
    let layer_shell = LayerShell::bind(&globals, &qh)?;
    let shm = Shm::bind(&globals, &qh)?;
    let seat_state = SeatState::new(&globals, &qh);

    // The pool grows on demand once the compositor assigns the real size.
    let (width, height) = config.surface_size();
    let pool_size = (width.max(1) * height.max(1) * 4) as usize;
    let pool = SlotPool::new(pool_size.max(4096), &shm)?;

    let surface = compositor.create_surface(&qh);
    let layer_surface =
        layer_shell.create_layer_surface(&qh, surface, Layer::Top, Some("inkpad"), None);

    let mut app_data = AppData::new(
        RegistryState::new(&globals),
        OutputState::new(&globals, &qh),
        seat_state,
        compositor,
        shm,
        layer_surface,
        pool,
        config,
    );

    info!("Performing initial round-trip");
    event_queue.roundtrip(&mut app_data)?;
    if !app_data.is_configured() {
        info!("Waiting for the compositor's first configure");
    }

    let mut event_loop: calloop::EventLoop<AppData> = calloop::EventLoop::try_new()?;
    calloop_wayland_source::WaylandSource::new(conn.clone(), event_queue)
        .insert(event_loop.handle())
        .map_err(|e| format!("failed to insert wayland source: {e}"))?;

    // Config edits act as the runtime toolbar: pen color and width apply
    // to the next stroke segment.
    let (tx, rx) = calloop::channel::channel();
    let _watcher = match config_watch::setup_config_watcher(tx) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Config watcher unavailable ({e}); edit-to-reload disabled");
            None
        }
    };
    event_loop
        .handle()
        .insert_source(rx, |event, _, app: &mut AppData| {
            if let calloop::channel::Event::Msg(fs_event) = event {
                if !fs_event
                    .paths
                    .iter()
                    .any(|p| p.ends_with("config.toml"))
                {
                    return;
                }
                debug!("Config file changed: {:?}", fs_event.kind);
                match InkConfig::load_from_file() {
                    Ok(config) => app.apply_config(config),
                    Err(e) => warn!("Ignoring unreadable configuration: {e}"),
                }
            }
        })
        .map_err(|e| format!("failed to insert config channel: {e}"))?;

    info!("Entering event loop");
    let signal = event_loop.get_signal();
    event_loop.run(None, &mut app_data, move |app| {
        if app.exit {
            info!("Layer surface gone, exiting");
            signal.stop();
        }
    })?;

    Ok(())
}
