// filepath: src/app.rs
//! Main application logic for inkpad

use crate::canvas::Pixmap;
use crate::config::InkConfig;
use crate::render::{DrawingSurface, PenStyle};
use crate::stroke::{StrokeController, StrokeEvent};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::{CompositorState, Region},
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        wlr_layer::{Anchor, KeyboardInteractivity, LayerSurface},
        WaylandSurface,
    },
    shm::{slot::SlotPool, Shm},
};
use wayland_client::protocol::{wl_pointer, wl_shm, wl_touch};

pub struct AppData {
    registry_state: RegistryState,
    output_state: OutputState,
    seat_state: SeatState,
    compositor_state: CompositorState,
    shm_state: Shm,
    layer_surface: Option<LayerSurface>,
    pool: SlotPool,
    pub(crate) width: u32,
    pub(crate) height: u32,
    configured: bool,
    pointer: Option<wl_pointer::WlPointer>,
    touch: Option<wl_touch::WlTouch>,
    config: InkConfig,
    pen: PenStyle,
    controller: StrokeController,
    pixmap: Option<Pixmap>,
    input_region: Option<Region>,
    pub(crate) exit: bool,
}

impl AppData {
    pub fn new(
        registry_state: RegistryState,
        output_state: OutputState,
        seat_state: SeatState,
        compositor_state: CompositorState,
        shm_state: Shm,
        layer_surface: LayerSurface,
        pool: SlotPool,
        config: InkConfig,
    ) -> Self {
        info!("Configuring layer surface");
        let (width, height) = config.surface_size();
        if width == 0 || height == 0 {
            // No fixed size: stretch across the output.
            layer_surface.set_anchor(Anchor::TOP | Anchor::BOTTOM | Anchor::LEFT | Anchor::RIGHT);
        } else {
            layer_surface.set_anchor(Anchor::TOP);
        }
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);
        layer_surface.set_size(width, height);
        layer_surface.set_exclusive_zone(-1);
        layer_surface.set_margin(0, 0, 0, 0);
        info!("Committing layer surface configuration");
        layer_surface.wl_surface().commit();

        let pen = config.pen_style();

        Self {
            registry_state,
            output_state,
            seat_state,
            compositor_state,
            shm_state,
            layer_surface: Some(layer_surface),
            pool,
            width,
            height,
            configured: false,
            pointer: None,
            touch: None,
            config,
            pen,
            controller: StrokeController::new(),
            pixmap: None,
            input_region: None,
            exit: false,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// First configure fixes the surface dimensions and allocates the
    /// backing pixmap; later size changes carry no resize contract and are
    /// ignored.
    pub fn handle_configure(&mut self, new_size: (u32, u32)) {
        let mut width = self.width;
        let mut height = self.height;
        if new_size.0 != 0 {
            width = new_size.0;
        }
        if new_size.1 != 0 {
            height = new_size.1;
        }

        if let Some(pixmap) = &self.pixmap {
            if (width, height) != (pixmap.width(), pixmap.height()) {
                warn!(
                    "Ignoring surface resize to {}x{}; pad stays {}x{}",
                    width,
                    height,
                    pixmap.width(),
                    pixmap.height()
                );
            }
            // Re-present the existing pixmap to answer the configure.
            if let Err(e) = self.draw() {
                log::error!("Draw failed on reconfigure: {e}");
            }
            return;
        }

        if width == 0 || height == 0 {
            warn!("Compositor assigned no size yet; waiting for a real configure");
            return;
        }

        self.width = width;
        self.height = height;
        self.pixmap = Some(Pixmap::new(width, height, self.config.background()));
        self.configured = true;
        self.set_full_input_region();
        info!("Surface configured at {}x{}", width, height);

        if let Err(e) = self.draw() {
            log::error!("Initial draw failed: {e}");
        }
    }

    fn set_full_input_region(&mut self) {
        if let Some(layer_surface) = &self.layer_surface {
            let surface = layer_surface.wl_surface();
            match Region::new(&self.compositor_state) {
                Ok(region) => {
                    region.add(0, 0, self.width as i32, self.height as i32);
                    surface.set_input_region(Some(region.wl_region()));
                    self.input_region = Some(region);
                    info!("Set input region to (0, 0, {}, {})", self.width, self.height);
                }
                Err(e) => {
                    warn!("Failed to create input region for pad surface: {e}");
                }
            }
        } else {
            warn!("set_full_input_region called but no layer_surface present");
        }
    }

    /// Blit the pixmap into a fresh shm buffer and commit it.
    pub fn draw(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.configured {
            debug!("draw() called before surface is configured, skipping");
            return Ok(());
        }
        let Some(pixmap) = &self.pixmap else {
            return Ok(());
        };

        let width = self.width;
        let height = self.height;
        let stride = width * 4;

        let (buffer, canvas) = self.pool.create_buffer(
            width as i32,
            height as i32,
            stride as i32,
            wl_shm::Format::Argb8888,
        )?;
        canvas.copy_from_slice(pixmap.bytes());

        if let Some(layer_surface) = &self.layer_surface {
            buffer
                .attach_to(layer_surface.wl_surface())
                .expect("buffer attach");
            layer_surface
                .wl_surface()
                .damage_buffer(0, 0, width as i32, height as i32);
            layer_surface.wl_surface().commit();
        }

        Ok(())
    }

    /// Route one stroke event through the controller and present the
    /// result.
    pub fn handle_stroke_event(&mut self, event: StrokeEvent) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            debug!("Dropping stroke event before first configure");
            return;
        };
        self.controller.handle_event(&event, pixmap, &self.pen);
        if let Err(e) = self.draw() {
            log::error!("Draw failed: {e}");
        }
    }

    /// The external "clear" trigger: abort any in-progress stroke and wipe
    /// the surface back to the background color.
    pub fn clear_surface(&mut self) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        info!("Clearing drawing surface");
        self.controller.abort(pixmap);
        let background = pixmap.background();
        pixmap.clear(background);
        if let Err(e) = self.draw() {
            log::error!("Draw failed after clear: {e}");
        }
    }

    /// Re-apply a freshly loaded configuration. Pen changes take effect on
    /// the next rendered segment; the surface keeps its dimensions.
    pub fn apply_config(&mut self, config: InkConfig) {
        self.pen = config.pen_style();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.set_background(config.background());
        }
        self.config = config;
        info!(
            "Configuration reloaded: pen color {:?}, base width {}",
            self.pen.color(),
            self.pen.base_width()
        );
    }

    pub fn is_drawing(&self) -> bool {
        self.controller.is_drawing()
    }

    pub fn registry_state(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    pub fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    pub fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    pub fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm_state
    }

    pub fn set_pointer(&mut self, pointer: Option<wl_pointer::WlPointer>) {
        self.pointer = pointer;
        info!("Pointer set: {:?}", self.pointer.is_some());
    }

    pub fn set_touch(&mut self, touch: Option<wl_touch::WlTouch>) {
        self.touch = touch;
        info!("Touch set: {:?}", self.touch.is_some());
    }

    pub fn close_layer_surface(&mut self) {
        self.layer_surface = None;
        self.exit = true;
        info!("Layer surface closed");
    }
}
