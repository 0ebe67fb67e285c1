//! Desktop preview app for the status ring
//!
//! Drives the ring against a simulated player. The controls flip the player
//! state, press the button, turn the encoder and request a shutdown or kill.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_status_ring::{
    ControlFlags, EncoderConfig, EncoderEvent, InputSignals, Instant, LoopStatus, OutputDriver,
    PlayerClient, PlayerError, Rgb, RotaryEncoder, SceneBank, StatusRing, StatusRingConfig,
    TrackId, VolumeControl,
};

/// Maximum number of LEDs the ring supports
const MAX_LEDS: usize = 64;

/// Number of LEDs in the simulated ring
const LED_COUNT: usize = 24;

/// Size of each LED in pixels
const LED_SIZE: f32 = 12.0;

/// Gap between LEDs in strip layout
const LED_GAP: f32 = 2.0;

/// Fire flicker seed
const FIRE_SEED: u64 = 0x5eed;

static INPUTS: InputSignals = InputSignals::new();
static CONTROL: ControlFlags = ControlFlags::new();
static ENCODER: RotaryEncoder = RotaryEncoder::new(EncoderConfig::new(), false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Render as a 1D strip, wrapped to available window width
    Strip,
    /// Render as a circle, LED 0 at the top, running clockwise
    Ring,
}

/// State of the simulated player, shared with the UI
#[derive(Debug)]
struct PlayerState {
    reachable: bool,
    playing: bool,
    track: u32,
    volume: u8,
}

/// Simulated player handed to the ring and the encoder
#[derive(Clone)]
struct SimPlayer(Rc<RefCell<PlayerState>>);

impl SimPlayer {
    fn reachable(&self) -> Result<(), PlayerError> {
        if self.0.borrow().reachable {
            Ok(())
        } else {
            Err(PlayerError::Disconnected)
        }
    }
}

impl PlayerClient for SimPlayer {
    fn probe_connection(&mut self) -> Result<(), PlayerError> {
        self.reachable()
    }

    fn current_track(&mut self) -> Result<TrackId, PlayerError> {
        self.reachable()?;
        Ok(TrackId(self.0.borrow().track))
    }

    fn is_playing(&mut self) -> Result<bool, PlayerError> {
        self.reachable()?;
        Ok(self.0.borrow().playing)
    }

    fn current_volume(&mut self) -> Result<u8, PlayerError> {
        self.reachable()?;
        Ok(self.0.borrow().volume)
    }
}

impl VolumeControl for SimPlayer {
    fn volume(&mut self) -> Result<u8, PlayerError> {
        self.current_volume()
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), PlayerError> {
        self.reachable()?;
        self.0.borrow_mut().volume = volume;
        Ok(())
    }
}

/// Keeps the last written frame for drawing
#[derive(Default)]
struct PreviewOutput {
    frame: Vec<Rgb>,
}

impl OutputDriver for PreviewOutput {
    fn write(&mut self, colors: &[Rgb]) {
        self.frame.clear();
        self.frame.extend_from_slice(colors);
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 560.0])
            .with_title("Status Ring Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-status-ring-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    /// The ring instance
    ring: StatusRing<'static, PreviewOutput, SimPlayer, MAX_LEDS>,
    /// Handle on the simulated player
    player: SimPlayer,
    /// Last loop status
    status: LoopStatus,

    // UI state
    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Output brightness (0-255)
    brightness: u8,
    /// Simulated encoder clock pin level
    clk: bool,
    /// Outcome of the last encoder edge
    last_encoder_event: Option<EncoderEvent>,
    /// Button held down
    button_pressed: bool,
    /// LED size for display
    led_size: f32,
    layout: Layout,
}

impl PreviewApp {
    fn new() -> Self {
        let player = SimPlayer(Rc::new(RefCell::new(PlayerState {
            reachable: false,
            playing: true,
            track: 1,
            volume: 40,
        })));
        let config = StatusRingConfig::new(LED_COUNT);
        let ring = StatusRing::new(
            PreviewOutput::default(),
            player.clone(),
            &INPUTS,
            &CONTROL,
            SceneBank::with_defaults(FIRE_SEED),
            &config,
        );

        Self {
            ring,
            player,
            status: LoopStatus::Running {
                sleep: config.tick_period,
            },
            t_ms: 0,
            last_frame: StdInstant::now(),
            time_scale: 1.0,
            brightness: config.brightness,
            clk: false,
            last_encoder_event: None,
            button_pressed: false,
            led_size: LED_SIZE,
            layout: Layout::Ring,
        }
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
        let delta_ms_f64 = if delta_ms_f64.is_finite() {
            #[allow(clippy::cast_precision_loss)]
            delta_ms_f64.clamp(0.0, u64::MAX as f64)
        } else {
            0.0
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delta_ms = delta_ms_f64 as u64;
        self.t_ms = self.t_ms.wrapping_add(delta_ms);
    }

    /// Simulate one encoder detent: two clock edges in the same direction
    fn turn_encoder(&mut self, increase: bool) {
        let mut player = self.player.clone();
        for _ in 0..2 {
            self.clk = !self.clk;
            let dt = if increase { !self.clk } else { self.clk };
            let event = ENCODER.on_edge(
                self.clk,
                dt,
                Instant::from_millis(self.t_ms),
                &mut player,
                &INPUTS,
            );
            self.last_encoder_event = Some(event);
        }
    }

    fn status_text(&self) -> String {
        match self.status {
            LoopStatus::Running { .. } => {
                let scene = self
                    .ring
                    .scheduler()
                    .active()
                    .map_or("none", |scene| scene.as_str());
                format!("running: {scene}")
            }
            LoopStatus::Stopped(reason) => format!("stopped: {reason:?}"),
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.status = self.ring.advance(Instant::from_millis(self.t_ms));
        let frame = self.ring.output().frame.clone();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlayerControls>
                ui.vertical(|ui| {
                    let mut state = self.player.0.borrow_mut();
                    ui.checkbox(&mut state.reachable, "Player reachable");
                    ui.checkbox(&mut state.playing, "Playing");
                    ui.horizontal(|ui| {
                        ui.label(format!("Track: {}", state.track));
                        if ui.button("⏭ Next").clicked() {
                            state.track = state.track.wrapping_add(1);
                        }
                    });
                    ui.label(format!("Volume: {}", state.volume));
                });
                // </PlayerControls>
                ui.add_space(16.0);
                // <InputControls>
                ui.vertical(|ui| {
                    if ui.checkbox(&mut self.button_pressed, "Button held").changed() {
                        INPUTS.set_button_pressed(self.button_pressed);
                    }
                    ui.horizontal(|ui| {
                        ui.label("Encoder:");
                        if ui.button("◀").clicked() {
                            self.turn_encoder(false);
                        }
                        if ui.button("▶").clicked() {
                            self.turn_encoder(true);
                        }
                    });
                    if let Some(event) = self.last_encoder_event {
                        ui.label(format!("Last edge: {event:?}"));
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Shutdown").clicked() {
                            CONTROL.request_shutdown();
                        }
                        if ui.button("Kill").clicked() {
                            CONTROL.request_kill();
                        }
                    });
                });
                // </InputControls>
                ui.add_space(16.0);
                // <ViewControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
                    });
                    ui.horizontal(|ui| {
                        ui.label("Brightness:");
                        let old_brightness = self.brightness;
                        ui.add(egui::DragValue::new(&mut self.brightness).range(0u8..=255u8));
                        if self.brightness != old_brightness {
                            self.ring.set_brightness(self.brightness);
                        }
                    });
                    ui.horizontal(|ui| {
                        ui.label("Size: ");
                        ui.add(egui::Slider::new(&mut self.led_size, 4.0..=32.0));
                    });
                    ui.horizontal(|ui| {
                        ui.label("Layout:");
                        ui.selectable_value(&mut self.layout, Layout::Ring, "ring");
                        ui.selectable_value(&mut self.layout, Layout::Strip, "strip");
                    });
                });
                // </ViewControls>
            });

            ui.add_space(8.0);
            let secs = self.t_ms / 1000;
            let ms = self.t_ms % 1000;
            ui.label(format!("Time: {secs}.{ms:03}s  |  {}", self.status_text()));
            ui.add_space(16.0);

            // === LED Display ===
            let available_width = ui.available_width();
            let led_pitch = self.led_size + LED_GAP;

            match self.layout {
                Layout::Strip => {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
                    let rows = frame.len().div_ceil(leds_per_row);
                    #[allow(clippy::cast_precision_loss)]
                    let height = rows as f32 * led_pitch;

                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(available_width, height),
                        egui::Sense::hover(),
                    );
                    let origin = response.rect.min;

                    #[allow(clippy::cast_precision_loss)]
                    for (i, pixel) in frame.iter().enumerate() {
                        let row = i / leds_per_row;
                        let col = i % leds_per_row;
                        let x = origin.x + col as f32 * led_pitch;
                        let y = origin.y + row as f32 * led_pitch;

                        let rect = egui::Rect::from_min_size(
                            egui::pos2(x, y),
                            egui::vec2(self.led_size, self.led_size),
                        );
                        let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                        painter.rect_filled(rect, 3.0, color);
                    }
                }
                Layout::Ring => {
                    #[allow(clippy::cast_precision_loss)]
                    let radius = (frame.len() as f32 * led_pitch / std::f32::consts::TAU)
                        .max(self.led_size);
                    let side = 2.0 * (radius + self.led_size);

                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(available_width, side),
                        egui::Sense::hover(),
                    );
                    let center = egui::pos2(response.rect.center().x, response.rect.min.y + side / 2.0);

                    #[allow(clippy::cast_precision_loss)]
                    for (i, pixel) in frame.iter().enumerate() {
                        let angle = std::f32::consts::TAU * i as f32 / frame.len() as f32
                            - std::f32::consts::FRAC_PI_2;
                        let position = center + radius * egui::vec2(angle.cos(), angle.sin());
                        let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                        painter.circle_filled(position, self.led_size / 2.0, color);
                    }
                }
            }
        });
    }
}
