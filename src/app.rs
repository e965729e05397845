use std::time::{Duration, Instant};

use bevy_ecs::schedule::{ExecutorKind, Schedule};
use circular_buffer::CircularBuffer;
use sdl2::event::{Event, WindowEvent};
use sdl2::image::{InitFlag, Sdl2ImageContext};
use sdl2::render::TextureCreator;
use sdl2::ttf::Sdl2TtfContext;
use sdl2::video::WindowContext;
use sdl2::{EventPump, Sdl};
use tracing::{debug, info, trace, warn};

use crate::constants::ui::WINDOW_TITLE;
use crate::constants::{CANVAS_SIZE, FRAMES_PER_SECOND, LOOP_TIME};
use crate::error::{GameError, GameResult};
use crate::events::GameCommand;
use crate::formatter;
use crate::game::Game;
use crate::systems::input::bindings;
use crate::systems::render::{render_system, Fonts, SpriteSet, TextRenderer};
use crate::systems::InputState;

/// How many recent frame times are kept for the periodic timing summary.
const FRAME_TIME_WINDOW: usize = 120;

/// How often (in frames) the timing summary is logged.
const FRAME_STATS_INTERVAL: u64 = FRAMES_PER_SECOND as u64 * 10;

/// Main application wrapper that manages SDL initialization, the window, and the game loop.
pub struct App {
    pub game: Game,
    render_schedule: Schedule,
    event_pump: EventPump,
    frame_times: CircularBuffer<FRAME_TIME_WINDOW, Duration>,
    focused: bool,
    // Keep SDL alive for the app lifetime
    _image_context: Sdl2ImageContext,
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, opens the window, loads drawables and fonts, and builds the game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails. Missing images and
    /// a missing font are not errors; they fall back to placeholders and no HUD text.
    pub fn new() -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;

        debug!("Initializing SDL2 subsystems");
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let image_context = sdl2::image::init(InitFlag::PNG).map_err(GameError::Sdl)?;
        let ttf_context = sdl2::ttf::init().map_err(|e| GameError::Sdl(e.to_string()))?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        trace!(width = CANVAS_SIZE.x, height = CANVAS_SIZE.y, "Creating game window");
        let window = video_subsystem
            .window(WINDOW_TITLE, CANVAS_SIZE.x, CANVAS_SIZE.y)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let texture_creator: &'static TextureCreator<WindowContext> = Box::leak(Box::new(canvas.texture_creator()));
        let ttf_context: &'static Sdl2TtfContext = Box::leak(Box::new(ttf_context));

        let sprites = SpriteSet::load(texture_creator);
        let fonts = match Fonts::load(ttf_context) {
            Ok(fonts) => Some(fonts),
            Err(e) => {
                warn!(error = %e, "Font unavailable, drawing text with the bitmap font");
                None
            }
        };

        let mut game = Game::new()?;
        game.world.insert_non_send_resource(canvas);
        game.world.insert_non_send_resource(sprites);
        game.world.insert_non_send_resource(TextRenderer::new(texture_creator, fonts));

        let mut render_schedule = Schedule::default();
        render_schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        render_schedule.add_systems(render_system);

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            render_schedule,
            event_pump,
            frame_times: CircularBuffer::new(),
            focused: true,
            _image_context: image_context,
            _sdl_context: sdl_context,
        })
    }

    /// Executes a single frame: polls events, advances the simulation, draws, then
    /// sleeps off whatever is left of the frame budget.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if exit was requested.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => {
                    info!("Window closed");
                    self.game.command(GameCommand::Exit);
                }
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(command) = bindings::command_for(key) {
                        debug!(?command, ?key, "Key command");
                        self.game.command(command);
                    }
                }
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => self.focused = true,
                    WindowEvent::FocusLost => self.focused = false,
                    _ => {}
                },
                _ => {}
            }
        }

        let held = bindings::held_keys(&self.event_pump.keyboard_state());
        if self.game.tick(InputState::new(held)) {
            info!("Exit requested. Exiting...");
            return false;
        }

        self.render_schedule.run(&mut self.game.world);
        self.game.report_errors();

        let elapsed = start.elapsed();
        self.record_frame_time(elapsed);

        if elapsed < LOOP_TIME {
            spin_sleep::sleep(LOOP_TIME - elapsed);
        } else if self.focused {
            warn!(behind = ?(elapsed - LOOP_TIME), "Game loop behind schedule");
        }

        true
    }

    fn record_frame_time(&mut self, elapsed: Duration) {
        self.frame_times.push_back(elapsed);

        if formatter::frame_count() % FRAME_STATS_INTERVAL == 0 {
            let total: Duration = self.frame_times.iter().sum();
            let average = total / self.frame_times.len().max(1) as u32;
            let slowest = self.frame_times.iter().max().copied().unwrap_or_default();
            debug!(?average, ?slowest, samples = self.frame_times.len(), "Frame timing");
        }
    }
}
