use std::io;
use std::time::{Duration, Instant};

use crate::animation::{AnimationConfig, DropAnimator};
use crate::config::AppConfig;
use crate::error::{ConfigError, MoveError};
use crate::game::{GameOutcome, GameState};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use super::board_widget::BoardView;
use super::game_view;
use super::keys::{Action, KeyBindings};
use super::layer::{Command, Layer, LayerResponse};
use super::menu::MainMenu;

/// The game controller: routes key presses to the engine, feeds the move
/// history to the animator every tick, and redraws when something changed.
pub struct App {
    game_state: GameState,
    animator: DropAnimator,
    animation: AnimationConfig,
    bindings: KeyBindings,
    controls: Vec<String>,
    layers: Vec<Box<dyn Layer>>,
    selected_column: usize,
    /// Seconds since the last piece was observed; hides the selector briefly
    /// so it does not overlap the piece that was just dropped.
    time_since_drop: f64,
    should_quit: bool,
    message: Option<String>,
    dirty: bool,
    last_drawn_column: Option<usize>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let game_state = config.game.build_engine()?;
        let bindings = config.controls.bindings()?;
        let controls = bindings.controls_summary();

        Ok(App {
            animator: DropAnimator::new(game_state.height(), config.animation.clone()),
            animation: config.animation.clone(),
            selected_column: game_state.width() / 2,
            game_state,
            layers: vec![Box::new(MainMenu::new(controls.clone()))],
            bindings,
            controls,
            time_since_drop: f64::MAX,
            should_quit: false,
            message: None,
            dirty: true,
            last_drawn_column: None,
        })
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn animator(&self) -> &DropAnimator {
        &self.animator
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Add an overlay drawn above everything added before it.
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
        self.dirty = true;
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let frame_time = Duration::from_secs_f64(1.0 / f64::from(self.animation.fps));
        let mut last_tick = Instant::now();

        loop {
            if self.needs_redraw() {
                terminal.draw(|f| self.render(f))?;
            }

            if self.should_quit {
                break;
            }

            let timeout = frame_time.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => self.dirty = true,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= frame_time {
                self.tick();
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let action = self.bindings.action_for(&key);

        // Topmost layer first; the first one that reacts keeps the key
        let response = self
            .layers
            .iter_mut()
            .rev()
            .map(|layer| layer.handle_key(&key, action))
            .find(|response| *response != LayerResponse::Ignored)
            .unwrap_or(LayerResponse::Ignored);

        match response {
            LayerResponse::Ignored => {
                if let Some(action) = action {
                    self.handle_action(action);
                }
            }
            LayerResponse::Consumed => {}
            LayerResponse::Command(command) => self.run_command(command),
        }
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::NewGame => self.new_game(),
            Command::Quit => self.should_quit = true,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        // Clear message on any action
        self.message = None;
        self.dirty = true;

        match action {
            Action::Quit => self.should_quit = true,
            Action::DropPiece if !self.game_state.is_terminal() => self.drop_piece(),
            Action::MoveLeft if !self.game_state.is_terminal() => self.move_selection(-1),
            Action::MoveRight if !self.game_state.is_terminal() => self.move_selection(1),
            Action::NewGame if self.game_state.is_terminal() => self.new_game(),
            Action::DropPiece | Action::MoveLeft | Action::MoveRight => {
                self.message = Some("Game over! Start a new game.".to_string());
            }
            Action::NewGame | Action::ToggleMenu => {}
        }
    }

    /// Advance one display tick.
    pub fn tick(&mut self) {
        if self.animator.observe(self.game_state.history()) > 0 {
            self.time_since_drop = 0.0;
        }
        if self.animator.advance(self.animation.tick_delta()) {
            // Draw the final resting frame
            self.dirty = true;
        }
        self.time_since_drop += 1.0 / f64::from(self.animation.fps);

        for layer in &mut self.layers {
            layer.tick();
        }
    }

    /// Drain the old board and start over.
    fn new_game(&mut self) {
        self.animator.discard_all_downward(self.game_state.history());
        self.game_state.reset();
        self.selected_column = self.game_state.width() / 2;
        self.time_since_drop = f64::MAX;
        self.message = Some("New game started!".to_string());
        self.dirty = true;
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.game_state.drop_current(self.selected_column) {
            Ok(_) => {
                self.message = match self.game_state.outcome() {
                    GameOutcome::InProgress => None,
                    GameOutcome::Won { piece, .. } => Some(format!("{piece} wins!")),
                    GameOutcome::Tie => Some("It's a tie!".to_string()),
                };
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let width = self.game_state.width() as isize;
        self.selected_column = (self.selected_column as isize + delta).rem_euclid(width) as usize;
    }

    fn selector_delay(&self) -> f64 {
        1.0 / self.animation.speed_multiplier
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
            || self.animator.is_animating()
            || self.last_drawn_column != Some(self.selected_column)
            || self.layers.iter().any(|layer| layer.is_dirty())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        let show_selector = self.time_since_drop >= self.selector_delay();
        let board = BoardView {
            state: &self.game_state,
            animator: &self.animator,
            selected_column: self.selected_column,
            show_selector,
        };
        game_view::render(frame, &board, &self.message, &self.controls);

        let area = frame.area();
        for layer in &mut self.layers {
            layer.draw(frame, area);
        }

        // Keep redrawing until the selector reappears
        self.dirty = !show_selector && !self.game_state.is_terminal();
        self.last_drawn_column = Some(self.selected_column);
    }
}
