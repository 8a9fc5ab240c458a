use std::time::Instant;

use tracing::{debug, warn};

use crate::config::{Config, LOCALES, MAX_ARRAY_SIZE};
use crate::engine::algorithm::Algorithm;
use crate::engine::controller::{RunController, adjacent_speed};
use crate::engine::driver::Step;
use crate::engine::run::RunStatus;
use crate::session::result::{self, RunResult};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

pub const SETTINGS_FIELDS: usize = 4;
const SIZE_STEP: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Visualizer,
    AlgorithmSelect,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub controller: RunController,
    pub history: Vec<RunResult>,
    pub last_step: Option<Step>,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    pub settings_selected: usize,
    stop_pending: bool,
}

impl App {
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let mut menu = Menu::new(theme);

        let algorithm = config.algorithm();
        menu.select(algorithm);
        let mut controller = match seed {
            Some(seed) => RunController::with_seed(algorithm, config.speed_ms, seed),
            None => RunController::new(algorithm, config.speed_ms),
        };
        controller.new_run(config.array_size, config.max_value);
        rust_i18n::set_locale(&config.locale);

        Self {
            screen: AppScreen::Visualizer,
            controller,
            history: Vec::new(),
            last_step: None,
            menu,
            theme,
            config,
            should_quit: false,
            settings_selected: 0,
            stop_pending: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Advance the animation. Called on every loop iteration of the UI.
    pub fn on_tick(&mut self, now: Instant) {
        for update in self.controller.poll(now) {
            if update.step == Step::Finished && update.status == RunStatus::Done {
                result::record(
                    &mut self.history,
                    RunResult::from_controller(&self.controller, true),
                );
            } else if update.step.is_terminal() {
                self.record_stopped_run();
            }
            self.last_step = Some(update.step);
        }
    }

    /// Record a stopped run once its driver has drained, so the entry carries
    /// the in-flight mutation too.
    fn record_stopped_run(&mut self) {
        if !self.stop_pending {
            return;
        }
        self.stop_pending = false;
        result::record(
            &mut self.history,
            RunResult::from_controller(&self.controller, false),
        );
    }

    pub fn start(&mut self) {
        self.record_stopped_run();
        self.last_step = None;
        self.controller.start();
    }

    pub fn new_array(&mut self) {
        self.record_stopped_run();
        self.last_step = None;
        self.controller
            .new_run(self.config.array_size, self.config.max_value);
    }

    pub fn load_values(&mut self, values: Vec<u32>) {
        self.record_stopped_run();
        self.controller.load_values(values);
    }

    /// Stop the active run, keeping the partially sorted array on screen.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.controller.cancel();
        self.stop_pending = true;
    }

    /// Stop and generate a fresh array.
    pub fn reset(&mut self) {
        self.stop();
        self.record_stopped_run();
        self.last_step = None;
        self.controller
            .reset(self.config.array_size, self.config.max_value);
    }

    pub fn choose_algorithm(&mut self, algorithm: Algorithm) {
        self.controller.set_algorithm(algorithm);
        let accepted = self.controller.algorithm();
        self.menu.select(accepted);
        self.config.set_algorithm(accepted);
    }

    pub fn change_speed(&mut self, slower: bool) {
        let speed = adjacent_speed(self.controller.speed_ms(), slower);
        self.controller.set_speed(speed);
        self.config.speed_ms = self.controller.speed_ms();
    }

    pub fn open_algorithm_menu(&mut self) {
        if self.is_running() {
            debug!("algorithm menu locked while running");
            return;
        }
        self.menu.select(self.controller.algorithm());
        self.screen = AppScreen::AlgorithmSelect;
    }

    pub fn confirm_algorithm_menu(&mut self) {
        self.choose_algorithm(self.menu.current());
        self.screen = AppScreen::Visualizer;
    }

    pub fn go_to_visualizer(&mut self) {
        self.screen = AppScreen::Visualizer;
    }

    pub fn go_to_settings(&mut self) {
        if self.is_running() {
            debug!("settings locked while running");
            return;
        }
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    /// Persist settings and regenerate the array if its size changed.
    pub fn leave_settings(&mut self) {
        if let Err(err) = self.config.save() {
            warn!(%err, "failed to save config");
        }
        if self.controller.run().array.len() != self.config.array_size {
            self.new_array();
        }
        self.screen = AppScreen::Visualizer;
    }

    pub fn settings_cycle_forward(&mut self) {
        self.settings_cycle(true);
    }

    pub fn settings_cycle_backward(&mut self) {
        self.settings_cycle(false);
    }

    fn settings_cycle(&mut self, forward: bool) {
        match self.settings_selected {
            0 => self.change_speed(forward),
            1 => {
                let size = self.config.array_size;
                self.config.array_size = if forward {
                    (size + SIZE_STEP).min(MAX_ARRAY_SIZE)
                } else {
                    size.saturating_sub(SIZE_STEP).max(SIZE_STEP)
                };
            }
            2 => {
                let themes = Theme::available_themes();
                if let Some(next) = cycle(&themes, &self.config.theme, forward) {
                    self.set_theme(&next);
                }
            }
            3 => {
                let locales: Vec<String> = LOCALES.iter().map(|l| l.to_string()).collect();
                if let Some(next) = cycle(&locales, &self.config.locale, forward) {
                    rust_i18n::set_locale(&next);
                    self.config.locale = next;
                }
            }
            _ => {}
        }
    }

    pub fn set_theme(&mut self, name: &str) {
        if let Some(theme) = Theme::load(name) {
            let theme: &'static Theme = Box::leak(Box::new(theme));
            self.theme = theme;
            self.menu.theme = theme;
            self.config.theme = name.to_string();
        } else {
            warn!(theme = name, "theme not found");
        }
    }
}

fn cycle(options: &[String], current: &str, forward: bool) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match options.iter().position(|o| o == current) {
        Some(pos) if forward => (pos + 1) % len,
        Some(pos) => (pos + len - 1) % len,
        None => 0,
    };
    Some(options[next].clone())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn test_app() -> App {
        App::new(Config::default(), Some(11))
    }

    fn far_future() -> Instant {
        Instant::now() + Duration::from_secs(3600)
    }

    #[test]
    fn test_new_app_has_ready_array_from_config() {
        let app = test_app();
        let run = app.controller.run();
        assert_eq!(run.array.len(), 20);
        assert_eq!(run.status, RunStatus::Ready);
        assert_eq!(app.screen, AppScreen::Visualizer);
    }

    #[test]
    fn test_finished_run_is_recorded_once() {
        let mut app = test_app();
        app.start();
        app.on_tick(far_future());
        app.on_tick(far_future());
        assert_eq!(app.controller.run().status, RunStatus::Done);
        assert_eq!(app.history.len(), 1);
        assert!(app.history[0].completed);
        assert_eq!(app.last_step, Some(Step::Finished));
    }

    #[test]
    fn test_stop_records_cancelled_run() {
        let mut app = test_app();
        app.start();
        app.on_tick(Instant::now());
        app.stop();
        app.on_tick(far_future());
        assert_eq!(app.controller.run().status, RunStatus::Ready);
        assert_eq!(app.history.len(), 1);
        assert!(!app.history[0].completed);
    }

    #[test]
    fn test_stopped_run_history_includes_in_flight_swap() {
        let mut app = test_app();
        app.load_values(vec![4, 3, 2, 1]);
        let t0 = Instant::now();
        app.controller.start_at(t0);
        app.on_tick(t0);
        assert_eq!(app.controller.run().swaps, 0);

        app.stop();
        assert!(app.history.is_empty());

        app.on_tick(far_future());
        assert_eq!(app.controller.run().swaps, 1);
        assert_eq!(app.history.len(), 1);
        assert!(!app.history[0].completed);
        assert_eq!(app.history[0].comparisons, 1);
        assert_eq!(app.history[0].swaps, 1);
    }

    #[test]
    fn test_reset_right_after_stop_still_records_once() {
        let mut app = test_app();
        app.start();
        app.on_tick(Instant::now());
        app.reset();
        app.on_tick(far_future());
        assert_eq!(app.history.len(), 1);
        assert!(!app.history[0].completed);
    }

    #[test]
    fn test_stop_when_idle_records_nothing() {
        let mut app = test_app();
        app.stop();
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_reset_mid_run_gives_fresh_array() {
        let mut app = test_app();
        app.start();
        app.on_tick(Instant::now());
        app.reset();
        let run = app.controller.run();
        assert_eq!(run.status, RunStatus::Ready);
        assert_eq!(run.comparisons, 0);
        assert_eq!(run.swaps, 0);
        assert!(run.highlighted.is_empty());
    }

    #[test]
    fn test_algorithm_and_speed_locked_while_running() {
        let mut app = test_app();
        app.start();
        app.choose_algorithm(Algorithm::Insertion);
        app.change_speed(true);
        assert_eq!(app.controller.algorithm(), Algorithm::Bubble);
        assert_eq!(app.config.algorithm(), Algorithm::Bubble);
        assert_eq!(app.controller.speed_ms(), 50);
        app.open_algorithm_menu();
        assert_eq!(app.screen, AppScreen::Visualizer);
    }

    #[test]
    fn test_algorithm_menu_confirm() {
        let mut app = test_app();
        app.open_algorithm_menu();
        assert_eq!(app.screen, AppScreen::AlgorithmSelect);
        app.menu.next();
        app.confirm_algorithm_menu();
        assert_eq!(app.controller.algorithm(), Algorithm::Selection);
        assert_eq!(app.config.algorithm, "selection");
        assert_eq!(app.screen, AppScreen::Visualizer);
    }

    #[test]
    fn test_settings_size_cycles_within_bounds() {
        let mut app = test_app();
        app.settings_selected = 1;
        app.settings_cycle_forward();
        assert_eq!(app.config.array_size, 25);
        app.config.array_size = SIZE_STEP;
        app.settings_cycle_backward();
        assert_eq!(app.config.array_size, SIZE_STEP);
    }

    #[test]
    fn test_cycle_helper() {
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(cycle(&options, "a", true).as_deref(), Some("b"));
        assert_eq!(cycle(&options, "a", false).as_deref(), Some("b"));
        assert_eq!(cycle(&options, "zzz", true).as_deref(), Some("a"));
        assert_eq!(cycle(&[], "a", true), None);
    }
}
