mod build_info;
mod core;
mod games;
mod portal;
mod scores;
mod settings;
mod ui;
mod utils;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use games::crossing::{self, CrossingInput, MoveDirection, MoveOutcome};
use games::flappy::{self, FlappyInput};
use games::{ActiveGame, CrossingConfig, CrossingGame, FlappyConfig, FlappyGame, GamePhase};
use portal::{best_scores_path, BestScores, MenuItem, PortalMenu};
use ratatui::{backend::CrosstermBackend, Terminal};
use scores::{AnonymousSession, JsonScoreStore, ScoreEntry, ScoreStore, LEADERBOARD_SIZE, SCORES_FILE};
use settings::{
    JsonSettingsStore, Rgb, SettingsSnapshot, CROSSING_KEY, FLAPPY_KEY, GROUP_KEYS, PORTAL_KEY,
    SETTINGS_FILE,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use ui::flappy_scene::FlappyScene;
use ui::settings_scene::SettingsView;

enum Screen {
    Menu,
    Game,
    HighScores,
    Settings,
}

/// Everything the portal keeps between frames.
struct App {
    data_dir: PathBuf,
    settings_store: JsonSettingsStore,
    score_store: JsonScoreStore,
    identities: AnonymousSession,
    best: BestScores,
    screen: Screen,
    menu: PortalMenu,
    portal_title: String,
    portal_accent: Rgb,
    game: Option<ActiveGame>,
    last_move: Option<MoveOutcome>,
    flappy_scene: FlappyScene,
    leaderboard: Vec<ScoreEntry>,
    leaderboard_error: Option<String>,
    settings_view: SettingsView,
    settings_snapshot: SettingsSnapshot,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Arcade - Terminal Game Portal\n");
                println!("Usage: arcade [command]\n");
                println!("Commands:");
                println!("  scores           Print the Sky Hopper leaderboard");
                println!("  settings [game]  Print merged settings as JSON");
                println!("                   (game: {})", GROUP_KEYS.join(", "));
                println!("  --version        Show version information");
                println!("  --help           Show this help message");
                println!("\nData lives in ~/.arcade (override with ARCADE_HOME).");
                std::process::exit(0);
            }
            "scores" => {
                let data_dir = utils::persistence::arcade_dir()?;
                print_scores(&data_dir)?;
                std::process::exit(0);
            }
            "settings" => {
                let data_dir = utils::persistence::arcade_dir()?;
                let code = print_settings(&data_dir, args.get(2).map(String::as_str))?;
                std::process::exit(code);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'arcade --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let data_dir = utils::persistence::arcade_dir()?;
    if let Err(e) = utils::logging::init(&data_dir.join(utils::logging::LOG_FILE)) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    log::info!("{} starting", build_info::version_line());

    let mut app = App::new(data_dir);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("portal stopped: {}", e);
    }
    log::info!("exiting");
    result
}

fn print_scores(data_dir: &Path) -> io::Result<()> {
    let store = JsonScoreStore::new(data_dir.join(SCORES_FILE));
    let entries = store.list(LEADERBOARD_SIZE)?;
    if entries.is_empty() {
        println!("No scores yet.");
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{}. {:<16} {:>6}", i + 1, entry.username, entry.score);
    }
    Ok(())
}

/// Print one group, or all of them. Returns the process exit code.
fn print_settings(data_dir: &Path, group: Option<&str>) -> io::Result<i32> {
    let store = JsonSettingsStore::new(data_dir.join(SETTINGS_FILE));
    let groups: Vec<&str> = match group {
        Some(group) if GROUP_KEYS.contains(&group) => vec![group],
        Some(other) => {
            eprintln!("Unknown game: {} (expected one of {})", other, GROUP_KEYS.join(", "));
            return Ok(1);
        }
        None => GROUP_KEYS.to_vec(),
    };

    let mut out = serde_json::Map::new();
    for group in groups {
        out.insert(
            group.to_string(),
            SettingsSnapshot::load(&store, group).to_json(),
        );
    }
    let json = serde_json::to_string_pretty(&out)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    println!("{}", json);
    Ok(0)
}

impl App {
    fn new(data_dir: PathBuf) -> Self {
        let settings_store = JsonSettingsStore::new(data_dir.join(SETTINGS_FILE));
        match settings_store.seed_defaults() {
            Ok(true) => log::info!("wrote default settings to {}", settings_store.path().display()),
            Ok(false) => {}
            Err(e) => log::warn!("could not seed settings: {}", e),
        }

        let portal = SettingsSnapshot::load(&settings_store, PORTAL_KEY);
        let settings_snapshot = SettingsSnapshot::load(&settings_store, GROUP_KEYS[0]);

        Self {
            score_store: JsonScoreStore::new(data_dir.join(SCORES_FILE)),
            identities: AnonymousSession::new(),
            best: BestScores::load(&best_scores_path(&data_dir)),
            screen: Screen::Menu,
            menu: PortalMenu::new(),
            portal_title: portal.text("title").unwrap_or("Arcade").to_string(),
            portal_accent: portal.color("accent_color").unwrap_or(Rgb(0x00, 0xBC, 0xD4)),
            game: None,
            last_move: None,
            flappy_scene: FlappyScene::new(),
            leaderboard: Vec::new(),
            leaderboard_error: None,
            settings_view: SettingsView::new(),
            settings_snapshot,
            settings_store,
            data_dir,
        }
    }

    fn open_crossing(&mut self) {
        let config = CrossingConfig::from_snapshot(&SettingsSnapshot::load(
            &self.settings_store,
            CROSSING_KEY,
        ));
        let mut game = CrossingGame::new(config, &mut rand::thread_rng());
        game.best_score = self.best.get(CROSSING_KEY);
        log::info!("opening road rush");
        self.last_move = None;
        self.game = Some(ActiveGame::Crossing(game));
        self.screen = Screen::Game;
    }

    fn open_flappy(&mut self) {
        let config =
            FlappyConfig::from_snapshot(&SettingsSnapshot::load(&self.settings_store, FLAPPY_KEY));
        let mut game = FlappyGame::new(config);
        game.best_score = self.best.get(FLAPPY_KEY);
        log::info!("opening sky hopper");
        self.flappy_scene.reset();
        self.game = Some(ActiveGame::Flappy(game));
        self.screen = Screen::Game;
    }

    fn open_leaderboard(&mut self) {
        match self.score_store.list(LEADERBOARD_SIZE) {
            Ok(entries) => {
                self.leaderboard = entries;
                self.leaderboard_error = None;
            }
            Err(e) => {
                log::warn!("could not read leaderboard: {}", e);
                self.leaderboard.clear();
                self.leaderboard_error = Some(e.to_string());
            }
        }
        self.screen = Screen::HighScores;
    }

    fn reload_settings_view(&mut self) {
        self.settings_snapshot =
            SettingsSnapshot::load(&self.settings_store, self.settings_view.group());
    }

    fn leave_game(&mut self) {
        if let Some(game) = &mut self.game {
            game.stop();
        }
        self.game = None;
        self.screen = Screen::Menu;
    }

    /// Persist the running best once a session has ended.
    fn record_game_over(&mut self) {
        let Some(game) = &self.game else {
            return;
        };
        if game.phase() != GamePhase::GameOver {
            return;
        }
        if self.best.record(game.key(), game.best_score()) {
            if let Err(e) = self.best.save(&best_scores_path(&self.data_dir)) {
                log::warn!("could not save best scores: {}", e);
            }
        }
    }

    /// Returns false when the portal should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.screen {
            Screen::Menu => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.menu.navigate_up(),
                KeyCode::Down | KeyCode::Char('j') => self.menu.navigate_down(),
                KeyCode::Enter | KeyCode::Char(' ') => match self.menu.selected() {
                    MenuItem::RoadRush => self.open_crossing(),
                    MenuItem::SkyHopper => self.open_flappy(),
                    MenuItem::HighScores => self.open_leaderboard(),
                    MenuItem::Settings => {
                        self.reload_settings_view();
                        self.screen = Screen::Settings;
                    }
                    MenuItem::Quit => return false,
                },
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
                _ => {}
            },
            Screen::HighScores => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Settings => match key.code {
                KeyCode::Left | KeyCode::BackTab => {
                    self.settings_view.prev_group();
                    self.reload_settings_view();
                }
                KeyCode::Right | KeyCode::Tab => {
                    self.settings_view.next_group();
                    self.reload_settings_view();
                }
                KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Menu,
                _ => {}
            },
            Screen::Game => self.handle_game_key(key),
        }
        true
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.leave_game();
            return;
        }
        match &mut self.game {
            Some(ActiveGame::Crossing(game)) => {
                let input = crossing_input(key.code);
                let outcome = crossing::process_input(game, input, &mut rand::thread_rng());
                if outcome.is_some() || input == CrossingInput::Confirm {
                    self.last_move = outcome;
                }
            }
            Some(ActiveGame::Flappy(game)) => {
                if game.phase == GamePhase::GameOver {
                    match key.code {
                        KeyCode::Tab => {
                            flappy::process_input(game, FlappyInput::Restart);
                            self.flappy_scene.reset();
                        }
                        KeyCode::Enter => {
                            let result = flappy::submit_high_score(
                                game,
                                &mut self.score_store,
                                &mut self.identities,
                                &self.flappy_scene.name_input,
                            );
                            if let Err(e) = &result {
                                log::warn!("score submission failed: {}", e);
                            }
                            self.flappy_scene.set_submission_result(&result);
                        }
                        KeyCode::Backspace => self.flappy_scene.handle_backspace(),
                        KeyCode::Char(c) => self.flappy_scene.handle_char_input(c),
                        _ => {}
                    }
                } else {
                    flappy::process_input(game, flappy_input(key.code));
                    let cues = game.take_cues();
                    self.flappy_scene.absorb_cues(&cues);
                }
            }
            None => self.screen = Screen::Menu,
        }
    }

    /// Advance the active game by `dt_ms` of wall time.
    fn tick(&mut self, dt_ms: u64) {
        let was_over = self
            .game
            .as_ref()
            .map(|g| g.phase() == GamePhase::GameOver)
            .unwrap_or(true);

        match &mut self.game {
            Some(ActiveGame::Crossing(game)) => {
                crossing::tick(game, dt_ms, &mut rand::thread_rng());
            }
            Some(ActiveGame::Flappy(game)) => {
                flappy::tick(game, dt_ms, &mut rand::thread_rng());
                let cues = game.take_cues();
                self.flappy_scene.absorb_cues(&cues);
                self.flappy_scene.update(dt_ms);
            }
            None => return,
        }

        if !was_over {
            self.record_game_over();
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        let area = frame.size();
        match self.screen {
            Screen::Menu => ui::menu_scene::render_menu(
                frame,
                area,
                &self.menu,
                &self.portal_title,
                self.portal_accent,
                &self.best,
            ),
            Screen::HighScores => ui::leaderboard_scene::render_leaderboard(
                frame,
                area,
                &self.leaderboard,
                self.leaderboard_error.as_deref(),
            ),
            Screen::Settings => ui::settings_scene::render_settings(
                frame,
                area,
                &self.settings_view,
                &self.settings_snapshot,
            ),
            Screen::Game => match &self.game {
                Some(ActiveGame::Crossing(game)) => {
                    ui::crossing_scene::render_crossing_scene(frame, area, game, self.last_move)
                }
                Some(ActiveGame::Flappy(game)) => {
                    ui::flappy_scene::render_flappy_scene(frame, area, game, &self.flappy_scene)
                }
                None => {}
            },
        }
    }
}

fn crossing_input(code: KeyCode) -> CrossingInput {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            CrossingInput::Move(MoveDirection::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            CrossingInput::Move(MoveDirection::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            CrossingInput::Move(MoveDirection::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            CrossingInput::Move(MoveDirection::Right)
        }
        KeyCode::Char(' ') | KeyCode::Enter => CrossingInput::Confirm,
        _ => CrossingInput::Other,
    }
}

fn flappy_input(code: KeyCode) -> FlappyInput {
    match code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => FlappyInput::Jump,
        _ => FlappyInput::Other,
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        let dt_ms = now.duration_since(last_tick).as_millis() as u64;
        last_tick = now;
        app.tick(dt_ms);

        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if !app.handle_key(key_event) {
                    break;
                }
            }
        }
    }

    app.leave_game();
    Ok(())
}
