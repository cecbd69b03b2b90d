use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use std::fs::File;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use pacman_levelgen::{
    DisplaySettings, GenerationReport, GeneratorConfig, LevelGenerator, TerminalRenderer,
};

/// Everything the front-end owns for the lifetime of the process.
struct App {
    generator: LevelGenerator,
    renderer: TerminalRenderer<Stdout>,
    report: GenerationReport,
}

impl App {
    fn hud(&self) -> String {
        let view = self
            .renderer
            .view_half_height()
            .map_or_else(|| "-".to_string(), |h| format!("{h:.1}"));
        let shown = if self.generator.static_level_visible() {
            "static"
        } else {
            "generated"
        };
        format!(
            "Level #{}  Showing: {}  Pellets: {}  View: {}  (r regenerate, s static, q quit)",
            self.report.generation, shown, self.report.collectibles, view
        )
    }
}

fn main() -> io::Result<()> {
    init_logging();

    // settings warnings have to reach the normal screen, not the maze
    let config = GeneratorConfig::from_env()
        .validated()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let display = DisplaySettings::from_env();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(config, display);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("PACMAN_LOG", "warn");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = std::env::var_os("PACMAN_LOG_FILE") {
        match File::create(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(err) => eprintln!("cannot open log file {path:?}: {err}"),
        }
    }
    builder.init();
}

fn run(config: GeneratorConfig, display: DisplaySettings) -> io::Result<()> {
    let frame_time = Duration::from_micros(1_000_000 / display.render_fps.max(1));

    let mut generator = LevelGenerator::new(config);
    let mut renderer = TerminalRenderer::new(
        io::stdout(),
        config.tile_size,
        generator.canonical().clone(),
        terminal::size()?,
    );
    let report = generator.start(&mut renderer);
    let mut app = App {
        generator,
        renderer,
        report,
    };

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => {
                        app.report = app.generator.generate_level(&mut app.renderer);
                    }
                    KeyCode::Char('s') => {
                        app.generator.toggle_static_level(&mut app.renderer);
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    app.renderer.resize(cols, rows);
                    // the camera fit depends on the viewport shape
                    app.report = app.generator.generate_level(&mut app.renderer);
                }
                _ => {}
            }
        }

        let hud = app.hud();
        app.renderer.draw(&hud)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
