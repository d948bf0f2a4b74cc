use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use kadens::app::{App, AppState, Settings};
use kadens::config::{Config, ConfigStore, FileConfigStore};
use kadens::corpus::Tier;
use kadens::runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner, TICK_RATE_MS};

/// tiered paragraph typing trainer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type fixed paragraphs against a countdown clock. Three difficulty tiers, live wpm/cpm/accuracy while you type, and a results chart when the clock runs out or the paragraph is done."
)]
pub struct Cli {
    /// difficulty tier to draw paragraphs from
    #[clap(short = 't', long, value_enum)]
    tier: Option<Tier>,

    /// seconds on the countdown clock
    #[clap(short = 's', long)]
    secs: Option<f64>,

    /// custom paragraph to type instead of one from the bank
    #[clap(short = 'p', long)]
    paragraph: Option<String>,

    /// disable word wrapping of the paragraph
    #[clap(long)]
    no_wrap: bool,
}

impl Cli {
    /// Stored config provides the defaults; flags given on the command line
    /// win for this run.
    fn to_settings(&self, cfg: &Config) -> Settings {
        let mut settings = Settings::from_config(cfg);
        if let Some(tier) = self.tier {
            settings.tier = tier;
        }
        if let Some(secs) = self.secs {
            settings.time_limit_secs = secs;
        }
        if self.no_wrap {
            settings.word_wrap = false;
        }
        settings.custom_text = self.paragraph.clone().filter(|p| !p.is_empty());
        settings
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let settings = cli.to_settings(&store.load());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings);
    let res = run_app(&mut terminal, &mut app, &store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &FileConfigStore,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if key.code == KeyCode::Esc
                    || (key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c'))
                {
                    break;
                }

                if app.state == AppState::Typing && app.session.is_running() {
                    if let KeyCode::Char(c) = key.code {
                        app.keystroke(c);
                    }
                    continue;
                }

                // Outside a running attempt the keys are all controls.
                match key.code {
                    KeyCode::Enter => app.begin(),
                    KeyCode::Char('r') => app.retry(),
                    KeyCode::Char('n') => app.next_paragraph(),
                    KeyCode::Char('w') => {
                        app.toggle_word_wrap();
                        let _ = store.save(&Config::from(&app.settings));
                    }
                    KeyCode::Char('1') => switch_tier(app, store, Tier::Easy),
                    KeyCode::Char('2') => switch_tier(app, store, Tier::Medium),
                    KeyCode::Char('3') => switch_tier(app, store, Tier::Hard),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn switch_tier(app: &mut App, store: &FileConfigStore, tier: Tier) {
    app.switch_tier(tier);
    let _ = store.save(&Config::from(&app.settings));
}
