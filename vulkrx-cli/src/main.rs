use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::{LevelFilter, warn};

use vulkrx::db::DB_FILE_NAME;
use vulkrx::db::models::{NewWorkoutRecord, WorkoutRecord};
use vulkrx::logging::{Target, init_logger, parse_level};
use vulkrx::navigation::Route;
use vulkrx::session::Session;
use vulkrx::shell::{Shell, View};

use crossterm::event::{self, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

#[derive(Parser, Debug)]
#[command(version, about = "Vulkrx - Workout Tracker CLI", long_about = None)]
struct Args {
    /// Database file, created on first use
    #[arg(long, global = true, env = "DATABASE_URL", default_value = DB_FILE_NAME)]
    db_path: String,
    /// off, error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the Home/Workout screens (default)
    Interactive,
    /// Create the database if needed and print the workouts schema
    Init,
    /// Record a workout from explicit fields
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        sets: Option<i64>,
        #[arg(short, long)]
        reps: Option<i64>,
        #[arg(short, long)]
        weight: Option<f64>,
    },
    /// Record a workout from a line like "Bench Press 3x10 @60kg"
    Log { entry: String },
    /// List all workouts from the database
    List {
        #[arg(short, long)]
        verbose: bool,
        #[arg(long)]
        json: bool,
    },
}

const HOME_HINTS: &str = "w: workouts | q: quit";
const WORKOUT_HINTS: &str = "j/k: navigate | a: add | d: delete | b: back | q: quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Navigate(Route),
    Back,
    ScrollUp,
    ScrollDown,
    StartAdd,
    Delete,
    Ignore,
}

fn screen_action(route: Route, code: KeyCode) -> Action {
    match (route, code) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Char('Q')) => Action::Quit,
        (Route::Home, KeyCode::Char('w')) | (Route::Home, KeyCode::Char('W')) => {
            Action::Navigate(Route::Workout)
        }
        (Route::Home, KeyCode::Enter) => Action::Navigate(Route::Workout),
        (Route::Workout, KeyCode::Char('b'))
        | (Route::Workout, KeyCode::Char('B'))
        | (Route::Workout, KeyCode::Esc) => Action::Back,
        (Route::Workout, KeyCode::Char('j')) | (Route::Workout, KeyCode::Down) => {
            Action::ScrollDown
        }
        (Route::Workout, KeyCode::Char('k')) | (Route::Workout, KeyCode::Up) => Action::ScrollUp,
        (Route::Workout, KeyCode::Char('a')) | (Route::Workout, KeyCode::Char('A')) => {
            Action::StartAdd
        }
        (Route::Workout, KeyCode::Char('d')) | (Route::Workout, KeyCode::Char('D')) => {
            Action::Delete
        }
        _ => Action::Ignore,
    }
}

enum InputMode {
    Normal,
    AddingRecord,
}

struct WorkoutScreen {
    records: Vec<WorkoutRecord>,
    selected: usize,
    status_message: String,
    input_mode: InputMode,
    input_buffer: String,
}

impl WorkoutScreen {
    async fn load(session: &Session) -> Result<Self> {
        let records = session.get_all_workouts().await?;
        let status_message = if records.is_empty() {
            "No workouts yet. Press 'a' to add one, 'b' to go back".to_string()
        } else {
            WORKOUT_HINTS.to_string()
        };

        Ok(Self {
            records,
            selected: 0,
            status_message,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
        })
    }

    async fn refresh(&mut self, session: &Session) -> Result<()> {
        self.records = session.get_all_workouts().await?;
        if self.selected >= self.records.len() && !self.records.is_empty() {
            self.selected = self.records.len() - 1;
        }
        Ok(())
    }

    fn scroll_down(&mut self) {
        if !self.records.is_empty() && self.selected < self.records.len() - 1 {
            self.selected += 1;
        }
    }

    fn scroll_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::AddingRecord;
        self.input_buffer.clear();
        self.status_message =
            "Enter workout (e.g., 'Bench Press 3x10 @60kg'), Esc to cancel:".to_string();
    }

    fn leave_add_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.status_message = WORKOUT_HINTS.to_string();
    }

    async fn add_record(&mut self, session: &Session) -> Result<()> {
        let record = session.add_workout_from_string(&self.input_buffer).await?;
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.status_message = format!("Added: {}", record);

        self.refresh(session).await?;
        self.selected = self.records.len().saturating_sub(1);
        Ok(())
    }

    async fn delete_selected(&mut self, session: &Session) -> Result<()> {
        let Some(record) = self.records.get(self.selected) else {
            return Ok(());
        };
        let name = record.name.clone();

        session.delete_workout(record.id).await?;
        self.status_message = format!("Deleted workout: {}", name);

        self.refresh(session).await
    }
}

fn render_header(frame: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect, status: &str) {
    let footer = Paragraph::new(status.to_string())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(footer, area);
}

fn screen_chunks(frame: &Frame) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .areas(frame.area())
}

fn render_home(frame: &mut Frame, record_count: usize) {
    let [header, body, footer] = screen_chunks(frame);
    render_header(frame, header, "Vulkrx - Home");

    let welcome = Paragraph::new(format!(
        "Welcome back.\n\n{} workout{} logged so far.\nPress 'w' to open your workouts.",
        record_count,
        if record_count == 1 { "" } else { "s" }
    ))
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL).title("Home"));
    frame.render_widget(welcome, body);

    render_footer(frame, footer, HOME_HINTS);
}

fn render_workout(frame: &mut Frame, screen: &WorkoutScreen) {
    let [header, body, footer] = screen_chunks(frame);
    render_header(frame, header, "Vulkrx - Workout");

    match screen.input_mode {
        InputMode::Normal => {
            if screen.records.is_empty() {
                let empty_msg =
                    Paragraph::new("No workouts recorded yet.\nPress 'a' to add your first one!")
                        .style(Style::default().fg(Color::Gray))
                        .block(Block::default().borders(Borders::ALL).title("Workouts"));
                frame.render_widget(empty_msg, body);
            } else {
                let items: Vec<ListItem> = screen
                    .records
                    .iter()
                    .enumerate()
                    .map(|(idx, record)| {
                        let style = if idx == screen.selected {
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default()
                        };
                        ListItem::new(record.to_string()).style(style)
                    })
                    .collect();

                let list = List::new(items).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Workouts ({} total)", screen.records.len())),
                );

                let mut list_state = ListState::default();
                list_state.select(Some(screen.selected));
                frame.render_stateful_widget(list, body, &mut list_state);
            }
        }
        InputMode::AddingRecord => {
            let input_widget = Paragraph::new(screen.input_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title("New Workout"));
            frame.render_widget(input_widget, body);
        }
    }

    render_footer(frame, footer, &screen.status_message);
}

fn render_error(frame: &mut Frame, message: &str) {
    let [header, body, footer] = screen_chunks(frame);
    render_header(frame, header, "Vulkrx");

    let error = Paragraph::new(format!("Could not open the workout database.\n\n{}", message))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Error"));
    frame.render_widget(error, body);

    render_footer(frame, footer, "q: quit");
}

async fn run_shell(mut terminal: DefaultTerminal, mut shell: Shell) -> Result<()> {
    let mut workout_screen: Option<WorkoutScreen> = None;

    loop {
        let view = shell.view();
        let record_count = match (&view, shell.session()) {
            (View::Screen(Route::Home), Some(session)) => session.count_workouts().await?,
            _ => 0,
        };

        terminal.draw(|frame| match &view {
            View::Error(message) => render_error(frame, message),
            View::Screen(Route::Home) => render_home(frame, record_count),
            View::Screen(Route::Workout) => {
                if let Some(screen) = &workout_screen {
                    render_workout(frame, screen);
                }
            }
        })?;

        let event::Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let route = match view {
            View::Error(_) => {
                if screen_action(Route::Home, key.code) == Action::Quit {
                    return Ok(());
                }
                continue;
            }
            View::Screen(route) => route,
        };
        let Some(session) = shell.session() else {
            continue;
        };

        if let Some(screen) = workout_screen.as_mut() {
            if let InputMode::AddingRecord = screen.input_mode {
                match key.code {
                    KeyCode::Enter => {
                        if let Err(e) = screen.add_record(session).await {
                            warn!("Rejected workout entry {:?}: {:#}", screen.input_buffer, e);
                            screen.leave_add_mode();
                            screen.status_message = format!("Error adding workout: {}", e);
                        }
                    }
                    KeyCode::Esc => screen.leave_add_mode(),
                    KeyCode::Char(c) => screen.input_buffer.push(c),
                    KeyCode::Backspace => {
                        screen.input_buffer.pop();
                    }
                    _ => {}
                }
                continue;
            }
        }

        match screen_action(route, key.code) {
            Action::Quit => return Ok(()),
            Action::Navigate(target) => {
                let screen = WorkoutScreen::load(session).await?;
                if shell.navigate(target)? {
                    workout_screen = Some(screen);
                }
            }
            Action::Back => {
                shell.go_back()?;
                workout_screen = None;
            }
            Action::ScrollUp => {
                if let Some(screen) = workout_screen.as_mut() {
                    screen.scroll_up();
                }
            }
            Action::ScrollDown => {
                if let Some(screen) = workout_screen.as_mut() {
                    screen.scroll_down();
                }
            }
            Action::StartAdd => {
                if let Some(screen) = workout_screen.as_mut() {
                    screen.enter_add_mode();
                }
            }
            Action::Delete => {
                if let Some(screen) = workout_screen.as_mut() {
                    screen.delete_selected(session).await?;
                }
            }
            Action::Ignore => {}
        }
    }
}

fn print_records(records: &[WorkoutRecord], verbose: bool) {
    for record in records {
        if verbose {
            println!("{}, {}", record.id, record);
        } else {
            println!("{}, {}", record.id, record.name);
        }
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let level = parse_level(&args.log_level).unwrap_or(LevelFilter::Warn);
    init_logger(level, Target::Stderr);

    match args.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let shell = Shell::mount(&args.db_path).await;
            let terminal = ratatui::init();
            let result = run_shell(terminal, shell).await;
            ratatui::restore();
            result
        }
        Commands::Init => {
            let session = Session::new(&args.db_path).await?;
            println!("Initialized {}", args.db_path);
            for column in session.schema().await? {
                println!(
                    "  {} {}{}{}",
                    column.name,
                    column.decl_type,
                    if column.primary_key { " PRIMARY KEY" } else { "" },
                    if column.not_null { " NOT NULL" } else { "" }
                );
            }
            session.close().await;
            Ok(())
        }
        Commands::Add {
            name,
            sets,
            reps,
            weight,
        } => {
            let session = Session::new(&args.db_path).await?;
            let record = session
                .add_workout(&NewWorkoutRecord {
                    name,
                    sets,
                    reps,
                    weight,
                })
                .await?;
            println!("Added workout {}: {}", record.id, record);
            session.close().await;
            Ok(())
        }
        Commands::Log { entry } => {
            let session = Session::new(&args.db_path).await?;
            let record = session.add_workout_from_string(&entry).await?;
            println!("Added workout {}: {}", record.id, record);
            session.close().await;
            Ok(())
        }
        Commands::List { verbose, json } => {
            let session = Session::new(&args.db_path).await?;
            let records = session.get_all_workouts().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_records(&records, verbose);
            }
            session.close().await;
            Ok(())
        }
    }
}
