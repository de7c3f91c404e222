use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use notestack_config::Config;
use notestack_engine::{
    ApiHandle, ArticleFile, BlockRegistry, EditorSession, fallback_surfaces, io,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
    sync::Arc,
};

mod render;

struct App {
    notes_path: PathBuf,
    registry: Arc<BlockRegistry>,
    articles: Vec<ArticleFile>,
    list_state: ListState,
    scroll: u16,
    current_content: Vec<String>,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let index = io::build_article_index(&config.notes_path)?;
        let articles: Vec<ArticleFile> = index.articles().cloned().collect();

        let mut app = Self {
            notes_path: config.notes_path.clone(),
            registry: BlockRegistry::standard(&config.editor),
            articles,
            list_state: ListState::default(),
            scroll: 0,
            current_content: Vec::new(),
        };

        // Select first item if available
        if !app.articles.is_empty() {
            app.list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn next_article(&mut self) {
        if self.articles.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.articles.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_article(&mut self) {
        if self.articles.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.articles.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        self.scroll = 0;
        let Some(file) = self
            .list_state
            .selected()
            .and_then(|index| self.articles.get(index))
        else {
            return;
        };
        self.current_content = article_lines(file, &self.notes_path, &self.registry);
    }
}

/// Mount the article read-only and describe it as text
fn article_lines(file: &ArticleFile, notes_path: &Path, registry: &Arc<BlockRegistry>) -> Vec<String> {
    let article = match io::read_article(file.relative_path(), notes_path) {
        Ok(article) => article,
        Err(e) => return vec![format!("Error reading article: {e}")],
    };

    let underline = "=".repeat(article.title.chars().count().max(3));
    let mut lines = vec![article.title.clone(), underline, String::new()];

    let mut session = EditorSession::new(registry.clone(), ApiHandle::default());
    match session.mount(&article.content, true) {
        Ok(()) => lines.extend(render::document_lines(&session.surfaces())),
        Err(e) => {
            log::warn!("Showing {} without a session: {e}", file.display_path());
            lines.push(format!("[{e}]"));
            lines.push(String::new());
            let views = fallback_surfaces(&article.content, registry, &e);
            lines.extend(render::document_lines(&views));
        }
    }
    session.destroy();

    match io::read_comments(file, notes_path) {
        Ok(thread) if !thread.is_empty() => {
            lines.push(format!("--- {} comment(s) ---", thread.len()));
            for comment in thread.comments() {
                lines.push(format!(
                    "{}  {}",
                    comment.created_at.format("%Y-%m-%d %H:%M"),
                    comment.text
                ));
            }
        }
        Ok(_) => {}
        Err(e) => lines.push(format!("Error reading comments: {e}")),
    }

    lines
}

fn main() -> Result<()> {
    // Logging stays off unless asked for; it would draw over the TUI
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    // Determine notes path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();
    let program_name = args.first().map(String::as_str).unwrap_or("notestack-cli");

    if args.len() > 2 {
        eprintln!("Usage: {program_name} [notes-folder-path]");
        process::exit(1);
    }

    let file_config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {program_name} <notes-folder-path>");
            process::exit(1);
        }
    };
    let from_config = args.len() == 1;
    let notes_path = match Config::resolve_notes_path(args.get(1).cloned())? {
        Some(path) => path,
        None => {
            eprintln!("Error: No notes path provided and no config file found");
            eprintln!("Usage: {program_name} <notes-folder-path>");
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
    };
    let mut config = file_config.unwrap_or_else(|| Config::new(PathBuf::new()));
    config.notes_path = notes_path;

    // Validate notes directory using engine
    if let Err(e) = io::validate_notes_dir(&config.notes_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Notes path '{}'{} is invalid: {e}",
            config.notes_path.display(),
            source
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = App::new(&config).and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_article(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_article(),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll = app.scroll.saturating_add(10),
                KeyCode::PageUp => app.scroll = app.scroll.saturating_sub(10),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Article list panel
    let items: Vec<ListItem> = app
        .articles
        .iter()
        .map(|file| {
            let indent = "  ".repeat(file.categories().len());
            let label = match file.notebook() {
                Some(notebook) => format!("{indent}[{notebook}] {}", file.display_name()),
                None => file.display_name().to_string(),
            };
            ListItem::new(vec![Line::from(vec![Span::raw(label)])])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Articles"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, chunks[0], &mut app.list_state);

    // Content panel
    let content_text = if app.current_content.is_empty() {
        vec![Line::from("Select an article to view it")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Article"))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(content, chunks[1]);

    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Space/PgDn, PgUp: Scroll"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    // Place help at bottom
    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
