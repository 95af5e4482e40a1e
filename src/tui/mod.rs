mod help;
mod state;
mod theory;

use crate::api::ApiClient;
use crate::cli::Cli;
use crate::model::{ClientEvent, GcdResult, PlaybackSpeed};
use crate::orchestrator::{self, UiCommand};
use crate::playback::Playback;
use crate::session::SessionStore;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use help::draw_help;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap},
    Terminal,
};
use state::{AuthField, AuthMode, CalcField, UiState};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the
    // controller; traffic is one command per keypress at most.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<ClientEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let client = ApiClient::new(&args.base_url, Duration::from(args.timeout))?;
    let store = SessionStore::open_default();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the
    // Tokio runtime.
    let ui_args = args.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, event_rx, cmd_tx));

    let res = orchestrator::run_controller(client, store, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    args: Cli,
    mut event_rx: UnboundedReceiver<ClientEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState::new(args.speed);
    state.info = "Log in or register to start".into();

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            let logged_in = matches!(ev, ClientEvent::AuthOk { .. });
            state.apply_event(ev);
            if logged_in {
                // Warm the history cache right after authentication.
                state.history_pending = true;
                let _ = cmd_tx.send(UiCommand::LoadHistory);
            }
        }

        state.maybe_tick();

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &mut state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if k.modifiers == KeyModifiers::CONTROL && k.code == KeyCode::Char('c') {
                    let _ = cmd_tx.send(UiCommand::Quit);
                    break Ok(());
                }
                let quit = if state.authenticated() {
                    handle_main_key(&mut state, k, &cmd_tx)
                } else {
                    handle_login_key(&mut state, k, &cmd_tx)
                };
                if quit {
                    let _ = cmd_tx.send(UiCommand::Quit);
                    break Ok(());
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Login screen keys. Returns true to quit.
fn handle_login_key(state: &mut UiState, k: KeyEvent, cmd_tx: &UnboundedSender<UiCommand>) -> bool {
    match (k.modifiers, k.code) {
        (_, KeyCode::Esc) => return true,
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
            state.auth_mode = match state.auth_mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            };
        }
        (_, KeyCode::Tab) | (_, KeyCode::Up) | (_, KeyCode::Down) => {
            state.auth_field = match state.auth_field {
                AuthField::Email => AuthField::Password,
                AuthField::Password => AuthField::Email,
            };
        }
        (_, KeyCode::Backspace) => {
            match state.auth_field {
                AuthField::Email => state.email_input.pop(),
                AuthField::Password => state.password_input.pop(),
            };
        }
        (_, KeyCode::Enter) => {
            if state.auth_pending {
                return false;
            }
            let email = state.email_input.trim().to_string();
            let password = state.password_input.clone();
            if email.is_empty() || password.is_empty() {
                state.info = "Email and password are required".into();
                return false;
            }
            state.auth_pending = true;
            state.info = "Authenticating…".into();
            let cmd = match state.auth_mode {
                AuthMode::Login => UiCommand::Login { email, password },
                AuthMode::Register => UiCommand::Register { email, password },
            };
            let _ = cmd_tx.send(cmd);
        }
        (_, KeyCode::Char(c)) => {
            if !c.is_control() && !k.modifiers.contains(KeyModifiers::CONTROL) {
                match state.auth_field {
                    AuthField::Email => state.email_input.push(c),
                    AuthField::Password => state.password_input.push(c),
                }
            }
        }
        _ => {}
    }
    false
}

/// Main screen keys. Returns true to quit.
fn handle_main_key(state: &mut UiState, k: KeyEvent, cmd_tx: &UnboundedSender<UiCommand>) -> bool {
    // Globals first.
    match (k.modifiers, k.code) {
        (_, KeyCode::Char('q')) => return true,
        (KeyModifiers::CONTROL, KeyCode::Char('l')) => {
            let _ = cmd_tx.send(UiCommand::Logout);
            return false;
        }
        (_, KeyCode::Tab) => {
            state.tab = (state.tab + 1) % 4;
            return false;
        }
        (_, KeyCode::Char('?')) => {
            state.tab = 3;
            return false;
        }
        _ => {}
    }

    match state.tab {
        0 => handle_calculate_key(state, k, cmd_tx),
        1 => handle_history_key(state, k, cmd_tx),
        2 => handle_theory_key(state, k),
        _ => {}
    }
    false
}

fn handle_calculate_key(state: &mut UiState, k: KeyEvent, cmd_tx: &UnboundedSender<UiCommand>) {
    if state.result.is_some() {
        handle_visualizer_key(state, k);
        return;
    }

    match k.code {
        KeyCode::Up | KeyCode::Down => {
            state.calc_field = match state.calc_field {
                CalcField::A => CalcField::B,
                CalcField::B => CalcField::A,
            };
        }
        KeyCode::Backspace => {
            match state.calc_field {
                CalcField::A => state.input_a.pop(),
                CalcField::B => state.input_b.pop(),
            };
        }
        KeyCode::Esc => {
            state.input_a.clear();
            state.input_b.clear();
            state.calc_field = CalcField::A;
        }
        KeyCode::Enter => {
            if state.calc_pending {
                return;
            }
            // Positive integers only; rejected before any request goes out.
            let a = state.input_a.parse::<u64>().unwrap_or(0);
            let b = state.input_b.parse::<u64>().unwrap_or(0);
            if a == 0 || b == 0 {
                state.info = "Both numbers must be positive integers.".into();
                return;
            }
            state.calc_pending = true;
            state.info = format!("Calculating GCD({a}, {b})…");
            let _ = cmd_tx.send(UiCommand::Calculate { a, b });
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let field = match state.calc_field {
                CalcField::A => &mut state.input_a,
                CalcField::B => &mut state.input_b,
            };
            if field.len() < 12 {
                field.push(c);
            }
        }
        _ => {}
    }
}

fn handle_visualizer_key(state: &mut UiState, k: KeyEvent) {
    match k.code {
        KeyCode::Char(' ') => state.playback_toggle(),
        KeyCode::Right | KeyCode::Char('l') => state.playback_next(),
        KeyCode::Left | KeyCode::Char('h') => state.playback_previous(),
        KeyCode::Char('1') => state.speed = PlaybackSpeed::Half,
        KeyCode::Char('2') => state.speed = PlaybackSpeed::Normal,
        KeyCode::Char('3') => state.speed = PlaybackSpeed::Double,
        KeyCode::Char('r') => {
            state.clear_result();
            state.info = "New calculation".into();
        }
        KeyCode::Char('e') => {
            if let Some(result) = state.result.clone() {
                match export_result(&result) {
                    Ok(path) => {
                        let path_str = path.to_string_lossy().to_string();
                        state.last_exported_path = Some(path_str);
                        state.info =
                            format!("Exported JSON: {} (press 'y' to copy path)", path.display());
                    }
                    Err(e) => state.info = format!("JSON export failed: {e:#}"),
                }
            }
        }
        KeyCode::Char('y') => copy_exported_path(state),
        _ => {}
    }
}

fn handle_history_key(state: &mut UiState, k: KeyEvent, cmd_tx: &UnboundedSender<UiCommand>) {
    match k.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if !state.history.is_empty() && state.history_selected > 0 {
                state.history_selected -= 1;
                if state.history_selected < state.history_scroll_offset {
                    state.history_scroll_offset = state.history_selected;
                }
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if !state.history.is_empty()
                && state.history_selected < state.history.len().saturating_sub(1)
            {
                state.history_selected += 1;
                let rows = state.history_viewport_rows.max(1);
                if state.history_selected >= state.history_scroll_offset + rows {
                    state.history_scroll_offset =
                        state.history_selected.saturating_sub(rows - 1);
                }
            }
        }
        KeyCode::Enter => {
            if let Some(item) = state.selected_history_item() {
                let _ = cmd_tx.send(UiCommand::LoadHistoryItem { id: item.id });
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = state.selected_history_item().map(|item| item.id) {
                state.info = format!("Deleting #{}…", id);
                let _ = cmd_tx.send(UiCommand::DeleteHistory { id });
            }
        }
        KeyCode::Char('r') => {
            if !state.history_pending {
                state.history_pending = true;
                state.info = "Refreshing history…".into();
                let _ = cmd_tx.send(UiCommand::LoadHistory);
            }
        }
        KeyCode::Char('e') => {
            if let Some(item) = state.selected_history_item().cloned() {
                let export = crate::storage::default_export_path(item.a, item.b, Some(item.id))
                    .and_then(|path| {
                        crate::storage::export_json(&path, &item)?;
                        Ok(path)
                    });
                match export {
                    Ok(path) => {
                        let path_str = path.to_string_lossy().to_string();
                        state.last_exported_path = Some(path_str);
                        state.info =
                            format!("Exported JSON: {} (press 'y' to copy path)", path.display());
                    }
                    Err(e) => state.info = format!("JSON export failed: {e:#}"),
                }
            }
        }
        KeyCode::Char('y') => copy_exported_path(state),
        _ => {}
    }
}

fn handle_theory_key(state: &mut UiState, k: KeyEvent) {
    match k.code {
        KeyCode::Left => {
            state.theory_section =
                (state.theory_section + theory::SECTION_COUNT - 1) % theory::SECTION_COUNT;
            state.theory_scroll = 0;
        }
        KeyCode::Right => {
            state.theory_section = (state.theory_section + 1) % theory::SECTION_COUNT;
            state.theory_scroll = 0;
        }
        KeyCode::Char(c @ '1'..='3') => {
            state.theory_section = (c as usize - '1' as usize).min(theory::SECTION_COUNT - 1);
            state.theory_scroll = 0;
        }
        KeyCode::Up => state.theory_scroll = state.theory_scroll.saturating_sub(1),
        KeyCode::Down => state.theory_scroll = state.theory_scroll.saturating_add(1),
        _ => {}
    }
}

fn export_result(result: &GcdResult) -> Result<std::path::PathBuf> {
    let path = crate::storage::default_export_path(result.a, result.b, None)?;
    crate::storage::export_json(&path, result)?;
    Ok(path)
}

fn copy_exported_path(state: &mut UiState) {
    if let Some(path) = state.last_exported_path.clone() {
        match copy_to_clipboard(&path) {
            Ok(()) => state.info = format!("Copied to clipboard: {path}"),
            Err(e) => state.info = format!("Clipboard copy failed: {e:#}"),
        }
    } else {
        state.info = "No exported file path to copy. Export a file first (e)".into();
    }
}

/// Copy text to the clipboard from a short-lived thread. The instance stays
/// alive briefly so Linux clipboard managers can read the contents.
fn copy_to_clipboard(text: &str) -> Result<()> {
    let text = text.to_string();
    std::thread::spawn(move || {
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            if clipboard.set_text(text).is_ok() {
                std::thread::sleep(Duration::from_secs(2));
            }
        }
    });
    Ok(())
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &mut UiState) {
    if !state.authenticated() {
        draw_login(area, f, state);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![
        Line::from("Calculate"),
        Line::from("History"),
        Line::from("Theory"),
        Line::from("Help"),
    ])
    .select(state.tab)
    .block(Block::default().borders(Borders::ALL).title(format!(
        "euclid-cli — {}",
        state.session_email.as_deref().unwrap_or("")
    )))
    .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_calculate(chunks[1], f, state),
        1 => draw_history(chunks[1], f, state),
        2 => theory::draw_theory(chunks[1], f, state.theory_section, state.theory_scroll),
        _ => draw_help(chunks[1], f),
    }
}

fn draw_login(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(14),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(48),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(vertical[1]);
    let boxed = horizontal[1];

    let mode = match state.auth_mode {
        AuthMode::Login => "Log in",
        AuthMode::Register => "Register",
    };
    let field_style = |active: bool| {
        if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let masked = "•".repeat(state.password_input.chars().count());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Euclid GCD visualizer",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Email:    ",
                field_style(state.auth_field == AuthField::Email),
            ),
            Span::raw(state.email_input.clone()),
            Span::raw(if state.auth_field == AuthField::Email {
                "_"
            } else {
                ""
            }),
        ]),
        Line::from(vec![
            Span::styled(
                "Password: ",
                field_style(state.auth_field == AuthField::Password),
            ),
            Span::raw(masked),
            Span::raw(if state.auth_field == AuthField::Password {
                "_"
            } else {
                ""
            }),
        ]),
        Line::from(""),
        Line::from(Span::styled(&state.info, Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(vec![
            Span::styled("enter", Style::default().fg(Color::Magenta)),
            Span::raw(format!(" {mode}   ")),
            Span::styled("tab", Style::default().fg(Color::Magenta)),
            Span::raw(" switch field   "),
            Span::styled("Ctrl-R", Style::default().fg(Color::Magenta)),
            Span::raw(" login/register   "),
            Span::styled("esc", Style::default().fg(Color::Magenta)),
            Span::raw(" quit"),
        ]),
    ];

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(mode));
    f.render_widget(p, boxed);
}

fn draw_calculate(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    match (state.result.as_ref(), state.playback.as_ref()) {
        (Some(result), Some(pb)) => draw_visualizer(area, f, state, result, pb),
        _ => draw_calc_form(area, f, state),
    }
}

fn draw_calc_form(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let field_style = |active: bool| {
        if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let lines = vec![
        Line::from("Enter two positive integers to visualize the Euclidean algorithm."),
        Line::from(""),
        Line::from(vec![
            Span::styled("First number (a):  ", field_style(state.calc_field == CalcField::A)),
            Span::raw(state.input_a.clone()),
            Span::raw(if state.calc_field == CalcField::A { "_" } else { "" }),
        ]),
        Line::from(vec![
            Span::styled("Second number (b): ", field_style(state.calc_field == CalcField::B)),
            Span::raw(state.input_b.clone()),
            Span::raw(if state.calc_field == CalcField::B { "_" } else { "" }),
        ]),
        Line::from(""),
        Line::from(if state.calc_pending {
            Span::styled("Calculating…", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(&state.info, Style::default().fg(Color::Yellow))
        }),
        Line::from(""),
        Line::from(vec![
            Span::styled("enter", Style::default().fg(Color::Magenta)),
            Span::raw(" calculate   "),
            Span::styled("↑/↓", Style::default().fg(Color::Magenta)),
            Span::raw(" switch field   "),
            Span::styled("esc", Style::default().fg(Color::Magenta)),
            Span::raw(" clear"),
        ]),
    ];
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("GCD calculation"));
    f.render_widget(p, area);
}

fn draw_visualizer(
    area: Rect,
    f: &mut ratatui::Frame,
    state: &UiState,
    result: &GcdResult,
    pb: &Playback,
) {
    let Some(step) = result.steps.get(pb.index()) else {
        return;
    };

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // header: step counter + result banner
                Constraint::Length(3), // progress gauge
                Constraint::Length(5), // operand cells
                Constraint::Min(6),    // operation + explanation
                Constraint::Length(3), // status + controls
            ]
            .as_ref(),
        )
        .split(area);

    // Header
    let mut header = vec![Span::styled(
        format!("Step {} of {}", pb.index() + 1, pb.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    header.push(Span::raw("   "));
    header.push(if pb.is_playing() {
        Span::styled(
            format!("▶ playing ({})", state.speed.label()),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled(
            format!("⏸ paused ({})", state.speed.label()),
            Style::default().fg(Color::Gray),
        )
    });
    if pb.is_last() {
        header.push(Span::raw("   "));
        header.push(Span::styled(
            format!("GCD: {}", result.result),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let header_p = Paragraph::new(Line::from(header)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("GCD({}, {})", result.a, result.b)),
    );
    f.render_widget(header_p, main[0]);

    // Progress gauge
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio((pb.index() + 1) as f64 / pb.len() as f64);
    f.render_widget(gauge, main[1]);

    // Operand cells: a, b, remainder
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ]
            .as_ref(),
        )
        .split(main[2]);
    let cell = |value: String, title: &str, color: Color| {
        Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
    };
    f.render_widget(cell(step.a.to_string(), "a", Color::Cyan), cells[0]);
    f.render_widget(cell(step.b.to_string(), "b", Color::Magenta), cells[1]);
    let remainder = step
        .remainder
        .map(|r| r.to_string())
        .unwrap_or_else(|| "—".to_string());
    f.render_widget(cell(remainder, "remainder", Color::LightRed), cells[2]);

    // Operation + explanation
    let mut body = vec![
        Line::from(Span::styled(
            step.operation_label(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(step.explanation_text()),
    ];
    if let (Some(q), Some(r)) = (step.quotient, step.remainder) {
        body.push(Line::from(""));
        body.push(Line::from(vec![
            Span::styled("quotient ", Style::default().fg(Color::Magenta)),
            Span::raw(q.to_string()),
            Span::raw("    "),
            Span::styled("remainder ", Style::default().fg(Color::LightRed)),
            Span::raw(r.to_string()),
        ]));
    }
    if pb.is_last() {
        body.push(Line::from(""));
        body.push(Line::from(Span::styled(
            format!(
                "Algorithm complete. The GCD of {} and {} is {}.",
                result.a, result.b, result.result
            ),
            Style::default().fg(Color::Cyan),
        )));
    }
    let body_p = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Operation"));
    f.render_widget(body_p, main[3]);

    // Status + controls
    let status = Paragraph::new(Line::from(vec![
        Span::styled("space", Style::default().fg(Color::Magenta)),
        Span::raw(" play/pause  "),
        Span::styled("←/→", Style::default().fg(Color::Magenta)),
        Span::raw(" step  "),
        Span::styled("1/2/3", Style::default().fg(Color::Magenta)),
        Span::raw(" speed  "),
        Span::styled("r", Style::default().fg(Color::Magenta)),
        Span::raw(" new  "),
        Span::styled("e", Style::default().fg(Color::Magenta)),
        Span::raw(" export   "),
        Span::styled(&state.info, Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main[4]);
}

fn draw_history(area: Rect, f: &mut ratatui::Frame, state: &mut UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(area);

    let visible_rows = (chunks[0].height as usize).saturating_sub(2).max(1);
    state.history_viewport_rows = visible_rows;
    state.clamp_history_scroll(visible_rows);
    let start = state.history_scroll_offset.min(state.history.len());
    let end = (start + visible_rows).min(state.history.len());

    let mut lines: Vec<Line> = Vec::new();
    if state.history.is_empty() {
        lines.push(Line::from(if state.history_pending {
            "Loading history…"
        } else {
            "No calculations yet. Run one from the Calculate tab."
        }));
    }
    for (offset, item) in state.history[start..end].iter().enumerate() {
        let idx = start + offset;
        let text = format!(
            "#{:<6} GCD({}, {}) = {}   {} step(s)   {}",
            item.id,
            item.a,
            item.b,
            item.result,
            item.steps.len(),
            format_timestamp(&item.created_at)
        );
        let line = if idx == state.history_selected {
            Line::from(Span::styled(
                text,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::raw(text))
        };
        lines.push(line);
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("History ({})", state.history.len())),
    );
    f.render_widget(list, chunks[0]);

    let status = Paragraph::new(Line::from(vec![
        Span::styled("enter", Style::default().fg(Color::Magenta)),
        Span::raw(" open  "),
        Span::styled("d", Style::default().fg(Color::Magenta)),
        Span::raw(" delete  "),
        Span::styled("r", Style::default().fg(Color::Magenta)),
        Span::raw(" refresh  "),
        Span::styled("e", Style::default().fg(Color::Magenta)),
        Span::raw(" export   "),
        Span::styled(&state.info, Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);
}

/// Render the service's RFC3339 timestamp in a compact local form, falling
/// back to the raw string when parsing fails.
fn format_timestamp(raw: &str) -> String {
    use time::format_description::well_known::Rfc3339;
    match time::OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(ts) => {
            let format = time::macros::format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            );
            ts.format(&format).unwrap_or_else(|_| raw.to_string())
        }
        Err(_) => raw.to_string(),
    }
}
