//! Terminal UI: the full save → processing → preview → reading → reflection
//! journey, plus the today and library lists.

pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEventKind;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use crate::api::validate_url;
use crate::app::{AppContext, ReadstashError, Result};
use crate::domain::ItemStatus;
use crate::flow::{self, NavDecision, Screen, MISSING_ITEM_MESSAGE};
use crate::poll::{spawn_status_watch, StatusWatch};

use self::app::{CompletionKind, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut app = TuiApp::new();
    let events = EventHandler::new(Duration::from_millis(100));
    let mut watch: Option<StatusWatch> = None;

    loop {
        terminal.draw(|frame| layout::render(frame, &mut app))?;

        match events.next()? {
            AppEvent::Key(key) if key.kind == KeyEventKind::Press => {
                let action = Action::from_key(key, app.text_entry());
                handle_action(&mut app, &ctx, &mut watch, action).await;
            }
            AppEvent::Key(_) | AppEvent::Tick => {}
        }

        drive_processing(&mut app, &ctx, &mut watch);

        if app.should_quit {
            break;
        }
    }

    if let Some(watch) = watch.take() {
        watch.stop().await;
    }
    Ok(())
}

/// Consume pending poll snapshots and advance the processing screen.
fn drive_processing(app: &mut TuiApp, ctx: &AppContext, watch: &mut Option<StatusWatch>) {
    if app.screen != Screen::Processing {
        return;
    }

    if let Some(active) = watch.as_mut() {
        while let Some(snapshot) = active.try_recv() {
            app.poll_attempts = snapshot.attempt;
            match snapshot.outcome {
                Ok(item) => {
                    let decision = flow::decide(item.status, ctx.poll.ready_delay);
                    app.active_item = Some(item);
                    match decision {
                        NavDecision::Stay => {}
                        NavDecision::Preview { after } => {
                            // First Ready observation wins; later snapshots
                            // must not push the deadline back.
                            if app.preview_at.is_none() {
                                app.preview_at = Some(Instant::now() + after);
                            }
                        }
                        NavDecision::Halt => {
                            app.processing_error =
                                Some("Please try another link.".to_string());
                        }
                    }
                }
                Err(err) => {
                    app.set_status(format!("status check failed ({}), retrying...", err));
                }
            }
        }
    }

    if app.processing_error.is_some() {
        cancel_watch(watch);
        return;
    }

    if let Some(at) = app.preview_at {
        if Instant::now() >= at {
            cancel_watch(watch);
            app.enter(Screen::Preview);
        }
    }
}

async fn handle_action(
    app: &mut TuiApp,
    ctx: &AppContext,
    watch: &mut Option<StatusWatch>,
    action: Action,
) {
    match action {
        Action::Quit => {
            app.should_quit = true;
            return;
        }
        Action::GoSave => {
            cancel_watch(watch);
            app.enter(Screen::Save);
            return;
        }
        Action::GoToday => {
            cancel_watch(watch);
            enter_today(app, ctx).await;
            return;
        }
        Action::GoLibrary => {
            cancel_watch(watch);
            enter_library(app, ctx).await;
            return;
        }
        _ => {}
    }

    match app.screen {
        Screen::Save => match action {
            Action::Input(c) => {
                app.url_input.push(c);
                app.form_error = None;
            }
            Action::Backspace => {
                app.url_input.pop();
                app.form_error = None;
            }
            Action::Select => submit_save(app, ctx, watch).await,
            Action::Back => enter_today(app, ctx).await,
            _ => {}
        },
        Screen::Processing => {
            if action == Action::Back {
                cancel_watch(watch);
                enter_today(app, ctx).await;
            }
        }
        Screen::Preview => match action {
            Action::Select | Action::MarkSkimmed => {
                if app.active_item.is_some() {
                    app.enter(Screen::Reading);
                }
            }
            Action::OpenInBrowser => open_in_browser(app),
            Action::Back => enter_today(app, ctx).await,
            _ => {}
        },
        Screen::Reading => match action {
            Action::MoveUp => app.move_up(),
            Action::MoveDown => app.move_down(),
            Action::MarkRead => {
                app.completion = Some(CompletionKind::Read);
                app.enter(Screen::Reflection);
            }
            Action::MarkSkimmed => {
                app.completion = Some(CompletionKind::Skimmed);
                app.enter(Screen::Reflection);
            }
            Action::OpenInBrowser => open_in_browser(app),
            Action::Back => app.enter(Screen::Preview),
            _ => {}
        },
        Screen::Reflection => match action {
            Action::RateYes => app.rating = Some(true),
            Action::RateNo => app.rating = Some(false),
            Action::Input(c) => app.note.push(c),
            Action::Backspace => {
                app.note.pop();
            }
            Action::Select | Action::Back => finish_reflection(app, ctx).await,
            _ => {}
        },
        Screen::TodaysReads | Screen::Library => match action {
            Action::MoveUp => app.move_up(),
            Action::MoveDown => app.move_down(),
            Action::Select => open_selected(app, ctx, watch).await,
            Action::OpenInBrowser => {
                if let Some(item) = app.selected_item() {
                    let url = item.url.clone();
                    browse(app, &url);
                }
            }
            _ => {}
        },
    }
}

async fn submit_save(app: &mut TuiApp, ctx: &AppContext, watch: &mut Option<StatusWatch>) {
    let url = match validate_url(&app.url_input) {
        Ok(url) => url,
        Err(err) => {
            app.form_error = Some(err.to_string());
            return;
        }
    };

    match ctx.api.create_item(&url).await {
        Ok(created) => {
            ctx.session
                .set(created.id.clone(), Some(url), Some(created.status));
            app.active_item = None;
            start_watch(app, ctx, watch, created.id);
        }
        Err(err) => {
            app.form_error = Some(err.to_string());
        }
    }
}

fn start_watch(app: &mut TuiApp, ctx: &AppContext, watch: &mut Option<StatusWatch>, id: String) {
    cancel_watch(watch);
    app.enter(Screen::Processing);
    *watch = Some(spawn_status_watch(
        ctx.api.clone(),
        id,
        ctx.session.clone(),
        ctx.poll,
    ));
}

/// Open the selected list entry, routing by its current status: unfinished
/// items go back to the processing screen, finished ones to the preview.
async fn open_selected(app: &mut TuiApp, ctx: &AppContext, watch: &mut Option<StatusWatch>) {
    let Some(selected) = app.selected_item() else {
        return;
    };
    let id = selected.id.clone();
    ctx.session.remember_id(&id);

    match ctx.api.get_item(&id).await {
        Ok(item) => match item.status {
            ItemStatus::Created | ItemStatus::Processing => {
                start_watch(app, ctx, watch, id);
                app.active_item = Some(item);
            }
            ItemStatus::Failed => {
                app.set_status("We couldn't process this article. Please try another link.");
            }
            ItemStatus::Ready | ItemStatus::Read => {
                app.active_item = Some(item);
                app.enter(Screen::Preview);
            }
        },
        Err(ReadstashError::NotFound(_)) => app.set_status(MISSING_ITEM_MESSAGE),
        Err(err) => app.set_status(format!("couldn't load item: {}", err)),
    }
}

/// Completion and the reflection answers stay local for now; the backend
/// has no endpoint to report them to.
async fn finish_reflection(app: &mut TuiApp, ctx: &AppContext) {
    if let (Some(kind), Some(item)) = (app.completion, app.active_item.as_mut()) {
        match kind {
            CompletionKind::Read => item.is_completed = Some(true),
            CompletionKind::Skimmed => item.is_skimmed = Some(true),
        }
        debug!(item = %item.id, ?kind, rating = ?app.rating, "reflection recorded");
    }
    app.completion = None;
    enter_today(app, ctx).await;
}

async fn enter_today(app: &mut TuiApp, ctx: &AppContext) {
    let fetched = ctx.api.list_items(Some(ItemStatus::Ready)).await;
    match fetched {
        Ok(items) => {
            app.items = items.into_iter().filter(|item| !item.is_done()).take(3).collect();
            app.enter(Screen::TodaysReads);
        }
        Err(err) => {
            app.items.clear();
            app.enter(Screen::TodaysReads);
            app.set_status(format!("couldn't load today's reads: {}", err));
        }
    }
}

async fn enter_library(app: &mut TuiApp, ctx: &AppContext) {
    let fetched = ctx.api.list_items(None).await;
    match fetched {
        Ok(items) => {
            app.items = items;
            app.enter(Screen::Library);
        }
        Err(err) => {
            app.items.clear();
            app.enter(Screen::Library);
            app.set_status(format!("couldn't load library: {}", err));
        }
    }
}

fn open_in_browser(app: &mut TuiApp) {
    let Some(url) = app.active_item.as_ref().map(|item| item.url.clone()) else {
        return;
    };
    browse(app, &url);
}

fn browse(app: &mut TuiApp, url: &str) {
    if let Err(err) = open::that(url) {
        app.set_status(format!("couldn't open browser: {}", err));
    }
}

fn cancel_watch(watch: &mut Option<StatusWatch>) {
    if let Some(active) = watch.take() {
        active.cancel();
    }
}
