use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use indoc::indoc;
use ratatui::layout::Rect as TermRect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Widget, Wrap};

use term_dock::drivers::InputDriver;
use term_dock::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_dock::event_loop::{ControlFlow, EventLoop};
use term_dock::input::MouseRouter;
use term_dock::render::{render_dock, render_floating_frame};
use term_dock::theme::DockTheme;
use term_dock::{
    DockConfig, DockEvent, DockHost, DockManager, EventResponse, FrameId, LayoutSnapshot, Pane,
    PaneState, Point, Rect, Size,
};

type WindowId = usize;

const HELP: &str = indoc! {"
    Drag captions to float panes, drag frames onto an edge to dock them.
    Drag sashes to resize. Caption buttons close or maximize.

    s  save perspective     l  load perspective
    w  write layout file    r  read layout file
    1-5  toggle a pane      q  quit
"};

#[derive(Parser, Debug)]
#[command(name = "term-dock", about = "Docking pane layout demo for the terminal")]
struct Cli {
    /// JSON manager configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON layout file read at startup and written with `w`.
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    term_dock::tracing_sub::init_default(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => DockConfig::load(path).map_err(io::Error::other)?,
        None => DockConfig::default(),
    };

    let mut output = ConsoleOutputDriver::new()?;
    let size = output.terminal().size()?;
    let host = TerminalHost::new(Size::new(size.width as i32, size.height as i32));
    let mut app = App::new(DockManager::new(host, config), cli.layout);
    app.populate();

    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;
    let mut event_loop = EventLoop::new(input, Duration::from_millis(16));
    let result = event_loop.run(|_, event| app.step(&mut output, event));
    output.exit()?;
    result
}

struct DemoWindow {
    body: String,
    shown: bool,
    rect: Rect,
    best: Size,
}

struct FloatingFrame {
    window: WindowId,
    rect: Rect,
    shown: bool,
    title: String,
}

/// Host that keeps every window and floating frame inside the terminal.
struct TerminalHost {
    size: Size,
    windows: Vec<DemoWindow>,
    frames: BTreeMap<FrameId, FloatingFrame>,
    next_frame: u64,
}

impl TerminalHost {
    fn new(size: Size) -> Self {
        Self {
            size,
            windows: Vec::new(),
            frames: BTreeMap::new(),
            next_frame: 1,
        }
    }

    fn add_window(&mut self, body: &str, best: Size) -> WindowId {
        self.windows.push(DemoWindow {
            body: body.to_string(),
            shown: true,
            rect: Rect::default(),
            best,
        });
        self.windows.len() - 1
    }
}

impl DockHost<WindowId> for TerminalHost {
    fn client_size(&self) -> Size {
        self.size
    }

    fn reserved_height(&self) -> i32 {
        1
    }

    fn window_size(&self, window: WindowId) -> Size {
        self.windows
            .get(window)
            .map_or(Size::DEFAULT, |w| w.best)
    }

    fn is_window_shown(&self, window: WindowId) -> bool {
        self.windows.get(window).is_some_and(|w| w.shown)
    }

    fn show_window(&mut self, window: WindowId, show: bool) {
        if let Some(w) = self.windows.get_mut(window) {
            w.shown = show;
        }
    }

    fn place_window(&mut self, window: WindowId, rect: Rect) {
        if let Some(w) = self.windows.get_mut(window) {
            w.rect = rect;
        }
    }

    fn create_floating_frame(&mut self, pane: &Pane<WindowId>) -> FrameId {
        let id = FrameId(self.next_frame);
        self.next_frame += 1;
        let size = if pane.floating_size.width > 0 && pane.floating_size.height > 0 {
            pane.floating_size
        } else {
            Size::new(pane.best_size.width.max(16) + 2, pane.best_size.height.max(4) + 2)
        };
        let pos = if pane.floating_pos.is_default() {
            Point::new(self.size.width / 4, self.size.height / 4)
        } else {
            pane.floating_pos
        };
        let window = pane.window().unwrap_or_default();
        self.frames.insert(
            id,
            FloatingFrame {
                window,
                rect: Rect::from_parts(pos, size),
                shown: false,
                title: pane.caption.clone(),
            },
        );
        tracing::debug!(?id, window, "created floating frame");
        id
    }

    fn destroy_floating_frame(&mut self, frame: FrameId) {
        self.frames.remove(&frame);
    }

    fn floating_frame_rect(&self, frame: FrameId) -> Rect {
        self.frames.get(&frame).map_or(Rect::default(), |f| f.rect)
    }

    fn floating_frame_client_size(&self, frame: FrameId) -> Size {
        let rect = self.floating_frame_rect(frame);
        Size::new((rect.width - 2).max(0), (rect.height - 2).max(0))
    }

    fn floating_frame_client_origin(&self, _frame: FrameId) -> Point {
        Point::new(1, 1)
    }

    fn move_floating_frame(&mut self, frame: FrameId, pos: Point) {
        if let Some(f) = self.frames.get_mut(&frame) {
            f.rect.x = pos.x;
            f.rect.y = pos.y;
        }
    }

    fn resize_floating_frame(&mut self, frame: FrameId, size: Size) {
        if let Some(f) = self.frames.get_mut(&frame) {
            f.rect.width = size.width;
            f.rect.height = size.height;
        }
    }

    fn set_floating_frame_client_size(&mut self, frame: FrameId, size: Size) {
        self.resize_floating_frame(frame, Size::new(size.width + 2, size.height + 2));
    }

    fn is_floating_frame_shown(&self, frame: FrameId) -> bool {
        self.frames.get(&frame).is_some_and(|f| f.shown)
    }

    fn show_floating_frame(&mut self, frame: FrameId, show: bool) {
        if let Some(f) = self.frames.get_mut(&frame) {
            f.shown = show;
        }
    }

    fn set_floating_frame_title(&mut self, frame: FrameId, title: &str) {
        if let Some(f) = self.frames.get_mut(&frame) {
            f.title = title.to_string();
        }
    }
}

struct App {
    manager: DockManager<WindowId, TerminalHost>,
    router: MouseRouter<WindowId>,
    theme: DockTheme,
    layout_path: Option<PathBuf>,
    saved_perspective: Option<String>,
    status: String,
}

impl App {
    fn new(manager: DockManager<WindowId, TerminalHost>, layout_path: Option<PathBuf>) -> Self {
        Self {
            manager,
            router: MouseRouter::new(),
            theme: DockTheme::default(),
            layout_path,
            saved_perspective: None,
            status: "press ? for help".to_string(),
        }
    }

    fn populate(&mut self) {
        let host = self.manager.host_mut();
        let editor = host.add_window(HELP, Size::new(40, 10));
        let files = host.add_window("src/\ntests/\nCargo.toml", Size::new(20, 10));
        let outline = host.add_window("fn main\nstruct App", Size::new(20, 8));
        let output = host.add_window("build ok", Size::new(40, 5));
        let tools = host.add_window("[run] [stop]", Size::new(16, 1));

        self.manager
            .add_pane(editor, Pane::new().name("editor").center_pane());
        self.manager.add_pane(
            files,
            Pane::new()
                .name("files")
                .caption("Files")
                .left()
                .maximize_button(true),
        );
        self.manager.add_pane(
            outline,
            Pane::new()
                .name("outline")
                .caption("Outline")
                .left()
                .position(1)
                .min_size(Size::new(10, 3)),
        );
        self.manager.add_pane(
            output,
            Pane::new()
                .name("output")
                .caption("Output")
                .bottom()
                .pin_button(true),
        );
        self.manager.add_pane(
            tools,
            Pane::new()
                .name("tools")
                .caption("Tools")
                .toolbar_pane()
                .top()
                .gripper(true),
        );
        self.manager.set_event_sink(|event: &DockEvent<WindowId>| {
            tracing::debug!(?event, "dock event");
            EventResponse::Proceed
        });

        if let Some(path) = &self.layout_path {
            if path.exists() {
                match LayoutSnapshot::load(path) {
                    Ok(snapshot) => self.manager.load_layout(&snapshot),
                    Err(err) => tracing::warn!(%err, path = %path.display(), "could not read layout"),
                }
            }
        }
        self.manager.update();
    }

    fn step(
        &mut self,
        output: &mut ConsoleOutputDriver,
        event: Option<Event>,
    ) -> io::Result<ControlFlow> {
        let idle = event.is_none();
        match event {
            Some(Event::Key(key)) => {
                if self.handle_key(key) {
                    return Ok(ControlFlow::Quit);
                }
            }
            Some(Event::Resize(width, height)) => {
                self.manager.host_mut().size = Size::new(width as i32, height as i32);
                self.router.handle_event(&mut self.manager, &Event::Resize(width, height));
            }
            Some(event) => {
                self.router.handle_event(&mut self.manager, &event);
            }
            None => {
                self.manager.tick(Instant::now());
            }
        }
        self.manager.update_if_dirty();
        if self.manager.take_repaint() || idle {
            self.draw(output)?;
        }
        Ok(ControlFlow::Continue)
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('s') => {
                self.saved_perspective = Some(self.manager.save_perspective());
                self.status = "perspective saved".to_string();
            }
            KeyCode::Char('l') => {
                self.status = match self.saved_perspective.clone() {
                    Some(text) if self.manager.load_perspective(&text, true) => {
                        "perspective restored".to_string()
                    }
                    Some(_) => "perspective rejected".to_string(),
                    None => "nothing saved yet".to_string(),
                };
            }
            KeyCode::Char('w') => self.write_layout(),
            KeyCode::Char('r') => self.read_layout(),
            KeyCode::Char('?') => self.status = HELP.lines().next().unwrap_or_default().to_string(),
            KeyCode::Char(c @ '1'..='5') => {
                let window = c as usize - '1' as usize;
                let id = self.manager.pane(window).map(Pane::id);
                if let Some(id) = id {
                    self.manager.edit_pane(id, |pane| {
                        let shown = pane.is_shown();
                        pane.set_flag(PaneState::HIDDEN, shown);
                    });
                    self.manager.update();
                }
            }
            _ => {}
        }
        false
    }

    fn write_layout(&mut self) {
        let Some(path) = &self.layout_path else {
            self.status = "no --layout file given".to_string();
            return;
        };
        self.status = match self.manager.save_layout().save(path) {
            Ok(()) => format!("layout written to {}", path.display()),
            Err(err) => format!("write failed: {err}"),
        };
    }

    fn read_layout(&mut self) {
        let Some(path) = &self.layout_path else {
            self.status = "no --layout file given".to_string();
            return;
        };
        self.status = match LayoutSnapshot::load(path) {
            Ok(snapshot) => {
                self.manager.load_layout(&snapshot);
                self.manager.update();
                format!("layout read from {}", path.display())
            }
            Err(err) => format!("read failed: {err}"),
        };
    }

    fn draw(&mut self, output: &mut ConsoleOutputDriver) -> io::Result<()> {
        let manager = &self.manager;
        let theme = &self.theme;
        let status = &self.status;
        output.terminal().draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            render_dock(manager, area, buf, theme);

            let host = manager.host();
            for pane in manager.all_panes() {
                if !pane.is_docked() || !pane.is_shown() {
                    continue;
                }
                let window = pane.window().and_then(|window| host.windows.get(window));
                if let Some(window) = window {
                    let rect = window.rect.to_term().intersection(area);
                    Paragraph::new(window.body.as_str())
                        .wrap(Wrap { trim: false })
                        .render(rect, buf);
                }
            }

            for frame_state in host.frames.values().filter(|f| f.shown) {
                let active = manager
                    .pane(frame_state.window)
                    .is_some_and(Pane::is_active);
                let inner =
                    render_floating_frame(frame_state.rect, &frame_state.title, active, buf, theme);
                let close = TermRect::new(
                    frame_state.rect.right().saturating_sub(1).max(0) as u16,
                    frame_state.rect.y.max(0) as u16,
                    1,
                    1,
                )
                .intersection(area);
                if close.width > 0 {
                    buf.set_string(close.x, close.y, "×", theme.caption(active));
                }
                if let Some(window) = host.windows.get(frame_state.window) {
                    Paragraph::new(window.body.as_str())
                        .wrap(Wrap { trim: false })
                        .render(inner, buf);
                }
            }

            if area.height > 0 {
                let line = TermRect::new(area.x, area.bottom() - 1, area.width, 1);
                Paragraph::new(status.as_str())
                    .style(Style::default().bg(theme.caption_bg).fg(theme.caption_fg))
                    .render(line, buf);
            }
        })?;
        Ok(())
    }
}
