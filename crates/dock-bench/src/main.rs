use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as TermRect;

use term_dock::render::render_dock;
use term_dock::theme::DockTheme;
use term_dock::{
    DockConfig, DockDirection, DockHost, DockManager, FrameId, Pane, Point, Rect, Size,
};

#[derive(Parser, Debug)]
#[command(
    name = "dock-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Times layout passes, drop-hint calculation and rendering on a synthetic layout"
)]
struct BenchCli {
    /// Number of docked panes besides the center pane.
    #[arg(short = 'p', long = "panes", default_value_t = 24)]
    panes: usize,

    /// Iterations per measured phase.
    #[arg(short = 'i', long = "iterations", default_value_t = 500)]
    iterations: u32,

    /// Width of the managed area in cells.
    #[arg(long = "width", default_value_t = 200)]
    width: u16,

    /// Height of the managed area in cells.
    #[arg(long = "height", default_value_t = 60)]
    height: u16,
}

struct BenchConfig {
    panes: usize,
    iterations: u32,
    area: Size,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=1_000).contains(&cli.panes) {
            return Err("panes must be between 1 and 1000".to_string());
        }
        if !(1..=1_000_000).contains(&cli.iterations) {
            return Err("iterations must be between 1 and 1000000".to_string());
        }
        if cli.width < 20 || cli.height < 10 {
            return Err("area must be at least 20x10 cells".to_string());
        }
        Ok(Self {
            panes: cli.panes,
            iterations: cli.iterations,
            area: Size::new(cli.width as i32, cli.height as i32),
        })
    }
}

/// In-memory host: windows have a fixed preferred size and frames are plain
/// rectangles.
struct BenchHost {
    size: Size,
    frames: Vec<(Rect, bool)>,
}

impl DockHost<usize> for BenchHost {
    fn client_size(&self) -> Size {
        self.size
    }

    fn window_size(&self, _window: usize) -> Size {
        Size::new(12, 4)
    }

    fn is_window_shown(&self, _window: usize) -> bool {
        true
    }

    fn show_window(&mut self, _window: usize, _show: bool) {}

    fn place_window(&mut self, _window: usize, _rect: Rect) {}

    fn create_floating_frame(&mut self, pane: &Pane<usize>) -> FrameId {
        self.frames
            .push((Rect::from_parts(pane.floating_pos, Size::new(20, 8)), false));
        FrameId(self.frames.len() as u64 - 1)
    }

    fn destroy_floating_frame(&mut self, _frame: FrameId) {}

    fn floating_frame_rect(&self, frame: FrameId) -> Rect {
        self.frames
            .get(frame.0 as usize)
            .map_or(Rect::default(), |(rect, _)| *rect)
    }

    fn move_floating_frame(&mut self, frame: FrameId, pos: Point) {
        if let Some((rect, _)) = self.frames.get_mut(frame.0 as usize) {
            rect.x = pos.x;
            rect.y = pos.y;
        }
    }

    fn resize_floating_frame(&mut self, frame: FrameId, size: Size) {
        if let Some((rect, _)) = self.frames.get_mut(frame.0 as usize) {
            rect.width = size.width;
            rect.height = size.height;
        }
    }

    fn is_floating_frame_shown(&self, frame: FrameId) -> bool {
        self.frames
            .get(frame.0 as usize)
            .is_some_and(|(_, shown)| *shown)
    }

    fn show_floating_frame(&mut self, frame: FrameId, show: bool) {
        if let Some((_, shown)) = self.frames.get_mut(frame.0 as usize) {
            *shown = show;
        }
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let mut manager = build_manager(&config);
    manager.update();

    let mut layout = PhaseStats::new("layout");
    for _ in 0..config.iterations {
        let start = Instant::now();
        manager.update();
        layout.record(start.elapsed());
    }

    let mut hints = PhaseStats::new("drop hint");
    let mut noise = Noise::seeded_from_clock();
    let dragged = config.panes;
    for _ in 0..config.iterations {
        let pt = Point::new(
            (noise.next() % config.area.width as u32) as i32,
            (noise.next() % config.area.height as u32) as i32,
        );
        let start = Instant::now();
        let rect = manager.calculate_hint_rect(dragged, pt, Point::new(1, 1));
        hints.record(start.elapsed());
        if !rect.is_empty() {
            hints.hits += 1;
        }
    }

    let mut render = PhaseStats::new("render");
    let theme = DockTheme::default();
    let area = TermRect::new(0, 0, config.area.width as u16, config.area.height as u16);
    let mut buffer = Buffer::empty(area);
    for _ in 0..config.iterations {
        let start = Instant::now();
        render_dock(&manager, area, &mut buffer, &theme);
        render.record(start.elapsed());
    }

    println!(
        "{}",
        indoc::formatdoc!(
            r#"
            Dock bench: {panes} panes in {width}x{height}, {iterations} iterations per phase.
            {layout}
            {hints}
            {render}
            Drop hints shown for {hit} of {iterations} pointer positions.
            "#,
            panes = config.panes,
            width = config.area.width,
            height = config.area.height,
            iterations = config.iterations,
            layout = layout.report(),
            hints = hints.report(),
            render = render.report(),
            hit = hints.hits,
        )
    );
    Ok(())
}

/// Center pane plus `panes` panes spread over the four sides in two layers
/// and a few rows, and one extra floating pane that the hint phase drags.
fn build_manager(config: &BenchConfig) -> DockManager<usize, BenchHost> {
    let host = BenchHost {
        size: config.area,
        frames: Vec::new(),
    };
    let mut manager = DockManager::new(host, DockConfig::default());
    manager.add_pane(
        usize::MAX,
        Pane::new().name("center").center_pane(),
    );
    let sides = [
        DockDirection::Left,
        DockDirection::Right,
        DockDirection::Top,
        DockDirection::Bottom,
    ];
    for window in 0..config.panes {
        let pane = Pane::new()
            .name(format!("pane-{window}"))
            .caption(format!("Pane {window}"))
            .direction(sides[window % sides.len()])
            .layer(((window / 4) % 2) as i32)
            .row(((window / 8) % 3) as i32)
            .position((window / 24) as i32)
            .maximize_button(true);
        manager.add_pane(window, pane);
    }
    manager.add_pane(
        config.panes,
        Pane::new()
            .name("dragged")
            .caption("Dragged")
            .float()
            .floating_position(Point::new(2, 2)),
    );
    manager
}

struct PhaseStats {
    name: &'static str,
    count: u32,
    total: Duration,
    fastest: Duration,
    slowest: Duration,
    hits: u32,
}

impl PhaseStats {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            count: 0,
            total: Duration::ZERO,
            fastest: Duration::MAX,
            slowest: Duration::ZERO,
            hits: 0,
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.count = self.count.saturating_add(1);
        self.total += elapsed;
        self.fastest = self.fastest.min(elapsed);
        self.slowest = self.slowest.max(elapsed);
    }

    fn report(&self) -> String {
        if self.count == 0 {
            return format!("{:<10} no samples", self.name);
        }
        let avg = self.total.as_secs_f64() / self.count as f64 * 1_000_000.0;
        format!(
            "{:<10} avg {:>9.1} us | best {:>9.1} us | worst {:>9.1} us",
            self.name,
            avg,
            self.fastest.as_secs_f64() * 1_000_000.0,
            self.slowest.as_secs_f64() * 1_000_000.0,
        )
    }
}

struct Noise {
    state: u64,
}

impl Noise {
    fn seeded_from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
            ^ 0xA5A5_A5A5_1234_5678;
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
}
