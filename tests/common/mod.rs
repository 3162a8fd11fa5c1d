#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use term_dock::{
    DockConfig, DockDirection, DockEvent, DockHost, DockManager, EventResponse, FrameId,
    Orientation, Pane, PartKind, Point, Rect, Size, ToolbarCapability, UiPart,
};

pub struct FakeToolbar {
    pub orientation: Option<Orientation>,
    pub size: Size,
}

impl ToolbarCapability for FakeToolbar {
    fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    fn hint_size(&self, _direction: DockDirection) -> Size {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeFrame {
    pub window: Option<usize>,
    pub rect: Rect,
    pub shown: bool,
}

/// In-memory windowing host. Every window reports the same size unless
/// overridden.
pub struct FakeHost {
    pub size: Size,
    pub minimized: bool,
    pub window_size: Size,
    pub sizes: HashMap<usize, Size>,
    pub shown: HashMap<usize, bool>,
    pub placed: HashMap<usize, Rect>,
    pub toolbars: HashMap<usize, FakeToolbar>,
    pub frames: BTreeMap<FrameId, FakeFrame>,
    pub destroyed_frames: Vec<FrameId>,
    pub destroyed_windows: Vec<usize>,
    pub captures: usize,
    pub releases: usize,
    next_frame: u64,
}

impl FakeHost {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            minimized: false,
            window_size: Size::new(10, 5),
            sizes: HashMap::new(),
            shown: HashMap::new(),
            placed: HashMap::new(),
            toolbars: HashMap::new(),
            frames: BTreeMap::new(),
            destroyed_frames: Vec::new(),
            destroyed_windows: Vec::new(),
            captures: 0,
            releases: 0,
            next_frame: 1,
        }
    }
}

impl DockHost<usize> for FakeHost {
    fn client_size(&self) -> Size {
        self.size
    }

    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn window_size(&self, window: usize) -> Size {
        self.sizes.get(&window).copied().unwrap_or(self.window_size)
    }

    fn toolbar(&self, window: usize) -> Option<&dyn ToolbarCapability> {
        self.toolbars
            .get(&window)
            .map(|toolbar| toolbar as &dyn ToolbarCapability)
    }

    fn is_window_shown(&self, window: usize) -> bool {
        self.shown.get(&window).copied().unwrap_or(true)
    }

    fn show_window(&mut self, window: usize, show: bool) {
        self.shown.insert(window, show);
    }

    fn place_window(&mut self, window: usize, rect: Rect) {
        self.placed.insert(window, rect);
    }

    fn destroy_window(&mut self, window: usize) {
        self.destroyed_windows.push(window);
    }

    fn create_floating_frame(&mut self, pane: &Pane<usize>) -> FrameId {
        let id = FrameId(self.next_frame);
        self.next_frame += 1;
        let size = if pane.floating_size == Size::DEFAULT {
            Size::new(pane.best_size.width + 2, pane.best_size.height + 2)
        } else {
            pane.floating_size
        };
        let pos = if pane.floating_pos.is_default() {
            Point::new(2, 2)
        } else {
            pane.floating_pos
        };
        self.frames.insert(
            id,
            FakeFrame {
                window: pane.window(),
                rect: Rect::from_parts(pos, size),
                shown: false,
            },
        );
        id
    }

    fn destroy_floating_frame(&mut self, frame: FrameId) {
        self.frames.remove(&frame);
        self.destroyed_frames.push(frame);
    }

    fn floating_frame_rect(&self, frame: FrameId) -> Rect {
        self.frames
            .get(&frame)
            .map_or(Rect::default(), |frame| frame.rect)
    }

    fn move_floating_frame(&mut self, frame: FrameId, pos: Point) {
        if let Some(frame) = self.frames.get_mut(&frame) {
            frame.rect.x = pos.x;
            frame.rect.y = pos.y;
        }
    }

    fn resize_floating_frame(&mut self, frame: FrameId, size: Size) {
        if let Some(frame) = self.frames.get_mut(&frame) {
            frame.rect.width = size.width;
            frame.rect.height = size.height;
        }
    }

    fn is_floating_frame_shown(&self, frame: FrameId) -> bool {
        self.frames.get(&frame).is_some_and(|frame| frame.shown)
    }

    fn show_floating_frame(&mut self, frame: FrameId, show: bool) {
        if let Some(frame) = self.frames.get_mut(&frame) {
            frame.shown = show;
        }
    }

    fn capture_pointer(&mut self) {
        self.captures += 1;
    }

    fn release_pointer(&mut self) {
        self.releases += 1;
    }
}

pub type Manager = DockManager<usize, FakeHost>;

pub const CENTER: usize = 0;
pub const FILES: usize = 1;
pub const OUTLINE: usize = 2;
pub const OUTPUT: usize = 3;
pub const TOOLS: usize = 4;
pub const BUILD: usize = 5;

/// 80x24 area with a center pane and two panes stacked in the left dock.
pub fn left_stack() -> Manager {
    left_stack_with(Pane::new())
}

/// Like [`left_stack`], with `outline` as the template for the second left
/// pane.
pub fn left_stack_with(outline: Pane<usize>) -> Manager {
    let mut manager = DockManager::new(FakeHost::new(80, 24), DockConfig::default());
    assert!(manager.add_pane(CENTER, Pane::new().name("editor").center_pane()));
    assert!(manager.add_pane(FILES, Pane::new().name("files").caption("Files").left()));
    assert!(manager.add_pane(
        OUTLINE,
        outline
            .name("outline")
            .caption("Outline")
            .left()
            .position(1)
    ));
    manager.update();
    manager
}

/// 80x24 area with a center pane and two horizontal toolbars sharing the
/// top dock, `tools` at position 0 and `build` at position 20.
pub fn toolbar_strip() -> Manager {
    let mut host = FakeHost::new(80, 24);
    for window in [TOOLS, BUILD] {
        host.sizes.insert(window, Size::new(8, 1));
        host.toolbars.insert(
            window,
            FakeToolbar {
                orientation: Some(Orientation::Horizontal),
                size: Size::new(8, 1),
            },
        );
    }
    let mut manager = DockManager::new(host, DockConfig::default());
    assert!(manager.add_pane(CENTER, Pane::new().name("editor").center_pane()));
    assert!(manager.add_pane(TOOLS, Pane::new().name("tools").toolbar_pane().top()));
    assert!(manager.add_pane(
        BUILD,
        Pane::new().name("build").toolbar_pane().top().position(20)
    ));
    manager.update();
    manager
}

pub fn part_of(manager: &Manager, window: usize, kind: PartKind) -> UiPart {
    let id = manager.pane(window).map(Pane::id);
    manager
        .ui_parts()
        .iter()
        .find(|part| part.kind == kind && part.pane.is_some() && part.pane == id)
        .cloned()
        .unwrap_or_else(|| panic!("no {kind:?} part for window {window}"))
}

pub fn dock_index(manager: &Manager, direction: DockDirection) -> usize {
    manager
        .docks()
        .iter()
        .position(|dock| dock.dock_direction == direction)
        .unwrap_or_else(|| panic!("no {direction:?} dock"))
}

pub type EventLog = Rc<RefCell<Vec<DockEvent<usize>>>>;

/// Records every event and vetoes the ones `veto` matches.
pub fn record_events(
    manager: &mut Manager,
    veto: impl Fn(&DockEvent<usize>) -> bool + 'static,
) -> EventLog {
    let log: EventLog = Rc::default();
    let sink = Rc::clone(&log);
    manager.set_event_sink(move |event: &DockEvent<usize>| {
        sink.borrow_mut().push(event.clone());
        if veto(event) {
            EventResponse::Veto
        } else {
            EventResponse::Proceed
        }
    });
    log
}
