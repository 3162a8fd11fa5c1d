//! A box sizer: nested horizontal/vertical containers solved into cell
//! rectangles.
//!
//! Nodes live in an arena and are addressed by [`NodeId`], so the layout
//! engine can hand node handles to UI parts and read the solved rectangles
//! back afterwards. Each node is a box (with children), a spacer, or a window
//! slot; all carry a proportion, an expand flag, a uniform border and an
//! optional explicit minimum size.

use crate::geometry::{Orientation, Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    Box {
        orientation: Orientation,
        children: Vec<NodeId>,
    },
    Spacer,
    Window,
}

#[derive(Debug, Clone, PartialEq)]
struct SizerNode {
    kind: NodeKind,
    proportion: i32,
    expand: bool,
    border: i32,
    /// For spacers and windows this is the size; for boxes it is a floor on
    /// the computed minimum.
    min_size: Size,
    rect: Rect,
}

impl SizerNode {
    fn new(kind: NodeKind, min_size: Size) -> Self {
        Self {
            kind,
            proportion: 0,
            expand: false,
            border: 0,
            min_size,
            rect: Rect::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SizerTree {
    nodes: Vec<SizerNode>,
}

impl SizerTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached box. Attach it with [`SizerTree::add`] or use it as
    /// the root.
    pub fn new_box(&mut self, orientation: Orientation) -> NodeId {
        self.push(SizerNode::new(
            NodeKind::Box {
                orientation,
                children: Vec::new(),
            },
            Size::new(0, 0),
        ))
    }

    pub fn add_spacer(&mut self, parent: NodeId, size: Size, proportion: i32) -> NodeId {
        let node = self.push(SizerNode::new(NodeKind::Spacer, size));
        self.add(parent, node, proportion, 0)
    }

    /// Adds a slot for a content window with a 1x1 minimum.
    pub fn add_window(&mut self, parent: NodeId, proportion: i32) -> NodeId {
        let node = self.push(SizerNode::new(NodeKind::Window, Size::new(1, 1)));
        self.add(parent, node, proportion, 0)
    }

    /// Appends `child` to `parent`. Children always expand on the minor axis.
    pub fn add(&mut self, parent: NodeId, child: NodeId, proportion: i32, border: i32) -> NodeId {
        {
            let node = &mut self.nodes[child.0];
            node.proportion = proportion.max(0);
            node.expand = true;
            node.border = border.max(0);
        }
        if let NodeKind::Box { children, .. } = &mut self.nodes[parent.0].kind {
            children.push(child);
        }
        child
    }

    /// Overrides the minimum size. Negative components keep the current
    /// value.
    pub fn set_min_size(&mut self, node: NodeId, size: Size) {
        let current = self.nodes[node.0].min_size;
        self.nodes[node.0].min_size = Size::new(
            if size.width < 0 { current.width } else { size.width },
            if size.height < 0 { current.height } else { size.height },
        );
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rectangle of the node itself, inside its border.
    pub fn rect(&self, node: NodeId) -> Rect {
        self.nodes[node.0].rect
    }

    /// Rectangle including the border around the node.
    pub fn outer_rect(&self, node: NodeId) -> Rect {
        let n = &self.nodes[node.0];
        n.rect.inflate(n.border, n.border)
    }

    pub fn border(&self, node: NodeId) -> i32 {
        self.nodes[node.0].border
    }

    /// Minimum size of the node, excluding its own border.
    pub fn min_size(&self, node: NodeId) -> Size {
        let n = &self.nodes[node.0];
        match &n.kind {
            NodeKind::Box {
                orientation,
                children,
            } => {
                let mut major = 0;
                let mut minor = 0;
                for child in children {
                    let size = self.min_size_with_border(*child);
                    major += size.along(*orientation).max(0);
                    minor = minor.max(size.along(orientation.flipped()));
                }
                let computed = match orientation {
                    Orientation::Horizontal => Size::new(major, minor),
                    Orientation::Vertical => Size::new(minor, major),
                };
                computed.inc_to(n.min_size)
            }
            NodeKind::Spacer | NodeKind::Window => n.min_size,
        }
    }

    fn min_size_with_border(&self, node: NodeId) -> Size {
        let border = self.nodes[node.0].border;
        let min = self.min_size(node);
        Size::new(min.width + border * 2, min.height + border * 2)
    }

    /// Solves the tree rooted at `root` into `area`.
    pub fn layout(&mut self, root: NodeId, area: Rect) {
        self.set_dimension(root, area);
    }

    fn set_dimension(&mut self, node: NodeId, outer: Rect) {
        let border = self.nodes[node.0].border;
        let inner = Rect::new(
            outer.x + border,
            outer.y + border,
            outer.width - border * 2,
            outer.height - border * 2,
        );
        self.nodes[node.0].rect = inner;

        let (orientation, children) = match &self.nodes[node.0].kind {
            NodeKind::Box {
                orientation,
                children,
            } => (*orientation, children.clone()),
            _ => return,
        };
        if children.is_empty() {
            return;
        }

        let total_major = Size::new(inner.width, inner.height).along(orientation);
        let total_minor = Size::new(inner.width, inner.height).along(orientation.flipped());
        let majors = self.distribute(orientation, &children, total_major);

        let mut cursor = Point::new(inner.x, inner.y);
        for (child, major) in children.iter().zip(majors) {
            let child_min = self.min_size_with_border(*child);
            let minor = if self.nodes[child.0].expand {
                total_minor
            } else {
                child_min.along(orientation.flipped()).min(total_minor)
            };
            let rect = match orientation {
                Orientation::Horizontal => Rect::new(cursor.x, cursor.y, major, minor),
                Orientation::Vertical => Rect::new(cursor.x, cursor.y, minor, major),
            };
            self.set_dimension(*child, rect);
            match orientation {
                Orientation::Horizontal => cursor.x += major,
                Orientation::Vertical => cursor.y += major,
            }
        }
    }

    /// Splits `total` along the major axis. Every child first gets its
    /// minimum; whatever is left goes to proportional children by weight.
    /// Proportional children whose share would fall under their minimum are
    /// pinned to it and the rest is redistributed.
    fn distribute(&self, orientation: Orientation, children: &[NodeId], total: i32) -> Vec<i32> {
        let mins: Vec<i32> = children
            .iter()
            .map(|c| self.min_size_with_border(*c).along(orientation).max(0))
            .collect();
        let props: Vec<i64> = children
            .iter()
            .map(|c| self.nodes[c.0].proportion as i64)
            .collect();
        let min_total: i32 = mins.iter().sum();

        let mut sizes: Vec<Option<i32>> = vec![None; children.len()];
        let mut remaining = total as i64;
        let mut total_prop: i64 = props.iter().sum();

        if total < min_total {
            for (idx, size) in sizes.iter_mut().enumerate() {
                if props[idx] == 0 {
                    *size = Some(mins[idx]);
                    remaining -= mins[idx] as i64;
                }
            }
            for (idx, size) in sizes.iter_mut().enumerate() {
                if props[idx] != 0 {
                    let granted = (mins[idx] as i64).min(remaining.max(0));
                    *size = Some(granted as i32);
                    remaining -= granted;
                }
            }
        } else {
            loop {
                let mut changed = false;
                for (idx, size) in sizes.iter_mut().enumerate() {
                    if size.is_some() {
                        continue;
                    }
                    let min = mins[idx] as i64;
                    if props[idx] != 0 {
                        if total_prop > 0 && remaining * props[idx] / total_prop >= min {
                            continue;
                        }
                        total_prop -= props[idx];
                    }
                    *size = Some(min as i32);
                    remaining -= min;
                    changed = true;
                }
                if !changed {
                    break;
                }
            }
        }

        sizes
            .into_iter()
            .enumerate()
            .map(|(idx, size)| match size {
                Some(size) => size,
                None => {
                    let share = if total_prop > 0 {
                        remaining * props[idx] / total_prop
                    } else {
                        0
                    };
                    remaining -= share;
                    total_prop -= props[idx];
                    share as i32
                }
            })
            .collect()
    }

    fn push(&mut self, node: SizerNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}
