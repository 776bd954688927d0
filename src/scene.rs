//! Retained scene graph drawn with `embedded-graphics`.
//!
//! Nodes are solid boxes or word-wrapped text labels. Every node is owned
//! through a [`Visual`] handle: dropping the handle removes the node and
//! schedules the area it last covered for erasing. [`Scene::render`] only
//! touches nodes that changed or sat underneath an erased area, so a frame
//! costs a handful of small SPI writes instead of a full-screen blit.

use alloc::{
    rc::Rc,
    vec::Vec,
};
use core::cell::RefCell;

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::FONT_6X10,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
    text::{
        Baseline,
        Text,
    },
};

/// Glyph cell of the label font.
pub const CHAR_WIDTH: u32 = 6;
pub const LINE_HEIGHT: u32 = 10;

struct Label {
    text: &'static str,
    text_color: Rgb565,
    shown_at_ms: u32,
    line_ms: u32,
    first_line: usize,
}

impl Label {
    /// First wrapped line visible inside `area` at `clock_ms`.
    ///
    /// Text that fits is pinned to the top; longer text advances one line
    /// every `line_ms` and starts over after the last line came into view.
    fn first_line_at(&self, area: &Rectangle, clock_ms: u32) -> usize {
        let visible = (area.size.height / LINE_HEIGHT) as usize;
        let total = wrap_lines(self.text, columns(area)).count();
        if total <= visible || self.line_ms == 0 {
            return 0;
        }
        let steps = clock_ms.wrapping_sub(self.shown_at_ms) / self.line_ms;
        steps as usize % (total - visible + 1)
    }
}

enum Kind {
    Box,
    Label(Label),
}

struct Node {
    kind: Kind,
    area: Rectangle,
    color: Rgb565,
    drawn: Option<Rectangle>,
    dirty: bool,
}

impl Node {
    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match &self.kind {
            Kind::Box => self
                .area
                .into_styled(PrimitiveStyle::with_fill(self.color))
                .draw(target),
            Kind::Label(label) => {
                let mut target = target.clipped(&self.area);
                target.fill_solid(&self.area, self.color)?;

                let style = MonoTextStyle::new(&FONT_6X10, label.text_color);
                let visible = (self.area.size.height / LINE_HEIGHT) as usize;
                let lines = wrap_lines(label.text, columns(&self.area))
                    .skip(label.first_line)
                    .take(visible);
                for (row, line) in lines.enumerate() {
                    let origin = self.area.top_left + Point::new(0, (row as u32 * LINE_HEIGHT) as i32);
                    Text::with_baseline(line, origin, style, Baseline::Top).draw(&mut target)?;
                }
                Ok(())
            }
        }
    }
}

fn columns(area: &Rectangle) -> usize {
    (area.size.width / CHAR_WIDTH) as usize
}

fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
    !a.intersection(b).is_zero_sized()
}

struct SceneInner {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    erase: Vec<Rectangle>,
    viewport: Rectangle,
    background: Rgb565,
    clock_ms: u32,
    cleared: bool,
}

impl SceneInner {
    fn insert(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: usize) {
        if let Some(node) = self.nodes.get_mut(id).and_then(Option::take) {
            if let Some(drawn) = node.drawn {
                self.erase.push(drawn);
            }
            self.free.push(id);
        }
    }

    fn node_mut(&mut self, id: usize) -> Option<&mut Node> {
        self.nodes.get_mut(id).and_then(Option::as_mut)
    }
}

/// Shared handle to the scene; clones refer to the same node set.
#[derive(Clone)]
pub struct Scene {
    inner: Rc<RefCell<SceneInner>>,
}

impl Scene {
    pub fn new(size: Size, background: Rgb565) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SceneInner {
                nodes: Vec::new(),
                free: Vec::new(),
                erase: Vec::new(),
                viewport: Rectangle::new(Point::zero(), size),
                background,
                clock_ms: 0,
                cleared: false,
            })),
        }
    }

    /// Add a filled rectangle.
    pub fn create_box(&self, position: Point, size: Size, color: Rgb565) -> Visual {
        self.create(Node {
            kind: Kind::Box,
            area: Rectangle::new(position, size),
            color,
            drawn: None,
            dirty: true,
        })
    }

    /// Add a word-wrapped, top-left aligned label filling `area`.
    ///
    /// `color` paints the label background. When the wrapped text is taller
    /// than `area` it scrolls one line every `line_ms`, driven by
    /// [`Scene::advance_clock`].
    pub fn create_label(
        &self,
        text: &'static str,
        area: Rectangle,
        text_color: Rgb565,
        color: Rgb565,
        line_ms: u32,
    ) -> Visual {
        let shown_at_ms = self.clock_ms();
        self.create(Node {
            kind: Kind::Label(Label {
                text,
                text_color,
                shown_at_ms,
                line_ms,
                first_line: 0,
            }),
            area,
            color,
            drawn: None,
            dirty: true,
        })
    }

    fn create(&self, node: Node) -> Visual {
        let id = self.inner.borrow_mut().insert(node);
        Visual {
            scene: Rc::clone(&self.inner),
            id,
        }
    }

    /// Advance the animation clock by `elapsed_ms`.
    pub fn advance_clock(&self, elapsed_ms: u32) {
        let mut inner = self.inner.borrow_mut();
        inner.clock_ms = inner.clock_ms.wrapping_add(elapsed_ms);
        let clock_ms = inner.clock_ms;
        for node in inner.nodes.iter_mut().flatten() {
            if let Kind::Label(label) = &mut node.kind {
                let first_line = label.first_line_at(&node.area, clock_ms);
                if first_line != label.first_line {
                    label.first_line = first_line;
                    node.dirty = true;
                }
            }
        }
    }

    pub fn clock_ms(&self) -> u32 {
        self.inner.borrow().clock_ms
    }

    /// Number of nodes currently alive.
    pub fn live_nodes(&self) -> usize {
        self.inner.borrow().nodes.iter().flatten().count()
    }

    /// Process one frame of pending visual updates.
    ///
    /// The first frame clears the whole viewport. Later frames erase areas
    /// left behind by moved or dropped nodes, then draw every node that
    /// changed or was damaged by an erase, in creation order.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let viewport = inner.viewport;
        let background = inner.background;
        let mut screen = target.clipped(&viewport);

        if !inner.cleared {
            screen.fill_solid(&viewport, background)?;
            inner.erase.clear();
            for node in inner.nodes.iter_mut().flatten() {
                node.drawn = None;
                node.dirty = true;
            }
            inner.cleared = true;
        }

        for node in inner.nodes.iter_mut().flatten() {
            if node.dirty {
                if let Some(old) = node.drawn.take() {
                    if old != node.area {
                        inner.erase.push(old);
                    }
                }
            }
        }

        for rect in &inner.erase {
            screen.fill_solid(rect, background)?;
        }

        for node in inner.nodes.iter_mut().flatten() {
            let damaged = node
                .drawn
                .is_some_and(|drawn| inner.erase.iter().any(|rect| overlaps(&drawn, rect)));
            if node.dirty || damaged {
                node.draw(&mut screen)?;
                node.drawn = Some(node.area);
                node.dirty = false;
            }
        }

        inner.erase.clear();
        Ok(())
    }
}

/// Owning handle to one scene node. Dropping it deletes the node.
pub struct Visual {
    scene: Rc<RefCell<SceneInner>>,
    id: usize,
}

impl Visual {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn set_position(&self, position: Point) {
        if let Some(node) = self.scene.borrow_mut().node_mut(self.id) {
            if node.area.top_left != position {
                node.area.top_left = position;
                node.dirty = true;
            }
        }
    }

    pub fn set_size(&self, size: Size) {
        if let Some(node) = self.scene.borrow_mut().node_mut(self.id) {
            if node.area.size != size {
                node.area.size = size;
                node.dirty = true;
            }
        }
    }

    pub fn set_color(&self, color: Rgb565) {
        if let Some(node) = self.scene.borrow_mut().node_mut(self.id) {
            if node.color != color {
                node.color = color;
                node.dirty = true;
            }
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.scene
            .borrow_mut()
            .node_mut(self.id)
            .map_or(Rectangle::zero(), |node| node.area)
    }
}

impl Drop for Visual {
    fn drop(&mut self) {
        self.scene.borrow_mut().release(self.id);
    }
}

/// Greedy word wrap into lines of at most `cols` characters.
///
/// Words longer than a line are hard-broken. Runs of spaces at line
/// boundaries are dropped.
pub fn wrap_lines(text: &str, cols: usize) -> WrapLines<'_> {
    WrapLines { rest: text, cols }
}

pub struct WrapLines<'a> {
    rest: &'a str,
    cols: usize,
}

impl<'a> Iterator for WrapLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest.trim_start_matches(' ');
        if rest.is_empty() || self.cols == 0 {
            self.rest = "";
            return None;
        }

        // Byte offset of the first character that no longer fits.
        let Some((limit, _)) = rest.char_indices().nth(self.cols) else {
            self.rest = "";
            return Some(rest.trim_end_matches(' '));
        };

        let cut = if rest[limit..].starts_with(' ') {
            limit
        } else {
            match rest[..limit].rfind(' ') {
                Some(space) if space > 0 => space,
                _ => limit,
            }
        };

        let (line, tail) = rest.split_at(cut);
        self.rest = tail;
        Some(line.trim_end_matches(' '))
    }
}
