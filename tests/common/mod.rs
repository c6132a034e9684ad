// In-memory page used to drive the layout engine without a browser

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use line_comments_wasm::{DocumentView, Geometry, LayoutError, LineMarker, OffsetNode, Scheduler};

/// Height of one line-number marker inside a code block
pub const LINE_HEIGHT: f64 = 20.0;

#[derive(Debug, Default, Clone)]
pub struct Node {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub parent: Option<usize>,
    pub html: String,
    pub children: Vec<usize>,
    pub style: Option<Geometry>,
}

type Arena = Rc<RefCell<Vec<Node>>>;

#[derive(Clone, Default)]
pub struct FakePage {
    nodes: Arena,
    marker_batches: Rc<RefCell<usize>>,
    reflows: Rc<RefCell<Vec<Reflow>>>,
}

/// Moves `target` vertically by `dy` when `node` gains `class`
struct Reflow {
    node: usize,
    class: String,
    target: usize,
    dy: f64,
}

#[derive(Clone)]
pub struct FakeElement {
    nodes: Arena,
    pub index: usize,
}

impl OffsetNode for FakeElement {
    fn offset_top(&self) -> f64 {
        self.nodes.borrow()[self.index].top
    }

    fn offset_left(&self) -> f64 {
        self.nodes.borrow()[self.index].left
    }

    fn offset_parent(&self) -> Option<Self> {
        let parent = self.nodes.borrow()[self.index].parent?;
        Some(FakeElement {
            nodes: Rc::clone(&self.nodes),
            index: parent,
        })
    }
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, node: Node) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        nodes.len() - 1
    }

    /// Reference container at `left` with `width`
    pub fn wrapper(&self, left: f64, width: f64) -> usize {
        self.add(Node {
            classes: vec!["wrapper".to_string()],
            left,
            width,
            ..Node::default()
        })
    }

    /// Code block with `lines` line numbers, offset from `parent`
    pub fn code_block(&self, parent: Option<usize>, top: f64, left: f64, lines: usize) -> usize {
        let html: String = (1..=lines).map(|n| format!("{}\n", n)).collect();
        self.add(Node {
            classes: vec!["lineno".to_string()],
            top,
            left,
            parent,
            html,
            ..Node::default()
        })
    }

    /// Line comment with identifier `id`
    pub fn comment(&self, id: &str, content: &str) -> usize {
        self.add(Node {
            id: (!id.is_empty()).then(|| id.to_string()),
            classes: vec!["lineComment".to_string()],
            html: content.to_string(),
            ..Node::default()
        })
    }

    pub fn node(&self, index: usize) -> Node {
        self.nodes.borrow()[index].clone()
    }

    pub fn has_class(&self, index: usize, class: &str) -> bool {
        self.nodes.borrow()[index].classes.iter().any(|c| c == class)
    }

    pub fn html(&self, index: usize) -> String {
        self.nodes.borrow()[index].html.clone()
    }

    pub fn style(&self, index: usize) -> Option<Geometry> {
        self.nodes.borrow()[index].style
    }

    pub fn move_to(&self, index: usize, top: f64, left: f64) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[index].top = top;
        nodes[index].left = left;
    }

    /// Simulate document flow: once `node` gains `class`, `target` moves by `dy`
    pub fn reflow_on_class(&self, node: usize, class: &str, target: usize, dy: f64) {
        self.reflows.borrow_mut().push(Reflow {
            node,
            class: class.to_string(),
            target,
            dy,
        });
    }

    /// How many times markers were written into code blocks
    pub fn marker_batches(&self) -> usize {
        *self.marker_batches.borrow()
    }

    fn element(&self, index: usize) -> FakeElement {
        FakeElement {
            nodes: Rc::clone(&self.nodes),
            index,
        }
    }
}

impl DocumentView for FakePage {
    type Element = FakeElement;

    fn elements_by_class(&self, class: &str) -> Vec<FakeElement> {
        let indices: Vec<usize> = self
            .nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.classes.iter().any(|c| c == class))
            .map(|(index, _)| index)
            .collect();
        indices.into_iter().map(|index| self.element(index)).collect()
    }

    fn marker_in(&self, block: &FakeElement, id: &str) -> Option<FakeElement> {
        let index = {
            let nodes = self.nodes.borrow();
            nodes[block.index]
                .children
                .iter()
                .copied()
                .find(|&child| nodes[child].id.as_deref() == Some(id))?
        };
        Some(self.element(index))
    }

    fn id_of(&self, element: &FakeElement) -> Option<String> {
        self.nodes.borrow()[element.index].id.clone()
    }

    fn offset_width(&self, element: &FakeElement) -> f64 {
        self.nodes.borrow()[element.index].width
    }

    fn inner_html(&self, element: &FakeElement) -> String {
        self.html(element.index)
    }

    fn set_inner_html(&self, element: &FakeElement, html: &str) {
        self.nodes.borrow_mut()[element.index].html = html.to_string();
    }

    fn child_texts(&self, element: &FakeElement) -> Vec<String> {
        let nodes = self.nodes.borrow();
        nodes[element.index]
            .children
            .iter()
            .map(|&child| nodes[child].html.clone())
            .collect()
    }

    fn replace_with_markers(
        &self,
        block: &FakeElement,
        markers: &[LineMarker],
    ) -> Result<(), LayoutError> {
        *self.marker_batches.borrow_mut() += 1;

        let mut children = Vec::with_capacity(markers.len());
        for (row, marker) in markers.iter().enumerate() {
            children.push(self.add(Node {
                id: Some(marker.id.clone()),
                top: row as f64 * LINE_HEIGHT,
                parent: Some(block.index),
                html: marker.text.clone(),
                ..Node::default()
            }));
        }

        let mut nodes = self.nodes.borrow_mut();
        nodes[block.index].html.clear();
        nodes[block.index].children = children;
        Ok(())
    }

    fn add_class(&self, element: &FakeElement, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[element.index].classes;
        if classes.iter().any(|c| c == class) {
            return;
        }
        classes.push(class.to_string());

        for reflow in self.reflows.borrow().iter().filter(|r| r.node == element.index && r.class == class) {
            nodes[reflow.target].top += reflow.dy;
        }
    }

    fn set_geometry(&self, element: &FakeElement, geometry: &Geometry) {
        self.nodes.borrow_mut()[element.index].style = Some(*geometry);
    }
}

// ============================================================================
// Manual scheduler with a virtual clock
// ============================================================================

struct Task {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Queue {
    now: u64,
    next_id: u64,
    tasks: VecDeque<Task>,
}

#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

pub struct ManualHandle {
    id: u64,
    queue: Rc<RefCell<Queue>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.queue.borrow_mut().tasks.retain(|task| task.id != self.id);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, wait_ms: u32, callback: Box<dyn FnOnce()>) -> ManualHandle {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + wait_ms as u64;
        queue.tasks.push_back(Task { id, due, callback });

        ManualHandle {
            id,
            queue: Rc::clone(&self.queue),
        }
    }
}

impl ManualScheduler {
    pub fn now(&self) -> u64 {
        self.queue.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Move the clock forward, running every task that falls due
    pub fn advance(&self, ms: u64) {
        let target = self.queue.borrow().now + ms;

        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let due_index = queue
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= target)
                    .min_by_key(|(_, task)| task.due)
                    .map(|(index, _)| index);

                match due_index.and_then(|index| queue.tasks.remove(index)) {
                    Some(task) => {
                        queue.now = task.due;
                        Some(task.callback)
                    }
                    None => None,
                }
            };

            match next {
                Some(callback) => callback(),
                None => break,
            }
        }

        self.queue.borrow_mut().now = target;
    }
}
