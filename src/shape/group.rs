use crate::bounds::Bounds;
use crate::shape::Shape;

/// Grouping node: owns its children by value and caches the union of their
/// parent-space bounds so traversal can cull whole subtrees with one slab
/// test.
#[derive(Debug, Clone, Default)]
pub struct Group {
    children: Vec<Shape>,
    bounds: Option<Bounds>,
}

impl Group {
    pub fn new(children: Vec<Shape>) -> Self {
        let mut group = Self::default();
        for child in children {
            group.add_child(child);
        }
        group
    }

    pub fn add_child(&mut self, child: Shape) {
        let child_bounds = child.parent_space_bounds();
        match &mut self.bounds {
            Some(bounds) => bounds.merge(child_bounds),
            None => self.bounds = Some(child_bounds),
        }
        self.children.push(child);
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds.unwrap_or_else(Bounds::empty)
    }

    /// Recursively re-bundles an oversized sibling list into nested
    /// subgroups of at most `fan_out` children, keeping the bounding
    /// hierarchy shallow enough to cull effectively.
    pub fn bundle(shapes: Vec<Shape>, fan_out: usize) -> Vec<Shape> {
        let mut shapes = shapes;
        while shapes.len() > fan_out {
            let mut bundled = Vec::with_capacity(shapes.len() / fan_out + 1);
            let mut iter = shapes.into_iter();
            loop {
                let chunk: Vec<Shape> = iter.by_ref().take(fan_out).collect();
                if chunk.is_empty() {
                    break;
                }
                bundled.push(Shape::group(chunk));
            }
            shapes = bundled;
        }
        shapes
    }
}
