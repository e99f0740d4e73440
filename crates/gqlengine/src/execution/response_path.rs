use gqlengine_core::PathSegment;

/// A response path, plus the position of each step within its selection
/// set or list so that errors can be sorted into response order.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ResponsePath {
    pub segments: Vec<PathSegment>,
    pub order: Vec<usize>,
}

impl ResponsePath {
    pub fn key(&self, key: &str, position: usize) -> Self {
        self.child(PathSegment::Key(key.to_string()), position)
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index), index)
    }

    fn child(&self, segment: PathSegment, position: usize) -> Self {
        let mut child = self.clone();
        child.segments.push(segment);
        child.order.push(position);
        child
    }
}
