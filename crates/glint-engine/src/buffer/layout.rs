/// Component type of one vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttributeKind {
    F32,
    U32,
    U8,
}

impl AttributeKind {
    /// Byte size of a single component.
    pub fn size(self) -> u32 {
        match self {
            AttributeKind::F32 | AttributeKind::U32 => 4,
            AttributeKind::U8 => 1,
        }
    }

    /// Integer components are normalized into [0, 1] at fetch time; float
    /// components are passed through.
    pub fn normalized(self) -> bool {
        matches!(self, AttributeKind::U32 | AttributeKind::U8)
    }

    pub(crate) fn gl_type(self) -> u32 {
        match self {
            AttributeKind::F32 => glow::FLOAT,
            AttributeKind::U32 => glow::UNSIGNED_INT,
            AttributeKind::U8 => glow::UNSIGNED_BYTE,
        }
    }
}

/// One attribute of a vertex record.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BufferElement {
    pub kind: AttributeKind,
    pub count: u32,
    pub normalized: bool,
    /// Byte offset of this attribute within one record; equals the stride
    /// accumulated before the element was pushed.
    pub offset: u32,
}

impl BufferElement {
    pub fn byte_size(&self) -> u32 {
        self.count * self.kind.size()
    }
}

/// Ordered attribute layout of one vertex record.
///
/// Elements are pushed in the order they bind to shader input slots (slot 0
/// first). Invariant: `stride()` equals the sum of all element byte sizes,
/// and each element's offset is the prefix sum of the sizes before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
}

impl BufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute of `count` components of `kind`.
    ///
    /// The normalize flag follows the component type; see
    /// [`AttributeKind::normalized`].
    pub fn push(&mut self, kind: AttributeKind, count: u32) -> &mut Self {
        let element = BufferElement {
            kind,
            count,
            normalized: kind.normalized(),
            offset: self.stride,
        };
        self.stride += element.byte_size();
        self.elements.push(element);
        self
    }

    /// Total byte size of one vertex record.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn elements(&self) -> &[BufferElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_sum_of_element_sizes() {
        let mut layout = BufferLayout::new();
        layout
            .push(AttributeKind::F32, 3)
            .push(AttributeKind::F32, 3)
            .push(AttributeKind::F32, 2);
        assert_eq!(layout.stride(), (3 + 3 + 2) * 4);
    }

    #[test]
    fn offsets_are_prefix_sums() {
        let mut layout = BufferLayout::new();
        layout
            .push(AttributeKind::F32, 3)
            .push(AttributeKind::U8, 4)
            .push(AttributeKind::F32, 2);

        let offsets: Vec<u32> = layout.elements().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 12, 16]);
        assert_eq!(layout.stride(), 24);
    }

    #[test]
    fn normalize_flag_follows_component_type() {
        let mut layout = BufferLayout::new();
        layout
            .push(AttributeKind::F32, 4)
            .push(AttributeKind::U32, 1)
            .push(AttributeKind::U8, 4);

        let flags: Vec<bool> = layout.elements().iter().map(|e| e.normalized).collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn empty_layout_has_zero_stride() {
        let layout = BufferLayout::new();
        assert!(layout.is_empty());
        assert_eq!(layout.stride(), 0);
    }
}
