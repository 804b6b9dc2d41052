const INLINE_MAX: usize = 13;

/// Owned event payload storage. Small payloads live in a fixed inline
/// array, anything larger spills to the heap. Callers only ever see the
/// `as_slice` view; the variant is a size decision, not a semantic one.
#[derive(Debug, Clone)]
pub enum PayloadBuffer {
    Inline { len: u8, bytes: [u8; INLINE_MAX] },
    Heap(Vec<u8>),
}

impl PayloadBuffer {
    pub const INLINE_MAX: usize = INLINE_MAX;

    pub(crate) fn with_len(len: usize) -> Self {
        if len <= INLINE_MAX {
            Self::Inline {
                len: len as u8,
                bytes: [0; INLINE_MAX],
            }
        } else {
            Self::Heap(vec![0; len])
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Inline { len, bytes } => &bytes[..*len as usize],
            Self::Heap(bytes) => bytes,
        }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::Inline { len, bytes } => &mut bytes[..*len as usize],
            Self::Heap(bytes) => bytes,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Inline { len, .. } => *len as usize,
            Self::Heap(bytes) => bytes.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Compare contents, not representation. An inline buffer keeps junk
// past `len` that must not participate in equality.
impl PartialEq for PayloadBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for PayloadBuffer {}
