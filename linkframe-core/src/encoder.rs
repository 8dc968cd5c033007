//! Frame encoding

use crate::integrity::{IntegrityCheck, IntegrityScheme};
use crate::types::TagSet;
use bytes::{BufMut, Bytes, BytesMut};

/// Builds delimited, byte-stuffed wire frames
///
/// The frame is laid out as:
/// 1. START tag
/// 2. Payload followed by the integrity code, with every byte that equals a
///    tag value preceded by ESCAPE
/// 3. STOP tag
#[derive(Debug, Clone, Default)]
pub struct FrameEncoder<S = IntegrityScheme> {
    tags: TagSet,
    scheme: S,
}

impl<S: IntegrityCheck> FrameEncoder<S> {
    /// Create an encoder using the default tag set
    pub fn new(scheme: S) -> Self {
        Self::with_tags(TagSet::default(), scheme)
    }

    /// Create an encoder with custom tags
    pub fn with_tags(tags: TagSet, scheme: S) -> Self {
        Self { tags, scheme }
    }

    /// Tags written around and inside frames
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Integrity scheme used for the code
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Encode one payload chunk into a complete wire frame
    pub fn encode(&self, payload: &[u8]) -> Bytes {
        let mut buf = BytesMut::with_capacity(2 * (payload.len() + self.scheme.code_len()) + 2);
        self.encode_into(payload, &mut buf);
        buf.freeze()
    }

    /// Append the wire frame for `payload` to `buf`
    pub fn encode_into(&self, payload: &[u8], buf: &mut BytesMut) {
        let code = self.scheme.encode(payload);

        buf.put_u8(self.tags.start());
        stuff_into(payload, &self.tags, buf);
        stuff_into(&code, &self.tags, buf);
        buf.put_u8(self.tags.stop());
    }

    /// Exact length of the wire frame for `payload`
    pub fn encoded_len(&self, payload: &[u8]) -> usize {
        let code = self.scheme.encode(payload);
        2 + stuffed_len(payload, &self.tags) + stuffed_len(&code, &self.tags)
    }
}

/// Escape every tag-valued byte of `body` into `buf`
pub fn stuff_into(body: &[u8], tags: &TagSet, buf: &mut BytesMut) {
    for &byte in body {
        if tags.is_tag(byte) {
            buf.put_u8(tags.escape());
        }
        buf.put_u8(byte);
    }
}

/// Length of `body` once stuffed
pub fn stuffed_len(body: &[u8], tags: &TagSet) -> usize {
    body.len() + body.iter().filter(|&&b| tags.is_tag(b)).count()
}
