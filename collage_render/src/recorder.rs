// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{DrawOp, DrawTarget};

/// A [`DrawTarget`] that keeps the ops of the latest frame.
///
/// It does not rasterize. Tests use it to assert on paint order.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    frames: u64,
    size: (u16, u16),
    ops: Vec<DrawOp>,
}

impl Recorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops of the latest frame, back to front.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Surface size of the latest frame.
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Number of frames begun so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DrawTarget for Recorder {
    fn begin(&mut self, width: u16, height: u16) {
        self.frames += 1;
        self.size = (width, height);
        self.ops.clear();
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}
