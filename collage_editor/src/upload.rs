// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queued decode requests.
//!
//! An upload becomes visible only once it is decoded. Requests are resolved
//! one by one and independently: a malformed file produces an error report
//! for its own ticket and nothing else.

use core::fmt;
use std::collections::VecDeque;

use collage_scene::SourceId;
use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Where a decoded upload goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadTarget {
    /// Replace the scene background.
    Background,
    /// Append to the placement gallery.
    Gallery,
}

/// Identifies one queued upload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UploadTicket(pub u64);

impl fmt::Display for UploadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload {}", self.0)
    }
}

/// What a successful upload produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UploadResolution {
    /// The background was replaced; `size` is its display size.
    Background {
        /// Display size after fitting.
        size: Size,
    },
    /// A gallery entry was appended.
    Gallery {
        /// Id of the new entry.
        source: SourceId,
    },
}

/// Outcome of one resolved upload.
#[derive(Debug)]
pub struct UploadReport {
    /// The request this report answers.
    pub ticket: UploadTicket,
    /// Where the upload was headed.
    pub target: UploadTarget,
    /// What it produced, or why it failed.
    pub result: Result<UploadResolution, EditorError>,
}

#[derive(Debug)]
pub(crate) struct QueuedUpload {
    pub(crate) ticket: UploadTicket,
    pub(crate) target: UploadTarget,
    pub(crate) bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub(crate) struct UploadQueue {
    next: u64,
    queued: VecDeque<QueuedUpload>,
}

impl UploadQueue {
    pub(crate) fn ticket(&mut self) -> UploadTicket {
        let ticket = UploadTicket(self.next);
        self.next += 1;
        ticket
    }

    pub(crate) fn push(&mut self, target: UploadTarget, bytes: Vec<u8>) -> UploadTicket {
        let ticket = self.ticket();
        self.queued.push_back(QueuedUpload {
            ticket,
            target,
            bytes,
        });
        ticket
    }

    pub(crate) fn pop(&mut self) -> Option<QueuedUpload> {
        self.queued.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.queued.len()
    }
}
