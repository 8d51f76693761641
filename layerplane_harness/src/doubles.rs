// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory collaborator doubles.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec;
use alloc::vec::Vec;

use layerplane_core::backend::{
    BufferError, BufferHandle, BufferProvider, BufferUsage, CommitTester, ContentType,
    ControlService, RevocationTarget, Status,
};
use layerplane_core::display::DisplaySnapshot;
use layerplane_core::layer::IntRect;
use layerplane_core::output::DisplayId;
use layerplane_core::range::ClientRange;

/// Bytes per pixel of buffers allocated by [`MemoryBuffers`].
pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug)]
struct Buffer {
    width: u32,
    height: u32,
    usage: BufferUsage,
    bytes: Vec<u8>,
    mapped: bool,
}

/// A [`BufferProvider`] backed by heap allocations.
#[derive(Debug, Default)]
pub struct MemoryBuffers {
    buffers: BTreeMap<BufferHandle, Buffer>,
    next: u64,
    fail_next: Option<i32>,
}

impl MemoryBuffers {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next allocation fail with `code`.
    pub fn fail_next_allocation(&mut self, code: i32) {
        self.fail_next = Some(code);
    }

    /// Releases a buffer.
    pub fn release(&mut self, handle: BufferHandle) -> Result<(), BufferError> {
        self.buffers
            .remove(&handle)
            .map(|_| ())
            .ok_or(BufferError::InvalidHandle(handle))
    }

    /// Number of live buffers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` if no buffer is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Usage flags a buffer was created with.
    #[must_use]
    pub fn usage(&self, handle: BufferHandle) -> Option<BufferUsage> {
        self.buffers.get(&handle).map(|b| b.usage)
    }

    /// The whole pixel store of a buffer.
    #[must_use]
    pub fn contents(&self, handle: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(&handle).map(|b| b.bytes.as_slice())
    }
}

impl BufferProvider for MemoryBuffers {
    fn create_buffer(
        &mut self,
        width: u32,
        height: u32,
        usage: BufferUsage,
    ) -> Result<BufferHandle, BufferError> {
        if let Some(code) = self.fail_next.take() {
            return Err(BufferError::AllocationFailed(code));
        }
        if width == 0 || height == 0 {
            return Err(BufferError::EmptyExtent);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
            .ok_or(BufferError::AllocationFailed(-12))?;

        let handle = BufferHandle(self.next);
        self.next += 1;
        self.buffers.insert(
            handle,
            Buffer {
                width,
                height,
                usage,
                bytes: vec![0; len],
                mapped: false,
            },
        );
        Ok(handle)
    }

    /// Maps the rows spanned by `rect`, from its top-left pixel to its
    /// bottom-right pixel inclusive.
    fn map(&mut self, handle: BufferHandle, rect: IntRect) -> Result<&mut [u8], BufferError> {
        let buffer = self
            .buffers
            .get_mut(&handle)
            .ok_or(BufferError::InvalidHandle(handle))?;
        if buffer.mapped {
            return Err(BufferError::AlreadyMapped);
        }
        let inside = rect.left >= 0
            && rect.top >= 0
            && rect.area() > 0
            && u64::try_from(rect.right).is_ok_and(|r| r <= u64::from(buffer.width))
            && u64::try_from(rect.bottom).is_ok_and(|b| b <= u64::from(buffer.height));
        if !inside {
            return Err(BufferError::RegionOutOfBounds);
        }

        let stride = buffer.width as usize;
        let px = |x: i32, y: i32| {
            (usize::try_from(y).unwrap_or(0) * stride + usize::try_from(x).unwrap_or(0))
                * BYTES_PER_PIXEL
        };
        let start = px(rect.left, rect.top);
        let end = px(rect.right, rect.bottom - 1);
        buffer.mapped = true;
        Ok(&mut buffer.bytes[start..end])
    }

    fn unmap(&mut self, handle: BufferHandle) -> Result<(), BufferError> {
        let buffer = self
            .buffers
            .get_mut(&handle)
            .ok_or(BufferError::InvalidHandle(handle))?;
        if !buffer.mapped {
            return Err(BufferError::NotMapped);
        }
        buffer.mapped = false;
        Ok(())
    }
}

/// Status returned for a display the service does not know.
pub const NO_SUCH_DISPLAY: Status = Status(-19);
/// Status returned for malformed arguments.
pub const INVALID_ARGUMENT: Status = Status(-22);

/// A [`ControlService`] that records sessions and revocation lists.
#[derive(Debug, Default)]
pub struct RecordingControl {
    displays: BTreeSet<DisplayId>,
    sessions: BTreeMap<DisplayId, ContentType>,
    revocations: Vec<(RevocationTarget, Vec<u8>)>,
}

impl RecordingControl {
    /// Creates a service that knows the given displays.
    #[must_use]
    pub fn new(displays: impl IntoIterator<Item = DisplayId>) -> Self {
        Self {
            displays: displays.into_iter().collect(),
            ..Self::default()
        }
    }

    /// The active protection level of `display`, if any.
    #[must_use]
    pub fn session(&self, display: DisplayId) -> Option<ContentType> {
        self.sessions.get(&display).copied()
    }

    /// Revocation lists received, oldest first.
    #[must_use]
    pub fn revocations(&self) -> &[(RevocationTarget, Vec<u8>)] {
        &self.revocations
    }
}

impl ControlService for RecordingControl {
    fn enable_content_protection(
        &mut self,
        display: DisplayId,
        content_type: ContentType,
    ) -> Status {
        if !self.displays.contains(&display) {
            return NO_SUCH_DISPLAY;
        }
        self.sessions.insert(display, content_type);
        Status::OK
    }

    fn disable_content_protection(&mut self, display: DisplayId) -> Status {
        if !self.displays.contains(&display) {
            return NO_SUCH_DISPLAY;
        }
        self.sessions.remove(&display);
        Status::OK
    }

    fn set_revocation_list(&mut self, target: RevocationTarget, list: &[u8]) -> Status {
        if list.is_empty() {
            return INVALID_ARGUMENT;
        }
        if let RevocationTarget::Display(display) = target
            && !self.displays.contains(&display)
        {
            return NO_SUCH_DISPLAY;
        }
        self.revocations.push((target, list.to_vec()));
        Status::OK
    }
}

/// A [`CommitTester`] that rejects plans needing more than a fixed number of
/// planes.
///
/// Stands in for a display controller whose real limit is tighter than the
/// budget it advertises.
#[derive(Clone, Copy, Debug)]
pub struct PlaneLimit {
    /// Planes the simulated hardware can actually drive.
    pub max_planes: usize,
    /// Plans tested so far.
    pub tested: u64,
    /// Plans rejected so far.
    pub rejected: u64,
}

impl PlaneLimit {
    /// Creates a tester accepting up to `max_planes` planes.
    #[must_use]
    pub const fn new(max_planes: usize) -> Self {
        Self {
            max_planes,
            tested: 0,
            rejected: 0,
        }
    }
}

impl CommitTester for PlaneLimit {
    fn test_commit(&mut self, snapshot: &DisplaySnapshot, client: ClientRange) -> bool {
        self.tested += 1;
        let device: usize = snapshot
            .layers
            .iter()
            .enumerate()
            .filter(|(z, _)| !client.contains(*z))
            .map(|(_, l)| l.plane_cost())
            .sum();
        let required = device + usize::from(!client.is_empty());
        let accepted = required <= self.max_planes;
        if !accepted {
            self.rejected += 1;
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::cascade;
    use layerplane_core::display::Display;
    use layerplane_core::planner::Planner;
    use layerplane_core::trace::Tracer;

    #[test]
    fn buffers_allocate_map_and_release() {
        let mut mem = MemoryBuffers::new();
        let usage = BufferUsage {
            cpu_write: true,
            ..BufferUsage::default()
        };
        let h = mem.create_buffer(4, 4, usage).unwrap();
        assert_eq!(mem.usage(h), Some(usage));

        let region = mem.map(h, IntRect::new(1, 1, 3, 2)).unwrap();
        assert_eq!(region.len(), 2 * BYTES_PER_PIXEL);
        region.fill(0xff);
        assert_eq!(
            mem.map(h, IntRect::new(0, 0, 1, 1)).unwrap_err(),
            BufferError::AlreadyMapped
        );
        mem.unmap(h).unwrap();
        assert_eq!(mem.unmap(h).unwrap_err(), BufferError::NotMapped);

        let bytes = mem.contents(h).unwrap();
        assert_eq!(bytes[5 * BYTES_PER_PIXEL], 0xff);
        assert_eq!(bytes[4 * BYTES_PER_PIXEL], 0);

        mem.release(h).unwrap();
        assert!(mem.is_empty());
        assert_eq!(
            mem.map(h, IntRect::new(0, 0, 1, 1)).unwrap_err(),
            BufferError::InvalidHandle(h)
        );
    }

    #[test]
    fn buffer_errors() {
        let mut mem = MemoryBuffers::new();
        let usage = BufferUsage::default();
        assert_eq!(
            mem.create_buffer(0, 4, usage).unwrap_err(),
            BufferError::EmptyExtent
        );
        mem.fail_next_allocation(-5);
        assert_eq!(
            mem.create_buffer(4, 4, usage).unwrap_err(),
            BufferError::AllocationFailed(-5)
        );
        let h = mem.create_buffer(4, 4, usage).unwrap();
        assert_eq!(
            mem.map(h, IntRect::new(2, 2, 5, 3)).unwrap_err(),
            BufferError::RegionOutOfBounds
        );
        assert_eq!(
            mem.map(h, IntRect::new(-1, 0, 2, 2)).unwrap_err(),
            BufferError::RegionOutOfBounds
        );
    }

    #[test]
    fn control_tracks_sessions() {
        let mut ctl = RecordingControl::new([DisplayId(0), DisplayId(1)]);
        assert!(ctl.enable_content_protection(DisplayId(1), ContentType::Type1).is_ok());
        assert_eq!(ctl.session(DisplayId(1)), Some(ContentType::Type1));
        assert!(ctl.disable_content_protection(DisplayId(1)).is_ok());
        assert_eq!(ctl.session(DisplayId(1)), None);
        assert_eq!(
            ctl.enable_content_protection(DisplayId(9), ContentType::Type0),
            NO_SUCH_DISPLAY
        );
    }

    #[test]
    fn control_records_revocations() {
        let mut ctl = RecordingControl::new([DisplayId(0)]);
        assert!(ctl.set_revocation_list(RevocationTarget::All, &[1, 2]).is_ok());
        assert_eq!(
            ctl.set_revocation_list(RevocationTarget::All, &[]),
            INVALID_ARGUMENT
        );
        assert_eq!(
            ctl.set_revocation_list(RevocationTarget::Display(DisplayId(3)), &[1]),
            NO_SUCH_DISPLAY
        );
        assert_eq!(ctl.revocations().len(), 1);
        assert_eq!(ctl.revocations()[0].1, [1, 2]);
    }

    #[test]
    fn plane_limit_forces_client_fallback() {
        let mut display = Display::new(DisplayId(0));
        let mut snapshot = DisplaySnapshot::new(cascade(4, 8.0), 4);
        let mut tester = PlaneLimit::new(2);
        Planner::default().validate_with_test(
            &mut display,
            &mut snapshot,
            None,
            &mut tester,
            &mut Tracer::none(),
        );
        assert_eq!(tester.tested, 1);
        assert_eq!(tester.rejected, 1);
        assert!(snapshot.layers.iter().all(|l| l.is_client()));
        assert_eq!(display.stats.failed_commit_tests, 1);
    }

    #[test]
    fn plane_limit_accepts_fitting_plan() {
        let mut display = Display::new(DisplayId(0));
        let mut snapshot = DisplaySnapshot::new(cascade(5, 8.0), 3);
        let mut tester = PlaneLimit::new(3);
        Planner::default().validate_with_test(
            &mut display,
            &mut snapshot,
            None,
            &mut tester,
            &mut Tracer::none(),
        );
        assert_eq!(tester.rejected, 0);
        assert_eq!(display.stats.failed_commit_tests, 0);
    }
}
