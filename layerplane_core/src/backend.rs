// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the collaborators around the planner.
//!
//! The planner itself is pure: it reads a [`DisplaySnapshot`] and writes
//! decisions. The hardware-facing pieces of a composer live behind these
//! traits so platforms can supply them and tests can substitute doubles:
//!
//! - **[`CommitTester`]**: asks the display controller whether a proposed
//!   plan would be accepted, without presenting it. The planner consults it
//!   after stamping; a rejected plan is replaced by full client composition.
//!
//! - **[`BufferProvider`]**: allocates and maps pixel buffers. Used upstream
//!   to materialize layer contents; the planner never calls it.
//!
//! - **[`ControlService`]**: synchronous remote calls that manage content
//!   protection sessions per display. Also outside the planning pass.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_refresh(display: &mut Display, layers: Vec<Layer>, planes: usize) {
//!     let mut snapshot = DisplaySnapshot::new(layers, planes);
//!     display.prepare(&mut snapshot);
//!
//!     let video = DeviceRange::from_video_layers(&snapshot.layers);
//!     let result = planner.validate_with_test(
//!         display, &mut snapshot, video, &mut kms, &mut Tracer::none(),
//!     );
//!
//!     if result == ValidationResult::HasChanges {
//!         // Composite the client range on the GPU, then commit.
//!     }
//! }
//! ```

use core::fmt;

use crate::display::DisplaySnapshot;
use crate::layer::IntRect;
use crate::output::DisplayId;
use crate::range::ClientRange;

/// Checks whether the hardware would accept a plan.
pub trait CommitTester {
    /// Returns `true` if the stamped `snapshot` with `client` composited on
    /// the GPU can be committed.
    fn test_commit(&mut self, snapshot: &DisplaySnapshot, client: ClientRange) -> bool;
}

/// Opaque handle to a buffer owned by a [`BufferProvider`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferHandle(pub u64);

impl fmt::Debug for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BufferHandle({})", self.0)
    }
}

/// Intended use of a buffer, forwarded to the allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BufferUsage {
    /// The CPU will write into the buffer.
    pub cpu_write: bool,
    /// The buffer will be scanned out by a hardware plane.
    pub scanout: bool,
    /// The GPU will sample from the buffer.
    pub gpu_texture: bool,
}

/// Errors from [`BufferProvider`] operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator refused the request (status code from the allocator).
    AllocationFailed(i32),
    /// Width or height was zero.
    EmptyExtent,
    /// The handle is unknown or already released.
    InvalidHandle(BufferHandle),
    /// The requested region is not inside the buffer.
    RegionOutOfBounds,
    /// The buffer is already mapped.
    AlreadyMapped,
    /// The buffer is not mapped.
    NotMapped,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed(code) => write!(f, "buffer allocation failed ({code})"),
            Self::EmptyExtent => f.write_str("buffer extent is empty"),
            Self::InvalidHandle(h) => write!(f, "unknown buffer {h:?}"),
            Self::RegionOutOfBounds => f.write_str("mapped region is outside the buffer"),
            Self::AlreadyMapped => f.write_str("buffer is already mapped"),
            Self::NotMapped => f.write_str("buffer is not mapped"),
        }
    }
}

impl core::error::Error for BufferError {}

/// Allocates and maps pixel buffers.
pub trait BufferProvider {
    /// Allocates a `width × height` buffer.
    fn create_buffer(
        &mut self,
        width: u32,
        height: u32,
        usage: BufferUsage,
    ) -> Result<BufferHandle, BufferError>;

    /// Maps `rect` of the buffer for CPU access.
    fn map(&mut self, handle: BufferHandle, rect: IntRect) -> Result<&mut [u8], BufferError>;

    /// Ends CPU access started by [`map`](Self::map).
    fn unmap(&mut self, handle: BufferHandle) -> Result<(), BufferError>;
}

/// Status code returned by [`ControlService`] calls. Zero means success.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status(pub i32);

impl Status {
    /// The success status.
    pub const OK: Self = Self(0);

    /// Returns `true` for the success status.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status({})", self.0)
    }
}

/// Content protection level requested for a display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Protected content that may travel over any protected link.
    Type0,
    /// Protected content restricted to the strictest link protection.
    Type1,
}

/// Which displays a revocation list applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevocationTarget {
    /// A single display.
    Display(DisplayId),
    /// Every display.
    All,
}

/// Synchronous control-plane calls for content protection.
pub trait ControlService {
    /// Starts a protected session on `display`.
    fn enable_content_protection(
        &mut self,
        display: DisplayId,
        content_type: ContentType,
    ) -> Status;

    /// Ends the protected session on `display`.
    fn disable_content_protection(&mut self, display: DisplayId) -> Status;

    /// Installs a revocation list.
    fn set_revocation_list(&mut self, target: RevocationTarget, list: &[u8]) -> Status;
}
