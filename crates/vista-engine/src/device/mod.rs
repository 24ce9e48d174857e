//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and mapping surface errors to actions

mod gpu;
mod init;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
