use anyhow::Result;
use winit::window::Window;

use crate::device::{Gpu, GpuInit};

use super::markers::{MarkerPass, MarkerRenderer};
use super::{Frame, RenderTarget};

/// Render target backed by a window surface.
pub struct SurfaceTarget<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,
    markers: MarkerRenderer,
}

impl<'w> SurfaceTarget<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let gpu = Gpu::new(window, init).await?;
        Ok(Self {
            window,
            gpu,
            markers: MarkerRenderer::default(),
        })
    }
}

impl RenderTarget for SurfaceTarget<'_> {
    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        let Some(mut gpu_frame) = self.gpu.begin_frame()? else {
            return Ok(());
        };

        // Clear pass; dropped before the encoder is reused.
        {
            let _rpass = gpu_frame
                .encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("vista clear"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &gpu_frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(frame.clear.to_wgpu()),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });
        }

        self.markers.render(
            MarkerPass {
                device: self.gpu.device(),
                queue: self.gpu.queue(),
                format: self.gpu.surface_format(),
                buffer_size: self.gpu.size(),
                encoder: &mut gpu_frame.encoder,
                view: &gpu_frame.view,
            },
            &frame.markers,
        );

        self.window.pre_present_notify();
        self.gpu.submit(gpu_frame);
        Ok(())
    }
}
