//! Window event handling for the showcase.

use winit::event::{MouseScrollDelta, WindowEvent};

impl crate::Showcase {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
                false
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.process_cursor_left();
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                match delta {
                    MouseScrollDelta::LineDelta(_, lines) => self.input.process_scroll_lines(lines),
                    MouseScrollDelta::PixelDelta(pos) => self.input.process_scroll_pixels(pos.y),
                }
                false
            }
            WindowEvent::RedrawRequested => {
                if !self.running {
                    return true;
                }
                self.update();
                if let Err(e) = self.render() {
                    match e.downcast_ref::<wgpu::SurfaceError>() {
                        Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            log::warn!("Surface {:?}, reconfiguring", e);
                            self.renderer.reconfigure();
                        }
                        Some(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            self.shutdown();
                        }
                        _ => log::error!("Render error: {:?}", e),
                    }
                }
                if self.running {
                    self.renderer.window.request_redraw();
                }
                !self.running
            }
            _ => false,
        }
    }

    /// Stop requesting frames and tear down the loading sequence.
    pub(crate) fn shutdown(&mut self) {
        if self.running {
            log::info!("Shutting down after {} frames", self.time.frame_count());
        }
        self.running = false;
        if let Some(mut loading) = self.loading.take() {
            loading.cancel();
        }
    }
}
