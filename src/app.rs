//! Application window and OpenGL context management.
//!
//! Window creation, OpenGL context setup and the egui integration live here,
//! away from scene logic.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::sync::Arc;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use egui_glow::EguiGlow;

use crate::constants::*;
use crate::error::GameError;

/// Result of window and GL context creation.
pub struct WindowContext {
    pub window: Window,
    pub gl_surface: glutin::surface::Surface<WindowSurface>,
    pub gl_context: glutin::context::PossiblyCurrentContext,
    pub gl: Arc<glow::Context>,
    pub egui_glow: EguiGlow,
}

/// Create a window with OpenGL context and egui integration.
pub fn create_window(event_loop: &ActiveEventLoop, width: u32, height: u32) -> Result<WindowContext, GameError> {
    let window_attrs = WindowAttributes::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size(PhysicalSize::new(width, height))
        .with_resizable(true);

    let template = ConfigTemplateBuilder::new().with_alpha_size(8);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            // Prefer the config with the most multisampling
            configs
                .max_by_key(|config| config.num_samples())
                .expect("display offered no GL configs")
        })
        .map_err(|e| GameError::Window(e.to_string()))?;

    let window = window.ok_or_else(|| GameError::Window("display builder returned no window".to_string()))?;
    let window_handle = window
        .window_handle()
        .map_err(|e| GameError::Window(e.to_string()))?;
    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(window_handle.as_raw()));

    let gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attrs)
            .map_err(|e| GameError::Window(format!("failed to create OpenGL context: {e}")))?
    };

    let size = window.inner_size();
    let surface_width = NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN);
    let surface_height = NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN);
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        window_handle.as_raw(),
        surface_width,
        surface_height,
    );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attrs)
            .map_err(|e| GameError::Window(format!("failed to create surface: {e}")))?
    };

    let gl_context = gl_context
        .make_current(&gl_surface)
        .map_err(|e| GameError::Window(format!("failed to make context current: {e}")))?;

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function(|s| match CString::new(s) {
            Ok(s) => gl_display.get_proc_address(&s) as *const _,
            Err(_) => std::ptr::null(),
        })
    });

    let egui_glow = EguiGlow::new(event_loop, gl.clone(), None, None, false);

    log::info!("created {}x{} window", size.width, size.height);

    Ok(WindowContext {
        window,
        gl_surface,
        gl_context,
        gl,
        egui_glow,
    })
}

/// Resize the GL surface to match the window size.
pub fn resize_surface(
    gl_surface: &glutin::surface::Surface<WindowSurface>,
    gl_context: &glutin::context::PossiblyCurrentContext,
    width: u32,
    height: u32,
) {
    if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
        gl_surface.resize(gl_context, width, height);
    }
}
