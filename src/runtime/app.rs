use std::rc::Rc;

use anyhow::{anyhow, Context as _, Result};
use fontdue::Font;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use codebuffer::commands::Cmd;
use codebuffer::messages::{Msg, ViewMsg, WindowMsg};
use codebuffer::model::AppModel;
use codebuffer::update::update;
use codebuffer::view::Renderer;

use super::input::key_to_msg;

/// Lines scrolled per wheel notch
const WHEEL_LINES: f32 = 3.0;

pub struct App {
    model: AppModel,
    /// Taken when the renderer is created
    font: Option<Font>,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    mouse_position: Option<(f64, f64)>,
    /// First fatal error; the loop exits and `main` reports it
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(model: AppModel, font: Font) -> Self {
        Self {
            model,
            font: Some(font),
            renderer: None,
            window: None,
            context: None,
            modifiers: ModifiersState::empty(),
            mouse_position: None,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.model.title.clone())
            .with_inner_size(LogicalSize::new(
                self.model.config.window_width,
                self.model.config.window_height,
            ));

        let window = Rc::new(
            event_loop
                .create_window(window_attributes)
                .context("creating window")?,
        );
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create softbuffer context: {}", e))?;

        let font = self
            .font
            .take()
            .context("font already consumed by a previous renderer")?;
        let renderer = Renderer::new(
            Rc::clone(&window),
            &context,
            font,
            self.model.config.font_size,
        )?;

        self.model
            .set_char_metrics(renderer.char_width(), renderer.line_height());
        let size = window.inner_size();
        self.model.resize(size.width, size.height);
        self.model.scrolled.ensure_cursor_visible();

        tracing::info!(
            "Window created: {}x{} at scale {}",
            size.width,
            size.height,
            renderer.scale_factor()
        );

        window.request_redraw();
        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{:#}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    /// Translate a window event into zero or more messages
    fn handle_event(&mut self, event: &WindowEvent) -> Result<Option<Cmd>> {
        let cmd = match event {
            WindowEvent::CloseRequested => {
                update(&mut self.model, Msg::Window(WindowMsg::CloseRequested))
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height)?;
                }
                update(
                    &mut self.model,
                    Msg::Window(WindowMsg::Resize(size.width, size.height)),
                )
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_scale_factor(*scale_factor)?;
                    self.model
                        .set_char_metrics(renderer.char_width(), renderer.line_height());
                }
                Some(Cmd::Redraw)
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.render(&self.model)?;
                }
                None
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                None
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                key_to_msg(&event.logical_key, self.modifiers)
                    .and_then(|msg| update(&mut self.model, msg))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (mut h_delta, mut v_delta) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        ((x * WHEEL_LINES) as i32, (-y * WHEEL_LINES) as i32)
                    }
                    MouseScrollDelta::PixelDelta(pos) => (
                        (pos.x / self.model.char_width as f64) as i32,
                        (-pos.y / self.model.line_height as f64) as i32,
                    ),
                };
                if self.modifiers.shift_key() && h_delta == 0 {
                    h_delta = v_delta;
                    v_delta = 0;
                }

                let v_cmd = (v_delta != 0)
                    .then(|| update(&mut self.model, Msg::View(ViewMsg::Scroll(v_delta))))
                    .flatten();
                let h_cmd = (h_delta != 0)
                    .then(|| {
                        update(
                            &mut self.model,
                            Msg::View(ViewMsg::ScrollHorizontal(h_delta)),
                        )
                    })
                    .flatten();
                v_cmd.or(h_cmd)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => match self.mouse_position {
                Some((x, y)) if self.model.text_area().contains(x as f32, y as f32) => {
                    let pos = self.model.pixel_to_position(x, y);
                    update(
                        &mut self.model,
                        Msg::View(ViewMsg::SetCursorPosition {
                            line: pos.line,
                            column: pos.column,
                        }),
                    )
                }
                _ => None,
            },
            _ => None,
        };
        Ok(cmd)
    }

    fn process_cmd(&mut self, cmd: Cmd, event_loop: &ActiveEventLoop) {
        if cmd.is_quit() {
            event_loop.exit();
            return;
        }
        if cmd.needs_redraw() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match self.handle_event(&event) {
            Ok(Some(cmd)) => self.process_cmd(cmd, event_loop),
            Ok(None) => {}
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Nothing animates; sleep until the next event
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}
