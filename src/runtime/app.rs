use std::rc::Rc;

use anyhow::{anyhow, Result};
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
#[cfg(debug_assertions)]
use winit::keyboard::{Key, NamedKey};
use winit::keyboard::ModifiersState;
use winit::window::Window;

use more_pane::host::{execute, Effects};
use more_pane::keymap::{keystroke_from_winit, Keystroke};
use more_pane::messages::{AppMsg, Msg};
use more_pane::model::{AppModel, TargetId};
use more_pane::theme::{load_theme, Theme};
use more_pane::update::update;
use more_pane::{Cmd, IdleQueue, PagerConfig};

use super::input::{target_action, TargetAction};
use super::shell::{Focus, KeyOrigin, Shell};
use crate::view::{load_font, Renderer};

pub struct App {
    model: AppModel,
    idle: IdleQueue,
    shell: Shell,
    theme: Theme,
    current: TargetId,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    /// Owns the display connection the renderer's surface draws through
    _context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    /// Set when window creation fails; reported after the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    /// Build the model and register one target per `(title, text)` pair
    pub fn new(config: PagerConfig, targets: Vec<(String, String)>) -> Self {
        let theme = resolve_theme(&config.theme);
        let mut model = AppModel::new(config);

        for (title, text) in targets {
            let target = model.next_target_id();
            update(
                &mut model,
                Msg::App(AppMsg::RegisterTarget {
                    target,
                    title,
                    text,
                }),
            );
        }

        let current = model
            .targets
            .keys()
            .next()
            .copied()
            .unwrap_or(TargetId(1));

        Self {
            model,
            idle: IdleQueue::new(),
            shell: Shell::new(current),
            theme,
            current,
            renderer: None,
            window: None,
            _context: None,
            modifiers: ModifiersState::empty(),
            error: None,
        }
    }

    /// Error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(format!("more-pane - {}", self.current_title()))
            .with_inner_size(LogicalSize::new(900, 600));

        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create graphics context: {}", e))?;

        let font = load_font(self.model.config.font_path.as_deref())?;
        let renderer = Renderer::new(
            Rc::clone(&window),
            &context,
            font,
            self.model.config.font_size,
        )?;

        let line_height = renderer.line_height();
        let size = window.inner_size();
        self.renderer = Some(renderer);
        self.window = Some(window);
        self._context = Some(context);

        let cmd = update(
            &mut self.model,
            Msg::App(AppMsg::FontChanged {
                line_height,
                status_bar_height: line_height,
            }),
        );
        self.apply(cmd);
        let cmd = update(&mut self.model, Msg::resize(size.width, size.height));
        self.apply(cmd);
        self.show_pager(self.current);
        Ok(())
    }

    fn current_title(&self) -> String {
        self.model
            .target(self.current)
            .map(|view| view.title.clone())
            .unwrap_or_default()
    }

    /// Execute a command against the shell, returning what the loop must do
    fn apply(&mut self, cmd: Option<Cmd>) -> Effects {
        match cmd {
            Some(cmd) => execute(cmd, &mut self.shell, &mut self.idle),
            None => Effects::default(),
        }
    }

    fn show_pager(&mut self, target: TargetId) -> Effects {
        let Some(text) = self.model.target(target).map(|view| view.text.clone()) else {
            return Effects::default();
        };
        let cmd = update(&mut self.model, Msg::show(target, text));
        self.apply(cmd)
    }

    fn switch_target(&mut self, target: TargetId) -> Effects {
        self.current = target;
        self.shell.focus = Focus::Target(target);
        if let Some(window) = &self.window {
            window.set_title(&format!("more-pane - {}", self.current_title()));
        }
        let mut effects = self.show_pager(target);
        effects.needs_redraw = true;
        effects
    }

    /// Keys that reach the target view, typed or replayed
    fn handle_target_key(
        &mut self,
        target: TargetId,
        keystroke: Keystroke,
        origin: KeyOrigin,
    ) -> Effects {
        self.shell
            .log(target, format!("{}: {}", origin.label(), keystroke));

        let mut effects = match target_action(&keystroke) {
            TargetAction::ShowPager => self.show_pager(target),
            TargetAction::NextTarget => match self.model.next_target(target) {
                Some(next) => self.switch_target(next),
                None => Effects::default(),
            },
            TargetAction::PrevTarget => match self.model.prev_target(target) {
                Some(prev) => self.switch_target(prev),
                None => Effects::default(),
            },
            TargetAction::ToggleStartAtTop => {
                let more = !self.model.start_at_top();
                let cmd = update(&mut self.model, Msg::App(AppMsg::SetStartAtTop(more)));
                if let Err(e) = self.model.config.save() {
                    tracing::warn!("Failed to save config: {}", e);
                }
                self.apply(cmd)
            }
            TargetAction::ReloadConfiguration => {
                let cmd = update(&mut self.model, Msg::App(AppMsg::ReloadConfiguration));
                self.theme = resolve_theme(&self.model.config.theme);
                self.apply(cmd)
            }
            TargetAction::Quit => self.apply(Some(Cmd::Quit)),
            TargetAction::None => Effects::default(),
        };
        effects.needs_redraw = true;
        effects
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Effects {
        match event {
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        tracing::error!("Resize failed: {}", e);
                    }
                }
                let cmd = update(&mut self.model, Msg::resize(size.width, size.height));
                self.apply(cmd)
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let Some(renderer) = &mut self.renderer else {
                    return Effects::default();
                };
                if let Err(e) = renderer.set_scale_factor(*scale_factor) {
                    tracing::error!("Scale change failed: {}", e);
                    return Effects::default();
                }
                let line_height = renderer.line_height();
                let cmd = update(
                    &mut self.model,
                    Msg::App(AppMsg::FontChanged {
                        line_height,
                        status_bar_height: line_height,
                    }),
                );
                self.apply(cmd)
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                Effects::default()
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                #[cfg(debug_assertions)]
                if event.logical_key == Key::Named(NamedKey::F7) {
                    let dump = crate::debug_dump::StateDump::capture(&self.model, &self.shell);
                    match dump.save_to_file() {
                        Ok(path) => eprintln!("[DEBUG] State dumped to: {}", path),
                        Err(e) => eprintln!("[DEBUG] Failed to dump state: {}", e),
                    }
                    return Effects::default();
                }

                let Some(keystroke) =
                    keystroke_from_winit(&event.logical_key, event.physical_key, self.modifiers)
                else {
                    return Effects::default();
                };

                match self.shell.focus {
                    Focus::Pager(target) => {
                        let cmd = update(&mut self.model, Msg::key(target, keystroke));
                        self.apply(cmd)
                    }
                    Focus::Target(target) => {
                        self.handle_target_key(target, keystroke, KeyOrigin::Typed)
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!("Render failed: {}", e);
                }
                Effects::default()
            }
            _ => Effects::default(),
        }
    }

    fn render(&mut self) -> Result<()> {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.model, &self.shell, &self.theme, self.current)?;
        }
        Ok(())
    }

    /// Run deferred closes, then hand replayed keys to their targets
    fn run_idle(&mut self) -> Effects {
        let mut effects = Effects::default();
        if self.idle.flush(&mut self.model, &mut self.shell) > 0 {
            effects.needs_redraw = true;
        }

        while let Some((target, keystroke)) = self.shell.replayed.pop_front() {
            let next = self.handle_target_key(target, keystroke, KeyOrigin::Replayed);
            effects.needs_redraw |= next.needs_redraw;
            effects.quit |= next.quit;
        }
        effects
    }

    fn finish(&self, event_loop: &ActiveEventLoop, effects: Effects) {
        if effects.quit {
            event_loop.exit();
        } else if effects.needs_redraw {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

fn resolve_theme(id: &str) -> Theme {
    load_theme(id).unwrap_or_else(|e| {
        tracing::warn!("Falling back to default theme: {}", e);
        Theme::default()
    })
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            self.error = Some(e);
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if !self.window.as_ref().is_some_and(|w| w.id() == window_id) {
            return;
        }
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let effects = self.handle_event(&event);
        self.finish(event_loop, effects);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if !self.idle.is_empty() {
            let effects = self.run_idle();
            self.finish(event_loop, effects);
        }
    }
}
