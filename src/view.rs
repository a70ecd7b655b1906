//! Software renderer for the target view and the pager overlay

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{anyhow, Context as _, Result};
use fontdue::{Font, FontSettings, LineMetrics, Metrics};
use softbuffer::Surface;
use winit::window::Window;

use more_pane::model::{AppModel, PagerSession, Rect, TargetId};
use more_pane::overlay::{blend_pixel, Frame};
use more_pane::theme::Theme;
use more_pane::util::expand_tabs_for_display;

use crate::runtime::input::TARGET_HINT;
use crate::runtime::shell::Shell;

/// Glyph cache key: character and font size bits
type GlyphCache = HashMap<(char, u32), (Metrics, Vec<u8>)>;

/// Horizontal padding inside the target view and the overlay
const TEXT_PADDING: usize = 6;

#[cfg(target_os = "macos")]
const SYSTEM_FONTS: &[&str] = &[
    "/System/Library/Fonts/SFNSMono.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "/Library/Fonts/Courier New.ttf",
];

#[cfg(target_os = "windows")]
const SYSTEM_FONTS: &[&str] = &[
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
];

/// Load the configured font, or the first monospace system font found
pub fn load_font(configured: Option<&Path>) -> Result<Font> {
    let path: PathBuf = match configured {
        Some(path) => path.to_path_buf(),
        None => SYSTEM_FONTS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .ok_or_else(|| anyhow!("No monospace font found; pass --font or set font_path"))?,
    };

    let bytes =
        std::fs::read(&path).with_context(|| format!("Failed to read font {}", path.display()))?;
    let font = Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| anyhow!("Failed to load font {}: {}", path.display(), e))?;
    tracing::info!("Using font {}", path.display());
    Ok(font)
}

pub struct Renderer {
    font: Font,
    surface: Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
    base_font_size: f32,
    font_size: f32,
    line_metrics: LineMetrics,
    glyph_cache: GlyphCache,
    scale_factor: f64,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        font: Font,
        base_font_size: f32,
    ) -> Result<Self> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;
        resize_surface(&mut surface, size.width, size.height)?;

        let font_size = base_font_size * scale_factor as f32;
        let line_metrics = font
            .horizontal_line_metrics(font_size)
            .ok_or_else(|| anyhow!("Font missing horizontal line metrics"))?;

        Ok(Self {
            font,
            surface,
            width: size.width,
            height: size.height,
            base_font_size,
            font_size,
            line_metrics,
            glyph_cache: HashMap::new(),
            scale_factor,
        })
    }

    pub fn line_height(&self) -> usize {
        self.line_metrics.new_line_size.ceil() as usize
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        resize_surface(&mut self.surface, width, height)
    }

    /// Re-derive font metrics after a DPI change
    pub fn set_scale_factor(&mut self, scale_factor: f64) -> Result<()> {
        self.scale_factor = scale_factor;
        self.font_size = self.base_font_size * scale_factor as f32;
        self.line_metrics = self
            .font
            .horizontal_line_metrics(self.font_size)
            .ok_or_else(|| anyhow!("Font missing horizontal line metrics"))?;
        Ok(())
    }

    pub fn render(
        &mut self,
        model: &AppModel,
        shell: &Shell,
        theme: &Theme,
        current: TargetId,
    ) -> Result<()> {
        let (width, height) = (self.width as usize, self.height as usize);
        let line_height = self.line_height();
        let mut painter = TextPainter {
            font: &self.font,
            glyph_cache: &mut self.glyph_cache,
            font_size: self.font_size,
            ascent: self.line_metrics.ascent,
            line_height,
        };

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to get surface buffer: {}", e))?;

        {
            let mut frame = Frame::new(&mut buffer[..], width, height);
            frame.clear(theme.target.background.to_argb_u32());

            render_target(&mut frame, &mut painter, model, shell, theme, current);
            render_status_bar(&mut frame, &mut painter, model, theme, current);

            if let (Some(bounds), Some(session)) =
                (shell.overlay(current), model.session(current))
            {
                if session.is_active() {
                    render_pager(&mut frame, &mut painter, session, bounds, theme);
                }
            }
        }

        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}

fn resize_surface(surface: &mut Surface<Rc<Window>, Rc<Window>>, width: u32, height: u32) -> Result<()> {
    let w = NonZeroU32::new(width.max(1)).ok_or_else(|| anyhow!("zero width"))?;
    let h = NonZeroU32::new(height.max(1)).ok_or_else(|| anyhow!("zero height"))?;
    surface
        .resize(w, h)
        .map_err(|e| anyhow!("Failed to resize surface: {}", e))
}

/// Title row, key hint and the target's key log
fn render_target(
    frame: &mut Frame,
    painter: &mut TextPainter,
    model: &AppModel,
    shell: &Shell,
    theme: &Theme,
    current: TargetId,
) {
    let lh = painter.line_height;
    let full = Rect::new(0, 0, frame.width, frame.height);
    let fg = theme.target.foreground.to_argb_u32();
    let muted = theme.target.muted.to_argb_u32();

    let title = match model.target(current) {
        Some(view) => format!(
            "{}  [{} of {}]",
            view.title,
            model.targets.keys().position(|id| *id == current).map_or(0, |i| i + 1),
            model.targets.len()
        ),
        None => current.to_string(),
    };
    painter.draw(frame, full, TEXT_PADDING, 0, &title, fg);
    painter.draw(frame, full, TEXT_PADDING, lh, TARGET_HINT, muted);

    // Newest entries at the bottom, above the status bar
    let rows = (frame.height / lh.max(1)).saturating_sub(4);
    let lines: Vec<&str> = shell.log_lines(current).rev().take(rows).collect();
    for (row, line) in lines.iter().rev().enumerate() {
        painter.draw(frame, full, TEXT_PADDING, (row + 3) * lh, line, muted);
    }
}

fn render_status_bar(
    frame: &mut Frame,
    painter: &mut TextPainter,
    model: &AppModel,
    theme: &Theme,
    current: TargetId,
) {
    let lh = painter.line_height;
    let bar = Rect::new(0, frame.height.saturating_sub(lh), frame.width, lh);
    frame.fill_rect(bar, theme.status_bar.background.to_argb_u32());

    let mode = if model.start_at_top() {
        "start at top"
    } else {
        "start at end"
    };
    let text = match model.session(current) {
        Some(session) if session.is_active() => format!(
            "{}  {:?}  line {}/{}  ({})",
            current,
            session.state(),
            (session.first_visible_line() + session.viewport_lines()).min(session.total_lines()),
            session.total_lines(),
            mode
        ),
        _ => format!("{}  ({})", current, mode),
    };
    painter.draw(
        frame,
        bar,
        bar.x + TEXT_PADDING,
        bar.y,
        &text,
        theme.status_bar.foreground.to_argb_u32(),
    );
}

fn render_pager(
    frame: &mut Frame,
    painter: &mut TextPainter,
    session: &PagerSession,
    bounds: Rect,
    theme: &Theme,
) {
    let Some(layout) = session.layout() else {
        return;
    };

    frame.fill_rect(bounds, theme.pager.background.to_argb_u32());
    frame.etched_border(
        bounds,
        theme.pager.border_shadow.to_argb_u32(),
        theme.pager.border_highlight.to_argb_u32(),
    );

    let text_area = layout.text_area();
    let fg = theme.pager.foreground.to_argb_u32();
    for (row, line) in session.visible_lines().enumerate() {
        let line = expand_tabs_for_display(&line.to_string());
        let y = text_area.y + row * layout.line_height;
        painter.draw(frame, text_area, text_area.x + TEXT_PADDING, y, &line, fg);
    }

    let prompt = layout.prompt_area();
    painter.draw(
        frame,
        prompt,
        prompt.x + TEXT_PADDING,
        prompt.y,
        session.status_message(),
        theme.pager.prompt.to_argb_u32(),
    );
}

/// Draws text with cached glyph bitmaps
struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
    font_size: f32,
    ascent: f32,
    line_height: usize,
}

impl TextPainter<'_> {
    /// Draw one line of text with its top at `y`, clipped to `clip`
    fn draw(&mut self, frame: &mut Frame, clip: Rect, x: usize, y: usize, text: &str, color: u32) {
        let mut current_x = x as f32;
        let baseline = y as f32 + self.ascent;
        let rgb = color & 0x00FFFFFF;

        for ch in text.chars() {
            if current_x as usize >= clip.right() {
                break;
            }

            let (metrics, bitmap) = self
                .glyph_cache
                .entry((ch, self.font_size.to_bits()))
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                    if alpha == 0 {
                        continue;
                    }
                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px < 0 || py < 0 {
                        continue;
                    }
                    let (px, py) = (px as usize, py as usize);
                    if clip.contains(px, py) && px < frame.width && py < frame.height {
                        let idx = py * frame.width + px;
                        frame.buffer[idx] =
                            blend_pixel(((alpha as u32) << 24) | rgb, frame.buffer[idx]);
                    }
                }
            }

            current_x += metrics.advance_width;
        }
    }
}
