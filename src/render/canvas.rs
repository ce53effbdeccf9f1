use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{SplitreelError, SplitreelResult};

/// A rendered output frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// CPU raster target the compositor draws one frame into.
///
/// A frame is `begin_frame` -> any number of `fill_rect` -> `finish_frame`.
pub struct FrameCanvas {
    width: u16,
    height: u16,
    clear_rgba: [u8; 4],
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl FrameCanvas {
    pub fn new(canvas: Canvas, clear_rgba: [u8; 4]) -> SplitreelResult<Self> {
        let width: u16 = canvas.width.try_into().map_err(|_| {
            SplitreelError::render(format!("canvas width exceeds u16: {}", canvas.width))
        })?;
        let height: u16 = canvas.height.try_into().map_err(|_| {
            SplitreelError::render(format!("canvas height exceeds u16: {}", canvas.height))
        })?;
        if width == 0 || height == 0 {
            return Err(SplitreelError::render("canvas width/height must be > 0"));
        }
        Ok(Self {
            width,
            height,
            clear_rgba,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn size(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Start a new frame cleared to the background color.
    pub fn begin_frame(&mut self) {
        clear_pixmap(&mut self.pixmap, premul_rgba8(self.clear_rgba));
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        let [r, g, b, a] = self.clear_rgba;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Fill `rect` (clipped to the canvas) with a straight-alpha RGBA8 color.
    ///
    /// Empty or fully off-canvas rectangles are ignored.
    pub fn fill_rect(&mut self, rect: Rect, rgba: [u8; 4]) {
        let clipped = rect.intersect(self.size().bounds());
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            return;
        }
        let [r, g, b, a] = rgba;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            clipped.x0, clipped.y0, clipped.x1, clipped.y1,
        ));
    }

    /// Rasterize queued draws and read the frame back.
    pub fn finish_frame(&mut self) -> FrameRGBA {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
