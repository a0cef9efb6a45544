use macroquad::prelude::*;

/// Something the world can be drawn onto.
///
/// The core only issues blits; it never reads pixels back.
pub trait Surface {
    /// Image handle accepted by [`Surface::blit`].
    type Image;

    /// Size of the drawable area in pixels.
    fn size(&self) -> Vec2;

    /// Size of `image` in pixels.
    fn image_size(&self, image: &Self::Image) -> Vec2;

    /// Draws `image` with its top-left corner at `dest`.
    fn blit(&mut self, image: &Self::Image, dest: Vec2, flip_x: bool);
}

/// Fixed-resolution render target that is upscaled to the window.
pub struct MacroquadSurface {
    target: RenderTarget,
    camera: Camera2D,
    size: Vec2,
}

impl MacroquadSurface {
    /// Render target of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let target = render_target(width, height);
        target.texture.set_filter(FilterMode::Nearest);
        let size = vec2(width as f32, height as f32);
        let camera = Camera2D {
            zoom: vec2(2.0 / size.x, 2.0 / size.y),
            target: size / 2.0,
            render_target: Some(target.clone()),
            ..Default::default()
        };
        Self { target, camera, size }
    }

    /// Redirects subsequent draw calls into the render target.
    pub fn begin(&self) {
        set_camera(&self.camera);
        clear_background(BLACK);
    }

    /// Scales the render target up to the whole window.
    pub fn present(&self) {
        set_default_camera();
        clear_background(BLACK);
        draw_texture_ex(
            &self.target.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
    }
}

impl Surface for MacroquadSurface {
    type Image = Texture2D;

    fn size(&self) -> Vec2 {
        self.size
    }

    fn image_size(&self, image: &Texture2D) -> Vec2 {
        image.size()
    }

    fn blit(&mut self, image: &Texture2D, dest: Vec2, flip_x: bool) {
        draw_texture_ex(
            image,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                flip_x,
                ..Default::default()
            },
        );
    }
}
