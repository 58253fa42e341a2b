use std::path::Path;

use anyhow::{Result, anyhow};
use flappy_evo::simulation::mask::Mask;
use flappy_evo::simulation::scene::Scene;
use flappy_evo::simulation::silhouettes::{AGENT_FRAMES, Silhouettes};
use macroquad::prelude::*;

const AGENT_FILES: [&str; AGENT_FRAMES] = ["bird1.png", "bird2.png", "bird3.png"];
const SPRITE_SCALE: f32 = 2.0;
const HUD_FONT_SIZE: f32 = 50.0;
const HUD_MARGIN: f32 = 10.0;

/// A texture drawn at twice its pixel size.
struct Sprite {
    texture: Texture2D,
}

impl Sprite {
    fn new(image: &Image) -> Self {
        let texture = Texture2D::from_image(image);
        texture.set_filter(FilterMode::Nearest);
        Self { texture }
    }

    fn size(&self) -> Vec2 {
        vec2(self.texture.width(), self.texture.height()) * SPRITE_SCALE
    }

    fn draw(&self, x: f32, y: f32, params: DrawTextureParams) {
        draw_texture_ex(
            &self.texture,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(self.size()),
                ..params
            },
        );
    }
}

/// Every texture the renderer uses, loaded once at startup.
pub struct Assets {
    agent: Vec<Sprite>,
    barrier: Sprite,
    ground: Sprite,
    background: Sprite,
}

async fn load(dir: &Path, name: &str) -> Result<Image> {
    let path = dir.join(name);
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("asset path is not valid UTF-8: {}", path.display()))?;
    load_image(path_str)
        .await
        .map_err(|e| anyhow!("failed to load {}: {e:?}", path.display()))
}

fn mask_of(image: &Image) -> Mask {
    Mask::from_rgba(image.width as usize, image.height as usize, &image.bytes).scaled2x()
}

impl Assets {
    /// Loads the sprites and derives their collision silhouettes.
    pub async fn load(dir: &Path) -> Result<(Self, Silhouettes)> {
        let mut agent_images = Vec::with_capacity(AGENT_FRAMES);
        for name in AGENT_FILES {
            agent_images.push(load(dir, name).await?);
        }
        let barrier = load(dir, "pipe.png").await?;
        let ground = load(dir, "base.png").await?;
        let background = load(dir, "bg.png").await?;

        let agent_masks: [Mask; AGENT_FRAMES] =
            std::array::from_fn(|frame| mask_of(&agent_images[frame]));
        let silhouettes = Silhouettes::new(
            agent_masks,
            mask_of(&barrier),
            ground.width as f32 * SPRITE_SCALE,
        );

        let assets = Self {
            agent: agent_images.iter().map(Sprite::new).collect(),
            barrier: Sprite::new(&barrier),
            ground: Sprite::new(&ground),
            background: Sprite::new(&background),
        };

        Ok((assets, silhouettes))
    }
}

/// Training statistics shown in the top-left corner.
pub struct TrainingHud {
    /// Zero-based number of the generation on screen.
    pub generation: usize,
    /// Agents still in the air.
    pub alive: usize,
}

/// Draws one frame of either game.
pub fn draw_scene(assets: &Assets, scene: &Scene<'_>, hud: Option<&TrainingHud>) {
    clear_background(BLACK);
    assets.background.draw(0.0, 0.0, DrawTextureParams::default());

    for obstacle in scene.obstacles {
        assets.barrier.draw(
            obstacle.x,
            obstacle.top,
            DrawTextureParams {
                flip_y: true,
                ..Default::default()
            },
        );
        assets
            .barrier
            .draw(obstacle.x, obstacle.bottom, DrawTextureParams::default());
    }

    let ground = scene.ground;
    assets.ground.draw(ground.x1, ground.y, DrawTextureParams::default());
    assets.ground.draw(ground.x2, ground.y, DrawTextureParams::default());

    for agent in scene.agents {
        if let Some(sprite) = assets.agent.get(agent.frame) {
            sprite.draw(
                agent.x,
                agent.y,
                DrawTextureParams {
                    rotation: -agent.tilt.to_radians(),
                    ..Default::default()
                },
            );
        }
    }

    let score = format!("Score: {}", scene.score);
    let size = measure_text(&score, None, HUD_FONT_SIZE as u16, 1.0);
    draw_text(
        &score,
        screen_width() - HUD_MARGIN - size.width,
        HUD_MARGIN + size.offset_y,
        HUD_FONT_SIZE,
        WHITE,
    );

    if let Some(hud) = hud {
        let lines = [
            format!("Gen: {}", hud.generation),
            format!("Alive: {}", hud.alive),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text(
                line,
                HUD_MARGIN,
                HUD_MARGIN + HUD_FONT_SIZE * (i as f32 + 0.8),
                HUD_FONT_SIZE,
                WHITE,
            );
        }
    }
}

/// Centered message over the last frame.
pub fn draw_banner(text: &str) {
    let size = measure_text(text, None, HUD_FONT_SIZE as u16, 1.0);
    draw_text(
        text,
        screen_width() / 2.0 - size.width / 2.0,
        screen_height() / 2.0 - size.height / 2.0,
        HUD_FONT_SIZE,
        WHITE,
    );
}
