//! SDL2 drawing of the level, the entities, the HUD and the stage banners.
//!
//! Everything here lives in non-send resources: the canvas, the sprite set and the
//! text renderer are all tied to the SDL video thread.

use std::collections::HashMap;

use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{NonSend, NonSendMut, Query, Res};
use glam::{IVec2, UVec2};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::rwops::RWops;
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{Window, WindowContext};
use tracing::{debug, warn};

use crate::asset::{Asset, DrawableSource};
use crate::constants::mechanics::{BONUS_SIZE, ENEMY_SIZE, PLAYER_SIZE};
use crate::constants::ui::{
    BANNER_FONT_SIZE, BLACK, DETAIL_FONT_SIZE, GRAY, GREEN, HUD_FONT_SIZE, HUD_POSITION, WHITE,
};
use crate::constants::CANVAS_SIZE;
use crate::error::{AssetError, GameError, GameResult};
use crate::map::builder::Level;
use crate::systems::{Enemy, EnemyKind, GameStage, LevelNumber, Player, ScoreResource};

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::RGB(r, g, b)
}

/// A drawable loaded from an asset, or the solid block standing in for it.
pub enum Sprite {
    Texture(Texture),
    Solid(Color),
}

impl Sprite {
    /// Loads the drawable for `asset`, falling back to its placeholder colour when the
    /// file is missing or cannot be decoded.
    pub fn load(texture_creator: &TextureCreator<WindowContext>, asset: Asset, size: u32) -> Sprite {
        match asset.resolve(UVec2::splat(size)) {
            DrawableSource::Image { bytes, .. } => match texture_creator.load_texture_bytes(bytes.as_ref()) {
                Ok(texture) => Sprite::Texture(texture),
                Err(reason) => {
                    let error = AssetError::Decode {
                        name: asset.as_ref().to_string(),
                        reason,
                    };
                    warn!(%error, "Using placeholder for undecodable asset");
                    Sprite::Solid(rgb(asset.placeholder_color()))
                }
            },
            DrawableSource::Placeholder { color, .. } => Sprite::Solid(rgb(color)),
        }
    }

    /// Draws into `dst`, rotated counter-clockwise by `degrees` around its centre.
    fn draw(&self, canvas: &mut Canvas<Window>, dst: Rect, degrees: f64) -> Result<(), String> {
        match self {
            // SDL rotates clockwise
            Sprite::Texture(texture) => canvas.copy_ex(texture, None, dst, -degrees, None, false, false),
            Sprite::Solid(color) => {
                canvas.set_draw_color(*color);
                canvas.fill_rect(dst)
            }
        }
    }
}

/// The player and enemy drawables, loaded once at startup.
pub struct SpriteSet {
    player: Sprite,
    red: Sprite,
    orange: Sprite,
}

impl SpriteSet {
    pub fn load(texture_creator: &TextureCreator<WindowContext>) -> Self {
        Self {
            player: Sprite::load(texture_creator, Asset::Pacman, PLAYER_SIZE),
            red: Sprite::load(texture_creator, EnemyKind::Red.asset(), ENEMY_SIZE),
            orange: Sprite::load(texture_creator, EnemyKind::Orange.asset(), ENEMY_SIZE),
        }
    }

    fn enemy(&self, kind: EnemyKind) -> &Sprite {
        match kind {
            EnemyKind::Red => &self.red,
            EnemyKind::Orange => &self.orange,
        }
    }
}

/// The embedded font at each of the sizes the HUD uses.
pub struct Fonts {
    hud: Font<'static, 'static>,
    banner: Font<'static, 'static>,
    detail: Font<'static, 'static>,
}

impl Fonts {
    pub fn load(ttf: &'static Sdl2TtfContext) -> GameResult<Fonts> {
        let bytes: &'static [u8] = Box::leak(Asset::Font.get_bytes()?.into_owned().into_boxed_slice());
        let load = |size: u16| -> GameResult<Font<'static, 'static>> {
            let rwops = RWops::from_bytes(bytes).map_err(GameError::Sdl)?;
            ttf.load_font_from_rwops(rwops, size).map_err(GameError::Sdl)
        };

        Ok(Fonts {
            hud: load(HUD_FONT_SIZE)?,
            banner: load(BANNER_FONT_SIZE)?,
            detail: load(DETAIL_FONT_SIZE)?,
        })
    }
}

/// Fixed places text is drawn. Each keeps at most one cached texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TextSlot {
    Hud,
    Banner,
    FinalScore,
    Prompt,
}

/// Side of one glyph of the built-in SDL2_gfx bitmap font, in pixels.
const BITMAP_GLYPH_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    TopLeft(IVec2),
    Center(IVec2),
}

impl Anchor {
    /// Top-left corner of a `size` box placed at this anchor.
    fn top_left(self, size: UVec2) -> IVec2 {
        match self {
            Anchor::TopLeft(at) => at,
            Anchor::Center(at) => at - (size / 2).as_ivec2(),
        }
    }
}

/// Pixel size of `text` drawn with the bitmap font.
fn bitmap_text_size(text: &str) -> UVec2 {
    UVec2::new(text.chars().count() as u32 * BITMAP_GLYPH_SIZE, BITMAP_GLYPH_SIZE)
}

/// Renders text, re-rasterising a slot only when its string changes.
///
/// Without fonts, text is drawn with the SDL2_gfx bitmap font at the same anchors.
pub struct TextRenderer {
    texture_creator: &'static TextureCreator<WindowContext>,
    fonts: Option<Fonts>,
    cache: HashMap<TextSlot, (String, Texture)>,
}

impl TextRenderer {
    pub fn new(texture_creator: &'static TextureCreator<WindowContext>, fonts: Option<Fonts>) -> Self {
        Self {
            texture_creator,
            fonts,
            cache: HashMap::new(),
        }
    }

    fn texture(&mut self, slot: TextSlot, text: &str, color: Color) -> GameResult<Option<&Texture>> {
        let Some(fonts) = &self.fonts else {
            return Ok(None);
        };

        let stale = self.cache.get(&slot).is_none_or(|(cached, _)| cached != text);
        if stale {
            let font = match slot {
                TextSlot::Hud => &fonts.hud,
                TextSlot::Banner => &fonts.banner,
                TextSlot::FinalScore | TextSlot::Prompt => &fonts.detail,
            };
            let surface = font.render(text).blended(color).map_err(|e| GameError::Sdl(e.to_string()))?;
            let texture = self
                .texture_creator
                .create_texture_from_surface(&surface)
                .map_err(|e| GameError::Sdl(e.to_string()))?;

            debug!(?slot, text, "Rasterised text");
            if let Some((_, old)) = self.cache.insert(slot, (text.to_string(), texture)) {
                // SAFETY: the texture creator is leaked, so it outlives every texture it made.
                unsafe { old.destroy() };
            }
        }

        Ok(self.cache.get(&slot).map(|(_, texture)| texture))
    }

    fn draw(&mut self, canvas: &mut Canvas<Window>, slot: TextSlot, text: &str, color: Color, anchor: Anchor) -> GameResult<()> {
        let Some(texture) = self.texture(slot, text, color)? else {
            let at = anchor.top_left(bitmap_text_size(text));
            return canvas.string(at.x as i16, at.y as i16, text, color).map_err(GameError::Sdl);
        };

        let query = texture.query();
        let at = anchor.top_left(UVec2::new(query.width, query.height));
        canvas
            .copy(texture, None, Rect::new(at.x, at.y, query.width, query.height))
            .map_err(GameError::Sdl)
    }
}

/// Draws one full frame and presents it.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    sprites: NonSend<SpriteSet>,
    mut text: NonSendMut<TextRenderer>,
    level: Res<Level>,
    stage: Res<GameStage>,
    score: Res<ScoreResource>,
    level_number: Res<LevelNumber>,
    players: Query<&Player>,
    enemies: Query<&Enemy>,
    mut errors: EventWriter<GameError>,
) {
    let canvas = &mut *canvas;
    canvas.set_draw_color(rgb(BLACK));
    canvas.clear();

    let mut draw = || -> GameResult<()> {
        draw_level(canvas, &level).map_err(GameError::Sdl)?;
        draw_entities(canvas, &sprites, &players, &enemies).map_err(GameError::Sdl)?;
        draw_hud(canvas, &mut text, *stage, score.0, level_number.0)
    };

    if let Err(e) = draw() {
        errors.write(e);
    }

    canvas.present();
}

fn draw_level(canvas: &mut Canvas<Window>, level: &Level) -> Result<(), String> {
    canvas.set_draw_color(rgb(GRAY));
    for wall in &level.walls {
        let hitbox = wall.hitbox;
        canvas.fill_rect(Rect::new(hitbox.position.x, hitbox.position.y, hitbox.size.x, hitbox.size.y))?;
    }

    canvas.set_blend_mode(BlendMode::Blend);
    let radius = (BONUS_SIZE / 2) as i16;
    for bonus in level.bonuses.iter().filter(|bonus| !bonus.collected) {
        let center = bonus.center();
        let (r, g, b) = bonus.color();
        canvas.filled_circle(center.x as i16, center.y as i16, radius, Color::RGB(r, g, b))?;
        canvas.filled_circle(
            center.x as i16,
            center.y as i16,
            radius + 1,
            Color::RGBA(r, g, b, bonus.glow_alpha()),
        )?;
    }
    canvas.set_blend_mode(BlendMode::None);

    Ok(())
}

fn draw_entities(
    canvas: &mut Canvas<Window>,
    sprites: &SpriteSet,
    players: &Query<&Player>,
    enemies: &Query<&Enemy>,
) -> Result<(), String> {
    for player in players.iter() {
        let scaled = (PLAYER_SIZE as f32 * player.mouth_scale()) as u32;
        let offset = ((PLAYER_SIZE - scaled) / 2) as i32;
        let dst = Rect::new(player.position.x + offset, player.position.y + offset, scaled, scaled);
        sprites.player.draw(canvas, dst, player.rotation_degrees())?;
    }

    for enemy in enemies.iter() {
        let at = enemy_draw_origin(enemy);
        let dst = Rect::new(at.x, at.y, ENEMY_SIZE, ENEMY_SIZE);
        sprites.enemy(enemy.kind).draw(canvas, dst, 0.0)?;
    }

    Ok(())
}

/// Where an enemy is drawn: its position plus the bob, rounded to the nearest pixel.
fn enemy_draw_origin(enemy: &Enemy) -> IVec2 {
    IVec2::new(
        enemy.position.x.round() as i32,
        (enemy.position.y + enemy.bob_offset()).round() as i32,
    )
}

fn draw_hud(canvas: &mut Canvas<Window>, text: &mut TextRenderer, stage: GameStage, score: u32, level: u32) -> GameResult<()> {
    let hud = format!("Score: {score}  Level: {level}");
    text.draw(
        canvas,
        TextSlot::Hud,
        &hud,
        rgb(WHITE),
        Anchor::TopLeft(IVec2::new(HUD_POSITION.0, HUD_POSITION.1)),
    )?;

    let center = (CANVAS_SIZE / 2).as_ivec2();
    match stage {
        GameStage::Playing => {}
        GameStage::LevelComplete { .. } => {
            let banner = format!("Level {level} Complete!");
            text.draw(canvas, TextSlot::Banner, &banner, rgb(GREEN), Anchor::Center(center))?;
        }
        GameStage::GameOver => {
            let banner = format!("Game Over! Level {level}");
            text.draw(
                canvas,
                TextSlot::Banner,
                &banner,
                rgb(WHITE),
                Anchor::Center(center - IVec2::new(0, 40)),
            )?;

            let final_score = format!("Final Score: {score}");
            text.draw(
                canvas,
                TextSlot::FinalScore,
                &final_score,
                rgb(WHITE),
                Anchor::Center(center + IVec2::new(0, 20)),
            )?;

            text.draw(
                canvas,
                TextSlot::Prompt,
                "Press R to Restart",
                rgb(WHITE),
                Anchor::Center(center + IVec2::new(0, 70)),
            )?;
        }
    }

    Ok(())
}
