//! Card Composition
//!
//! Turns an `AgentProfile` into a fixed-size card image in two stages:
//! `layout` computes where everything goes, `raster` draws it. Both stages are
//! pure, so composing the same profile twice gives identical pixels and
//! identical PNG bytes.

pub mod export;
pub mod font;
pub mod layout;
pub mod picture;
pub mod raster;
pub mod style;
pub mod text;

pub use export::{card_file_name, export_png};
pub use font::CardFont;
pub use layout::{layout_card, ActionKind, CardLayout};
pub use picture::{fit_to_box, load_picture, FitMode};
pub use raster::rasterize;
pub use style::CardStyle;

use crate::agent::AgentProfile;
use crate::config::CardConfig;
use crate::error::CardError;
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};

/// A composed card: the layout plan and the pixels drawn from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedCard {
    pub layout: CardLayout,
    pub image: RgbImage,
}

impl ComposedCard {
    pub fn png_bytes(&self) -> Result<Vec<u8>, CardError> {
        export::encode_png(&self.image)
    }

    /// BLAKE3 hash of the encoded PNG, hex encoded.
    pub fn fingerprint(&self) -> Result<String, CardError> {
        Ok(blake3::hash(&self.png_bytes()?).to_hex().to_string())
    }

    pub fn has_action(&self, kind: ActionKind) -> bool {
        self.layout.has_action(kind)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Composes cards with one style and font.
#[derive(Debug)]
pub struct CardRenderer {
    style: CardStyle,
    font: CardFont,
}

impl CardRenderer {
    pub fn new(style: CardStyle, font: CardFont) -> Self {
        Self { style, font }
    }

    pub fn from_config(config: &CardConfig) -> Result<Self, CardError> {
        let style = CardStyle::from_config(config)?;
        let font = CardFont::load(&config.font);
        tracing::debug!(font = %font.description(), "Card renderer ready");
        Ok(Self::new(style, font))
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    pub fn font(&self) -> &CardFont {
        &self.font
    }

    /// Lay out the card without drawing it.
    pub fn plan(&self, profile: &AgentProfile, picture: Option<&DynamicImage>) -> CardLayout {
        layout_card(profile, picture, &self.style, &self.font)
    }

    /// Compose `profile` with an already decoded picture.
    pub fn compose(&self, profile: &AgentProfile, picture: Option<&DynamicImage>) -> ComposedCard {
        let layout = self.plan(profile, picture);
        let image = rasterize(&layout, &self.style, &self.font);
        ComposedCard { layout, image }
    }

    /// Compose `profile`, loading its picture from `profile.image` if set.
    pub fn render(&self, profile: &AgentProfile) -> Result<ComposedCard, CardError> {
        let picture = match &profile.image {
            Some(path) => Some(load_picture(path)?),
            None => None,
        };
        Ok(self.compose(profile, picture.as_ref()))
    }
}

/// Compose with the default style and the built-in font.
pub fn compose_card(profile: &AgentProfile, picture: Option<&DynamicImage>) -> ComposedCard {
    CardRenderer::new(CardStyle::default(), CardFont::builtin()).compose(profile, picture)
}

/// Write `card` to `dir` as `<agent name>_card.png`.
pub fn export_card(card: &ComposedCard, dir: &Path, agent_name: &str) -> Result<PathBuf, CardError> {
    export_png(&card.image, dir, agent_name)
}
