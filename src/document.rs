//! In-memory ASE document model.
//!
//! A `Document` owns every entity decoded from the file.  Strings and
//! buffers that were never set are empty and own no allocation.

use ::{AseError,AseResult};
use ::cursor::alloc_vec;

/// A 16.16 fixed point value, kept exactly as stored in the file.
#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct Fixed(pub i32);

/// A colour with 8-bit components.
#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Colour depth of the document's pixels.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum ColorDepth {
    /// One byte per pixel, an index into the palette.
    Indexed,
    /// Two bytes per pixel, value then alpha.
    Grayscale,
    /// Four bytes per pixel, red, green, blue, alpha.
    Rgba,
}

/// Grid settings from the document header.
#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct Grid {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

/// Document palette.
///
/// `colors` and `names` always have the same length; use `resize` to
/// change it.
#[derive(Clone,Debug,Default,Eq,PartialEq)]
pub struct Palette {
    pub colors: Vec<Rgba>,
    pub names: Vec<String>,
    pub transparent_index: u8,
}

/// Free-form annotation attached to a layer, cel or slice.
#[derive(Clone,Debug,Default,Eq,PartialEq)]
pub struct UserData {
    pub text: String,
    pub color: Option<Rgba>,
}

/// Layer flags.
#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct LayerFlags(pub u16);

#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum LayerType {
    Normal,
    Group,
    Tilemap,
}

#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
    Addition,
    Subtract,
    Divide,
}

#[derive(Clone,Debug,Eq,PartialEq)]
pub struct Layer {
    pub flags: LayerFlags,
    pub layer_type: LayerType,
    /// Nesting depth relative to the preceding layers.
    pub child_level: u16,
    pub blend_mode: BlendMode,
    pub opacity: u8,
    pub name: String,
    /// Only present for tilemap layers.
    pub tileset_index: Option<u32>,
    pub user_data: UserData,
}

/// Pixels of a cel, `width * height * bytes_per_pixel` bytes.
#[derive(Clone,Debug,Default,Eq,PartialEq)]
pub struct Image {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u8>,
}

/// Cel payload.
#[derive(Clone,Debug,Eq,PartialEq)]
pub enum CelContent {
    Raw(Image),
    /// Shares the cel of the same layer in the given frame.
    Linked(u16),
    /// Stored zlib-compressed; held here already inflated.
    Compressed(Image),
    /// Tile data is not decoded.
    Tilemap { width: u16, height: u16 },
}

/// Precise cel bounds.  All zero when absent.
#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct CelExtra {
    pub flags: u32,
    pub x: Fixed,
    pub y: Fixed,
    pub width: Fixed,
    pub height: Fixed,
}

#[derive(Clone,Debug,Eq,PartialEq)]
pub struct Cel {
    pub layer_index: u16,
    pub x: i16,
    pub y: i16,
    pub opacity: u8,
    pub z_index: i16,
    pub content: CelContent,
    pub extra: CelExtra,
    pub user_data: UserData,
}

#[derive(Clone,Debug,Default,Eq,PartialEq)]
pub struct Frame {
    /// Frame duration in milliseconds.
    pub duration: u16,
    /// Cels in the order they appear in the frame.
    pub cels: Box<[Cel]>,
}

#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum AnimationDirection {
    Forward,
    Reverse,
    PingPong,
    PingPongReverse,
}

/// A named range of frames, `from..=to`.
#[derive(Clone,Debug,Eq,PartialEq)]
pub struct Tag {
    pub from: u16,
    pub to: u16,
    pub direction: AnimationDirection,
    /// Times to repeat the range, 0 means forever.
    pub repeat: u16,
    pub color: [u8; 3],
    pub name: String,
}

/// Slice flags.
#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct SliceFlags(pub u32);

#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct NinePatch {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct Pivot {
    pub x: i32,
    pub y: i32,
}

/// Slice geometry from `frame` onwards.
#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct SliceKey {
    pub frame: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub nine_patch: Option<NinePatch>,
    pub pivot: Option<Pivot>,
}

#[derive(Clone,Debug,Default,Eq,PartialEq)]
pub struct Slice {
    pub flags: SliceFlags,
    pub name: String,
    pub keys: Box<[SliceKey]>,
    pub user_data: UserData,
}

#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum ColorProfileType {
    None,
    Srgb,
    Icc,
}

#[derive(Clone,Debug,Eq,PartialEq)]
pub struct ColorProfile {
    pub profile_type: ColorProfileType,
    pub flags: u16,
    pub gamma: Fixed,
    /// Raw ICC profile, only for `ColorProfileType::Icc`.
    pub icc_data: Vec<u8>,
}

/// A decoded ASE document.
#[derive(Clone,Debug,Eq,PartialEq)]
pub struct Document {
    pub width: u16,
    pub height: u16,
    pub color_depth: ColorDepth,
    pub flags: u32,
    /// Deprecated frame speed from the header, in milliseconds.
    pub speed: u16,
    pub pixel_width: u8,
    pub pixel_height: u8,
    pub grid: Option<Grid>,
    pub palette: Palette,
    pub color_profile: ColorProfile,
    pub layers: Box<[Layer]>,
    pub slices: Box<[Slice]>,
    pub tags: Box<[Tag]>,
    pub frames: Box<[Frame]>,
}

/*--------------------------------------------------------------*/

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r: r, g: g, b: b, a: a }
    }
}

impl ColorDepth {
    /// Map the header's bits per pixel.
    pub fn from_bits(bits: u16)
            -> AseResult<Self> {
        match bits {
            8 => Ok(ColorDepth::Indexed),
            16 => Ok(ColorDepth::Grayscale),
            32 => Ok(ColorDepth::Rgba),
            _ => Err(AseError::Corrupted("color depth")),
        }
    }

    pub fn bits_per_pixel(&self) -> u16 {
        match *self {
            ColorDepth::Indexed => 8,
            ColorDepth::Grayscale => 16,
            ColorDepth::Rgba => 32,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel() as usize / 8
    }
}

impl Palette {
    /// Create a palette of `len` black entries without names.
    pub fn with_len(len: usize, transparent_index: u8)
            -> AseResult<Self> {
        let mut pal = Palette {
            colors: Vec::new(),
            names: Vec::new(),
            transparent_index: transparent_index,
        };
        try!(pal.resize(len));
        Ok(pal)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Rgba> {
        self.colors.get(idx).cloned()
    }

    /// Grow or shrink both the colours and the names.  New entries are
    /// black and unnamed.
    pub fn resize(&mut self, len: usize)
            -> AseResult<()> {
        if len > self.colors.len() {
            let extra = len - self.colors.len();
            try!(self.colors.try_reserve_exact(extra).map_err(|_| AseError::Allocation));
            try!(self.names.try_reserve_exact(extra).map_err(|_| AseError::Allocation));
        }

        self.colors.resize(len, Rgba::default());
        self.names.resize(len, String::new());
        Ok(())
    }
}

impl UserData {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.color.is_none()
    }
}

impl LayerFlags {
    pub const VISIBLE: u16 = 1;
    pub const EDITABLE: u16 = 2;
    pub const LOCK_MOVEMENT: u16 = 4;
    pub const BACKGROUND: u16 = 8;
    pub const PREFER_LINKED_CELS: u16 = 16;
    pub const COLLAPSED: u16 = 32;
    pub const REFERENCE: u16 = 64;

    pub fn is_visible(&self) -> bool {
        self.0 & Self::VISIBLE != 0
    }

    pub fn is_editable(&self) -> bool {
        self.0 & Self::EDITABLE != 0
    }

    pub fn is_background(&self) -> bool {
        self.0 & Self::BACKGROUND != 0
    }

    pub fn is_reference(&self) -> bool {
        self.0 & Self::REFERENCE != 0
    }
}

impl LayerType {
    pub fn from_word(v: u16)
            -> AseResult<Self> {
        match v {
            0 => Ok(LayerType::Normal),
            1 => Ok(LayerType::Group),
            2 => Ok(LayerType::Tilemap),
            _ => Err(AseError::Corrupted("layer type")),
        }
    }
}

impl BlendMode {
    pub fn from_word(v: u16)
            -> AseResult<Self> {
        use self::BlendMode::*;
        let mode = match v {
            0 => Normal,
            1 => Multiply,
            2 => Screen,
            3 => Overlay,
            4 => Darken,
            5 => Lighten,
            6 => ColorDodge,
            7 => ColorBurn,
            8 => HardLight,
            9 => SoftLight,
            10 => Difference,
            11 => Exclusion,
            12 => Hue,
            13 => Saturation,
            14 => Color,
            15 => Luminosity,
            16 => Addition,
            17 => Subtract,
            18 => Divide,
            _ => return Err(AseError::Corrupted("blend mode")),
        };
        Ok(mode)
    }
}

impl Cel {
    /// The cel's pixels, if it carries any.
    pub fn image(&self) -> Option<&Image> {
        match self.content {
            CelContent::Raw(ref img) | CelContent::Compressed(ref img) => Some(img),
            _ => None,
        }
    }

    /// The frame whose cel this one shares.
    pub fn linked_frame(&self) -> Option<u16> {
        match self.content {
            CelContent::Linked(frame) => Some(frame),
            _ => None,
        }
    }
}

impl CelExtra {
    pub const PRECISE_BOUNDS: u32 = 1;

    pub fn is_empty(&self) -> bool {
        *self == CelExtra::default()
    }
}

impl Frame {
    /// The cel for the given layer in this frame.
    pub fn cel_for_layer(&self, layer_index: u16) -> Option<&Cel> {
        self.cels.iter().find(|c| c.layer_index == layer_index)
    }
}

impl AnimationDirection {
    pub fn from_byte(v: u8)
            -> AseResult<Self> {
        match v {
            0 => Ok(AnimationDirection::Forward),
            1 => Ok(AnimationDirection::Reverse),
            2 => Ok(AnimationDirection::PingPong),
            3 => Ok(AnimationDirection::PingPongReverse),
            _ => Err(AseError::Corrupted("animation direction")),
        }
    }
}

impl SliceFlags {
    pub const NINE_PATCH: u32 = 1;
    pub const PIVOT: u32 = 2;

    pub fn has_nine_patch(&self) -> bool {
        self.0 & Self::NINE_PATCH != 0
    }

    pub fn has_pivot(&self) -> bool {
        self.0 & Self::PIVOT != 0
    }
}

impl ColorProfileType {
    pub fn from_word(v: u16)
            -> AseResult<Self> {
        match v {
            0 => Ok(ColorProfileType::None),
            1 => Ok(ColorProfileType::Srgb),
            2 => Ok(ColorProfileType::Icc),
            _ => Err(AseError::Corrupted("color profile type")),
        }
    }
}

impl ColorProfile {
    pub const FIXED_GAMMA: u16 = 1;
}

impl Default for ColorProfile {
    fn default() -> Self {
        ColorProfile {
            profile_type: ColorProfileType::None,
            flags: 0,
            gamma: Fixed(0),
            icc_data: Vec::new(),
        }
    }
}

impl Document {
    /// Find a layer by name.
    pub fn layer_by_name(&self, name: &str) -> Option<(usize, &Layer)> {
        self.layers.iter().enumerate().find(|&(_, l)| l.name == name)
    }

    /// Release the document and every buffer it owns.
    ///
    /// Each string, palette array, pixel buffer and ICC blob is freed
    /// exactly once; empty strings and buffers own nothing.
    pub fn release(self) {
        drop(self);
    }
}

/// Freeze an accumulated sequence, failing cleanly if the shrink
/// cannot be satisfied.
pub(crate) fn freeze<T>(v: Vec<T>)
        -> AseResult<Box<[T]>> {
    if v.len() == v.capacity() {
        return Ok(v.into_boxed_slice());
    }

    let mut exact = try!(alloc_vec(v.len()));
    exact.extend(v);
    Ok(exact.into_boxed_slice())
}
