//! Decoder for chunk type 0x2004 = ASE_LAYER.

use std::io::Read;

use ::AseResult;
use ::cursor::AseReadExt;
use ::document::{BlendMode,Layer,LayerFlags,LayerType,UserData};

/// Magic for an ASE_LAYER chunk - Layer.
///
/// Layers are stored in the first frame, in order from the bottom of
/// the stack to the top.  A layer's position in the stack, counting
/// from zero, is the index that cels refer to.
///
///   Offset | Length |    Name    | Description
///   ------:| ------:|:----------:| ---------------------------------
///        0 |      2 |    flags   | 1 visible, 2 editable, 4 lock movement, 8 background, 16 prefer linked cels, 32 collapsed, 64 reference.
///        2 |      2 |    type    | 0 normal, 1 group, 2 tilemap.
///        4 |      2 | childlevel | Nesting depth relative to the previous layer.
///        6 |      2 |   width    | Default layer width, ignored.
///        8 |      2 |   height   | Default layer height, ignored.
///       10 |      2 |   blend    | Blend mode, 0 to 18.
///       12 |      1 |  opacity   | Only valid if the header's layer opacity flag is set.
///       13 |      3 |  reserved  | Set to zero.
///       16 |    2+n |    name    | STRING.
///     18+n |      4 |  tileset   | Tileset index, only for tilemap layers.
pub const ASE_LAYER: u16 = 0x2004;

/// Decode an ASE_LAYER chunk.
pub fn decode_ase_layer<R: Read>(r: &mut R)
        -> AseResult<Layer> {
    let flags = try!(r.read_word());
    let layer_type = try!(LayerType::from_word(try!(r.read_word())));
    let child_level = try!(r.read_word());
    let _width = try!(r.read_word());
    let _height = try!(r.read_word());
    let blend_mode = try!(BlendMode::from_word(try!(r.read_word())));
    let opacity = try!(r.read_byte());
    try!(r.skip(3));
    let name = try!(r.read_string());

    let tileset_index = if layer_type == LayerType::Tilemap {
        Some(try!(r.read_dword()))
    } else {
        None
    };

    Ok(Layer {
        flags: LayerFlags(flags),
        layer_type: layer_type,
        child_level: child_level,
        blend_mode: blend_mode,
        opacity: opacity,
        name: name,
        tileset_index: tileset_index,
        user_data: UserData::default(),
    })
}
