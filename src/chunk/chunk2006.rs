//! Decoder for chunk type 0x2006 = ASE_CEL_EXTRA.

use std::io::Read;

use ::AseResult;
use ::cursor::AseReadExt;
use ::document::CelExtra;

/// Magic for an ASE_CEL_EXTRA chunk - Cel Extra.
///
/// Extra information for the preceding cel.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   flags  | 1 precise bounds are set.
///        4 |      4 |     x    | Precise X position, FIXED.
///        8 |      4 |     y    | Precise Y position, FIXED.
///       12 |      4 |   width  | Width of the cel in the sprite, FIXED.
///       16 |      4 |  height  | Height of the cel in the sprite, FIXED.
///       20 |     16 | reserved | Set to zero.
pub const ASE_CEL_EXTRA: u16 = 0x2006;

/// Decode an ASE_CEL_EXTRA chunk.
///
/// Without the precise bounds flag the result is all zero.
pub fn decode_ase_cel_extra<R: Read>(r: &mut R)
        -> AseResult<CelExtra> {
    let flags = try!(r.read_dword());
    if flags & CelExtra::PRECISE_BOUNDS == 0 {
        return Ok(CelExtra::default());
    }

    Ok(CelExtra {
        flags: flags,
        x: try!(r.read_fixed()),
        y: try!(r.read_fixed()),
        width: try!(r.read_fixed()),
        height: try!(r.read_fixed()),
    })
}
