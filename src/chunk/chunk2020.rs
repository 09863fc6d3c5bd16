//! Decoder for chunk type 0x2020 = ASE_USER_DATA.

use std::io::Read;

use ::AseResult;
use ::cursor::AseReadExt;
use ::document::UserData;

/// Magic for an ASE_USER_DATA chunk - User Data.
///
/// Applies to the layer, cel or slice decoded just before it.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   flags  | 1 has text, 2 has colour, 4 has properties.
///        4 |    2+n |   text   | STRING, only if flags has bit 1.
///    4/6+n |      4 |   rgba   | Red, green, blue, alpha, only if flags has bit 2.
///
/// Property maps, if any, follow and are not decoded.
pub const ASE_USER_DATA: u16 = 0x2020;

const USER_DATA_TEXT: u32 = 1;
const USER_DATA_COLOR: u32 = 2;

/// Decode an ASE_USER_DATA chunk.
pub fn decode_ase_user_data<R: Read>(r: &mut R)
        -> AseResult<UserData> {
    let flags = try!(r.read_dword());

    let text = if flags & USER_DATA_TEXT != 0 {
        try!(r.read_string())
    } else {
        String::new()
    };

    let color = if flags & USER_DATA_COLOR != 0 {
        Some(try!(r.read_rgba()))
    } else {
        None
    };

    Ok(UserData {
        text: text,
        color: color,
    })
}
