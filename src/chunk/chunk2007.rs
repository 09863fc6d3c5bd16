//! Decoder for chunk type 0x2007 = ASE_COLOR_PROFILE.

use std::io::Read;

use ::AseResult;
use ::cursor::{AseReadExt,LenPrefix};
use ::document::{ColorProfile,ColorProfileType};

/// Magic for an ASE_COLOR_PROFILE chunk - Color Profile.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   type   | 0 no profile, 1 sRGB, 2 embedded ICC.
///        2 |      2 |   flags  | 1 use the fixed gamma.
///        4 |      4 |   gamma  | FIXED, 1.0 is linear.
///        8 |      8 | reserved | Set to zero.
///       16 |      4 |  icclen  | ICC profile length, only for type 2.
///       20 |      n |    icc   | ICC profile data, only for type 2.
pub const ASE_COLOR_PROFILE: u16 = 0x2007;

/// Decode an ASE_COLOR_PROFILE chunk.
pub fn decode_ase_color_profile<R: Read>(r: &mut R)
        -> AseResult<ColorProfile> {
    let profile_type = try!(ColorProfileType::from_word(try!(r.read_word())));
    let flags = try!(r.read_word());
    let gamma = try!(r.read_fixed());
    try!(r.skip(8));

    let icc_data = if profile_type == ColorProfileType::Icc {
        try!(r.read_prefixed_bytes(LenPrefix::Dword))
    } else {
        Vec::new()
    };

    Ok(ColorProfile {
        profile_type: profile_type,
        flags: flags,
        gamma: gamma,
        icc_data: icc_data,
    })
}
