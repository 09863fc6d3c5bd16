//! Decoder for chunk type 0x2019 = ASE_PALETTE.

use std::io::Read;

use ::{AseError,AseResult};
use ::cursor::AseReadExt;
use ::document::Palette;

/// Magic for an ASE_PALETTE chunk - Palette.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   size   | New palette size, total number of entries.
///        4 |      4 |   first  | First colour index to change.
///        8 |      4 |   last   | Last colour index to change, inclusive.
///       12 |      8 | reserved | Set to zero.
///
/// Followed by `last - first + 1` entries:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   flags  | 1 has name.
///        2 |      4 |   rgba   | Red, green, blue, alpha, each 0-255.
///        6 |    2+n |   name   | STRING, only if flags has bit 1.
pub const ASE_PALETTE: u16 = 0x2019;

const ENTRY_HAS_NAME: u16 = 1;

/// Decode an ASE_PALETTE chunk into the running palette, resizing it
/// to the declared size first.
pub fn decode_ase_palette<R: Read>(r: &mut R, pal: &mut Palette)
        -> AseResult<()> {
    let size = try!(r.read_dword()) as usize;
    let first = try!(r.read_dword()) as usize;
    let last = try!(r.read_dword()) as usize;
    try!(r.skip(8));

    if size != pal.len() {
        try!(pal.resize(size));
    }

    if first > last || last >= size {
        return Err(AseError::Corrupted("palette range"));
    }

    for idx in first..(last + 1) {
        let flags = try!(r.read_word());
        pal.colors[idx] = try!(r.read_rgba());
        pal.names[idx] = if flags & ENTRY_HAS_NAME != 0 {
            try!(r.read_string())
        } else {
            String::new()
        };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use ::AseError;
    use ::document::{Palette,Rgba};
    use super::decode_ase_palette;

    #[test]
    fn test_decode_ase_palette() {
        let src = [
            0x04, 0x00, 0x00, 0x00, // size 4
            0x01, 0x00, 0x00, 0x00, // first 1
            0x02, 0x00, 0x00, 0x00, // last 2
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x00, 0x10, 0x20, 0x30, 0x40,
            0x01, 0x00, 0x50, 0x60, 0x70, 0x80, 0x03, 0x00, b'r', b'e', b'd' ];

        let mut pal = Palette::with_len(256, 0).expect("palette");
        pal.colors[0] = Rgba::new(9, 9, 9, 9);
        decode_ase_palette(&mut Cursor::new(&src[..]), &mut pal).expect("decode");

        assert_eq!(pal.len(), 4);
        assert_eq!(pal.names.len(), 4);
        assert_eq!(pal.colors[0], Rgba::new(9, 9, 9, 9));
        assert_eq!(pal.colors[1], Rgba::new(0x10, 0x20, 0x30, 0x40));
        assert_eq!(pal.colors[2], Rgba::new(0x50, 0x60, 0x70, 0x80));
        assert_eq!(pal.names[1], "");
        assert_eq!(pal.names[2], "red");
        assert_eq!(pal.colors[3], Rgba::default());
    }

    #[test]
    fn test_decode_ase_palette_grow() {
        let src = [
            0x03, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x00, 0x01, 0x02, 0x03, 0xFF ];

        let mut pal = Palette::with_len(1, 0).expect("palette");
        decode_ase_palette(&mut Cursor::new(&src[..]), &mut pal).expect("decode");

        assert_eq!(pal.colors.len(), 3);
        assert_eq!(pal.names.len(), 3);
        assert_eq!(pal.colors[2], Rgba::new(1, 2, 3, 0xFF));
    }

    #[test]
    fn test_decode_ase_palette_out_of_range() {
        let src = [
            0x02, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0, 0, 0, 0, 0, 0, 0, 0 ];

        let mut pal = Palette::with_len(2, 0).expect("palette");
        match decode_ase_palette(&mut Cursor::new(&src[..]), &mut pal) {
            Err(AseError::Corrupted(_)) => (),
            _ => panic!("expected corrupted"),
        }
    }
}
