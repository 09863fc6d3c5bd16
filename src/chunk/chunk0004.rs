//! Decoder for chunk types 0x0004 and 0x0011 = ASE_OLD_PALETTE.

use std::io::Read;

use ::{AseError,AseResult};
use ::cursor::AseReadExt;
use ::document::{Palette,Rgba};

/// Magic for an ASE_OLD_PALETTE chunk - Old Palette, 256 levels.
///
/// Written by files from before the new palette chunk existed, and
/// still emitted alongside it when the palette has no alpha and at
/// most 256 entries.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |  packets | Number of packets.
///        2 |      1 |   skip   | Number of palette entries to skip from the last packet.
///        3 |      1 |  colors  | Number of colors in the packet, 0 means 256.
///        4 |  3 * n |   rgb    | Red, green, blue, each 0-255.
///
/// The packet fields repeat `packets` times.  Starting at index zero,
/// each packet first advances the index by `skip`, then overwrites
/// `colors` consecutive entries.
pub const ASE_OLD_PALETTE: u16 = 0x0004;

/// Magic for an ASE_OLD_PALETTE_64 chunk - Old Palette, 64 levels.
///
/// Identical to ASE_OLD_PALETTE except that the red, green and blue
/// components are in the range 0-63.
pub const ASE_OLD_PALETTE_64: u16 = 0x0011;

/// Decode an ASE_OLD_PALETTE or ASE_OLD_PALETTE_64 chunk into the
/// running palette.
///
/// Overwritten entries become opaque and lose their names.
pub fn decode_ase_old_palette<R: Read>(
        r: &mut R, pal: &mut Palette, six_bit: bool)
        -> AseResult<()> {
    let mut idx0 = 0;

    let count = try!(r.read_word());
    for _ in 0..count {
        let nskip = try!(r.read_byte()) as usize;
        let ncopy = match try!(r.read_byte()) {
            0 => 256 as usize,
            n => n as usize,
        };

        let start = idx0 + nskip;
        let end = start + ncopy;
        if end > pal.len() {
            return Err(AseError::Corrupted("palette index"));
        }

        for idx in start..end {
            let mut c = [0; 3];
            try!(r.read_exact(&mut c));
            if six_bit {
                for x in c.iter_mut() {
                    *x = scale_6bit(*x);
                }
            }

            pal.colors[idx] = Rgba::new(c[0], c[1], c[2], 255);
            pal.names[idx] = String::new();
        }

        idx0 = end;
    }

    Ok(())
}

/// Expand a 0-63 component to 0-255.
fn scale_6bit(c: u8) -> u8 {
    let c = c & 0x3F;
    (c << 2) | (c >> 4)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use ::document::{Palette,Rgba};
    use super::decode_ase_old_palette;

    #[test]
    fn test_decode_ase_old_palette() {
        let src = [
            0x02, 0x00, // count 2
            1, 2,       // skip 1, copy 2
            0x0A, 0x0B, 0x0C, 0x1A, 0x1B, 0x1C,
            3, 1,       // skip 3, copy 1
            0x2A, 0x2B, 0x2C ];

        let mut pal = Palette::with_len(8, 0).expect("palette");
        pal.names[2] = "old".to_string();
        pal.names[3] = "kept".to_string();

        let res = decode_ase_old_palette(&mut Cursor::new(&src[..]), &mut pal, false);
        assert!(res.is_ok());

        assert_eq!(pal.colors[0], Rgba::default());
        assert_eq!(pal.colors[1], Rgba::new(0x0A, 0x0B, 0x0C, 255));
        assert_eq!(pal.colors[2], Rgba::new(0x1A, 0x1B, 0x1C, 255));
        assert_eq!(pal.colors[3], Rgba::default());
        assert_eq!(pal.colors[6], Rgba::new(0x2A, 0x2B, 0x2C, 255));
        assert_eq!(pal.names[2], "");
        assert_eq!(pal.names[3], "kept");
        assert_eq!(pal.colors.len(), pal.names.len());
    }

    #[test]
    fn test_decode_ase_old_palette_run_of_256() {
        let mut src = vec![ 0x01, 0x00, 0, 0 ];
        for i in 0..256 {
            src.extend_from_slice(&[i as u8, 0, 0]);
        }

        let mut pal = Palette::with_len(256, 0).expect("palette");
        let res = decode_ase_old_palette(&mut Cursor::new(&src[..]), &mut pal, false);
        assert!(res.is_ok());

        for i in 0..256 {
            assert_eq!(pal.colors[i], Rgba::new(i as u8, 0, 0, 255));
        }
    }

    #[test]
    fn test_decode_ase_old_palette_run_of_256_after_skip() {
        let mut src = vec![
            0x02, 0x00, // count 2
            10, 2,      // skip 10, copy 2
            0x0A, 0x0B, 0x0C, 0x1A, 0x1B, 0x1C,
            5, 0 ];     // skip 5, copy 256
        for i in 0..256 {
            src.extend_from_slice(&[i as u8, 0x40, 0x80]);
        }

        let old = Rgba::new(1, 2, 3, 4);
        let mut pal = Palette::with_len(300, 0).expect("palette");
        for i in 0..300 {
            pal.colors[i] = old;
            pal.names[i] = "kept".to_string();
        }

        let res = decode_ase_old_palette(&mut Cursor::new(&src[..]), &mut pal, false);
        assert!(res.is_ok());

        assert_eq!(pal.colors[11], Rgba::new(0x1A, 0x1B, 0x1C, 255));
        for i in 12..17 {
            assert_eq!(pal.colors[i], old);
            assert_eq!(pal.names[i], "kept");
        }
        for i in 17..273 {
            assert_eq!(pal.colors[i], Rgba::new((i - 17) as u8, 0x40, 0x80, 255));
            assert_eq!(pal.names[i], "");
        }
        for i in 273..300 {
            assert_eq!(pal.colors[i], old);
            assert_eq!(pal.names[i], "kept");
        }
    }

    #[test]
    fn test_decode_ase_old_palette_64() {
        let src = [ 0x01, 0x00, 0, 1, 0x3F, 0x20, 0x00 ];

        let mut pal = Palette::with_len(1, 0).expect("palette");
        let res = decode_ase_old_palette(&mut Cursor::new(&src[..]), &mut pal, true);
        assert!(res.is_ok());
        assert_eq!(pal.colors[0], Rgba::new(0xFF, 0x82, 0x00, 255));
    }

    #[test]
    fn test_decode_ase_old_palette_overflow() {
        let src = [ 0x01, 0x00, 2, 1, 0, 0, 0 ];

        let mut pal = Palette::with_len(2, 0).expect("palette");
        let res = decode_ase_old_palette(&mut Cursor::new(&src[..]), &mut pal, false);
        assert!(res.is_err());
    }
}
