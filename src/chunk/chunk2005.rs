//! Decoder for chunk type 0x2005 = ASE_CEL.

use std::io::{self,Read};
use flate2::read::ZlibDecoder;

use ::{AseError,AseResult};
use ::cursor::{AseReadExt,read_exact_vec};
use ::document::{Cel,CelContent,CelExtra,ColorDepth,Image,UserData};

/// Magic for an ASE_CEL chunk - Cel.
///
/// A cel holds the image of one layer in one frame.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   layer  | Layer index.
///        2 |      2 |     x    | X position, signed.
///        4 |      2 |     y    | Y position, signed.
///        6 |      1 |  opacity | Opacity level.
///        7 |      2 |   type   | 0 raw image, 1 linked cel, 2 compressed image, 3 compressed tilemap.
///        9 |      2 |  zindex  | Z-index, signed.
///       11 |      5 | reserved | Set to zero.
///
/// The header is followed by the payload for the cel type:
///
///   Type | Payload
///   ----:|:-------------------------------------------------------
///      0 | WORD width, WORD height, width * height pixels.
///      1 | WORD frame position to link with.
///      2 | WORD width, WORD height, zlib-compressed pixels.
///      3 | WORD width, WORD height, tile format and zlib-compressed tiles.
///
/// Pixels are 1 byte (indexed), 2 bytes (grayscale) or 4 bytes (RGBA)
/// depending on the document's colour depth.
pub const ASE_CEL: u16 = 0x2005;

const CEL_RAW: u16 = 0;
const CEL_LINKED: u16 = 1;
const CEL_COMPRESSED: u16 = 2;
const CEL_TILEMAP: u16 = 3;

/// Decode an ASE_CEL chunk.
///
/// The reader must end at the end of the chunk, since compressed
/// pixels run to the end of it.
pub fn decode_ase_cel<R: Read>(r: &mut R, depth: ColorDepth)
        -> AseResult<Cel> {
    let layer_index = try!(r.read_word());
    let x = try!(r.read_short());
    let y = try!(r.read_short());
    let opacity = try!(r.read_byte());
    let cel_type = try!(r.read_word());
    let z_index = try!(r.read_short());
    try!(r.skip(5));

    let content = match cel_type {
        CEL_RAW => {
            let (w, h) = (try!(r.read_word()), try!(r.read_word()));
            let pixels = try!(r.read_bytes(try!(image_size(w, h, depth))));
            CelContent::Raw(Image { width: w, height: h, pixels: pixels })
        },

        CEL_LINKED => CelContent::Linked(try!(r.read_word())),

        CEL_COMPRESSED => {
            let (w, h) = (try!(r.read_word()), try!(r.read_word()));
            let pixels = try!(inflate_pixels(r, try!(image_size(w, h, depth))));
            CelContent::Compressed(Image { width: w, height: h, pixels: pixels })
        },

        CEL_TILEMAP => {
            let (w, h) = (try!(r.read_word()), try!(r.read_word()));
            CelContent::Tilemap { width: w, height: h }
        },

        _ => return Err(AseError::Corrupted("cel type")),
    };

    Ok(Cel {
        layer_index: layer_index,
        x: x,
        y: y,
        opacity: opacity,
        z_index: z_index,
        content: content,
        extra: CelExtra::default(),
        user_data: UserData::default(),
    })
}

/// Size in bytes of a `w` by `h` image, if it is addressable.
fn image_size(w: u16, h: u16, depth: ColorDepth)
        -> AseResult<usize> {
    (w as usize).checked_mul(h as usize)
        .and_then(|n| n.checked_mul(depth.bytes_per_pixel()))
        .ok_or(AseError::Allocation)
}

/// Inflate exactly `len` bytes of zlib data.
fn inflate_pixels<R: Read>(r: &mut R, len: usize)
        -> AseResult<Vec<u8>> {
    let mut z = ZlibDecoder::new(r);
    match read_exact_vec(&mut z, len) {
        Ok(pixels) => Ok(pixels),
        Err(AseError::Io(e)) => {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                Err(AseError::Decompression(io::Error::new(
                        io::ErrorKind::UnexpectedEof, "inflated cel is too short")))
            } else {
                Err(AseError::Decompression(e))
            }
        },
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor,Write};
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use ::AseError;
    use ::document::{CelContent,ColorDepth};
    use super::{decode_ase_cel,image_size};

    fn cel_header(cel_type: u8) -> Vec<u8> {
        vec![
            0x01, 0x00,         // layer 1
            0xFE, 0xFF,         // x -2
            0x03, 0x00,         // y 3
            0xFF,
            cel_type, 0x00,
            0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00 ]
    }

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut z = ZlibEncoder::new(Vec::new(), Compression::default());
        z.write_all(data).expect("write");
        z.finish().expect("finish")
    }

    #[test]
    fn test_decode_ase_cel_raw() {
        let mut src = cel_header(0);
        src.extend_from_slice(&[ 0x02, 0x00, 0x01, 0x00, 0x11, 0x12, 0x13, 0x14 ]);

        let cel = decode_ase_cel(&mut Cursor::new(&src[..]), ColorDepth::Grayscale)
            .expect("cel");
        assert_eq!(cel.layer_index, 1);
        assert_eq!(cel.x, -2);
        assert_eq!(cel.y, 3);
        assert_eq!(cel.opacity, 0xFF);
        assert!(cel.extra.is_empty());

        let img = cel.image().expect("image");
        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixels, [0x11, 0x12, 0x13, 0x14]);
    }

    #[test]
    fn test_decode_ase_cel_linked() {
        let mut src = cel_header(1);
        src.extend_from_slice(&[ 0x04, 0x00 ]);

        let cel = decode_ase_cel(&mut Cursor::new(&src[..]), ColorDepth::Rgba)
            .expect("cel");
        assert_eq!(cel.content, CelContent::Linked(4));
        assert_eq!(cel.linked_frame(), Some(4));
        assert!(cel.image().is_none());
    }

    #[test]
    fn test_decode_ase_cel_compressed() {
        let pixels: Vec<u8> = (0..16).collect();
        let mut src = cel_header(2);
        src.extend_from_slice(&[ 0x02, 0x00, 0x02, 0x00 ]);
        src.extend_from_slice(&zlib(&pixels));

        let cel = decode_ase_cel(&mut Cursor::new(&src[..]), ColorDepth::Rgba)
            .expect("cel");
        match cel.content {
            CelContent::Compressed(ref img) => assert_eq!(img.pixels, pixels),
            _ => panic!("expected compressed cel"),
        }
    }

    #[test]
    fn test_decode_ase_cel_compressed_short() {
        let mut src = cel_header(2);
        src.extend_from_slice(&[ 0x02, 0x00, 0x02, 0x00 ]);
        src.extend_from_slice(&zlib(&[0; 15]));

        match decode_ase_cel(&mut Cursor::new(&src[..]), ColorDepth::Rgba) {
            Err(AseError::Decompression(_)) => (),
            _ => panic!("expected decompression error"),
        }
    }

    #[test]
    fn test_decode_ase_cel_compressed_garbage() {
        let mut src = cel_header(2);
        src.extend_from_slice(&[ 0x01, 0x00, 0x01, 0x00, 0xDE, 0xAD, 0xBE, 0xEF ]);

        match decode_ase_cel(&mut Cursor::new(&src[..]), ColorDepth::Indexed) {
            Err(AseError::Decompression(_)) => (),
            _ => panic!("expected decompression error"),
        }
    }

    #[test]
    fn test_decode_ase_cel_tilemap() {
        let mut src = cel_header(3);
        src.extend_from_slice(&[ 0x03, 0x00, 0x05, 0x00 ]);

        let cel = decode_ase_cel(&mut Cursor::new(&src[..]), ColorDepth::Indexed)
            .expect("cel");
        assert_eq!(cel.content, CelContent::Tilemap { width: 3, height: 5 });
    }

    #[test]
    fn test_image_size() {
        assert_eq!(image_size(3, 2, ColorDepth::Grayscale).ok(), Some(12));
        assert_eq!(image_size(0xFFFF, 0xFFFF, ColorDepth::Indexed).ok(),
                Some(0xFFFF * 0xFFFF));
    }

    #[test]
    fn test_decode_ase_cel_raw_overclaimed() {
        let mut src = cel_header(0);
        src.extend_from_slice(&[ 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x02 ]);

        match decode_ase_cel(&mut Cursor::new(&src[..]), ColorDepth::Rgba) {
            Err(AseError::Io(_)) => (),
            _ => panic!("expected io error"),
        }
    }

    #[test]
    fn test_decode_ase_cel_truncated_raw() {
        let mut src = cel_header(0);
        src.extend_from_slice(&[ 0x02, 0x00, 0x02, 0x00, 0x01 ]);

        match decode_ase_cel(&mut Cursor::new(&src[..]), ColorDepth::Indexed) {
            Err(AseError::Io(_)) => (),
            _ => panic!("expected io error"),
        }
    }
}
