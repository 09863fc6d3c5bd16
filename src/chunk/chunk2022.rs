//! Decoder for chunk type 0x2022 = ASE_SLICE.

use std::io::Read;

use ::AseResult;
use ::cursor::AseReadExt;
use ::document::{NinePatch,Pivot,Slice,SliceFlags,SliceKey,UserData,freeze};

/// Magic for an ASE_SLICE chunk - Slice.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   keys   | Number of slice keys.
///        4 |      4 |   flags  | 1 nine-patch slice, 2 has pivot.
///        8 |      4 | reserved | Set to zero.
///       12 |    2+n |   name   | STRING.
///
/// Followed by `keys` slice keys:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   frame  | Frame from which this key is valid.
///        4 |      4 |     x    | Slice X origin, LONG.
///        8 |      4 |     y    | Slice Y origin, LONG.
///       12 |      4 |   width  | Slice width, 0 if hidden from this frame.
///       16 |      4 |  height  | Slice height.
///       20 |     16 |  center  | LONG x, LONG y, DWORD width, DWORD height, only for nine-patch slices.
///    20/36 |      8 |   pivot  | LONG x, LONG y, only if the slice has a pivot.
pub const ASE_SLICE: u16 = 0x2022;

/// Decode an ASE_SLICE chunk.
pub fn decode_ase_slice<R: Read>(r: &mut R)
        -> AseResult<Slice> {
    let count = try!(r.read_dword()) as usize;
    let flags = SliceFlags(try!(r.read_dword()));
    try!(r.skip(4));
    let name = try!(r.read_string());

    let keys = try!(r.read_records(count, |r| decode_slice_key(r, flags)));

    Ok(Slice {
        flags: flags,
        name: name,
        keys: try!(freeze(keys)),
        user_data: UserData::default(),
    })
}

fn decode_slice_key<R: Read>(r: &mut R, flags: SliceFlags)
        -> AseResult<SliceKey> {
    let frame = try!(r.read_dword());
    let x = try!(r.read_long());
    let y = try!(r.read_long());
    let width = try!(r.read_dword());
    let height = try!(r.read_dword());

    let nine_patch = if flags.has_nine_patch() {
        Some(NinePatch {
            x: try!(r.read_long()),
            y: try!(r.read_long()),
            width: try!(r.read_dword()),
            height: try!(r.read_dword()),
        })
    } else {
        None
    };

    let pivot = if flags.has_pivot() {
        Some(Pivot {
            x: try!(r.read_long()),
            y: try!(r.read_long()),
        })
    } else {
        None
    };

    Ok(SliceKey {
        frame: frame,
        x: x,
        y: y,
        width: width,
        height: height,
        nine_patch: nine_patch,
        pivot: pivot,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use ::document::{NinePatch,Pivot};
    use super::decode_ase_slice;

    fn slice_header(keys: u8, flags: u8) -> Vec<u8> {
        vec![
            keys, 0x00, 0x00, 0x00,
            flags, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x03, 0x00, b'b', b't', b'n' ]
    }

    fn slice_key(frame: u8) -> Vec<u8> {
        vec![
            frame, 0x00, 0x00, 0x00,
            0xFF, 0xFF, 0xFF, 0xFF, // x -1
            0x02, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x08, 0x00, 0x00, 0x00 ]
    }

    #[test]
    fn test_decode_ase_slice_plain() {
        let mut src = slice_header(2, 0);
        src.extend(slice_key(0));
        src.extend(slice_key(3));

        let slice = decode_ase_slice(&mut Cursor::new(&src[..])).expect("slice");
        assert_eq!(slice.name, "btn");
        assert_eq!(slice.keys.len(), 2);
        assert_eq!(slice.keys[0].x, -1);
        assert_eq!(slice.keys[0].width, 16);
        assert_eq!(slice.keys[1].frame, 3);
        assert_eq!(slice.keys[1].nine_patch, None);
        assert_eq!(slice.keys[1].pivot, None);
        assert!(slice.user_data.is_empty());
    }

    #[test]
    fn test_decode_ase_slice_nine_patch_and_pivot() {
        let mut src = slice_header(1, 3);
        src.extend(slice_key(0));
        src.extend_from_slice(&[
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x0E, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x08, 0x00, 0x00, 0x00,
            0xFC, 0xFF, 0xFF, 0xFF ]);

        let slice = decode_ase_slice(&mut Cursor::new(&src[..])).expect("slice");
        assert!(slice.flags.has_nine_patch());
        assert!(slice.flags.has_pivot());
        assert_eq!(slice.keys[0].nine_patch,
                Some(NinePatch { x: 1, y: 2, width: 14, height: 4 }));
        assert_eq!(slice.keys[0].pivot, Some(Pivot { x: 8, y: -4 }));
    }

    #[test]
    fn test_decode_ase_slice_pivot_only() {
        let mut src = slice_header(1, 2);
        src.extend(slice_key(0));
        src.extend_from_slice(&[
            0x05, 0x00, 0x00, 0x00,
            0x06, 0x00, 0x00, 0x00 ]);

        let slice = decode_ase_slice(&mut Cursor::new(&src[..])).expect("slice");
        assert_eq!(slice.keys[0].nine_patch, None);
        assert_eq!(slice.keys[0].pivot, Some(Pivot { x: 5, y: 6 }));
    }
}
