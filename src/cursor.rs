//! Primitive reads over an ASE byte stream.
//!
//! All multi-byte values are little-endian.  The ASE file format
//! describes its fields with the following types:
//!
//!   Type   | Size | Description
//!   ------:| ----:|:-----------------------------------------------
//!     BYTE |    1 | An 8-bit unsigned integer value.
//!     WORD |    2 | A 16-bit unsigned integer value.
//!    SHORT |    2 | A 16-bit signed integer value.
//!    DWORD |    4 | A 32-bit unsigned integer value.
//!     LONG |    4 | A 32-bit signed integer value.
//!    FIXED |    4 | A 32-bit fixed point (16.16) value.
//!   STRING |  2+n | WORD length followed by n bytes of UTF-8 text.

use std::cmp;
use std::io::{self,Read};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::{AseError,AseResult};
use ::document::{Fixed,Rgba};

/// Width of a length prefix.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum LenPrefix {
    Byte,
    Word,
    Dword,
}

/// Most elements reserved up front for a declared count.  Longer
/// sequences grow as their elements are actually read.
const RESERVE_LIMIT: usize = 1024;

/// Read exactly `len` bytes, growing the buffer only as data arrives.
///
/// A declared length larger than the source fails with
/// `UnexpectedEof` after reading what is there, never after allocating
/// the declared size.
pub fn read_exact_vec<R: Read + ?Sized>(r: &mut R, len: usize)
        -> AseResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut block = [0; 4096];
    while buf.len() < len {
        let want = cmp::min(len - buf.len(), block.len());
        let n = match r.read(&mut block[..want]) {
            Ok(0) => return Err(AseError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof, "failed to fill whole buffer"))),
            Ok(n) => n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(AseError::Io(e)),
        };
        try!(buf.try_reserve(n).map_err(|_| AseError::Allocation));
        buf.extend_from_slice(&block[..n]);
    }
    Ok(buf)
}

/// Allocate an empty vector with room for `len` elements.
pub fn alloc_vec<T>(len: usize)
        -> AseResult<Vec<T>> {
    let mut v = Vec::new();
    try!(v.try_reserve_exact(len).map_err(|_| AseError::Allocation));
    Ok(v)
}

/// Extension methods for reading ASE primitives.
pub trait AseReadExt: Read {
    fn read_byte(&mut self)
            -> AseResult<u8> {
        Ok(try!(self.read_u8()))
    }

    fn read_word(&mut self)
            -> AseResult<u16> {
        Ok(try!(self.read_u16::<LE>()))
    }

    fn read_short(&mut self)
            -> AseResult<i16> {
        Ok(try!(self.read_i16::<LE>()))
    }

    fn read_dword(&mut self)
            -> AseResult<u32> {
        Ok(try!(self.read_u32::<LE>()))
    }

    fn read_long(&mut self)
            -> AseResult<i32> {
        Ok(try!(self.read_i32::<LE>()))
    }

    fn read_fixed(&mut self)
            -> AseResult<Fixed> {
        Ok(Fixed(try!(self.read_i32::<LE>())))
    }

    /// Read four bytes as red, green, blue, alpha.
    fn read_rgba(&mut self)
            -> AseResult<Rgba> {
        let mut c = [0; 4];
        try!(self.read_exact(&mut c));
        Ok(Rgba::new(c[0], c[1], c[2], c[3]))
    }

    /// Read a length prefix of the given width.
    fn read_len(&mut self, prefix: LenPrefix)
            -> AseResult<usize> {
        let len = match prefix {
            LenPrefix::Byte => try!(self.read_u8()) as usize,
            LenPrefix::Word => try!(self.read_u16::<LE>()) as usize,
            LenPrefix::Dword => try!(self.read_u32::<LE>()) as usize,
        };
        Ok(len)
    }

    /// Discard `n` bytes, e.g. reserved fields.
    fn skip(&mut self, n: u64)
            -> AseResult<()> where Self: Sized {
        let skipped = try!(io::copy(&mut self.by_ref().take(n), &mut io::sink()));
        if skipped < n {
            return Err(AseError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof, "failed to skip reserved bytes")));
        }
        Ok(())
    }

    /// Read exactly `len` bytes into a newly allocated buffer.
    fn read_bytes(&mut self, len: usize)
            -> AseResult<Vec<u8>> {
        read_exact_vec(self, len)
    }

    /// Read a length-prefixed byte blob.
    fn read_prefixed_bytes(&mut self, prefix: LenPrefix)
            -> AseResult<Vec<u8>> {
        let len = try!(self.read_len(prefix));
        self.read_bytes(len)
    }

    /// Read a STRING: WORD length followed by UTF-8 bytes.
    fn read_string(&mut self)
            -> AseResult<String> {
        let buf = try!(self.read_prefixed_bytes(LenPrefix::Word));
        String::from_utf8(buf).map_err(|_| AseError::Corrupted("string"))
    }

    /// Read `count` records with `f`.
    fn read_records<T, F>(&mut self, count: usize, mut f: F)
            -> AseResult<Vec<T>>
            where Self: Sized, F: FnMut(&mut Self) -> AseResult<T> {
        let mut v = try!(alloc_vec(cmp::min(count, RESERVE_LIMIT)));
        for _ in 0..count {
            let x = try!(f(self));
            try!(v.try_reserve(1).map_err(|_| AseError::Allocation));
            v.push(x);
        }
        Ok(v)
    }

    /// Read a length prefix of the given width, then that many
    /// elements with `f`.
    fn read_prefixed_array<T, F>(&mut self, prefix: LenPrefix, f: F)
            -> AseResult<Vec<T>>
            where Self: Sized, F: FnMut(&mut Self) -> AseResult<T> {
        let count = try!(self.read_len(prefix));
        self.read_records(count, f)
    }
}

impl<R: Read + ?Sized> AseReadExt for R {}

#[cfg(test)]
mod tests {
    use std::io::{self,Cursor};
    use ::AseError;
    use super::{AseReadExt,LenPrefix};

    #[test]
    fn test_read_primitives() {
        let src = [
            0x7F,
            0x34, 0x12,
            0xFE, 0xFF,
            0x78, 0x56, 0x34, 0x12,
            0x00, 0x80, 0x01, 0x00 ];
        let mut r = Cursor::new(&src[..]);

        assert_eq!(r.read_byte().expect("byte"), 0x7F);
        assert_eq!(r.read_word().expect("word"), 0x1234);
        assert_eq!(r.read_short().expect("short"), -2);
        assert_eq!(r.read_dword().expect("dword"), 0x12345678);
        assert_eq!(r.read_fixed().expect("fixed").0, 0x00018000);
    }

    #[test]
    fn test_read_string() {
        let src = [ 0x05, 0x00, b'L', b'a', b'y', b'e', b'r', 0xAA ];
        let mut r = Cursor::new(&src[..]);

        assert_eq!(r.read_string().expect("string"), "Layer");
        assert_eq!(r.position(), 7);
    }

    #[test]
    fn test_read_prefixed_widths() {
        let src = [ 0x02, 0xAA, 0xBB, 0x01, 0x00, 0x00, 0x00, 0xCC ];
        let mut r = Cursor::new(&src[..]);

        let a = r.read_prefixed_bytes(LenPrefix::Byte).expect("byte prefix");
        let b = r.read_prefixed_bytes(LenPrefix::Dword).expect("dword prefix");
        assert_eq!(a, [0xAA, 0xBB]);
        assert_eq!(b, [0xCC]);
    }

    #[test]
    fn test_read_prefixed_array() {
        let src = [ 0x03, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00 ];
        let mut r = Cursor::new(&src[..]);

        let xs = r.read_prefixed_array(LenPrefix::Word, |r| r.read_word())
            .expect("array");
        assert_eq!(xs, [1, 2, 3]);
    }

    #[test]
    fn test_skip_past_end() {
        let src = [ 0; 4 ];
        let mut r = Cursor::new(&src[..]);

        assert!(r.skip(4).is_ok());
        match r.skip(1) {
            Err(AseError::Io(_)) => (),
            _ => panic!("expected io error"),
        }
    }

    #[test]
    fn test_read_bytes_overclaimed() {
        let src = [ 0xFF, 0xFF, 0xFF, 0x7F, 0x01, 0x02 ];
        let mut r = Cursor::new(&src[..]);

        match r.read_prefixed_bytes(LenPrefix::Dword) {
            Err(AseError::Io(ref e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            _ => panic!("expected io error"),
        }
    }

    #[test]
    fn test_read_bytes_spans_blocks() {
        let src: Vec<u8> = (0..10000).map(|i| i as u8).collect();
        let mut r = Cursor::new(&src[..]);

        let buf = r.read_bytes(9000).expect("bytes");
        assert_eq!(&buf[..], &src[..9000]);
        assert_eq!(r.position(), 9000);
    }

    #[test]
    fn test_read_records_overclaimed() {
        let src = [ 0x01, 0x00 ];
        let mut r = Cursor::new(&src[..]);

        match r.read_records(0x7FFF_FFFF, |r| r.read_word()) {
            Err(AseError::Io(_)) => (),
            _ => panic!("expected io error"),
        }
    }

    #[test]
    fn test_truncated_string() {
        let src = [ 0x08, 0x00, b'a', b'b' ];
        let mut r = Cursor::new(&src[..]);

        match r.read_string() {
            Err(AseError::Io(_)) => (),
            _ => panic!("expected io error"),
        }
    }
}
