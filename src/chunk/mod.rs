//! ASE chunk decoding subroutines.

macro_rules! module {
    ($e:ident) => {
        pub use self::$e::*;
        mod $e;
    };
}

module!(chunk0004);
module!(chunk2004);
module!(chunk2005);
module!(chunk2006);
module!(chunk2007);
module!(chunk2018);
module!(chunk2019);
module!(chunk2020);
module!(chunk2022);

/// Magic for an ASE_EXTERNAL_FILES chunk - External Files.  Not decoded.
pub const ASE_EXTERNAL_FILES: u16 = 0x2008;

/// Magic for an ASE_MASK chunk - Mask, deprecated.  Not decoded.
pub const ASE_MASK: u16 = 0x2016;

/// Magic for an ASE_PATH chunk - Path, never used.  Not decoded.
pub const ASE_PATH: u16 = 0x2017;

/// Magic for an ASE_TILESET chunk - Tileset.  Not decoded.
pub const ASE_TILESET: u16 = 0x2023;

/// Returns the name of a chunk type, if it is one the format defines.
pub fn chunk_name(magic: u16)
        -> Option<&'static str> {
    let name = match magic {
        ASE_OLD_PALETTE => "ASE_OLD_PALETTE",
        ASE_OLD_PALETTE_64 => "ASE_OLD_PALETTE_64",
        ASE_LAYER => "ASE_LAYER",
        ASE_CEL => "ASE_CEL",
        ASE_CEL_EXTRA => "ASE_CEL_EXTRA",
        ASE_COLOR_PROFILE => "ASE_COLOR_PROFILE",
        ASE_EXTERNAL_FILES => "ASE_EXTERNAL_FILES",
        ASE_MASK => "ASE_MASK",
        ASE_PATH => "ASE_PATH",
        ASE_TAGS => "ASE_TAGS",
        ASE_PALETTE => "ASE_PALETTE",
        ASE_USER_DATA => "ASE_USER_DATA",
        ASE_SLICE => "ASE_SLICE",
        ASE_TILESET => "ASE_TILESET",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::{ASE_CEL,ASE_MASK,chunk_name};

    #[test]
    fn test_chunk_name() {
        assert_eq!(chunk_name(ASE_CEL), Some("ASE_CEL"));
        assert_eq!(chunk_name(ASE_MASK), Some("ASE_MASK"));
        assert_eq!(chunk_name(0x7777), None);
    }
}
