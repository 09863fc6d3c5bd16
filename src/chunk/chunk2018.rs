//! Decoder for chunk type 0x2018 = ASE_TAGS.

use std::io::Read;

use ::AseResult;
use ::cursor::AseReadExt;
use ::document::{AnimationDirection,Tag};

/// Magic for an ASE_TAGS chunk - Tags.
///
/// All of the document's tags in one chunk.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   count  | Number of tags.
///        2 |      8 | reserved | Set to zero.
///
/// Followed by `count` tags:
///
///   Offset | Length |   Name    | Description
///   ------:| ------:|:---------:| ----------------------------------
///        0 |      2 |    from   | First frame.
///        2 |      2 |     to    | Last frame, inclusive.
///        4 |      1 | direction | 0 forward, 1 reverse, 2 ping-pong, 3 ping-pong reverse.
///        5 |      2 |   repeat  | Times to play the range, 0 forever.
///        7 |      6 |  reserved | Set to zero.
///       13 |      3 |    rgb    | Tag colour.
///       16 |      1 |   extra   | Set to zero.
///       17 |    2+n |    name   | STRING.
pub const ASE_TAGS: u16 = 0x2018;

/// Decode an ASE_TAGS chunk.
pub fn decode_ase_tags<R: Read>(r: &mut R)
        -> AseResult<Vec<Tag>> {
    let count = try!(r.read_word()) as usize;
    try!(r.skip(8));

    r.read_records(count, decode_tag)
}

fn decode_tag<R: Read>(r: &mut R)
        -> AseResult<Tag> {
    let from = try!(r.read_word());
    let to = try!(r.read_word());
    let direction = try!(AnimationDirection::from_byte(try!(r.read_byte())));
    let repeat = try!(r.read_word());
    try!(r.skip(6));
    let mut color = [0; 3];
    try!(r.read_exact(&mut color));
    try!(r.skip(1));
    let name = try!(r.read_string());

    Ok(Tag {
        from: from,
        to: to,
        direction: direction,
        repeat: repeat,
        color: color,
        name: name,
    })
}
