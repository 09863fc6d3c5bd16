//! ASE implementation.

use std::fs::File;
use std::io::{BufReader,Cursor,Read,Seek,SeekFrom};
use std::path::Path;

use ::{AseError,AseResult};
use ::chunk::*;
use ::cursor::{AseReadExt,alloc_vec};
use ::document::*;

/// Magic for an ASE file - Aseprite ASE/ASEPRITE Files.
///
/// An ASE file begins with a 128-byte header, followed by one frame
/// chunk per frame.  Each frame contains the chunks describing the
/// layers, cels, palette and other properties of the document.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   size   | The size of the entire file, including this header.
///        4 |      2 |   magic  | File format identifier.  Always 0xA5E0.
///        6 |      2 |  frames  | Number of frames.
///        8 |      2 |   width  | Width in pixels.
///       10 |      2 |  height  | Height in pixels.
///       12 |      2 |   depth  | Bits per pixel, 32 RGBA, 16 grayscale, 8 indexed.
///       14 |      4 |   flags  | 1 layer opacity is valid, 2 layer blend mode is valid for groups, 4 layers have a UUID.
///       18 |      2 |   speed  | Milliseconds between frames, deprecated in favour of the frame duration.
///       20 |      8 | reserved | Set to zero.
///       28 |      1 |  transp  | Palette entry that is transparent, only in indexed documents.
///       29 |      3 | reserved | Unused.
///       32 |      2 |  ncolors | Number of colours, 0 means 256.
///       34 |      1 |  aspectx | Pixel width.  If this or aspecty is 0, the pixel ratio is 1:1.
///       35 |      1 |  aspecty | Pixel height.
///       36 |      2 |   gridx  | X position of the grid, signed.
///       38 |      2 |   gridy  | Y position of the grid, signed.
///       40 |      2 |   gridw  | Grid width, 0 if there is no grid.
///       42 |      2 |   gridh  | Grid height, 0 if there is no grid.
///       44 |     84 | reserved | Set to zero.
pub const ASE_MAGIC: u16 = 0xA5E0;

/// Size of an ASE file header on disk.
pub const SIZE_OF_ASE_HEADER: usize = 128;

/// Magic for an ASE frame - Frame Chunks.
///
/// Each frame starts with a 16-byte header, followed by the frame's
/// chunks.
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   size   | The size of the frame, including this header and all chunks.
///        4 |      2 |   magic  | Frame identifier.  Always 0xF1FA.
///        6 |      2 |  chunks  | Old chunk count.  0xFFFF means there may be more chunks, see below.
///        8 |      2 | duration | Frame duration in milliseconds.
///       10 |      2 | reserved | Set to zero.
///       12 |      4 | nchunks  | New chunk count.  0 means use the old count.
pub const ASE_FRAME_MAGIC: u16 = 0xF1FA;

/// Size of an ASE frame header on disk.
pub const SIZE_OF_ASE_FRAME: usize = 16;

/// Size of a chunk header on disk.
///
///   Offset | Length | Name | Description
///   ------:| ------:|:----:| ---------------------------------------
///        0 |      4 | size | The size of the chunk, including this header.
///        4 |      2 | type | Chunk type identifier.
///        6 | size-6 | data | The chunk data.
pub const SIZE_OF_CHUNK: usize = 6;

/// ASE header.
struct AseHeader {
    frame_count: u16,
    w: u16,
    h: u16,
    depth: ColorDepth,
    flags: u32,
    speed: u16,
    transparent_index: u8,
    num_colors: usize,
    pixel_w: u8,
    pixel_h: u8,
    grid: Option<Grid>,
}

/// ASE frame header.
struct AseFrame {
    size: u32,
    num_chunks: u32,
    duration: u16,
}

/// The most recently decoded entity that a user data chunk applies to.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
enum LastEntity {
    Nothing,
    Layer(usize),
    Cel { frame: usize, cel: usize },
    Slice(usize),
}

/// Document state accumulated over the whole scan.
struct DocumentBuilder {
    hdr: AseHeader,
    palette: Palette,
    new_palette_seen: bool,
    color_profile: ColorProfile,
    layers: Vec<Layer>,
    slices: Vec<Slice>,
    tags: Vec<Tag>,
    frames: Vec<Frame>,
    last_entity: LastEntity,
}

/// Frame state, reset for every frame.
struct FrameBuilder {
    frame_num: usize,
    duration: u16,
    cels: Vec<Cel>,
    last_cel: Option<usize>,
}

/*--------------------------------------------------------------*/

impl Document {
    /// Decode an ASE document from a seekable byte source.
    ///
    /// The source must be positioned at the start of the file header.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    ///
    /// let mut file = File::open("ex.aseprite").unwrap();
    /// let doc = ase::Document::read(&mut file).unwrap();
    /// println!("{}x{}, {} frames", doc.width, doc.height, doc.frames.len());
    /// doc.release();
    /// ```
    pub fn read<R: Read + Seek>(r: &mut R)
            -> AseResult<Self> {
        read_document(r)
    }

    /// Decode an ASE document held in memory.
    pub fn from_bytes(buf: &[u8])
            -> AseResult<Self> {
        read_document(&mut Cursor::new(buf))
    }

    /// Open and decode an ASE file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// ase::Document::open(Path::new("ex.aseprite"));
    /// ```
    pub fn open(filename: &Path)
            -> AseResult<Self> {
        let file = try!(File::open(filename));
        let mut r = BufReader::new(file);
        read_document(&mut r)
    }
}

/*--------------------------------------------------------------*/

/// Decode a whole document: the header, then every frame's chunks.
pub fn read_document<R: Read + Seek>(r: &mut R)
        -> AseResult<Document> {
    let hdr = try!(read_ase_header(r));
    debug!("ASE {}x{} {:?}, {} frames, {} colors",
            hdr.w, hdr.h, hdr.depth, hdr.frame_count, hdr.num_colors);

    let mut doc = try!(DocumentBuilder::new(hdr));
    for frame_num in 0..(doc.hdr.frame_count as usize) {
        let offset = try!(r.seek(SeekFrom::Current(0)));
        let frame_hdr = try!(read_frame_header(r));

        let mut frame = FrameBuilder {
            frame_num: frame_num,
            duration: frame_hdr.duration,
            cels: Vec::new(),
            last_cel: None,
        };

        for _ in 0..frame_hdr.num_chunks {
            try!(doc.read_chunk(r, &mut frame));
        }

        let position = try!(r.seek(SeekFrom::Current(0)));
        let expected = offset + frame_hdr.size as u64;
        if position != expected {
            warn!("frame {} - chunks end at offset={}, frame size gives offset={}",
                    frame_num, position, expected);
        }

        try!(doc.finish_frame(frame));
    }

    doc.finish()
}

/// Read the ASE file header.
fn read_ase_header<R: Read>(file: &mut R)
        -> AseResult<AseHeader> {
    let mut buf = [0; SIZE_OF_ASE_HEADER];
    try!(file.read_exact(&mut buf));

    let mut r = Cursor::new(&buf[..]);
    let _size = try!(r.read_dword());
    let magic = try!(r.read_word());
    if magic != ASE_MAGIC {
        return Err(AseError::InvalidFile);
    }

    let frame_count = try!(r.read_word());
    let width = try!(r.read_word());
    let height = try!(r.read_word());
    let depth = try!(ColorDepth::from_bits(try!(r.read_word())));
    let flags = try!(r.read_dword());
    let speed = try!(r.read_word());
    try!(r.skip(8));
    let transparent_index = try!(r.read_byte());
    try!(r.skip(3));
    let num_colors = match try!(r.read_word()) {
        0 => 256 as usize,
        n => n as usize,
    };
    let mut pixel_w = try!(r.read_byte());
    let mut pixel_h = try!(r.read_byte());
    let grid_x = try!(r.read_short());
    let grid_y = try!(r.read_short());
    let grid_w = try!(r.read_word());
    let grid_h = try!(r.read_word());
    try!(r.skip(84));
    debug_assert_eq!(r.position(), SIZE_OF_ASE_HEADER as u64);

    if pixel_w == 0 || pixel_h == 0 {
        pixel_w = 1;
        pixel_h = 1;
    }

    let grid = if grid_w > 0 && grid_h > 0 {
        Some(Grid { x: grid_x, y: grid_y, width: grid_w, height: grid_h })
    } else {
        None
    };

    Ok(AseHeader {
        frame_count: frame_count,
        w: width,
        h: height,
        depth: depth,
        flags: flags,
        speed: speed,
        transparent_index: transparent_index,
        num_colors: num_colors,
        pixel_w: pixel_w,
        pixel_h: pixel_h,
        grid: grid,
    })
}

/// Read a frame header.
fn read_frame_header<R: Read>(file: &mut R)
        -> AseResult<AseFrame> {
    let mut buf = [0; SIZE_OF_ASE_FRAME];
    try!(file.read_exact(&mut buf));

    let mut r = Cursor::new(&buf[..]);
    let size = try!(r.read_dword());
    let magic = try!(r.read_word());
    if magic != ASE_FRAME_MAGIC {
        return Err(AseError::InvalidFrameHeader);
    }

    let old_chunks = try!(r.read_word());
    let duration = try!(r.read_word());
    try!(r.skip(2));
    let new_chunks = try!(r.read_dword());

    Ok(AseFrame {
        size: size,
        num_chunks: frame_chunk_count(old_chunks, new_chunks),
        duration: duration,
    })
}

/// The old 16-bit count governs unless it is saturated at 0xFFFF and
/// the new 32-bit count is larger.
fn frame_chunk_count(old_chunks: u16, new_chunks: u32)
        -> u32 {
    if old_chunks == 0xFFFF && (old_chunks as u32) < new_chunks {
        new_chunks
    } else {
        old_chunks as u32
    }
}

/// Append to an accumulating sequence, failing cleanly if it cannot
/// grow.
fn push<T>(v: &mut Vec<T>, x: T)
        -> AseResult<usize> {
    try!(v.try_reserve(1).map_err(|_| AseError::Allocation));
    v.push(x);
    Ok(v.len() - 1)
}

/*--------------------------------------------------------------*/

impl DocumentBuilder {
    fn new(hdr: AseHeader)
            -> AseResult<Self> {
        let palette = try!(Palette::with_len(hdr.num_colors, hdr.transparent_index));
        let frames = try!(alloc_vec(hdr.frame_count as usize));

        Ok(DocumentBuilder {
            hdr: hdr,
            palette: palette,
            new_palette_seen: false,
            color_profile: ColorProfile::default(),
            layers: Vec::new(),
            slices: Vec::new(),
            tags: Vec::new(),
            frames: frames,
            last_entity: LastEntity::Nothing,
        })
    }

    /// Read one chunk, then move to the end the chunk declares no
    /// matter how much of it was decoded.
    fn read_chunk<R: Read + Seek>(&mut self, r: &mut R, frame: &mut FrameBuilder)
            -> AseResult<()> {
        let offset = try!(r.seek(SeekFrom::Current(0)));
        let size = try!(r.read_dword());
        let magic = try!(r.read_word());

        trace!("frame {} - chunk {} ({:#06x}) at offset={}, size={}",
                frame.frame_num, chunk_name(magic).unwrap_or("?"), magic, offset, size);

        if (size as usize) < SIZE_OF_CHUNK {
            return Err(AseError::Corrupted("chunk size"));
        }

        {
            let mut body = r.by_ref().take((size as usize - SIZE_OF_CHUNK) as u64);
            try!(self.decode_chunk(magic, &mut body, frame));
        }

        try!(r.seek(SeekFrom::Start(offset + size as u64)));
        Ok(())
    }

    /// Decode a chunk, based on the chunk type, and attach the result.
    fn decode_chunk<R: Read>(&mut self, magic: u16, r: &mut R, frame: &mut FrameBuilder)
            -> AseResult<()> {
        match magic {
            ASE_OLD_PALETTE | ASE_OLD_PALETTE_64 => {
                if self.new_palette_seen {
                    debug!("frame {} - old palette ignored after new palette",
                            frame.frame_num);
                } else {
                    try!(decode_ase_old_palette(r, &mut self.palette,
                            magic == ASE_OLD_PALETTE_64));
                }
            },

            ASE_PALETTE => {
                try!(decode_ase_palette(r, &mut self.palette));
                self.new_palette_seen = true;
            },

            ASE_LAYER => {
                let layer = try!(decode_ase_layer(r));
                let idx = try!(push(&mut self.layers, layer));
                self.last_entity = LastEntity::Layer(idx);
            },

            ASE_CEL => {
                let cel = try!(decode_ase_cel(r, self.hdr.depth));
                let idx = try!(push(&mut frame.cels, cel));
                frame.last_cel = Some(idx);
                self.last_entity = LastEntity::Cel { frame: frame.frame_num, cel: idx };
            },

            ASE_CEL_EXTRA => {
                match frame.last_cel.take() {
                    Some(idx) => frame.cels[idx].extra = try!(decode_ase_cel_extra(r)),
                    None => warn!("frame {} - cel extra without a cel", frame.frame_num),
                }
            },

            ASE_COLOR_PROFILE => {
                self.color_profile = try!(decode_ase_color_profile(r));
            },

            ASE_TAGS => {
                self.tags = try!(decode_ase_tags(r));
            },

            ASE_USER_DATA => {
                if self.last_entity == LastEntity::Nothing {
                    warn!("frame {} - user data without a layer, cel or slice",
                            frame.frame_num);
                } else {
                    let user_data = try!(decode_ase_user_data(r));
                    self.attach_user_data(user_data, frame);
                }
            },

            ASE_SLICE => {
                let slice = try!(decode_ase_slice(r));
                let idx = try!(push(&mut self.slices, slice));
                self.last_entity = LastEntity::Slice(idx);
            },

            ASE_EXTERNAL_FILES | ASE_MASK | ASE_PATH | ASE_TILESET =>
                debug!("frame {} - unsupported chunk type {:#06x}",
                        frame.frame_num, magic),

            _ => warn!("frame {} - unrecognised chunk type {:#06x}",
                    frame.frame_num, magic),
        }

        Ok(())
    }

    fn attach_user_data(&mut self, user_data: UserData, frame: &mut FrameBuilder) {
        match self.last_entity {
            LastEntity::Nothing => return,
            LastEntity::Layer(idx) => self.layers[idx].user_data = user_data,
            LastEntity::Cel { frame: f, cel: idx } => {
                if f == frame.frame_num {
                    frame.cels[idx].user_data = user_data;
                } else {
                    self.frames[f].cels[idx].user_data = user_data;
                }
            },
            LastEntity::Slice(idx) => self.slices[idx].user_data = user_data,
        }

        self.last_entity = LastEntity::Nothing;
    }

    fn finish_frame(&mut self, frame: FrameBuilder)
            -> AseResult<()> {
        let cels = try!(freeze(frame.cels));
        try!(push(&mut self.frames, Frame {
            duration: frame.duration,
            cels: cels,
        }));
        Ok(())
    }

    fn finish(self)
            -> AseResult<Document> {
        Ok(Document {
            width: self.hdr.w,
            height: self.hdr.h,
            color_depth: self.hdr.depth,
            flags: self.hdr.flags,
            speed: self.hdr.speed,
            pixel_width: self.hdr.pixel_w,
            pixel_height: self.hdr.pixel_h,
            grid: self.hdr.grid,
            palette: self.palette,
            color_profile: self.color_profile,
            layers: try!(freeze(self.layers)),
            slices: try!(freeze(self.slices)),
            tags: try!(freeze(self.tags)),
            frames: try!(freeze(self.frames)),
        })
    }
}
