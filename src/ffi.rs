//! Foreign function interface.
//!
//! A document returned by `asers_open` or `asers_load_from_memory`
//! must be released with `asers_document_free`, exactly once.

use std::ffi::CStr;
use std::path::Path;
use std::ptr;
use std::slice;
use libc::{c_char,c_int,c_uint,size_t};

use ::Document;

// Log with "file:line - " prefix, for more informative error messages.
macro_rules! printerrorln {
    ($e:expr) => {
        error!("{}:{} - {}", file!(), line!(), $e);
    };
}

fn into_raw(res: ::AseResult<Document>)
        -> *mut Document {
    match res {
        Ok(doc) => Box::into_raw(Box::new(doc)),
        Err(e) => {
            printerrorln!(e);
            ptr::null_mut()
        },
    }
}

/*--------------------------------------------------------------*/
/* Document                                                     */
/*--------------------------------------------------------------*/

/// Open and decode an ASE file.
#[no_mangle]
pub extern "C" fn asers_open(filename: *const c_char)
        -> *mut Document {
    if filename.is_null() {
        printerrorln!("bad input parameters");
        return ptr::null_mut();
    }

    let cstr = unsafe{ CStr::from_ptr(filename) };
    match cstr.to_str() {
        Ok(s) => into_raw(Document::open(Path::new(s))),
        Err(e) => {
            printerrorln!(e);
            ptr::null_mut()
        },
    }
}

/// Decode an ASE document held in memory.
#[no_mangle]
pub extern "C" fn asers_load_from_memory(src: *const u8, src_len: size_t)
        -> *mut Document {
    if src.is_null() {
        printerrorln!("bad input parameters");
        return ptr::null_mut();
    }

    let src_slice = unsafe{ slice::from_raw_parts(src, src_len) };
    into_raw(Document::from_bytes(src_slice))
}

/// Release a document and everything it owns.
#[no_mangle]
pub extern "C" fn asers_document_free(doc: *mut Document) {
    if doc.is_null() {
        return;
    }

    let doc = unsafe{ Box::from_raw(doc) };
    doc.release();
}

/// Get the document width.
#[no_mangle]
pub extern "C" fn asers_width(doc: *const Document)
        -> c_uint {
    if doc.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let doc = unsafe{ &*doc };
    doc.width as c_uint
}

/// Get the document height.
#[no_mangle]
pub extern "C" fn asers_height(doc: *const Document)
        -> c_uint {
    if doc.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let doc = unsafe{ &*doc };
    doc.height as c_uint
}

/// Get the bits per pixel.
#[no_mangle]
pub extern "C" fn asers_depth(doc: *const Document)
        -> c_uint {
    if doc.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let doc = unsafe{ &*doc };
    doc.color_depth.bits_per_pixel() as c_uint
}

/// Get the frame count.
#[no_mangle]
pub extern "C" fn asers_frame_count(doc: *const Document)
        -> c_uint {
    if doc.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let doc = unsafe{ &*doc };
    doc.frames.len() as c_uint
}

/// Get a frame's duration in milliseconds, or -1 if there is no such
/// frame.
#[no_mangle]
pub extern "C" fn asers_frame_duration(doc: *const Document, frame: c_uint)
        -> c_int {
    if doc.is_null() {
        printerrorln!("bad input parameters");
        return -1;
    }

    let doc = unsafe{ &*doc };
    match doc.frames.get(frame as usize) {
        Some(f) => f.duration as c_int,
        None => -1,
    }
}

/// Get the layer count.
#[no_mangle]
pub extern "C" fn asers_layer_count(doc: *const Document)
        -> c_uint {
    if doc.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let doc = unsafe{ &*doc };
    doc.layers.len() as c_uint
}

/// Get the palette size.
#[no_mangle]
pub extern "C" fn asers_palette_len(doc: *const Document)
        -> c_uint {
    if doc.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let doc = unsafe{ &*doc };
    doc.palette.len() as c_uint
}

/// Copy the palette as RGBA quadruples into `dst`, which must hold
/// `4 * dst_len` bytes.  Returns the number of colours copied.
#[no_mangle]
pub extern "C" fn asers_copy_palette(
        doc: *const Document, dst: *mut u8, dst_len: size_t)
        -> c_uint {
    if doc.is_null() || dst.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let dst_bytes = match dst_len.checked_mul(4) {
        Some(n) => n,
        None => {
            printerrorln!("palette buffer too large");
            return 0;
        },
    };

    let doc = unsafe{ &*doc };
    let dst_slice = unsafe{ slice::from_raw_parts_mut(dst, dst_bytes) };
    let mut n = 0;
    for (c, d) in doc.palette.colors.iter().zip(dst_slice.chunks_mut(4)) {
        d.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        n = n + 1;
    }

    n as c_uint
}
